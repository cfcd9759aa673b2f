/// Number entry for an item transfer, always within `1..=max`.
#[derive(Copy, Clone, Debug, PartialEq, Eq)]
pub struct QuantityInput {
    number: u32,
    max: u32,
}

impl QuantityInput {
    /// Returns `None` when there is nothing to transfer.
    pub fn new(max: u32) -> Option<Self> {
        if max == 0 {
            None
        } else {
            Some(Self { number: 1, max })
        }
    }

    pub fn with_number(mut self, number: u32) -> Self {
        self.number = number.clamp(1, self.max);
        self
    }

    pub fn number(&self) -> u32 {
        self.number
    }

    pub fn max(&self) -> u32 {
        self.max
    }

    /// Returns true if the number changed.
    pub fn adjust(&mut self, delta: i64) -> bool {
        let last_number = self.number;
        self.number = (self.number as i64 + delta).clamp(1, self.max as i64) as u32;
        self.number != last_number
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn adjust_stays_in_range() {
        let mut input = QuantityInput::new(25).unwrap();
        assert_eq!(input.number(), 1);
        assert_eq!(input.max(), 25);

        assert!(input.adjust(10));
        assert!(input.adjust(10));
        assert_eq!(input.number(), 21);
        assert!(input.adjust(10));
        assert_eq!(input.number(), 25);
        assert!(!input.adjust(1));

        assert!(input.adjust(-10));
        assert!(input.adjust(-10));
        assert!(input.adjust(-10));
        assert_eq!(input.number(), 1);
        assert!(!input.adjust(-1));
    }

    #[test]
    fn nothing_to_transfer() {
        assert_eq!(QuantityInput::new(0), None);
        assert_eq!(QuantityInput::new(5).unwrap().with_number(0).number(), 1);
        assert_eq!(QuantityInput::new(5).unwrap().with_number(9).number(), 5);
    }
}
