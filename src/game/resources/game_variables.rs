use bevy_ecs::prelude::Resource;
use std::collections::HashMap;

use item_bank_common::{components::BoxId, script_facade::BoxSelector};

/// Integer variables set by the host game's event scripts.
#[derive(Resource, Default, Debug)]
pub struct GameVariables {
    values: HashMap<usize, i32>,
}

impl GameVariables {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, variable_id: usize) -> i32 {
        self.values.get(&variable_id).copied().unwrap_or(0)
    }

    pub fn set(&mut self, variable_id: usize, value: i32) {
        self.values.insert(variable_id, value);
    }

    pub fn box_selector(&self, variable_id: usize) -> VariableBoxSelector<'_> {
        VariableBoxSelector {
            variables: self,
            variable_id,
        }
    }
}

/// Reads the current box from a game variable, variable 0 always selects
/// box 0.
pub struct VariableBoxSelector<'a> {
    variables: &'a GameVariables,
    variable_id: usize,
}

impl BoxSelector for VariableBoxSelector<'_> {
    fn current_box(&self) -> BoxId {
        if self.variable_id == 0 {
            BoxId(0)
        } else {
            BoxId(self.variables.get(self.variable_id))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn box_follows_variable() {
        let mut variables = GameVariables::new();
        assert_eq!(variables.box_selector(14).current_box(), BoxId(0));

        variables.set(14, 3);
        assert_eq!(variables.box_selector(14).current_box(), BoxId(3));

        variables.set(0, 7);
        assert_eq!(variables.box_selector(0).current_box(), BoxId(0));
    }
}
