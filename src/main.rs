use std::io::BufRead;

use anyhow::Context;
use bevy_ecs::prelude::Entity;
use clap::{Arg, Command};
use log::{info, warn};
use simplelog::{ColorChoice, LevelFilter, TermLogger, TerminalMode};

use item_bank::{
    components::{Inventory, Money, TransferDirection},
    events::StorageEvent,
    resources::{GameData, StorageConfig},
    StorageGame,
};
use item_bank_data::{ItemData, ItemDatabase, ItemKind, ItemReference};

enum QuantityStep {
    Set(u32),
    Adjust(i64),
}

enum ConsoleCommand {
    SetVariable(usize, i32),
    Storage(StorageEvent),
    MoveItem {
        direction: TransferDirection,
        item: ItemReference,
        steps: Vec<QuantityStep>,
    },
    HoldGold(TransferDirection, usize),
    Tick,
    Save,
    Quit,
    Script(String),
}

fn demo_items() -> ItemDatabase {
    let mut items = ItemDatabase::new();
    items.insert(ItemReference::consumable(1), ItemData::new("Potion", 50));
    items.insert(ItemReference::consumable(2), ItemData::new("Hi-Potion", 150));
    items.insert(ItemReference::consumable(3), ItemData::new("Ether", 300));
    items.insert(ItemReference::consumable(10), ItemData::key_item("Old Key"));
    items.insert(ItemReference::consumable(11), ItemData::new("Faded Letter", 0));
    items.insert(ItemReference::weapon(1), ItemData::new("Club", 120));
    items.insert(ItemReference::weapon(2), ItemData::new("Short Sword", 450));
    items.insert(ItemReference::armor(1), ItemData::new("Leather Shield", 80));
    items
}

fn parse_direction(direction: &str) -> anyhow::Result<TransferDirection> {
    match direction {
        "deposit" => Ok(TransferDirection::Depositing),
        "withdraw" => Ok(TransferDirection::Withdrawing),
        _ => anyhow::bail!("Unknown gold direction {}", direction),
    }
}

fn parse_item(item_kind: &str, item_number: &str) -> anyhow::Result<ItemReference> {
    Ok(ItemReference::new(
        item_kind.parse::<ItemKind>()?,
        item_number.parse::<usize>()?,
    ))
}

/// `5` sets the number, `+10` or `-1` moves it within the allowed range.
fn parse_quantity_steps(steps: &[&str]) -> anyhow::Result<Vec<QuantityStep>> {
    steps
        .iter()
        .map(|step| -> anyhow::Result<QuantityStep> {
            Ok(if step.starts_with('+') || step.starts_with('-') {
                QuantityStep::Adjust(step.parse()?)
            } else {
                QuantityStep::Set(step.parse()?)
            })
        })
        .collect()
}

fn parse_console_command(party: Entity, line: &str) -> anyhow::Result<ConsoleCommand> {
    let args = shellwords::split(line).map_err(|_| anyhow::anyhow!("Mismatched quotes"))?;
    let args: Vec<&str> = args.iter().map(|arg| arg.as_str()).collect();

    Ok(match args.as_slice() {
        ["var", variable_id, value] => {
            ConsoleCommand::SetVariable(variable_id.parse()?, value.parse()?)
        }
        ["open"] => ConsoleCommand::Storage(StorageEvent::Open { entity: party }),
        ["deposit", item_kind, item_number, steps @ ..] if !steps.is_empty() => {
            ConsoleCommand::MoveItem {
                direction: TransferDirection::Depositing,
                item: parse_item(item_kind, item_number)?,
                steps: parse_quantity_steps(steps)?,
            }
        }
        ["withdraw", item_kind, item_number, steps @ ..] if !steps.is_empty() => {
            ConsoleCommand::MoveItem {
                direction: TransferDirection::Withdrawing,
                item: parse_item(item_kind, item_number)?,
                steps: parse_quantity_steps(steps)?,
            }
        }
        ["hold", direction] => ConsoleCommand::HoldGold(parse_direction(direction)?, 1),
        ["hold", direction, ticks] => {
            ConsoleCommand::HoldGold(parse_direction(direction)?, ticks.parse()?)
        }
        ["deposit_all"] => ConsoleCommand::Storage(StorageEvent::TransferAllGold {
            entity: party,
            direction: TransferDirection::Depositing,
        }),
        ["withdraw_all"] => ConsoleCommand::Storage(StorageEvent::TransferAllGold {
            entity: party,
            direction: TransferDirection::Withdrawing,
        }),
        ["tick"] => ConsoleCommand::Tick,
        ["save"] => ConsoleCommand::Save,
        ["quit"] => ConsoleCommand::Quit,
        _ => ConsoleCommand::Script(line.to_string()),
    })
}

fn main() -> anyhow::Result<()> {
    let command = Command::new("item-bank")
        .about("Item and gold storage console")
        .arg(
            Arg::new("box-variable")
                .long("box-variable")
                .help("Game variable holding the current box id, 0 always uses box 0")
                .takes_value(true)
                .value_parser(clap::value_parser!(usize))
                .default_value("0"),
        )
        .arg(
            Arg::new("gold-cap")
                .long("gold-cap")
                .help("Party gold cap override, 0 keeps the party's own cap")
                .takes_value(true)
                .value_parser(clap::value_parser!(i64))
                .default_value("0"),
        )
        .arg(
            Arg::new("item-cap")
                .long("item-cap")
                .help("Party per item carry cap override, 0 keeps the party's own cap")
                .takes_value(true)
                .value_parser(clap::value_parser!(u32))
                .default_value("0"),
        )
        .arg(
            Arg::new("no-key-items")
                .long("no-key-items")
                .help("Refuse to store key items"),
        )
        .arg(
            Arg::new("no-priceless-items")
                .long("no-priceless-items")
                .help("Refuse to store items without a price"),
        )
        .arg(
            Arg::new("starting-gold")
                .long("starting-gold")
                .help("Gold carried by the party at start")
                .takes_value(true)
                .value_parser(clap::value_parser!(i64))
                .default_value("500"),
        )
        .arg(
            Arg::new("log-level")
                .long("log-level")
                .takes_value(true)
                .value_parser(["off", "error", "warn", "info", "debug", "trace"])
                .default_value("info"),
        );
    let matches = command.get_matches();

    let log_level = match matches.get_one::<String>("log-level").map(|s| s.as_str()) {
        Some("off") => LevelFilter::Off,
        Some("error") => LevelFilter::Error,
        Some("warn") => LevelFilter::Warn,
        Some("debug") => LevelFilter::Debug,
        Some("trace") => LevelFilter::Trace,
        _ => LevelFilter::Info,
    };
    TermLogger::init(
        log_level,
        simplelog::Config::default(),
        TerminalMode::Stderr,
        ColorChoice::Auto,
    )
    .context("Failed to initialise logger")?;

    let config = StorageConfig {
        box_variable_id: matches.get_one::<usize>("box-variable").copied().unwrap_or(0),
        party_gold_cap_override: matches.get_one::<i64>("gold-cap").copied().unwrap_or(0),
        party_item_cap_override: matches.get_one::<u32>("item-cap").copied().unwrap_or(0),
        allow_key_items: !matches.is_present("no-key-items"),
        allow_priceless_items: !matches.is_present("no-priceless-items"),
        ..Default::default()
    };
    let starting_gold = matches
        .get_one::<i64>("starting-gold")
        .copied()
        .unwrap_or(0);

    let items = demo_items();
    for (item, item_data) in items.iter() {
        info!(
            "{} {} {} (price {})",
            item.item_kind.as_script_name(),
            item.item_number,
            item_data.name,
            item_data.price
        );
    }

    let mut game = StorageGame::new(config, GameData::new(items));
    let (party, storage_messages) = game.spawn_party(
        Inventory::new()
            .with_money(Money(starting_gold))
            .with_item(ItemReference::consumable(1), 12)
            .with_item(ItemReference::consumable(10), 1)
            .with_item(ItemReference::weapon(1), 2),
    );
    info!("Storage console ready, party {:?}", party);

    for line in std::io::stdin().lock().lines() {
        let line = line.context("Failed to read console input")?;
        let line = line.trim();
        if line.is_empty() {
            continue;
        }

        match parse_console_command(party, line) {
            Ok(ConsoleCommand::SetVariable(variable_id, value)) => {
                game.set_variable(variable_id, value);
            }
            Ok(ConsoleCommand::Storage(event)) => {
                game.send_storage_event(event);
                game.update();
            }
            Ok(ConsoleCommand::MoveItem {
                direction,
                item,
                steps,
            }) => {
                // Refused moves are still sent, the storage system buzzes
                let quantity = game
                    .quantity_input(party, item, direction)
                    .map_or(1, |mut quantity_input| {
                        for step in &steps {
                            match *step {
                                QuantityStep::Set(number) => {
                                    quantity_input = quantity_input.with_number(number);
                                }
                                QuantityStep::Adjust(delta) => {
                                    quantity_input.adjust(delta);
                                }
                            }
                        }
                        quantity_input.number()
                    });

                game.send_storage_event(match direction {
                    TransferDirection::Withdrawing => StorageEvent::WithdrawItem {
                        entity: party,
                        item,
                        quantity,
                    },
                    _ => StorageEvent::DepositItem {
                        entity: party,
                        item,
                        quantity,
                    },
                });
                game.update();
            }
            Ok(ConsoleCommand::HoldGold(direction, ticks)) => {
                for _ in 0..ticks {
                    game.send_storage_event(StorageEvent::HoldGold {
                        entity: party,
                        direction,
                    });
                    game.update();
                }
            }
            Ok(ConsoleCommand::Tick) => game.update(),
            Ok(ConsoleCommand::Save) => {
                if let Some(storage) = game.save(party) {
                    println!("{}", storage.to_json()?);
                }
            }
            Ok(ConsoleCommand::Quit) => break,
            Ok(ConsoleCommand::Script(command)) => {
                game.send_script(party, &command);
                game.update();
            }
            Err(error) => {
                warn!("Invalid console command \"{}\": {}", line, error);
            }
        }

        for message in storage_messages.try_iter() {
            println!("{:?}", message);
        }
    }

    Ok(())
}
