use bevy_ecs::prelude::{EventReader, Query, Res};
use clap::Arg;
use lazy_static::lazy_static;
use log::warn;
use std::num::ParseIntError;
use thiserror::Error;

use item_bank_common::{
    components::StorageLedger,
    script_facade::{BoxSelector, ItemCatalog, ScriptError, ScriptFacade, StorageUi},
};

use crate::game::{
    components::{Inventory, StorageClient, StorageMenu},
    events::ScriptEvent,
    messages::StorageMessage,
    resources::{GameData, GameVariables, StorageConfig},
};

lazy_static! {
    pub static ref SCRIPT_COMMANDS: clap::Command<'static> = {
        clap::Command::new("Script Commands")
            .subcommand(clap::Command::new("open_storage"))
            .subcommand(
                clap::Command::new("store_add")
                    .arg(Arg::new("type").required(true))
                    .arg(Arg::new("id").required(true))
                    .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
            )
            .subcommand(
                clap::Command::new("store_rem")
                    .arg(Arg::new("type").required(true))
                    .arg(Arg::new("id").required(true))
                    .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
            )
            .subcommand(
                clap::Command::new("store_count")
                    .arg(Arg::new("type").required(true))
                    .arg(Arg::new("id").required(true)),
            )
            .subcommand(
                clap::Command::new("bank_add")
                    .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
            )
            .subcommand(
                clap::Command::new("bank_rem")
                    .arg(Arg::new("amount").required(true).allow_hyphen_values(true)),
            )
            .subcommand(clap::Command::new("bank_count"))
    };
}

#[derive(Error, Debug)]
pub enum ScriptCommandError {
    #[error("Invalid command")]
    InvalidCommand,
    #[error("Invalid arguments")]
    InvalidArguments,
    #[error(transparent)]
    Script(#[from] ScriptError),
}

impl From<shellwords::MismatchedQuotes> for ScriptCommandError {
    fn from(_: shellwords::MismatchedQuotes) -> Self {
        Self::InvalidCommand
    }
}

impl From<clap::Error> for ScriptCommandError {
    fn from(error: clap::Error) -> Self {
        match error.kind() {
            clap::ErrorKind::MissingRequiredArgument => Self::InvalidArguments,
            _ => Self::InvalidCommand,
        }
    }
}

impl From<ParseIntError> for ScriptCommandError {
    fn from(_: ParseIntError) -> Self {
        Self::InvalidArguments
    }
}

fn get_arg<'a>(
    arg_matches: &'a clap::ArgMatches,
    name: &str,
) -> Result<&'a str, ScriptCommandError> {
    arg_matches
        .get_one::<String>(name)
        .map(|value| value.as_str())
        .ok_or(ScriptCommandError::InvalidArguments)
}

/// Runs one script line, returning the value of calls that produce one.
pub fn handle_script_command<C, S>(
    facade: &mut ScriptFacade<C, S>,
    storage_ui: &mut impl StorageUi,
    command_text: &str,
) -> Result<Option<i64>, ScriptCommandError>
where
    C: ItemCatalog + ?Sized,
    S: BoxSelector + ?Sized,
{
    let mut args = shellwords::split(command_text)?;
    args.insert(0, String::new()); // Clap expects arg[0] to be like executable name
    let command_matches = SCRIPT_COMMANDS.clone().try_get_matches_from(args)?;

    match command_matches
        .subcommand()
        .ok_or(ScriptCommandError::InvalidCommand)?
    {
        ("open_storage", _) => {
            facade.open_storage(storage_ui);
            Ok(None)
        }
        ("store_add", arg_matches) => {
            facade.store_add(
                get_arg(arg_matches, "type")?,
                get_arg(arg_matches, "id")?.parse::<usize>()?,
                get_arg(arg_matches, "amount")?.parse::<u32>()?,
            )?;
            Ok(None)
        }
        ("store_rem", arg_matches) => {
            facade.store_rem(
                get_arg(arg_matches, "type")?,
                get_arg(arg_matches, "id")?.parse::<usize>()?,
                get_arg(arg_matches, "amount")?.parse::<u32>()?,
            )?;
            Ok(None)
        }
        ("store_count", arg_matches) => {
            let count = facade.store_count(
                get_arg(arg_matches, "type")?,
                get_arg(arg_matches, "id")?.parse::<usize>()?,
            )?;
            Ok(Some(count as i64))
        }
        ("bank_add", arg_matches) => {
            facade.bank_add(get_arg(arg_matches, "amount")?.parse::<i64>()?)?;
            Ok(None)
        }
        ("bank_rem", arg_matches) => {
            facade.bank_rem(get_arg(arg_matches, "amount")?.parse::<i64>()?)?;
            Ok(None)
        }
        ("bank_count", _) => Ok(Some(facade.bank_count().0)),
        _ => Err(ScriptCommandError::InvalidCommand),
    }
}

pub fn script_system(
    mut script_events: EventReader<ScriptEvent>,
    mut query: Query<(&StorageClient, &Inventory, &mut StorageLedger)>,
    config: Res<StorageConfig>,
    game_data: Res<GameData>,
    game_variables: Res<GameVariables>,
) {
    let box_selector = game_variables.box_selector(config.box_variable_id);

    for event in script_events.iter() {
        let Ok((storage_client, inventory, mut ledger)) = query.get_mut(event.entity) else {
            warn!(target: "script", "Script call \"{}\" for entity without storage", event.command);
            continue;
        };

        let mut storage_menu = StorageMenu {
            client: storage_client,
            config: &config,
            carried_gold: inventory.money,
        };
        let mut facade = ScriptFacade::new(&mut ledger, &game_data.items, &box_selector);

        match handle_script_command(&mut facade, &mut storage_menu, &event.command) {
            Ok(Some(value)) => storage_client.send(StorageMessage::ScriptResult {
                command: event.command.clone(),
                value,
            }),
            Ok(None) => {}
            Err(error) => {
                warn!(target: "script", "Script call \"{}\" failed: {}", event.command, error);
            }
        }
    }
}
