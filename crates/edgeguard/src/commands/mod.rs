//! Command dispatch: routes each subcommand to its handler.

pub mod access_lists;
pub mod aliases;
pub mod config_cmd;
pub mod headers;
pub mod origins;
pub mod resources;
pub mod status;
pub mod util;

use edgeguard_api::Client;

use crate::cli::{Command, GlobalOpts};
use crate::error::CliError;

use self::access_lists::ListKind;

/// Dispatch an API command. `Config` and `Completions` are handled in
/// `main` before a client exists.
pub async fn dispatch(cmd: Command, client: &Client, global: &GlobalOpts) -> Result<(), CliError> {
    match cmd {
        Command::Resources(args) => resources::handle(client, args, global).await,
        Command::Aliases(args) => aliases::handle(client, args, global).await,
        Command::Origins(args) => origins::handle(client, args, global).await,
        Command::Headers(args) => headers::handle(client, args, global).await,
        Command::Blacklists(args) => {
            access_lists::handle(client, ListKind::Blacklist, args, global).await
        }
        Command::Whitelists(args) => {
            access_lists::handle(client, ListKind::Whitelist, args, global).await
        }
        Command::Status(args) => status::handle(client, args, global).await,
        Command::Config(_) | Command::Completions(_) => Ok(()),
    }
}
