//! Blacklist and whitelist command handlers.

use serde::Serialize;
use tabled::Tabled;

use edgeguard_api::Client;
use edgeguard_api::types::{Blacklist, BlacklistRequest, Whitelist, WhitelistRequest};

use crate::cli::{AccessListArgs, AccessListCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

/// Which of the two access lists a command operates on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ListKind {
    Blacklist,
    Whitelist,
}

impl ListKind {
    fn label(self) -> &'static str {
        match self {
            Self::Blacklist => "Blacklist entry",
            Self::Whitelist => "Whitelist entry",
        }
    }
}

trait AccessEntry: Serialize {
    fn id(&self) -> i64;
    fn data(&self) -> &str;
}

impl AccessEntry for Blacklist {
    fn id(&self) -> i64 {
        self.id
    }
    fn data(&self) -> &str {
        &self.blacklist_data
    }
}

impl AccessEntry for Whitelist {
    fn id(&self) -> i64 {
        self.id
    }
    fn data(&self) -> &str {
        &self.whitelist_data
    }
}

#[derive(Tabled)]
struct EntryRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Address")]
    data: String,
}

fn print_list<E: AccessEntry>(entries: &[E], global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_list(
        &global.format(),
        entries,
        |e| EntryRow {
            id: e.id(),
            data: e.data().to_owned(),
        },
        |e| e.data().to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

fn print_single<E: AccessEntry>(entry: &E, global: &GlobalOpts) -> Result<(), CliError> {
    let out = output::render_single(
        &global.format(),
        entry,
        |e| format!("ID:      {}\nAddress: {}", e.id(), e.data()),
        |e| e.data().to_owned(),
    )?;
    output::print_output(&out, global.quiet);
    Ok(())
}

pub async fn handle(
    client: &Client,
    kind: ListKind,
    args: AccessListArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let label = kind.label();

    match args.command {
        AccessListCommand::List { resource, list } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let opts = util::list_options(&list);
            match kind {
                ListKind::Blacklist => {
                    print_list(&client.blacklists().list(rid, &opts).await?.value, global)
                }
                ListKind::Whitelist => {
                    print_list(&client.whitelists().list(rid, &opts).await?.value, global)
                }
            }
        }

        AccessListCommand::Get { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            match kind {
                ListKind::Blacklist => {
                    print_single(&client.blacklists().get(rid, id).await?.value, global)
                }
                ListKind::Whitelist => {
                    print_single(&client.whitelists().get(rid, id).await?.value, global)
                }
            }
        }

        AccessListCommand::Create { resource, data } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let created_id = match kind {
                ListKind::Blacklist => {
                    let req = BlacklistRequest::new(data.as_str());
                    client.blacklists().create(rid, &req).await?.value.id
                }
                ListKind::Whitelist => {
                    let req = WhitelistRequest::new(data.as_str());
                    client.whitelists().create(rid, &req).await?.value.id
                }
            };
            output::notice(&format!("{label} {data} added with ID {created_id}"), global.quiet);
            Ok(())
        }

        AccessListCommand::Update { resource, id, data } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            match kind {
                ListKind::Blacklist => {
                    client
                        .blacklists()
                        .update(rid, id, &BlacklistRequest::new(data))
                        .await?;
                }
                ListKind::Whitelist => {
                    client
                        .whitelists()
                        .update(rid, id, &WhitelistRequest::new(data))
                        .await?;
                }
            }
            output::notice(&format!("{label} {id} updated"), global.quiet);
            Ok(())
        }

        AccessListCommand::Delete { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let prompt = format!("Delete {} {id} of {resource}?", label.to_lowercase());
            if !util::confirm(&prompt, global.yes)? {
                return Ok(());
            }
            match kind {
                ListKind::Blacklist => client.blacklists().delete(rid, id).await?,
                ListKind::Whitelist => client.whitelists().delete(rid, id).await?,
            };
            output::notice(&format!("{label} {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
