//! Resource alias command handlers.

use tabled::Tabled;

use edgeguard_api::Client;
use edgeguard_api::types::{Alias, AliasCreateRequest, AliasUpdateRequest};

use crate::cli::{AliasesArgs, AliasesCommand, GlobalOpts};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct AliasRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Alias")]
    data: String,
    #[tabled(rename = "SSL")]
    ssl_type: String,
    #[tabled(rename = "SSL Expires")]
    ssl_expire: String,
}

impl From<&Alias> for AliasRow {
    fn from(a: &Alias) -> Self {
        Self {
            id: a.id,
            data: a.alias_data.clone(),
            ssl_type: output::or_dash(a.alias_ssl_type.as_deref()),
            ssl_expire: output::or_dash(a.alias_ssl_expire),
        }
    }
}

fn detail(a: &Alias) -> String {
    [
        format!("ID:          {}", a.id),
        format!("Alias:       {}", a.alias_data),
        format!("SSL type:    {}", output::or_dash(a.alias_ssl_type.as_deref())),
        format!("SSL status:  {}", output::or_dash(a.alias_ssl_status)),
        format!("SSL expires: {}", output::or_dash(a.alias_ssl_expire)),
        format!("Created:     {}", output::or_dash(a.alias_created.as_deref())),
        format!("Updated:     {}", output::or_dash(a.alias_updated.as_deref())),
    ]
    .join("\n")
}

pub async fn handle(client: &Client, args: AliasesArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();

    match args.command {
        AliasesCommand::List { resource, list } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let aliases = client
                .aliases()
                .list(rid, &util::list_options(&list))
                .await?
                .into_inner();
            let out = output::render_list(
                &format,
                &aliases,
                |a| AliasRow::from(a),
                |a| a.alias_data.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AliasesCommand::Get { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let alias = client.aliases().get(rid, id).await?.into_inner();
            let out = output::render_single(&format, &alias, detail, |a| a.alias_data.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        AliasesCommand::Create {
            resource,
            data,
            ssl_type,
            ssl_cert,
            ssl_key,
        } => {
            let req = AliasCreateRequest {
                alias_ssl_type: ssl_type.map(|t| t.as_str().to_owned()),
                alias_ssl_crt: util::read_pem("ssl-cert", ssl_cert.as_deref())?,
                alias_ssl_key: util::read_pem("ssl-key", ssl_key.as_deref())?,
                ..AliasCreateRequest::new(data)
            };
            let rid = util::resolve_resource_id(client, &resource).await?;
            let alias = client.aliases().create(rid, &req).await?.into_inner();
            output::notice(
                &format!("Alias {} added with ID {}", alias.alias_data, alias.id),
                global.quiet,
            );
            Ok(())
        }

        AliasesCommand::Update {
            resource,
            id,
            ssl_type,
            ssl_cert,
            ssl_key,
        } => {
            let req = AliasUpdateRequest {
                alias_ssl_type: ssl_type.map(|t| t.as_str().to_owned()),
                alias_ssl_crt: util::read_pem("ssl-cert", ssl_cert.as_deref())?,
                alias_ssl_key: util::read_pem("ssl-key", ssl_key.as_deref())?,
            };
            let rid = util::resolve_resource_id(client, &resource).await?;
            client.aliases().update(rid, id, &req).await?;
            output::notice(&format!("Alias {id} updated"), global.quiet);
            Ok(())
        }

        AliasesCommand::Delete { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            if !util::confirm(&format!("Delete alias {id} of {resource}?"), global.yes)? {
                return Ok(());
            }
            client.aliases().delete(rid, id).await?;
            output::notice(&format!("Alias {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
