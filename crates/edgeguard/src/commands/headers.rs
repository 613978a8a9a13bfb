//! Origin request header command handlers.

use tabled::Tabled;

use edgeguard_api::Client;
use edgeguard_api::types::{Header, HeaderRequest};

use crate::cli::{GlobalOpts, HeadersArgs, HeadersCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct HeaderRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Key")]
    key: String,
    #[tabled(rename = "Value")]
    value: String,
}

impl From<&Header> for HeaderRow {
    fn from(h: &Header) -> Self {
        Self {
            id: h.id,
            key: h.header_key.clone(),
            value: h.header_value.clone(),
        }
    }
}

fn detail(h: &Header) -> String {
    format!("ID:    {}\nKey:   {}\nValue: {}", h.id, h.header_key, h.header_value)
}

fn plain(h: &Header) -> String {
    format!("{}: {}", h.header_key, h.header_value)
}

pub async fn handle(client: &Client, args: HeadersArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();

    match args.command {
        HeadersCommand::List { resource, list } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let headers = client
                .headers()
                .list(rid, &util::list_options(&list))
                .await?
                .into_inner();
            let out = output::render_list(&format, &headers, |h| HeaderRow::from(h), plain)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HeadersCommand::Get { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let header = client.headers().get(rid, id).await?.into_inner();
            let out = output::render_single(&format, &header, detail, plain)?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        HeadersCommand::Create {
            resource,
            key,
            value,
        } => {
            let req = HeaderRequest::new(key, value);
            let rid = util::resolve_resource_id(client, &resource).await?;
            let header = client.headers().create(rid, &req).await?.into_inner();
            output::notice(
                &format!("Header {} added with ID {}", header.header_key, header.id),
                global.quiet,
            );
            Ok(())
        }

        HeadersCommand::Update {
            resource,
            id,
            key,
            value,
        } => {
            let req = HeaderRequest::new(key, value);
            let rid = util::resolve_resource_id(client, &resource).await?;
            client.headers().update(rid, id, &req).await?;
            output::notice(&format!("Header {id} updated"), global.quiet);
            Ok(())
        }

        HeadersCommand::Delete { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            if !util::confirm(&format!("Delete header {id} of {resource}?"), global.yes)? {
                return Ok(());
            }
            client.headers().delete(rid, id).await?;
            output::notice(&format!("Header {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
