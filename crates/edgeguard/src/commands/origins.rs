//! Resource origin command handlers.

use tabled::Tabled;

use edgeguard_api::Client;
use edgeguard_api::types::{Origin, OriginRequest};

use crate::cli::{GlobalOpts, OriginFieldArgs, OriginsArgs, OriginsCommand};
use crate::error::CliError;
use crate::output;

use super::util;

#[derive(Tabled)]
struct OriginRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Address")]
    data: String,
    #[tabled(rename = "Mode")]
    mode: String,
    #[tabled(rename = "Weight")]
    weight: i32,
    #[tabled(rename = "Max Fails")]
    max_fails: i32,
    #[tabled(rename = "Fail Timeout")]
    fail_timeout: i32,
    #[tabled(rename = "Comment")]
    comment: String,
}

impl From<&Origin> for OriginRow {
    fn from(o: &Origin) -> Self {
        Self {
            id: o.id,
            data: o.origin_data.clone(),
            mode: o.origin_mode.clone(),
            weight: o.origin_weight,
            max_fails: o.origin_max_fails,
            fail_timeout: o.origin_fail_timeout,
            comment: output::or_dash(o.origin_comment.as_deref()),
        }
    }
}

fn detail(o: &Origin) -> String {
    [
        format!("ID:           {}", o.id),
        format!("Address:      {}", o.origin_data),
        format!("Mode:         {}", o.origin_mode),
        format!("Weight:       {}", o.origin_weight),
        format!("Max fails:    {}", o.origin_max_fails),
        format!("Fail timeout: {}s", o.origin_fail_timeout),
        format!("Comment:      {}", output::or_dash(o.origin_comment.as_deref())),
    ]
    .join("\n")
}

fn request(fields: OriginFieldArgs) -> OriginRequest {
    OriginRequest {
        origin_mode: fields.mode.map(|m| m.as_str().to_owned()),
        origin_weight: fields.weight,
        origin_max_fails: fields.max_fails,
        origin_fail_timeout: fields.fail_timeout,
        origin_comment: fields.comment,
        ..OriginRequest::new(fields.data)
    }
}

pub async fn handle(client: &Client, args: OriginsArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();

    match args.command {
        OriginsCommand::List { resource, list } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let origins = client
                .origins()
                .list(rid, &util::list_options(&list))
                .await?
                .into_inner();
            let out = output::render_list(
                &format,
                &origins,
                |o| OriginRow::from(o),
                |o| o.origin_data.clone(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OriginsCommand::Get { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            let origin = client.origins().get(rid, id).await?.into_inner();
            let out = output::render_single(&format, &origin, detail, |o| o.origin_data.clone())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        OriginsCommand::Create { resource, fields } => {
            let req = request(fields);
            let rid = util::resolve_resource_id(client, &resource).await?;
            let origin = client.origins().create(rid, &req).await?.into_inner();
            output::notice(
                &format!("Origin {} added with ID {}", origin.origin_data, origin.id),
                global.quiet,
            );
            Ok(())
        }

        OriginsCommand::Update {
            resource,
            id,
            fields,
        } => {
            let req = request(fields);
            let rid = util::resolve_resource_id(client, &resource).await?;
            client.origins().update(rid, id, &req).await?;
            output::notice(&format!("Origin {id} updated"), global.quiet);
            Ok(())
        }

        OriginsCommand::Delete { resource, id } => {
            let rid = util::resolve_resource_id(client, &resource).await?;
            if !util::confirm(&format!("Delete origin {id} of {resource}?"), global.yes)? {
                return Ok(());
            }
            client.origins().delete(rid, id).await?;
            output::notice(&format!("Origin {id} deleted"), global.quiet);
            Ok(())
        }
    }
}
