//! Protected resource command handlers.

use tabled::Tabled;

use edgeguard_api::Client;
use edgeguard_api::types::{
    DnsCheck, Resource, ResourceCreateRequest, ResourceListOptions, ResourceUpdateRequest,
};

use crate::cli::{
    GlobalOpts, ResourceFieldArgs, ResourceFilterArgs, ResourcesArgs, ResourcesCommand,
};
use crate::error::CliError;
use crate::output;

use super::util;

// ── Table row ───────────────────────────────────────────────────────

#[derive(Tabled)]
struct ResourceRow {
    #[tabled(rename = "ID")]
    id: i64,
    #[tabled(rename = "Name")]
    name: String,
    #[tabled(rename = "Status")]
    status: String,
    #[tabled(rename = "Active")]
    active: bool,
    #[tabled(rename = "Service IP")]
    service_ip: String,
    #[tabled(rename = "SSL")]
    ssl_type: String,
    #[tabled(rename = "TLS")]
    tls: String,
}

impl From<&Resource> for ResourceRow {
    fn from(r: &Resource) -> Self {
        Self {
            id: r.id,
            name: r.name.clone(),
            status: output::or_dash(r.status.as_deref()),
            active: r.active,
            service_ip: output::or_dash(r.service_ip.as_deref()),
            ssl_type: output::or_dash(r.ssl_type.as_deref()),
            tls: r.tls_enabled.join(","),
        }
    }
}

fn detail(r: &Resource) -> String {
    let geoip = match r.service_geoip_mode {
        0 => "off".to_owned(),
        1 => format!("allow {}", output::or_dash(r.service_geoip_list.as_deref())),
        _ => format!("deny {}", output::or_dash(r.service_geoip_list.as_deref())),
    };
    [
        format!("ID:               {}", r.id),
        format!("Name:             {}", r.name),
        format!("Client:           {}", r.client),
        format!("Status:           {}", output::or_dash(r.status.as_deref())),
        format!("Active:           {}", r.active),
        format!("Service IP:       {}", output::or_dash(r.service_ip.as_deref())),
        format!("SSL type:         {}", output::or_dash(r.ssl_type.as_deref())),
        format!("SSL status:       {}", output::or_dash(r.service_ssl_status.as_deref())),
        format!("SSL expires:      {}", output::or_dash(r.service_ssl_expire)),
        format!("TLS versions:     {}", r.tls_enabled.join(", ")),
        format!("WAF:              {}", r.is_waf_enabled),
        format!("Redirect HTTPS:   {}", r.is_redirect_to_https_enabled),
        format!("HTTPS to HTTP:    {}", output::flag(r.service_https2http)),
        format!("IP hash:          {}", output::flag(r.service_iphash)),
        format!("WWW redirect:     {}", output::flag(r.service_wwwredir)),
        format!("GeoIP:            {geoip}"),
        format!("Multiple origins: {}", r.feature_multiple_origins),
        format!("Wildcard aliases: {}", r.feature_wildcard_aliases),
        format!("Created:          {}", output::or_dash(r.created.as_deref())),
        format!("Updated:          {}", output::or_dash(r.updated.as_deref())),
    ]
    .join("\n")
}

fn dns_detail(check: &DnsCheck) -> String {
    let mut lines = vec![format!("In network: {}", check.is_in_network)];
    if !check.a.is_empty() {
        lines.push("A records:".into());
        lines.extend(check.a.iter().map(|a| format!("  - {a}")));
    }
    lines.join("\n")
}

// ── Request builders ────────────────────────────────────────────────

fn list_options(list: &crate::cli::ListArgs, filter: ResourceFilterArgs) -> ResourceListOptions {
    ResourceListOptions {
        page: util::list_options(list),
        ordering: filter.ordering,
        client: filter.client,
        name: filter.name,
        active: filter.active,
        service_ip: filter.service_ip,
        origin_ip: filter.origin_ip,
        status: filter.status,
        ..ResourceListOptions::default()
    }
}

fn create_request(fields: ResourceFieldArgs) -> Result<ResourceCreateRequest, CliError> {
    let ssl_cert = util::read_pem("ssl-cert", fields.ssl_cert.as_deref())?;
    let ssl_key = util::read_pem("ssl-key", fields.ssl_key.as_deref())?;
    let name = fields.name.ok_or_else(|| CliError::Validation {
        field: "name".into(),
        reason: "required unless --from-file is given".into(),
    })?;

    Ok(ResourceCreateRequest {
        active: fields.active,
        feature_multiple_origins: fields.multiple_origins,
        feature_wildcard_aliases: fields.wildcard_aliases,
        is_redirect_to_https_enabled: fields.redirect_https,
        service_https2http: fields.https2http,
        service_iphash: fields.iphash,
        service_geoip_mode: fields.geoip_mode,
        service_geoip_list: fields.geoip_list,
        service_wwwredir: fields.wwwredir,
        tls_enabled: fields.tls,
        ssl_type: fields.ssl_type.map(|t| t.as_str().to_owned()),
        ssl_cert,
        ssl_key,
        is_waf_enabled: fields.waf,
        ..ResourceCreateRequest::new(name)
    })
}

fn update_request(fields: ResourceFieldArgs) -> Result<ResourceUpdateRequest, CliError> {
    let req = ResourceUpdateRequest {
        name: fields.name,
        active: fields.active,
        feature_multiple_origins: fields.multiple_origins,
        feature_wildcard_aliases: fields.wildcard_aliases,
        is_redirect_to_https_enabled: fields.redirect_https,
        service_https2http: fields.https2http,
        service_iphash: fields.iphash,
        service_geoip_mode: fields.geoip_mode,
        service_geoip_list: fields.geoip_list,
        service_wwwredir: fields.wwwredir,
        tls_enabled: fields.tls,
        ssl_type: fields.ssl_type.map(|t| t.as_str().to_owned()),
        ssl_cert: util::read_pem("ssl-cert", fields.ssl_cert.as_deref())?,
        ssl_key: util::read_pem("ssl-key", fields.ssl_key.as_deref())?,
        is_waf_enabled: fields.waf,
    };
    if req == ResourceUpdateRequest::default() {
        return Err(CliError::Validation {
            field: "update".into(),
            reason: "no fields to change were given".into(),
        });
    }
    Ok(req)
}

// ── Handler ─────────────────────────────────────────────────────────

pub async fn handle(
    client: &Client,
    args: ResourcesArgs,
    global: &GlobalOpts,
) -> Result<(), CliError> {
    let format = global.format();

    match args.command {
        ResourcesCommand::List { list, filter } => {
            let opts = list_options(&list, filter);
            let resources = client.resources().list(&opts).await?.into_inner();
            let out = output::render_list(
                &format,
                &resources,
                |r| ResourceRow::from(r),
                |r| r.id.to_string(),
            )?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResourcesCommand::Get { resource } => {
            let id = util::resolve_resource_id(client, &resource).await?;
            let found = client.resources().get(id).await?.into_inner();
            let out = output::render_single(&format, &found, detail, |r| r.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResourcesCommand::Create { fields, from_file } => {
            let req = match from_file {
                Some(ref path) => serde_json::from_value(util::read_json_file(path)?)?,
                None => create_request(fields)?,
            };
            let created = client.resources().create(&req).await?.into_inner();
            output::notice(
                &format!("Resource {} created with ID {}", created.name, created.id),
                global.quiet,
            );
            let out = output::render_single(&format, &created, detail, |r| r.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResourcesCommand::Update {
            resource,
            fields,
            from_file,
        } => {
            let req = match from_file {
                Some(ref path) => serde_json::from_value(util::read_json_file(path)?)?,
                None => update_request(fields)?,
            };
            let id = util::resolve_resource_id(client, &resource).await?;
            let updated = client.resources().update(id, &req).await?.into_inner();
            output::notice(&format!("Resource {id} updated"), global.quiet);
            let out = output::render_single(&format, &updated, detail, |r| r.id.to_string())?;
            output::print_output(&out, global.quiet);
            Ok(())
        }

        ResourcesCommand::Delete { resource } => {
            let id = util::resolve_resource_id(client, &resource).await?;
            if !util::confirm(&format!("Delete resource {resource}?"), global.yes)? {
                return Ok(());
            }
            client.resources().delete(id).await?;
            output::notice(&format!("Resource {id} deleted"), global.quiet);
            Ok(())
        }

        ResourcesCommand::DnsCheck { resource } => {
            let id = util::resolve_resource_id(client, &resource).await?;
            let check = client.resources().dns_check(id).await?.into_inner();
            let out = output::render_single(&format, &check, dns_detail, |c| c.a.join("\n"))?;
            output::print_output(&out, global.quiet);
            Ok(())
        }
    }
}
