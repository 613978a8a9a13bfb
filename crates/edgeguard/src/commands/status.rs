//! Protection subscription status handlers.

use edgeguard_api::Client;
use edgeguard_api::types::{InfrastructureProtectionDetails, WebProtectionDetails};

use crate::cli::{GlobalOpts, StatusArgs, StatusCommand};
use crate::error::CliError;
use crate::output;

fn web_detail(w: &WebProtectionDetails) -> String {
    [
        format!("DDoS type: {}", w.ddos_type),
        format!("WAF:       {}", w.is_waf_enabled),
        format!("Anti-bot:  {}", w.is_antibot_enabled),
    ]
    .join("\n")
}

fn infra_detail(i: &InfrastructureProtectionDetails) -> String {
    let ids: Vec<String> = i.accessible_client_ids.iter().map(ToString::to_string).collect();
    format!(
        "Billed:     {}\nClient IDs: {}",
        i.have_bill,
        if ids.is_empty() { "-".into() } else { ids.join(", ") }
    )
}

pub async fn handle(client: &Client, args: StatusArgs, global: &GlobalOpts) -> Result<(), CliError> {
    let format = global.format();

    let out = match args.command {
        StatusCommand::Web => {
            let details = client.services().web_protection().await?.into_inner();
            output::render_single(&format, &details, web_detail, |w| w.ddos_type.to_string())?
        }
        StatusCommand::Infrastructure => {
            let details = client.services().infrastructure_protection().await?.into_inner();
            output::render_single(&format, &details, infra_detail, |i| i.have_bill.to_string())?
        }
    };
    output::print_output(&out, global.quiet);
    Ok(())
}
