use auth_core::{
    bindings::selector_table, encode_action, run_scenario_file,
    types::config_wrapper::ConfigWrapper,
    utils::{
        function_selector::SignatureOrSelector,
        remote::{inspect_auth, inspect_permission},
    },
};
use clap::{Parser, Subcommand};
use eyre::{Result, eyre};
use log::info;

#[derive(Parser)]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Print every recognized selector of Auth and RolesAuthority
    Selectors,
    /// Encode calldata for a single admin action
    Encode {
        /// Contract the action is sent to
        #[arg(long = "contract", short = 'c')]
        contract: String,

        /// Action as JSON, e.g. '{"SetUserRole": {"user": "0x..", "role": 1, "enabled": true}}'
        #[arg(long = "action", short = 'a')]
        action: String,
    },
    /// Run a scenario file against an in-memory chain
    Run {
        /// Path to the scenario JSON file
        #[arg(long = "scenario", short = 's')]
        scenario_path: String,
    },
    /// Read Auth / RolesAuthority state from a deployed contract
    Inspect {
        /// Network ID, used to pick the RPC endpoint from config.toml
        #[arg(long = "network", short = 'n')]
        network_id: u32,

        /// Path to the config file
        #[arg(long = "config")]
        config_path: Option<String>,

        /// Auth contract address, or a deployment name from config.toml
        #[arg(long = "target", short = 't')]
        target: String,

        /// RolesAuthority to ask canCall, defaults to the target's authority
        #[arg(long = "authority")]
        authority: Option<String>,

        /// User to check permissions for
        #[arg(long = "user", short = 'u', requires = "function")]
        user: Option<String>,

        /// Function signature or 0x selector to check
        #[arg(long = "function", short = 'f', requires = "user")]
        function: Option<String>,

        /// Role to check against the capability
        #[arg(long = "role", short = 'r')]
        role: Option<u8>,
    },
}

#[tokio::main]
async fn main() -> Result<()> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let cli = Cli::parse();

    match &cli.command {
        Commands::Selectors => {
            println!("{}", serde_json::to_string_pretty(&selector_table())?);
        }
        Commands::Encode { contract, action } => {
            let contract = contract.parse()?;
            let encoded = encode_action(contract, action)?;
            println!("{}", serde_json::to_string_pretty(&encoded)?);
        }
        Commands::Run { scenario_path } => {
            let report = run_scenario_file(scenario_path)?;
            println!("{}", serde_json::to_string_pretty(&report)?);
            if !report.passed {
                let failed: Vec<usize> = report.failures().map(|step| step.index).collect();
                return Err(eyre!("Scenario failed at step(s) {:?}", failed));
            }
        }
        Commands::Inspect {
            network_id,
            config_path,
            target,
            authority,
            user,
            function,
            role,
        } => {
            let cw = ConfigWrapper::from_file(config_path.as_deref())?;
            let rpc_url = cw.get_rpc_url(*network_id)?;
            let resolve = |value: &str| match value.parse() {
                Ok(address) => Ok(address),
                Err(_) => cw.get_deployment(*network_id, value),
            };

            let target = resolve(target.as_str())?;
            let snapshot = inspect_auth(&rpc_url, target).await?;
            println!("{}", serde_json::to_string_pretty(&snapshot)?);

            if let (Some(user), Some(function)) = (user, function) {
                let authority = match authority {
                    Some(authority) => resolve(authority.as_str())?,
                    None => snapshot.authority,
                };
                if authority.is_zero() {
                    return Err(eyre!("{} has no authority to ask", target));
                }
                let function: SignatureOrSelector = function.parse().map_err(|e| eyre!("{}", e))?;
                info!("Checking {} against authority {}", function, authority);

                let permission = inspect_permission(
                    &rpc_url,
                    authority,
                    resolve(user.as_str())?,
                    target,
                    function.selector(),
                    *role,
                )
                .await?;
                println!("{}", serde_json::to_string_pretty(&permission)?);
            }
        }
    }

    Ok(())
}
