//! synthops - operator CLI for synth deployment maintenance.

mod confirm;

use std::env;
use std::path::PathBuf;

use alloy::signers::local::PrivateKeySigner;
use anyhow::Context;
use clap::{Arg, ArgAction, ArgMatches, Command};
use synthops_chain::{connect, CurrencyKey};
use synthops_core::{
    AutoApprove, Confirmation, GasPolicy, Outcome, RemovalConfig, RemovalCoordinator, RemovalError,
};
use synthops_manifest::{Deployment, PendingActionLog, PENDING_ACTIONS_FILE};
use tracing_subscriber::EnvFilter;

use crate::confirm::StdinConfirmation;

const RPC_URL_ENV: &str = "SYNTHOPS_RPC_URL";
const PRIVATE_KEY_ENV: &str = "SYNTHOPS_PRIVATE_KEY";

fn build_cli() -> Command {
    Command::new("synthops")
        .about("Operator tooling for synth deployment maintenance")
        .version(env!("CARGO_PKG_VERSION"))
        .subcommand_required(true)
        .arg_required_else_help(true)
        .subcommand(
            Command::new("remove-synths")
                .about("Remove synths from the on-chain registry and the local manifests")
                .arg(
                    Arg::new("network")
                        .long("network")
                        .value_name("NAME")
                        .default_value("testnet")
                        .help("Network whose deployment folder to operate on"),
                )
                .arg(
                    Arg::new("deployment-path")
                        .long("deployment-path")
                        .value_name("DIR")
                        .help("Deployment directory (overrides deployments/<network>)"),
                )
                .arg(
                    Arg::new("rpc-url")
                        .long("rpc-url")
                        .value_name("URL")
                        .help(format!("RPC endpoint (or {RPC_URL_ENV})")),
                )
                .arg(
                    Arg::new("gas-price")
                        .long("gas-price")
                        .value_name("GWEI")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("1")
                        .help("Gas price in gwei"),
                )
                .arg(
                    Arg::new("gas-limit")
                        .long("gas-limit")
                        .value_name("UNITS")
                        .value_parser(clap::value_parser!(u64))
                        .default_value("500000")
                        .help("Gas limit per transaction"),
                )
                .arg(
                    Arg::new("synth")
                        .long("synth")
                        .value_name("KEY")
                        .action(ArgAction::Append)
                        .required(true)
                        .help("Synth to remove (repeatable)"),
                )
                .arg(
                    Arg::new("yes")
                        .long("yes")
                        .short('y')
                        .action(ArgAction::SetTrue)
                        .help("Skip the confirmation prompt"),
                ),
        )
}

fn init_tracing() {
    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));
    tracing_subscriber::fmt().with_env_filter(filter).init();
}

#[tokio::main]
async fn main() {
    init_tracing();

    let matches = build_cli().get_matches();
    let status = match matches.subcommand() {
        Some(("remove-synths", sub)) => match run_remove_synths(sub).await {
            Ok(status) => status,
            Err(err) => {
                eprintln!("error: {err:#}");
                exit_code_for(&err)
            }
        },
        _ => unreachable!("subcommand is required"),
    };
    std::process::exit(status);
}

async fn run_remove_synths(matches: &ArgMatches) -> anyhow::Result<i32> {
    let network = matches.get_one::<String>("network").expect("defaulted");
    let deployment_dir = matches
        .get_one::<String>("deployment-path")
        .map_or_else(|| PathBuf::from("deployments").join(network), PathBuf::from);

    let rpc_url = match matches.get_one::<String>("rpc-url") {
        Some(url) => url.clone(),
        None => env::var(RPC_URL_ENV)
            .with_context(|| format!("pass --rpc-url or set {RPC_URL_ENV}"))?,
    };
    // The signing key only ever comes from the environment.
    let raw_key = env::var(PRIVATE_KEY_ENV)
        .with_context(|| format!("{PRIVATE_KEY_ENV} must be set"))?;
    let signer: PrivateKeySigner = raw_key.parse().context("invalid private key")?;
    let signer_address = signer.address();

    let keys = matches
        .get_many::<String>("synth")
        .expect("required")
        .map(|raw| CurrencyKey::new(raw.clone()))
        .collect::<Result<Vec<_>, _>>()?;

    let gas = GasPolicy {
        gas_price_gwei: *matches.get_one::<u64>("gas-price").expect("defaulted"),
        gas_limit: *matches.get_one::<u64>("gas-limit").expect("defaulted"),
    };
    let config = RemovalConfig::new(signer_address).with_gas(gas);

    tracing::info!(network, dir = %deployment_dir.display(), signer = %signer_address, "loading deployment");
    let deployment = Deployment::load(&deployment_dir).map_err(RemovalError::from)?;
    let pending = PendingActionLog::load(deployment_dir.join(PENDING_ACTIONS_FILE))
        .map_err(RemovalError::from)?;
    let client = connect(&rpc_url, signer)?;
    let mut coordinator = RemovalCoordinator::new(&client, deployment, pending, config);

    let confirmation: Box<dyn Confirmation> = if matches.get_flag("yes") {
        Box::new(AutoApprove)
    } else {
        Box::new(StdinConfirmation)
    };

    let report = coordinator.remove_synths(&keys, confirmation.as_ref()).await?;
    if report.cancelled {
        println!("Cancelled, nothing changed.");
        return Ok(0);
    }

    for outcome in &report.outcomes {
        match outcome {
            Outcome::Executed { key, tx_hash } => {
                println!("{key}: removed in tx {tx_hash}");
            }
            Outcome::Deferred {
                key,
                owner,
                pending_key,
            } => {
                println!("{key}: deferred to registry owner {owner} ({pending_key})");
            }
        }
    }
    println!(
        "Done: {} executed, {} deferred.",
        report.executed(),
        report.deferred()
    );
    Ok(0)
}

fn exit_code_for(err: &anyhow::Error) -> i32 {
    err.downcast_ref::<RemovalError>()
        .map_or(1, RemovalError::exit_code)
}
