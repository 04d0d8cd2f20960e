use clap::{ArgAction, Parser};
use zipic_mcp_lib::app::{HostCapabilityGuard, HostDispatcher};
use zipic_mcp_lib::config::Config;
use zipic_mcp_lib::handlers::Compressor;
use zipic_mcp_lib::{logging, mcp, VERSION};

#[derive(Parser)]
#[command(name = "zipic-mcp")]
#[command(about = "MCP server that sends image compression jobs to Zipic")]
#[command(version = VERSION, disable_version_flag = true)]
#[command(after_help = "Without options, serves MCP requests on stdin/stdout.")]
struct Cli {
    /// Print version
    #[arg(short = 'v', long = "version", action = ArgAction::Version)]
    version: Option<bool>,
}

fn main() {
    let _cli = Cli::parse();

    if let Err(e) = run() {
        eprintln!("Error: {}", e);
        std::process::exit(1);
    }
}

fn run() -> anyhow::Result<()> {
    let (config, config_error) = Config::load();
    logging::init(config.log_file.as_deref())?;
    if let Some(e) = config_error {
        tracing::warn!(error = %format!("{e:#}"), "Ignoring global config file");
    }
    tracing::info!(version = VERSION, scheme = %config.scheme, "Starting zipic-mcp");

    let compressor = Compressor::new(
        HostCapabilityGuard::new(&config.bundle_id),
        HostDispatcher,
        &config.scheme,
    );

    let rt = tokio::runtime::Runtime::new()?;
    rt.block_on(mcp::run_server(&compressor))
}
