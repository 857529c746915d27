use clap::{Parser, Subcommand};
use anyhow::Result;
use dotenvy::dotenv;

mod config;
mod check;
mod detect;
mod filings;
mod latest;
mod notify;
mod output;
mod state;
mod telemetry;
mod util;

use config::AppConfig;

#[derive(Parser)]
#[command(name = "filing-watch", about = "Email alerts for new SEC filings of one entity")]
struct Cli {
    /// Emit a single JSON envelope to stdout; logs go to stderr
    #[arg(global = true, long, default_value_t = false)]
    json: bool,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    Check(check::CheckCmd),
    Latest(latest::LatestCmd),
    State(state::StateCmd),
}

impl Commands {
    /// Envelope `op` for this command.
    fn op_name(&self) -> &'static str {
        use telemetry::ctx::OpMarker;
        use telemetry::ops;
        match self {
            Commands::Check(_) => ops::check::Check::NAME,
            Commands::Latest(_) => ops::latest::Latest::NAME,
            Commands::State(_) => ops::state::State::NAME,
        }
    }
}

#[tokio::main(flavor = "current_thread")]
async fn main() -> Result<()> {
    dotenv().ok();
    let cli = Cli::parse();
    telemetry::config::set_json_mode(cli.json);
    telemetry::config::mark_start();

    // initialize logging/tracing (stderr). Respect RUST_LOG and FILING_WATCH_LOG_FORMAT
    telemetry::config::init_tracing();

    // outcomes are reported through logs only; the exit status is always 0
    let op = cli.command.op_name();
    if let Err(e) = dispatch(cli.command).await {
        tracing::error!("❌ {e:#}");
        if telemetry::config::json_mode() {
            if let Err(emit_err) = telemetry::emit::print_error(op, format!("{e:#}")) {
                tracing::error!("❌ could not write error envelope: {emit_err:#}");
            }
        }
    }
    Ok(())
}

async fn dispatch(command: Commands) -> Result<()> {
    let cfg = AppConfig::from_env()?;
    match command {
        Commands::Check(args) => check::run(&cfg, args).await?,
        Commands::Latest(args) => latest::run(&cfg, args).await?,
        Commands::State(args) => state::run(&cfg, args).await?,
    }
    Ok(())
}
