use std::path::PathBuf;

use anyhow::Result;
use clap::{Args, Subcommand};
use serde::Serialize;

use crate::config::AppConfig;
use crate::telemetry::{self};
use crate::telemetry::ops::state::Phase as StatePhase;

mod store;

pub use store::{SeenState, StateStore};

/// filing-watch state show/reset
#[derive(Args)]
pub struct StateCmd {
    #[command(subcommand)]
    pub cmd: StateSub,
}

#[derive(Subcommand)]
pub enum StateSub {
    /// Print the last notified filing key
    Show {
        #[arg(long)]
        state: Option<PathBuf>,
    },
    /// Forget the last notified filing (plan-only by default; use --apply to write)
    Reset {
        #[arg(long)]
        state: Option<PathBuf>,
        #[arg(long, default_value_t = false)]
        apply: bool,
    },
}

#[derive(Serialize)]
struct StateView {
    path: String,
    exists: bool,
    last: Option<String>,
}

#[derive(Serialize)]
struct ResetPlan {
    action: &'static str,
    path: String,
    last: Option<String>,
}

pub async fn run(cfg: &AppConfig, args: StateCmd) -> Result<()> {
    match args.cmd {
        StateSub::Show { state } => show(&StateStore::new(state.unwrap_or_else(|| cfg.state_path.clone()))),
        StateSub::Reset { state, apply } => reset(&StateStore::new(state.unwrap_or_else(|| cfg.state_path.clone())), apply),
    }
}

fn show(store: &StateStore) -> Result<()> {
    let log = telemetry::state();
    let _g = log.root_span_kv([("path", store.path().display().to_string())]).entered();
    let _s = log.span(&StatePhase::Show).entered();

    let seen = store.load();
    let last = seen.last.map(|k| k.to_string());
    match &last {
        Some(k) => log.info(format!("🗂️ Last notified: {k}")),
        None => log.info("🗂️ Nothing notified yet"),
    }
    if telemetry::config::json_mode() {
        let view = StateView { path: store.path().display().to_string(), exists: store.path().exists(), last };
        log.result(&view)?;
    }
    Ok(())
}

fn reset(store: &StateStore, apply: bool) -> Result<()> {
    let log = telemetry::state();
    let _g = log.root_span_kv([
        ("mode", if apply { "apply".to_string() } else { "plan".to_string() }),
        ("path", store.path().display().to_string()),
    ]).entered();

    let current = store.load().last.map(|k| k.to_string());
    if !apply {
        let _s = log.span(&StatePhase::Plan).entered();
        log.info(format!("📝 State plan — reset path={} last={:?}", store.path().display(), current));
        log.info("   Use --apply to execute.");
        if telemetry::config::json_mode() {
            let plan = ResetPlan { action: "reset", path: store.path().display().to_string(), last: current };
            log.plan(&plan)?;
        }
        return Ok(());
    }

    let _s = log.span(&StatePhase::Reset).entered();
    store.save(&SeenState::default())?;
    log.info("♻️ State reset; the next check will notify for the current filing");
    if telemetry::config::json_mode() {
        let view = StateView { path: store.path().display().to_string(), exists: true, last: None };
        log.result(&view)?;
    }
    Ok(())
}
