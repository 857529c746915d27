use std::path::PathBuf;

use anyhow::Result;
use clap::Args;

use crate::config::{AppConfig, ConfigError, FeedConfig, MailConfig};
use crate::filings::SecClient;
use crate::notify::{Mailer, SmtpMailer};
use crate::state::StateStore;
use crate::telemetry::{self};

mod orchestrate;
mod types;

pub use orchestrate::{Checker, RunOutcome};

/// filing-watch check: one poll-compare-notify pass
#[derive(Args, Debug)]
pub struct CheckCmd {
    /// Entity identifier (CIK); overrides CIK_FILTER
    #[arg(long)]
    pub cik: Option<String>,
    /// Recipient address; overrides NOTIFY_TO (defaults to the sender)
    #[arg(long)]
    pub to: Option<String>,
    /// State file path; overrides FILING_WATCH_STATE_PATH
    #[arg(long)]
    pub state: Option<PathBuf>,
    /// Detect only: never send mail, never write state
    #[arg(long, default_value_t = false)]
    pub dry_run: bool,
}

/// Feed and (unless dry-running) mail settings; fails before any I/O happens.
fn resolve(cfg: &AppConfig, args: &CheckCmd) -> Result<(FeedConfig, Option<MailConfig>), ConfigError> {
    let feed_cfg = cfg.feed(args.cik.as_deref())?;
    let mail_cfg = if args.dry_run { None } else { Some(cfg.mail(args.to.as_deref())?) };
    Ok((feed_cfg, mail_cfg))
}

pub async fn run(cfg: &AppConfig, args: CheckCmd) -> Result<()> {
    let log = telemetry::check();
    let _g = log.root_span_kv([
        ("dry_run", args.dry_run.to_string()),
        ("cik", format!("{:?}", args.cik)),
        ("state", format!("{:?}", args.state)),
    ]).entered();

    let (feed_cfg, mail_cfg) = resolve(cfg, &args)?;

    let source = SecClient::new(&feed_cfg)?;
    let smtp = mail_cfg.as_ref().map(SmtpMailer::new).transpose()?;
    let store = StateStore::new(args.state.unwrap_or_else(|| cfg.state_path.clone()));
    log.info_kv("🔎 Checking feed", [("url", source.url().to_string()), ("state", store.path().display().to_string())]);

    let checker = Checker {
        source: &source,
        mailer: smtp.as_ref().map(|m| m as &dyn Mailer),
        store: &store,
        recipient: mail_cfg.as_ref().and_then(|m| m.recipient.clone()),
        fallback_label: cfg.company_name.clone(),
    };
    let outcome = checker.run().await?;

    let (item, key, state_saved, error) = match &outcome {
        RunOutcome::NoNewItem => (None, None, None, None),
        RunOutcome::Notified { item, key, state_saved } => (Some(item.clone()), Some(key.to_string()), Some(*state_saved), None),
        RunOutcome::WouldNotify { item, key } => (Some(item.clone()), Some(key.to_string()), None, None),
        RunOutcome::FetchFailed(e) => (None, None, None, Some(e.to_string())),
    };
    log.outcome(outcome.label(), key.as_deref());

    if telemetry::config::json_mode() {
        let result = types::CheckResult {
            outcome: outcome.label(),
            cik: feed_cfg.cik.to_string(),
            dry_run: args.dry_run,
            item,
            key,
            state_saved,
            error,
        };
        log.result(&result)?;
    }
    Ok(())
}
