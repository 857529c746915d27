use thiserror::Error;

use crate::detect::{self, Detection, ItemKey};
use crate::filings::{FeedError, FeedItem, FilingSource, Latest};
use crate::notify::{self, DeliveryError, Mailer};
use crate::state::{SeenState, StateStore};
use crate::telemetry;
use crate::telemetry::ops::check::Phase as CheckPhase;

#[derive(Debug)]
pub enum RunOutcome {
    NoNewItem,
    /// Delivery was invoked. `state_saved = false` means the same item will be re-sent next run.
    Notified { item: FeedItem, key: ItemKey, state_saved: bool },
    /// Only produced in dry-run mode: a new item was found but nothing was sent or saved.
    WouldNotify { item: FeedItem, key: ItemKey },
    FetchFailed(FeedError),
}

impl RunOutcome {
    pub fn label(&self) -> &'static str {
        match self {
            RunOutcome::NoNewItem => "no_new_item",
            RunOutcome::Notified { .. } => "notified",
            RunOutcome::WouldNotify { .. } => "would_notify",
            RunOutcome::FetchFailed(_) => "fetch_failed",
        }
    }
}

#[derive(Debug, Error)]
pub enum CheckError {
    #[error("delivery failed, state left unchanged: {0}")]
    Delivery(#[from] DeliveryError),
}

/// One poll-compare-notify pass over a single entity.
pub struct Checker<'a> {
    pub source: &'a dyn FilingSource,
    /// `None` runs the pass without sending or saving.
    pub mailer: Option<&'a dyn Mailer>,
    pub store: &'a StateStore,
    pub recipient: Option<String>,
    /// Subject label used when the feed document carries no entity name.
    pub fallback_label: Option<String>,
}

impl Checker<'_> {
    pub async fn run(&self) -> Result<RunOutcome, CheckError> {
        let log = telemetry::check();

        let state: SeenState = {
            let _s = log.span(&CheckPhase::LoadState).entered();
            self.store.load()
        };
        log.info_kv("🗂️ state loaded", [("last", format!("{:?}", state.last.as_ref().map(ItemKey::as_str)))]);

        let latest = {
            let _s = log.span(&CheckPhase::Fetch).entered();
            self.source.fetch_latest().await
        };
        let (item, entity_name) = match latest {
            Ok(Latest::Found { item, entity_name }) => (Some(item), entity_name),
            Ok(Latest::NotFound) => {
                log.info("📭 No recent filings in feed");
                (None, None)
            }
            Err(e) if e.is_transient() => {
                log.error(format!("❌ Fetch failed: {e}"));
                return Ok(RunOutcome::FetchFailed(e));
            }
            Err(e) => {
                log.warn(format!("⚠️ Feed unreadable, treating as empty: {e}"));
                (None, None)
            }
        };

        let detection = {
            let _s = log.span(&CheckPhase::Detect).entered();
            detect::detect(item.as_ref(), &state)
        };
        let event = match detection {
            Detection::NoChange => {
                log.info("💤 No new filings");
                return Ok(RunOutcome::NoNewItem);
            }
            Detection::New(ev) => ev,
        };

        let label = entity_name.or_else(|| self.fallback_label.clone());
        let email = notify::render_new_filing(&event.item, label.as_deref(), self.recipient.as_deref());

        let Some(mailer) = self.mailer else {
            log.info_kv("📝 Dry run — would notify", [("key", event.key.to_string()), ("subject", email.subject.clone())]);
            return Ok(RunOutcome::WouldNotify { item: event.item, key: event.key });
        };

        {
            let _s = log.span_kv(&CheckPhase::Notify, [("key", event.key.to_string())]).entered();
            mailer.send(&email).await?;
        }
        log.info_kv("📨 Alert sent", [("key", event.key.to_string())]);

        let saved = {
            let _s = log.span(&CheckPhase::SaveState).entered();
            self.store.save(&SeenState::with_last(event.key.clone()))
        };
        let state_saved = match saved {
            Ok(()) => true,
            Err(e) => {
                log.warn_kv("⚠️ Alert sent but state not saved; it will be re-sent next run", [("error", e.to_string())]);
                false
            }
        };

        Ok(RunOutcome::Notified { item: event.item, key: event.key, state_saved })
    }
}
