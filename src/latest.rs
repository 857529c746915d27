use anyhow::Result;
use clap::Args;
use serde::Serialize;

use crate::config::AppConfig;
use crate::detect::ItemKey;
use crate::filings::{FeedItem, FilingSource, Latest, SecClient};
use crate::telemetry::{self};
use crate::telemetry::ops::latest::Phase as LatestPhase;

/// filing-watch latest: show the feed head without touching state or mail
#[derive(Args, Debug)]
pub struct LatestCmd {
    #[arg(long)]
    pub cik: Option<String>,
}

#[derive(Serialize)]
struct LatestView {
    cik: String,
    found: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    entity_name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    item: Option<FeedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    key: Option<String>,
}

pub async fn run(cfg: &AppConfig, args: LatestCmd) -> Result<()> {
    let log = telemetry::latest();
    let _g = log.root_span_kv([("cik", format!("{:?}", args.cik))]).entered();

    let feed_cfg = cfg.feed(args.cik.as_deref())?;
    let client = SecClient::new(&feed_cfg)?;
    let latest = {
        let _s = log.span_kv(&LatestPhase::Fetch, [("url", client.url().to_string())]).entered();
        client.fetch_latest().await?
    };

    let view = match latest {
        Latest::Found { item, entity_name } => {
            let key = ItemKey::for_item(&item);
            log.info(format!(
                "📄 {} — Form: {} Accession: {} Date: {}",
                entity_name.as_deref().unwrap_or(feed_cfg.cik.as_str()), item.form_type, item.accession_id, item.filed_date
            ));
            log.info(format!("   key={key}"));
            LatestView { cik: feed_cfg.cik.to_string(), found: true, entity_name, item: Some(item), key: Some(key.to_string()) }
        }
        Latest::NotFound => {
            log.info("📭 No recent filings in feed");
            LatestView { cik: feed_cfg.cik.to_string(), found: false, entity_name: None, item: None, key: None }
        }
    };

    if telemetry::config::json_mode() {
        log.result(&view)?;
    }
    Ok(())
}
