use serde::Serialize;

use crate::filings::FeedItem;

#[derive(Serialize)]
pub struct CheckResult {
    pub outcome: &'static str,
    pub cik: String,
    pub dry_run: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub item: Option<FeedItem>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub key: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub state_saved: Option<bool>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}
