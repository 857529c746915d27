use serde::{Deserialize, Serialize};

/// The most recent filing in the feed. Fields hold the feed's values untrimmed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct FeedItem {
    pub accession_id: String,
    pub form_type: String,
    /// ISO-8601 calendar date (`YYYY-MM-DD`).
    pub filed_date: String,
}

impl FeedItem {
    pub fn new(accession_id: impl Into<String>, form_type: impl Into<String>, filed_date: impl Into<String>) -> Self {
        Self { accession_id: accession_id.into(), form_type: form_type.into(), filed_date: filed_date.into() }
    }
}

/// Result of one feed read.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Latest {
    Found { item: FeedItem, entity_name: Option<String> },
    NotFound,
}

// Wire shape of the submissions document; only the fields we read.
#[derive(Debug, Deserialize, Default)]
pub struct Submissions {
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub filings: Option<Filings>,
}

#[derive(Debug, Deserialize, Default)]
pub struct Filings {
    #[serde(default)]
    pub recent: Option<Recent>,
}

#[derive(Debug, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub struct Recent {
    #[serde(default)]
    pub accession_number: Option<Vec<String>>,
    #[serde(default)]
    pub form: Option<Vec<String>>,
    #[serde(default)]
    pub filing_date: Option<Vec<String>>,
}
