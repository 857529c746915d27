use chrono::NaiveDate;

use super::types::{FeedItem, Latest, Submissions};

pub fn parse_submissions(body: &[u8]) -> Result<Submissions, serde_json::Error> {
    serde_json::from_slice(body)
}

/// Pick index 0 of the three parallel `recent` arrays.
///
/// Returns `Latest::NotFound` unless all three arrays are present, non-empty and of
/// equal length, and the head entries are non-blank with a valid `YYYY-MM-DD` date.
pub fn extract_latest(doc: &Submissions) -> Latest {
    let Some(recent) = doc.filings.as_ref().and_then(|f| f.recent.as_ref()) else { return Latest::NotFound };
    let (Some(acc), Some(forms), Some(dates)) = (&recent.accession_number, &recent.form, &recent.filing_date) else {
        return Latest::NotFound;
    };
    if acc.is_empty() || acc.len() != forms.len() || acc.len() != dates.len() {
        return Latest::NotFound;
    }

    // stored as the feed sent them; trimming only decides blankness
    let (accession, form, date) = (acc[0].as_str(), forms[0].as_str(), dates[0].as_str());
    if accession.trim().is_empty() || form.trim().is_empty() { return Latest::NotFound; }
    if NaiveDate::parse_from_str(date, "%Y-%m-%d").is_err() { return Latest::NotFound; }

    let entity_name = doc.name.as_deref().map(str::trim).filter(|n| !n.is_empty()).map(str::to_string);
    Latest::Found { item: FeedItem::new(accession, form, date), entity_name }
}
