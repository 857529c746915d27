use crate::filings::FeedItem;

use super::OutgoingEmail;

const SUBJECT: &str = "New filing detected";

/// Fixed-template alert for one filing. The label (entity name) only decorates the subject.
pub fn render_new_filing(item: &FeedItem, label: Option<&str>, to: Option<&str>) -> OutgoingEmail {
    let subject = match label {
        Some(l) => format!("{SUBJECT}: {l}"),
        None => SUBJECT.to_string(),
    };
    let body = format!(
        "New filing detected:\nForm: {}\nAccession: {}\nDate: {}\n",
        item.form_type, item.accession_id, item.filed_date
    );
    OutgoingEmail { subject, body, to: to.map(str::to_string) }
}
