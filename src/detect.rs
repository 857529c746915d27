use serde::Serialize;

use crate::filings::FeedItem;
use crate::state::SeenState;

const KEY_DELIMITER: char = '_';

/// Composite identity of a filing: accession, form and date joined by `_`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize)]
#[serde(transparent)]
pub struct ItemKey(String);

impl ItemKey {
    pub fn for_item(item: &FeedItem) -> Self {
        ItemKey(format!(
            "{}{d}{}{d}{}",
            item.accession_id, item.form_type, item.filed_date,
            d = KEY_DELIMITER
        ))
    }

    /// Wrap a key read back from storage.
    pub fn from_raw(raw: impl Into<String>) -> Self { ItemKey(raw.into()) }

    pub fn as_str(&self) -> &str { &self.0 }
}

impl std::fmt::Display for ItemKey {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result { f.write_str(&self.0) }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewEvent {
    pub item: FeedItem,
    pub key: ItemKey,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Detection {
    NoChange,
    New(NewEvent),
}

/// Pure comparison of the feed head against the last notified key.
pub fn detect(item: Option<&FeedItem>, state: &SeenState) -> Detection {
    let Some(item) = item else { return Detection::NoChange };
    let key = ItemKey::for_item(item);
    if state.last.as_ref() == Some(&key) {
        return Detection::NoChange;
    }
    Detection::New(NewEvent { item: item.clone(), key })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(acc: &str, form: &str, date: &str) -> FeedItem { FeedItem::new(acc, form, date) }

    #[test]
    fn key_joins_fields_with_underscore() {
        assert_eq!(ItemKey::for_item(&item("A002", "10-Q", "2024-02-01")).as_str(), "A002_10-Q_2024-02-01");
    }

    #[test]
    fn first_run_is_new_then_unchanged() {
        let it = item("A001", "10-K", "2024-01-01");
        let Detection::New(ev) = detect(Some(&it), &SeenState::default()) else { panic!("expected new event") };
        assert_eq!(ev.item, it);
        let persisted = SeenState::with_last(ev.key);
        assert_eq!(detect(Some(&it), &persisted), Detection::NoChange);
    }

    #[test]
    fn absent_item_is_no_change() {
        assert_eq!(detect(None, &SeenState::default()), Detection::NoChange);
        assert_eq!(detect(None, &SeenState::with_last(ItemKey::from_raw("x"))), Detection::NoChange);
    }

    #[test]
    fn each_field_changes_the_key() {
        let base = item("A001", "10-K", "2024-01-01");
        let variants = [
            item("A002", "10-K", "2024-01-01"),
            item("A001", "10-K/A", "2024-01-01"),
            item("A001", "10-K", "2024-01-02"),
        ];
        let mut state = SeenState::with_last(ItemKey::for_item(&base));
        for v in &variants {
            assert_ne!(ItemKey::for_item(v), ItemKey::for_item(&base));
            match detect(Some(v), &state) {
                Detection::New(ev) => state = SeenState::with_last(ev.key),
                Detection::NoChange => panic!("variant {v:?} not treated as new"),
            }
        }
    }

    #[test]
    fn comparison_is_exact() {
        let it = item("A001", "10-K", "2024-01-01");
        let state = SeenState::with_last(ItemKey::from_raw("a001_10-k_2024-01-01"));
        assert!(matches!(detect(Some(&it), &state), Detection::New(_)));
    }
}
