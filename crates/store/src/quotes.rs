//! In-memory quote feed keyed by quote id.

use std::collections::BTreeMap;

use followup_core::quote::Quote;
use followup_core::types::DbId;
use followup_core::CoreError;

use crate::error::StoreError;

/// Read model of the quotes owned by the sales application.
#[derive(Debug, Clone, Default)]
pub struct QuoteBook {
    quotes: BTreeMap<DbId, Quote>,
}

impl QuoteBook {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a book from a list of quotes, rejecting duplicate ids.
    pub fn from_quotes(quotes: Vec<Quote>) -> Result<Self, StoreError> {
        let mut book = Self::new();
        for quote in quotes {
            let id = quote.id;
            if book.quotes.insert(id, quote).is_some() {
                return Err(StoreError::DuplicateQuote(id));
            }
        }
        Ok(book)
    }

    /// Parse a JSON array of quote records.
    pub fn from_json(json: &str) -> Result<Self, StoreError> {
        let quotes: Vec<Quote> = serde_json::from_str(json)?;
        Self::from_quotes(quotes)
    }

    pub fn get(&self, id: DbId) -> Option<&Quote> {
        self.quotes.get(&id)
    }

    /// Look up a quote, failing with `NotFound` if it is unknown.
    pub fn find(&self, id: DbId) -> Result<&Quote, CoreError> {
        self.get(id).ok_or_else(|| CoreError::quote_not_found(id))
    }

    /// Insert or replace a quote. Returns the previous record, if any.
    pub fn upsert(&mut self, quote: Quote) -> Option<Quote> {
        self.quotes.insert(quote.id, quote)
    }

    /// Quotes in ascending id order.
    pub fn iter(&self) -> impl Iterator<Item = &Quote> {
        self.quotes.values()
    }

    pub fn len(&self) -> usize {
        self.quotes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.quotes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use assert_matches::assert_matches;
    use followup_core::quote::QuoteStatus;

    use super::*;

    const FEED: &str = r#"[
        {"id": 2, "customer_id": 1, "customer_name": "Acme", "value": 10.0,
         "status": "sent", "date_created": "2025-01-01", "date_sent": "2025-01-02"},
        {"id": 1, "customer_id": 1, "customer_name": "Acme", "value": 5.0,
         "status": "draft", "date_created": "2025-01-01"}
    ]"#;

    #[test]
    fn parses_feed_in_id_order() {
        let book = QuoteBook::from_json(FEED).unwrap();
        let ids: Vec<DbId> = book.iter().map(|q| q.id).collect();
        assert_eq!(ids, vec![1, 2]);
        assert_eq!(book.find(2).unwrap().status, QuoteStatus::Sent);
    }

    #[test]
    fn unknown_quote_is_not_found() {
        let book = QuoteBook::from_json(FEED).unwrap();
        assert_matches!(
            book.find(3),
            Err(CoreError::NotFound { entity: "quote", .. })
        );
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        let json = r#"[
            {"id": 1, "customer_id": 1, "customer_name": "A", "value": 1.0,
             "status": "draft", "date_created": "2025-01-01"},
            {"id": 1, "customer_id": 2, "customer_name": "B", "value": 2.0,
             "status": "draft", "date_created": "2025-01-01"}
        ]"#;
        assert_matches!(QuoteBook::from_json(json), Err(StoreError::DuplicateQuote(1)));
    }

    #[test]
    fn malformed_json_is_a_feed_error() {
        assert_matches!(QuoteBook::from_json("{not json"), Err(StoreError::Feed(_)));
    }

    #[test]
    fn upsert_replaces_existing() {
        let mut book = QuoteBook::from_json(FEED).unwrap();
        let mut quote = book.find(1).unwrap().clone();
        quote.status = QuoteStatus::Sent;
        assert!(book.upsert(quote).is_some());
        assert_eq!(book.len(), 2);
        assert_eq!(book.find(1).unwrap().status, QuoteStatus::Sent);
    }
}
