use followup_core::types::DbId;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Invalid quote feed: {0}")]
    Feed(#[from] serde_json::Error),

    #[error("Duplicate quote id {0} in feed")]
    DuplicateQuote(DbId),
}
