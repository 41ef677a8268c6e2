use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// Identifier wrapper for directory entries.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CraftsmanId(pub String);

/// A tradesperson listed for hire. Directory rows are append-only; there is
/// no edit or removal flow.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Craftsman {
    pub id: CraftsmanId,
    pub name: String,
    pub profession: String,
    pub phone_number: String,
    pub created_at: DateTime<Utc>,
}

/// Caller-supplied fields for a new directory entry.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CraftsmanSubmission {
    pub name: String,
    pub profession: String,
    pub phone_number: String,
}
