//! Core of the Homefinder real-estate marketplace.
//!
//! The crate owns the listing lifecycle state machine (create, staged edits,
//! moderation approvals, expiration), wishlist/like membership, and the
//! derived moderation worklist. Persistence is abstracted behind per-entity
//! store traits so the HTTP service can wire any backing it likes.

pub mod config;
pub mod error;
pub mod marketplace;
pub mod telemetry;
