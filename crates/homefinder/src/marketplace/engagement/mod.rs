//! Wishlist and like membership per (user, listing) pair.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;

#[cfg(test)]
mod tests;

pub use domain::{LikeEntry, WishlistEntry};
pub use router::engagement_router;
pub use service::{EngagementError, EngagementService};
pub use store::{LikeStore, WishlistStore};
