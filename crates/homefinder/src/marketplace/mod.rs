//! Marketplace core: listing lifecycle, engagement membership, the craftsman
//! directory, and the derived moderation worklist.

pub mod craftsmen;
pub mod engagement;
pub mod listings;
pub mod moderation;
pub mod sweeper;
