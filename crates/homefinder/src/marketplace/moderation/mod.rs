//! Derived admin worklist: seller, verification, and property requests.

pub mod directory;
pub mod queue;

#[cfg(test)]
mod tests;

pub use directory::{UserDirectory, UserProfile, VerificationStatus};
pub use queue::{ModerationQueue, ModerationRequest, RequestKind};
