//! Directory of tradespeople buyers can hire for renovation work.

pub mod domain;
pub mod router;
pub mod service;
pub mod store;


pub use domain::{Craftsman, CraftsmanId, CraftsmanSubmission};
pub use router::craftsman_router;
pub use service::{CraftsmanError, CraftsmanService};
pub use store::CraftsmanStore;
