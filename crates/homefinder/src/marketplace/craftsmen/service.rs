use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use chrono::{DateTime, Utc};

use super::domain::{Craftsman, CraftsmanId, CraftsmanSubmission};
use super::store::CraftsmanStore;
use crate::marketplace::listings::StoreError;

static CRAFTSMAN_SEQUENCE: AtomicU64 = AtomicU64::new(1);

fn next_craftsman_id() -> CraftsmanId {
    let id = CRAFTSMAN_SEQUENCE.fetch_add(1, Ordering::Relaxed);
    CraftsmanId(format!("craft-{id:06}"))
}

/// Registration and lookup for the craftsman directory.
pub struct CraftsmanService<C> {
    craftsmen: Arc<C>,
}

impl<C> CraftsmanService<C>
where
    C: CraftsmanStore + 'static,
{
    pub fn new(craftsmen: Arc<C>) -> Self {
        Self { craftsmen }
    }

    pub fn add(
        &self,
        submission: CraftsmanSubmission,
        now: DateTime<Utc>,
    ) -> Result<Craftsman, CraftsmanError> {
        validate_submission(&submission)?;

        let craftsman = Craftsman {
            id: next_craftsman_id(),
            name: submission.name.trim().to_string(),
            profession: submission.profession.trim().to_string(),
            phone_number: submission.phone_number.trim().to_string(),
            created_at: now,
        };
        Ok(self.craftsmen.insert(craftsman)?)
    }

    /// Every directory entry, newest registration first.
    pub fn all(&self) -> Result<Vec<Craftsman>, CraftsmanError> {
        let mut craftsmen = self.craftsmen.all()?;
        craftsmen.sort_by(|a, b| b.created_at.cmp(&a.created_at));
        Ok(craftsmen)
    }
}

fn validate_submission(submission: &CraftsmanSubmission) -> Result<(), CraftsmanError> {
    let fail = |message: &str| Err(CraftsmanError::Validation(message.to_string()));

    if submission.name.trim().is_empty() {
        return fail("the craftsman's name is required");
    }
    if submission.profession.trim().is_empty() {
        return fail("the profession is required");
    }
    if submission.phone_number.trim().is_empty() {
        return fail("a contact phone number is required");
    }

    Ok(())
}

/// Error raised by the craftsman directory, with display text fit for the
/// requester.
#[derive(Debug, thiserror::Error)]
pub enum CraftsmanError {
    #[error("{0}")]
    Validation(String),
    #[error(transparent)]
    Store(#[from] StoreError),
}
