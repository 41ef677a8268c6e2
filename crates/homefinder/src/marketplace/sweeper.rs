//! Background expiration sweep: retires Active listings past their
//! expiration date on a fixed interval for the lifetime of the process.

use std::sync::Arc;
use std::time::Duration;

use chrono::Utc;
use tokio::sync::watch;
use tracing::{error, info};

use super::listings::{EditDraftStore, ListingService, ListingStore, MediaStore};

/// Run the sweep loop until the shutdown channel flips. Each tick is an
/// independent unit of work; a failed iteration is logged and retried on the
/// next scheduled tick.
pub async fn run<L, D, M>(
    service: Arc<ListingService<L, D, M>>,
    interval: Duration,
    mut shutdown: watch::Receiver<bool>,
) where
    L: ListingStore + 'static,
    D: EditDraftStore + 'static,
    M: MediaStore + 'static,
{
    info!(interval_secs = interval.as_secs(), "expiration sweep started");

    let mut ticker = tokio::time::interval(interval);
    // The first tick fires immediately; catch anything that expired while the
    // process was down.
    loop {
        tokio::select! {
            _ = ticker.tick() => {
                match service.expire_sweep(Utc::now()) {
                    Ok(0) => {}
                    Ok(count) => info!(count, "expired listings retired"),
                    Err(err) => error!(%err, "expiration sweep failed"),
                }
            }
            changed = shutdown.changed() => {
                // A dropped sender means the server is gone; stop either way.
                if changed.is_err() || *shutdown.borrow() {
                    info!("expiration sweep stopping");
                    break;
                }
            }
        }
    }
}
