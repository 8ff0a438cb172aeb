use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

use chrono::{DateTime, Utc};
use tokio::sync::watch;
use tracing::{debug, warn};

use crate::domain::CatalogEntryDetail;
use crate::enrich::enrich;
use crate::error::PokedexError;
use crate::pokeapi::CatalogClient;

/// Cached catalog data is considered stale after this window and becomes
/// eligible for refetch on the next read.
pub const DEFAULT_STALE_AFTER: Duration = Duration::from_secs(5 * 60);

/// Point-in-time view of the cache exposed to screens.
#[derive(Debug, Clone)]
pub struct CatalogSnapshot {
    pub data: Option<Arc<Vec<CatalogEntryDetail>>>,
    pub is_loading: bool,
    pub is_error: bool,
    pub fetched_at: Option<DateTime<Utc>>,
}

struct CacheSlot {
    data: Option<Arc<Vec<CatalogEntryDetail>>>,
    fetched_at: Option<Instant>,
    fetched_at_wall: Option<DateTime<Utc>>,
    is_error: bool,
    in_flight: Option<u64>,
    last_epoch: u64,
}

impl CacheSlot {
    fn snapshot(&self) -> CatalogSnapshot {
        CatalogSnapshot {
            data: self.data.clone(),
            is_loading: self.in_flight.is_some(),
            is_error: self.is_error,
            fetched_at: self.fetched_at_wall,
        }
    }
}

/// Query cache for the full catalog under a single fixed key.
///
/// Guarantees at most one in-flight fetch at a time: the first stale reader
/// drives the network fan-out while concurrent readers wait on its
/// completion instead of issuing duplicates. Writes are epoch-guarded so a
/// superseded fetch can never overwrite a fresher cached value. A failed
/// fetch keeps the last good value and only raises the error flag.
pub struct CatalogCache<C: CatalogClient> {
    client: C,
    limit: u32,
    stale_after: Duration,
    state: Mutex<CacheSlot>,
    completions: watch::Sender<u64>,
}

impl<C: CatalogClient> CatalogCache<C> {
    pub fn new(client: C, limit: u32) -> Self {
        Self::with_stale_after(client, limit, DEFAULT_STALE_AFTER)
    }

    pub fn with_stale_after(client: C, limit: u32, stale_after: Duration) -> Self {
        let (completions, _) = watch::channel(0u64);
        Self {
            client,
            limit,
            stale_after,
            state: Mutex::new(CacheSlot {
                data: None,
                fetched_at: None,
                fetched_at_wall: None,
                is_error: false,
                in_flight: None,
                last_epoch: 0,
            }),
            completions,
        }
    }

    pub fn client(&self) -> &C {
        &self.client
    }

    /// Current cache state without triggering any network activity.
    pub fn snapshot(&self) -> CatalogSnapshot {
        self.state.lock().unwrap().snapshot()
    }

    /// Marks the cached value stale so the next read refetches. The last
    /// good value stays visible until then (user-initiated refresh path).
    pub fn invalidate(&self) {
        let mut slot = self.state.lock().unwrap();
        slot.fetched_at = None;
    }

    /// Returns the cached catalog, fetching it first when absent or stale.
    ///
    /// Within the staleness window this issues no network requests.
    /// Concurrent callers during an in-flight fetch share that single
    /// fetch and observe its outcome.
    pub async fn get(&self) -> CatalogSnapshot {
        loop {
            let mut completions = self.completions.subscribe();
            let claimed = {
                let mut slot = self.state.lock().unwrap();
                if self.is_fresh(&slot) {
                    return slot.snapshot();
                }
                match slot.in_flight {
                    Some(_) => None,
                    None => {
                        slot.last_epoch += 1;
                        slot.in_flight = Some(slot.last_epoch);
                        Some(slot.last_epoch)
                    }
                }
            };
            let Some(epoch) = claimed else {
                // Another caller is driving the fetch; wait for it to land
                // and share its outcome, success or failure.
                let _ = completions.changed().await;
                let slot = self.state.lock().unwrap();
                if self.is_fresh(&slot) || slot.is_error {
                    return slot.snapshot();
                }
                // The driving future was dropped without completing; claim
                // the fetch on the next pass.
                drop(slot);
                continue;
            };
            debug!(epoch, limit = self.limit, "refreshing catalog cache");
            let guard = FlightGuard {
                cache: self,
                epoch,
                armed: true,
            };
            let result = self.fetch_catalog().await;
            return guard.complete(result);
        }
    }

    fn is_fresh(&self, slot: &CacheSlot) -> bool {
        slot.data.is_some()
            && slot
                .fetched_at
                .map(|at| at.elapsed() < self.stale_after)
                .unwrap_or(false)
    }

    async fn fetch_catalog(&self) -> Result<Vec<CatalogEntryDetail>, PokedexError> {
        let summaries = self.client.list_summaries(self.limit).await?;
        enrich(&self.client, &summaries).await
    }
}

/// Tracks the fetch this task is driving. Releases the in-flight claim on
/// drop so waiters are not stranded if the driving future is cancelled.
struct FlightGuard<'a, C: CatalogClient> {
    cache: &'a CatalogCache<C>,
    epoch: u64,
    armed: bool,
}

impl<C: CatalogClient> FlightGuard<'_, C> {
    fn complete(mut self, result: Result<Vec<CatalogEntryDetail>, PokedexError>) -> CatalogSnapshot {
        self.armed = false;
        let snapshot = {
            let mut slot = self.cache.state.lock().unwrap();
            if slot.in_flight == Some(self.epoch) {
                slot.in_flight = None;
                match result {
                    Ok(data) => {
                        slot.data = Some(Arc::new(data));
                        slot.fetched_at = Some(Instant::now());
                        slot.fetched_at_wall = Some(Utc::now());
                        slot.is_error = false;
                    }
                    Err(err) => {
                        warn!(error = %err, "catalog fetch failed; keeping last good value");
                        slot.is_error = true;
                    }
                }
            }
            // A superseded fetch never writes; the slot already holds the
            // outcome of a more recent epoch.
            slot.snapshot()
        };
        self.cache.completions.send_modify(|generation| *generation += 1);
        snapshot
    }
}

impl<C: CatalogClient> Drop for FlightGuard<'_, C> {
    fn drop(&mut self) {
        if !self.armed {
            return;
        }
        {
            let mut slot = self.cache.state.lock().unwrap();
            if slot.in_flight == Some(self.epoch) {
                slot.in_flight = None;
            }
        }
        self.cache
            .completions
            .send_modify(|generation| *generation += 1);
    }
}
