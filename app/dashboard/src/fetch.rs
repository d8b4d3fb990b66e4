use std::sync::Arc;

use framework::exception::DevPulseResult;
use framework::task;
use tokio::sync::mpsc;
use tracing::debug;
use tracing::warn;

use crate::api::EventApi;
use crate::event::DevEvent;
use crate::event::TimeRange;

/// Which view a fetch belongs to, every view keeps its own event copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum StoreId {
    Overview,
    Projects,
    Stats,
}

#[derive(Debug)]
pub struct FetchResult {
    pub store: StoreId,
    pub generation: u64,
    pub result: DevPulseResult<Vec<DevEvent>>,
}

/// Per-view event collection guarded by a request generation counter, so a
/// slow superseded response can never overwrite a newer one.
#[derive(Default)]
pub struct EventStore {
    events: Vec<DevEvent>,
    generation: u64,
    loading: bool,
    fetched: bool,
}

impl EventStore {
    pub fn events(&self) -> &[DevEvent] {
        &self.events
    }

    pub fn loading(&self) -> bool {
        self.loading
    }

    pub fn fetched(&self) -> bool {
        self.fetched
    }

    pub fn begin(&mut self) -> u64 {
        self.generation += 1;
        self.loading = true;
        self.fetched = true;
        self.generation
    }

    pub fn apply(&mut self, generation: u64, result: DevPulseResult<Vec<DevEvent>>) {
        if generation != self.generation {
            debug!(generation, latest = self.generation, "discarded superseded fetch result");
            return;
        }
        self.loading = false;
        match result {
            Ok(events) => self.events = events,
            // previous events stay visible on failure
            Err(e) => warn!("failed to fetch dev events, error={e:?}"),
        }
    }
}

pub struct Fetcher {
    api: Arc<EventApi>,
    results: mpsc::UnboundedSender<FetchResult>,
}

impl Fetcher {
    pub fn new(api: EventApi) -> (Self, mpsc::UnboundedReceiver<FetchResult>) {
        let (results, receiver) = mpsc::unbounded_channel();
        let fetcher = Fetcher {
            api: Arc::new(api),
            results,
        };
        (fetcher, receiver)
    }

    pub fn request(&self, store: StoreId, generation: u64, range: Option<TimeRange>) {
        let api = Arc::clone(&self.api);
        let results = self.results.clone();
        task::spawn_action("fetch_dev_events", async move {
            let result = match range {
                Some(range) => api.events_in_range(range).await,
                None => api.all_events().await,
            };
            if results.send(FetchResult { store, generation, result }).is_err() {
                debug!("fetch result dropped, receiver closed");
            }
            Ok(())
        });
    }
}
