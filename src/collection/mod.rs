//! Remote collections: an in-memory, id-keyed cache of one resource type
//! kept in sync with a makechat list endpoint.

pub mod envelope;
pub mod state;

use std::sync::Arc;
use std::sync::atomic::{AtomicU64, Ordering};

use tokio::sync::watch;

use crate::api_client::ApiClient;
use crate::auth::session::SessionContext;
use crate::errors::FetchError;
use crate::models::Resource;

pub use envelope::{merge_by_id, parse_items};
pub use state::{CollectionState, CollectionStatus, Snapshot};

pub struct RemoteCollection<T: Resource> {
    client: ApiClient,
    session: SessionContext,
    state: watch::Sender<CollectionState<T>>,
    /// Bumped by every fetch; only the newest may publish its result.
    generation: AtomicU64,
}

impl<T: Resource> RemoteCollection<T> {
    pub fn new(client: ApiClient, session: SessionContext) -> Self {
        let (state, _) = watch::channel(CollectionState::Idle);
        Self { client, session, state, generation: AtomicU64::new(0) }
    }

    pub fn name(&self) -> &'static str {
        T::NAME
    }

    pub fn endpoint(&self) -> &'static str {
        T::ENDPOINT
    }

    /// Current state (cheap: snapshots share their item list).
    pub fn state(&self) -> CollectionState<T> {
        self.state.borrow().clone()
    }

    pub fn status(&self) -> CollectionStatus {
        CollectionStatus::of(T::NAME, &*self.state.borrow())
    }

    /// Observe every state transition from now on.
    pub fn subscribe(&self) -> watch::Receiver<CollectionState<T>> {
        self.state.subscribe()
    }

    pub fn len(&self) -> usize {
        self.state.borrow().items().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn get(&self, id: &str) -> Option<T> {
        self.state
            .borrow()
            .items()
            .iter()
            .find(|model| model.id().is_some_and(|model_id| model_id == id))
            .cloned()
    }

    pub fn placeholder(&self) -> T {
        T::placeholder(&self.session)
    }

    /// Fetch the endpoint and replace the contents wholesale.
    ///
    /// Resolves to the new item count. On failure the collection moves to
    /// `Failed` with its previous items kept, and the error is also returned.
    /// When a newer fetch started meanwhile, this one publishes nothing and
    /// resolves to [`FetchError::Superseded`].
    pub async fn fetch(&self) -> Result<usize, FetchError> {
        let generation = self.generation.fetch_add(1, Ordering::SeqCst) + 1;
        self.state.send_modify(|state| *state = state.begin_loading());
        log::debug!("Fetching {} from {}", T::NAME, T::ENDPOINT);

        let parsed = match self.client.get_json(T::ENDPOINT).await.and_then(parse_items::<T>) {
            Err(FetchError::MalformedResponse(reason)) => {
                log::warn!("{} response from {} is malformed ({reason}); treating as empty", T::NAME, T::ENDPOINT);
                Ok(Vec::new())
            }
            other => other,
        };
        let outcome = parsed.map(|items| Snapshot::new(self.prepare(items)));

        let published = self.state.send_if_modified(|state| {
            if self.generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *state = match &outcome {
                Ok(snapshot) => CollectionState::Ready(snapshot.clone()),
                Err(e) => state.fail(e.clone()),
            };
            true
        });
        if !published {
            log::debug!("Discarded superseded {} fetch", T::NAME);
            return Err(FetchError::Superseded);
        }

        match outcome {
            Ok(snapshot) => {
                let count = snapshot.items().len();
                log::info!("Loaded {count} {}", T::NAME);
                Ok(count)
            }
            Err(e) => {
                log::error!("Failed to fetch {}: {e}", T::NAME);
                Err(e)
            }
        }
    }

    /// Start a fetch without waiting for it.
    pub fn spawn_fetch(self: &Arc<Self>) {
        let collection = Arc::clone(self);
        actix_web::rt::spawn(async move {
            // Failures are recorded in the collection state.
            let _ = collection.fetch().await;
        });
    }

    fn prepare(&self, items: Vec<T>) -> Vec<T> {
        merge_by_id(items)
            .into_iter()
            .map(|mut model| {
                model.apply_defaults(&self.session);
                model
            })
            .collect()
    }
}
