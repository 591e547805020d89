//! Async driver that runs fetch cycles against a `Transport`.
//!
//! # Design
//! `PostsSession` wraps a `ViewController` in a mutex and runs each cycle as
//! its own tokio task: the task performs the request without holding the
//! lock, then locks once to resolve. Superseded cycles still finish their
//! request, but the controller refuses to apply their result. There is no
//! timeout; a request that never returns leaves the view loading.

use std::sync::Arc;

use tokio::sync::Mutex;
use tokio::task::JoinHandle;
use tracing::debug;

use crate::client::PostsClient;
use crate::config::ViewerConfig;
use crate::controller::{Completion, FetchCycle, ViewController, ViewSnapshot};
use crate::transport::Transport;

pub struct PostsSession {
    client: PostsClient,
    transport: Arc<dyn Transport>,
    controller: Arc<Mutex<ViewController>>,
}

impl PostsSession {
    /// Create the session and spawn its initial cycle. Must be called from
    /// within a tokio runtime.
    pub fn start(config: &ViewerConfig, transport: Arc<dyn Transport>) -> (Self, JoinHandle<()>) {
        let client = PostsClient::new(&config.base_url);
        let (controller, cycle) = ViewController::start(client.clone(), config.page_size);
        let session = Self {
            client,
            transport,
            controller: Arc::new(Mutex::new(controller)),
        };
        let handle = session.spawn_cycle(cycle);
        (session, handle)
    }

    pub async fn set_page(&self, page: u32) -> JoinHandle<()> {
        let cycle = self.controller.lock().await.set_page(page);
        self.spawn_cycle(cycle)
    }

    pub async fn change_page(&self, delta: i64) -> JoinHandle<()> {
        let cycle = self.controller.lock().await.change_page(delta);
        self.spawn_cycle(cycle)
    }

    pub async fn submit_search(&self, term: &str) -> JoinHandle<()> {
        let cycle = self.controller.lock().await.submit_search(term);
        self.spawn_cycle(cycle)
    }

    pub async fn snapshot(&self) -> ViewSnapshot {
        self.controller.lock().await.view().into()
    }

    fn spawn_cycle(&self, cycle: FetchCycle) -> JoinHandle<()> {
        let client = self.client.clone();
        let transport = Arc::clone(&self.transport);
        let controller = Arc::clone(&self.controller);
        tokio::spawn(async move {
            let result = client.fetch_posts(transport.as_ref(), &cycle.query).await;
            let completion = controller.lock().await.resolve(cycle.id, result);
            if completion == Completion::Stale {
                debug!(cycle = cycle.id.0, "posts: session discarded stale cycle");
            }
        })
    }
}
