//! Runs [`Request`]s against a [`DirectoryService`] without blocking the caller.
//!
//! Each request becomes its own tokio task; its [`Outcome`] is sent back to
//! the event loop over an unbounded mpsc channel. There is no cancellation:
//! outcomes that are no longer wanted are discarded by the receiver.

use std::sync::Arc;

use tokio::runtime::Handle;
use tokio::sync::mpsc::{unbounded_channel, UnboundedReceiver, UnboundedSender};

use crate::service::{CreateKind, DirectoryService, Outcome, Request};

/// Spawns service calls and reports their outcomes.
#[derive(Clone)]
pub struct Dispatcher {
    handle: Handle,
    service: Arc<dyn DirectoryService>,
    tx: UnboundedSender<Outcome>,
}

impl Dispatcher {
    /// Creates a dispatcher and the receiving end of its outcome channel.
    pub fn new(
        handle: Handle,
        service: Arc<dyn DirectoryService>,
    ) -> (Self, UnboundedReceiver<Outcome>) {
        let (tx, rx) = unbounded_channel();
        let dispatcher = Self {
            handle,
            service,
            tx,
        };
        (dispatcher, rx)
    }

    /// Spawns every request in order.
    pub fn dispatch_all(&self, requests: impl IntoIterator<Item = Request>) {
        for request in requests {
            self.dispatch(request);
        }
    }

    /// Spawns a single request.
    pub fn dispatch(&self, request: Request) {
        tracing::debug!(?request, "dispatching service request");
        let service = Arc::clone(&self.service);
        let tx = self.tx.clone();
        self.handle.spawn(async move {
            let outcome = run(service.as_ref(), request).await;
            // receiver gone means the app is shutting down
            let _ = tx.send(outcome);
        });
    }
}

async fn run(service: &dyn DirectoryService, request: Request) -> Outcome {
    match request {
        Request::List {
            token,
            path,
            options,
        } => {
            let result = service.list_directory(&path, options).await;
            Outcome::Listed {
                token,
                path,
                result,
            }
        }
        Request::Search { token, path, query } => {
            let result = service.search_files(&path, &query).await;
            Outcome::Searched {
                token,
                path,
                query,
                result,
            }
        }
        Request::Copy {
            source,
            destination,
            origin,
        } => {
            let result = service.copy_file(&source, &destination).await;
            Outcome::Copied {
                source,
                destination,
                origin,
                result,
            }
        }
        Request::Delete { path, origin } => {
            let result = service.delete_file(&path).await;
            Outcome::Deleted {
                path,
                origin,
                result,
            }
        }
        Request::Rename {
            path,
            new_name,
            origin,
        } => {
            let result = service.rename_file(&path, &new_name).await;
            Outcome::Renamed {
                path,
                new_name,
                origin,
                result,
            }
        }
        Request::Create { path, kind, origin } => {
            let result = match kind {
                CreateKind::File => service.create_file(&path).await,
                CreateKind::Dir => service.create_dir(&path).await,
            };
            Outcome::Created {
                path,
                kind,
                origin,
                result,
            }
        }
        Request::Open { path, entry } => {
            let result = service.open_with_default_application(&path, &entry).await;
            Outcome::Opened { path, result }
        }
    }
}
