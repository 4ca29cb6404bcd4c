use std::sync::{mpsc, Arc};
use std::thread;
use std::time::Duration;

use listing_logging::{listing_debug, listing_error};

use crate::fetch::{FetchSettings, ListingFetcher, ReqwestListingFetcher};
use crate::{EngineEvent, FailureKind, FetchError, PageRequest, RequestId};

enum EngineCommand {
    Fetch {
        request_id: RequestId,
        request: PageRequest,
    },
}

/// Runs listing requests on a background tokio runtime.
///
/// Commands go in through [`EngineHandle::fetch`], completions come back as
/// [`EngineEvent`]s.
pub struct EngineHandle {
    cmd_tx: mpsc::Sender<EngineCommand>,
    event_rx: mpsc::Receiver<EngineEvent>,
}

impl EngineHandle {
    pub fn new(settings: FetchSettings) -> Self {
        Self::with_fetcher(Arc::new(ReqwestListingFetcher::new(settings)))
    }

    pub fn with_fetcher(fetcher: Arc<dyn ListingFetcher>) -> Self {
        let (cmd_tx, cmd_rx) = mpsc::channel();
        let (event_tx, event_rx) = mpsc::channel();

        thread::spawn(move || {
            let runtime = match tokio::runtime::Runtime::new() {
                Ok(runtime) => runtime,
                Err(err) => {
                    listing_error!("Failed to start engine runtime: {}", err);
                    reject_all(cmd_rx, event_tx, &err.to_string());
                    return;
                }
            };
            while let Ok(command) = cmd_rx.recv() {
                let fetcher = fetcher.clone();
                let event_tx = event_tx.clone();
                runtime.spawn(async move {
                    handle_command(fetcher.as_ref(), command, event_tx).await;
                });
            }
        });

        Self { cmd_tx, event_rx }
    }

    pub fn fetch(&self, request_id: RequestId, request: PageRequest) {
        listing_debug!("Engine fetch request_id={} {:?}", request_id, request);
        let _ = self.cmd_tx.send(EngineCommand::Fetch {
            request_id,
            request,
        });
    }

    pub fn try_recv(&self) -> Option<EngineEvent> {
        self.event_rx.try_recv().ok()
    }

    pub fn recv_timeout(&self, timeout: Duration) -> Option<EngineEvent> {
        self.event_rx.recv_timeout(timeout).ok()
    }
}

async fn handle_command(
    fetcher: &dyn ListingFetcher,
    command: EngineCommand,
    event_tx: mpsc::Sender<EngineEvent>,
) {
    match command {
        EngineCommand::Fetch {
            request_id,
            request,
        } => {
            let result = fetcher.fetch(&request).await;
            let _ = event_tx.send(EngineEvent::ListingFetched { request_id, result });
        }
    }
}

fn reject_all(
    cmd_rx: mpsc::Receiver<EngineCommand>,
    event_tx: mpsc::Sender<EngineEvent>,
    reason: &str,
) {
    while let Ok(EngineCommand::Fetch { request_id, .. }) = cmd_rx.recv() {
        let error = FetchError::new(
            FailureKind::Network,
            format!("engine runtime unavailable: {reason}"),
        );
        let _ = event_tx.send(EngineEvent::ListingFetched {
            request_id,
            result: Err(error),
        });
    }
}
