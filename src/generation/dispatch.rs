//! Runs generator calls on the tokio runtime and hands results back to the
//! single-threaded session loop over a channel.

use std::sync::Arc;

use serde_json::Value;
use tokio::runtime::Handle;
use tokio::sync::mpsc;

use crate::core::error::Error;
use crate::core::types::Result;
use super::generator::Generator;
use super::request::GenerationRequest;

/// Identifies one submitted request.
///
/// `epoch` is the session epoch at submission time; a session that has been
/// cleared or reloaded since then treats the result as stale.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub struct GenerationTicket {
    pub id: u64,
    pub epoch: u64,
}

/// A finished generator call
#[derive(Debug)]
pub struct GenerationOutcome {
    pub ticket: GenerationTicket,
    pub result: Result<Vec<Value>>,
}

/// Spawns generator calls and collects their outcomes.
///
/// Outcomes are drained with [`try_next`](Self::try_next) between frames, or
/// awaited with [`next`](Self::next) in headless runs.
pub struct GenerationDispatcher<G: Generator> {
    generator: Arc<G>,
    runtime: Handle,
    result_tx: mpsc::UnboundedSender<GenerationOutcome>,
    result_rx: mpsc::UnboundedReceiver<GenerationOutcome>,
}

impl<G: Generator> GenerationDispatcher<G> {
    /// Create a dispatcher that spawns onto `runtime`
    pub fn new(generator: G, runtime: Handle) -> Self {
        let (result_tx, result_rx) = mpsc::unbounded_channel();
        Self {
            generator: Arc::new(generator),
            runtime,
            result_tx,
            result_rx,
        }
    }

    /// Create a dispatcher on the current tokio runtime.
    ///
    /// Panics if called outside a tokio runtime context.
    pub fn with_current_runtime(generator: G) -> Self {
        Self::new(generator, Handle::current())
    }

    /// Start a generator call. The outcome arrives on the channel even if the
    /// generator panics.
    pub fn dispatch(&self, ticket: GenerationTicket, request: GenerationRequest) {
        let generator = Arc::clone(&self.generator);
        let result_tx = self.result_tx.clone();
        let runtime = self.runtime.clone();

        self.runtime.spawn(async move {
            let task = runtime.spawn(async move { generator.generate(request).await });
            let result = match task.await {
                Ok(result) => result,
                Err(e) => {
                    log::error!("Generation task {} failed: {}", ticket.id, e);
                    Err(Error::Generation(format!("generator task failed: {}", e)))
                }
            };
            // receiver gone means the session shut down
            let _ = result_tx.send(GenerationOutcome { ticket, result });
        });
    }

    /// Next finished outcome, if one is ready
    pub fn try_next(&mut self) -> Option<GenerationOutcome> {
        self.result_rx.try_recv().ok()
    }

    /// Wait for the next finished outcome
    pub async fn next(&mut self) -> Option<GenerationOutcome> {
        self.result_rx.recv().await
    }
}
