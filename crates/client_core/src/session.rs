//! Owner-scoped set of in-flight dispatches.

use shared::{
    domain::DeviceTarget,
    error::DispatchError,
    protocol::{CommandReply, CommandRequest},
};
use tokio::{
    runtime::Handle,
    task::{AbortHandle, JoinSet},
};
use tracing::{debug, info, warn};

use crate::Dispatcher;

pub type DispatchOutcome = Result<CommandReply, DispatchError>;

/// Runs dispatches on a runtime and lets the owner cancel them together.
///
/// Each call to [`DispatchSession::spawn`] is an independent task; a new
/// request never cancels or replaces an earlier one.
pub struct DispatchSession {
    dispatcher: Dispatcher,
    runtime: Handle,
    tasks: JoinSet<()>,
}

impl DispatchSession {
    pub fn new(dispatcher: Dispatcher, runtime: Handle) -> Self {
        Self {
            dispatcher,
            runtime,
            tasks: JoinSet::new(),
        }
    }

    /// Starts a dispatch and hands its outcome to `on_complete` from the
    /// runtime. The returned handle cancels only this request.
    pub fn spawn<F>(
        &mut self,
        target: DeviceTarget,
        request: CommandRequest,
        on_complete: F,
    ) -> AbortHandle
    where
        F: FnOnce(CommandRequest, DispatchOutcome) + Send + 'static,
    {
        self.reap();
        let dispatcher = self.dispatcher.clone();
        debug!(path = %request.path, in_flight = self.tasks.len(), "spawning dispatch");
        self.tasks.spawn_on(
            async move {
                let outcome = dispatcher.dispatch(&target, &request).await;
                on_complete(request, outcome);
            },
            &self.runtime,
        )
    }

    pub fn in_flight(&mut self) -> usize {
        self.reap();
        self.tasks.len()
    }

    /// Aborts every outstanding request; requests still waiting on the device
    /// never report an outcome.
    pub fn cancel_all(&mut self) -> usize {
        self.reap();
        let cancelled = self.tasks.len();
        if cancelled > 0 {
            info!(cancelled, "cancelling outstanding dispatches");
        }
        self.tasks.abort_all();
        self.tasks.detach_all();
        cancelled
    }

    /// Aborts outstanding requests and waits until they are gone.
    pub async fn shutdown(mut self) {
        self.tasks.shutdown().await;
    }

    fn reap(&mut self) {
        while let Some(joined) = self.tasks.try_join_next() {
            if let Err(err) = joined {
                if err.is_panic() {
                    warn!("dispatch task panicked: {err}");
                }
            }
        }
    }
}

#[cfg(test)]
#[path = "tests/session_tests.rs"]
mod tests;
