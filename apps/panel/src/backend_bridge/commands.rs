//! Backend commands queued from the panel to the dispatch worker.

use shared::{domain::DeviceTarget, protocol::CommandRequest};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum BackendCommand {
    Dispatch {
        target: DeviceTarget,
        request: CommandRequest,
    },
    /// Cancels outstanding requests and stops the worker.
    Shutdown,
}

impl BackendCommand {
    pub fn name(&self) -> &'static str {
        match self {
            BackendCommand::Dispatch { .. } => "dispatch",
            BackendCommand::Shutdown => "shutdown",
        }
    }
}
