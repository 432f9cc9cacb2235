use std::{sync::Arc, time::Duration};

use shared::{
    domain::DeviceTarget,
    error::DispatchError,
    protocol::{CommandReply, CommandRequest, SUCCESS_STATUS},
};
use tracing::{debug, warn};

pub mod session;
pub mod transport;

pub use session::DispatchSession;
pub use transport::{CommandTransport, HttpTransport, TransportError, TransportResponse};

pub const COMMAND_CONNECT_TIMEOUT: Duration = Duration::from_secs(5);
pub const COMMAND_READ_TIMEOUT: Duration = Duration::from_secs(5);

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct DispatcherConfig {
    pub connect_timeout: Duration,
    pub read_timeout: Duration,
}

impl Default for DispatcherConfig {
    fn default() -> Self {
        Self {
            connect_timeout: COMMAND_CONNECT_TIMEOUT,
            read_timeout: COMMAND_READ_TIMEOUT,
        }
    }
}

pub fn command_url(target: &DeviceTarget, request: &CommandRequest) -> String {
    format!("http://{}/{}", target.host.trim(), request.path)
}

/// Turns command requests into single GETs against the device.
///
/// Stateless per call: clones share the transport, and every dispatch is an
/// independent request with no ordering relative to the others.
#[derive(Clone)]
pub struct Dispatcher {
    transport: Arc<dyn CommandTransport>,
}

impl Dispatcher {
    pub fn new() -> Result<Self, TransportError> {
        Self::with_config(DispatcherConfig::default())
    }

    pub fn with_config(config: DispatcherConfig) -> Result<Self, TransportError> {
        let transport = HttpTransport::new(config.connect_timeout, config.read_timeout)?;
        Ok(Self::with_transport(Arc::new(transport)))
    }

    pub fn with_transport(transport: Arc<dyn CommandTransport>) -> Self {
        Self { transport }
    }

    /// Sends `request` to `target`. Dropping the returned future cancels the
    /// request.
    pub async fn dispatch(
        &self,
        target: &DeviceTarget,
        request: &CommandRequest,
    ) -> Result<CommandReply, DispatchError> {
        if target.is_blank() {
            warn!(path = %request.path, "refusing to dispatch without a device host");
            return Err(DispatchError::Validation(
                "device host must not be empty".to_string(),
            ));
        }

        let url = command_url(target, request);
        debug!(%url, "sending command");

        let response = match self.transport.get(&url).await {
            Ok(response) => response,
            Err(err) => {
                warn!(%url, timed_out = err.timed_out, "error making request: {err}");
                return Err(DispatchError::Network(err.message));
            }
        };

        debug!(%url, status = response.status, "response code");
        debug!(%url, body = %response.body, "response");

        if response.status == SUCCESS_STATUS {
            Ok(CommandReply {
                status: response.status,
                body: response.body,
            })
        } else {
            warn!(%url, status = response.status, "device rejected command");
            Err(DispatchError::Http(response.status))
        }
    }
}

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
