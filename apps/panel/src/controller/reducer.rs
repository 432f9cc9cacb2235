//! Panel model and the single place where it changes.

use shared::{
    domain::{DeviceTarget, Intent, MotorState},
    protocol::CommandRequest,
};

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PanelModel {
    state: MotorState,
    host: String,
}

impl PanelModel {
    pub fn new(host: impl Into<String>) -> Self {
        Self {
            state: MotorState::new(),
            host: host.into(),
        }
    }

    pub fn state(&self) -> MotorState {
        self.state
    }

    pub fn host(&self) -> &str {
        &self.host
    }

    pub fn set_host(&mut self, host: impl Into<String>) {
        self.host = host.into();
    }

    /// Target read at send time, like the address field it stands for.
    pub fn target(&self) -> DeviceTarget {
        DeviceTarget::new(self.host.clone())
    }

    /// Applies `intents` in order and returns the commands they produce.
    ///
    /// The local state moves even when a command later fails.
    pub fn reduce(&mut self, intents: &[Intent]) -> Vec<CommandRequest> {
        let mut commands = Vec::new();
        for &intent in intents {
            self.state = self.state.apply(intent);
            if let Some(request) = CommandRequest::for_intent(intent, &self.state) {
                commands.push(request);
            }
        }
        commands
    }
}

#[cfg(test)]
#[path = "../tests/reducer_tests.rs"]
mod tests;
