//! Path vocabulary understood by the remote motor controller.
//!
//! Every command is a bare GET to `http://{host}/{path}`; the path is built
//! from a closed set of segments so it never needs escaping.

use std::fmt;

use serde::{Deserialize, Serialize};

use crate::{
    domain::{Direction, Intent, MotorState, MAX_SPEED},
    error::ProtocolError,
};

pub const PATH_ON: &str = "on";
pub const PATH_OFF: &str = "off";
pub const PATH_DIR_FORWARD: &str = "dir/forward";
pub const PATH_DIR_REVERSE: &str = "dir/reverse";
pub const PATH_SPEED_PREFIX: &str = "speed/";
pub const PATH_STOP: &str = "stop";

/// Only status treated as an accepted command.
pub const SUCCESS_STATUS: u16 = 200;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum DeviceCommand {
    On,
    Off,
    Forward,
    Reverse,
    Speed(u8),
    Stop,
}

impl DeviceCommand {
    /// Command sent for `intent`, evaluated against the state after the
    /// intent was applied. Intents that only move local state yield `None`.
    pub fn for_intent(intent: Intent, state: &MotorState) -> Option<DeviceCommand> {
        match intent {
            Intent::PowerOn => Some(DeviceCommand::On),
            Intent::PowerOff => Some(DeviceCommand::Off),
            Intent::SetDirection(Direction::Forward) => Some(DeviceCommand::Forward),
            Intent::SetDirection(Direction::Reverse) => Some(DeviceCommand::Reverse),
            Intent::SetDirection(Direction::Stop) => None,
            Intent::SetSpeed(_) => None,
            Intent::CommitSpeed => Some(DeviceCommand::Speed(state.speed)),
            Intent::EmergencyStop => Some(DeviceCommand::Stop),
        }
    }

    pub fn path(&self) -> String {
        match self {
            DeviceCommand::On => PATH_ON.to_string(),
            DeviceCommand::Off => PATH_OFF.to_string(),
            DeviceCommand::Forward => PATH_DIR_FORWARD.to_string(),
            DeviceCommand::Reverse => PATH_DIR_REVERSE.to_string(),
            DeviceCommand::Speed(speed) => format!("{PATH_SPEED_PREFIX}{speed}"),
            DeviceCommand::Stop => PATH_STOP.to_string(),
        }
    }

    pub fn from_path(path: &str) -> Result<DeviceCommand, ProtocolError> {
        let path = path.trim_matches('/');
        match path {
            PATH_ON => return Ok(DeviceCommand::On),
            PATH_OFF => return Ok(DeviceCommand::Off),
            PATH_DIR_FORWARD => return Ok(DeviceCommand::Forward),
            PATH_DIR_REVERSE => return Ok(DeviceCommand::Reverse),
            PATH_STOP => return Ok(DeviceCommand::Stop),
            _ => {}
        }

        let Some(raw) = path.strip_prefix(PATH_SPEED_PREFIX) else {
            return Err(ProtocolError::UnknownPath(path.to_string()));
        };
        match raw.parse::<u8>() {
            Ok(speed) if speed <= MAX_SPEED => Ok(DeviceCommand::Speed(speed)),
            _ => Err(ProtocolError::InvalidSpeed(raw.to_string())),
        }
    }

    /// Local intent equivalent to the device acting on this command.
    pub fn as_intents(&self) -> Vec<Intent> {
        match self {
            DeviceCommand::On => vec![Intent::PowerOn],
            DeviceCommand::Off => vec![Intent::PowerOff],
            DeviceCommand::Forward => vec![Intent::SetDirection(Direction::Forward)],
            DeviceCommand::Reverse => vec![Intent::SetDirection(Direction::Reverse)],
            DeviceCommand::Speed(speed) => {
                vec![Intent::SetSpeed(i64::from(*speed)), Intent::CommitSpeed]
            }
            DeviceCommand::Stop => vec![Intent::EmergencyStop],
        }
    }
}

/// Path of a single GET against the device.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CommandRequest {
    pub path: String,
}

impl CommandRequest {
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }

    pub fn for_intent(intent: Intent, state: &MotorState) -> Option<CommandRequest> {
        DeviceCommand::for_intent(intent, state).map(CommandRequest::from)
    }
}

impl From<DeviceCommand> for CommandRequest {
    fn from(command: DeviceCommand) -> Self {
        Self {
            path: command.path(),
        }
    }
}

impl fmt::Display for CommandRequest {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.path)
    }
}

/// Reply to a command the device accepted.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CommandReply {
    pub status: u16,
    pub body: String,
}

#[cfg(test)]
#[path = "tests/protocol_tests.rs"]
mod tests;
