use std::fmt;

use serde::{Deserialize, Serialize};

pub const MIN_SPEED: u8 = 0;
pub const MAX_SPEED: u8 = 100;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Direction {
    Forward,
    Reverse,
    #[default]
    Stop,
}

impl Direction {
    pub fn label(self) -> &'static str {
        match self {
            Direction::Forward => "FORWARD",
            Direction::Reverse => "REVERSE",
            Direction::Stop => "STOP",
        }
    }
}

impl fmt::Display for Direction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.label())
    }
}

/// A discrete user action consumed by [`MotorState::apply`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type", content = "value", rename_all = "snake_case")]
pub enum Intent {
    PowerOn,
    PowerOff,
    SetDirection(Direction),
    /// Slider moved. Out-of-range values are clamped, nothing is sent.
    SetSpeed(i64),
    /// Slider released; sends the current speed.
    CommitSpeed,
    EmergencyStop,
}

/// Last-known state of the remote motor as seen by this client.
///
/// The value reflects intents optimistically: it is updated before the
/// matching command reaches the device and is never rolled back on failure.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct MotorState {
    pub powered: bool,
    pub speed: u8,
    pub direction: Direction,
}

impl MotorState {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn apply(self, intent: Intent) -> MotorState {
        match intent {
            Intent::PowerOn => MotorState {
                powered: true,
                ..self
            },
            Intent::PowerOff => MotorState {
                powered: false,
                ..self
            },
            Intent::SetDirection(direction) => MotorState { direction, ..self },
            Intent::SetSpeed(value) => MotorState {
                speed: clamp_speed(value),
                ..self
            },
            Intent::CommitSpeed => self,
            Intent::EmergencyStop => MotorState::default(),
        }
    }
}

impl fmt::Display for MotorState {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "Motor: {} | Speed: {} | Direction: {}",
            if self.powered { "ON" } else { "OFF" },
            self.speed,
            self.direction
        )
    }
}

pub fn clamp_speed(value: i64) -> u8 {
    // bounded by MAX_SPEED, so the narrowing cast cannot truncate
    value.clamp(i64::from(MIN_SPEED), i64::from(MAX_SPEED)) as u8
}

/// Address of the remote motor controller.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DeviceTarget {
    pub host: String,
}

impl DeviceTarget {
    pub fn new(host: impl Into<String>) -> Self {
        Self { host: host.into() }
    }

    pub fn is_blank(&self) -> bool {
        self.host.trim().is_empty()
    }
}

#[cfg(test)]
#[path = "tests/domain_tests.rs"]
mod tests;
