//! Text commands accepted by the panel.

use shared::domain::{Direction, Intent};

pub const HELP: &str = "\
commands:
  on | off              power the motor on or off
  forward | reverse     set the direction
  speed <0-100>         move the speed slider (not sent)
  commit                release the slider and send the speed
  set <0-100>           move and release the slider
  stop                  emergency stop
  host [<address>|-]    show, set, or clear (-) the device address
  status                show the motor state
  help                  show this text
  quit                  cancel pending commands and exit";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PanelInput {
    Intents(Vec<Intent>),
    SetHost(String),
    ShowHost,
    Status,
    Help,
    Quit,
    Empty,
}

pub fn parse_input(line: &str) -> Result<PanelInput, String> {
    let mut words = line.split_whitespace();
    let Some(word) = words.next() else {
        return Ok(PanelInput::Empty);
    };
    let rest: Vec<&str> = words.collect();
    let keyword = word.to_ascii_lowercase();

    let input = match (keyword.as_str(), rest.as_slice()) {
        ("on", []) => PanelInput::Intents(vec![Intent::PowerOn]),
        ("off", []) => PanelInput::Intents(vec![Intent::PowerOff]),
        ("forward" | "fwd", []) => {
            PanelInput::Intents(vec![Intent::SetDirection(Direction::Forward)])
        }
        ("reverse" | "rev", []) => {
            PanelInput::Intents(vec![Intent::SetDirection(Direction::Reverse)])
        }
        ("stop", []) => PanelInput::Intents(vec![Intent::EmergencyStop]),
        ("speed", [value]) => PanelInput::Intents(vec![Intent::SetSpeed(parse_speed(value)?)]),
        ("commit", []) => PanelInput::Intents(vec![Intent::CommitSpeed]),
        ("set", [value]) => PanelInput::Intents(vec![
            Intent::SetSpeed(parse_speed(value)?),
            Intent::CommitSpeed,
        ]),
        ("host", []) => PanelInput::ShowHost,
        ("host", ["-"]) => PanelInput::SetHost(String::new()),
        ("host", [host]) => PanelInput::SetHost((*host).to_string()),
        ("status", []) => PanelInput::Status,
        ("help" | "?", []) => PanelInput::Help,
        ("quit" | "exit", []) => PanelInput::Quit,
        _ => return Err(format!("unknown command '{}'; type 'help'", line.trim())),
    };
    Ok(input)
}

fn parse_speed(raw: &str) -> Result<i64, String> {
    raw.parse::<i64>()
        .map_err(|_| format!("invalid speed '{raw}': expected a whole number"))
}

#[cfg(test)]
#[path = "../tests/input_tests.rs"]
mod tests;
