use super::*;

fn running_state() -> MotorState {
    MotorState {
        powered: true,
        speed: 73,
        direction: Direction::Reverse,
    }
}

#[test]
fn new_state_is_off_stopped_and_idle() {
    assert_eq!(
        MotorState::new(),
        MotorState {
            powered: false,
            speed: 0,
            direction: Direction::Stop,
        }
    );
}

#[test]
fn set_speed_clamps_out_of_range_values() {
    for (input, expected) in [
        (-1, 0),
        (-250, 0),
        (i64::MIN, 0),
        (101, 100),
        (4096, 100),
        (i64::MAX, 100),
        (0, 0),
        (42, 42),
        (100, 100),
    ] {
        let state = MotorState::new().apply(Intent::SetSpeed(input));
        assert_eq!(state.speed, expected, "input {input}");
    }
}

#[test]
fn emergency_stop_resets_every_field() {
    let priors = [
        MotorState::new(),
        running_state(),
        MotorState {
            powered: false,
            speed: 100,
            direction: Direction::Forward,
        },
    ];
    for prior in priors {
        assert_eq!(
            prior.apply(Intent::EmergencyStop),
            MotorState {
                powered: false,
                speed: 0,
                direction: Direction::Stop,
            }
        );
    }
}

#[test]
fn power_and_direction_change_independently() {
    let state = running_state().apply(Intent::PowerOff);
    assert_eq!(state.speed, 73);
    assert_eq!(state.direction, Direction::Reverse);

    let state = state.apply(Intent::SetDirection(Direction::Forward));
    assert!(!state.powered);
    assert_eq!(state.direction, Direction::Forward);

    let state = state.apply(Intent::PowerOn);
    assert!(state.powered);
    assert_eq!(state.speed, 73);
}

#[test]
fn commit_speed_leaves_state_untouched() {
    assert_eq!(running_state().apply(Intent::CommitSpeed), running_state());
}

#[test]
fn status_line_matches_panel_format() {
    assert_eq!(
        MotorState::new().to_string(),
        "Motor: OFF | Speed: 0 | Direction: STOP"
    );
    assert_eq!(
        running_state().to_string(),
        "Motor: ON | Speed: 73 | Direction: REVERSE"
    );
}

#[test]
fn blank_host_is_detected() {
    assert!(DeviceTarget::new("").is_blank());
    assert!(DeviceTarget::new("   ").is_blank());
    assert!(!DeviceTarget::new("10.0.0.5").is_blank());
}

#[test]
fn intents_serialize_in_snake_case() {
    let json = serde_json::to_string(&Intent::SetDirection(Direction::Forward)).expect("json");
    assert_eq!(json, r#"{"type":"set_direction","value":"forward"}"#);

    let parsed: Intent = serde_json::from_str(r#"{"type":"emergency_stop"}"#).expect("parse");
    assert_eq!(parsed, Intent::EmergencyStop);
}
