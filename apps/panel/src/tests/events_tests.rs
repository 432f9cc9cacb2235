use super::*;

use shared::protocol::CommandReply;

#[test]
fn success_outcome_renders_fixed_notice() {
    let outcome: DispatchOutcome = Ok(CommandReply {
        status: 200,
        body: "OK".to_string(),
    });
    assert_eq!(
        notification_for(&outcome).expect("success"),
        "Command sent successfully"
    );
}

#[test]
fn dispatch_failures_render_operator_messages() {
    let cases = [
        (
            DispatchError::Validation("device host must not be empty".to_string()),
            UiErrorCategory::Validation,
            "Please enter ESP32 IP address",
        ),
        (
            DispatchError::Http(500),
            UiErrorCategory::Http,
            "Error: Response code 500",
        ),
        (
            DispatchError::Network("connection refused".to_string()),
            UiErrorCategory::Transport,
            "Error: connection refused",
        ),
    ];

    for (err, category, message) in cases {
        let ui_error = notification_for(&Err(err)).expect_err("failure");
        assert_eq!(ui_error.category(), category);
        assert_eq!(ui_error.context(), UiErrorContext::Dispatch);
        assert_eq!(ui_error.message(), message);
    }
}

#[test]
fn free_text_errors_are_classified() {
    let err = UiError::from_message(UiErrorContext::Input, "invalid speed 'x'");
    assert_eq!(err.category(), UiErrorCategory::Validation);

    let err = UiError::from_message(UiErrorContext::BackendStartup, "operation timed out");
    assert_eq!(err.category(), UiErrorCategory::Transport);

    let err = UiError::from_message(UiErrorContext::BackendStartup, "failed to build runtime");
    assert_eq!(err.category(), UiErrorCategory::Unknown);
}
