use super::*;
use serde_json::json;
use shared::error::ErrorPayload;

fn line(x: &str, y: &str, equation: &str) -> TangentLine {
    TangentLine {
        x_value: x.into(),
        y_value: y.into(),
        equation: equation.into(),
    }
}

#[test]
fn success_without_lines_shows_no_tangent_notice() {
    let fragments = success(&CalculationResult {
        dy_dx: "2*x".into(),
        lines: Vec::new(),
    });

    assert_eq!(fragments.primary, "dy/dx = 2*x");
    assert_eq!(fragments.secondary, NO_TANGENT_LINE_NOTICE);
    assert!(!fragments.secondary.contains("Point:"));
}

#[test]
fn single_line_uses_singular_header() {
    let fragments = success(&CalculationResult {
        dy_dx: "2*x".into(),
        lines: vec![line("1", "2", "y - 2*x")],
    });

    assert_eq!(
        fragments.secondary,
        "<strong>1 tangent line:</strong><br>Point: (1, 2)<br>y - 2*x = 0<br><br>"
    );
    assert_eq!(fragments.secondary.matches("Point:").count(), 1);
}

#[test]
fn multiple_lines_use_plural_header_in_order() {
    let fragments = success(&CalculationResult {
        dy_dx: "-x/y".into(),
        lines: vec![line("0", "5", "y - 5"), line("0", "-5", "y + 5")],
    });

    assert!(fragments
        .secondary
        .starts_with("<strong>2 tangent lines:</strong><br>"));
    let first = fragments.secondary.find("Point: (0, 5)").expect("first line");
    let second = fragments.secondary.find("Point: (0, -5)").expect("second line");
    assert!(first < second);
    assert!(fragments.secondary.contains("y + 5 = 0"));
}

#[test]
fn partial_failure_shows_derivative_and_error() {
    let fragments = failure(&FailureInfo {
        status: 500,
        error: FailureDetail::Payload(ErrorPayload::message("tangent computation failed")),
        dy_dx: Some("2*x".into()),
    });

    assert_eq!(fragments.primary, "dy/dx = 2*x");
    assert_eq!(
        fragments.secondary,
        "Status code: 500<br>tangent computation failed"
    );
}

#[test]
fn derivative_on_other_server_errors_is_not_shown() {
    let fragments = failure(&FailureInfo {
        status: 502,
        error: FailureDetail::Payload(ErrorPayload::message("upstream")),
        dy_dx: Some("2*x".into()),
    });

    assert_eq!(fragments.primary, GENERIC_FAILURE_NOTICE);
}

#[test]
fn server_error_without_derivative_is_a_full_failure() {
    let fragments = failure(&FailureInfo {
        status: 500,
        error: FailureDetail::Payload(ErrorPayload::message("could not differentiate")),
        dy_dx: None,
    });

    assert_eq!(fragments.primary, GENERIC_FAILURE_NOTICE);
    assert_eq!(
        fragments.secondary,
        "Status code: 500<br>could not differentiate"
    );
}

#[test]
fn structured_error_is_serialized() {
    let fragments = failure(&FailureInfo {
        status: 400,
        error: FailureDetail::Payload(ErrorPayload::Structured(json!({"code": "bad_input"}))),
        dy_dx: None,
    });

    assert_eq!(fragments.primary, GENERIC_FAILURE_NOTICE);
    assert_eq!(fragments.secondary, r#"Status code: 400<br>{"code":"bad_input"}"#);
    assert!(!fragments.secondary.contains("dy/dx"));
}

#[test]
fn newlines_in_error_become_line_breaks() {
    let fragments = failure(&FailureInfo {
        status: 400,
        error: FailureDetail::Payload(ErrorPayload::message("could not parse\nx = ?")),
        dy_dx: None,
    });

    assert_eq!(
        fragments.secondary,
        "Status code: 400<br>could not parse<br>x = ?"
    );
}

#[test]
fn transport_failure_shows_raw_description() {
    let fragments = failure(&FailureInfo::transport(0, "connection refused"));

    assert_eq!(fragments.primary, GENERIC_FAILURE_NOTICE);
    assert_eq!(
        fragments.secondary,
        "Status code: 0<br>Error thrown: connection refused"
    );
}

#[test]
fn loading_clears_secondary_area() {
    let fragments = loading("Differentiating...");
    assert_eq!(fragments.primary, "Differentiating...");
    assert!(fragments.secondary.is_empty());
}
