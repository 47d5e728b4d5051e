//! HTML fragments for the primary (`dy_dx`) and secondary (`info`) areas.

use shared::domain::{CalculationResult, TangentLine};

use crate::types::{FailureDetail, FailureInfo};

pub const GENERIC_FAILURE_NOTICE: &str = "An error occurred";
pub const NO_TANGENT_LINE_NOTICE: &str = "<strong>No tangent line</strong>";

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Fragments {
    pub primary: String,
    pub secondary: String,
}

pub fn loading(message: &str) -> Fragments {
    Fragments {
        primary: message.to_string(),
        secondary: String::new(),
    }
}

pub fn success(result: &CalculationResult) -> Fragments {
    Fragments {
        primary: derivative(&result.dy_dx),
        secondary: tangent_lines(&result.lines),
    }
}

pub fn failure(info: &FailureInfo) -> Fragments {
    let primary = match info.partial_derivative() {
        Some(dy_dx) => derivative(dy_dx),
        None => GENERIC_FAILURE_NOTICE.to_string(),
    };
    let detail = match &info.error {
        FailureDetail::Payload(payload) => payload.describe().replace('\n', "<br>"),
        FailureDetail::Transport(description) => format!("Error thrown: {description}"),
    };
    Fragments {
        primary,
        secondary: format!("Status code: {}<br>{detail}", info.status),
    }
}

fn derivative(dy_dx: &str) -> String {
    format!("dy/dx = {dy_dx}")
}

fn tangent_lines(lines: &[TangentLine]) -> String {
    if lines.is_empty() {
        return NO_TANGENT_LINE_NOTICE.to_string();
    }

    let noun = if lines.len() == 1 {
        "tangent line"
    } else {
        "tangent lines"
    };
    let mut info = format!("<strong>{} {noun}:</strong><br>", lines.len());
    for line in lines {
        info.push_str(&format!(
            "Point: ({}, {})<br>{} = 0<br><br>",
            line.x_value, line.y_value, line.equation
        ));
    }
    info
}

#[cfg(test)]
#[path = "tests/render_tests.rs"]
mod tests;
