use serde::{Deserialize, Serialize};

/// Raw form input for one calculation. Values are forwarded verbatim.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SubmissionRequest {
    pub fcn: String,
    pub x: String,
    pub y: String,
    pub output: String,
}

impl SubmissionRequest {
    pub fn new(
        fcn: impl Into<String>,
        x: impl Into<String>,
        y: impl Into<String>,
        output: impl Into<String>,
    ) -> Self {
        Self {
            fcn: fcn.into(),
            x: x.into(),
            y: y.into(),
            output: output.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct TangentLine {
    pub x_value: String,
    pub y_value: String,
    /// Left-hand side of `<equation> = 0`.
    pub equation: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CalculationResult {
    pub dy_dx: String,
    pub lines: Vec<TangentLine>,
}
