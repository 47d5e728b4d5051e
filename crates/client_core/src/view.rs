//! Narrow page surface the controller reads from and renders into.

use shared::domain::SubmissionRequest;

use crate::render::Fragments;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FormField {
    Function,
    X,
    Y,
    Output,
}

impl FormField {
    pub const ALL: [FormField; 4] = [Self::Function, Self::X, Self::Y, Self::Output];

    /// Stable element id of the input field.
    pub fn element_id(self) -> &'static str {
        match self {
            Self::Function => "fcn",
            Self::X => "x",
            Self::Y => "y",
            Self::Output => "output",
        }
    }
}

pub trait FormSource {
    fn value(&self, field: FormField) -> String;

    fn read_request(&self) -> SubmissionRequest {
        SubmissionRequest {
            fcn: self.value(FormField::Function),
            x: self.value(FormField::X),
            y: self.value(FormField::Y),
            output: self.value(FormField::Output),
        }
    }
}

impl FormSource for SubmissionRequest {
    fn value(&self, field: FormField) -> String {
        match field {
            FormField::Function => self.fcn.clone(),
            FormField::X => self.x.clone(),
            FormField::Y => self.y.clone(),
            FormField::Output => self.output.clone(),
        }
    }
}

/// The user-triggered submit action.
pub trait SubmitEvent {
    /// Suppress the host's own form handling.
    fn prevent_default(&mut self);
}

/// Submit action with no host behavior to suppress.
#[derive(Debug, Default)]
pub struct DetachedSubmit {
    pub default_prevented: bool,
}

impl SubmitEvent for DetachedSubmit {
    fn prevent_default(&mut self) {
        self.default_prevented = true;
    }
}

/// Output elements: primary holds the derivative, secondary the tangent-line or
/// error detail.
pub trait ResultView: Send {
    fn set_primary(&mut self, html: &str);
    fn set_secondary(&mut self, html: &str);

    fn show(&mut self, fragments: &Fragments) {
        self.set_primary(&fragments.primary);
        self.set_secondary(&fragments.secondary);
    }
}

/// View that only keeps the latest fragments.
#[derive(Debug, Clone, Default)]
pub struct MemoryView {
    pub fragments: Fragments,
}

impl ResultView for MemoryView {
    fn set_primary(&mut self, html: &str) {
        self.fragments.primary = html.to_string();
    }

    fn set_secondary(&mut self, html: &str) {
        self.fragments.secondary = html.to_string();
    }
}
