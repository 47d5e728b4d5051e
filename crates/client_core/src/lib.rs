//! Client side of the tangent-line calculator: submission controller, HTTP
//! transport to the calculation service, and result rendering.

pub mod config;
pub mod controller;
pub mod error;
pub mod loading;
pub mod render;
pub mod transport;
pub mod types;
pub mod view;

pub use config::{load_settings, Settings};
pub use controller::{ControllerEvent, SubmissionController};
pub use error::ClientError;
pub use loading::{FixedSelector, LoadingMessages, MessageSelector, RandomSelector};
pub use render::Fragments;
pub use transport::{CalculatorService, HttpCalculatorService};
pub use types::{CompletionPolicy, FailureDetail, FailureInfo, SubmissionId, UiState};
pub use view::{DetachedSubmit, FormField, FormSource, MemoryView, ResultView, SubmitEvent};
