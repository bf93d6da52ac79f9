//! Client side of the predictor: HTTP transport, form handler, and result view.

pub mod handler;
pub mod http;
pub mod view;

pub use handler::{FormHandler, Predictor, SubmitOutcome};
pub use http::{ClientError, PredictClient};
pub use view::{Dashboard, View};
