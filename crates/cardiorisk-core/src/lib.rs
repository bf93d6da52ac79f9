pub mod form;
pub mod risk;
pub mod wire;

pub use form::{FieldValue, FormPayload, parse_field};
pub use risk::{ChartDataset, RiskLevel, Tone, format_percentage, remaining_share};
pub use wire::{Outcome, PredictionResponse};
