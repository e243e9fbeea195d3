use chrono::{DateTime, Utc};

use crate::wire::{ExampleAnalysis, NarrativeResponse, NarrativeStatus};

pub const DEMO_NOTICE: &str =
    "This is a simulated AI response. With a working AI backend you would get actual AI predictions.";

/// Placeholder narrative served when live generation is unavailable.
///
/// Everything except the timestamp is fixed, and the status is always
/// `demo_mode` so clients can tell it apart from a live prediction.
pub fn demo_prediction(at: DateTime<Utc>) -> NarrativeResponse {
    NarrativeResponse {
        status: NarrativeStatus::DemoMode,
        prediction: DEMO_NOTICE.to_string(),
        timestamp: at.to_rfc3339(),
        data_used: None,
        example_analysis: Some(ExampleAnalysis {
            population_risk: "High within 50km radius".into(),
            economic_cost: "~$50B reconstruction".into(),
            timeline: "Impact in 72 hours after detection".into(),
            tsunami_risk: "15m waves if ocean impact".into(),
            emergency_response: "Immediate evacuation within 100km".into(),
        }),
    }
}
