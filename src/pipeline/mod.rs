//! Per-request flow: validate input, render the prompt, call the backend,
//! then either parse the plan strictly or hand back the narrative.
//!
//! A narrative that could not be generated degrades to the demo-mode
//! placeholder unless fallback is disabled. A plan that could not be
//! generated or parsed is always an error.

use chrono::Utc;
use serde_json::Value;
use tracing::{info, warn};
use uuid::Uuid;

use crate::errors::PipelineError;
use crate::fallback;
use crate::input;
use crate::plan;
use crate::prompt::{self, NARRATIVE_DECODING, PLAN_DECODING};
use crate::provider::DynProvider;
use crate::wire::{InterceptPlan, NarrativeResponse, NarrativeStatus};

pub struct Pipeline {
    provider: DynProvider,
    narrative_fallback: bool,
}

impl Pipeline {
    pub fn new(provider: DynProvider, narrative_fallback: bool) -> Self {
        Self { provider, narrative_fallback }
    }

    pub async fn predict_impact(&self, body: &Value) -> Result<NarrativeResponse, PipelineError> {
        let query = input::validate_impact(body).inspect_err(|e| {
            info!(field = e.field(), error = %e, "impact input rejected");
        })?;
        let request_id = Uuid::new_v4();
        info!(%request_id, lat = query.lat, lon = query.lon, mass_kg = query.mass_kg, "impact prediction requested");

        let ins = prompt::impact_instruction(&query);
        match self.provider.complete(&ins, NARRATIVE_DECODING).await {
            Ok(text) => Ok(NarrativeResponse {
                status: NarrativeStatus::Success,
                prediction: text,
                timestamp: Utc::now().to_rfc3339(),
                data_used: Some(vec!["lat".into(), "lon".into(), "mass_kg".into()]),
                example_analysis: None,
            }),
            Err(e) if self.narrative_fallback => {
                warn!(%request_id, error = %e, "narrative generation failed, serving demo prediction");
                Ok(fallback::demo_prediction(Utc::now()))
            }
            Err(e) => Err(e.into()),
        }
    }

    pub async fn plan_intercept(&self, body: &Value) -> Result<InterceptPlan, PipelineError> {
        let req = input::validate_intercept(body).inspect_err(|e| {
            info!(field = e.field(), error = %e, "interception input rejected");
        })?;
        let request_id = Uuid::new_v4();
        info!(
            %request_id,
            mass_kg = req.mass_kg,
            rel_speed_kps = req.rel_speed_kps,
            diameter_m = ?req.diameter_m,
            density_kg_m3 = ?req.density_kg_m3,
            "interception plan requested"
        );

        let ins = prompt::plan_instruction(&req);
        let text = self.provider.complete(&ins, PLAN_DECODING).await.inspect_err(|e| {
            warn!(%request_id, error = %e, kind = ?e.kind, "plan generation failed");
        })?;

        let plan = plan::parse(&text).inspect_err(|e| {
            warn!(%request_id, error = %e, "model returned a non-conforming plan");
        })?;
        info!(%request_id, rocket_count = plan.rocket_count, profiles = plan.profiles.len(), "plan accepted");
        Ok(plan)
    }
}
