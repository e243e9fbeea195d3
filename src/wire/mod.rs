use serde::{Deserialize, Serialize};

/// ========================================
/// Interception plan contract
/// ========================================
///
/// These types are the single source of truth for the plan shape: the prompt
/// embeds `InterceptPlan::example()` rendered through serde, and the parser
/// deserializes into the same types.

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct InterceptPlan {
    pub summary: String,
    #[serde(rename = "rocketCount")]
    pub rocket_count: u32,
    pub profiles: Vec<LaunchProfile>,
    #[serde(rename = "postShatter")]
    pub post_shatter: PostShatterPlan,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct LaunchProfile {
    pub id: String,
    pub count: u32,
    /// Scene units per second (client visualization).
    pub speed: f64,
    #[serde(rename = "deltaV_kps")]
    pub delta_v_kps: f64,
    /// Scene units.
    #[serde(rename = "hitRadius")]
    pub hit_radius: f64,
    /// 0 = launch all at once.
    #[serde(rename = "delaySec")]
    pub delay_sec: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct PostShatterPlan {
    /// Outward radial Δv pushing debris away from Earth.
    #[serde(rename = "targetRadial_dv_kps")]
    pub target_radial_dv_kps: f64,
    #[serde(rename = "minimumSafePerigee_km")]
    pub minimum_safe_perigee_km: f64,
    #[serde(rename = "suggestExtraInterceptors")]
    pub suggest_extra_interceptors: bool,
}

impl InterceptPlan {
    /// Example instance shown to the model as the exact target shape.
    pub fn example() -> Self {
        Self {
            summary: "Short 1-3 sentence plan overview.".into(),
            rocket_count: 16,
            profiles: vec![LaunchProfile {
                id: "wave-A".into(),
                count: 16,
                speed: 3.0,
                delta_v_kps: 1.2,
                hit_radius: 0.4,
                delay_sec: 0.0,
            }],
            post_shatter: PostShatterPlan {
                target_radial_dv_kps: 0.6,
                minimum_safe_perigee_km: 10000.0,
                suggest_extra_interceptors: false,
            },
        }
    }

    pub fn profile_rockets(&self) -> u64 {
        self.profiles.iter().map(|p| u64::from(p.count)).sum()
    }
}

/// ========================================
/// Generation payload
/// ========================================

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Instruction {
    pub system: String,
    pub user: String,
}

/// Fixed decoding configuration for one call site.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Decoding {
    pub temperature: f32,
    pub max_tokens: u32,
}

/// ========================================
/// Narrative (impact prediction) response
/// ========================================

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum NarrativeStatus {
    Success,
    DemoMode,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ExampleAnalysis {
    pub population_risk: String,
    pub economic_cost: String,
    pub timeline: String,
    pub tsunami_risk: String,
    pub emergency_response: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NarrativeResponse {
    pub status: NarrativeStatus,
    pub prediction: String,
    pub timestamp: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data_used: Option<Vec<String>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub example_analysis: Option<ExampleAnalysis>,
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn example_serializes_with_client_field_names() {
        let v = serde_json::to_value(InterceptPlan::example()).unwrap();
        assert_eq!(v["rocketCount"], json!(16));
        assert_eq!(v["profiles"][0]["deltaV_kps"], json!(1.2));
        assert_eq!(v["profiles"][0]["hitRadius"], json!(0.4));
        assert_eq!(v["profiles"][0]["delaySec"], json!(0.0));
        assert_eq!(v["postShatter"]["minimumSafePerigee_km"], json!(10000.0));
        assert_eq!(v["postShatter"]["suggestExtraInterceptors"], json!(false));
    }

    #[test]
    fn demo_status_is_snake_case() {
        assert_eq!(serde_json::to_value(NarrativeStatus::DemoMode).unwrap(), json!("demo_mode"));
    }
}
