use std::collections::HashSet;

use serde_json::error::Category;
use tracing::warn;

use crate::errors::PlanError;
use crate::wire::InterceptPlan;

/// Parse raw model text into a validated `InterceptPlan`.
///
/// Only surrounding whitespace is tolerated. Code fences, trailing prose,
/// duplicate keys or out-of-range numbers are rejected, never repaired.
pub fn parse(raw: &str) -> Result<InterceptPlan, PlanError> {
    let mut de = serde_json::Deserializer::from_str(raw.trim());
    let plan: InterceptPlan = serde_path_to_error::deserialize(&mut de).map_err(|e| {
        let path = e.path().to_string();
        let inner = e.into_inner();
        match inner.classify() {
            Category::Data => PlanError::SchemaViolation {
                field: offending_field(&path, &inner.to_string()),
                reason: inner.to_string(),
            },
            _ => PlanError::MalformedOutput(inner.to_string()),
        }
    })?;
    de.end().map_err(|e| PlanError::MalformedOutput(e.to_string()))?;

    validate(&plan)?;
    Ok(plan)
}

/// serde reports missing, duplicate and unknown keys against the enclosing
/// object, so the key itself is recovered from the message.
fn offending_field(path: &str, reason: &str) -> String {
    let key = ["missing field `", "duplicate field `", "unknown field `"]
        .iter()
        .find_map(|prefix| reason.strip_prefix(prefix))
        .and_then(|rest| rest.split('`').next());
    match key {
        Some(key) if path == "." => key.to_string(),
        Some(key) if path != key && !path.ends_with(&format!(".{key}")) => format!("{path}.{key}"),
        _ => path.to_string(),
    }
}

fn violation(field: impl Into<String>, reason: &str) -> PlanError {
    PlanError::SchemaViolation { field: field.into(), reason: reason.to_string() }
}

fn positive(field: String, v: f64) -> Result<(), PlanError> {
    if v.is_finite() && v > 0.0 {
        Ok(())
    } else {
        Err(violation(field, "must be a finite positive number"))
    }
}

/// Check the sign, finiteness and uniqueness rules serde cannot express.
/// Returns the first offending field.
pub fn validate(plan: &InterceptPlan) -> Result<(), PlanError> {
    if plan.summary.trim().is_empty() {
        return Err(violation("summary", "must not be blank"));
    }
    if plan.rocket_count == 0 {
        return Err(violation("rocketCount", "must be a positive integer"));
    }
    if plan.profiles.is_empty() {
        return Err(violation("profiles", "must not be empty when rocketCount > 0"));
    }

    let mut seen: HashSet<&str> = HashSet::new();
    for (i, p) in plan.profiles.iter().enumerate() {
        let at = |name: &str| format!("profiles[{i}].{name}");
        if !seen.insert(p.id.as_str()) {
            return Err(violation(at("id"), "duplicate profile id"));
        }
        if p.count == 0 {
            return Err(violation(at("count"), "must be a positive integer"));
        }
        positive(at("speed"), p.speed)?;
        positive(at("deltaV_kps"), p.delta_v_kps)?;
        positive(at("hitRadius"), p.hit_radius)?;
        if !(p.delay_sec.is_finite() && p.delay_sec >= 0.0) {
            return Err(violation(at("delaySec"), "must be a finite non-negative number"));
        }
    }

    let ps = &plan.post_shatter;
    if !ps.target_radial_dv_kps.is_finite() {
        return Err(violation("postShatter.targetRadial_dv_kps", "must be finite"));
    }
    positive("postShatter.minimumSafePerigee_km".to_string(), ps.minimum_safe_perigee_km)?;

    let total = plan.profile_rockets();
    if total != u64::from(plan.rocket_count) {
        warn!(rocket_count = plan.rocket_count, profile_total = total, "plan rocketCount differs from profile counts");
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::{json, Value};

    fn valid() -> Value {
        json!({
            "summary": "Two waves of kinetic impactors.",
            "rocketCount": 12,
            "profiles": [
                {"id": "wave-A", "count": 8, "speed": 3.25, "deltaV_kps": 1.4, "hitRadius": 0.4, "delaySec": 0.0},
                {"id": "wave-B", "count": 4, "speed": 2.0, "deltaV_kps": 0.9, "hitRadius": 0.35, "delaySec": 12.5}
            ],
            "postShatter": {"targetRadial_dv_kps": 0.6, "minimumSafePerigee_km": 10000.0, "suggestExtraInterceptors": true}
        })
    }

    fn with(mutate: impl FnOnce(&mut Value)) -> String {
        let mut v = valid();
        mutate(&mut v);
        v.to_string()
    }

    fn violated_field(raw: &str) -> String {
        match parse(raw) {
            Err(PlanError::SchemaViolation { field, .. }) => field,
            other => panic!("expected schema violation, got {other:?}"),
        }
    }

    #[test]
    fn conforming_json_round_trips_exactly() {
        let plan = parse(&valid().to_string()).unwrap();
        assert_eq!(plan.rocket_count, 12);
        assert_eq!(plan.profiles[1].delay_sec, 12.5);
        assert_eq!(plan.profiles[0].speed, 3.25);
        assert!(plan.post_shatter.suggest_extra_interceptors);
        assert_eq!(serde_json::to_value(&plan).unwrap(), valid());
    }

    #[test]
    fn whitespace_is_tolerated_but_fences_are_not() {
        assert!(parse(&format!("\n  {}  \n", valid())).is_ok());
        let fenced = format!("```json\n{}\n```", valid());
        assert!(matches!(parse(&fenced), Err(PlanError::MalformedOutput(_))));
    }

    #[test]
    fn non_json_and_truncated_are_malformed() {
        assert!(matches!(parse("Sure! Here is your plan."), Err(PlanError::MalformedOutput(_))));
        let raw = valid().to_string();
        assert!(matches!(parse(&raw[..raw.len() / 2]), Err(PlanError::MalformedOutput(_))));
        assert!(matches!(parse(""), Err(PlanError::MalformedOutput(_))));
    }

    #[test]
    fn missing_keys_name_the_field() {
        let raw = with(|v| {
            v.as_object_mut().unwrap().remove("rocketCount");
        });
        match parse(&raw) {
            Err(PlanError::SchemaViolation { field, reason }) => {
                assert_eq!(field, "rocketCount");
                assert!(reason.contains("missing field"));
            }
            other => panic!("unexpected {other:?}"),
        }

        let raw = with(|v| {
            v["postShatter"].as_object_mut().unwrap().remove("minimumSafePerigee_km");
        });
        assert_eq!(violated_field(&raw), "postShatter.minimumSafePerigee_km");

        let raw = with(|v| {
            v["profiles"][1].as_object_mut().unwrap().remove("hitRadius");
        });
        assert_eq!(violated_field(&raw), "profiles[1].hitRadius");
    }

    #[test]
    fn duplicate_keys_are_rejected_not_merged() {
        let raw = valid().to_string().replacen("\"rocketCount\":12", "\"rocketCount\":0,\"rocketCount\":12", 1);
        assert!(raw.contains("\"rocketCount\":0,"));
        assert_eq!(violated_field(&raw), "rocketCount");
    }

    #[test]
    fn trailing_text_is_malformed() {
        let raw = format!("{} Hope this helps!", valid());
        assert!(matches!(parse(&raw), Err(PlanError::MalformedOutput(_))));
    }

    #[test]
    fn empty_profiles_are_rejected() {
        assert_eq!(violated_field(&with(|v| v["profiles"] = json!([]))), "profiles");
    }

    #[test]
    fn duplicate_ids_are_rejected() {
        assert_eq!(violated_field(&with(|v| v["profiles"][1]["id"] = json!("wave-A"))), "profiles[1].id");
    }

    #[test]
    fn wrong_types_name_the_field() {
        assert_eq!(violated_field(&with(|v| v["profiles"][0]["speed"] = json!("fast"))), "profiles[0].speed");
        assert_eq!(violated_field(&with(|v| v["rocketCount"] = json!(-3))), "rocketCount");
        assert_eq!(violated_field(&with(|v| v["rocketCount"] = json!(2.5))), "rocketCount");
        assert_eq!(
            violated_field(&with(|v| v["postShatter"]["suggestExtraInterceptors"] = json!("no"))),
            "postShatter.suggestExtraInterceptors"
        );
    }

    #[test]
    fn sign_rules_are_enforced_without_clamping() {
        assert_eq!(violated_field(&with(|v| v["rocketCount"] = json!(0))), "rocketCount");
        assert_eq!(violated_field(&with(|v| v["profiles"][0]["count"] = json!(0))), "profiles[0].count");
        assert_eq!(violated_field(&with(|v| v["profiles"][1]["hitRadius"] = json!(0.0))), "profiles[1].hitRadius");
        assert_eq!(violated_field(&with(|v| v["profiles"][0]["delaySec"] = json!(-1))), "profiles[0].delaySec");
        assert_eq!(
            violated_field(&with(|v| v["postShatter"]["minimumSafePerigee_km"] = json!(-100))),
            "postShatter.minimumSafePerigee_km"
        );
    }

    #[test]
    fn negative_radial_dv_is_allowed() {
        let plan = parse(&with(|v| v["postShatter"]["targetRadial_dv_kps"] = json!(-0.2))).unwrap();
        assert_eq!(plan.post_shatter.target_radial_dv_kps, -0.2);
    }

    #[test]
    fn unknown_fields_are_rejected() {
        assert_eq!(violated_field(&with(|v| v["confidence"] = json!(0.9))), "confidence");
        assert_eq!(
            violated_field(&with(|v| v["postShatter"]["debrisModel"] = json!("none"))),
            "postShatter.debrisModel"
        );
    }

    #[test]
    fn blank_summary_is_rejected() {
        assert_eq!(violated_field(&with(|v| v["summary"] = json!("  "))), "summary");
    }

    #[test]
    fn schema_example_is_itself_valid() {
        let raw = serde_json::to_string(&InterceptPlan::example()).unwrap();
        assert_eq!(parse(&raw).unwrap(), InterceptPlan::example());
    }
}
