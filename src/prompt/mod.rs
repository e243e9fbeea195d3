use crate::input::{ImpactQuery, InterceptRequest, Tristate};
use crate::wire::{Decoding, InterceptPlan, Instruction};

pub const PLAN_DECODING: Decoding = Decoding { temperature: 0.2, max_tokens: 800 };
pub const NARRATIVE_DECODING: Decoding = Decoding { temperature: 0.3, max_tokens: 1200 };

const NOT_PROVIDED: &str = "not provided";

pub fn system_prompt_plan() -> String {
    "You are an expert in asteroid interception. \
Return ONLY valid JSON that strictly matches the requested schema. \
All numeric values must be realistic and in the requested units."
        .to_string()
}

pub fn system_prompt_impact() -> String {
    "You are an expert in asteroid impacts. Return only concise, numerical estimates.".to_string()
}

/// Pretty-printed example of the exact plan shape the model must return.
pub fn schema_example() -> String {
    serde_json::to_string_pretty(&InterceptPlan::example())
        .unwrap_or_else(|_| "<schema-example-unavailable>".to_string())
}

fn optional_value(v: Tristate) -> String {
    match v.value() {
        Some(x) => x.to_string(),
        None => NOT_PROVIDED.to_string(),
    }
}

/// `1000000` -> `1,000,000`; fractional digits are kept as-is.
fn group_thousands(v: f64) -> String {
    let plain = v.abs().to_string();
    let (int_part, frac_part) = match plain.split_once('.') {
        Some((i, f)) => (i, Some(f)),
        None => (plain.as_str(), None),
    };

    let mut out = String::with_capacity(plain.len() + int_part.len() / 3 + 1);
    if v < 0.0 {
        out.push('-');
    }
    for (i, ch) in int_part.chars().enumerate() {
        if i > 0 && (int_part.len() - i) % 3 == 0 {
            out.push(',');
        }
        out.push(ch);
    }
    if let Some(f) = frac_part {
        out.push('.');
        out.push_str(f);
    }
    out
}

pub fn user_prompt_plan(req: &InterceptRequest) -> String {
    format!(
"Given:
- Asteroid mass (kg): {mass:.6e}
- Relative speed to Earth (km/s): {speed:.3}
- Diameter (m): {diameter}
- Density (kg/m^3): {density}

Task:
1) Estimate the required number of interceptors (rocketCount) and group them into launch profiles, each with a unique id, a count and a baseline guidance speed in SCENE UNITS per second (for client visualization).
2) Provide the required interceptor delta-v per profile (deltaV_kps, km/s).
3) Provide a hit radius per profile (hitRadius, scene units) and a launch delay (delaySec, seconds), where 0 = launch all at once.
4) Provide post-shatter recommendations (postShatter): radial delta-v outward in km/s to push debris away from Earth (targetRadial_dv_kps), a minimum safe debris perigee in km (minimumSafePerigee_km), and whether an extra cleanup sweep is recommended (suggestExtraInterceptors).

Rules:
- counts are positive integers; speed, deltaV_kps, hitRadius and minimumSafePerigee_km are positive; delaySec is zero or positive.
- Use exactly the field names below. Do not add fields.
- No markdown, no prose, no code fences.

Return ONLY JSON that strictly matches the following format:
{schema}",
        mass = req.mass_kg,
        speed = req.rel_speed_kps,
        diameter = optional_value(req.diameter_m),
        density = optional_value(req.density_kg_m3),
        schema = schema_example(),
    )
}

pub fn user_prompt_impact(q: &ImpactQuery) -> String {
    format!(
"ASTEROID IMPACT PREDICTION:

IMPACT PARAMETERS:
- Latitude (degrees): {lat}
- Longitude (degrees): {lon}
- Asteroid Mass: {mass} kg

Provide detailed analysis with numerical estimates for:

1. POPULATION RISK:
   - Estimated casualties
   - Evacuation radius
   - Risk level

2. ECONOMIC COSTS:
   - Damage estimate (USD)
   - Reconstruction cost
   - Time to rebuild

3. IMPACT TIMELINE:
   - When impact would occur
   - Warning time
   - Evacuation timeline

4. TSUNAMI ANALYSIS:
   - Wave height (if ocean impact)
   - Coastal flooding
   - Tsunami warning time

5. ENVIRONMENTAL IMPACT:
   - Crater size
   - Atmospheric effects
   - Long-term consequences

6. EMERGENCY RESPONSE:
   - Immediate actions
   - Evacuation plans
   - Resource requirements

Be specific and provide numbers.",
        lat = q.lat,
        lon = q.lon,
        mass = group_thousands(q.mass_kg),
    )
}

pub fn plan_instruction(req: &InterceptRequest) -> Instruction {
    Instruction { system: system_prompt_plan(), user: user_prompt_plan(req) }
}

pub fn impact_instruction(q: &ImpactQuery) -> Instruction {
    Instruction { system: system_prompt_impact(), user: user_prompt_impact(q) }
}
