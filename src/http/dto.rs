//! Response shapes that exist only at the HTTP boundary.

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct HealthResponse {
    pub nasa_api: String,
    pub ai_api: String,
    pub status: String,
    pub timestamp: String,
}

pub fn availability(configured: bool) -> String {
    if configured { "available" } else { "missing_key" }.to_string()
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ImpactExample {
    pub lat: f64,
    pub lon: f64,
    pub mass_kg: f64,
    pub description: String,
}

/// Named demo scenarios clients can feed to `/api/ai/predict-impact`.
pub fn impact_examples() -> BTreeMap<&'static str, ImpactExample> {
    let example = |lat, lon, mass_kg, description: &str| ImpactExample {
        lat,
        lon,
        mass_kg,
        description: description.to_string(),
    };
    BTreeMap::from([
        (
            "small_city_impact",
            example(40.7128, -74.0060, 1_000_000.0, "1M kg asteroid over New York"),
        ),
        (
            "large_ocean_impact",
            example(34.0522, -118.2437, 50_000_000.0, "50M kg asteroid near Los Angeles (potential tsunami)"),
        ),
        (
            "rural_impact",
            example(39.7392, -104.9903, 500_000.0, "500K kg asteroid over Denver (low population)"),
        ),
    ])
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::input::validate_impact;

    #[test]
    fn every_example_passes_validation() {
        for (name, ex) in impact_examples() {
            let body = serde_json::to_value(&ex).unwrap();
            assert!(validate_impact(&body).is_ok(), "{name}");
        }
    }
}
