//! Validation and normalization of client-supplied physical parameters.
//!
//! Requests arrive as untyped JSON. Numbers may be sent either as JSON numbers
//! or as numeric strings; anything else (booleans, arrays, non-finite values)
//! is rejected rather than guessed at.

use serde_json::{Map, Value};

use crate::errors::ValidationError;

pub const DEFAULT_MASS_KG: f64 = 1e12;
pub const DEFAULT_REL_SPEED_KPS: f64 = 8.0;

/// An optional request field that keeps "absent" apart from "explicitly null".
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Tristate {
    Absent,
    Null,
    Present(f64),
}

impl Tristate {
    pub fn value(self) -> Option<f64> {
        match self {
            Tristate::Present(v) => Some(v),
            Tristate::Absent | Tristate::Null => None,
        }
    }
}

/// Impact-prediction input: where and how heavy.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImpactQuery {
    pub lat: f64,
    pub lon: f64,
    pub mass_kg: f64,
}

/// Interception-planning input with defaults applied.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct InterceptRequest {
    pub mass_kg: f64,
    pub rel_speed_kps: f64,
    pub diameter_m: Tristate,
    pub density_kg_m3: Tristate,
}

impl Default for InterceptRequest {
    fn default() -> Self {
        Self {
            mass_kg: DEFAULT_MASS_KG,
            rel_speed_kps: DEFAULT_REL_SPEED_KPS,
            diameter_m: Tristate::Absent,
            density_kg_m3: Tristate::Absent,
        }
    }
}

fn coerce_number(v: &Value) -> Option<f64> {
    let n = match v {
        Value::Number(n) => n.as_f64(),
        Value::String(s) => s.trim().parse::<f64>().ok(),
        _ => None,
    };
    n.filter(|x| x.is_finite())
}

fn required_number(obj: &Map<String, Value>, field: &'static str) -> Result<f64, ValidationError> {
    coerce_number(&obj[field]).ok_or(ValidationError::InvalidNumber(field))
}

fn optional_number(obj: &Map<String, Value>, field: &'static str) -> Result<Tristate, ValidationError> {
    match obj.get(field) {
        None => Ok(Tristate::Absent),
        Some(Value::Null) => Ok(Tristate::Null),
        Some(v) => coerce_number(v)
            .map(Tristate::Present)
            .ok_or(ValidationError::InvalidNumericInput(field)),
    }
}

fn defaulted_number(obj: &Map<String, Value>, field: &'static str, default: f64) -> Result<f64, ValidationError> {
    match obj.get(field) {
        None => Ok(default),
        Some(v) => coerce_number(v).ok_or(ValidationError::InvalidNumericInput(field)),
    }
}

/// Validate `{lat, lon, mass_kg}` for the impact-prediction path.
///
/// Presence of every field is checked before any value is parsed, so a body
/// missing `mass_kg` reports that even when `lat` is also malformed.
pub fn validate_impact(body: &Value) -> Result<ImpactQuery, ValidationError> {
    let obj = body
        .as_object()
        .filter(|o| !o.is_empty())
        .ok_or(ValidationError::NotAnObject)?;

    const REQUIRED: [&str; 3] = ["lat", "lon", "mass_kg"];
    if let Some(missing) = REQUIRED.iter().find(|f| !obj.contains_key(**f)) {
        return Err(ValidationError::MissingField(*missing));
    }

    let lat = required_number(obj, "lat")?;
    let lon = required_number(obj, "lon")?;
    let mass_kg = required_number(obj, "mass_kg")?;

    if !(-90.0..=90.0).contains(&lat) {
        return Err(ValidationError::OutOfRange {
            field: "lat",
            message: "Latitude must be between -90 and 90",
        });
    }
    if !(-180.0..=180.0).contains(&lon) {
        return Err(ValidationError::OutOfRange {
            field: "lon",
            message: "Longitude must be between -180 and 180",
        });
    }
    if mass_kg <= 0.0 {
        return Err(ValidationError::OutOfRange {
            field: "mass_kg",
            message: "Mass must be positive",
        });
    }

    Ok(ImpactQuery { lat, lon, mass_kg })
}

/// Validate the interception-planning body. Every field is optional; only
/// type-correctness of present values is enforced.
pub fn validate_intercept(body: &Value) -> Result<InterceptRequest, ValidationError> {
    let empty = Map::new();
    let obj = match body {
        Value::Null => &empty,
        Value::Object(o) => o,
        _ => return Err(ValidationError::NotAnObject),
    };

    Ok(InterceptRequest {
        mass_kg: defaulted_number(obj, "massKg", DEFAULT_MASS_KG)?,
        rel_speed_kps: defaulted_number(obj, "relSpeedKps", DEFAULT_REL_SPEED_KPS)?,
        diameter_m: optional_number(obj, "diameterM")?,
        density_kg_m3: optional_number(obj, "densityKgM3")?,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn accepts_bounds_inclusive() {
        for (lat, lon) in [(-90.0, -180.0), (90.0, 180.0), (0.0, 0.0), (40.7128, -74.006)] {
            let q = validate_impact(&json!({"lat": lat, "lon": lon, "mass_kg": 1.0})).unwrap();
            assert_eq!(q.lat, lat);
            assert_eq!(q.lon, lon);
        }
    }

    #[test]
    fn rejects_out_of_range_values() {
        let cases = [
            (json!({"lat": 200, "lon": 0, "mass_kg": 10}), "lat"),
            (json!({"lat": -90.0001, "lon": 0, "mass_kg": 10}), "lat"),
            (json!({"lat": 0, "lon": 180.5, "mass_kg": 10}), "lon"),
            (json!({"lat": 0, "lon": 0, "mass_kg": 0}), "mass_kg"),
            (json!({"lat": 0, "lon": 0, "mass_kg": -5}), "mass_kg"),
        ];
        for (body, field) in cases {
            let err = validate_impact(&body).unwrap_err();
            assert!(matches!(err, ValidationError::OutOfRange { .. }), "{body}");
            assert_eq!(err.field(), Some(field));
        }
    }

    #[test]
    fn latitude_message_matches_client_contract() {
        let err = validate_impact(&json!({"lat": 200, "lon": 0, "mass_kg": 10})).unwrap_err();
        assert_eq!(err.to_string(), "Latitude must be between -90 and 90");
    }

    #[test]
    fn missing_field_is_named_exactly() {
        let full = json!({"lat": 1, "lon": 2, "mass_kg": 3});
        for field in ["lat", "lon", "mass_kg"] {
            let mut body = full.clone();
            body.as_object_mut().unwrap().remove(field);
            assert_eq!(validate_impact(&body), Err(ValidationError::MissingField(field)));
        }
    }

    #[test]
    fn missing_is_reported_before_invalid() {
        let err = validate_impact(&json!({"lat": "north", "lon": 2})).unwrap_err();
        assert_eq!(err, ValidationError::MissingField("mass_kg"));
    }

    #[test]
    fn numeric_strings_are_coerced_and_junk_rejected() {
        let q = validate_impact(&json!({"lat": " 12.5 ", "lon": "-3", "mass_kg": "1e6"})).unwrap();
        assert_eq!(q, ImpactQuery { lat: 12.5, lon: -3.0, mass_kg: 1e6 });

        for bad in [json!("abc"), json!(true), json!(null), json!([1]), json!("NaN"), json!("inf")] {
            let err = validate_impact(&json!({"lat": bad, "lon": 0, "mass_kg": 1})).unwrap_err();
            assert_eq!(err, ValidationError::InvalidNumber("lat"));
        }
    }

    #[test]
    fn empty_or_non_object_body_is_rejected() {
        assert_eq!(validate_impact(&json!({})), Err(ValidationError::NotAnObject));
        assert_eq!(validate_impact(&json!([1, 2])), Err(ValidationError::NotAnObject));
        assert_eq!(validate_impact(&Value::Null), Err(ValidationError::NotAnObject));
    }

    #[test]
    fn intercept_defaults_apply_when_absent() {
        let r = validate_intercept(&json!({})).unwrap();
        assert_eq!(r, InterceptRequest::default());
        assert_eq!(r.mass_kg, 1e12);
        assert_eq!(r.rel_speed_kps, 8.0);
        assert_eq!(validate_intercept(&Value::Null).unwrap(), InterceptRequest::default());
    }

    #[test]
    fn intercept_optionals_keep_absent_null_and_zero_apart() {
        let r = validate_intercept(&json!({"diameterM": null, "densityKgM3": 0})).unwrap();
        assert_eq!(r.diameter_m, Tristate::Null);
        assert_eq!(r.density_kg_m3, Tristate::Present(0.0));
        assert_eq!(r.diameter_m.value(), None);
        assert_eq!(r.density_kg_m3.value(), Some(0.0));

        let r = validate_intercept(&json!({"massKg": 5e9})).unwrap();
        assert_eq!(r.diameter_m, Tristate::Absent);
        assert_eq!(r.mass_kg, 5e9);
    }

    #[test]
    fn intercept_rejects_wrong_types_when_present() {
        assert_eq!(
            validate_intercept(&json!({"massKg": null})),
            Err(ValidationError::InvalidNumericInput("massKg"))
        );
        assert_eq!(
            validate_intercept(&json!({"relSpeedKps": "fast"})),
            Err(ValidationError::InvalidNumericInput("relSpeedKps"))
        );
        assert_eq!(
            validate_intercept(&json!({"diameterM": {"m": 3}})),
            Err(ValidationError::InvalidNumericInput("diameterM"))
        );
        assert_eq!(validate_intercept(&json!("x")), Err(ValidationError::NotAnObject));
    }
}
