use super::plan_request::{PlanRequest, RawPlanRequest};

pub const MIN_SESSION_MINUTES: u32 = 20;
pub const MAX_SESSION_MINUTES: u32 = 90;
pub const DEFAULT_SESSION_MINUTES: u32 = 40;

pub const MIN_DAYS_PER_WEEK: u32 = 2;
pub const MAX_DAYS_PER_WEEK: u32 = 10;
pub const DEFAULT_DAYS_PER_WEEK: u32 = 3;

/// Normalize a raw request into a bounded one.
///
/// Never fails: absent, zero or blank values fall back to defaults and
/// numeric values are clamped into range.
pub fn validate_plan_request(raw: RawPlanRequest) -> PlanRequest {
    let defaults = PlanRequest::default();

    PlanRequest {
        minutes: clamp_or_default(
            raw.minutes,
            DEFAULT_SESSION_MINUTES,
            MIN_SESSION_MINUTES,
            MAX_SESSION_MINUTES,
        ),
        days: clamp_or_default(
            raw.days,
            DEFAULT_DAYS_PER_WEEK,
            MIN_DAYS_PER_WEEK,
            MAX_DAYS_PER_WEEK,
        ),
        goal: non_blank(raw.goal).map(Into::into).unwrap_or(defaults.goal),
        style: non_blank(raw.style).map(Into::into).unwrap_or(defaults.style),
        intensity: non_blank(raw.intensity)
            .map(Into::into)
            .unwrap_or(defaults.intensity),
        experience: non_blank(raw.experience)
            .map(Into::into)
            .unwrap_or(defaults.experience),
        focus: raw.focus.unwrap_or_default(),
        equipment: raw.equipment.unwrap_or_default(),
    }
}

/// Zero counts as absent, matching how the web client has always sent
/// unset numeric inputs.
pub fn clamp_or_default(value: Option<f64>, default: u32, min: u32, max: u32) -> u32 {
    match value {
        Some(v) if v != 0.0 && v.is_finite() => v.clamp(min as f64, max as f64).round() as u32,
        _ => default,
    }
}

fn non_blank(value: Option<String>) -> Option<String> {
    value.filter(|v| !v.is_empty())
}
