use serde::Serialize;

use super::plan::PlanWeek;

/// Response body returned to the presentation layer
#[derive(Debug, Clone, Serialize)]
pub struct PlanEnvelope {
    pub success: bool,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<WeekData>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct WeekData {
    pub week: PlanWeek,
}

impl PlanEnvelope {
    pub fn success(week: PlanWeek) -> Self {
        Self {
            success: true,
            data: Some(WeekData { week }),
            error: None,
        }
    }

    pub fn failure(error: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(error.into()),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_failure_has_no_data() {
        let value = serde_json::to_value(PlanEnvelope::failure("Request timeout - please try again")).unwrap();

        assert_eq!(
            value,
            json!({"success": false, "error": "Request timeout - please try again"})
        );
    }

    #[test]
    fn test_success_wraps_week() {
        let week = PlanWeek::Unchecked(json!([{"title": "Day 1"}]));
        let value = serde_json::to_value(PlanEnvelope::success(week)).unwrap();

        assert_eq!(value, json!({"success": true, "data": {"week": [{"title": "Day 1"}]}}));
    }
}
