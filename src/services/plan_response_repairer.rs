use std::collections::HashSet;

use serde::Deserialize;
use serde_json::Value;
use tracing::{debug, warn};

use super::plan_error::PlanError;
use crate::models::{PlanDay, PlanWeek};

const FENCE: &str = "```";

/// Narrows a model reply towards the JSON document inside it.
type WrapperStripper = fn(&str) -> &str;

/// Applied in order. New wrapper conventions get a stripper here and
/// nothing else changes.
const WRAPPER_STRIPPERS: &[WrapperStripper] = &[str::trim, strip_code_fence];

/// Turn a model reply into a plan week.
///
/// Fails only when nothing parseable remains after unwrapping. A document
/// that parses but does not look like a list of days is passed through as
/// [`PlanWeek::Unchecked`] with a warning.
pub fn repair_plan_reply(reply: &str, expected_days: u32) -> Result<PlanWeek, PlanError> {
    let candidate = strip_wrappers(reply);

    let document: Value = serde_json::from_str(candidate).map_err(|e| {
        warn!(error = %e, raw = %reply, "Model reply is not valid JSON");
        PlanError::MalformedResponse {
            raw: reply.to_string(),
        }
    })?;

    Ok(check_shape(document, expected_days))
}

pub fn strip_wrappers(reply: &str) -> &str {
    WRAPPER_STRIPPERS
        .iter()
        .fold(reply, |text, strip| strip(text))
}

/// Removes markdown code fences, tagged (```json) or bare, including a fenced
/// block surrounded by prose. Text without fences is returned trimmed.
fn strip_code_fence(text: &str) -> &str {
    let text = text.trim();

    match text.find(FENCE) {
        None => text,
        // lone closing fence at the very end
        Some(open) if open + FENCE.len() == text.len() => text[..open].trim_end(),
        Some(open) => {
            let body = skip_language_tag(&text[open + FENCE.len()..]);
            match body.find(FENCE) {
                Some(close) => body[..close].trim(),
                None => body.trim(),
            }
        }
    }
}

fn skip_language_tag(text: &str) -> &str {
    text.trim_start_matches(|c: char| c.is_ascii_alphanumeric() || matches!(c, '-' | '_' | '+'))
}

fn check_shape(document: Value, expected_days: u32) -> PlanWeek {
    match Vec::<PlanDay>::deserialize(&document) {
        Ok(days) => {
            if days.len() != expected_days as usize {
                warn!(
                    expected = expected_days,
                    received = days.len(),
                    "Model returned a different number of days than requested"
                );
            }
            for day in days.iter().filter(|day| day.blocks.is_empty()) {
                warn!(day_id = %day.id, "Plan day has no blocks");
            }
            for day_id in duplicate_day_ids(&days) {
                warn!(day_id = %day_id, "Plan day id is not unique");
            }
            debug!(days = days.len(), "Parsed plan week");
            PlanWeek::Days(days)
        }
        Err(e) => {
            warn!(error = %e, "Plan reply does not match the expected day shape, passing it through");
            PlanWeek::Unchecked(document)
        }
    }
}

/// Ids that appear more than once, each reported once in first-seen order
fn duplicate_day_ids(days: &[PlanDay]) -> Vec<&str> {
    let mut seen = HashSet::new();
    let mut duplicates = Vec::new();
    for day in days {
        if !seen.insert(day.id.as_str()) && !duplicates.contains(&day.id.as_str()) {
            duplicates.push(day.id.as_str());
        }
    }
    duplicates
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::PlanBlockKind;
    use assert_matches::assert_matches;
    use pretty_assertions::assert_eq;

    const THREE_DAYS: &str = r#"[
        {"id": "d1", "title": "Day 1: Push", "summary": "Upper push", "minutes": 40,
         "focus": ["chest"], "tags": ["strength"],
         "blocks": [{"kind": "warmup", "text": "Arm circles", "minutes": 5},
                    {"kind": "strength", "text": "Bench 5x5", "minutes": 25, "loadRx": "75% 1RM",
                     "equipment": ["barbell", "bench"], "scale": "Use dumbbells", "coach": "Control the descent"}]},
        {"id": "d2", "title": "Day 2: Conditioning",
         "blocks": [{"kind": "metcon", "text": "AMRAP 12"}]},
        {"id": "d3", "title": "Day 3: Mobility",
         "blocks": [{"kind": "cooldown", "text": "Hip openers", "minutes": 15}]}
    ]"#;

    fn expect_days(week: PlanWeek) -> Vec<PlanDay> {
        match week {
            PlanWeek::Days(days) => days,
            PlanWeek::Unchecked(value) => panic!("expected typed days, got {value}"),
        }
    }

    #[test]
    fn test_tagged_fence() {
        let reply = format!("```json\n{THREE_DAYS}\n```");
        let days = expect_days(repair_plan_reply(&reply, 3).unwrap());

        assert_eq!(days.len(), 3);
        assert_eq!(days[0].id, "d1");
        assert_eq!(days[0].title, "Day 1: Push");
        assert_eq!(days[0].summary.as_deref(), Some("Upper push"));
        assert_eq!(days[0].minutes, Some(40));
        assert_eq!(days[0].focus, Some(vec!["chest".to_string()]));

        let bench = &days[0].blocks[1];
        assert_eq!(bench.kind, PlanBlockKind::Strength);
        assert_eq!(bench.text, "Bench 5x5");
        assert_eq!(bench.load_rx.as_deref(), Some("75% 1RM"));
        assert_eq!(
            bench.equipment,
            Some(vec!["barbell".to_string(), "bench".to_string()])
        );
        assert_eq!(bench.scale.as_deref(), Some("Use dumbbells"));
        assert_eq!(bench.coach.as_deref(), Some("Control the descent"));
    }

    #[test]
    fn test_bare_fence() {
        let reply = format!("```\n{THREE_DAYS}\n```\n");
        let days = expect_days(repair_plan_reply(&reply, 3).unwrap());

        assert_eq!(days.len(), 3);
        assert_eq!(days[2].title, "Day 3: Mobility");
    }

    #[test]
    fn test_uppercase_tag_and_inline_fence() {
        assert_eq!(strip_wrappers("```JSON\n[1, 2]\n```"), "[1, 2]");
        assert_eq!(strip_wrappers("```[1, 2]```"), "[1, 2]");
    }

    #[test]
    fn test_unfenced_reply() {
        let days = expect_days(repair_plan_reply(THREE_DAYS, 3).unwrap());
        assert_eq!(days.len(), 3);
    }

    #[test]
    fn test_fence_surrounded_by_prose() {
        let reply = format!("Here is your plan:\n\n```json\n{THREE_DAYS}\n```\n\nStay consistent!");
        let days = expect_days(repair_plan_reply(&reply, 3).unwrap());

        assert_eq!(days.len(), 3);
    }

    #[test]
    fn test_unbalanced_fences() {
        assert_eq!(strip_wrappers("```json\n[{\"a\": 1}]"), "[{\"a\": 1}]");
        assert_eq!(strip_wrappers("[{\"a\": 1}]\n```"), "[{\"a\": 1}]");
    }

    #[test]
    fn test_invalid_json_is_malformed() {
        let reply = "```json\n[{\"id\": \"d1\", \"title\": \n```";
        let result = repair_plan_reply(reply, 3);

        assert_matches!(result, Err(PlanError::MalformedResponse { raw }) if raw == reply);
    }

    #[test]
    fn test_prose_only_is_malformed() {
        let result = repair_plan_reply("I'm sorry, I can't help with that.", 3);

        assert_matches!(result, Err(PlanError::MalformedResponse { .. }));
    }

    #[test]
    fn test_wrong_shape_passes_through() {
        let reply = r#"{"week": [{"title": "Day 1"}]}"#;
        let week = repair_plan_reply(reply, 3).unwrap();

        assert_matches!(&week, PlanWeek::Unchecked(value) if value["week"][0]["title"] == "Day 1");
    }

    #[test]
    fn test_days_missing_blocks_are_kept() {
        let reply = r#"[{"id": "d1", "title": "Rest"}, {"id": "d2", "title": "Walk"}]"#;
        let days = expect_days(repair_plan_reply(reply, 3).unwrap());

        assert_eq!(days.len(), 2);
        assert!(days.iter().all(|d| d.blocks.is_empty()));
    }

    #[test]
    fn test_unknown_block_kind_passes_through_unchecked() {
        let reply = r#"[{"id": "d1", "title": "Day 1", "blocks": [{"kind": "rest", "text": "Nap"}]}]"#;
        let week = repair_plan_reply(reply, 1).unwrap();

        assert_matches!(&week, PlanWeek::Unchecked(_));
        assert_eq!(week.len(), 1);
    }

    #[test]
    fn test_duplicate_day_ids_are_reported_but_kept() {
        let reply = r#"[{"id": "d1", "title": "A"}, {"id": "d1", "title": "B"},
                        {"id": "d2", "title": "C"}, {"id": "d1", "title": "D"}]"#;
        let days = expect_days(repair_plan_reply(reply, 4).unwrap());

        assert_eq!(days.len(), 4);
        assert_eq!(duplicate_day_ids(&days), vec!["d1"]);
    }

    #[test]
    fn test_unique_day_ids_report_nothing() {
        let days = expect_days(repair_plan_reply(THREE_DAYS, 3).unwrap());
        assert!(duplicate_day_ids(&days).is_empty());
    }
}
