use serde::{Deserialize, Serialize};

use super::daily_totals::{WorkoutItem, WorkoutSource};
use super::plan_request::Intensity;

/// Minutes assumed for a block the model left untimed or set to zero
pub const DEFAULT_BLOCK_MINUTES: u32 = 10;
/// Rough burn rate used when logging a planned block
pub const CALORIES_PER_MINUTE: f64 = 7.0;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum PlanBlockKind {
    Warmup,
    Strength,
    Metcon,
    Skill,
    Finisher,
    Cooldown,
    Circuit,
    Workout,
}

impl PlanBlockKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            PlanBlockKind::Warmup => "warmup",
            PlanBlockKind::Strength => "strength",
            PlanBlockKind::Metcon => "metcon",
            PlanBlockKind::Skill => "skill",
            PlanBlockKind::Finisher => "finisher",
            PlanBlockKind::Cooldown => "cooldown",
            PlanBlockKind::Circuit => "circuit",
            PlanBlockKind::Workout => "workout",
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanBlock {
    pub kind: PlanBlockKind,
    pub text: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(rename = "loadRx", default, skip_serializing_if = "Option::is_none")]
    pub load_rx: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub equipment: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub scale: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub coach: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PlanDay {
    pub id: String,
    pub title: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub summary: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub focus: Option<Vec<String>>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub tags: Option<Vec<String>>,
    #[serde(default)]
    pub blocks: Vec<PlanBlock>,
}

impl PlanDay {
    /// Expand the day into workout log entries, one per block.
    pub fn workout_items(&self, intensity: &Intensity) -> Vec<WorkoutItem> {
        self.blocks
            .iter()
            .enumerate()
            .map(|(index, block)| {
                let minutes = block
                    .minutes
                    .filter(|m| *m != 0)
                    .unwrap_or(DEFAULT_BLOCK_MINUTES);
                WorkoutItem {
                    activity: format!("{}: {}", block.kind.as_str(), block.text),
                    minutes: Some(minutes),
                    calories_burned: Some((minutes as f64 * CALORIES_PER_MINUTE).round() as i64),
                    intensity: Some(intensity.to_string()),
                    notes: Some(block.coach.clone().unwrap_or_default()),
                    order_index: Some(index as u32),
                    source: Some(WorkoutSource::Plan),
                }
            })
            .collect()
    }
}

/// A generated week as returned to the caller.
///
/// `Unchecked` carries a document that parsed as JSON but did not match the
/// day shape; it is passed through as-is and the caller renders defensively.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(untagged)]
pub enum PlanWeek {
    Days(Vec<PlanDay>),
    Unchecked(serde_json::Value),
}

impl PlanWeek {
    /// Number of top-level entries in the week
    pub fn len(&self) -> usize {
        match self {
            PlanWeek::Days(days) => days.len(),
            PlanWeek::Unchecked(serde_json::Value::Array(items)) => items.len(),
            PlanWeek::Unchecked(_) => 0,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn days(&self) -> Option<&[PlanDay]> {
        match self {
            PlanWeek::Days(days) => Some(days.as_slice()),
            PlanWeek::Unchecked(_) => None,
        }
    }
}

/// A single plan day kept for later reuse
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SavedWorkout {
    pub name: String,
    pub plan: PlanDay,
}

impl SavedWorkout {
    pub fn from_day(day: &PlanDay) -> Self {
        Self {
            name: day.title.clone(),
            plan: day.clone(),
        }
    }
}
