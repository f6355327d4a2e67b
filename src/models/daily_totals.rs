use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FoodItem {
    pub name: String,
    pub calories: i64,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WorkoutSource {
    Plan,
    Manual,
}

#[derive(Debug, Clone, PartialEq, Default, Serialize, Deserialize)]
pub struct WorkoutItem {
    pub activity: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub minutes: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub calories_burned: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub intensity: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub order_index: Option<u32>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<WorkoutSource>,
}

/// Daily nutrition targets
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Targets {
    pub calories: i64,
    pub protein: i64,
    pub carbs: i64,
    pub fat: i64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub label: Option<String>,
}

impl Default for Targets {
    fn default() -> Self {
        Self {
            calories: 2000,
            protein: 150,
            carbs: 200,
            fat: 65,
            label: None,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DayTotals {
    pub food_cals: i64,
    pub workout_cals: i64,
    pub allowance: i64,
    pub remaining: i64,
}

impl DayTotals {
    /// Burned calories raise the day's allowance; remaining goes negative
    /// once intake exceeds it.
    pub fn calculate(targets: &Targets, foods: &[FoodItem], workouts: &[WorkoutItem]) -> Self {
        let food_cals = foods.iter().map(|f| f.calories).sum::<i64>();
        let workout_cals = workouts
            .iter()
            .map(|w| w.calories_burned.unwrap_or(0))
            .sum::<i64>();
        let allowance = targets.calories + workout_cals;

        Self {
            food_cals,
            workout_cals,
            allowance,
            remaining: allowance - food_cals,
        }
    }
}
