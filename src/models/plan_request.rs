use serde::{Deserialize, Deserializer, Serialize};
use std::fmt;

/// Declares a string-backed enum with a set of known values and a
/// `Custom` fallback, so unrecognised values pass through verbatim.
macro_rules! passthrough_enum {
    (
        $(#[$meta:meta])*
        pub enum $name:ident {
            $($variant:ident => $value:literal),+ $(,)?
        }
    ) => {
        $(#[$meta])*
        #[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
        #[serde(from = "String", into = "String")]
        pub enum $name {
            $($variant,)+
            Custom(String),
        }

        impl $name {
            pub fn as_str(&self) -> &str {
                match self {
                    $($name::$variant => $value,)+
                    $name::Custom(value) => value,
                }
            }
        }

        impl From<String> for $name {
            fn from(value: String) -> Self {
                match value.as_str() {
                    $($value => $name::$variant,)+
                    _ => $name::Custom(value),
                }
            }
        }

        impl From<&str> for $name {
            fn from(value: &str) -> Self {
                $name::from(value.to_string())
            }
        }

        impl From<$name> for String {
            fn from(value: $name) -> Self {
                value.as_str().to_string()
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }
    };
}

passthrough_enum! {
    /// Body-composition goal driving the plan
    pub enum Goal {
        Cut => "cut",
        Lean => "lean",
        Bulk => "bulk",
        Recomp => "recomp",
    }
}

passthrough_enum! {
    pub enum TrainingStyle {
        Strength => "strength",
        Hybrid => "hybrid",
        Bodyweight => "bodyweight",
        Cardio => "cardio",
        Crossfit => "crossfit",
        Emom => "emom",
        Tabata => "tabata",
        Interval => "interval",
        Conditioning => "conditioning",
        Finisher => "finisher",
        Mobility => "mobility",
        Skill => "skill",
        Circuit => "circuit",
    }
}

passthrough_enum! {
    pub enum Intensity {
        Low => "low",
        Moderate => "moderate",
        High => "high",
    }
}

passthrough_enum! {
    pub enum ExperienceLevel {
        Beginner => "beginner",
        Intermediate => "intermediate",
        Advanced => "advanced",
    }
}

/// Plan request exactly as received from the caller. Every field is optional
/// and nothing here is trusted until it has gone through validation.
#[derive(Debug, Clone, Default, Deserialize)]
#[serde(default)]
pub struct RawPlanRequest {
    #[serde(deserialize_with = "lenient_number")]
    pub minutes: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub days: Option<f64>,
    pub goal: Option<String>,
    pub style: Option<String>,
    pub intensity: Option<String>,
    pub experience: Option<String>,
    pub focus: Option<Vec<String>>,
    pub equipment: Option<Vec<String>>,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum NumberOrText {
    Number(f64),
    Text(String),
}

/// Web forms send numbers as strings; text that isn't a number is treated as absent.
fn lenient_number<'de, D>(deserializer: D) -> Result<Option<f64>, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Option::<NumberOrText>::deserialize(deserializer)? {
        Some(NumberOrText::Number(n)) => Some(n),
        Some(NumberOrText::Text(text)) => text.trim().parse().ok(),
        None => None,
    })
}

/// Fully populated, bounded plan request
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct PlanRequest {
    pub minutes: u32,
    pub days: u32,
    pub goal: Goal,
    pub style: TrainingStyle,
    pub intensity: Intensity,
    pub experience: ExperienceLevel,
    pub focus: Vec<String>,
    pub equipment: Vec<String>,
}

impl Default for PlanRequest {
    fn default() -> Self {
        Self {
            minutes: 40,
            days: 3,
            goal: Goal::Recomp,
            style: TrainingStyle::Hybrid,
            intensity: Intensity::Moderate,
            experience: ExperienceLevel::Intermediate,
            focus: Vec::new(),
            equipment: Vec::new(),
        }
    }
}
