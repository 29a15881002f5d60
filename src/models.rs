use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;

/// One upstream activity. Fields that are missing, `null` or of an
/// unexpected JSON type deserialize to empty values instead of failing.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, Default)]
#[serde(default)]
pub struct Activity {
    #[serde(deserialize_with = "lenient_text")]
    pub activity: String,
    #[serde(rename = "type", deserialize_with = "lenient_text")]
    pub kind: String,
    #[serde(deserialize_with = "lenient_count")]
    pub participants: Option<i64>,
    #[serde(deserialize_with = "lenient_number")]
    pub price: Option<f64>,
    #[serde(deserialize_with = "lenient_number")]
    pub accessibility: Option<f64>,
}

/// A single upstream object. The API reports problems in-band through `error`.
#[derive(Debug, Clone, Deserialize, Default)]
pub struct ActivityRecord {
    #[serde(flatten)]
    pub activity: Activity,
    #[serde(default, deserialize_with = "lenient_optional_text")]
    pub error: Option<String>,
}

#[derive(Debug, Clone, Deserialize)]
#[serde(untagged)]
pub enum UpstreamBody {
    List(#[serde(deserialize_with = "lenient_list")] Vec<Activity>),
    Single(ActivityRecord),
}

fn text_of(value: Value) -> Option<String> {
    match value {
        Value::String(text) => Some(text),
        Value::Number(number) => Some(number.to_string()),
        Value::Bool(flag) => Some(flag.to_string()),
        _ => None,
    }
}

fn number_of(value: &Value) -> Option<f64> {
    match value {
        Value::Number(number) => number.as_f64(),
        Value::String(text) => text.trim().parse().ok(),
        _ => None,
    }
}

fn lenient_text<'de, D: Deserializer<'de>>(deserializer: D) -> Result<String, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?).unwrap_or_default())
}

fn lenient_optional_text<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<Option<String>, D::Error> {
    Ok(text_of(Value::deserialize(deserializer)?))
}

fn lenient_number<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<f64>, D::Error> {
    Ok(number_of(&Value::deserialize(deserializer)?).filter(|n| n.is_finite()))
}

/// Whole numbers only; `1.0` counts as 1.
fn lenient_count<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Option<i64>, D::Error> {
    let value = Value::deserialize(deserializer)?;
    if let Some(count) = value.as_i64() {
        return Ok(Some(count));
    }
    Ok(number_of(&value)
        .filter(|n| n.is_finite() && n.fract() == 0.0)
        .map(|n| n as i64))
}

/// Entries that are not objects become blank activities so the rest of the
/// list still renders.
fn lenient_list<'de, D: Deserializer<'de>>(deserializer: D) -> Result<Vec<Activity>, D::Error> {
    let items = Vec::<Value>::deserialize(deserializer)?;
    Ok(items
        .into_iter()
        .map(|item| serde_json::from_value(item).unwrap_or_default())
        .collect())
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ResponseMode {
    #[default]
    List,
    Single,
}

impl ResponseMode {
    pub fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "list" => Some(Self::List),
            "single" => Some(Self::Single),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum CategoryResult {
    One(Activity),
    Many(Vec<Activity>),
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct ActivityCard {
    pub type_label: String,
    pub participants: String,
    pub title: String,
    pub description: String,
    pub price: String,
    pub accessibility: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub animation_delay: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "lowercase")]
pub enum RenderedView {
    Single { card: ActivityCard },
    List { heading: String, cards: Vec<ActivityCard> },
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "state", rename_all = "lowercase")]
pub enum ViewState {
    Idle,
    Loading,
    Success {
        view: RenderedView,
    },
    Error {
        message: String,
    },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Selection {
    Selected(String),
    Cleared,
}

#[derive(Debug, Serialize)]
pub struct UiSnapshot {
    pub view: ViewState,
    pub current_category: Option<String>,
}
