use serde::{Deserialize, Deserializer, Serialize};
use serde_json::Value;
use utoipa::ToSchema;

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateLearningInput {
    #[serde(default, deserialize_with = "scalar_text")]
    pub topic: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub category: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub source: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CreateAppliedSkillInput {
    #[serde(rename = "type", default, deserialize_with = "scalar_text")]
    pub skill_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub notes: Option<String>,
    #[serde(alias = "appliedAction", default, deserialize_with = "scalar_text")]
    pub applied_action: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct UpdateAppliedSkillInput {
    #[serde(rename = "type", default, deserialize_with = "scalar_text")]
    pub skill_type: Option<String>,
    #[serde(default, deserialize_with = "scalar_text")]
    pub notes: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct DeleteOutcome {
    pub success: bool,
}

impl DeleteOutcome {
    pub fn deleted() -> Self {
        Self { success: true }
    }
}

/// Text fields accept any JSON scalar. Numbers and booleans keep their JSON
/// spelling, `null` reads as absent, and arrays or objects are rejected.
fn scalar_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        None | Some(Value::Null) => Ok(None),
        Some(Value::String(text)) => Ok(Some(text)),
        Some(Value::Number(number)) => Ok(Some(number.to_string())),
        Some(Value::Bool(flag)) => Ok(Some(flag.to_string())),
        Some(other @ (Value::Array(_) | Value::Object(_))) => Err(serde::de::Error::custom(
            format!("expected a string, found {other}"),
        )),
    }
}
