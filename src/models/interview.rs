use serde::{Deserialize, Deserializer, Serialize};

/// Reads `null` the same as a missing field.
fn null_as_default<'de, D, T>(deserializer: D) -> Result<T, D::Error>
where
    D: Deserializer<'de>,
    T: Default + Deserialize<'de>,
{
    Ok(Option::<T>::deserialize(deserializer)?.unwrap_or_default())
}

/// Interview listed for a candidate or recruiter, with its decoded result.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct InterviewResults {
    pub public_id: String,
    pub position_public_id: String,
    pub result: Option<InterviewResult>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct InterviewResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub questions: Vec<Question>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i32,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Question {
    #[serde(default, deserialize_with = "null_as_default")]
    pub question: String,
    #[serde(default)]
    pub question_type: Option<String>,
    #[serde(default)]
    pub evaluation: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub score: i32,
    #[serde(default)]
    pub video_link: Option<String>,
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotion_results: Vec<EmotionResult>,
    #[serde(default)]
    pub answer: Option<String>,
    #[serde(default)]
    pub emotion: Option<String>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct EmotionResult {
    #[serde(default, deserialize_with = "null_as_default")]
    pub emotion: String,
    #[serde(default, deserialize_with = "null_as_default")]
    pub exact_time: f64,
    #[serde(default, deserialize_with = "null_as_default")]
    pub duration: f64,
}
