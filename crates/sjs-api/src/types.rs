//! Value types returned by the job server.

use chrono::{DateTime, FixedOffset};
use serde::{Deserialize, Deserializer, Serialize};
use serde_json::{Map, Value};

/// Deserialize a scalar that may arrive as a string or a bare JSON value
/// (e.g. `"1.2 secs"` or `1.2`).
pub(crate) fn deserialize_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    #[derive(Deserialize)]
    #[serde(untagged)]
    enum Text {
        String(String),
        Other(Value),
    }

    Option::<Text>::deserialize(deserializer).map(|opt| match opt {
        Some(Text::String(s)) => s,
        Some(Text::Other(v)) => v.to_string(),
        None => String::new(),
    })
}

/// Like [`deserialize_text`], but `null` and a missing value stay `None`.
fn deserialize_optional_text<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|opt| match opt {
        None | Some(Value::Null) => None,
        Some(Value::String(s)) => Some(s),
        Some(other) => Some(other.to_string()),
    })
}

/// Keep the `result` member only when it carries error details.
fn deserialize_error_details<'de, D>(deserializer: D) -> Result<Option<JobError>, D::Error>
where
    D: Deserializer<'de>,
{
    match Option::<Value>::deserialize(deserializer)? {
        Some(Value::Object(object)) if JobError::is_error_object(&object) => {
            serde_json::from_value(Value::Object(object))
                .map(Some)
                .map_err(serde::de::Error::custom)
        }
        _ => Ok(None),
    }
}

fn parse_timestamp(value: &str) -> Option<DateTime<FixedOffset>> {
    DateTime::parse_from_rfc3339(value).ok()
}

/// An uploaded application archive.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct JarInfo {
    /// Name the jar was uploaded under.
    pub jar_name: String,
    /// Upload timestamp as reported by the server.
    pub uploaded_time: String,
}

impl JarInfo {
    /// Create a jar entry.
    pub fn new(jar_name: impl Into<String>, uploaded_time: impl Into<String>) -> Self {
        Self {
            jar_name: jar_name.into(),
            uploaded_time: uploaded_time.into(),
        }
    }

    /// The upload timestamp, when it is a valid RFC 3339 date-time.
    pub fn uploaded_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.uploaded_time)
    }
}

/// Build the jar list from the `{name: timestamp, ...}` object the server
/// returns.
pub(crate) fn jars_from_object(object: Map<String, Value>) -> Vec<JarInfo> {
    object
        .into_iter()
        .map(|(name, time)| {
            let time = match time {
                Value::String(s) => s,
                other => other.to_string(),
            };
            JarInfo::new(name, time)
        })
        .collect()
}

/// Error details of a failed job.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobError {
    /// Error message.
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub message: Option<String>,
    /// Class of the error raised by the job.
    #[serde(default, deserialize_with = "deserialize_optional_text")]
    pub error_class: Option<String>,
    /// Stack trace lines.
    #[serde(default, deserialize_with = "deserialize_stack")]
    pub stack: Vec<String>,
}

impl JobError {
    fn is_error_object(object: &Map<String, Value>) -> bool {
        ["message", "errorClass", "stack"]
            .iter()
            .any(|key| object.contains_key(*key))
    }
}

/// Stack traces come either as an array of lines or as one string.
fn deserialize_stack<'de, D>(deserializer: D) -> Result<Vec<String>, D::Error>
where
    D: Deserializer<'de>,
{
    Option::<Value>::deserialize(deserializer).map(|opt| match opt {
        None | Some(Value::Null) => Vec::new(),
        Some(Value::Array(lines)) => lines
            .into_iter()
            .map(|line| match line {
                Value::String(s) => s,
                other => other.to_string(),
            })
            .collect(),
        Some(Value::String(line)) => vec![line],
        Some(other) => vec![other.to_string()],
    })
}

/// A job as listed by the server.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct JobInfo {
    #[serde(default, deserialize_with = "deserialize_text")]
    pub duration: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub class_path: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub start_time: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub context: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub status: String,
    #[serde(default, deserialize_with = "deserialize_text")]
    pub job_id: String,
    /// Error details, present when the job's `result` is an object with a
    /// `message`, `errorClass` or `stack` member.
    #[serde(
        default,
        rename = "result",
        deserialize_with = "deserialize_error_details",
        skip_serializing_if = "Option::is_none"
    )]
    pub error: Option<JobError>,
}

impl JobInfo {
    /// The start timestamp, when it is a valid RFC 3339 date-time.
    pub fn started_at(&self) -> Option<DateTime<FixedOffset>> {
        parse_timestamp(&self.start_time)
    }

    /// Returns true if the job reported an error.
    pub fn is_error(&self) -> bool {
        self.status == crate::result::STATUS_ERROR
    }
}

/// Configuration a job was started with.
///
/// A flat JSON object; values keep their native JSON type.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(transparent)]
pub struct JobConfig(Map<String, Value>);

impl JobConfig {
    /// Get a configuration value.
    pub fn get(&self, key: &str) -> Option<&Value> {
        self.0.get(key)
    }

    /// Get a configuration value as a string, if it is one.
    pub fn get_str(&self, key: &str) -> Option<&str> {
        self.0.get(key).and_then(Value::as_str)
    }

    /// Set a configuration value.
    pub fn insert(&mut self, key: impl Into<String>, value: Value) -> Option<Value> {
        self.0.insert(key.into(), value)
    }

    /// Iterate over the configuration entries.
    pub fn iter(&self) -> impl Iterator<Item = (&String, &Value)> {
        self.0.iter()
    }

    /// Number of configuration entries.
    pub fn len(&self) -> usize {
        self.0.len()
    }

    /// Returns true if the configuration has no entries.
    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    /// Consume into the underlying JSON object.
    pub fn into_inner(self) -> Map<String, Value> {
        self.0
    }
}

impl From<Map<String, Value>> for JobConfig {
    fn from(map: Map<String, Value>) -> Self {
        Self(map)
    }
}
