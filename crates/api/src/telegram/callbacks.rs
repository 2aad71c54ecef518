use nagging_bot_domain::{OccurrenceStatus, ID};
use std::fmt::Display;
use thiserror::Error;

const OCCURRENCE_PREFIX: &str = "occ";

/// Callback data of buttons that should do nothing when tapped
pub const NOOP_CALLBACK: &str = "noop";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum OccurrenceAction {
    Done,
    Ignore,
}

impl OccurrenceAction {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Done => "done",
            Self::Ignore => "ignore",
        }
    }

    /// The status an `Occurrence` ends up in after the action
    pub fn status(&self) -> OccurrenceStatus {
        match self {
            Self::Done => OccurrenceStatus::Done,
            Self::Ignore => OccurrenceStatus::Ignored,
        }
    }
}

impl Display for OccurrenceAction {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

#[derive(Error, Debug, PartialEq)]
pub enum CallbackDecodeError {
    #[error("Callback data: {0} does not have the shape occ:<id>:<action>")]
    Malformed(String),
    #[error("Callback data: {0} has an invalid occurrence id")]
    InvalidId(String),
    #[error("Callback data: {0} has an unknown action")]
    UnknownAction(String),
}

pub fn encode_occurrence_callback(occurrence_id: ID, action: OccurrenceAction) -> String {
    format!("{}:{}:{}", OCCURRENCE_PREFIX, occurrence_id, action)
}

pub fn decode_occurrence_callback(
    data: &str,
) -> Result<(ID, OccurrenceAction), CallbackDecodeError> {
    let parts: Vec<&str> = data.split(':').collect();
    if parts.len() != 3 || parts[0] != OCCURRENCE_PREFIX {
        return Err(CallbackDecodeError::Malformed(data.to_string()));
    }
    let occurrence_id = parts[1]
        .parse::<ID>()
        .map_err(|_| CallbackDecodeError::InvalidId(data.to_string()))?;
    let action = match parts[2] {
        "done" => OccurrenceAction::Done,
        "ignore" => OccurrenceAction::Ignore,
        _ => return Err(CallbackDecodeError::UnknownAction(data.to_string())),
    };
    Ok((occurrence_id, action))
}
