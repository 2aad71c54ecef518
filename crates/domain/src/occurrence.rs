use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, Utc};
use std::{convert::TryFrom, fmt::Display};
use thiserror::Error;

/// An `Occurrence` is one concrete firing of a `Reminder`.
///
/// The `Scheduler` picks up every `Occurrence` that is still `Created`
/// after its `fire_at` and delivers it, after which the owner of the
/// `Reminder` acknowledges it as either done or ignored.
#[derive(Debug, Clone, PartialEq)]
pub struct Occurrence {
    pub id: ID,
    /// The `Reminder` this `Occurrence` was generated from
    pub reminder_id: ID,
    /// Absolute instant at which the occurrence becomes due
    pub fire_at: DateTime<Utc>,
    pub status: OccurrenceStatus,
}

impl Occurrence {
    pub fn new(reminder_id: ID, fire_at: DateTime<Utc>) -> Self {
        Self {
            id: 0,
            reminder_id,
            fire_at,
            status: OccurrenceStatus::Created,
        }
    }

    /// Still waiting for delivery and the fire instant has passed
    pub fn is_due(&self, now: DateTime<Utc>) -> bool {
        self.status == OccurrenceStatus::Created && self.fire_at <= now
    }
}

impl Entity for Occurrence {
    fn id(&self) -> ID {
        self.id
    }

    fn set_id(&mut self, id: ID) {
        self.id = id;
    }
}

/// Lifecycle of an `Occurrence`
///
/// ```text
/// Created ──▶ Sent ──▶ Done
///                 └──▶ Ignored
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum OccurrenceStatus {
    Created,
    Sent,
    Done,
    Ignored,
}

#[derive(Error, Debug, PartialEq)]
pub enum InvalidStatusError {
    #[error("Unknown occurrence status code: {0}")]
    UnknownCode(i64),
}

impl OccurrenceStatus {
    pub const ALL: [OccurrenceStatus; 4] = [Self::Created, Self::Sent, Self::Done, Self::Ignored];

    pub fn is_terminal(&self) -> bool {
        matches!(self, Self::Done | Self::Ignored)
    }

    /// Whether the lifecycle allows moving from `self` to `next`.
    ///
    /// Statuses only ever move forward. An acknowledgement is also
    /// accepted for an occurrence that is still `Created`, which happens
    /// when the delivery went out but marking it as `Sent` failed.
    pub fn can_transition_to(&self, next: OccurrenceStatus) -> bool {
        use OccurrenceStatus::*;
        matches!(
            (self, next),
            (Created, Sent) | (Created, Done) | (Created, Ignored) | (Sent, Done) | (Sent, Ignored)
        )
    }

    /// Every status that may move to `next`
    pub fn predecessors(next: OccurrenceStatus) -> Vec<OccurrenceStatus> {
        Self::ALL
            .iter()
            .copied()
            .filter(|s| s.can_transition_to(next))
            .collect()
    }

    /// Numeric representation used by persistent stores
    pub fn code(&self) -> i64 {
        match self {
            Self::Created => 0,
            Self::Sent => 1,
            Self::Done => 2,
            Self::Ignored => 3,
        }
    }
}

impl Default for OccurrenceStatus {
    fn default() -> Self {
        Self::Created
    }
}

impl TryFrom<i64> for OccurrenceStatus {
    type Error = InvalidStatusError;

    fn try_from(code: i64) -> Result<Self, Self::Error> {
        match code {
            0 => Ok(Self::Created),
            1 => Ok(Self::Sent),
            2 => Ok(Self::Done),
            3 => Ok(Self::Ignored),
            _ => Err(InvalidStatusError::UnknownCode(code)),
        }
    }
}

impl Display for OccurrenceStatus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let name = match self {
            Self::Created => "created",
            Self::Sent => "sent",
            Self::Done => "done",
            Self::Ignored => "ignored",
        };
        write!(f, "{}", name)
    }
}
