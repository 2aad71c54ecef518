use crate::shared::entity::{Entity, ID};
use chrono::{DateTime, NaiveDate, TimeZone, Utc};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::{fmt::Display, str::FromStr};
use thiserror::Error;

/// A `Reminder` is a recurring rule owned by a `User`.
///
/// Every day between `start_date` and `end_date` (both inclusive) the
/// `Reminder` fires once for each of its `times_of_day`. The dates and
/// times are wall-clock values in `timezone` and only become absolute
/// instants through `Reminder::fire_instants`.
#[derive(Debug, Clone, PartialEq)]
pub struct Reminder {
    pub id: ID,
    /// The `User` owning this `Reminder`
    pub user_id: ID,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    /// Sorted and free of duplicates
    pub times_of_day: Vec<TimeOfDay>,
    pub timezone: Tz,
    pub is_active: bool,
}

#[derive(Error, Debug, PartialEq)]
pub enum ReminderError {
    #[error("End date {end} is before start date {start}")]
    EndBeforeStart { start: NaiveDate, end: NaiveDate },
    #[error("Time of day: {0} is malformed, expected HH:MM")]
    MalformedTime(String),
    #[error("Time zone: {0} is not a valid IANA time zone")]
    UnknownTimeZone(String),
}

impl Reminder {
    pub fn new(
        user_id: ID,
        name: String,
        description: String,
        start_date: NaiveDate,
        end_date: NaiveDate,
        times_of_day: Vec<TimeOfDay>,
        timezone: Tz,
    ) -> Result<Self, ReminderError> {
        if end_date < start_date {
            return Err(ReminderError::EndBeforeStart {
                start: start_date,
                end: end_date,
            });
        }

        let mut reminder = Self {
            id: 0,
            user_id,
            name,
            description,
            start_date,
            end_date,
            times_of_day: Vec::new(),
            timezone,
            is_active: true,
        };
        reminder.set_times_of_day(times_of_day);
        Ok(reminder)
    }

    pub fn set_times_of_day(&mut self, mut times_of_day: Vec<TimeOfDay>) {
        times_of_day.sort();
        times_of_day.dedup();
        self.times_of_day = times_of_day;
    }

    /// All absolute instants at which this `Reminder` fires, in ascending order.
    ///
    /// Local times that do not exist in `timezone` (skipped by a DST switch)
    /// produce no instant, ambiguous ones resolve to the earliest candidate.
    pub fn fire_instants(&self) -> Vec<DateTime<Utc>> {
        let mut instants = Vec::new();
        let mut day = Some(self.start_date);
        while let Some(date) = day.filter(|d| *d <= self.end_date) {
            for time in &self.times_of_day {
                let local = match date.and_hms_opt(time.hour, time.minute, 0) {
                    Some(local) => local,
                    None => continue,
                };
                if let Some(instant) = self.timezone.from_local_datetime(&local).earliest() {
                    instants.push(instant.with_timezone(&Utc));
                }
            }
            day = date.succ_opt();
        }
        instants.sort();
        instants
    }
}

impl Entity for Reminder {
    fn id(&self) -> ID {
        self.id
    }

    fn set_id(&mut self, id: ID) {
        self.id = id;
    }
}

pub fn parse_timezone(timezone: &str) -> Result<Tz, ReminderError> {
    timezone
        .trim()
        .parse::<Tz>()
        .map_err(|_| ReminderError::UnknownTimeZone(timezone.to_string()))
}

/// Wall-clock time without a date or a time zone
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub struct TimeOfDay {
    pub hour: u32,
    pub minute: u32,
}

impl TimeOfDay {
    pub fn new(hour: u32, minute: u32) -> Option<Self> {
        if hour > 23 || minute > 59 {
            return None;
        }
        Some(Self { hour, minute })
    }

    /// Parses a `;` separated list such as `08:00;13:30`
    pub fn parse_list(times: &str) -> Result<Vec<Self>, ReminderError> {
        if times.trim().is_empty() {
            return Err(ReminderError::MalformedTime(times.to_string()));
        }
        times.split(';').map(|t| t.parse()).collect()
    }
}

impl FromStr for TimeOfDay {
    type Err = ReminderError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        let malformed = || ReminderError::MalformedTime(s.to_string());
        let (hour, minute) = s.split_once(':').ok_or_else(malformed)?;
        if hour.is_empty() || hour.len() > 2 || minute.len() != 2 {
            return Err(malformed());
        }
        let hour = hour.parse::<u32>().map_err(|_| malformed())?;
        let minute = minute.parse::<u32>().map_err(|_| malformed())?;
        Self::new(hour, minute).ok_or_else(malformed)
    }
}

impl Display for TimeOfDay {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:02}:{:02}", self.hour, self.minute)
    }
}
