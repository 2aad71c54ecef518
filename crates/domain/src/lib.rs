mod date;
mod occurrence;
mod reminder;
mod shared;
mod user;

pub use date::{format_date, parse_date, DateParseError};
pub use occurrence::{InvalidStatusError, Occurrence, OccurrenceStatus};
pub use reminder::{parse_timezone, Reminder, ReminderError, TimeOfDay};
pub use shared::entity::{Entity, ID};
pub use user::User;
