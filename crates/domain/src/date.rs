use chrono::{Datelike, NaiveDate};
use thiserror::Error;

#[derive(Error, Debug, PartialEq)]
pub enum DateParseError {
    #[error("Date: {0} is malformed, expected DD.MM.YYYY")]
    Malformed(String),
    #[error("Date: {0} does not exist")]
    OutOfRange(String),
}

/// Parses a calendar date written as `DD.MM.YYYY`
pub fn parse_date(datestr: &str) -> Result<NaiveDate, DateParseError> {
    let datestr = datestr.trim();
    let parts = datestr.split('.').collect::<Vec<_>>();
    if parts.len() != 3 {
        return Err(DateParseError::Malformed(datestr.to_string()));
    }

    let (day, month, year) = match (
        parts[0].parse::<u32>(),
        parts[1].parse::<u32>(),
        parts[2].parse::<i32>(),
    ) {
        (Ok(day), Ok(month), Ok(year)) => (day, month, year),
        _ => return Err(DateParseError::Malformed(datestr.to_string())),
    };

    if !(1970..=2100).contains(&year) || !(1..=12).contains(&month) {
        return Err(DateParseError::OutOfRange(datestr.to_string()));
    }
    if day < 1 || day > get_month_length(year, month) {
        return Err(DateParseError::OutOfRange(datestr.to_string()));
    }

    NaiveDate::from_ymd_opt(year, month, day)
        .ok_or_else(|| DateParseError::OutOfRange(datestr.to_string()))
}

pub fn is_leap_year(year: i32) -> bool {
    year % 400 == 0 || (year % 100 != 0 && year % 4 == 0)
}

// month: January -> 1
pub fn get_month_length(year: i32, month: u32) -> u32 {
    match month {
        2 if is_leap_year(year) => 29,
        2 => 28,
        4 | 6 | 9 | 11 => 30,
        _ => 31,
    }
}

pub fn format_date(date: &NaiveDate) -> String {
    format!("{:02}.{:02}.{}", date.day(), date.month(), date.year())
}
