use crate::error::NagError;
use crate::shared::{
    controller::{user_from_sender, CommandController},
    usecase::{execute, UseCase},
};
use crate::user::RegisterUserUseCase;
use chrono::NaiveDate;
use chrono_tz::Tz;
use nagging_bot_api_structs::dtos::TelegramUserDTO;
use nagging_bot_domain::{parse_date, parse_timezone, Occurrence, Reminder, TimeOfDay, User};
use nagging_bot_infra::NagContext;
use tracing::{error, info};

const USAGE: &str = "Usage: /reminder Name_Description_StartDate_EndDate_HH:MM;HH:MM_TimeZone\nExample: /reminder Pill_VitC_19.01.2026_20.01.2026_08:00;13:00;19:00_Europe/Warsaw";
const INVALID_FORMAT: &str =
    "Invalid format. Expected: /reminder Name_Description_StartDate_EndDate_HH:MM;HH:MM_TimeZone";
const INVALID_TIMES: &str = "Invalid times. Use HH:MM;HH:MM";
const INVALID_TIMEZONE: &str = "Invalid timezone. Use IANA, e.g., Europe/Moscow";
const INVALID_DATE_RANGE: &str = "Invalid date range. Use DD.MM.YYYY_DD.MM.YYYY (inclusive)";
/// Bounds how many occurrences a single command can create
const MAX_REMINDER_DAYS: i64 = 366;
const RANGE_TOO_LONG: &str = "Invalid date range. A reminder can span at most 366 days";

pub struct CreateReminderController;

#[async_trait::async_trait]
impl CommandController for CreateReminderController {
    async fn handle(
        &self,
        sender: &TelegramUserDTO,
        args: &str,
        ctx: &NagContext,
    ) -> Result<String, NagError> {
        if args.is_empty() {
            return Err(NagError::BadClientData(USAGE.into()));
        }
        // The time zone comes last since IANA names may contain `_`
        let fields: Vec<&str> = args.splitn(6, '_').collect();
        if fields.len() != 6 {
            return Err(NagError::BadClientData(INVALID_FORMAT.into()));
        }

        let times_of_day = TimeOfDay::parse_list(fields[4])
            .map_err(|_| NagError::BadClientData(INVALID_TIMES.into()))?;
        let timezone = parse_timezone(fields[5])
            .map_err(|_| NagError::BadClientData(INVALID_TIMEZONE.into()))?;
        let (start_date, end_date) = match (parse_date(fields[2]), parse_date(fields[3])) {
            (Ok(start), Ok(end)) => (start, end),
            _ => return Err(NagError::BadClientData(INVALID_DATE_RANGE.into())),
        };

        let usecase = CreateReminderUseCase {
            user: user_from_sender(sender),
            name: fields[0].trim().to_string(),
            description: fields[1].trim().to_string(),
            start_date,
            end_date,
            times_of_day,
            timezone,
        };
        let res = execute(usecase, ctx).await.map_err(NagError::from)?;
        info!(
            "Reminder {} created with {} occurrences",
            res.reminder.id,
            res.occurrences.len()
        );

        Ok(format!(
            "Reminder created: {} ({}) in {}",
            res.reminder.name,
            res.reminder.description,
            res.reminder.timezone.name()
        ))
    }
}

#[derive(Debug)]
pub struct CreateReminderUseCase {
    /// Profile of the owner, registered on the fly
    pub user: User,
    pub name: String,
    pub description: String,
    pub start_date: NaiveDate,
    pub end_date: NaiveDate,
    pub times_of_day: Vec<TimeOfDay>,
    pub timezone: Tz,
}

#[derive(Debug)]
pub struct UseCaseRes {
    pub reminder: Reminder,
    pub occurrences: Vec<Occurrence>,
}

#[derive(Debug)]
pub enum UseCaseError {
    InvalidDateRange,
    RangeTooLong,
    UserStorageError,
    StorageError(anyhow::Error),
    /// The reminder exists but some of its occurrences could not be stored
    OccurrencesNotScheduled,
}

impl From<UseCaseError> for NagError {
    fn from(e: UseCaseError) -> Self {
        match e {
            UseCaseError::InvalidDateRange => Self::BadClientData(INVALID_DATE_RANGE.into()),
            UseCaseError::RangeTooLong => Self::BadClientData(RANGE_TOO_LONG.into()),
            UseCaseError::UserStorageError => Self::InternalError("Failed to save user".into()),
            UseCaseError::StorageError(_) => {
                Self::InternalError("Failed to create reminder".into())
            }
            UseCaseError::OccurrencesNotScheduled => Self::InternalError(
                "Reminder created, but failed to schedule occurrences".into(),
            ),
        }
    }
}

#[async_trait::async_trait]
impl UseCase for CreateReminderUseCase {
    type Response = UseCaseRes;
    type Error = UseCaseError;

    const NAME: &'static str = "CreateReminder";

    async fn execute(&mut self, ctx: &NagContext) -> Result<Self::Response, Self::Error> {
        if self.end_date < self.start_date {
            return Err(UseCaseError::InvalidDateRange);
        }
        if (self.end_date - self.start_date).num_days() >= MAX_REMINDER_DAYS {
            return Err(UseCaseError::RangeTooLong);
        }

        let register_user = RegisterUserUseCase {
            user: self.user.clone(),
        };
        let user = execute(register_user, ctx)
            .await
            .map_err(|_| UseCaseError::UserStorageError)?;

        let reminder = Reminder::new(
            user.id,
            self.name.clone(),
            self.description.clone(),
            self.start_date,
            self.end_date,
            self.times_of_day.clone(),
            self.timezone,
        )
        .map_err(|_| UseCaseError::InvalidDateRange)?;
        let reminder = ctx
            .repos
            .reminders
            .create(&reminder)
            .await
            .map_err(UseCaseError::StorageError)?;

        let mut occurrences = Vec::new();
        let mut failed = 0;
        for fire_at in reminder.fire_instants() {
            match ctx
                .repos
                .occurrences
                .create(&Occurrence::new(reminder.id, fire_at))
                .await
            {
                Ok(occurrence) => occurrences.push(occurrence),
                Err(e) => {
                    error!(
                        "Unable to create occurrence at {} for reminder {}: {:?}",
                        fire_at, reminder.id, e
                    );
                    failed += 1;
                }
            }
        }
        if failed > 0 {
            return Err(UseCaseError::OccurrencesNotScheduled);
        }

        Ok(UseCaseRes {
            reminder,
            occurrences,
        })
    }
}
