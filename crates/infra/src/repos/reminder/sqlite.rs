use super::IReminderRepo;
use anyhow::Context;
use chrono::NaiveDate;
use nagging_bot_domain::{parse_timezone, Reminder, TimeOfDay, ID};
use sqlx::{FromRow, SqlitePool};

const DATE_FORMAT: &str = "%Y-%m-%d";

pub struct SqliteReminderRepo {
    pool: SqlitePool,
}

impl SqliteReminderRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct ReminderRaw {
    id: i64,
    user_id: i64,
    name: String,
    description: String,
    start_date: String,
    end_date: String,
    times_of_day: String,
    time_zone: String,
    is_active: i64,
}

impl TryFrom<ReminderRaw> for Reminder {
    type Error = anyhow::Error;

    fn try_from(raw: ReminderRaw) -> Result<Self, Self::Error> {
        let times_of_day: Vec<TimeOfDay> = serde_json::from_str(&raw.times_of_day)
            .with_context(|| format!("Reminder {} has malformed times of day", raw.id))?;
        Ok(Self {
            id: raw.id,
            user_id: raw.user_id,
            name: raw.name,
            description: raw.description,
            start_date: NaiveDate::parse_from_str(&raw.start_date, DATE_FORMAT)?,
            end_date: NaiveDate::parse_from_str(&raw.end_date, DATE_FORMAT)?,
            times_of_day,
            timezone: parse_timezone(&raw.time_zone)?,
            is_active: raw.is_active != 0,
        })
    }
}

fn format_date(date: &NaiveDate) -> String {
    date.format(DATE_FORMAT).to_string()
}

#[async_trait::async_trait]
impl IReminderRepo for SqliteReminderRepo {
    async fn get(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE id = ?
            "#,
        )
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await?;
        reminder.map(Reminder::try_from).transpose()
    }

    async fn list_by_user(&self, user_id: ID) -> anyhow::Result<Vec<Reminder>> {
        let reminders = sqlx::query_as::<_, ReminderRaw>(
            r#"
            SELECT * FROM reminders
            WHERE user_id = ?
            ORDER BY id
            "#,
        )
        .bind(user_id)
        .fetch_all(&self.pool)
        .await?;
        reminders.into_iter().map(Reminder::try_from).collect()
    }

    async fn create(&self, reminder: &Reminder) -> anyhow::Result<Reminder> {
        let times_of_day = serde_json::to_string(&reminder.times_of_day)?;
        let id = sqlx::query(
            r#"
            INSERT INTO reminders(user_id, name, description, start_date, end_date, times_of_day, time_zone, is_active)
            VALUES(?, ?, ?, ?, ?, ?, ?, ?)
            "#,
        )
        .bind(reminder.user_id)
        .bind(&reminder.name)
        .bind(&reminder.description)
        .bind(format_date(&reminder.start_date))
        .bind(format_date(&reminder.end_date))
        .bind(times_of_day)
        .bind(reminder.timezone.name())
        .bind(reminder.is_active as i64)
        .execute(&self.pool)
        .await?
        .last_insert_rowid();

        Ok(Reminder {
            id,
            ..reminder.clone()
        })
    }

    async fn update(&self, reminder: &Reminder) -> anyhow::Result<()> {
        let times_of_day = serde_json::to_string(&reminder.times_of_day)?;
        sqlx::query(
            r#"
            UPDATE reminders
            SET user_id = ?,
            name = ?,
            description = ?,
            start_date = ?,
            end_date = ?,
            times_of_day = ?,
            time_zone = ?,
            is_active = ?
            WHERE id = ?
            "#,
        )
        .bind(reminder.user_id)
        .bind(&reminder.name)
        .bind(&reminder.description)
        .bind(format_date(&reminder.start_date))
        .bind(format_date(&reminder.end_date))
        .bind(times_of_day)
        .bind(reminder.timezone.name())
        .bind(reminder.is_active as i64)
        .bind(reminder.id)
        .execute(&self.pool)
        .await?;
        Ok(())
    }

    async fn delete(&self, reminder_id: ID) -> anyhow::Result<Option<Reminder>> {
        let reminder = sqlx::query_as::<_, ReminderRaw>(
            r#"
            DELETE FROM reminders
            WHERE id = ?
            RETURNING *
            "#,
        )
        .bind(reminder_id)
        .fetch_optional(&self.pool)
        .await?;
        reminder.map(Reminder::try_from).transpose()
    }
}
