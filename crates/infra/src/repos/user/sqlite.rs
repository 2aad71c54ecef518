use super::IUserRepo;
use nagging_bot_domain::{User, ID};
use sqlx::{FromRow, SqlitePool};

pub struct SqliteUserRepo {
    pool: SqlitePool,
}

impl SqliteUserRepo {
    pub fn new(pool: SqlitePool) -> Self {
        Self { pool }
    }
}

#[derive(Debug, FromRow)]
struct UserRaw {
    id: i64,
    telegram_id: i64,
    username: String,
    first_name: String,
    last_name: String,
    language: String,
}

impl From<UserRaw> for User {
    fn from(raw: UserRaw) -> Self {
        Self {
            id: raw.id,
            external_id: raw.telegram_id,
            username: raw.username,
            first_name: raw.first_name,
            last_name: raw.last_name,
            language: raw.language,
        }
    }
}

#[async_trait::async_trait]
impl IUserRepo for SqliteUserRepo {
    async fn get(&self, user_id: ID) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT id, telegram_id, username, first_name, last_name, language
            FROM users
            WHERE id = ?
            "#,
        )
        .bind(user_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user.map(|u| u.into()))
    }

    async fn get_by_external_id(&self, external_id: i64) -> anyhow::Result<Option<User>> {
        let user = sqlx::query_as::<_, UserRaw>(
            r#"
            SELECT id, telegram_id, username, first_name, last_name, language
            FROM users
            WHERE telegram_id = ?
            "#,
        )
        .bind(external_id)
        .fetch_optional(&self.pool)
        .await?;
        Ok(user.map(|u| u.into()))
    }

    async fn upsert(&self, user: &User) -> anyhow::Result<User> {
        let user = sqlx::query_as::<_, UserRaw>(
            r#"
            INSERT INTO users(telegram_id, username, first_name, last_name, language)
            VALUES(?, ?, ?, ?, ?)
            ON CONFLICT(telegram_id) DO UPDATE SET
                username = excluded.username,
                first_name = excluded.first_name,
                last_name = excluded.last_name,
                language = excluded.language
            RETURNING id, telegram_id, username, first_name, last_name, language
            "#,
        )
        .bind(user.external_id)
        .bind(&user.username)
        .bind(&user.first_name)
        .bind(&user.last_name)
        .bind(&user.language)
        .fetch_one(&self.pool)
        .await?;
        Ok(user.into())
    }
}
