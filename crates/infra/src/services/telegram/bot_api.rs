use super::{Responder, UpdateSource};
use crate::Config;
use nagging_bot_api_structs::{
    dtos::{BotCommandDTO, InlineKeyboardMarkupDTO, UpdateDTO},
    edit_message_text, get_updates, send_message, set_my_commands, APIEnvelope,
};
use reqwest::Client;
use serde::{de::DeserializeOwned, Serialize};
use std::time::Duration;
use thiserror::Error;
use tracing::error;

/// Slack on top of the long polling timeout before a request is abandoned
const REQUEST_TIMEOUT_SLACK: Duration = Duration::from_secs(10);

#[derive(Error, Debug)]
pub enum BotApiError {
    #[error("Bot API method {method} failed: {source}")]
    Network {
        method: &'static str,
        source: reqwest::Error,
    },
    #[error("Bot API method {method} responded with status {status}")]
    Status { method: &'static str, status: u16 },
    #[error("Bot API method {method} was rejected: {description}")]
    Rejected {
        method: &'static str,
        description: String,
    },
}

/// Client for the Telegram Bot API
pub struct TelegramBotApi {
    client: Client,
    base_url: String,
    token: String,
    poll_timeout: Duration,
}

impl TelegramBotApi {
    pub fn new(config: &Config) -> anyhow::Result<Self> {
        let client = Client::builder()
            .timeout(config.poll_timeout + REQUEST_TIMEOUT_SLACK)
            .build()?;

        Ok(Self {
            client,
            base_url: config.bot_api_url.trim_end_matches('/').to_string(),
            token: config.bot_token.clone(),
            poll_timeout: config.poll_timeout,
        })
    }

    fn method_url(&self, method: &str) -> String {
        format!("{}/bot{}/{}", self.base_url, self.token, method)
    }

    /// Checks the HTTP status and decodes the response envelope
    async fn read_envelope<T: DeserializeOwned>(
        method: &'static str,
        res: Result<reqwest::Response, reqwest::Error>,
    ) -> anyhow::Result<APIEnvelope<T>> {
        // The url carries the token and must never end up in logs
        let network = |source: reqwest::Error| BotApiError::Network {
            method,
            source: source.without_url(),
        };
        let res = res.map_err(network)?;

        let status = res.status();
        if status.as_u16() >= 300 {
            error!(
                "[Unexpected Response] Bot API {} error. Status: {}",
                method, status
            );
            return Err(BotApiError::Status {
                method,
                status: status.as_u16(),
            }
            .into());
        }

        res.json::<APIEnvelope<T>>()
            .await
            .map_err(|e| network(e).into())
    }

    fn into_result<T>(method: &'static str, envelope: APIEnvelope<T>) -> anyhow::Result<T> {
        envelope.into_result().map_err(|description| {
            error!(
                "[Unexpected Response] Bot API {} error. Description: {}",
                method, description
            );
            BotApiError::Rejected {
                method,
                description,
            }
            .into()
        })
    }

    async fn post<B: Serialize, T: DeserializeOwned>(
        &self,
        method: &'static str,
        body: &B,
    ) -> anyhow::Result<APIEnvelope<T>> {
        let res = self
            .client
            .post(self.method_url(method))
            .json(body)
            .send()
            .await;
        Self::read_envelope(method, res).await
    }

    pub async fn set_my_commands(&self, commands: Vec<BotCommandDTO>) -> anyhow::Result<()> {
        let body = set_my_commands::RequestBody { commands };
        let envelope: set_my_commands::APIResponse = self.post("setMyCommands", &body).await?;
        Self::into_result("setMyCommands", envelope)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl Responder for TelegramBotApi {
    async fn send_message(
        &self,
        chat_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkupDTO>,
    ) -> anyhow::Result<()> {
        let body = send_message::RequestBody {
            chat_id,
            text: text.to_string(),
            reply_markup: markup,
        };
        let envelope: send_message::APIResponse = self.post("sendMessage", &body).await?;
        Self::into_result("sendMessage", envelope)?;
        Ok(())
    }

    async fn edit_message_text(
        &self,
        chat_id: i64,
        message_id: i64,
        text: &str,
        markup: Option<InlineKeyboardMarkupDTO>,
    ) -> anyhow::Result<()> {
        let body = edit_message_text::RequestBody {
            chat_id,
            message_id,
            text: text.to_string(),
            reply_markup: markup,
        };
        let envelope: edit_message_text::APIResponse =
            self.post("editMessageText", &body).await?;
        Self::into_result("editMessageText", envelope)?;
        Ok(())
    }
}

#[async_trait::async_trait]
impl UpdateSource for TelegramBotApi {
    async fn fetch_updates(&self, offset: i64) -> anyhow::Result<Vec<UpdateDTO>> {
        let query = get_updates::QueryParams {
            offset,
            timeout: self.poll_timeout.as_secs(),
        };
        let res = self
            .client
            .get(self.method_url("getUpdates"))
            .query(&query)
            .send()
            .await;
        let envelope: get_updates::APIResponse = Self::read_envelope("getUpdates", res).await?;
        Self::into_result("getUpdates", envelope)
    }
}
