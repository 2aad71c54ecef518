use serde::{Deserialize, Serialize};

/// Every Bot API method answers with this envelope. `result` is only
/// present when `ok` is `true`.
#[derive(Debug, Deserialize, Serialize)]
pub struct APIEnvelope<T> {
    pub ok: bool,
    pub result: Option<T>,
    pub description: Option<String>,
}

impl<T> APIEnvelope<T> {
    pub fn into_result(self) -> Result<T, String> {
        match (self.ok, self.result) {
            (true, Some(result)) => Ok(result),
            (true, None) => Err("Bot API response did not contain a result".into()),
            (false, _) => Err(self
                .description
                .unwrap_or_else(|| "Bot API responded with ok=false".into())),
        }
    }
}
