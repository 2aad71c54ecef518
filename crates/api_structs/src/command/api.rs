use crate::{dtos::BotCommandDTO, shared::APIEnvelope};
use serde::{Deserialize, Serialize};

pub mod set_my_commands {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct RequestBody {
        pub commands: Vec<BotCommandDTO>,
    }

    pub type APIResponse = APIEnvelope<bool>;
}
