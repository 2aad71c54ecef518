use crate::{dtos::UpdateDTO, shared::APIEnvelope};
use serde::{Deserialize, Serialize};

pub mod get_updates {
    use super::*;

    #[derive(Debug, Deserialize, Serialize)]
    pub struct QueryParams {
        pub offset: i64,
        /// Long polling timeout in seconds
        pub timeout: u64,
    }

    pub type APIResponse = APIEnvelope<Vec<UpdateDTO>>;
}
