mod command;
mod message;
mod shared;
mod update;

pub mod dtos {
    pub use crate::command::dtos::*;
    pub use crate::message::dtos::*;
    pub use crate::update::dtos::*;
}

pub use crate::command::api::*;
pub use crate::message::api::*;
pub use crate::shared::APIEnvelope;
pub use crate::update::api::*;
