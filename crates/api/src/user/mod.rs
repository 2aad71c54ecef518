mod register_user;

use crate::{shared::controller::CommandRoute, telegram::dispatcher::Dispatcher};
use nagging_bot_infra::{telegram::Responder, NagContext};
pub use register_user::RegisterUserUseCase;
use register_user::StartController;
use std::sync::Arc;

pub fn configure_commands(
    dispatcher: &mut Dispatcher,
    ctx: &NagContext,
    responder: &Arc<dyn Responder>,
) {
    dispatcher.register_command(
        "/start",
        Arc::new(CommandRoute::new(
            StartController,
            ctx.clone(),
            responder.clone(),
        )),
    );
}
