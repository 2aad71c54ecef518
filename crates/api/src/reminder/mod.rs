mod create_demo_reminder;
mod create_reminder;
mod delete_reminder;
mod list_reminders;

use crate::{shared::controller::CommandRoute, telegram::dispatcher::Dispatcher};
use create_demo_reminder::CreateDemoReminderController;
use create_reminder::CreateReminderController;
use delete_reminder::DeleteReminderController;
use list_reminders::ListRemindersController;
use nagging_bot_infra::{telegram::Responder, NagContext};
use std::sync::Arc;

pub fn configure_commands(
    dispatcher: &mut Dispatcher,
    ctx: &NagContext,
    responder: &Arc<dyn Responder>,
) {
    dispatcher.register_command(
        "/reminder",
        Arc::new(CommandRoute::new(
            CreateReminderController,
            ctx.clone(),
            responder.clone(),
        )),
    );
    dispatcher.register_command(
        "/list",
        Arc::new(CommandRoute::new(
            ListRemindersController,
            ctx.clone(),
            responder.clone(),
        )),
    );
    dispatcher.register_command(
        "/delete",
        Arc::new(CommandRoute::new(
            DeleteReminderController,
            ctx.clone(),
            responder.clone(),
        )),
    );
    dispatcher.register_command(
        "/test",
        Arc::new(CommandRoute::new(
            CreateDemoReminderController,
            ctx.clone(),
            responder.clone(),
        )),
    );
}
