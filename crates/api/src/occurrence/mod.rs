pub mod acknowledge_occurrence;
pub mod send_due_occurrences;

use crate::telegram::dispatcher::Dispatcher;
use acknowledge_occurrence::OccurrenceCallbackHandler;
use nagging_bot_infra::{telegram::Responder, NagContext};
use std::sync::Arc;

pub fn configure_callbacks(
    dispatcher: &mut Dispatcher,
    ctx: &NagContext,
    responder: &Arc<dyn Responder>,
) {
    dispatcher.register_callback(Arc::new(OccurrenceCallbackHandler::new(
        ctx.clone(),
        responder.clone(),
    )));
}
