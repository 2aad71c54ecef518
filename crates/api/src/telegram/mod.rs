pub mod callbacks;
pub mod dispatcher;
pub mod poller;
pub mod status_ui;

use nagging_bot_api_structs::dtos::BotCommandDTO;

/// Commands advertised to clients through `setMyCommands`
pub fn bot_commands() -> Vec<BotCommandDTO> {
    vec![
        BotCommandDTO::new("start", "Register"),
        BotCommandDTO::new("reminder", "Create reminder"),
        BotCommandDTO::new("list", "List reminders"),
        BotCommandDTO::new("delete", "Delete reminder"),
        BotCommandDTO::new("test", "Demo reminder (restricted)"),
    ]
}
