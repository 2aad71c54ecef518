use super::callbacks::{encode_occurrence_callback, OccurrenceAction};
use nagging_bot_api_structs::dtos::{InlineKeyboardButtonDTO, InlineKeyboardMarkupDTO};
use nagging_bot_domain::{OccurrenceStatus, ID};

const DONE_BUTTON: &str = "✅ Done";
const IGNORE_BUTTON: &str = "🚫 Ignore";
const DONE_STATUS_LINE: &str = "Status: ✅ Done";
const IGNORED_STATUS_LINE: &str = "Status: 🚫 Ignored";

/// Done / Ignore buttons attached to a delivered occurrence
pub fn initial_markup(occurrence_id: ID) -> InlineKeyboardMarkupDTO {
    InlineKeyboardMarkupDTO::single_row(vec![
        InlineKeyboardButtonDTO::new(
            DONE_BUTTON,
            encode_occurrence_callback(occurrence_id, OccurrenceAction::Done),
        ),
        InlineKeyboardButtonDTO::new(
            IGNORE_BUTTON,
            encode_occurrence_callback(occurrence_id, OccurrenceAction::Ignore),
        ),
    ])
}

/// Removes the buttons once the occurrence is acknowledged
pub fn final_markup() -> InlineKeyboardMarkupDTO {
    InlineKeyboardMarkupDTO::empty()
}

/// `original` with the status line of a terminal status appended once.
/// Non terminal statuses leave the text untouched.
pub fn final_text(original: &str, status: OccurrenceStatus) -> String {
    let status_line = match status {
        OccurrenceStatus::Done => DONE_STATUS_LINE,
        OccurrenceStatus::Ignored => IGNORED_STATUS_LINE,
        _ => return original.to_string(),
    };
    if original.contains(status_line) {
        return original.to_string();
    }
    format!("{}\n\n{}", original, status_line)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn initial_markup_has_done_and_ignore() {
        let markup = initial_markup(3);
        assert_eq!(markup.inline_keyboard.len(), 1);
        let row = &markup.inline_keyboard[0];
        assert_eq!(row[0].text, "✅ Done");
        assert_eq!(row[0].callback_data, "occ:3:done");
        assert_eq!(row[1].text, "🚫 Ignore");
        assert_eq!(row[1].callback_data, "occ:3:ignore");
        assert!(final_markup().inline_keyboard.is_empty());
    }

    #[test]
    fn final_text_appends_status_once() {
        let text = final_text("Reminder: Pill", OccurrenceStatus::Done);
        assert_eq!(text, "Reminder: Pill\n\nStatus: ✅ Done");
        assert_eq!(final_text(&text, OccurrenceStatus::Done), text);
        assert_eq!(
            final_text("Reminder: Pill", OccurrenceStatus::Ignored),
            "Reminder: Pill\n\nStatus: 🚫 Ignored"
        );
        assert_eq!(
            final_text("Reminder: Pill", OccurrenceStatus::Sent),
            "Reminder: Pill"
        );
    }
}
