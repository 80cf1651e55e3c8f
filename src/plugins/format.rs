//! /format command plugin.

use crate::bot::dispatcher::AppState;
use crate::bot::update::InboundMessage;
use crate::errors::Result;
use crate::texts;

/// Send the copyable submission template.
pub async fn format_handler(state: &AppState, msg: &InboundMessage) -> Result<()> {
    state.reply(msg, texts::FORMAT).await
}

#[cfg(test)]
mod tests {
    use crate::landing::{FieldKey, Submission};
    use crate::texts;

    #[test]
    fn test_template_lists_every_field() {
        for key in FieldKey::ALL {
            assert!(texts::FORMAT.contains(key.label()), "template lacks {key}");
        }
    }

    #[test]
    fn test_template_is_a_valid_submission() {
        let body = texts::FORMAT
            .split("```")
            .nth(1)
            .expect("template has a code block");

        let submission = Submission::parse(body).unwrap();
        assert_eq!(submission.vessel_code, "1422");
        assert_eq!(submission.volume, "200");
    }
}
