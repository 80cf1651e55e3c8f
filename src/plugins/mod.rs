//! Command handlers.
//!
//! Add new commands by:
//! 1. Creating a new file in this directory
//! 2. Adding `pub mod your_command;` below
//! 3. Adding a variant to [`Command`] and a branch to the dispatcher

pub mod daftar;
pub mod format;
pub mod start;
pub mod submission;

/// Bot commands. Anything else is a landing submission.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Command {
    /// Onboarding help.
    Start,
    /// Submission template.
    Format,
    /// Self-registration.
    Daftar,
}

impl Command {
    /// Exact, case-sensitive match on already trimmed text.
    pub fn parse(text: &str) -> Option<Self> {
        match text {
            "/start" => Some(Self::Start),
            "/format" => Some(Self::Format),
            "/daftar" => Some(Self::Daftar),
            _ => None,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_commands() {
        assert_eq!(Command::parse("/start"), Some(Command::Start));
        assert_eq!(Command::parse("/format"), Some(Command::Format));
        assert_eq!(Command::parse("/daftar"), Some(Command::Daftar));
    }

    #[test]
    fn test_parse_is_exact() {
        for text in ["/Start", "/start@appendiks_bot", "/daftar sekarang", "start", "/help", ""] {
            assert_eq!(Command::parse(text), None, "{text:?}");
        }
    }
}
