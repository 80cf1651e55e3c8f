//! Bot module - Core bot functionality.

pub mod dispatcher;
pub mod messenger;
mod runtime;
pub mod update;
pub mod webhook;

pub use dispatcher::AppState;
pub use messenger::TelegramMessenger;
pub use runtime::run;
