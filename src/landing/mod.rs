//! Landing submissions.
//!
//! Turns the free-form text an enumerator sends into a validated
//! [`Submission`].

mod parser;
mod volume;

pub use parser::{FieldKey, Submission};
pub use volume::Volume;
