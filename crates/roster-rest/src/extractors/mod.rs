//! Request extractors.

mod user_id;
mod validated;

pub use user_id::UserIdPath;
pub use validated::{ValidatedJson, ValidatedJsonRejection};
