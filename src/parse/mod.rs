pub mod args;
pub mod types;

pub use args::{decode, encode};
pub use types::DecodeError;
