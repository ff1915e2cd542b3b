pub mod error;
pub mod msg;
