pub mod error;
pub mod output;
pub mod reader;
pub mod reports;
