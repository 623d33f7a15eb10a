pub mod args;
pub mod error;
pub mod probe;
pub mod report;
pub mod scanner;
