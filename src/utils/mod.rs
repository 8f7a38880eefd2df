pub mod error;
pub mod json;
pub mod logger;
pub mod monitor;
pub mod validation;
