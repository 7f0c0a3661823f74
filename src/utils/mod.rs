pub mod error;
pub mod images;
pub mod logger;
pub mod validation;
