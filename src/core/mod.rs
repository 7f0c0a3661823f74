pub mod deck;
pub mod draw;
pub mod pipeline;
pub mod prompt;
pub mod reading;
pub mod resolver;

pub use crate::domain::model::{
    CardMeaning, DrawResult, DrawnCard, LlmRequest, LlmResponse, PromptInput, Reading,
};
pub use crate::domain::ports::{ConfigProvider, Pipeline, Storage};
pub use crate::utils::error::Result;
