pub mod config;
pub mod core;
pub mod domain;
pub mod llm;
pub mod utils;

pub use config::{cli::LocalStorage, toml_config::TomlConfig, CliConfig};
pub use core::deck::Deck;
pub use core::{pipeline::TarotPipeline, reading::ReadingEngine};
pub use llm::{LlmClient, LlmSettings};
pub use utils::error::{Result, TarotError};
