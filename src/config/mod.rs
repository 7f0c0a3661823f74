pub mod cli;
pub mod toml_config;

use crate::core::ConfigProvider;
use crate::llm::DEFAULT_API_ENDPOINT;
use crate::utils::error::Result;
use crate::utils::validation::{
    self, validate_file_extensions, validate_non_empty_string, validate_path,
    validate_positive_number, validate_range, validate_url, Validate,
};
use clap::Parser;
use serde::{Deserialize, Serialize};

/// Spread sizes the interactive surface offers: 3 for a focused answer,
/// 7 for a fuller overview.
pub const DRAW_CHOICES: [usize; 3] = [3, 5, 7];

fn parse_draw_count(s: &str) -> std::result::Result<usize, String> {
    let n: usize = s.parse().map_err(|_| format!("'{s}' is not a number"))?;
    if DRAW_CHOICES.contains(&n) {
        Ok(n)
    } else {
        Err(format!("draw count must be one of {DRAW_CHOICES:?}"))
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, Parser)]
#[command(name = "tarot-reader")]
#[command(about = "An interactive tarot reading assistant backed by an LLM")]
pub struct CliConfig {
    #[arg(
        long,
        default_value = "3",
        value_parser = parse_draw_count,
        help = "Number of cards to draw (3 for a focused answer, 5 or 7 for a fuller overview)"
    )]
    pub cards: usize,

    #[arg(long, help = "Your question or background, in natural language")]
    pub context: Option<String>,

    #[arg(long, default_value = "data/tarots.csv")]
    pub deck_path: String,

    #[arg(long, default_value = "images")]
    pub images_dir: String,

    #[arg(long, default_value = DEFAULT_API_ENDPOINT)]
    pub api_endpoint: String,

    #[arg(long, default_value = "qwen-plus")]
    pub model: String,

    #[arg(long, default_value = "0.8")]
    pub temperature: f32,

    #[arg(long, default_value = "0.8")]
    pub top_p: f32,

    #[arg(long, default_value = "2000")]
    pub max_tokens: u32,

    #[arg(long, help = "Optional TOML configuration file")]
    pub config: Option<String>,

    #[arg(long, help = "Enable verbose output")]
    pub verbose: bool,
}

impl ConfigProvider for CliConfig {
    fn deck_path(&self) -> &str {
        &self.deck_path
    }

    fn images_dir(&self) -> &str {
        &self.images_dir
    }

    fn api_endpoint(&self) -> &str {
        &self.api_endpoint
    }

    fn model_id(&self) -> &str {
        &self.model
    }

    fn temperature(&self) -> f32 {
        self.temperature
    }

    fn top_p(&self) -> f32 {
        self.top_p
    }

    fn max_tokens(&self) -> u32 {
        self.max_tokens
    }
}

impl Validate for CliConfig {
    fn validate(&self) -> Result<()> {
        validate_path("deck_path", &self.deck_path)?;
        validate_file_extensions("deck_path", std::slice::from_ref(&self.deck_path), &["csv"])?;
        validate_path("images_dir", &self.images_dir)?;
        validate_url("api_endpoint", &self.api_endpoint)?;
        validate_non_empty_string("model", &self.model)?;
        validate_range("temperature", self.temperature, 0.0, 1.0)?;
        validate_range("top_p", self.top_p, 0.0, 1.0)?;
        validate_positive_number("max_tokens", self.max_tokens as usize, 1)?;
        validate_positive_number("cards", self.cards, 1)?;
        if let Some(path) = &self.config {
            validation::validate_file_extensions("config", std::slice::from_ref(path), &["toml"])?;
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn base_config() -> CliConfig {
        CliConfig {
            cards: 3,
            context: Some("a question".to_string()),
            deck_path: "data/tarots.csv".to_string(),
            images_dir: "images".to_string(),
            api_endpoint: DEFAULT_API_ENDPOINT.to_string(),
            model: "qwen-plus".to_string(),
            temperature: 0.8,
            top_p: 0.8,
            max_tokens: 2000,
            config: None,
            verbose: false,
        }
    }

    #[test]
    fn default_like_config_validates() {
        assert!(base_config().validate().is_ok());
    }

    #[test]
    fn draw_count_parser_enforces_the_fixed_choices() {
        assert_eq!(parse_draw_count("3").unwrap(), 3);
        assert_eq!(parse_draw_count("7").unwrap(), 7);
        assert!(parse_draw_count("4").is_err());
        assert!(parse_draw_count("zero").is_err());
    }

    #[test]
    fn out_of_range_sampling_parameters_are_rejected() {
        let mut config = base_config();
        config.temperature = 1.5;
        assert!(config.validate().is_err());

        let mut config = base_config();
        config.top_p = -0.2;
        assert!(config.validate().is_err());
    }

    #[test]
    fn non_csv_deck_path_is_rejected() {
        let mut config = base_config();
        config.deck_path = "deck.json".to_string();
        assert!(config.validate().is_err());
    }
}
