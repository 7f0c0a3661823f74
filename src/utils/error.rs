use thiserror::Error;

#[derive(Error, Debug)]
pub enum TarotError {
    #[error("API request failed: {0}")]
    ApiError(#[from] reqwest::Error),

    #[error("CSV processing error: {0}")]
    CsvError(#[from] csv::Error),

    #[error("IO error: {0}")]
    IoError(#[from] std::io::Error),

    #[error("Serialization error: {0}")]
    SerializationError(#[from] serde_json::Error),

    #[error("Deck data error: {message}")]
    DataLoadError { message: String },

    #[error("Cannot draw {requested} cards from a deck of {available}")]
    InsufficientCardsError { requested: usize, available: usize },

    #[error("Configuration error: {message}")]
    ConfigError { message: String },

    #[error("Missing required configuration: {field}")]
    MissingConfigError { field: String },

    #[error("Invalid value for {field}: '{value}' ({reason})")]
    InvalidConfigValueError {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Prompt template error: {message}")]
    TemplateError { message: String },

    #[error("Card image not found: {path}")]
    AssetMissingError { path: String },
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorSeverity {
    /// Degraded output, reading still produced.
    Low,
    /// Action rejected; the user can adjust input and try again.
    Medium,
    /// Action failed outright.
    High,
    /// Startup cannot proceed.
    Critical,
}

impl TarotError {
    pub fn severity(&self) -> ErrorSeverity {
        match self {
            TarotError::AssetMissingError { .. } => ErrorSeverity::Low,
            TarotError::InsufficientCardsError { .. } => ErrorSeverity::Medium,
            TarotError::ApiError(_)
            | TarotError::SerializationError(_)
            | TarotError::TemplateError { .. } => ErrorSeverity::High,
            TarotError::CsvError(_)
            | TarotError::IoError(_)
            | TarotError::DataLoadError { .. }
            | TarotError::ConfigError { .. }
            | TarotError::MissingConfigError { .. }
            | TarotError::InvalidConfigValueError { .. } => ErrorSeverity::Critical,
        }
    }

    pub fn user_friendly_message(&self) -> String {
        match self {
            TarotError::DataLoadError { message } => {
                format!("The tarot deck could not be loaded: {}", message)
            }
            TarotError::CsvError(e) => {
                format!("The tarot deck file could not be parsed: {}", e)
            }
            TarotError::IoError(e) => format!("A file could not be read: {}", e),
            TarotError::InsufficientCardsError {
                requested,
                available,
            } => format!(
                "You asked for {} cards but the deck only holds {}",
                requested, available
            ),
            TarotError::MissingConfigError { field } => {
                format!("Required configuration '{}' is not set", field)
            }
            TarotError::InvalidConfigValueError { field, reason, .. } => {
                format!("Configuration '{}' is invalid: {}", field, reason)
            }
            other => other.to_string(),
        }
    }

    pub fn recovery_suggestion(&self) -> &'static str {
        match self {
            TarotError::DataLoadError { .. } | TarotError::CsvError(_) => {
                "Check that the deck CSV exists and has the columns card;upright;reversed;symbolism"
            }
            TarotError::IoError(_) => "Check file paths and permissions",
            TarotError::InsufficientCardsError { .. } => "Request fewer cards or load a larger deck",
            TarotError::ConfigError { .. }
            | TarotError::MissingConfigError { .. }
            | TarotError::InvalidConfigValueError { .. } => {
                "Review the CLI flags, the TOML config file and the DASHSCOPE_API_KEY environment variable"
            }
            TarotError::ApiError(_) => "Check network connectivity and the API endpoint",
            TarotError::TemplateError { .. } => {
                "Restore the {card_details}, {context} and {symbolism} placeholders in the prompt template"
            }
            TarotError::AssetMissingError { .. } => "Add the card image under the images directory",
            TarotError::SerializationError(_) => "Check the backend response format",
        }
    }
}

pub type Result<T> = std::result::Result<T, TarotError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn insufficient_cards_message_names_both_counts() {
        let e = TarotError::InsufficientCardsError {
            requested: 7,
            available: 3,
        };
        assert!(e.to_string().contains('7'));
        assert!(e.to_string().contains('3'));
        assert_eq!(e.severity(), ErrorSeverity::Medium);
    }

    #[test]
    fn data_load_is_critical() {
        let e = TarotError::DataLoadError {
            message: "no rows".into(),
        };
        assert_eq!(e.severity(), ErrorSeverity::Critical);
        assert!(e.user_friendly_message().contains("no rows"));
    }

    #[test]
    fn asset_missing_is_low_severity() {
        let e = TarotError::AssetMissingError {
            path: "images/thefool.jpg".into(),
        };
        assert_eq!(e.severity(), ErrorSeverity::Low);
        assert!(e.to_string().contains("thefool.jpg"));
    }
}
