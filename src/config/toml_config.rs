use crate::config::CliConfig;
use crate::core::prompt::PromptBuilder;
use crate::utils::error::{Result, TarotError};
use crate::utils::validation::{validate_non_empty_string, validate_range, validate_url, Validate};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Optional TOML configuration file. Every field falls back to the CLI
/// default when absent; `${ENV_VAR}` references are substituted from the
/// environment before parsing, so the API key never has to live in the
/// file itself.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct TomlConfig {
    pub reading: Option<ReadingSection>,
    pub llm: Option<LlmSection>,
    pub prompt: Option<PromptSection>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReadingSection {
    pub deck_path: Option<String>,
    pub images_dir: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct LlmSection {
    pub endpoint: Option<String>,
    pub model: Option<String>,
    pub temperature: Option<f32>,
    pub top_p: Option<f32>,
    pub max_tokens: Option<u32>,
    pub api_key: Option<String>,
}

#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct PromptSection {
    pub system_template: Option<String>,
    pub user_template: Option<String>,
}

impl TomlConfig {
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = std::fs::read_to_string(&path).map_err(TarotError::IoError)?;
        Self::from_toml_str(&content)
    }

    pub fn from_toml_str(content: &str) -> Result<Self> {
        let processed_content = Self::substitute_env_vars(content)?;

        toml::from_str(&processed_content).map_err(|e| TarotError::ConfigError {
            message: format!("TOML parsing error: {}", e),
        })
    }

    /// Substitute `${VAR_NAME}` references from the environment. Unset
    /// variables are left as-is so the caller can tell the value was never
    /// resolved.
    fn substitute_env_vars(content: &str) -> Result<String> {
        use regex::Regex;
        let re = Regex::new(r"\$\{([^}]+)\}").unwrap();

        let result = re.replace_all(content, |caps: &regex::Captures| {
            let var_name = &caps[1];
            std::env::var(var_name).unwrap_or_else(|_| format!("${{{}}}", var_name))
        });

        Ok(result.to_string())
    }

    pub fn validate_config(&self) -> Result<()> {
        if let Some(llm) = &self.llm {
            if let Some(endpoint) = &llm.endpoint {
                validate_url("llm.endpoint", endpoint)?;
            }
            if let Some(model) = &llm.model {
                validate_non_empty_string("llm.model", model)?;
            }
            if let Some(temperature) = llm.temperature {
                validate_range("llm.temperature", temperature, 0.0, 1.0)?;
            }
            if let Some(top_p) = llm.top_p {
                validate_range("llm.top_p", top_p, 0.0, 1.0)?;
            }
            if let Some(max_tokens) = llm.max_tokens {
                if max_tokens == 0 {
                    return Err(TarotError::InvalidConfigValueError {
                        field: "llm.max_tokens".to_string(),
                        value: "0".to_string(),
                        reason: "Value must be at least 1".to_string(),
                    });
                }
            }
        }
        Ok(())
    }

    /// API key from the file, if it resolved to something concrete. A value
    /// still carrying a `${...}` reference counts as unset.
    pub fn resolved_api_key(&self) -> Option<String> {
        self.llm
            .as_ref()
            .and_then(|llm| llm.api_key.clone())
            .filter(|key| !key.is_empty() && !key.starts_with("${"))
    }

    /// Prompt builder honoring any template overrides in the file.
    pub fn prompt_builder(&self) -> PromptBuilder {
        match &self.prompt {
            Some(section) => PromptBuilder::with_templates(
                section
                    .system_template
                    .clone()
                    .unwrap_or_else(|| crate::core::prompt::SYSTEM_TEMPLATE.to_string()),
                section
                    .user_template
                    .clone()
                    .unwrap_or_else(|| crate::core::prompt::USER_TEMPLATE.to_string()),
            ),
            None => PromptBuilder::new(),
        }
    }

    /// Fold file values into the CLI config; the file wins where set.
    pub fn overlay(&self, config: &mut CliConfig) {
        if let Some(reading) = &self.reading {
            if let Some(deck_path) = &reading.deck_path {
                config.deck_path = deck_path.clone();
            }
            if let Some(images_dir) = &reading.images_dir {
                config.images_dir = images_dir.clone();
            }
        }
        if let Some(llm) = &self.llm {
            if let Some(endpoint) = &llm.endpoint {
                config.api_endpoint = endpoint.clone();
            }
            if let Some(model) = &llm.model {
                config.model = model.clone();
            }
            if let Some(temperature) = llm.temperature {
                config.temperature = temperature;
            }
            if let Some(top_p) = llm.top_p {
                config.top_p = top_p;
            }
            if let Some(max_tokens) = llm.max_tokens {
                config.max_tokens = max_tokens;
            }
        }
    }
}

impl Validate for TomlConfig {
    fn validate(&self) -> Result<()> {
        self.validate_config()
    }
}
