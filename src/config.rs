use crate::error::TriviaError;
use figment::{
    Figment,
    providers::{Env, Format, Serialized, Toml},
};
use serde::{Deserialize, Serialize};

pub const CONFIG_FILE: &str = "config.toml";
pub const ENV_PREFIX: &str = "TRIVIA_";

/// Runtime configuration, layered as defaults < `config.toml` < `TRIVIA_*` env.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct Config {
    pub basic: BasicConfig,
    pub quiz: QuizConfig,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct BasicConfig {
    pub listen_addr: String,
    pub database_url: String,
    pub loglevel: String,
    /// Insert the six standard categories on startup when missing.
    pub seed_categories: bool,
}

impl Default for BasicConfig {
    fn default() -> Self {
        Self {
            listen_addr: "0.0.0.0:8000".to_string(),
            database_url: "sqlite:trivia.sqlite".to_string(),
            loglevel: "info".to_string(),
            seed_categories: true,
        }
    }
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
#[serde(default)]
pub struct QuizConfig {
    pub page_size: usize,
    pub retry_budget: usize,
}

impl Default for QuizConfig {
    fn default() -> Self {
        Self {
            page_size: 10,
            retry_budget: 3,
        }
    }
}

impl Config {
    /// Load from `config.toml` in the working directory plus the environment.
    pub fn load() -> Result<Self, TriviaError> {
        Self::from_figment(
            Figment::from(Serialized::defaults(Config::default()))
                .merge(Toml::file(CONFIG_FILE))
                .merge(Env::prefixed(ENV_PREFIX).split("__")),
        )
    }

    pub fn from_figment(figment: Figment) -> Result<Self, TriviaError> {
        let cfg: Config = figment.extract()?;
        cfg.validate()?;
        Ok(cfg)
    }

    fn validate(&self) -> Result<(), TriviaError> {
        if self.quiz.page_size == 0 {
            return Err(figment::Error::from("quiz.page_size must be at least 1".to_string()).into());
        }
        if self.quiz.retry_budget == 0 {
            return Err(
                figment::Error::from("quiz.retry_budget must be at least 1".to_string()).into(),
            );
        }
        Ok(())
    }
}
