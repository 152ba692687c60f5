use crate::domain::questionnaire::{AnswerScale, ScoringConfig};
use crate::services::predictor::PredictorConfig;
use std::env;
use std::time::Duration;

#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("DATABASE_URL missing (set STORAGE_BACKEND=memory to run without Postgres)")]
    MissingDatabaseUrl,
    #[error("unknown STORAGE_BACKEND `{0}`")]
    UnknownStorage(String),
    #[error("{name} must be `binary` or `frequency`, got `{value}`")]
    InvalidScale { name: &'static str, value: String },
    #[error("{name} must be a positive integer, got `{value}`")]
    InvalidNumber { name: &'static str, value: String },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum StorageConfig {
    Postgres {
        database_url: String,
        max_connections: u32,
    },
    Memory,
}

#[derive(Debug, Clone)]
pub struct AppConfig {
    pub bind_addr: String,
    pub storage: StorageConfig,
    pub predictor: PredictorConfig,
    pub scoring: ScoringConfig,
}

impl AppConfig {
    pub fn from_env() -> Result<Self, ConfigError> {
        Self::from_lookup(|key| env::var(key).ok())
    }

    /// Builds the config from an arbitrary key lookup so it can be tested
    /// without touching the process environment.
    pub fn from_lookup<F>(lookup: F) -> Result<Self, ConfigError>
    where
        F: Fn(&str) -> Option<String>,
    {
        let bind_addr = lookup("BIND_ADDR").unwrap_or_else(|| {
            let port = lookup("PORT").unwrap_or_else(|| "5000".to_string());
            format!("0.0.0.0:{}", port)
        });

        let backend = lookup("STORAGE_BACKEND").unwrap_or_else(|| "postgres".to_string());
        let storage = match backend.trim().to_lowercase().as_str() {
            "postgres" | "pg" => StorageConfig::Postgres {
                database_url: lookup("DATABASE_URL").ok_or(ConfigError::MissingDatabaseUrl)?,
                max_connections: parse_positive(&lookup, "DATABASE_MAX_CONNECTIONS", 10)?,
            },
            "memory" => StorageConfig::Memory,
            other => return Err(ConfigError::UnknownStorage(other.to_string())),
        };

        let mut predictor = PredictorConfig::default();
        if let Some(url) = lookup("PREDICTOR_BASE_URL") {
            predictor.base_url = url;
        }
        predictor.timeout = Duration::from_secs(parse_positive(
            &lookup,
            "PREDICTOR_TIMEOUT_SECS",
            predictor.timeout.as_secs() as u32,
        )? as u64);

        let defaults = ScoringConfig::default();
        let scoring = ScoringConfig {
            panic_attacks: parse_scale(&lookup, "PANIC_ATTACKS_SCALE", defaults.panic_attacks)?,
            feeling_worthy: parse_scale(&lookup, "FEELING_WORTHY_SCALE", defaults.feeling_worthy)?,
        };

        Ok(Self {
            bind_addr,
            storage,
            predictor,
            scoring,
        })
    }
}

fn parse_positive<F>(lookup: &F, name: &'static str, default: u32) -> Result<u32, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => match value.trim().parse::<u32>() {
            Ok(n) if n > 0 => Ok(n),
            _ => Err(ConfigError::InvalidNumber { name, value }),
        },
    }
}

fn parse_scale<F>(lookup: &F, name: &'static str, default: AnswerScale) -> Result<AnswerScale, ConfigError>
where
    F: Fn(&str) -> Option<String>,
{
    match lookup(name) {
        None => Ok(default),
        Some(value) => {
            AnswerScale::try_from(value.as_str()).map_err(|_| ConfigError::InvalidScale { name, value })
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashMap;

    fn config(vars: &[(&str, &str)]) -> Result<AppConfig, ConfigError> {
        let vars: HashMap<String, String> = vars
            .iter()
            .map(|(k, v)| (k.to_string(), v.to_string()))
            .collect();
        AppConfig::from_lookup(|key| vars.get(key).cloned())
    }

    #[test]
    fn test_memory_defaults() {
        let cfg = config(&[("STORAGE_BACKEND", "memory")]).unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:5000");
        assert_eq!(cfg.storage, StorageConfig::Memory);
        assert_eq!(cfg.predictor.base_url, "http://127.0.0.1:5001");
        assert_eq!(cfg.predictor.timeout, Duration::from_secs(10));
        assert_eq!(cfg.scoring, ScoringConfig::default());
    }

    #[test]
    fn test_postgres_requires_url() {
        assert!(matches!(config(&[]), Err(ConfigError::MissingDatabaseUrl)));

        let cfg = config(&[
            ("DATABASE_URL", "postgres://localhost/mindscope"),
            ("DATABASE_MAX_CONNECTIONS", "4"),
            ("PORT", "8080"),
        ])
        .unwrap();
        assert_eq!(cfg.bind_addr, "0.0.0.0:8080");
        assert_eq!(
            cfg.storage,
            StorageConfig::Postgres {
                database_url: "postgres://localhost/mindscope".to_string(),
                max_connections: 4,
            }
        );
    }

    #[test]
    fn test_scales_from_env() {
        let cfg = config(&[
            ("STORAGE_BACKEND", "memory"),
            ("PANIC_ATTACKS_SCALE", "frequency"),
            ("FEELING_WORTHY_SCALE", "binary"),
        ])
        .unwrap();
        assert_eq!(cfg.scoring.panic_attacks, AnswerScale::Frequency);
        assert_eq!(cfg.scoring.feeling_worthy, AnswerScale::Binary);

        let err = config(&[("STORAGE_BACKEND", "memory"), ("PANIC_ATTACKS_SCALE", "often")]).unwrap_err();
        assert!(matches!(err, ConfigError::InvalidScale { name: "PANIC_ATTACKS_SCALE", .. }));
    }

    #[test]
    fn test_invalid_values() {
        assert!(matches!(
            config(&[("STORAGE_BACKEND", "mongo")]),
            Err(ConfigError::UnknownStorage(_))
        ));
        assert!(matches!(
            config(&[("STORAGE_BACKEND", "memory"), ("PREDICTOR_TIMEOUT_SECS", "0")]),
            Err(ConfigError::InvalidNumber { .. })
        ));
    }
}
