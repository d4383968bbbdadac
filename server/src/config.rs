use std::path::PathBuf;

use anyhow::{Context, Result};
use platform_store::StoreSettings;

#[derive(Clone, Debug)]
pub struct AppConfig {
    pub store: StoreSettings,
    pub cors_allowed_origins: Vec<String>,
}

impl AppConfig {
    pub fn load() -> Result<Self> {
        let store = StoreSettings::from_env().context("invalid BOTE_STORE")?;
        let cors_allowed_origins = parse_origins(
            &std::env::var("CORS_ALLOWED_ORIGINS")
                .unwrap_or_else(|_| "http://localhost:5173".into()),
        );

        Ok(Self {
            store,
            cors_allowed_origins,
        })
    }

    /// `--data-dir` wins over `BOTE_DATA_DIR`.
    pub fn with_data_dir(mut self, dir: Option<PathBuf>) -> Self {
        if let Some(dir) = dir {
            self.store.data_dir = dir;
        }
        self
    }
}

fn parse_origins(raw: &str) -> Vec<String> {
    raw.split(',')
        .filter_map(|s| {
            let trimmed = s.trim();
            if trimmed.is_empty() {
                None
            } else {
                Some(trimmed.to_string())
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use platform_store::StoreBackend;

    #[test]
    fn origins_skip_blank_entries() {
        assert_eq!(
            parse_origins(" http://a.test , ,http://b.test"),
            vec!["http://a.test".to_string(), "http://b.test".to_string()]
        );
        assert!(parse_origins("").is_empty());
    }

    #[test]
    fn cli_data_dir_overrides_settings() {
        let config = AppConfig {
            store: StoreSettings::new(StoreBackend::File, "/var/lib/bote"),
            cors_allowed_origins: Vec::new(),
        };
        let config = config.with_data_dir(Some(PathBuf::from("/tmp/bote")));
        assert_eq!(config.store.data_dir, PathBuf::from("/tmp/bote"));
        let config = config.with_data_dir(None);
        assert_eq!(config.store.data_dir, PathBuf::from("/tmp/bote"));
    }
}
