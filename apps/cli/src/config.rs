use std::fs;
use std::path::{Path, PathBuf};

use higherme_client::DEFAULT_BASE_URL;
use serde::{Deserialize, Serialize};

const CONFIG_FILE_NAME: &str = "config.toml";
pub const BACKEND_URL_ENV: &str = "HIGHERME_BACKEND_URL";

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CliConfig {
    pub backend_url: String,
}

impl Default for CliConfig {
    fn default() -> Self {
        Self {
            backend_url: DEFAULT_BASE_URL.to_string(),
        }
    }
}

#[derive(Debug, Clone)]
pub struct ConfigPaths {
    pub file: PathBuf,
}

#[derive(Debug, Clone)]
pub struct ConfigLoad {
    pub config: CliConfig,
    pub paths: ConfigPaths,
    pub created: bool,
}

pub fn load_or_create(dir: &Path) -> Result<ConfigLoad, String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let file = dir.join(CONFIG_FILE_NAME);
    let paths = ConfigPaths { file };

    if paths.file.exists() {
        let contents = fs::read_to_string(&paths.file)
            .map_err(|err| format!("read config {}: {}", paths.file.display(), err))?;
        let config: CliConfig = toml::from_str(&contents)
            .map_err(|err| format!("parse config {}: {}", paths.file.display(), err))?;
        return Ok(ConfigLoad {
            config,
            paths,
            created: false,
        });
    }

    let config = CliConfig::default();
    let contents =
        toml::to_string_pretty(&config).map_err(|err| format!("serialize config: {}", err))?;
    fs::write(&paths.file, contents)
        .map_err(|err| format!("write config {}: {}", paths.file.display(), err))?;

    Ok(ConfigLoad {
        config,
        paths,
        created: true,
    })
}

/// Flag beats environment beats config file.
pub fn resolve_backend_url(
    flag: Option<String>,
    env: Option<String>,
    config: &CliConfig,
) -> String {
    flag.or(env.filter(|value| !value.trim().is_empty()))
        .unwrap_or_else(|| config.backend_url.clone())
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::tempdir;

    #[test]
    fn first_load_writes_defaults() {
        let dir = tempdir().expect("temp dir");
        let nested = dir.path().join("higherme");

        let load = load_or_create(&nested).expect("load");
        assert!(load.created);
        assert_eq!(load.config, CliConfig::default());
        assert!(load.paths.file.exists());

        let again = load_or_create(&nested).expect("reload");
        assert!(!again.created);
        assert_eq!(again.config.backend_url, DEFAULT_BASE_URL);
    }

    #[test]
    fn reads_existing_config() {
        let dir = tempdir().expect("temp dir");
        fs::write(
            dir.path().join(CONFIG_FILE_NAME),
            "backend_url = \"https://api.higherme.test\"\n",
        )
        .expect("write config");

        let load = load_or_create(dir.path()).expect("load");
        assert_eq!(load.config.backend_url, "https://api.higherme.test");
    }

    #[test]
    fn rejects_malformed_config() {
        let dir = tempdir().expect("temp dir");
        fs::write(dir.path().join(CONFIG_FILE_NAME), "backend_url = 3").expect("write config");

        let err = load_or_create(dir.path()).expect_err("bad config");
        assert!(err.starts_with("parse config"));
    }

    #[test]
    fn backend_url_precedence() {
        let config = CliConfig {
            backend_url: "http://from-file".to_string(),
        };
        assert_eq!(
            resolve_backend_url(
                Some("http://from-flag".to_string()),
                Some("http://from-env".to_string()),
                &config
            ),
            "http://from-flag"
        );
        assert_eq!(
            resolve_backend_url(None, Some("http://from-env".to_string()), &config),
            "http://from-env"
        );
        assert_eq!(
            resolve_backend_url(None, Some("  ".to_string()), &config),
            "http://from-file"
        );
        assert_eq!(resolve_backend_url(None, None, &config), "http://from-file");
    }
}
