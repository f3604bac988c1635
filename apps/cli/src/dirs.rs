use std::path::PathBuf;

const CONFIG_DIR_ENV: &str = "HIGHERME_CONFIG_DIR";
const CONFIG_DIR_NAME: &str = "higherme";

pub fn resolve_config_dir() -> Result<PathBuf, String> {
    config_dir_from(
        std::env::var(CONFIG_DIR_ENV).ok(),
        std::env::var("XDG_CONFIG_HOME").ok(),
        std::env::var("HOME").ok(),
    )
}

fn config_dir_from(
    explicit: Option<String>,
    xdg_config_home: Option<String>,
    home: Option<String>,
) -> Result<PathBuf, String> {
    if let Some(dir) = explicit.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(dir));
    }
    if let Some(base) = xdg_config_home.filter(|value| !value.is_empty()) {
        return Ok(PathBuf::from(base).join(CONFIG_DIR_NAME));
    }
    let home = home.ok_or_else(|| "resolve HOME: not set".to_string())?;
    Ok(PathBuf::from(home).join(".config").join(CONFIG_DIR_NAME))
}
