use std::fs::{self, OpenOptions};
use std::io::{self, Write};
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

const SESSION_FILE_NAME: &str = "session.toml";

/// Stored login, the CLI's stand-in for the browser's saved access token.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Session {
    pub access_token: String,
    pub username: String,
}

fn session_path(dir: &Path) -> PathBuf {
    dir.join(SESSION_FILE_NAME)
}

pub fn load(dir: &Path) -> Result<Option<Session>, String> {
    let path = session_path(dir);
    let contents = match fs::read_to_string(&path) {
        Ok(contents) => contents,
        Err(err) if err.kind() == io::ErrorKind::NotFound => return Ok(None),
        Err(err) => return Err(format!("read session {}: {}", path.display(), err)),
    };
    let session = toml::from_str(&contents)
        .map_err(|err| format!("parse session {}: {}", path.display(), err))?;
    Ok(Some(session))
}

pub fn save(dir: &Path, session: &Session) -> Result<(), String> {
    fs::create_dir_all(dir)
        .map_err(|err| format!("create config dir {}: {}", dir.display(), err))?;
    let path = session_path(dir);
    let contents =
        toml::to_string_pretty(session).map_err(|err| format!("serialize session: {}", err))?;
    write_private(&path, contents.as_bytes())
        .map_err(|err| format!("write session {}: {}", path.display(), err))
}

/// Writes `path` with owner-only permissions (0600) on unix.
fn write_private(path: &Path, contents: &[u8]) -> io::Result<()> {
    let mut options = OpenOptions::new();
    options.write(true).create(true).truncate(true);
    #[cfg(unix)]
    {
        use std::os::unix::fs::OpenOptionsExt;
        options.mode(0o600);
    }
    let mut file = options.open(path)?;
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        file.set_permissions(fs::Permissions::from_mode(0o600))?;
    }
    file.write_all(contents)
}

/// Returns whether a session existed.
pub fn clear(dir: &Path) -> Result<bool, String> {
    let path = session_path(dir);
    match fs::remove_file(&path) {
        Ok(()) => Ok(true),
        Err(err) if err.kind() == io::ErrorKind::NotFound => Ok(false),
        Err(err) => Err(format!("remove session {}: {}", path.display(), err)),
    }
}
