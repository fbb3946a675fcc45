//! Layered runtime configuration: file → environment → CLI.
//!
//! Values come from `taskboard.toml` in the working directory (or a path in
//! `TASKBOARD_CONFIG`), then environment variables, then CLI flags applied
//! by the caller. A `.env` file is honored before the environment is read.
//!
//! ```toml
//! server_url = "http://localhost:8080"
//! session_file = "/home/ada/.local/share/taskboard/session.json"
//! ```

use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use serde::Deserialize;

use crate::session::SessionFile;

pub const DEFAULT_SERVER_URL: &str = "http://localhost:8080";

const CONFIG_FILE: &str = "taskboard.toml";

#[derive(Debug, Clone, Default, Deserialize)]
struct FileConfig {
    #[serde(default)]
    server_url: Option<String>,
    #[serde(default)]
    session_file: Option<PathBuf>,
}

#[derive(Debug, Clone)]
pub struct Config {
    pub server_url: String,
    pub session_path: PathBuf,
}

impl Config {
    /// Resolve configuration from file and environment. `server_url_flag`
    /// is the CLI override and wins over both.
    pub fn load(server_url_flag: Option<String>) -> Result<Self> {
        // Errors here mean "no .env file", which is fine.
        let _ = dotenvy::dotenv();

        let file = match std::env::var_os("TASKBOARD_CONFIG") {
            Some(path) => Self::read_file(Path::new(&path))?,
            None => {
                let default = Path::new(CONFIG_FILE);
                if default.exists() {
                    Self::read_file(default)?
                } else {
                    FileConfig::default()
                }
            }
        };

        Ok(Self::resolve(
            server_url_flag,
            std::env::var("TASKBOARD_SERVER_URL").ok(),
            std::env::var_os("TASKBOARD_SESSION_FILE").map(PathBuf::from),
            file,
        ))
    }

    /// Layer the sources: flag > environment > file > built-in default.
    fn resolve(
        server_url_flag: Option<String>,
        env_server_url: Option<String>,
        env_session_file: Option<PathBuf>,
        file: FileConfig,
    ) -> Self {
        let server_url = server_url_flag
            .or(env_server_url)
            .or(file.server_url)
            .unwrap_or_else(|| DEFAULT_SERVER_URL.to_string());

        let session_path = env_session_file
            .or(file.session_file)
            .unwrap_or_else(SessionFile::default_path);

        Self {
            server_url: server_url.trim_end_matches('/').to_string(),
            session_path,
        }
    }

    fn read_file(path: &Path) -> Result<FileConfig> {
        let raw = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read config file {}", path.display()))?;
        toml::from_str(&raw)
            .with_context(|| format!("failed to parse config file {}", path.display()))
    }

    pub fn session_file(&self) -> SessionFile {
        SessionFile::new(self.session_path.clone())
    }
}
