use serde::{Deserialize, Serialize};
use std::path::PathBuf;

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
pub struct Config {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub library: LibraryConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    /// Directory served as a fallback for any unmatched route (web UI)
    #[serde(default)]
    pub static_dir: Option<PathBuf>,
}

fn default_host() -> String {
    "0.0.0.0".to_string()
}
fn default_port() -> u16 {
    5000
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            static_dir: None,
        }
    }
}

#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct LibraryConfig {
    /// Line-oriented list of root directories, one per line
    #[serde(default = "default_dirs_file")]
    pub dirs_file: PathBuf,

    /// Roots listed inline; merged ahead of the dirs file
    #[serde(default)]
    pub directories: Vec<PathBuf>,

    /// Follow symlinks while walking roots
    #[serde(default = "default_follow_links")]
    pub follow_links: bool,
}

fn default_dirs_file() -> PathBuf {
    PathBuf::from("dir.conf")
}

fn default_follow_links() -> bool {
    true
}

impl Default for LibraryConfig {
    fn default() -> Self {
        Self {
            dirs_file: default_dirs_file(),
            directories: Vec::new(),
            follow_links: default_follow_links(),
        }
    }
}
