use serde::Deserialize;
use std::path::PathBuf;

/// Server configuration.
///
/// Loaded from an optional YAML file named by the `CONFIG` environment
/// variable, with `LISTEN` and `FILES_DIR` overriding individual fields.
#[derive(Clone, Debug, Deserialize)]
pub struct Config {
    /// Address the TCP listener binds to
    #[serde(default = "default_listen_addr")]
    pub listen_addr: String,

    /// Directory served by the /files/ routes; file routes never match
    /// when this is absent
    #[serde(default)]
    pub files_dir: Option<PathBuf>,
}

fn default_listen_addr() -> String {
    "127.0.0.1:4221".to_string()
}

impl Default for Config {
    fn default() -> Self {
        Self {
            listen_addr: default_listen_addr(),
            files_dir: None,
        }
    }
}

impl Config {
    pub fn load() -> anyhow::Result<Self> {
        let mut cfg = match std::env::var("CONFIG") {
            Ok(path) => {
                let text = std::fs::read_to_string(&path)?;
                serde_yaml::from_str(&text)?
            }
            Err(_) => Self::default(),
        };

        if let Ok(addr) = std::env::var("LISTEN") {
            cfg.listen_addr = addr;
        }
        if let Ok(dir) = std::env::var("FILES_DIR") {
            cfg.files_dir = Some(PathBuf::from(dir));
        }

        Ok(cfg)
    }
}
