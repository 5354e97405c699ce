use std::collections::HashSet;
use std::path::{Path, PathBuf};

use serde::Deserialize;
use teloxide::types::ChatId;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("unable to read config {path}: {source}")]
    Read {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("unable to parse config {path}: {source}")]
    Parse {
        path: PathBuf,
        source: toml::de::Error,
    },
    #[error("no bot token in config and TELOXIDE_TOKEN is not set")]
    MissingToken,
}

/// Texts the bot answers with. Every field can be overridden in `[messages]`.
#[derive(Debug, Clone, Deserialize)]
#[serde(default)]
pub struct Messages {
    pub start: String,
    pub list_begin: String,
    pub list_before: String,
    pub list_after: String,
    pub list_empty: String,
}

impl Default for Messages {
    fn default() -> Self {
        Self {
            start: "I'm a bot storing lists. Type /help for help.".to_string(),
            list_begin: "List :".to_string(),
            list_before: "\n- ".to_string(),
            list_after: String::new(),
            list_empty: "Nothing in the list.".to_string(),
        }
    }
}

#[derive(Debug, Deserialize)]
struct RawConfig {
    token: Option<String>,
    chats: Vec<i64>,
    #[serde(default = "default_delimiter")]
    delimiter: char,
    #[serde(default = "default_list_file")]
    list_file: PathBuf,
    #[serde(default)]
    messages: Messages,
}

fn default_delimiter() -> char {
    ';'
}

fn default_list_file() -> PathBuf {
    PathBuf::from("list.json")
}

#[derive(Debug, Clone)]
pub struct Config {
    pub token: String,
    pub chats: HashSet<ChatId>,
    pub delimiter: char,
    pub list_file: PathBuf,
    pub messages: Messages,
}

impl Config {
    /// Reads the TOML file at `path`.
    ///
    /// A relative `list_file` is resolved against the directory holding the
    /// config file. When the file has no `token`, `env_token` is used instead.
    pub fn load(path: &Path, env_token: Option<String>) -> Result<Self, ConfigError> {
        let content = std::fs::read_to_string(path).map_err(|source| ConfigError::Read {
            path: path.to_owned(),
            source,
        })?;
        let mut config = Self::parse(&content, env_token).map_err(|e| match e {
            ConfigError::Parse { source, .. } => ConfigError::Parse {
                path: path.to_owned(),
                source,
            },
            e => e,
        })?;

        if config.list_file.is_relative() {
            if let Some(dir) = path.parent() {
                config.list_file = dir.join(&config.list_file);
            }
        }

        Ok(config)
    }

    pub fn parse(content: &str, env_token: Option<String>) -> Result<Self, ConfigError> {
        let raw: RawConfig = toml::from_str(content).map_err(|source| ConfigError::Parse {
            path: PathBuf::new(),
            source,
        })?;

        let token = raw
            .token
            .filter(|t| !t.is_empty())
            .or(env_token.filter(|t| !t.is_empty()))
            .ok_or(ConfigError::MissingToken)?;

        Ok(Self {
            token,
            chats: raw.chats.into_iter().map(ChatId).collect(),
            delimiter: raw.delimiter,
            list_file: raw.list_file,
            messages: raw.messages,
        })
    }

    pub fn is_authorized(&self, chat_id: ChatId) -> bool {
        self.chats.contains(&chat_id)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn minimal_config_uses_defaults() {
        let config = Config::parse("token = \"abc\"\nchats = [1, -100]", None).unwrap();
        assert_eq!(config.token, "abc");
        assert!(config.is_authorized(ChatId(1)));
        assert!(config.is_authorized(ChatId(-100)));
        assert!(!config.is_authorized(ChatId(2)));
        assert_eq!(config.delimiter, ';');
        assert_eq!(config.list_file, PathBuf::from("list.json"));
        assert_eq!(config.messages.list_begin, "List :");
        assert_eq!(config.messages.list_before, "\n- ");
    }

    #[test]
    fn messages_can_be_partially_overridden() {
        let config = Config::parse(
            "token = \"abc\"\nchats = []\ndelimiter = \",\"\n[messages]\nstart = \"\"\nlist_empty = \"nope\"",
            None,
        )
        .unwrap();
        assert_eq!(config.delimiter, ',');
        assert_eq!(config.messages.start, "");
        assert_eq!(config.messages.list_empty, "nope");
        assert_eq!(config.messages.list_begin, "List :");
    }

    #[test]
    fn token_falls_back_to_environment() {
        let config = Config::parse("chats = [1]", Some("from-env".to_string())).unwrap();
        assert_eq!(config.token, "from-env");

        let config = Config::parse("token = \"file\"\nchats = [1]", Some("env".to_string())).unwrap();
        assert_eq!(config.token, "file");
    }

    #[test]
    fn missing_token_is_an_error() {
        assert!(matches!(
            Config::parse("chats = [1]", None),
            Err(ConfigError::MissingToken)
        ));
    }

    #[test]
    fn missing_chats_is_an_error() {
        assert!(matches!(
            Config::parse("token = \"abc\"", None),
            Err(ConfigError::Parse { .. })
        ));
    }

    #[test]
    fn delimiter_must_be_one_character() {
        assert!(Config::parse("token = \"a\"\nchats = []\ndelimiter = \";;\"", None).is_err());
    }

    #[test]
    fn load_resolves_list_file_next_to_config() {
        let dir = tempfile::TempDir::new().unwrap();
        let path = dir.path().join("config.toml");
        std::fs::write(&path, "token = \"abc\"\nchats = [1]\nlist_file = \"lists.json\"").unwrap();

        let config = Config::load(&path, None).unwrap();
        assert_eq!(config.list_file, dir.path().join("lists.json"));
    }

    #[test]
    fn load_of_missing_file_fails() {
        let dir = tempfile::TempDir::new().unwrap();
        assert!(matches!(
            Config::load(&dir.path().join("nope.toml"), Some("t".into())),
            Err(ConfigError::Read { .. })
        ));
    }
}
