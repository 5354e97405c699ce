use std::collections::BTreeMap;
use std::fs;
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use teloxide::types::ChatId;
use thiserror::Error;

use crate::config::Messages;

#[derive(Debug, Error)]
pub enum StoreError {
    #[error("i/o error: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid list file: {0}")]
    Json(#[from] serde_json::Error),
}

/// Chat id to list of items. serde_json writes the integer keys as strings.
pub type ChatLists = BTreeMap<i64, Vec<String>>;

/// The lists of all chats, mirrored to a JSON file after every change.
#[derive(Debug)]
pub struct ListStore {
    path: PathBuf,
    lists: ChatLists,
}

impl ListStore {
    /// Opens the store at `path`. An unreadable or corrupt file is not fatal,
    /// the store then starts out empty.
    pub fn load(path: impl Into<PathBuf>) -> Self {
        let path = path.into();
        let lists = match Self::read(&path) {
            Ok(lists) => {
                log::info!("Loaded lists of {} chats from {}", lists.len(), path.display());
                lists
            }
            Err(e) => {
                log::warn!("Could not read from file {}: {e}", path.display());
                ChatLists::new()
            }
        };

        Self { path, lists }
    }

    pub fn read(path: &Path) -> Result<ChatLists, StoreError> {
        let content = fs::read_to_string(path)?;
        Ok(serde_json::from_str(&content)?)
    }

    /// Replaces the whole file, going through a temporary sibling file.
    pub fn save(&self) -> Result<(), StoreError> {
        let tmp_path = self.path.with_extension("json.tmp");
        {
            let mut writer = BufWriter::new(fs::File::create(&tmp_path)?);
            serde_json::to_writer(&mut writer, &self.lists)?;
            writer.flush()?;
        }
        fs::rename(&tmp_path, &self.path)?;
        Ok(())
    }

    fn persist(&self) {
        if let Err(e) = self.save() {
            log::error!("Could not write to file {}: {e}", self.path.display());
        }
    }

    #[allow(unused)]
    pub fn lists(&self) -> &ChatLists {
        &self.lists
    }

    pub fn items(&self, chat_id: ChatId) -> Option<&[String]> {
        self.lists.get(&chat_id.0).map(Vec::as_slice)
    }

    pub fn add_items<I, S>(&mut self, chat_id: ChatId, items: I)
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        self.lists
            .entry(chat_id.0)
            .or_default()
            .extend(items.into_iter().map(Into::into));
        self.persist();
    }

    /// Removes the first occurrence of `item`. Does not persist.
    pub fn remove_item(&mut self, chat_id: ChatId, item: &str) -> bool {
        let Some(list) = self.lists.get_mut(&chat_id.0) else {
            return false;
        };
        match list.iter().position(|i| i == item) {
            Some(index) => {
                list.remove(index);
                true
            }
            None => false,
        }
    }

    /// Removes the first occurrence of each item and returns how many were
    /// found. The file is written even if nothing matched.
    pub fn remove_items<'a>(
        &mut self,
        chat_id: ChatId,
        items: impl IntoIterator<Item = &'a str>,
    ) -> usize {
        let removed = items
            .into_iter()
            .filter(|item| self.remove_item(chat_id, item))
            .count();
        self.persist();
        removed
    }

    /// Empties the list of a chat that has one. Chats without an entry keep
    /// having none.
    pub fn flush(&mut self, chat_id: ChatId) -> bool {
        let Some(list) = self.lists.get_mut(&chat_id.0) else {
            return false;
        };
        list.clear();
        self.persist();
        true
    }

    pub fn render(&self, chat_id: ChatId, messages: &Messages) -> String {
        match self.items(chat_id) {
            Some(items) if !items.is_empty() => {
                let mut text = messages.list_begin.clone();
                for item in items {
                    text += &messages.list_before;
                    text += item;
                    text += &messages.list_after;
                }
                text
            }
            _ => messages.list_empty.clone(),
        }
    }
}
