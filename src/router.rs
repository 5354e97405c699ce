use std::sync::Arc;

use teloxide::types::ChatId;
use tokio::sync::Mutex;

use crate::command::{split_items, Command};
use crate::config::Config;
use crate::messages;
use crate::store::ListStore;

/// Checks authorization and applies commands to the shared store.
///
/// Unauthorized chats only get an answer to `/start` and `/help`; every other
/// command is silently dropped for them. Returns the text to send back, if any.
#[derive(Clone)]
pub struct CommandRouter {
    config: Arc<Config>,
    store: Arc<Mutex<ListStore>>,
}

impl CommandRouter {
    pub fn new(config: Arc<Config>, store: ListStore) -> Self {
        Self {
            config,
            store: Arc::new(Mutex::new(store)),
        }
    }

    #[allow(unused)]
    pub fn store(&self) -> &Arc<Mutex<ListStore>> {
        &self.store
    }

    pub async fn handle(&self, chat_id: ChatId, cmd: Command) -> Option<String> {
        let authorized = self.config.is_authorized(chat_id);

        match cmd {
            Command::Start => self.start(chat_id, authorized),
            Command::Help => Some(self.help(chat_id, authorized)),
            _ if !authorized => None,
            Command::Add { items } => {
                self.add(chat_id, items?.as_str()).await;
                None
            }
            Command::Remove { items } => {
                self.remove(chat_id, items?.as_str()).await;
                None
            }
            Command::Print => Some(self.print(chat_id).await),
            Command::Flush => {
                self.store.lock().await.flush(chat_id);
                None
            }
        }
    }

    fn start(&self, chat_id: ChatId, authorized: bool) -> Option<String> {
        if authorized {
            let start = &self.config.messages.start;
            (!start.is_empty()).then(|| start.clone())
        } else {
            log::info!("Chat with id {chat_id} tried to communicate but the id is not in the list");
            Some(messages::not_authorized())
        }
    }

    fn help(&self, chat_id: ChatId, authorized: bool) -> String {
        if authorized {
            messages::help(self.config.delimiter)
        } else {
            messages::unknown_chat(chat_id)
        }
    }

    async fn add(&self, chat_id: ChatId, raw: &str) {
        let items = split_items(raw, self.config.delimiter);
        self.store.lock().await.add_items(chat_id, items);
    }

    async fn remove(&self, chat_id: ChatId, raw: &str) {
        let items = split_items(raw, self.config.delimiter);
        let removed = self.store.lock().await.remove_items(chat_id, items);
        log::debug!("Removed {removed} items from list of {chat_id}");
    }

    async fn print(&self, chat_id: ChatId) -> String {
        self.store
            .lock()
            .await
            .render(chat_id, &self.config.messages)
    }
}
