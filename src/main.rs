mod command;
mod config;
mod messages;
mod router;
mod store;

use std::path::PathBuf;
use std::sync::Arc;

use command::Command;
use config::{Config, ConfigError};
use dptree::deps;
use router::CommandRouter;
use store::ListStore;
use teloxide::adaptors::throttle::Limits;
use teloxide::adaptors::Throttle;
use teloxide::prelude::*;
use thiserror::Error;

#[derive(Debug, Error)]
enum StartupError {
    #[error(transparent)]
    Config(#[from] ConfigError),
    #[error("unable to grab bot: {0}")]
    Bot(#[from] teloxide::RequestError),
}

fn config_path() -> PathBuf {
    std::env::args_os()
        .nth(1)
        .or_else(|| std::env::var_os("LISTBOT_CONFIG"))
        .map(PathBuf::from)
        .unwrap_or_else(|| PathBuf::from("config.toml"))
}

async fn run() -> Result<(), StartupError> {
    let config = Config::load(&config_path(), std::env::var("TELOXIDE_TOKEN").ok())?;
    log::info!("Configuration loaded");

    let bot = Bot::new(&config.token).throttle(Limits::default());
    let me = bot.get_me().await?;
    log::info!("Bot {} grabbed.", me.username());

    let store = ListStore::load(&config.list_file);
    let router = CommandRouter::new(Arc::new(config), store);

    let answer = |bot: Throttle<Bot>, msg: Message, cmd: Command, router: CommandRouter| async move {
        log::debug!("{:?} from {}", cmd, msg.chat.id);
        if let Some(reply) = router.handle(msg.chat.id, cmd).await {
            bot.send_message(msg.chat.id, reply).await?;
        }
        Ok::<(), teloxide::RequestError>(())
    };

    Dispatcher::builder(
        bot,
        Update::filter_message()
            .filter_command::<Command>()
            .endpoint(answer),
    )
    .dependencies(deps![router])
    .default_handler(|_| async {})
    .enable_ctrlc_handler()
    .build()
    .dispatch()
    .await;

    Ok(())
}

#[tokio::main]
async fn main() {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();
    log::info!("Starting bot...");

    if let Err(e) = run().await {
        log::error!("{e}");
        std::process::exit(1);
    }
}
