use teloxide::macros::BotCommands;
use teloxide::utils::command::ParseError;

/// Everything after the command token, minus the one separating whitespace
/// teloxide already consumed. Empty means no argument was given.
fn argument(s: String) -> Result<(Option<String>,), ParseError> {
    Ok((Some(s).filter(|s| !s.is_empty()),))
}

#[derive(BotCommands, Clone, Debug, PartialEq, Eq)]
#[command(
    rename_rule = "lowercase",
    description = "These commands are supported:"
)]
pub enum Command {
    #[command(description = "summary of the bot.")]
    Start,
    #[command(description = "show the usage.")]
    Help,
    #[command(description = "add items to the list.", parse_with = argument)]
    Add { items: Option<String> },
    #[command(description = "remove items from the list.", parse_with = argument)]
    Remove { items: Option<String> },
    #[command(description = "print the list.")]
    Print,
    #[command(description = "empty the list.")]
    Flush,
}

/// Splits a raw argument into items. Pieces are not trimmed and empty pieces
/// are kept.
pub fn split_items(raw: &str, delimiter: char) -> impl Iterator<Item = &str> {
    raw.split(delimiter)
}
