use teloxide::types::ChatId;

pub fn help(delimiter: char) -> String {
    format!(
        "Telegram list bot\nA simple bot storing list \n\n\
         /start : Summary of the bot.\n\
         /add argument : Add argument to list. Several items may be added at the same time by separating them with {delimiter}.\n\
         /remove argument : Remove argument from list. Several items may be removed at the same time by separating them with {delimiter}.\n\
         /print : Print list.\n\
         /flush : Empty list."
    )
}

pub fn not_authorized() -> String {
    "I won't work on this chan. Type /help for help.".to_string()
}

pub fn unknown_chat(chat_id: ChatId) -> String {
    format!(
        "Bot will not work on this chan. You need to add the following chat id : {chat_id} to the chats list in the config file."
    )
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn help_mentions_delimiter_twice() {
        assert_eq!(help('|').matches("with |.").count(), 2);
    }

    #[test]
    fn unknown_chat_reveals_id() {
        assert!(unknown_chat(ChatId(-42)).contains(" -42 "));
    }
}
