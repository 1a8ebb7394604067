// Interactive session — one store kept alive across typed commands

use anyhow::{bail, Context, Result};
use chatstore_core::message::{encode, encode_pretty};
use chatstore_core::{ChatStore, UserId, NO_MESSAGE_ID};
use serde::Serialize;

pub const HELP: &str = "\
Commands:
  send <from> <to> <text...>   post a message, prints its id
  messages <a> <b>             conversation between two users
  contacts                     all users
  user <id>                    one user, {} when unknown
  clear <a> <b>                delete a conversation
  save | load                  snapshot / restore the session store
  stats                        counters
  help                         this text
  quit                         leave the session";

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SessionCommand {
    Send {
        from: UserId,
        to: UserId,
        text: String,
    },
    Messages(UserId, UserId),
    Contacts,
    User(UserId),
    Clear(UserId, UserId),
    Save,
    Load,
    Stats,
    Help,
    Quit,
}

fn parse_id(token: Option<&str>, what: &str) -> Result<UserId> {
    let token = token.with_context(|| format!("Missing {}", what))?;
    token
        .parse()
        .with_context(|| format!("Invalid {}: {}", what, token))
}

fn skip_tokens(input: &str, count: usize) -> &str {
    let mut rest = input;
    for _ in 0..count {
        rest = rest.trim_start();
        rest = match rest.find(char::is_whitespace) {
            Some(i) => &rest[i..],
            None => "",
        };
    }
    rest.trim_start()
}

/// Parse one input line. Blank lines yield `None`.
pub fn parse_line(line: &str) -> Result<Option<SessionCommand>> {
    let line = line.trim();
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim_start()),
        None => (line, ""),
    };
    let mut args = rest.split_whitespace();

    let command = match word {
        "" => return Ok(None),
        "send" => {
            let from = parse_id(args.next(), "sender id")?;
            let to = parse_id(args.next(), "receiver id")?;
            // Keep the text exactly as typed after the two ids
            let text = skip_tokens(rest, 2).to_string();
            SessionCommand::Send { from, to, text }
        }
        "messages" => SessionCommand::Messages(
            parse_id(args.next(), "user id")?,
            parse_id(args.next(), "user id")?,
        ),
        "contacts" => SessionCommand::Contacts,
        "user" => SessionCommand::User(parse_id(args.next(), "user id")?),
        "clear" => SessionCommand::Clear(
            parse_id(args.next(), "user id")?,
            parse_id(args.next(), "user id")?,
        ),
        "save" => SessionCommand::Save,
        "load" => SessionCommand::Load,
        "stats" => SessionCommand::Stats,
        "help" | "?" => SessionCommand::Help,
        "quit" | "exit" => SessionCommand::Quit,
        other => bail!("Unknown command: {} (try `help`)", other),
    };
    Ok(Some(command))
}

pub struct Session {
    store: ChatStore,
    pretty: bool,
}

impl Session {
    pub fn new(store: ChatStore, pretty: bool) -> Self {
        Self { store, pretty }
    }

    fn render<T: Serialize + ?Sized>(&self, value: &T) -> Result<String> {
        let json = if self.pretty {
            encode_pretty(value)
        } else {
            encode(value)
        };
        Ok(json?)
    }

    /// Run one command and return the text to print
    pub fn execute(&mut self, command: SessionCommand) -> Result<String> {
        let output = match command {
            SessionCommand::Send { from, to, text } => {
                let id = self.store.add_message(from, to, text);
                if id == NO_MESSAGE_ID {
                    bail!("Message not stored: message ids exhausted");
                }
                id.to_string()
            }
            SessionCommand::Messages(a, b) => self.render(&self.store.get_messages(a, b))?,
            SessionCommand::Contacts => self.render(&self.store.get_contacts())?,
            SessionCommand::User(id) => match self.store.get_user_info(id) {
                Some(user) => self.render(&user)?,
                None => chatstore_core::message::EMPTY_OBJECT.to_string(),
            },
            SessionCommand::Clear(a, b) => {
                self.store.clear_chat(a, b);
                "cleared".to_string()
            }
            SessionCommand::Save => {
                self.store.save_data()?;
                "saved".to_string()
            }
            SessionCommand::Load => {
                self.store.load_data()?;
                "loaded".to_string()
            }
            SessionCommand::Stats => self.render(&self.store.stats())?,
            SessionCommand::Help => HELP.to_string(),
            SessionCommand::Quit => String::new(),
        };
        Ok(output)
    }
}
