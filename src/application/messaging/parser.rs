//! Message parser - splits prefixed text into command token and arguments

use once_cell::sync::Lazy;
use regex_lite::Regex;

static MENTION_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^<@!?([0-9]{1,20})>$").unwrap());
static ID_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"^[0-9]{1,20}$").unwrap());

/// One successfully parsed command invocation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParsedCommand {
    pub command: String,
    pub args: Vec<String>,
    /// Raw text after the command token, untrimmed between words.
    pub body: String,
}

/// Parses incoming text against the configured command prefix.
pub struct MessageParser {
    prefix: String,
}

impl MessageParser {
    pub fn new(prefix: impl Into<String>) -> Self {
        Self {
            prefix: prefix.into(),
        }
    }

    pub fn prefix(&self) -> &str {
        &self.prefix
    }

    /// Returns `None` for anything that is not a command invocation:
    /// unprefixed text, a bare prefix, or whitespace after the prefix.
    pub fn parse(&self, text: &str) -> Option<ParsedCommand> {
        let rest = text.strip_prefix(&self.prefix)?;
        let command = rest.split_whitespace().next()?;
        if !rest.starts_with(command) {
            return None;
        }
        let body = rest[command.len()..].trim_start().to_string();
        let args = body.split_whitespace().map(str::to_string).collect();
        Some(ParsedCommand {
            command: command.to_string(),
            args,
            body,
        })
    }
}

/// Cursor over parsed arguments.
///
/// Each reader consumes its token only when it parses and passes the caller's
/// predicate; otherwise the cursor stays put so another reader can retry the
/// same token.
pub struct ArgReader<'a> {
    args: &'a [String],
    pos: usize,
}

impl<'a> ArgReader<'a> {
    pub fn new(args: &'a [String]) -> Self {
        Self { args, pos: 0 }
    }

    fn peek(&self) -> Option<&'a str> {
        self.args.get(self.pos).map(String::as_str)
    }

    pub fn next_int(&mut self, accept: impl Fn(i64) -> bool) -> Option<i64> {
        let value = self.peek()?.parse::<i64>().ok().filter(|v| accept(*v))?;
        self.pos += 1;
        Some(value)
    }

    pub fn next_str(&mut self, accept: impl Fn(&str) -> bool) -> Option<&'a str> {
        let token = self.peek().filter(|t| accept(t))?;
        self.pos += 1;
        Some(token)
    }

    /// Accepts a `<@id>` / `<@!id>` mention or a bare snowflake.
    pub fn next_user_id(&mut self, accept: impl Fn(&str) -> bool) -> Option<String> {
        let token = self.peek()?;
        let id = MENTION_RE
            .captures(token)
            .and_then(|c| c.get(1))
            .map(|m| m.as_str())
            .or_else(|| ID_RE.is_match(token).then_some(token))
            .filter(|id| accept(id))?;
        self.pos += 1;
        Some(id.to_string())
    }
}
