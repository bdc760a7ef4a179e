//! Command interpreter
//!
//! Requests are short HTTP-like texts such as `GET /color1?r=10&g=20&b=30`.
//! The interpreter looks for the first occurrence of every known command path,
//! parses its query arguments and returns the valid commands in a fixed order.
//! Malformed commands are dropped; the rest of the request still applies.

use core::fmt;

#[cfg(feature = "esp32-log")]
use esp_println::println;
use heapless::Vec;

use crate::color::RawColor;
use crate::filter::Brightness;
use crate::fixture::FixtureId;

/// Largest request accepted from a connection, in bytes
pub const MAX_REQUEST_LEN: usize = 1024;

/// Upper bound of commands found in one request
pub const MAX_COMMANDS: usize = KEYWORDS.len();

/// Commands parsed from one request, in application order
pub type Commands = Vec<Command, MAX_COMMANDS>;

/// Validated lamp command
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// Light up with the first palette color
    On,
    /// Turn everything off and park the servos
    Off,
    /// Start the rainbow animation from the beginning
    Rainbow,
    /// Change the global brightness
    SetBrightness(Brightness),
    /// Paint one fixture with a custom color
    SetColor { fixture: FixtureId, color: RawColor },
}

/// Reason a command token was discarded
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseError {
    /// A required query key is absent
    MissingArgument(&'static str),
    /// A query value is not an integer
    InvalidNumber(&'static str),
    /// `/rainbow` with a state other than `on`
    UnsupportedState,
}

impl fmt::Display for ParseError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::MissingArgument(key) => write!(f, "missing argument `{key}`"),
            Self::InvalidNumber(key) => write!(f, "argument `{key}` is not an integer"),
            Self::UnsupportedState => write!(f, "unsupported rainbow state"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Keyword {
    On,
    Off,
    Rainbow,
    Brightness,
    Color(FixtureId),
}

/// Keywords in the order their commands are applied
const KEYWORDS: [Keyword; 7] = [
    Keyword::On,
    Keyword::Off,
    Keyword::Rainbow,
    Keyword::Brightness,
    Keyword::Color(FixtureId::One),
    Keyword::Color(FixtureId::Two),
    Keyword::Color(FixtureId::Three),
];

impl Keyword {
    const fn path(self) -> &'static str {
        match self {
            Self::On => "/on",
            Self::Off => "/off",
            Self::Rainbow => "/rainbow",
            Self::Brightness => "/brightness",
            Self::Color(FixtureId::One) => "/color1",
            Self::Color(FixtureId::Two) => "/color2",
            Self::Color(FixtureId::Three) => "/color3",
        }
    }

    fn parse(self, query: &str) -> Result<Command, ParseError> {
        match self {
            Self::On => Ok(Command::On),
            Self::Off => Ok(Command::Off),
            Self::Rainbow => match query_param(query, "state") {
                Some("on") => Ok(Command::Rainbow),
                Some(_) => Err(ParseError::UnsupportedState),
                None => Err(ParseError::MissingArgument("state")),
            },
            Self::Brightness => {
                let level = int_param(query, "value")?;
                Ok(Command::SetBrightness(Brightness::from_level(level)))
            }
            Self::Color(fixture) => {
                let color = RawColor::new(
                    int_param(query, "r")?,
                    int_param(query, "g")?,
                    int_param(query, "b")?,
                );
                Ok(Command::SetColor { fixture, color })
            }
        }
    }
}

/// Parse every recognized command out of a raw request
pub fn parse_request(request: &str) -> Commands {
    let mut commands = Commands::new();

    for keyword in KEYWORDS {
        let Some(query) = find_segment(request, keyword.path()) else {
            continue;
        };
        match keyword.parse(query) {
            Ok(command) => {
                let _ = commands.push(command);
            }
            Err(_err) => {
                #[cfg(feature = "esp32-log")]
                println!("[Command] dropping {}: {}", keyword.path(), _err);
            }
        }
    }

    commands
}

/// Decode raw request bytes, keeping the valid UTF-8 prefix
pub fn request_text(bytes: &[u8]) -> &str {
    match core::str::from_utf8(bytes) {
        Ok(text) => text,
        Err(err) => {
            let valid = &bytes[..err.valid_up_to()];
            core::str::from_utf8(valid).unwrap_or_default()
        }
    }
}

/// Find the first `path` that ends at a token boundary and return its query
fn find_segment<'a>(request: &'a str, path: &str) -> Option<&'a str> {
    for (start, _) in request.match_indices(path) {
        let rest = &request[start + path.len()..];
        match rest.chars().next() {
            None => return Some(""),
            Some(c) if is_separator(c) => return Some(""),
            Some('?') => {
                let query = &rest[1..];
                let end = query.find(is_separator).unwrap_or(query.len());
                return Some(&query[..end]);
            }
            Some(_) => {}
        }
    }
    None
}

fn is_separator(c: char) -> bool {
    c.is_ascii_whitespace() || c == '/'
}

fn query_param<'a>(query: &'a str, key: &str) -> Option<&'a str> {
    query
        .split('&')
        .filter_map(|pair| pair.split_once('='))
        .find_map(|(name, value)| (name == key).then_some(value))
}

fn int_param(query: &str, key: &'static str) -> Result<i32, ParseError> {
    let value = query_param(query, key).ok_or(ParseError::MissingArgument(key))?;
    value
        .parse::<i32>()
        .map_err(|_| ParseError::InvalidNumber(key))
}
