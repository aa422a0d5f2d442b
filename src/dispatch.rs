//! Text command parsing for the line protocol

use thiserror::Error;

use crate::commands::Command;

/// One parsed client line.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Request {
    Run(Command),
    Bye,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("unknown command '{0}'")]
    Unknown(String),

    #[error("invalid argument '{0}'")]
    BadArgument(String),

    #[error("wrong number of arguments for '{0}'")]
    Arity(String),
}

/// Parse a command line such as `ls`, `ls 3`, `play 2 7` or `goto 4`.
pub fn parse(line: &str) -> Result<Request, ParseError> {
    let mut words = line.split_whitespace();
    let Some(verb) = words.next() else {
        return Err(ParseError::Unknown(String::new()));
    };
    let args = words.map(parse_index).collect::<Result<Vec<_>, _>>()?;

    let arity = || ParseError::Arity(verb.to_string());
    let command = match (verb, args.as_slice()) {
        ("ls", []) => Command::ListPlaylists,
        ("ls", [playlist]) => Command::ListTracks { playlist: *playlist },
        ("status", []) => Command::Status,
        ("play", []) => Command::Play,
        ("play", [playlist]) => Command::PlayPlaylist { playlist: *playlist },
        ("play", [playlist, track]) => Command::PlayTrack {
            playlist: *playlist,
            track: *track,
        },
        ("stop", []) => Command::Stop,
        ("toggle", []) => Command::Toggle,
        ("next", []) => Command::Next,
        ("prev", []) => Command::Prev,
        ("goto", [index]) => Command::Goto { index: *index },
        ("bye", []) => return Ok(Request::Bye),
        ("ls" | "status" | "play" | "stop" | "toggle" | "next" | "prev" | "goto" | "bye", _) => {
            return Err(arity());
        }
        (other, _) => return Err(ParseError::Unknown(other.to_string())),
    };
    Ok(Request::Run(command))
}

fn parse_index(word: &str) -> Result<i64, ParseError> {
    word.parse::<i64>()
        .map_err(|_| ParseError::BadArgument(word.to_string()))
}
