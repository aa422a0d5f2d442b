//! Tagged command results and their wire rendering

use thiserror::Error;

/// Why a command could not produce its payload.
///
/// The `Display` text is the message sent to the client.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CommandError {
    #[error("playlists container not loaded yet")]
    NotReady,

    #[error("invalid playlist")]
    InvalidPlaylist,

    #[error("invalid track number")]
    InvalidTrack,

    /// A lookup failed although the index passed its bounds check.
    #[error("internal error: {0}")]
    Inconsistent(String),
}

/// Outcome of one command.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Reply {
    Ready(String),
    NotReady,
    Invalid(CommandError),
}

impl Reply {
    /// Append the client-facing text to `out`.
    ///
    /// Never writes nothing: an empty payload becomes a lone newline, and
    /// failures become a single line prefixed with `- `.
    pub fn render(&self, out: &mut String) {
        match self {
            Reply::Ready(payload) if payload.is_empty() => out.push('\n'),
            Reply::Ready(payload) => out.push_str(payload),
            Reply::NotReady => out.push_str(&format!("- {}\n", CommandError::NotReady)),
            Reply::Invalid(err) => out.push_str(&format!("- {}\n", err)),
        }
    }
}

impl From<Result<String, CommandError>> for Reply {
    fn from(result: Result<String, CommandError>) -> Self {
        match result {
            Ok(payload) => Reply::Ready(payload),
            Err(CommandError::NotReady) => Reply::NotReady,
            Err(err) => Reply::Invalid(err),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn text(reply: Reply) -> String {
        let mut out = String::new();
        reply.render(&mut out);
        out
    }

    #[test]
    fn not_ready_message() {
        assert_eq!(text(Reply::NotReady), "- playlists container not loaded yet\n");
        assert_eq!(
            Reply::from(Err(CommandError::NotReady)),
            Reply::NotReady,
        );
    }

    #[test]
    fn invalid_replies_are_single_marked_lines() {
        assert_eq!(
            text(Reply::Invalid(CommandError::InvalidPlaylist)),
            "- invalid playlist\n"
        );
        assert_eq!(
            text(Reply::Invalid(CommandError::InvalidTrack)),
            "- invalid track number\n"
        );
        assert_eq!(
            text(Reply::Invalid(CommandError::Inconsistent("no track list".into()))),
            "- internal error: no track list\n"
        );
    }

    #[test]
    fn empty_success_is_a_newline() {
        assert_eq!(text(Reply::Ready(String::new())), "\n");
        assert_eq!(text(Reply::Ready("1 A (0)\n".into())), "1 A (0)\n");
    }

    #[test]
    fn render_appends() {
        let mut out = String::from("> ");
        Reply::Ready("ok\n".into()).render(&mut out);
        assert_eq!(out, "> ok\n");
    }
}
