//! Line commands typed into the terminal front end.

use playground_core::{Msg, PositionId};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Replace the API key (an empty value clears it).
    Key(String),
    /// Replace the video URL field.
    Url(String),
    /// Submit the URL field, optionally setting it first.
    Parse(Option<String>),
    Retry(PositionId),
    Toggle(PositionId),
    Show,
    Help,
    Quit,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum InputError {
    #[error("unknown command `{0}`, type `help` for the list")]
    Unknown(String),
    #[error("`{0}` needs a card number, e.g. `{0} 1`")]
    MissingNumber(&'static str),
    #[error("`{0}` is not a card number")]
    BadNumber(String),
}

/// Parse one input line. Blank lines yield `Ok(None)`.
pub fn parse_line(line: &str) -> Result<Option<Command>, InputError> {
    let line = line.trim();
    if line.is_empty() {
        return Ok(None);
    }
    let (word, rest) = match line.split_once(char::is_whitespace) {
        Some((word, rest)) => (word, rest.trim()),
        None => (line, ""),
    };

    let command = match word.to_ascii_lowercase().as_str() {
        "key" => Command::Key(rest.to_string()),
        "url" => Command::Url(rest.to_string()),
        "parse" | "p" => Command::Parse((!rest.is_empty()).then(|| rest.to_string())),
        "retry" | "r" => Command::Retry(card_number("retry", rest)?),
        "toggle" | "t" => Command::Toggle(card_number("toggle", rest)?),
        "show" | "ls" => Command::Show,
        "help" | "?" => Command::Help,
        "quit" | "exit" | "q" => Command::Quit,
        other => return Err(InputError::Unknown(other.to_string())),
    };
    Ok(Some(command))
}

fn card_number(command: &'static str, raw: &str) -> Result<PositionId, InputError> {
    if raw.is_empty() {
        return Err(InputError::MissingNumber(command));
    }
    raw.trim_start_matches('#')
        .parse()
        .map_err(|_| InputError::BadNumber(raw.to_string()))
}

impl Command {
    /// Messages this command feeds into `update`. Front-end-only commands
    /// (`show`, `help`, `quit`) produce none.
    pub fn into_msgs(self) -> Vec<Msg> {
        match self {
            Command::Key(value) => vec![Msg::CredentialChanged(value)],
            Command::Url(value) => vec![Msg::UrlInputChanged(value)],
            Command::Parse(Some(url)) => vec![Msg::UrlInputChanged(url), Msg::SubmitClicked],
            Command::Parse(None) => vec![Msg::SubmitClicked],
            Command::Retry(position_id) => vec![Msg::RetryClicked { position_id }],
            Command::Toggle(position_id) => vec![Msg::ToggleExpanded { position_id }],
            Command::Show | Command::Help | Command::Quit => Vec::new(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn blank_lines_are_ignored() {
        assert_eq!(parse_line("   "), Ok(None));
    }

    #[test]
    fn parse_with_url_sets_field_then_submits() {
        let command = parse_line("parse  https://youtu.be/xyz ").unwrap().unwrap();
        assert_eq!(command, Command::Parse(Some("https://youtu.be/xyz".into())));
        assert_eq!(
            command.into_msgs(),
            vec![
                Msg::UrlInputChanged("https://youtu.be/xyz".into()),
                Msg::SubmitClicked
            ]
        );
    }

    #[test]
    fn bare_parse_submits_current_field() {
        assert_eq!(parse_line("PARSE"), Ok(Some(Command::Parse(None))));
    }

    #[test]
    fn key_keeps_everything_after_the_command() {
        assert_eq!(
            parse_line("key abc def"),
            Ok(Some(Command::Key("abc def".into())))
        );
        assert_eq!(parse_line("key"), Ok(Some(Command::Key(String::new()))));
    }

    #[test]
    fn card_commands_take_numbers() {
        assert_eq!(parse_line("retry 3"), Ok(Some(Command::Retry(3))));
        assert_eq!(parse_line("t #2"), Ok(Some(Command::Toggle(2))));
        assert_eq!(
            parse_line("retry"),
            Err(InputError::MissingNumber("retry"))
        );
        assert_eq!(
            parse_line("toggle two"),
            Err(InputError::BadNumber("two".into()))
        );
    }

    #[test]
    fn unknown_commands_are_reported() {
        assert_eq!(
            parse_line("frobnicate"),
            Err(InputError::Unknown("frobnicate".into()))
        );
    }
}
