//! Interactive command parsing for `run`.

/// One line of interactive input.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum InputCommand {
    /// Start or pause
    Toggle,
    Reset,
    /// Save new settings; sound is `None` when not given
    Set {
        focus: String,
        break_time: String,
        sound: Option<bool>,
    },
    ShowSettings,
    Help,
    Quit,
    Unknown(String),
}

impl InputCommand {
    /// Parses one line. An empty line toggles.
    #[must_use]
    pub fn parse(line: &str) -> Self {
        let mut words = line.split_whitespace();
        let Some(first) = words.next() else {
            return Self::Toggle;
        };

        match first.to_ascii_lowercase().as_str() {
            "t" | "toggle" | "space" | "start" | "pause" => Self::Toggle,
            "r" | "reset" => Self::Reset,
            "settings" | "s" => Self::ShowSettings,
            "h" | "help" | "?" => Self::Help,
            "q" | "quit" | "exit" => Self::Quit,
            "set" => Self::parse_set(words.collect(), line),
            _ => Self::Unknown(line.trim().to_string()),
        }
    }

    fn parse_set(args: Vec<&str>, line: &str) -> Self {
        let sound = match args.get(2).map(|w| w.to_ascii_lowercase()) {
            None => None,
            Some(word) => match word.as_str() {
                "on" | "true" | "yes" => Some(true),
                "off" | "false" | "no" => Some(false),
                _ => return Self::Unknown(line.trim().to_string()),
            },
        };

        match (args.first(), args.get(1), args.len()) {
            (Some(focus), Some(break_time), 2..=3) => Self::Set {
                focus: (*focus).to_string(),
                break_time: (*break_time).to_string(),
                sound,
            },
            _ => Self::Unknown(line.trim().to_string()),
        }
    }
}
