/// Top level command words, matched without regard to case
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Verb {
    Help,
    Exit,
    Set,
    Get,
    Load,
    Show,
    Star,
    Body,
    Sat,
    Calc,
    Unknown,
}

impl Verb {
    pub fn from_word(word: &str) -> Self {
        match word.to_uppercase().as_str() {
            "HELP" => Verb::Help,
            "EXIT" => Verb::Exit,
            "SET" => Verb::Set,
            "GET" => Verb::Get,
            "LOAD" => Verb::Load,
            "SHOW" => Verb::Show,
            "STAR" => Verb::Star,
            "BODY" => Verb::Body,
            "SAT" => Verb::Sat,
            "CALC" => Verb::Calc,
            _ => Verb::Unknown,
        }
    }

    pub fn as_str(&self) -> &str {
        match self {
            Verb::Help => "HELP",
            Verb::Exit => "EXIT",
            Verb::Set => "SET",
            Verb::Get => "GET",
            Verb::Load => "LOAD",
            Verb::Show => "SHOW",
            Verb::Star => "STAR",
            Verb::Body => "BODY",
            Verb::Sat => "SAT",
            Verb::Calc => "CALC",
            Verb::Unknown => "UNKNOWN",
        }
    }
}

/// One whitespace-tokenized input line
#[derive(Debug, Clone)]
pub struct ParsedCommand {
    pub verb: Verb,
    pub word: String,
    pub arguments: Vec<String>,
}

impl ParsedCommand {
    /// Tokenize a line. Blank lines and `#` comments give `None`.
    ///
    /// # Examples
    /// ```
    /// use gate_cli::command::{ParsedCommand, Verb};
    /// let cmd = ParsedCommand::parse("sat azel ISS 3 NOW").unwrap();
    /// assert_eq!(cmd.verb, Verb::Sat);
    /// assert_eq!(cmd.arguments, vec!["azel", "ISS", "3", "NOW"]);
    /// ```
    pub fn parse(text: &str) -> Option<Self> {
        let trimmed = text.trim();
        if trimmed.is_empty() || trimmed.starts_with('#') {
            return None;
        }

        let mut tokens = trimmed.split_whitespace();
        let word = tokens.next()?.to_string();
        Some(ParsedCommand {
            verb: Verb::from_word(&word),
            word,
            arguments: tokens.map(str::to_string).collect(),
        })
    }

    pub fn arg(&self, index: usize) -> Option<&str> {
        self.arguments.get(index).map(String::as_str)
    }

    /// Uppercased first argument, the sub-command of compound verbs
    pub fn action(&self) -> Option<String> {
        self.arg(0).map(str::to_uppercase)
    }

    /// Fail unless there are exactly `count` arguments
    pub fn expect_args(&self, count: usize) -> anyhow::Result<()> {
        check_count(self.arguments.len(), count, count)
    }

    /// Fail unless there are exactly `count` arguments after the action word
    pub fn expect_operands(&self, count: usize) -> anyhow::Result<()> {
        self.expect_operands_between(count, count)
    }

    pub fn expect_operands_between(&self, min: usize, max: usize) -> anyhow::Result<()> {
        check_count(self.arguments.len().saturating_sub(1), min, max)
    }
}

fn check_count(actual: usize, min: usize, max: usize) -> anyhow::Result<()> {
    if actual < min || actual > max {
        anyhow::bail!(
            "This command requires {} argument{}",
            min,
            if min == 1 { "" } else { "s" }
        );
    }
    Ok(())
}
