use crate::parse::ParsedCommand;
use serde::Serialize;

/// A token is a flag when it starts with `-` and is not the bare `-`
/// ("previous ref") marker. `--` counts as a flag-like separator.
pub fn is_flag(token: &str) -> bool {
    token.starts_with('-') && token != "-"
}

/// Verb and arguments of a logged command, handed to strategy lookup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CommandDetails {
    pub full_command: String,
    pub verb: String,
    pub args: Vec<String>,
    /// Unix time the command was logged at, when planning from a log entry.
    pub recorded_at: Option<i64>,
}

impl CommandDetails {
    pub fn new(full_command: &str, parsed: &ParsedCommand) -> Self {
        Self {
            full_command: full_command.to_string(),
            verb: parsed.name.clone(),
            args: parsed.args.clone(),
            recorded_at: None,
        }
    }

    pub fn with_recorded_at(mut self, unix_secs: i64) -> Self {
        self.recorded_at = Some(unix_secs);
        self
    }

    /// Whether any of `names` was passed. Long names also match `--name=value`;
    /// single-letter short names also match inside clusters like `-rf`.
    pub fn has_flag(&self, names: &[&str]) -> bool {
        self.flag_tokens().any(|arg| {
            names.iter().any(|name| {
                if arg == *name {
                    return true;
                }
                if name.starts_with("--") {
                    return arg.starts_with(&format!("{name}="));
                }
                if name.len() == 2 && is_short_cluster(arg) {
                    let c = name.as_bytes()[1] as char;
                    return arg[1..].contains(c);
                }
                false
            })
        })
    }

    /// Value of the first matching flag, as `--name=value`, `--name value`
    /// or `-n value`.
    pub fn flag_value(&self, names: &[&str]) -> Option<&str> {
        let mut iter = self.args.iter();
        while let Some(arg) = iter.next() {
            if arg == "--" {
                return None;
            }
            for name in names {
                if arg == name {
                    return iter.next().map(String::as_str);
                }
                if let Some(v) = arg.strip_prefix(&format!("{name}=")) {
                    return Some(v);
                }
            }
        }
        None
    }

    /// Non-flag tokens. Everything after a `--` separator is an operand.
    pub fn operands(&self) -> Vec<&str> {
        self.operands_skipping(&[])
    }

    /// Non-flag tokens, also skipping the value that follows any flag in
    /// `value_flags` (e.g. `-m <msg>`).
    pub fn operands_skipping(&self, value_flags: &[&str]) -> Vec<&str> {
        let mut out = Vec::new();
        let mut after_separator = false;
        let mut skip_next = false;
        for arg in &self.args {
            if skip_next {
                skip_next = false;
                continue;
            }
            if after_separator {
                out.push(arg.as_str());
                continue;
            }
            if arg == "--" {
                after_separator = true;
                continue;
            }
            if is_flag(arg) {
                if value_flags.contains(&arg.as_str()) {
                    skip_next = true;
                }
                continue;
            }
            out.push(arg.as_str());
        }
        out
    }

    /// Operands that appear after a `--` separator.
    pub fn pathspecs(&self) -> Vec<&str> {
        match self.args.iter().position(|a| a == "--") {
            Some(i) => self.args[i + 1..].iter().map(String::as_str).collect(),
            None => Vec::new(),
        }
    }

    fn flag_tokens(&self) -> impl Iterator<Item = &str> {
        self.args
            .iter()
            .take_while(|a| a.as_str() != "--")
            .map(String::as_str)
            .filter(|a| is_flag(a))
    }
}

fn is_short_cluster(arg: &str) -> bool {
    arg.len() > 2
        && !arg.starts_with("--")
        && arg[1..].chars().all(|c| c.is_ascii_alphabetic())
}

/// One inverse git invocation produced by a strategy.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UndoCommand {
    /// Display form, e.g. `git reset --soft HEAD~1`.
    pub command: String,
    /// Argv after the program token.
    pub args: Vec<String>,
    pub description: String,
    pub warnings: Vec<String>,
}

impl UndoCommand {
    pub fn new<I, S>(args: I, description: impl Into<String>) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        let args: Vec<String> = args.into_iter().map(Into::into).collect();
        Self {
            command: display_command(&args),
            args,
            description: description.into(),
            warnings: Vec::new(),
        }
    }

    pub fn with_warning(mut self, warning: impl Into<String>) -> Self {
        self.warnings.push(warning.into());
        self
    }

    pub fn with_warnings(mut self, warnings: impl IntoIterator<Item = String>) -> Self {
        self.warnings.extend(warnings);
        self
    }

    pub fn verb(&self) -> &str {
        self.args.first().map(String::as_str).unwrap_or("")
    }

    pub fn verb_args(&self) -> &[String] {
        self.args.get(1..).unwrap_or(&[])
    }
}

/// Join argv back into a `git ...` line, single-quoting tokens the shell
/// would split or expand. Revision syntax like `HEAD~1` and `HEAD@{1}` is
/// left bare so the line reads the way a user would type it.
pub fn display_command(args: &[String]) -> String {
    let mut line = crate::PROGRAM.to_string();
    for arg in args {
        line.push(' ');
        line.push_str(&quote_word(arg));
    }
    line
}

fn quote_word(word: &str) -> String {
    let needs_quotes = word.is_empty()
        || word.chars().any(|c| {
            c.is_whitespace()
                || matches!(
                    c,
                    '\'' | '"' | '$' | '`' | '\\' | ';' | '&' | '|' | '<' | '>' | '*' | '?'
                )
        });
    if !needs_quotes {
        return word.to_string();
    }
    format!("'{}'", word.replace('\'', "'\\''"))
}
