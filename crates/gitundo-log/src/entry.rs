use gitundo_core::parse_command;
use time::format_description::well_known::Rfc3339;
use time::OffsetDateTime;

/// Prefix marking an entry as undone.
pub const UNDONE_MARK: char = '#';

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EntryKind {
    /// A mutating command; the target of undo and redo.
    Regular,
    /// A ref switch; kept as a navigation trail and never truncated.
    Navigation,
}

impl EntryKind {
    /// Kind of a logged command, recomputed from its text.
    pub fn of_command(command: &str) -> Self {
        match parse_command(command) {
            Ok(p) if p.is_navigating() => EntryKind::Navigation,
            _ => EntryKind::Regular,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            EntryKind::Regular => "regular",
            EntryKind::Navigation => "navigation",
        }
    }
}

/// One line of the history log: `[#]TIMESTAMP [REF] COMMAND`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LogEntry {
    pub timestamp: OffsetDateTime,
    /// Branch, tag or short hash current when the command ran.
    pub reference: String,
    pub command: String,
    pub undone: bool,
    pub kind: EntryKind,
}

impl LogEntry {
    /// New, not-undone entry stamped with the current time (second precision).
    pub fn new(reference: &str, command: &str) -> Self {
        let now = OffsetDateTime::now_utc();
        Self {
            timestamp: now.replace_nanosecond(0).unwrap_or(now),
            reference: reference.to_string(),
            command: command.trim().to_string(),
            undone: false,
            kind: EntryKind::of_command(command),
        }
    }

    /// Text identity of the entry, without the undone marker.
    pub fn body(&self) -> String {
        format!(
            "{} [{}] {}",
            format_timestamp(self.timestamp),
            self.reference,
            self.command
        )
    }

    /// Serialized line (no trailing newline).
    pub fn to_line(&self) -> String {
        if self.undone {
            format!("{UNDONE_MARK}{}", self.body())
        } else {
            self.body()
        }
    }

    /// Parse one log line. Returns `None` for blank or malformed lines.
    pub fn parse_line(line: &str) -> Option<Self> {
        let line = line.trim_end_matches(['\r', '\n']);
        let (undone, body) = match line.strip_prefix(UNDONE_MARK) {
            Some(rest) => (true, rest),
            None => (false, line),
        };
        let (ts, rest) = body.split_once(' ')?;
        let timestamp = OffsetDateTime::parse(ts, &Rfc3339).ok()?;
        let rest = rest.strip_prefix('[')?;
        let (reference, command) = rest.split_once("] ")?;
        let command = command.trim();
        if reference.is_empty() || command.is_empty() {
            return None;
        }
        Some(Self {
            timestamp,
            reference: reference.to_string(),
            command: command.to_string(),
            undone,
            kind: EntryKind::of_command(command),
        })
    }

    /// The same entry with its undone flag flipped.
    pub fn toggled(&self) -> Self {
        Self {
            undone: !self.undone,
            ..self.clone()
        }
    }

    pub fn is_regular(&self) -> bool {
        self.kind == EntryKind::Regular
    }

    pub fn is_navigation(&self) -> bool {
        self.kind == EntryKind::Navigation
    }

    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "timestamp": format_timestamp(self.timestamp),
            "ref": self.reference,
            "command": self.command,
            "undone": self.undone,
            "kind": self.kind.as_str(),
        })
    }
}

fn format_timestamp(ts: OffsetDateTime) -> String {
    ts.format(&Rfc3339)
        .unwrap_or_else(|_| ts.unix_timestamp().to_string())
}
