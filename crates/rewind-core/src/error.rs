use std::fmt;

/// Machine-readable error codes for agent-friendly decision making.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    MalformedEvent,
    UnknownKind,
    UnknownItem,
    DuplicateId,
    ConfigParseError,
    ScriptReadFailed,
    ScriptParseError,
    InternalUnexpected,
}

impl ErrorCode {
    /// Stable code identifier (`E####`) for machine parsing.
    #[must_use]
    pub const fn code(self) -> &'static str {
        match self {
            Self::MalformedEvent => "E1001",
            Self::UnknownKind => "E1002",
            Self::UnknownItem => "E2001",
            Self::DuplicateId => "E2002",
            Self::ConfigParseError => "E3001",
            Self::ScriptReadFailed => "E3002",
            Self::ScriptParseError => "E3003",
            Self::InternalUnexpected => "E9001",
        }
    }

    /// Short human-facing summary for logs and terminal output.
    #[must_use]
    pub const fn message(self) -> &'static str {
        match self {
            Self::MalformedEvent => "Malformed event payload",
            Self::UnknownKind => "Unknown event kind",
            Self::UnknownItem => "Item not found",
            Self::DuplicateId => "Duplicate item id",
            Self::ConfigParseError => "Config file parse error",
            Self::ScriptReadFailed => "Script file could not be read",
            Self::ScriptParseError => "Script parse error",
            Self::InternalUnexpected => "Internal unexpected error",
        }
    }

    /// Optional remediation hint that can be surfaced to operators and agents.
    #[must_use]
    pub const fn hint(self) -> Option<&'static str> {
        match self {
            Self::MalformedEvent => {
                Some("ADD_ITEM needs payload.item; REMOVE_ITEM needs payload.itemId.")
            }
            Self::UnknownKind => Some("Use ADD_ITEM or REMOVE_ITEM, or drop --strict."),
            Self::UnknownItem => None,
            Self::DuplicateId => {
                Some("Pick an unused id, or set store.duplicate_ids = \"append\".")
            }
            Self::ConfigParseError => Some("Fix syntax in .rewind/config.toml and retry."),
            Self::ScriptReadFailed => Some("Check the script path and read permissions."),
            Self::ScriptParseError => {
                Some("Each line must be {\"dispatch\": ...}, {\"undo\": n} or {\"redo\": n}.")
            }
            Self::InternalUnexpected => Some("Retry once. If persistent, report a bug with logs."),
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.code())
    }
}

#[cfg(test)]
mod tests {
    use super::ErrorCode;
    use std::collections::HashSet;

    const ALL: [ErrorCode; 8] = [
        ErrorCode::MalformedEvent,
        ErrorCode::UnknownKind,
        ErrorCode::UnknownItem,
        ErrorCode::DuplicateId,
        ErrorCode::ConfigParseError,
        ErrorCode::ScriptReadFailed,
        ErrorCode::ScriptParseError,
        ErrorCode::InternalUnexpected,
    ];

    #[test]
    fn all_codes_are_unique() {
        let mut seen = HashSet::new();
        for code in ALL {
            assert!(seen.insert(code.code()), "duplicate code {}", code.code());
        }
    }

    #[test]
    fn code_format_is_machine_friendly() {
        for code in ALL {
            let code = code.code();
            assert_eq!(code.len(), 5);
            assert!(code.starts_with('E'));
            assert!(code.chars().skip(1).all(|c| c.is_ascii_digit()));
        }
    }

    #[test]
    fn display_is_the_code() {
        assert_eq!(ErrorCode::DuplicateId.to_string(), "E2002");
    }
}
