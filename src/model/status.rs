use serde::{Deserialize, Serialize};

/// Project/task lifecycle status.
///
/// The set is closed: records arriving from the workspace store are
/// validated with [`Status::parse`] at the load boundary, so rendering
/// code only ever sees one of these five values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Status {
    Pending,
    InProgress,
    Completed,
    Delayed,
    Live,
}

/// Display metadata for a status. Every status maps to exactly one entry,
/// and no two statuses share a style tag or glyph.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StatusDisplay {
    /// Human-readable label
    pub label: &'static str,
    /// Style selector consumed by the presentation layer
    pub style_tag: &'static str,
    /// Single-cell glyph for compact listings
    pub glyph: char,
}

/// A status string outside the closed set reached the boundary parser.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
#[error("unknown status '{0}' (expected: pending, in-progress, completed, delayed, live)")]
pub struct UnknownStatusError(pub String);

impl Status {
    /// All statuses, in lifecycle order.
    pub const ALL: [Status; 5] = [
        Status::Pending,
        Status::InProgress,
        Status::Completed,
        Status::Delayed,
        Status::Live,
    ];

    /// The wire name used in stored records.
    pub fn as_str(self) -> &'static str {
        match self {
            Status::Pending => "pending",
            Status::InProgress => "in-progress",
            Status::Completed => "completed",
            Status::Delayed => "delayed",
            Status::Live => "live",
        }
    }

    /// Parse a wire name into a status. This is the only place raw status
    /// strings are interpreted.
    pub fn parse(s: &str) -> Result<Status, UnknownStatusError> {
        match s {
            "pending" => Ok(Status::Pending),
            "in-progress" => Ok(Status::InProgress),
            "completed" => Ok(Status::Completed),
            "delayed" => Ok(Status::Delayed),
            "live" => Ok(Status::Live),
            _ => Err(UnknownStatusError(s.to_string())),
        }
    }

    /// Resolve display metadata. Total over the closed set.
    pub fn display(self) -> StatusDisplay {
        match self {
            Status::Pending => StatusDisplay {
                label: "Pending",
                style_tag: "muted",
                glyph: '\u{25CB}', // ○
            },
            Status::InProgress => StatusDisplay {
                label: "In progress",
                style_tag: "accent",
                glyph: '\u{25D0}', // ◐
            },
            Status::Completed => StatusDisplay {
                label: "Completed",
                style_tag: "green",
                glyph: '\u{2713}', // ✓
            },
            Status::Delayed => StatusDisplay {
                label: "Delayed",
                style_tag: "amber",
                glyph: '!',
            },
            Status::Live => StatusDisplay {
                label: "Live",
                style_tag: "purple",
                glyph: '\u{25CF}', // ●
            },
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_all_wire_names() {
        for status in Status::ALL {
            assert_eq!(Status::parse(status.as_str()), Ok(status));
        }
    }

    #[test]
    fn test_parse_unknown() {
        let err = Status::parse("archived").unwrap_err();
        assert_eq!(err.0, "archived");
    }

    #[test]
    fn test_serde_wire_names_match_parse() {
        for status in Status::ALL {
            let json = serde_json::to_string(&status).unwrap();
            assert_eq!(json, format!("\"{}\"", status.as_str()));
            let back: Status = serde_json::from_str(&json).unwrap();
            assert_eq!(back, status);
        }
    }

    #[test]
    fn test_display_labels_non_empty() {
        for status in Status::ALL {
            assert!(!status.display().label.is_empty());
            assert!(!status.display().style_tag.is_empty());
        }
    }

    #[test]
    fn test_display_distinctness() {
        // No two statuses may share a style tag or glyph
        for a in Status::ALL {
            for b in Status::ALL {
                if a != b {
                    assert_ne!(a.display().style_tag, b.display().style_tag);
                    assert_ne!(a.display().glyph, b.display().glyph);
                }
            }
        }
    }
}
