//! Roster - textual driver list
//!
//! One driver per line: `NAME STRATEGY START_INDEX [SEED]`, where
//! STRATEGY is `HUMAN` or `BOT` and START_INDEX picks a cell from the
//! track's ordered start positions. The optional SEED applies to bots
//! only. Blank lines and `//` comments are skipped.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::engine::error::RosterFormatError;

/// Which strategy variant a driver is bound to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum DriverKind {
    Human,
    Bot { seed: u64 },
}

/// One roster entry, not yet bound to an input source.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DriverSpec {
    pub name: String,
    pub kind: DriverKind,
    pub start_index: usize,
}

/// Parse a roster description. Start-index range and uniqueness are
/// checked later against the track, at race setup.
pub fn parse_roster(text: &str) -> Result<Vec<DriverSpec>, RosterFormatError> {
    let mut drivers = Vec::new();

    for (index, raw) in text.lines().enumerate() {
        let line = index + 1;
        let trimmed = raw.trim();
        if trimmed.is_empty() || trimmed.starts_with("//") {
            continue;
        }

        let fields: Vec<&str> = trimmed.split_whitespace().collect();
        if fields.len() < 3 {
            return Err(RosterFormatError::Malformed {
                line,
                reason: format!("expected NAME STRATEGY START_INDEX, got {} fields", fields.len()),
            });
        }

        let start_index: usize =
            fields[2]
                .parse()
                .map_err(|_| RosterFormatError::Malformed {
                    line,
                    reason: format!("start index '{}' is not a number", fields[2]),
                })?;

        let kind = match fields[1].to_ascii_uppercase().as_str() {
            "HUMAN" => {
                if fields.len() > 3 {
                    return Err(RosterFormatError::Malformed {
                        line,
                        reason: "seed is only valid for BOT drivers".into(),
                    });
                }
                DriverKind::Human
            }
            "BOT" => {
                let seed = match fields.get(3) {
                    Some(field) => field.parse().map_err(|_| RosterFormatError::Malformed {
                        line,
                        reason: format!("seed '{}' is not a number", field),
                    })?,
                    None => 0,
                };
                DriverKind::Bot { seed }
            }
            other => {
                return Err(RosterFormatError::UnknownStrategy {
                    strategy: other.to_string(),
                    line,
                })
            }
        };

        drivers.push(DriverSpec {
            name: fields[0].to_string(),
            kind,
            start_index,
        });
    }

    if drivers.is_empty() {
        return Err(RosterFormatError::Empty);
    }
    Ok(drivers)
}

/// Load a roster description from a file.
pub fn roster_from_file(path: impl AsRef<Path>) -> Result<Vec<DriverSpec>, RosterFormatError> {
    let text = std::fs::read_to_string(path)?;
    parse_roster(&text)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_drivers_with_comments_and_defaults() {
        let roster = parse_roster(
            "// demo roster\n\
             Ayrton BOT 0 42\n\
             \n\
             Nigel BOT 1\n\
             Gilles HUMAN 2\n",
        )
        .unwrap();
        assert_eq!(roster.len(), 3);
        assert_eq!(roster[0].name, "Ayrton");
        assert_eq!(roster[0].kind, DriverKind::Bot { seed: 42 });
        assert_eq!(roster[1].kind, DriverKind::Bot { seed: 0 });
        assert_eq!(roster[2].kind, DriverKind::Human);
        assert_eq!(roster[2].start_index, 2);
    }

    #[test]
    fn rejects_short_lines_and_bad_numbers() {
        assert!(matches!(
            parse_roster("Ayrton BOT"),
            Err(RosterFormatError::Malformed { line: 1, .. })
        ));
        assert!(matches!(
            parse_roster("Ayrton BOT one"),
            Err(RosterFormatError::Malformed { line: 1, .. })
        ));
        assert!(matches!(
            parse_roster("Ayrton BOT 0 fast"),
            Err(RosterFormatError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_unknown_strategy_and_human_seed() {
        assert!(matches!(
            parse_roster("Ayrton CHEAT 0"),
            Err(RosterFormatError::UnknownStrategy { .. })
        ));
        assert!(matches!(
            parse_roster("Gilles HUMAN 0 42"),
            Err(RosterFormatError::Malformed { line: 1, .. })
        ));
    }

    #[test]
    fn rejects_empty_roster() {
        assert!(matches!(parse_roster("// nobody\n"), Err(RosterFormatError::Empty)));
    }
}
