use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{ProjectError, ProjectResult};

/// Project lifecycle status
///
/// Parsing is case-insensitive and also accepts the legacy Portuguese tokens
/// still found in older payloads (`PLANEJAMENTO`, `EM_ANDAMENTO`, ...).
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum ProjectStatus {
    /// Being scoped, work not started
    #[default]
    #[strum(to_string = "PLANNING", serialize = "PLANEJAMENTO")]
    Planning,
    #[strum(to_string = "IN_PROGRESS", serialize = "EM_ANDAMENTO")]
    InProgress,
    #[strum(to_string = "PAUSED", serialize = "PAUSADO")]
    Paused,
    /// Terminal
    #[strum(to_string = "COMPLETED", serialize = "CONCLUIDO")]
    Completed,
    /// Terminal
    #[strum(to_string = "CANCELLED", serialize = "CANCELADO")]
    Cancelled,
}

impl ProjectStatus {
    /// Parse a status token, normalizing case and surrounding whitespace
    pub fn parse(token: &str) -> ProjectResult<Self> {
        token
            .trim()
            .parse()
            .map_err(|_| ProjectError::InvalidValue {
                field: "status",
                value: token.to_string(),
            })
    }

    /// Transition table
    ///
    /// | current     | allowed                 |
    /// |-------------|-------------------------|
    /// | PLANNING    | any except COMPLETED    |
    /// | IN_PROGRESS | any                     |
    /// | PAUSED      | any except COMPLETED    |
    /// | COMPLETED   | none                    |
    /// | CANCELLED   | none                    |
    pub fn can_transition_to(self, target: ProjectStatus) -> bool {
        match self {
            ProjectStatus::Planning | ProjectStatus::Paused => target != ProjectStatus::Completed,
            ProjectStatus::InProgress => true,
            ProjectStatus::Completed | ProjectStatus::Cancelled => false,
        }
    }

    /// Planned or running; such projects cannot be deleted
    pub fn is_active(self) -> bool {
        matches!(self, ProjectStatus::Planning | ProjectStatus::InProgress)
    }

    pub fn is_final(self) -> bool {
        matches!(self, ProjectStatus::Completed | ProjectStatus::Cancelled)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_parse_is_case_insensitive() {
        assert_eq!(ProjectStatus::parse("planning").unwrap(), ProjectStatus::Planning);
        assert_eq!(ProjectStatus::parse("In_Progress").unwrap(), ProjectStatus::InProgress);
        assert_eq!(ProjectStatus::parse(" PAUSED ").unwrap(), ProjectStatus::Paused);
    }

    #[test]
    fn test_parse_accepts_legacy_tokens() {
        assert_eq!(ProjectStatus::parse("PLANEJAMENTO").unwrap(), ProjectStatus::Planning);
        assert_eq!(ProjectStatus::parse("em_andamento").unwrap(), ProjectStatus::InProgress);
        assert_eq!(ProjectStatus::parse("CONCLUIDO").unwrap(), ProjectStatus::Completed);
        assert_eq!(ProjectStatus::parse("cancelado").unwrap(), ProjectStatus::Cancelled);
        assert_eq!(ProjectStatus::parse("PAUSADO").unwrap(), ProjectStatus::Paused);
    }

    #[test]
    fn test_parse_rejects_unknown_tokens() {
        for token in ["DONE", "", "   ", "ARCHIVED"] {
            let err = ProjectStatus::parse(token).unwrap_err();
            assert!(
                matches!(err, ProjectError::InvalidValue { field: "status", .. }),
                "token {:?} should be rejected",
                token
            );
        }
    }

    #[test]
    fn test_display_and_serde_use_english_tokens() {
        assert_eq!(ProjectStatus::InProgress.to_string(), "IN_PROGRESS");
        assert_eq!(
            serde_json::to_string(&ProjectStatus::Cancelled).unwrap(),
            "\"CANCELLED\""
        );
        let parsed: ProjectStatus = serde_json::from_str("\"PAUSED\"").unwrap();
        assert_eq!(parsed, ProjectStatus::Paused);
    }

    #[test]
    fn test_transition_table() {
        use ProjectStatus::*;

        let expected = [
            (Planning, [true, true, true, false, true]),
            (InProgress, [true, true, true, true, true]),
            (Paused, [true, true, true, false, true]),
            (Completed, [false; 5]),
            (Cancelled, [false; 5]),
        ];

        for (from, row) in expected {
            for (target, allowed) in ProjectStatus::iter().zip(row) {
                assert_eq!(
                    from.can_transition_to(target),
                    allowed,
                    "{} -> {}",
                    from,
                    target
                );
            }
        }
    }

    #[test]
    fn test_active_and_final() {
        assert!(ProjectStatus::Planning.is_active());
        assert!(ProjectStatus::InProgress.is_active());
        assert!(!ProjectStatus::Paused.is_active());
        assert!(!ProjectStatus::Paused.is_final());
        assert!(ProjectStatus::Completed.is_final());
        assert!(ProjectStatus::Cancelled.is_final());
    }
}
