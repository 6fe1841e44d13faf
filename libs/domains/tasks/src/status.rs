use serde::{Deserialize, Serialize};
use strum::{Display, EnumIter, EnumString};

use crate::error::{TaskError, TaskResult};

/// Task lifecycle status
///
/// Accepts the legacy Portuguese tokens (`ABERTA`, `BLOQUEADA`, ...) as well.
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
pub enum TaskStatus {
    /// Task not started
    #[default]
    #[strum(to_string = "OPEN", serialize = "ABERTA")]
    Open,
    #[strum(to_string = "IN_PROGRESS", serialize = "EM_ANDAMENTO")]
    InProgress,
    #[strum(to_string = "BLOCKED", serialize = "BLOQUEADA")]
    Blocked,
    #[strum(to_string = "COMPLETED", serialize = "CONCLUIDA")]
    Completed,
    #[strum(to_string = "CANCELLED", serialize = "CANCELADA")]
    Cancelled,
}

impl TaskStatus {
    pub fn parse(token: &str) -> TaskResult<Self> {
        token
            .trim()
            .parse()
            .map_err(|_| TaskError::InvalidValue {
                field: "status",
                value: token.to_string(),
            })
    }

    /// Transition table
    ///
    /// | current     | allowed               |
    /// |-------------|-----------------------|
    /// | OPEN        | any                   |
    /// | IN_PROGRESS | any except OPEN       |
    /// | BLOCKED     | any except COMPLETED  |
    /// | COMPLETED   | none                  |
    /// | CANCELLED   | none                  |
    pub fn can_transition_to(self, target: TaskStatus) -> bool {
        match self {
            TaskStatus::Open => true,
            TaskStatus::InProgress => target != TaskStatus::Open,
            TaskStatus::Blocked => target != TaskStatus::Completed,
            TaskStatus::Completed | TaskStatus::Cancelled => false,
        }
    }

    pub fn is_active(self) -> bool {
        matches!(self, TaskStatus::Open | TaskStatus::InProgress)
    }

    pub fn is_final(self) -> bool {
        matches!(self, TaskStatus::Completed | TaskStatus::Cancelled)
    }

    pub fn is_blocked(self) -> bool {
        self == TaskStatus::Blocked
    }
}

/// Task priority, ordered by weight
#[derive(
    Debug,
    Clone,
    Copy,
    PartialEq,
    Eq,
    Hash,
    PartialOrd,
    Ord,
    Serialize,
    Deserialize,
    Display,
    EnumString,
    EnumIter,
    Default,
)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
#[strum(ascii_case_insensitive)]
pub enum TaskPriority {
    #[strum(to_string = "LOW", serialize = "BAIXA")]
    Low,
    /// Default priority
    #[default]
    #[strum(to_string = "MEDIUM", serialize = "MEDIA")]
    Medium,
    #[strum(to_string = "HIGH", serialize = "ALTA")]
    High,
    #[strum(to_string = "CRITICAL", serialize = "CRITICA")]
    Critical,
}

impl TaskPriority {
    pub fn parse(token: &str) -> TaskResult<Self> {
        token
            .trim()
            .parse()
            .map_err(|_| TaskError::InvalidValue {
                field: "priority",
                value: token.to_string(),
            })
    }

    pub fn weight(self) -> u8 {
        match self {
            TaskPriority::Low => 1,
            TaskPriority::Medium => 2,
            TaskPriority::High => 3,
            TaskPriority::Critical => 4,
        }
    }

    pub fn is_higher_than(self, other: TaskPriority) -> bool {
        self.weight() > other.weight()
    }

    pub fn is_critical(self) -> bool {
        self.weight() == 4
    }

    /// HIGH or CRITICAL
    pub fn is_high(self) -> bool {
        self.weight() >= 3
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use strum::IntoEnumIterator;

    #[test]
    fn test_status_tokens() {
        assert_eq!(TaskStatus::parse("open").unwrap(), TaskStatus::Open);
        assert_eq!(TaskStatus::parse("ABERTA").unwrap(), TaskStatus::Open);
        assert_eq!(TaskStatus::parse("bloqueada").unwrap(), TaskStatus::Blocked);
        assert_eq!(TaskStatus::parse("EM_ANDAMENTO").unwrap(), TaskStatus::InProgress);
        assert_eq!(TaskStatus::parse("CONCLUIDA").unwrap(), TaskStatus::Completed);
        assert_eq!(TaskStatus::parse("Cancelada").unwrap(), TaskStatus::Cancelled);
        assert_eq!(TaskStatus::Blocked.to_string(), "BLOCKED");

        assert!(matches!(
            TaskStatus::parse("").unwrap_err(),
            TaskError::InvalidValue { field: "status", .. }
        ));
        assert!(TaskStatus::parse("PAUSED").is_err());
    }

    #[test]
    fn test_status_transition_table() {
        use TaskStatus::*;

        let expected = [
            (Open, [true, true, true, true, true]),
            (InProgress, [false, true, true, true, true]),
            (Blocked, [true, true, true, false, true]),
            (Completed, [false; 5]),
            (Cancelled, [false; 5]),
        ];

        for (from, row) in expected {
            for (target, allowed) in TaskStatus::iter().zip(row) {
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
    fn test_status_predicates() {
        assert!(TaskStatus::Open.is_active());
        assert!(TaskStatus::InProgress.is_active());
        assert!(!TaskStatus::Blocked.is_active());
        assert!(TaskStatus::Blocked.is_blocked());
        assert!(TaskStatus::Completed.is_final());
        assert!(!TaskStatus::Blocked.is_final());
    }

    #[test]
    fn test_priority_tokens_and_weights() {
        let alta = TaskPriority::parse("ALTA").unwrap();
        assert_eq!(alta, TaskPriority::High);
        assert_eq!(alta.weight(), 3);
        assert!(alta.is_high());
        assert!(!alta.is_critical());

        assert_eq!(TaskPriority::parse("critica").unwrap(), TaskPriority::Critical);
        assert_eq!(TaskPriority::parse("Media").unwrap(), TaskPriority::Medium);
        assert_eq!(TaskPriority::parse("low").unwrap(), TaskPriority::Low);
        assert!(matches!(
            TaskPriority::parse("URGENT").unwrap_err(),
            TaskError::InvalidValue { field: "priority", .. }
        ));

        let weights: Vec<u8> = TaskPriority::iter().map(TaskPriority::weight).collect();
        assert_eq!(weights, vec![1, 2, 3, 4]);
        assert!(TaskPriority::Critical.is_higher_than(TaskPriority::High));
        assert!(!TaskPriority::Low.is_higher_than(TaskPriority::Low));
        assert!(TaskPriority::Critical > TaskPriority::Low);
    }
}
