use thiserror::Error;

/// The reasons an instance file can be rejected. Line numbers are 1-based.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum ParseError {
    #[error("line {line}: expected the {expected} attribute")]
    MissingHeader { line: usize, expected: &'static str },

    #[error("line {line}: failed to parse this line: {content}")]
    MalformedLine { line: usize, content: String },

    #[error("line {line}: step s{index} is out of range, the instance has {step_count} steps")]
    StepOutOfRange {
        line: usize,
        index: u32,
        step_count: usize,
    },

    #[error("line {line}: user u{index} is out of range, the instance has {user_count} users")]
    UserOutOfRange {
        line: usize,
        index: u32,
        user_count: usize,
    },

    #[error("line {line}: an at-most-k bound must be at least 1")]
    ZeroCardinality { line: usize },

    #[error("line {line}: a one-team constraint needs at least one team")]
    MissingTeams { line: usize },

    #[error("line {line}: a team needs at least one member")]
    EmptyTeam { line: usize },

    #[error("expected {expected} constraint lines but found only {found}")]
    MissingConstraints { expected: usize, found: usize },
}
