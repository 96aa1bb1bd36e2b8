//! Question composition.
//!
//! Turns what the user picked on the calculator into the text written to the
//! request slot.

use std::fmt;

/// Topic for a quick-fact question.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FactTopic {
    Science,
    History,
    Math,
}

impl FactTopic {
    /// Pick a topic by its menu key (`a`, `b`, `c`), case-insensitive.
    pub fn from_key(key: &str) -> Option<Self> {
        match key.trim().to_ascii_lowercase().as_str() {
            "a" => Some(FactTopic::Science),
            "b" => Some(FactTopic::History),
            "c" => Some(FactTopic::Math),
            _ => None,
        }
    }

    fn as_str(self) -> &'static str {
        match self {
            FactTopic::Science => "science",
            FactTopic::History => "history",
            FactTopic::Math => "math",
        }
    }
}

impl fmt::Display for FactTopic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A request the user wants answered.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Query {
    /// Free-form question.
    Ask(String),
    /// Math problem to solve.
    Solve(String),
    /// Interesting fact about a topic.
    Fact(FactTopic),
}

impl Query {
    /// Request slot text.
    ///
    /// Blank input composes to an empty string, which the engine treats as
    /// a no-op.
    pub fn compose(&self) -> String {
        match self {
            Query::Ask(text) => text.trim().to_string(),
            Query::Solve(problem) => match problem.trim() {
                "" => String::new(),
                p => format!("Solve: {}", p),
            },
            Query::Fact(topic) => format!("Tell me an interesting {} fact", topic),
        }
    }
}
