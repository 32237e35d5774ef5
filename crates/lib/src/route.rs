//! # Query Router
//!
//! Classifies a user utterance as a data question or general chat by keyword
//! presence. This is a documented best-effort heuristic, not a parser: false
//! classifications are expected and accepted, and a misrouted data question
//! simply gets a lower-quality generic reply.

/// Which collaborator should handle an utterance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RouteKind {
    DataQuery,
    GeneralChat,
}

/// Keywords whose presence marks an utterance as a data question.
const SQL_KEYWORDS: &[&str] = &[
    "select", "from", "table", "column", "data", "where", "join", "count", "sum", "avg",
    "group by", "order by",
];

/// Routes an utterance by case-insensitive substring match against the fixed
/// keyword set.
pub fn classify(utterance: &str) -> RouteKind {
    let lowered = utterance.to_lowercase();
    if SQL_KEYWORDS.iter().any(|keyword| lowered.contains(keyword)) {
        RouteKind::DataQuery
    } else {
        RouteKind::GeneralChat
    }
}
