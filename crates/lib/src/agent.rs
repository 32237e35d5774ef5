//! # SQL Agent
//!
//! The in-process client for the natural-language-to-SQL collaborator. Given
//! a question and a live database handle it builds a schema context, asks the
//! AI provider for a single read-only query in the handle's dialect, executes
//! it, and has the provider synthesize a plain-text answer from the rows.
//! Utterances routed away from the agent go through `chat` instead, which is
//! a direct provider call with no database involved.

use crate::errors::AgentError;
use crate::prompts;
use crate::providers::{ai::AiProvider, db::DatabaseHandle};
use regex::Regex;
use tracing::{debug, info};

/// Executes data questions and general chat against one AI provider.
#[derive(Debug, Clone)]
pub struct SqlAgent {
    ai_provider: Box<dyn AiProvider>,
}

impl SqlAgent {
    pub fn new(ai_provider: Box<dyn AiProvider>) -> Self {
        Self { ai_provider }
    }

    /// Answers a data question against the connected database.
    pub async fn run(&self, question: &str, handle: &DatabaseHandle) -> Result<String, AgentError> {
        info!("[agent] data question: {question:?}");
        let query = self.generate_query(question, handle).await?;

        if query.trim().is_empty() {
            return Ok("The question did not result in a valid query.".to_string());
        }
        ensure_read_only(&query)?;

        let rows = handle.execute_query(&query).await?;
        let results = serde_json::to_string_pretty(&rows)?;
        debug!(query = %query, rows = rows.len(), "[agent] query executed");

        let user_prompt = prompts::ANSWER_SYNTHESIS_USER_PROMPT
            .replace("{prompt}", question)
            .replace("{results}", &results);
        self.ai_provider
            .generate(prompts::ANSWER_SYNTHESIS_SYSTEM_PROMPT, &user_prompt)
            .await
    }

    /// Answers a general (non-data) message without touching the database.
    pub async fn chat(&self, message: &str) -> Result<String, AgentError> {
        info!("[agent] general chat: {message:?}");
        self.ai_provider
            .generate(prompts::GENERAL_CHAT_SYSTEM_PROMPT, message)
            .await
    }

    /// Converts the question to a query using the schema cached on the handle.
    async fn generate_query(
        &self,
        question: &str,
        handle: &DatabaseHandle,
    ) -> Result<String, AgentError> {
        let mut context = String::new();
        for table in handle.tables() {
            let columns = handle.describe_table(table).await?;
            let columns_str = columns
                .iter()
                .map(|(name, type_name)| format!("{name} {type_name}"))
                .collect::<Vec<_>>()
                .join(", ");
            context.push_str(&format!("Table `{table}`: ({columns_str}).\n"));
        }

        let dialect = handle.dialect();
        let system_prompt =
            prompts::QUERY_GENERATION_SYSTEM_PROMPT.replace("{dialect}", dialect);
        let user_prompt = prompts::QUERY_GENERATION_USER_PROMPT
            .replace("{context}", &context)
            .replace("{prompt}", question);

        debug!(system_prompt = %system_prompt, user_prompt = %user_prompt, "--> Sending prompts to AI provider");
        let raw = self.ai_provider.generate(&system_prompt, &user_prompt).await?;
        Ok(clean_query(&raw))
    }
}

/// Strips markdown code fences the model may wrap the query in.
fn clean_query(raw: &str) -> String {
    let re = Regex::new(r"(?s)```(?:sql)?\s*(.*?)\s*```").expect("static regex");
    match re.captures(raw) {
        Some(caps) => caps[1].trim().to_string(),
        None => raw.trim().to_string(),
    }
}

/// The agent only ever reads.
///
/// The statement must start with SELECT or WITH, must not chain further
/// statements after a top-level `;`, and must not contain a write keyword at
/// the top level — both SQLite and MySQL allow writable CTEs, so
/// `WITH ... DELETE FROM ...` would otherwise slip through the head check.
/// Keywords inside parentheses (CTE bodies, subqueries), string literals,
/// and quoted identifiers are ignored.
fn ensure_read_only(query: &str) -> Result<(), AgentError> {
    const WRITE_KEYWORDS: &[&str] = &[
        "insert", "update", "delete", "replace", "drop", "alter", "create", "truncate",
    ];

    let head = query.trim_start().to_lowercase();
    if !(head.starts_with("select") || head.starts_with("with")) {
        return Err(AgentError::NotReadOnly(query.to_string()));
    }

    let mut depth = 0usize;
    let mut quote: Option<char> = None;
    let mut word = String::new();
    let mut chars = query.chars().peekable();
    while let Some(c) = chars.next() {
        if let Some(q) = quote {
            if c == q {
                quote = None;
            }
            continue;
        }
        match c {
            '\'' | '"' | '`' => quote = Some(c),
            '(' => depth += 1,
            ')' => depth = depth.saturating_sub(1),
            ';' if depth == 0 => {
                // Anything after a statement terminator is a second statement.
                if chars.clone().any(|rest| !rest.is_whitespace()) {
                    return Err(AgentError::NotReadOnly(query.to_string()));
                }
            }
            _ => {}
        }
        if c.is_alphanumeric() || c == '_' {
            if depth == 0 && quote.is_none() {
                word.extend(c.to_lowercase());
            }
        } else {
            if WRITE_KEYWORDS.contains(&word.as_str()) {
                return Err(AgentError::NotReadOnly(query.to_string()));
            }
            word.clear();
        }
    }
    if WRITE_KEYWORDS.contains(&word.as_str()) {
        return Err(AgentError::NotReadOnly(query.to_string()));
    }
    Ok(())
}
