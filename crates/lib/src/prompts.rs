//! Prompt templates used by the SQL agent and the general chat path.
//!
//! Placeholders (`{dialect}`, `{context}`, `{prompt}`, `{results}`) are
//! substituted with simple string replacement before the prompts are sent
//! to the AI provider.

/// The assistant message every fresh transcript is seeded with.
pub const GREETING: &str = "Hi! I'm your SQL assistant. Connect a database and ask me anything about your data.";

/// System prompt for the query-generation step.
pub const QUERY_GENERATION_SYSTEM_PROMPT: &str = "You are a {dialect} expert. Write a single readonly {dialect} query that answers the user's question. Expected output is the query only, with no explanations or markdown formatting.";

/// User prompt template for the query-generation step.
pub const QUERY_GENERATION_USER_PROMPT: &str = "Use the provided table schemas to ensure the query is correct. Do not use placeholders for table or column names.\n\n# Schema\n{context}\n\n# User question\n{prompt}";

/// System prompt for turning query results into a natural-language answer.
pub const ANSWER_SYNTHESIS_SYSTEM_PROMPT: &str = "You are a helpful data assistant. Answer the user's question concisely using only the query results provided. If the results are empty, say so plainly.";

/// User prompt template for the answer-synthesis step.
pub const ANSWER_SYNTHESIS_USER_PROMPT: &str = "# User question\n{prompt}\n\n# Query results (JSON)\n{results}";

/// System prompt for utterances routed away from the SQL agent.
pub const GENERAL_CHAT_SYSTEM_PROMPT: &str = "You are a friendly assistant for a database chat application. Answer the user's message helpfully and briefly.";
