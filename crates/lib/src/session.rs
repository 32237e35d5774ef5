//! # Session Context
//!
//! The single shared mutable state for one chat session: the current database
//! handle, the temp-file slot backing an upload, and the conversation
//! transcript. Every operation takes this context explicitly; there is no
//! ambient global state. Turns run to completion one at a time.

use crate::agent::SqlAgent;
use crate::descriptor::ConnectionDescriptor;
use crate::errors::ConnectError;
use crate::providers::db::{self, DatabaseHandle};
use crate::route::{classify, RouteKind};
use crate::temp::TempSlot;
use crate::transcript::{Role, Transcript};
use tracing::{error, info};

/// One user's session: connection, temp resource, and chat history.
#[derive(Debug, Default)]
pub struct Session {
    handle: Option<DatabaseHandle>,
    temp: TempSlot,
    transcript: Transcript,
}

impl Session {
    pub fn new() -> Self {
        Self::default()
    }

    /// Connects (or reconnects) the session to the described source and
    /// returns the new handle.
    ///
    /// The previous handle is replaced wholesale on success; on failure the
    /// existing connection, if any, is left untouched.
    pub async fn connect(
        &mut self,
        descriptor: &ConnectionDescriptor,
    ) -> Result<&DatabaseHandle, ConnectError> {
        let handle = db::connect(descriptor, &mut self.temp).await?;
        Ok(self.handle.insert(handle))
    }

    /// The live handle, if the session is connected.
    pub fn handle(&self) -> Option<&DatabaseHandle> {
        self.handle.as_ref()
    }

    pub fn transcript(&self) -> &Transcript {
        &self.transcript
    }

    /// Clears the chat history back to the seeded greeting.
    pub fn reset_chat(&mut self) {
        self.transcript.reset();
    }

    /// Runs one full turn: append the user message, route it, delegate to the
    /// agent or the chat model, and append exactly one assistant entry.
    ///
    /// Collaborator failures become a displayed error turn rather than an
    /// error return, so the transcript invariant (one assistant entry per
    /// user turn) holds on every path.
    pub async fn take_turn(&mut self, question: &str, agent: &SqlAgent) -> String {
        self.transcript.append(Role::User, question);

        let reply = match classify(question) {
            RouteKind::DataQuery => {
                info!("Routing turn to the SQL agent");
                match &self.handle {
                    Some(handle) => agent.run(question, handle).await,
                    None => Ok(
                        "No database is connected yet. Connect one from the sidebar and try again."
                            .to_string(),
                    ),
                }
            }
            RouteKind::GeneralChat => {
                info!("Routing turn to general chat");
                agent.chat(question).await
            }
        };

        let text = match reply {
            Ok(text) => text,
            Err(e) => {
                error!("Turn failed: {e}");
                format!("Sorry, I ran into a problem answering that: {e}")
            }
        };
        self.transcript.append(Role::Assistant, text.clone());
        text
    }
}
