//! Channel-agnostic triage dispatcher.
//!
//! Receives inbound chat messages, drives the intake engine, and runs the
//! retrieve -> classify -> render pipeline once collection completes. The
//! platform adapters only parse webhooks into [`InboundMessage`] values and
//! implement [`ChannelSender`]; everything channel-independent happens here,
//! once, instead of once per platform.
//!
//! Outbound sends are best-effort: a delivery failure is logged and the flow
//! continues, so the engine's state transitions never depend on whether a
//! chat message actually landed.

use std::collections::HashMap;
use std::sync::Arc;
use thiserror::Error;
use tracing::{error, info, warn};

use crate::domain::intake::{IntakeEngine, IntakeOutcome};
use crate::ports::{
    ChannelSender, Classification, Classifier, ClassifierError, InboundMessage, Passage,
    RenderError, Retriever, RetrieverError, TicketRenderer,
};

/// Intake field whose answer doubles as the question text for retrieval
/// and classification.
const QUESTION_FIELD: &str = "description";

/// Ticket titles are cut to this many characters.
const TITLE_MAX_CHARS: usize = 50;

const HELP_TEXT: &str = "How to use:\n\
    1. Send your question and I will guide you through a few details\n\
    2. /cancel - cancel the current conversation\n\
    3. /help - show this help";

/// Errors from the completion pipeline's collaborators.
///
/// None of these leave session state corrupted: the engine has already
/// finished its transition before any collaborator runs.
#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("retrieval failed: {0}")]
    Retrieval(#[from] RetrieverError),

    #[error("classification failed: {0}")]
    Classification(#[from] ClassifierError),

    #[error("ticket rendering failed: {0}")]
    Rendering(#[from] RenderError),
}

/// Orchestrates one channel's message flow around the intake engine.
pub struct TriageDispatcher<R, C, T, S>
where
    R: Retriever,
    C: Classifier,
    T: TicketRenderer,
    S: ChannelSender,
{
    engine: Arc<IntakeEngine>,
    retriever: Arc<R>,
    classifier: Arc<C>,
    renderer: Arc<T>,
    sender: Arc<S>,
    top_k: usize,
}

impl<R, C, T, S> TriageDispatcher<R, C, T, S>
where
    R: Retriever,
    C: Classifier,
    T: TicketRenderer,
    S: ChannelSender,
{
    /// Creates a dispatcher with the given collaborators.
    pub fn new(
        engine: Arc<IntakeEngine>,
        retriever: Arc<R>,
        classifier: Arc<C>,
        renderer: Arc<T>,
        sender: Arc<S>,
        top_k: usize,
    ) -> Self {
        Self {
            engine,
            retriever,
            classifier,
            renderer,
            sender,
            top_k,
        }
    }

    /// Entry point for one inbound message.
    pub async fn handle_message(&self, inbound: InboundMessage) -> Result<(), DispatchError> {
        info!(chat = %inbound.chat_id, user = %inbound.user_id, "inbound message");

        if inbound.text.starts_with('/') {
            self.handle_command(&inbound).await;
            return Ok(());
        }

        let key = inbound.conversation_key();
        if self.engine.is_active(&key).await {
            match self.engine.submit(&key, &inbound.text).await {
                IntakeOutcome::Prompt(prompt) => {
                    self.send(&inbound.chat_id, &prompt.message).await;
                    Ok(())
                }
                IntakeOutcome::Completed { collected_data } => {
                    self.finalize(&inbound, collected_data).await
                }
            }
        } else {
            self.handle_new_question(&inbound).await;
            Ok(())
        }
    }

    async fn handle_command(&self, inbound: &InboundMessage) {
        match inbound.text.as_str() {
            "/cancel" => {
                self.engine.cancel(&inbound.conversation_key()).await;
                self.send(&inbound.chat_id, "The current conversation has been cancelled.")
                    .await;
            }
            "/help" => {
                self.send(&inbound.chat_id, HELP_TEXT).await;
            }
            other => {
                self.send(&inbound.chat_id, &format!("Unknown command: {}", other))
                    .await;
            }
        }
    }

    async fn handle_new_question(&self, inbound: &InboundMessage) {
        self.send(
            &inbound.chat_id,
            &format!(
                "Got your question: {}\n\nLet me collect a few details so I can help you better.",
                inbound.text
            ),
        )
        .await;

        let first = self.engine.begin(&inbound.conversation_key()).await;
        self.send(&inbound.chat_id, &first.message).await;
    }

    /// Runs the completion pipeline and, on success, retires the session.
    ///
    /// On failure the session is left in place (completed, unexpired) so an
    /// operator can still inspect it; the user gets a failure notice.
    async fn finalize(
        &self,
        inbound: &InboundMessage,
        collected: HashMap<String, String>,
    ) -> Result<(), DispatchError> {
        match self.run_pipeline(inbound, &collected).await {
            Ok(()) => {
                self.engine.cancel(&inbound.conversation_key()).await;
                Ok(())
            }
            Err(e) => {
                error!(chat = %inbound.chat_id, error = %e, "triage pipeline failed");
                self.send(
                    &inbound.chat_id,
                    &format!("Something went wrong while processing your request: {}", e),
                )
                .await;
                Err(e)
            }
        }
    }

    async fn run_pipeline(
        &self,
        inbound: &InboundMessage,
        collected: &HashMap<String, String>,
    ) -> Result<(), DispatchError> {
        self.send(
            &inbound.chat_id,
            "Thanks for the details! I am analyzing your question...",
        )
        .await;

        let question = collected.get(QUESTION_FIELD).cloned().unwrap_or_default();

        let passages = self.retriever.search(&question, self.top_k).await?;
        let context = format_context(&passages);

        let classification = self
            .classifier
            .classify(&question, &context, collected)
            .await?;
        info!(
            category = %classification.category,
            confidence = classification.confidence,
            "question classified"
        );

        self.send(
            &inbound.chat_id,
            &format!(
                "Analysis complete!\n\nCategory: {}\nConfidence: {}%\nRationale: {}\n\nGenerating a ticket draft...",
                classification.category.label(),
                classification.confidence_percent(),
                classification.rationale,
            ),
        )
        .await;

        let fields = ticket_fields(inbound, collected, &classification, &question);
        let ticket = self.renderer.render(classification.category, &fields)?;
        self.send(&inbound.chat_id, &format!("```\n{}\n```", ticket))
            .await;

        Ok(())
    }

    /// Best-effort send; failures are logged, never propagated.
    async fn send(&self, chat_id: &str, text: &str) {
        if let Err(e) = self.sender.send(chat_id, text).await {
            warn!(chat = %chat_id, error = %e, "failed to send channel message");
        }
    }
}

/// Formats ranked passages into the context block handed to the classifier.
fn format_context(passages: &[Passage]) -> String {
    if passages.is_empty() {
        return "No relevant documentation found.".to_string();
    }

    passages
        .iter()
        .enumerate()
        .map(|(i, passage)| format!("### Document {}\n{}\n", i + 1, passage.content))
        .collect::<Vec<_>>()
        .join("\n")
}

/// Merges collected answers with classification metadata into the field map
/// the renderer consumes. Metadata wins on name collisions.
fn ticket_fields(
    inbound: &InboundMessage,
    collected: &HashMap<String, String>,
    classification: &Classification,
    question: &str,
) -> HashMap<String, String> {
    let mut fields = collected.clone();
    fields.insert(
        "title".to_string(),
        question.chars().take(TITLE_MAX_CHARS).collect(),
    );
    fields.insert("submitter".to_string(), inbound.submitter().to_string());
    fields.insert(
        "confidence".to_string(),
        classification.confidence_percent().to_string(),
    );
    fields.insert("reason".to_string(), classification.rationale.clone());
    fields.insert(
        "suggested_answer".to_string(),
        classification.suggested_reply.clone(),
    );
    fields
}
