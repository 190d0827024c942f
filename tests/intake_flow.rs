//! Integration tests for the guided intake flow.
//!
//! These tests verify the end-to-end path:
//! 1. A first message acknowledges and starts the question sequence
//! 2. Each answer advances the session until collection completes
//! 3. Completion runs retrieve -> classify -> render and replies with a ticket
//! 4. Expired sessions restart transparently on the next message
//!
//! Uses in-memory implementations of every collaborator port, so nothing
//! external is required.

use async_trait::async_trait;
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use support_triage::application::{spawn_sweeper, TriageDispatcher};
use support_triage::config::{parse_questions, AppConfig};
use support_triage::domain::foundation::ConversationKey;
use support_triage::domain::intake::{IntakeEngine, IntakeOutcome, Question, QuestionSet};
use support_triage::ports::{
    ChannelError, ChannelSender, Classification, Classifier, ClassifierError, InboundMessage,
    Passage, RenderError, Retriever, RetrieverError, TicketCategory, TicketRenderer,
};

// =============================================================================
// Test Infrastructure
// =============================================================================

fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter("support_triage=debug")
        .with_test_writer()
        .try_init();
}

/// Retriever returning a fixed passage list
struct FixedRetriever {
    passages: Vec<Passage>,
}

#[async_trait]
impl Retriever for FixedRetriever {
    async fn search(&self, _query: &str, _top_k: usize) -> Result<Vec<Passage>, RetrieverError> {
        Ok(self.passages.clone())
    }
}

/// Classifier returning a fixed result and recording what it saw
struct FixedClassifier {
    result: Classification,
    seen: Mutex<Vec<(String, String, HashMap<String, String>)>>,
}

impl FixedClassifier {
    fn bug() -> Self {
        Self {
            result: Classification {
                category: TicketCategory::Bug,
                confidence: 0.92,
                rationale: "crash reproduced against the docs".to_string(),
                suggested_reply: "upgrade to the latest patch release".to_string(),
            },
            seen: Mutex::new(Vec::new()),
        }
    }
}

#[async_trait]
impl Classifier for FixedClassifier {
    async fn classify(
        &self,
        question: &str,
        context: &str,
        details: &HashMap<String, String>,
    ) -> Result<Classification, ClassifierError> {
        self.seen.lock().unwrap().push((
            question.to_string(),
            context.to_string(),
            details.clone(),
        ));
        Ok(self.result.clone())
    }
}

/// Renderer producing a one-line ticket from the field map
struct LineRenderer;

impl TicketRenderer for LineRenderer {
    fn render(
        &self,
        category: TicketCategory,
        fields: &HashMap<String, String>,
    ) -> Result<String, RenderError> {
        Ok(format!(
            "{} | {} | reported by {}",
            category,
            fields.get("title").cloned().unwrap_or_default(),
            fields.get("submitter").cloned().unwrap_or_default(),
        ))
    }
}

/// Sender recording every outbound message
#[derive(Default)]
struct RecordingSender {
    sent: Mutex<Vec<String>>,
}

impl RecordingSender {
    fn messages(&self) -> Vec<String> {
        self.sent.lock().unwrap().clone()
    }
}

#[async_trait]
impl ChannelSender for RecordingSender {
    async fn send(&self, _chat_id: &str, text: &str) -> Result<(), ChannelError> {
        self.sent.lock().unwrap().push(text.to_string());
        Ok(())
    }
}

fn spec_questions() -> QuestionSet {
    QuestionSet::new(vec![
        Question::new("version", "version?", true),
        Question::new("environment", "environment?", true),
        Question::new("error_details", "error_details?", true),
    ])
    .unwrap()
}

// =============================================================================
// Engine Traces
// =============================================================================

#[tokio::test]
async fn three_question_trace_matches_the_documented_sequence() {
    init_tracing();
    let engine = IntakeEngine::with_default_ttl(spec_questions());
    let u1 = ConversationKey::new("u1");

    let prompt = engine.begin(&u1).await;
    assert_eq!(prompt.message, "version?");

    match engine.submit(&u1, "1.2.0").await {
        IntakeOutcome::Prompt(p) => assert_eq!(p.message, "environment?"),
        other => panic!("unexpected outcome {:?}", other),
    }
    match engine.submit(&u1, "staging").await {
        IntakeOutcome::Prompt(p) => assert_eq!(p.message, "error_details?"),
        other => panic!("unexpected outcome {:?}", other),
    }
    match engine.submit(&u1, "500 on login").await {
        IntakeOutcome::Completed { collected_data } => {
            assert_eq!(collected_data["version"], "1.2.0");
            assert_eq!(collected_data["environment"], "staging");
            assert_eq!(collected_data["error_details"], "500 on login");
        }
        other => panic!("unexpected outcome {:?}", other),
    }

    assert_eq!(
        engine.summarize(&u1).await,
        "- Version: 1.2.0\n- Environment: staging\n- Error details: 500 on login"
    );
}

#[tokio::test]
async fn restart_after_expiry_discards_the_in_flight_answer() {
    init_tracing();
    // Zero-width window: any elapsed time expires the session.
    let engine = IntakeEngine::new(spec_questions(), chrono::Duration::zero());
    let u1 = ConversationKey::new("u1");

    engine.begin(&u1).await;
    tokio::time::sleep(Duration::from_millis(5)).await;

    match engine.submit(&u1, "1.2.0").await {
        IntakeOutcome::Prompt(p) => assert_eq!(p.field_name, "version"),
        other => panic!("unexpected outcome {:?}", other),
    }
    assert!(engine.answers(&u1).await.unwrap().is_empty());
}

#[tokio::test]
async fn sweeper_task_clears_out_stale_sessions() {
    init_tracing();
    let engine = Arc::new(IntakeEngine::new(spec_questions(), chrono::Duration::zero()));

    engine.begin(&ConversationKey::new("u1")).await;
    engine.begin(&ConversationKey::new("u2")).await;
    tokio::time::sleep(Duration::from_millis(5)).await;

    let handle = spawn_sweeper(Arc::clone(&engine), Duration::from_millis(10));
    tokio::time::sleep(Duration::from_millis(50)).await;
    handle.abort();

    assert!(engine.answers(&ConversationKey::new("u1")).await.is_none());
    assert!(engine.answers(&ConversationKey::new("u2")).await.is_none());
}

// =============================================================================
// Dispatcher Walkthrough
// =============================================================================

#[tokio::test]
async fn full_walkthrough_from_first_message_to_ticket() {
    init_tracing();

    let config = AppConfig::default();
    let questions = parse_questions(
        "- name: description\n  prompt: \"Please describe the problem.\"\n\
         - name: version\n  prompt: \"Which version?\"\n",
    )
    .unwrap();

    let engine = Arc::new(IntakeEngine::new(questions, config.intake.session_ttl()));
    let retriever = Arc::new(FixedRetriever {
        passages: vec![Passage::new("Exports require the reporting module.", 0.88)],
    });
    let classifier = Arc::new(FixedClassifier::bug());
    let renderer = Arc::new(LineRenderer);
    let sender = Arc::new(RecordingSender::default());

    let dispatcher = TriageDispatcher::new(
        Arc::clone(&engine),
        Arc::clone(&retriever),
        Arc::clone(&classifier),
        Arc::clone(&renderer),
        Arc::clone(&sender),
        config.retrieval.top_k,
    );

    let inbound = |text: &str| {
        InboundMessage::new("oc_chat", "ou_user", text).with_sender_name("Morgan")
    };

    // First contact: acknowledgement plus the first question.
    dispatcher
        .handle_message(inbound("export to CSV crashes"))
        .await
        .unwrap();

    // Two answers finish the sequence and run the pipeline.
    dispatcher
        .handle_message(inbound("crash on CSV export with unicode names"))
        .await
        .unwrap();
    dispatcher.handle_message(inbound("2.4.1")).await.unwrap();

    let messages = sender.messages();
    assert_eq!(messages.len(), 6);
    assert!(messages[0].contains("export to CSV crashes"));
    assert_eq!(messages[1], "Please describe the problem.");
    assert_eq!(messages[2], "Which version?");
    assert!(messages[3].contains("analyzing"));
    assert!(messages[4].contains("Defect / bug"));
    assert!(messages[4].contains("92%"));
    assert!(messages[5].contains("bug | crash on CSV export with unicode names"));
    assert!(messages[5].contains("reported by Morgan"));

    // The classifier saw the description answer plus the retrieved context.
    let seen = classifier.seen.lock().unwrap();
    assert_eq!(seen.len(), 1);
    assert_eq!(seen[0].0, "crash on CSV export with unicode names");
    assert!(seen[0].1.contains("Exports require the reporting module."));
    assert_eq!(seen[0].2["version"], "2.4.1");

    // Success retires the session; the next message starts over.
    let key = ConversationKey::scoped("oc_chat", "ou_user");
    assert!(!engine.is_active(&key).await);
    assert!(engine.answers(&key).await.is_none());
}

#[tokio::test]
async fn cancel_command_mid_collection_resets_the_flow() {
    init_tracing();

    let engine = Arc::new(IntakeEngine::with_default_ttl(spec_questions()));
    let sender = Arc::new(RecordingSender::default());
    let dispatcher = TriageDispatcher::new(
        Arc::clone(&engine),
        Arc::new(FixedRetriever { passages: vec![] }),
        Arc::new(FixedClassifier::bug()),
        Arc::new(LineRenderer),
        Arc::clone(&sender),
        5,
    );

    let inbound = |text: &str| InboundMessage::new("c1", "u1", text);
    let key = ConversationKey::scoped("c1", "u1");

    dispatcher.handle_message(inbound("it broke")).await.unwrap();
    dispatcher.handle_message(inbound("1.0.0")).await.unwrap();
    assert!(engine.is_active(&key).await);

    dispatcher.handle_message(inbound("/cancel")).await.unwrap();
    assert!(!engine.is_active(&key).await);
    assert!(engine.answers(&key).await.is_none());
    assert!(sender
        .messages()
        .last()
        .unwrap()
        .contains("cancelled"));
}
