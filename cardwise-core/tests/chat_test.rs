//! Integration tests for the chat orchestrator and session persistence.

mod common;

use std::sync::Arc;

use cardwise_core::prompts::{CHAT_FALLBACK_REPLY, OPENING_MESSAGE};
use cardwise_core::types::Sender;
use cardwise_core::{ChatOrchestrator, SessionStore};
use common::MockLlm;

#[tokio::test]
async fn turn_appends_exactly_two_messages() {
    let store = Arc::new(SessionStore::in_memory());
    let llm = Arc::new(MockLlm::new("{}"));
    let chat = ChatOrchestrator::new(llm, store.clone());

    let (_, history) = chat.turn("s1", "I am 30").await;
    // seeded greeting + user + bot
    assert_eq!(history.len(), 3);

    let (_, history) = chat.turn("s1", "I earn 80k per month").await;
    assert_eq!(history.len(), 5);
}

#[tokio::test]
async fn first_message_is_the_opening_greeting() {
    let store = Arc::new(SessionStore::in_memory());
    let llm = Arc::new(MockLlm::new("{}"));
    let chat = ChatOrchestrator::new(llm, store.clone());

    let (_, history) = chat.turn("fresh", "hello").await;
    assert_eq!(history[0].sender, Sender::Bot);
    assert_eq!(history[0].text, OPENING_MESSAGE);
    assert_eq!(history[1].sender, Sender::User);
    assert_eq!(history[1].text, "hello");
}

#[tokio::test]
async fn completion_failure_degrades_to_fallback_reply() {
    let store = Arc::new(SessionStore::in_memory());
    let llm = Arc::new(MockLlm::failing());
    let chat = ChatOrchestrator::new(llm, store.clone());

    let (reply, history) = chat.turn("s1", "hello").await;
    assert_eq!(reply, CHAT_FALLBACK_REPLY);
    // turn still completes with both messages appended
    assert_eq!(history.len(), 3);
    assert_eq!(history[2].text, CHAT_FALLBACK_REPLY);
}

#[tokio::test]
async fn prompt_contains_full_transcript() {
    let store = Arc::new(SessionStore::in_memory());
    let llm = Arc::new(MockLlm::new("{}"));
    let chat = ChatOrchestrator::new(llm.clone(), store);

    chat.turn("s1", "I am 30").await;

    let prompts = llm.recorded_prompts();
    assert_eq!(prompts.len(), 1);
    assert!(prompts[0].contains(OPENING_MESSAGE));
    assert!(prompts[0].contains("user: I am 30"));
    assert!(prompts[0].contains("credit card recommendation assistant"));
}

#[tokio::test]
async fn sessions_survive_a_store_reload() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");

    {
        let store = Arc::new(SessionStore::with_file(&path));
        let llm = Arc::new(MockLlm::new("{}"));
        let chat = ChatOrchestrator::new(llm, store);
        chat.turn("persisted", "I am 30").await;
    }

    let reloaded = SessionStore::with_file(&path);
    let session = reloaded.get("persisted").await.unwrap();
    assert_eq!(session.history.len(), 3);
    assert_eq!(session.history[0].text, OPENING_MESSAGE);
    assert_eq!(session.history[1].text, "I am 30");
}

#[tokio::test]
async fn corrupt_sessions_file_starts_empty() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("sessions.json");
    std::fs::write(&path, "not json").unwrap();

    let store = SessionStore::with_file(&path);
    assert!(store.is_empty().await);
}
