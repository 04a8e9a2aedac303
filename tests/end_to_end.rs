//! End-to-end flows across registry, dispatch, tools and sessions.

use agentry::{
    Agent, AgentRegistry, ChatMessage, ChatSession, DispatchService, ExecutionContext,
    InMemorySessionStore, Message, MessageRole, MessageType, Priority, RuntimeConfig,
    SessionStore, SimpleAiAgent, ToolCatalog,
};
use agentry_testing::{MockAgent, MockReply, MockTool};
use serde_json::{Value, json};
use std::collections::HashMap;
use std::sync::Arc;

fn params(pairs: &[(&str, Value)]) -> HashMap<String, Value> {
    pairs
        .iter()
        .map(|(key, value)| (key.to_string(), value.clone()))
        .collect()
}

#[tokio::test]
async fn conversation_is_dispatched_and_recorded() {
    let registry = Arc::new(AgentRegistry::default());
    registry.start();
    let agent = Arc::new(SimpleAiAgent::new());
    let agent_id = agent.id().to_string();
    registry.register(agent).await.unwrap();

    let dispatch = DispatchService::new(registry.clone());
    let store = InMemorySessionStore::new();
    let session = store
        .create_session(ChatSession::new("Greetings", "user-1", agent_id.clone()))
        .await
        .unwrap();

    let mut ctx = ExecutionContext::new()
        .with_session(session.id.clone())
        .with_user("user-1");
    let request = Message::builder(MessageType::Text, "hello there")
        .sender("user-1")
        .receiver(agent_id.clone())
        .build();
    let reply = dispatch.process(&agent_id, &request, &mut ctx).await.unwrap();

    store
        .append_message(ChatMessage::from_message(&session.id, MessageRole::User, &request))
        .await
        .unwrap();
    store
        .append_message(ChatMessage::from_message(&session.id, MessageRole::Agent, &reply))
        .await
        .unwrap();

    assert!(reply.content().starts_with("Hello!"));
    assert_eq!(store.count_messages(&session.id).await.unwrap(), 2);

    let latest = store.latest_messages(&session.id, 1).await.unwrap();
    assert_eq!(latest[0].id, reply.id());
    assert_eq!(latest[0].metadata["type"], "response");

    registry.stop().await;
    assert_eq!(registry.count(), 0);
    assert!(dispatch.process(&agent_id, &request, &mut ctx).await.is_err());
}

#[tokio::test]
async fn failing_agent_never_breaks_its_neighbours() {
    let registry = Arc::new(AgentRegistry::new(4));
    let healthy = Arc::new(MockAgent::with_id("healthy", "Healthy"));
    let broken = Arc::new(MockAgent::with_id("broken", "Broken").replying(MockReply::Panic(
        "handler exploded".into(),
    )));
    registry.register(healthy.clone()).await.unwrap();
    registry.register(broken.clone()).await.unwrap();

    let dispatch = DispatchService::new(registry);
    let request = Message::builder(MessageType::Query, "ping")
        .sender("caller")
        .build();

    let error = dispatch
        .process("broken", &request, &mut ExecutionContext::new())
        .await
        .unwrap();
    assert_eq!(error.kind(), MessageType::Error);
    assert_eq!(error.priority(), Priority::High);
    assert_eq!(error.receiver(), "caller");

    let reply = dispatch
        .process("healthy", &request, &mut ExecutionContext::new())
        .await
        .unwrap();
    assert_eq!(reply.content(), "ping");
    assert_eq!(dispatch.statistics().available, 2);
}

#[tokio::test]
async fn configured_catalog_runs_built_in_and_custom_tools() {
    let config = RuntimeConfig::from_toml_str(
        r#"
        max_agents = 5

        [tools]
        enabled = true
        "#,
    )
    .unwrap();

    let mock = MockTool::new("summarize").with_response("long text", json!("short"));
    let catalog = ToolCatalog::from_config(&config.tools).with_tool(Arc::new(mock.clone()));
    assert_eq!(
        catalog.names(),
        vec!["file_processor", "http_request", "summarize"]
    );

    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("notes.txt");
    let path = path.to_string_lossy().to_string();
    let ctx = ExecutionContext::new();

    let written = catalog
        .invoke(
            "file_processor",
            params(&[
                ("operation", json!("write")),
                ("filePath", json!(path)),
                ("content", json!("remember the milk")),
            ]),
            &ctx,
        )
        .await
        .unwrap();
    assert!(written.is_success());

    let read = catalog
        .invoke(
            "file_processor",
            params(&[("operation", json!("read")), ("filePath", json!(path))]),
            &ctx,
        )
        .await
        .unwrap();
    assert_eq!(read.data(), Some(&json!("remember the milk")));

    let summary = catalog
        .invoke("summarize", params(&[("input", json!("long text"))]), &ctx)
        .await
        .unwrap();
    assert_eq!(summary.data(), Some(&json!("short")));
    assert_eq!(mock.call_count(), 1);
}
