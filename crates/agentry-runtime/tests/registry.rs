//! Registry lifecycle behavior with scripted agents.

use agentry_core::{Agent, LifecycleState};
use agentry_runtime::{AgentRegistry, RegistryError};
use agentry_testing::MockAgent;
use proptest::prelude::*;
use std::collections::HashSet;
use std::sync::Arc;
use std::time::Duration;

#[tokio::test]
async fn register_publishes_initialized_agent() {
    let registry = AgentRegistry::default();
    let agent = Arc::new(MockAgent::with_id("a-1", "alpha"));

    registry.register(agent.clone()).await.unwrap();

    assert_eq!(registry.count(), 1);
    assert!(registry.is_registered("a-1"));
    assert!(registry.lookup("a-1").unwrap().is_available());
    assert_eq!(agent.init_calls(), 1);
}

#[tokio::test]
async fn duplicate_id_is_rejected_and_original_untouched() {
    let registry = AgentRegistry::default();
    let original = Arc::new(MockAgent::with_id("same", "original"));
    let intruder = Arc::new(MockAgent::with_id("same", "intruder"));

    registry.register(original.clone()).await.unwrap();
    let err = registry.register(intruder.clone()).await.unwrap_err();

    assert!(matches!(err, RegistryError::DuplicateId(ref id) if id == "same"));
    assert_eq!(registry.lookup("same").unwrap().name(), "original");
    assert_eq!(original.destroy_calls(), 0);
    assert!(original.is_available());
    assert_eq!(intruder.init_calls(), 0);
}

#[tokio::test]
async fn failing_init_rolls_back() {
    let registry = AgentRegistry::default();
    let agent = Arc::new(MockAgent::with_id("bad", "bad").failing_init("no credentials"));

    let err = registry.register(agent.clone()).await.unwrap_err();

    assert_eq!(err.error_code(), "INITIALIZATION_FAILED");
    assert!(err.to_string().contains("no credentials"));
    assert_eq!(registry.count(), 0);
    assert!(registry.lookup("bad").is_none());
    assert_eq!(agent.core().state(), LifecycleState::Destroyed);
}

#[tokio::test]
async fn destroyed_instance_cannot_be_registered_again() {
    let registry = AgentRegistry::default();
    let agent = Arc::new(MockAgent::with_id("once", "once"));

    registry.register(agent.clone()).await.unwrap();
    assert!(registry.unregister("once").await);

    let err = registry.register(agent).await.unwrap_err();
    assert!(matches!(err, RegistryError::InitializationFailed { .. }));
    assert_eq!(registry.count(), 0);
}

#[tokio::test]
async fn unregister_unknown_or_blank_is_false() {
    let registry = AgentRegistry::default();
    registry
        .register(Arc::new(MockAgent::with_id("keep", "keep")))
        .await
        .unwrap();

    assert!(!registry.unregister("missing").await);
    assert!(!registry.unregister("   ").await);
    assert_eq!(registry.count(), 1);
}

#[tokio::test]
async fn unregister_reports_destroy_failure_but_removes() {
    let registry = AgentRegistry::default();
    let agent = Arc::new(MockAgent::with_id("stuck", "stuck").failing_destroy("busy"));
    registry.register(agent.clone()).await.unwrap();

    assert!(!registry.unregister("stuck").await);
    assert!(!registry.is_registered("stuck"));
    assert_eq!(agent.destroy_calls(), 1);
}

#[tokio::test]
async fn stop_empties_store_despite_failures() {
    let registry = AgentRegistry::default();
    registry.start();
    let healthy = Arc::new(MockAgent::with_id("h", "healthy"));
    let broken = Arc::new(MockAgent::with_id("b", "broken").failing_destroy("refuses"));
    registry.register(healthy.clone()).await.unwrap();
    registry.register(broken.clone()).await.unwrap();

    registry.stop().await;
    registry.stop().await;

    assert_eq!(registry.count(), 0);
    assert!(!registry.is_started());
    assert_eq!(healthy.destroy_calls(), 1);
    assert_eq!(broken.destroy_calls(), 1);
}

#[tokio::test]
async fn list_available_reads_current_state() {
    let registry = AgentRegistry::default();
    let first = Arc::new(MockAgent::with_id("1", "first"));
    let second = Arc::new(MockAgent::with_id("2", "second"));
    registry.register(first.clone()).await.unwrap();
    registry.register(second.clone()).await.unwrap();

    assert_eq!(registry.list_available().len(), 2);
    assert!(second.core().mark_unavailable());

    let available: Vec<_> = registry
        .list_available()
        .iter()
        .map(|a| a.id().to_string())
        .collect();
    assert_eq!(available, vec!["1"]);
    assert_eq!(registry.list_all().len(), 2);
}

#[tokio::test]
async fn blank_name_search_equals_list_all() {
    let registry = AgentRegistry::default();
    for (id, name) in [("x", "Planner"), ("y", "Researcher"), ("z", "Writer")] {
        registry
            .register(Arc::new(MockAgent::with_id(id, name)))
            .await
            .unwrap();
    }

    let ids = |agents: Vec<Arc<dyn Agent>>| -> Vec<String> {
        agents.iter().map(|a| a.id().to_string()).collect()
    };
    assert_eq!(ids(registry.find_by_name("")), ids(registry.list_all()));
}

#[tokio::test]
async fn pending_agent_is_invisible_and_reserves_its_id() {
    let registry = Arc::new(AgentRegistry::default());
    let slow = Arc::new(MockAgent::with_id("slow", "slow").with_delay(Duration::from_millis(200)));

    let background = {
        let registry = registry.clone();
        let slow = slow.clone();
        tokio::spawn(async move { registry.register(slow).await })
    };

    tokio::time::sleep(Duration::from_millis(50)).await;
    assert!(registry.lookup("slow").is_none());
    assert_eq!(registry.count(), 0);

    let err = registry
        .register(Arc::new(MockAgent::with_id("slow", "impostor")))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::DuplicateId(_)));

    background.await.unwrap().unwrap();
    assert_eq!(registry.lookup("slow").unwrap().name(), "slow");
}

#[tokio::test]
async fn pending_agents_count_toward_capacity() {
    let registry = Arc::new(AgentRegistry::new(1));
    let slow = Arc::new(MockAgent::with_id("p", "pending").with_delay(Duration::from_millis(200)));

    let background = {
        let registry = registry.clone();
        tokio::spawn(async move { registry.register(slow).await })
    };
    tokio::time::sleep(Duration::from_millis(50)).await;

    let err = registry
        .register(Arc::new(MockAgent::with_id("q", "late")))
        .await
        .unwrap_err();
    assert!(matches!(err, RegistryError::CapacityExceeded { max: 1 }));
    background.await.unwrap().unwrap();
}

#[tokio::test]
async fn cancelled_registration_releases_its_reservation() {
    let registry = AgentRegistry::new(1);
    let slow = Arc::new(MockAgent::with_id("slow", "slow").with_delay(Duration::from_millis(200)));

    let timed_out =
        tokio::time::timeout(Duration::from_millis(10), registry.register(slow)).await;
    assert!(timed_out.is_err());
    assert_eq!(registry.count(), 0);
    assert!(registry.lookup("slow").is_none());

    registry
        .register(Arc::new(MockAgent::with_id("other", "other")))
        .await
        .unwrap();
    assert!(registry.unregister("other").await);

    registry
        .register(Arc::new(MockAgent::with_id("slow", "retry")))
        .await
        .unwrap();
    assert_eq!(registry.lookup("slow").unwrap().name(), "retry");
    assert_eq!(registry.count(), 1);
}

#[tokio::test]
async fn stop_prevents_late_publication() {
    let registry = Arc::new(AgentRegistry::new(4));
    registry.start();
    let slow = Arc::new(MockAgent::with_id("late", "late").with_delay(Duration::from_millis(100)));

    let background = {
        let registry = registry.clone();
        let slow = slow.clone();
        tokio::spawn(async move { registry.register(slow).await })
    };
    tokio::time::sleep(Duration::from_millis(20)).await;

    registry.stop().await;
    let err = background.await.unwrap().unwrap_err();

    assert!(matches!(err, RegistryError::Stopped(ref id) if id == "late"));
    assert_eq!(err.error_code(), "REGISTRY_STOPPED");
    assert_eq!(registry.count(), 0);
    assert!(registry.lookup("late").is_none());
    assert_eq!(slow.destroy_calls(), 1);
    assert_eq!(slow.core().state(), LifecycleState::Destroyed);

    registry.start();
    registry
        .register(Arc::new(MockAgent::with_id("late", "after restart")))
        .await
        .unwrap();
    assert_eq!(registry.count(), 1);
}

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn concurrent_registration_respects_capacity() {
    let registry = Arc::new(AgentRegistry::new(10));

    let attempts = (0..40).map(|i| {
        let registry = registry.clone();
        tokio::spawn(async move {
            registry
                .register(Arc::new(MockAgent::with_id(format!("agent-{}", i % 20), "worker")))
                .await
        })
    });
    let results = futures::future::join_all(attempts).await;

    let succeeded = results
        .into_iter()
        .filter(|joined| matches!(joined, Ok(Ok(()))))
        .count();
    assert_eq!(succeeded, 10);
    assert_eq!(registry.count(), 10);
}

#[derive(Debug, Clone)]
enum Op {
    Register(u8),
    Unregister(u8),
}

fn op() -> impl Strategy<Value = Op> {
    prop_oneof![
        (0u8..12).prop_map(Op::Register),
        (0u8..12).prop_map(Op::Unregister),
    ]
}

proptest! {
    #[test]
    fn count_tracks_successful_operations(ops in prop::collection::vec(op(), 1..60)) {
        tokio_test::block_on(async {
            let max = 5;
            let registry = AgentRegistry::new(max);
            let mut model: HashSet<u8> = HashSet::new();
            let mut registered = 0usize;
            let mut unregistered = 0usize;

            for op in ops {
                match op {
                    Op::Register(n) => {
                        let result = registry
                            .register(Arc::new(MockAgent::with_id(format!("id-{n}"), "prop")))
                            .await;
                        let expected = !model.contains(&n) && model.len() < max;
                        prop_assert_eq!(result.is_ok(), expected);
                        if result.is_ok() {
                            model.insert(n);
                            registered += 1;
                        }
                    }
                    Op::Unregister(n) => {
                        let removed = registry.unregister(&format!("id-{n}")).await;
                        prop_assert_eq!(removed, model.remove(&n));
                        if removed {
                            unregistered += 1;
                        }
                    }
                }
                prop_assert!(registry.count() <= max);
                prop_assert_eq!(registry.count(), registered - unregistered);
            }
            Ok(())
        })?;
    }
}
