//! Dispatch and Tool Invocation Benchmarks
//!
//! Measures registry lookup, message dispatch through the lifecycle guard and
//! tool catalog invocation overhead.

use agentry::{AgentRegistry, DispatchService, ExecutionContext, Message, MessageType, ToolCatalog};
use agentry_testing::{MockAgent, MockTool};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use serde_json::json;
use std::collections::HashMap;
use std::sync::Arc;
use std::time::Duration;

fn populated_registry(runtime: &tokio::runtime::Runtime, size: usize) -> Arc<AgentRegistry> {
    let registry = Arc::new(AgentRegistry::new(size));
    runtime.block_on(async {
        for i in 0..size {
            let agent = Arc::new(MockAgent::with_id(format!("agent-{i}"), format!("Agent {i}")));
            registry
                .register(agent)
                .await
                .expect("benchmark registry has room");
        }
    });
    registry
}

/// Benchmark registry lookups at different sizes
fn bench_registry_lookup(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("registry_lookup");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(5));

    for size in [10usize, 100, 1000] {
        let registry = populated_registry(&runtime, size);
        let target = format!("agent-{}", size / 2);
        group.bench_with_input(BenchmarkId::new("by_id", size), &target, |b, target| {
            b.iter(|| std::hint::black_box(registry.lookup(std::hint::black_box(target))))
        });
        group.bench_with_input(BenchmarkId::new("list_available", size), &size, |b, _| {
            b.iter(|| std::hint::black_box(registry.list_available()))
        });
    }

    group.finish();
}

/// Benchmark end-to-end message dispatch
fn bench_dispatch(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("dispatch");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(5));

    let dispatch = DispatchService::new(populated_registry(&runtime, 100));
    let message = Message::builder(MessageType::Text, "benchmark payload")
        .sender("bench")
        .build();

    group.bench_function("echo_agent", |b| {
        b.to_async(&runtime).iter(|| async {
            let mut ctx = ExecutionContext::new();
            std::hint::black_box(dispatch.process("agent-50", &message, &mut ctx).await)
        })
    });

    group.finish();
}

/// Benchmark tool invocation through the catalog
fn bench_tool_invoke(c: &mut Criterion) {
    let runtime = tokio::runtime::Runtime::new().expect("tokio runtime");
    let mut group = c.benchmark_group("tool_invoke");
    group.throughput(Throughput::Elements(1));
    group.measurement_time(Duration::from_secs(5));

    let catalog = (0..20).fold(ToolCatalog::new(), |catalog, i| {
        catalog.with_tool(Arc::new(MockTool::new(format!("tool{i}")).requiring("input")))
    });
    let ctx = ExecutionContext::new();
    let params: HashMap<String, serde_json::Value> =
        HashMap::from([("input".to_string(), json!("benchmark input"))]);

    group.bench_function("mock_tool", |b| {
        b.to_async(&runtime).iter(|| async {
            std::hint::black_box(catalog.invoke("tool7", params.clone(), &ctx).await)
        })
    });

    group.bench_function("unknown_tool", |b| {
        b.to_async(&runtime).iter(|| async {
            std::hint::black_box(catalog.invoke("missing", params.clone(), &ctx).await)
        })
    });

    group.finish();
}

criterion_group!(benches, bench_registry_lookup, bench_dispatch, bench_tool_invoke);
criterion_main!(benches);
