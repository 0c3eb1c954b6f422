//! Publisher step definitions.

use cucumber::{given, then, when, World};
use vss_client::mock::MockBus;
use vss_client::{ErrorKind, Publisher, PublisherConfig, Signal};

/// Test context for publishing scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct PublisherWorld {
    bus: MockBus,
    config: PublisherConfig,
    results: Vec<vss_client::Result<()>>,
}

impl PublisherWorld {
    fn new() -> Self {
        Self {
            bus: MockBus::new(),
            config: PublisherConfig::default(),
            results: Vec::new(),
        }
    }

    fn last_result(&self) -> &vss_client::Result<()> {
        self.results.last().expect("no publish attempted")
    }
}

fn parse_kind(kind: &str) -> ErrorKind {
    match kind {
        "ConnectionFailed" => ErrorKind::ConnectionFailed,
        "CallFailed" => ErrorKind::CallFailed,
        other => panic!("unknown error kind: {}", other),
    }
}

// --- Given steps ---

#[given("a service that accepts every call")]
async fn given_accepting_service(world: &mut PublisherWorld) {
    world.bus = MockBus::new();
}

#[given("a service that rejects empty signal names")]
async fn given_rejecting_service(world: &mut PublisherWorld) {
    world.bus = MockBus::rejecting_empty_names();
}

#[given("no bus endpoint is available")]
async fn given_no_endpoint(world: &mut PublisherWorld) {
    world.bus = MockBus::unreachable();
}

#[given(expr = "the service replies after {int} milliseconds")]
async fn given_call_delay(world: &mut PublisherWorld, millis: u64) {
    world
        .bus
        .set_call_delay(Some(std::time::Duration::from_millis(millis)))
        .await;
}

#[given(expr = "the bus completes the handshake after {int} milliseconds")]
async fn given_connect_delay(world: &mut PublisherWorld, millis: u64) {
    world
        .bus
        .set_connect_delay(Some(std::time::Duration::from_millis(millis)))
        .await;
}

#[given(expr = "a call timeout of {int} milliseconds")]
async fn given_call_timeout(world: &mut PublisherWorld, millis: u64) {
    world.config.call_timeout_ms = millis;
}

#[given(expr = "the publisher targets method {string} on {string}")]
async fn given_custom_target(world: &mut PublisherWorld, method: String, path: String) {
    world.config.method_name = method;
    world.config.object_path = path;
}

// --- When steps ---

#[when(expr = "I publish {string} with value {float}")]
async fn when_publish(world: &mut PublisherWorld, name: String, value: f64) {
    let publisher =
        Publisher::new(world.bus.clone(), &world.config).expect("valid publisher config");
    let result = publisher.publish(&name, value).await;
    world.results.push(result);
}

// --- Then steps ---

#[then("the publish succeeds")]
async fn then_publish_succeeds(world: &mut PublisherWorld) {
    for result in &world.results {
        assert!(result.is_ok(), "expected success, got {:?}", result);
    }
}

#[then(expr = "the publish fails with {word}")]
async fn then_publish_fails_with(world: &mut PublisherWorld, kind: String) {
    let err = world
        .last_result()
        .as_ref()
        .expect_err("expected the publish to fail");
    assert_eq!(err.kind(), parse_kind(&kind));
}

#[then("the error is a remote rejection")]
async fn then_remote_rejection(world: &mut PublisherWorld) {
    let err = world.last_result().as_ref().expect_err("expected failure");
    assert!(err.is_remote_rejection(), "not a rejection: {}", err);
}

#[then("the error is a timeout")]
async fn then_timeout(world: &mut PublisherWorld) {
    let err = world.last_result().as_ref().expect_err("expected failure");
    assert!(err.is_timeout(), "not a timeout: {}", err);
}

#[then(expr = "the service received {int} call(s)")]
async fn then_service_received(world: &mut PublisherWorld, count: usize) {
    assert_eq!(world.bus.invocations().await.len(), count);
}

#[then(expr = "{int} connections were opened")]
async fn then_connections_opened(world: &mut PublisherWorld, count: usize) {
    assert_eq!(world.bus.connection_count().await, count);
}

#[then(expr = "the last call carried {string} with value {float}")]
async fn then_last_call_carried(world: &mut PublisherWorld, name: String, value: f64) {
    let calls = world.bus.invocations().await;
    let last = calls.last().expect("no call received");
    assert_eq!(last.signal, Signal::new(name, value));
}

#[then(expr = "the last call targeted method {string} on {string}")]
async fn then_last_call_targeted(world: &mut PublisherWorld, method: String, path: String) {
    let calls = world.bus.invocations().await;
    let last = calls.last().expect("no call received");
    assert_eq!(last.method, method);
    assert_eq!(last.path, path);
}
