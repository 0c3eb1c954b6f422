//! Error handling step definitions.

use std::time::Duration;

use cucumber::{given, then, World};
use vss_client::{ErrorKind, PublishError, TransportError};

/// Test context for error handling scenarios.
#[derive(Debug, World)]
#[world(init = Self::new)]
pub struct ErrorHandlingWorld {
    current_error: Option<PublishError>,
}

impl ErrorHandlingWorld {
    fn new() -> Self {
        Self {
            current_error: None,
        }
    }

    fn error(&self) -> &PublishError {
        self.current_error.as_ref().expect("no error set")
    }
}

// --- Given steps ---

#[given(expr = "a connection failure {string}")]
async fn given_connection_failure(world: &mut ErrorHandlingWorld, reason: String) {
    world.current_error = Some(PublishError::ConnectionFailed(
        TransportError::Unavailable(reason),
    ));
}

#[given(expr = "a remote rejection {string} saying {string}")]
async fn given_remote_rejection(world: &mut ErrorHandlingWorld, name: String, message: String) {
    world.current_error = Some(PublishError::CallFailed(TransportError::Remote {
        name,
        message,
    }));
}

#[given(expr = "a call that timed out after {int} milliseconds")]
async fn given_call_timed_out(world: &mut ErrorHandlingWorld, millis: u64) {
    world.current_error = Some(PublishError::CallFailed(TransportError::Timeout(
        Duration::from_millis(millis),
    )));
}

// --- Then steps ---

#[then(expr = "the error kind is {word}")]
async fn then_error_kind(world: &mut ErrorHandlingWorld, kind: String) {
    let expected = match kind.as_str() {
        "ConnectionFailed" => ErrorKind::ConnectionFailed,
        "CallFailed" => ErrorKind::CallFailed,
        other => panic!("unknown error kind: {}", other),
    };
    assert_eq!(world.error().kind(), expected);
}

#[then(expr = "the error message is {string}")]
async fn then_error_message(world: &mut ErrorHandlingWorld, expected: String) {
    assert_eq!(world.error().message(), expected);
}

#[then(expr = "the error displays as {string}")]
async fn then_error_display(world: &mut ErrorHandlingWorld, expected: String) {
    assert_eq!(world.error().to_string(), expected);
}

#[then("the error is a remote rejection")]
async fn then_remote_rejection(world: &mut ErrorHandlingWorld) {
    assert!(world.error().is_remote_rejection());
}

#[then("the error is a timeout")]
async fn then_timeout(world: &mut ErrorHandlingWorld) {
    assert!(world.error().is_timeout());
}

#[then(expr = "the remote error name is {string}")]
async fn then_remote_error_name(world: &mut ErrorHandlingWorld, expected: String) {
    assert_eq!(world.error().remote_error_name(), Some(expected.as_str()));
}
