use std::any::Any;

/// Best-effort extraction of a panic payload's message.
pub(crate) fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Ok(message) = payload.downcast::<String>() {
        *message
    } else {
        "unknown panic".to_string()
    }
}
