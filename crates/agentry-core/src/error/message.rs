use thiserror::Error;

use crate::message::MessageStatus;

/// Errors produced when changing message state.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum MessageError {
    #[error("Cannot move message status from {from:?} to {to:?}")]
    InvalidStatusTransition {
        from: MessageStatus,
        to: MessageStatus,
    },
}

pub type MessageResult<T> = Result<T, MessageError>;
