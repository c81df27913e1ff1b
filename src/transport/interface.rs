use crate::debouncer::core::SettleEvent;
use crate::server::predict::PredictResponse;
use std::sync::mpsc::Receiver;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TransportError {
    #[error("failed to encode request: {0}")]
    Encode(#[from] serde_json::Error),

    #[error("server is not accepting requests")]
    ServerUnavailable,

    #[error("server dropped the request without replying")]
    NoReply,

    #[error("server rejected request ({status}): {message}")]
    Rejected { status: u16, message: String },
}

pub type Delivery = Result<PredictResponse, TransportError>;

/// Carries settle events to the dispatcher side. `send` never blocks; the
/// outcome arrives on the returned receiver. Requests are delivered in the
/// order `send` was called.
pub trait SettleTransport {
    fn send(&self, event: &SettleEvent) -> Receiver<Delivery>;
}
