use crate::debouncer::core::SettleEvent;
use crate::server::predict::PredictResponse;
use crate::transport::interface::{Delivery, SettleTransport, TransportError};
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::mpsc::{channel, Receiver};
use std::sync::Mutex;

#[derive(Default)]
pub struct SettleTransportFake {
    sent: Mutex<Vec<SettleEvent>>,
    reject: AtomicBool,
}

impl SettleTransportFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set_reject(&self, reject: bool) {
        self.reject.store(reject, Ordering::SeqCst);
    }

    pub fn sent(&self) -> Vec<SettleEvent> {
        self.sent.lock().map(|s| s.clone()).unwrap_or_default()
    }
}

impl SettleTransport for SettleTransportFake {
    fn send(&self, event: &SettleEvent) -> Receiver<Delivery> {
        if let Ok(mut sent) = self.sent.lock() {
            sent.push(event.clone());
        }

        let (tx, rx) = channel();
        let delivery = if self.reject.load(Ordering::SeqCst) {
            Err(TransportError::Rejected {
                status: 503,
                message: "device disconnected".to_string(),
            })
        } else {
            Ok(PredictResponse {
                success: true,
                message: "Prediction received successfully".to_string(),
                data: None,
            })
        };
        let _ = tx.send(delivery);
        rx
    }
}
