use crate::debouncer::core::SettleEvent;
use crate::server::predict::{ApiResponse, PredictRequest, PredictResponse};
use crate::server::worker::{ServerHandle, ServerRequest};
use crate::transport::interface::{Delivery, SettleTransport, TransportError};
use std::sync::mpsc::{channel, Receiver};

/// Posts settle events as JSON to a predict server running in this process.
pub struct SettleTransportInProcess {
    server: ServerHandle,
}

impl SettleTransportInProcess {
    pub fn new(server: ServerHandle) -> Self {
        Self { server }
    }
}

impl SettleTransport for SettleTransportInProcess {
    fn send(&self, event: &SettleEvent) -> Receiver<Delivery> {
        let (delivery_tx, delivery_rx) = channel();

        let body = match serde_json::to_string(&PredictRequest {
            class_name: event.class_name.clone(),
            probability: event.probability,
        }) {
            Ok(body) => body,
            Err(e) => {
                let _ = delivery_tx.send(Err(TransportError::from(e)));
                return delivery_rx;
            }
        };

        let (reply, response) = channel();
        if self.server.submit(ServerRequest { body, reply }).is_err() {
            let _ = delivery_tx.send(Err(TransportError::ServerUnavailable));
            return delivery_rx;
        }

        std::thread::spawn(move || {
            let delivery = match response.recv() {
                Ok(response) => to_delivery(response),
                Err(_) => Err(TransportError::NoReply),
            };
            let _ = delivery_tx.send(delivery);
        });

        delivery_rx
    }
}

fn to_delivery(response: ApiResponse) -> Delivery {
    let parsed: Result<PredictResponse, _> = serde_json::from_str(&response.body);

    match (response.is_success(), parsed) {
        (true, Ok(body)) => Ok(body),
        (true, Err(e)) => Err(TransportError::Encode(e)),
        (false, Ok(body)) => Err(TransportError::Rejected {
            status: response.status,
            message: body.message,
        }),
        (false, Err(_)) => Err(TransportError::Rejected {
            status: response.status,
            message: response.body,
        }),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::device_serial::impl_fake::DeviceSerialFake;
    use crate::device_serial::interface::DeviceSerial;
    use crate::dispatcher::command::CommandTable;
    use crate::dispatcher::core::Dispatcher;
    use crate::library::logger::impl_fake::LoggerFake;
    use crate::server::predict::PredictServer;
    use std::sync::Arc;

    fn fixture() -> (SettleTransportInProcess, Arc<DeviceSerialFake>) {
        let logger = Arc::new(LoggerFake::new());
        let serial = Arc::new(DeviceSerialFake::new(logger.clone()));
        serial.open().unwrap();
        let dispatcher = Dispatcher::new(CommandTable::default(), serial.clone(), logger.clone());
        let handle = PredictServer::new(dispatcher, logger).start();
        (SettleTransportInProcess::new(handle), serial)
    }

    fn event(class_name: &str) -> SettleEvent {
        SettleEvent {
            class_name: class_name.to_string(),
            probability: 0.9,
        }
    }

    #[test]
    fn test_settle_reaches_serial_port() {
        let (transport, serial) = fixture();

        let delivery = transport.send(&event("Organik")).recv().unwrap();

        let response = delivery.unwrap();
        assert!(response.success);
        assert_eq!(response.data.unwrap().percentage, "90%");
        assert_eq!(serial.written(), vec![b"A\n".to_vec()]);
    }

    #[test]
    fn test_rejection_is_surfaced() {
        let (transport, serial) = fixture();
        serial.set_fail_writes(true);

        let delivery = transport.send(&event("B3")).recv().unwrap();

        assert!(matches!(
            delivery,
            Err(TransportError::Rejected { status: 503, .. })
        ));
    }

    #[test]
    fn test_events_are_written_in_send_order() {
        let (transport, serial) = fixture();

        let pending: Vec<_> = ["Anorganik", "Organik", "B3"]
            .iter()
            .map(|c| transport.send(&event(c)))
            .collect();
        for p in pending {
            assert!(p.recv().unwrap().is_ok());
        }

        assert_eq!(
            serial.written(),
            vec![b"B\n".to_vec(), b"A\n".to_vec(), b"C\n".to_vec()]
        );
    }
}
