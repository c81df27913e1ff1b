use crate::device_serial::interface::{DeviceSerial, DeviceSerialEvent};
use crate::library::logger::interface::Logger;
use crate::server::predict::{ApiResponse, PredictServer};
use std::sync::mpsc::{channel, Sender};
use std::sync::Arc;

pub struct ServerRequest {
    pub body: String,
    pub reply: Sender<ApiResponse>,
}

/// Requests are handled one at a time in arrival order, so serial writes never
/// interleave and go out in the order they were sent.
#[derive(Clone)]
pub struct ServerHandle {
    requests: Sender<ServerRequest>,
}

impl ServerHandle {
    pub fn submit(&self, request: ServerRequest) -> Result<(), ServerRequest> {
        self.requests.send(request).map_err(|e| e.0)
    }
}

impl PredictServer {
    pub fn start(self) -> ServerHandle {
        let (requests, inbox) = channel::<ServerRequest>();

        std::thread::spawn(move || {
            for request in inbox {
                let response = self.handle_predict(&request.body);
                let _ = request.reply.send(response);
            }
        });

        ServerHandle { requests }
    }
}

/// Echoes what the microcontroller prints back to the log.
pub fn spawn_serial_monitor(
    device_serial: Arc<dyn DeviceSerial + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
) {
    let logger = logger.with_namespace("serial");
    std::thread::spawn(move || {
        for event in device_serial.events() {
            let _ = match event {
                DeviceSerialEvent::Opened => logger.info("Port open"),
                DeviceSerialEvent::Line(line) => logger.info(&format!("<- {}", line)),
                DeviceSerialEvent::Closed => logger.error("No longer reading from port"),
            };
        }
    });
}
