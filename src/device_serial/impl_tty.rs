use crate::device_serial::interface::{DeviceSerial, DeviceSerialEvent};
use crate::library::logger::interface::Logger;
use std::fs::{File, OpenOptions};
use std::io::{BufRead, BufReader, Write};
use std::sync::{Arc, Mutex};
use std::time::Duration;

pub struct DeviceSerialTtyConfig {
    pub path: String,
    pub baud_rate: u32,
}

/// Serial device node (e.g. `/dev/ttyUSB0`) that was already configured with
/// `stty` or by the OS driver.
pub struct DeviceSerialTty {
    config: DeviceSerialTtyConfig,
    port: Arc<Mutex<Option<File>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceSerialTty {
    pub fn new(config: DeviceSerialTtyConfig, logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            logger: logger.with_namespace("serial").with_namespace(&config.path),
            config,
            port: Arc::new(Mutex::new(None)),
        }
    }
}

impl DeviceSerial for DeviceSerialTty {
    fn open(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let file = OpenOptions::new()
            .read(true)
            .write(true)
            .open(&self.config.path)
            .map_err(|e| format!("failed to open {}: {}", self.config.path, e))?;

        *self.port.lock().map_err(|_| "serial port lock poisoned")? = Some(file);

        self.logger.info(&format!(
            "Serial port open on {} (expecting {} baud)",
            self.config.path, self.config.baud_rate
        ))?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.port.lock().map(|p| p.is_some()).unwrap_or(false)
    }

    fn write(&self, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let mut port = self.port.lock().map_err(|_| "serial port lock poisoned")?;

        let file = port.as_mut().ok_or("port is not open")?;

        let written = file.write_all(bytes).and_then(|_| file.flush());
        if let Err(e) = written {
            *port = None;
            return Err(Box::new(e));
        }

        Ok(())
    }

    fn events(&self) -> std::sync::mpsc::Receiver<DeviceSerialEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let port = self.port.clone();
        let logger = self.logger.clone();

        std::thread::spawn(move || {
            let reader = loop {
                let reader = match port.lock() {
                    Ok(guard) => guard.as_ref().and_then(|file| file.try_clone().ok()),
                    Err(_) => return,
                };
                match reader {
                    Some(reader) => break reader,
                    None => std::thread::sleep(Duration::from_secs(1)),
                }
            };

            if tx.send(DeviceSerialEvent::Opened).is_err() {
                return;
            }

            for line in BufReader::new(reader).lines() {
                match line {
                    Ok(line) => {
                        let line = line.trim_end_matches('\r').to_string();
                        if tx.send(DeviceSerialEvent::Line(line)).is_err() {
                            return;
                        }
                    }
                    Err(e) => {
                        let _ = logger.error(&format!("Read failed: {}", e));
                        break;
                    }
                }
            }

            // Only the read side is done; writes keep using the port.
            let _ = tx.send(DeviceSerialEvent::Closed);
        });

        rx
    }
}
