use crate::device_serial::interface::{DeviceSerial, DeviceSerialEvent};
use crate::library::logger::interface::Logger;
use std::sync::atomic::{AtomicBool, Ordering};
use std::sync::{Arc, Mutex};

/// Stands in for the microcontroller. Records every write and can be told to
/// behave like an unplugged port.
pub struct DeviceSerialFake {
    open: AtomicBool,
    fail_writes: AtomicBool,
    written: Mutex<Vec<Vec<u8>>>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl DeviceSerialFake {
    pub fn new(logger: Arc<dyn Logger + Send + Sync>) -> Self {
        Self {
            open: AtomicBool::new(false),
            fail_writes: AtomicBool::new(false),
            written: Mutex::new(vec![]),
            logger: logger.with_namespace("serial").with_namespace("fake"),
        }
    }

    #[allow(dead_code)]
    pub fn set_fail_writes(&self, fail: bool) {
        self.fail_writes.store(fail, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn close(&self) {
        self.open.store(false, Ordering::SeqCst);
    }

    #[allow(dead_code)]
    pub fn written(&self) -> Vec<Vec<u8>> {
        self.written.lock().map(|w| w.clone()).unwrap_or_default()
    }
}

impl DeviceSerial for DeviceSerialFake {
    fn open(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        self.open.store(true, Ordering::SeqCst);
        self.logger.info("Serial port open")?;
        Ok(())
    }

    fn is_open(&self) -> bool {
        self.open.load(Ordering::SeqCst)
    }

    fn write(&self, bytes: &[u8]) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        if !self.is_open() {
            return Err("port is not open".into());
        }
        if self.fail_writes.load(Ordering::SeqCst) {
            return Err("device disconnected".into());
        }

        self.written
            .lock()
            .map_err(|_| "serial buffer lock poisoned")?
            .push(bytes.to_vec());

        self.logger.info(&format!(
            "Wrote {:?}",
            String::from_utf8_lossy(bytes).trim_end()
        ))?;
        Ok(())
    }

    fn events(&self) -> std::sync::mpsc::Receiver<DeviceSerialEvent> {
        let (tx, rx) = std::sync::mpsc::channel();
        let opened = self.is_open();

        std::thread::spawn(move || {
            if opened {
                let _ = tx.send(DeviceSerialEvent::Opened);
            }
        });

        rx
    }
}
