use crate::device_serial::interface::DeviceSerial;
use crate::dispatcher::command::{Command, CommandTable};
use crate::library::logger::interface::Logger;
use std::sync::Arc;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum DispatchError {
    #[error("unsupported class {0:?}")]
    UnsupportedClass(String),

    #[error("serial port is not open")]
    PortNotOpen,

    #[error("failed to write {command:?} to serial port: {source}")]
    Write {
        command: String,
        #[source]
        source: Box<dyn std::error::Error + Send + Sync>,
    },
}

/// Turns a settled class into one command write. Holds no tracking state.
#[derive(Clone)]
pub struct Dispatcher {
    commands: CommandTable,
    device_serial: Arc<dyn DeviceSerial + Send + Sync>,
    logger: Arc<dyn Logger + Send + Sync>,
}

impl Dispatcher {
    pub fn new(
        commands: CommandTable,
        device_serial: Arc<dyn DeviceSerial + Send + Sync>,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            commands,
            device_serial,
            logger: logger.with_namespace("dispatcher"),
        }
    }

    pub fn dispatch(&self, class_name: &str) -> Result<Command, DispatchError> {
        let result = self.write_command(class_name);

        match &result {
            Ok(command) => {
                let _ = self.logger.info(&format!(
                    "Sent {} ({}) signal to serial port",
                    class_name.to_uppercase(),
                    command.token
                ));
            }
            Err(e) => {
                let _ = self.logger.error(&format!("Dispatch failed: {}", e));
            }
        }

        result
    }

    fn write_command(&self, class_name: &str) -> Result<Command, DispatchError> {
        let (_, command) = self
            .commands
            .lookup(class_name)
            .ok_or_else(|| DispatchError::UnsupportedClass(class_name.to_string()))?;

        if !self.device_serial.is_open() {
            return Err(DispatchError::PortNotOpen);
        }

        self.device_serial
            .write(&command.to_bytes())
            .map_err(|source| DispatchError::Write {
                command: command.token.clone(),
                source,
            })?;

        Ok(command.clone())
    }
}
