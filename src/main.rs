use config::{Config, DisplayMode};
use device_display::impl_console::DeviceDisplayConsole;
use device_display::impl_gui::DeviceDisplayGui;
use device_serial::impl_fake::DeviceSerialFake;
use device_serial::impl_tty::{DeviceSerialTty, DeviceSerialTtyConfig};
use device_serial::interface::DeviceSerial;
use dispatcher::core::Dispatcher;
use image_classifier::impl_fake::ImageClassifierFake;
use library::logger::impl_console::LoggerConsole;
use library::logger::interface::Logger;
use server::predict::PredictServer;
use server::worker::spawn_serial_monitor;
use std::sync::{Arc, Mutex};
use trash_sorter::main::TrashSorter;
use transport::impl_in_process::SettleTransportInProcess;

mod config;
mod debouncer;
mod device_display;
mod device_serial;
mod dispatcher;
mod image_classifier;
mod library;
mod server;
mod trash_sorter;
mod transport;

fn main() -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
    let config = Config::from_env()?;

    let logger: Arc<dyn Logger + Send + Sync> =
        Arc::new(LoggerConsole::new(config.logger_timezone));

    let _ = logger.info(&format!(
        "Starting smart trash sorter: threshold {:.0}%, hold {:.1}s, classes {}",
        config.thresholds.threshold * 100.0,
        config.thresholds.hold_duration.as_secs_f64(),
        config.class_names.join(", ")
    ));

    let device_serial: Arc<dyn DeviceSerial + Send + Sync> = match &config.serial_port {
        Some(path) => {
            let _ = logger.info(&format!(
                "Using serial port {} at {} baud",
                path, config.serial_baud_rate
            ));
            Arc::new(DeviceSerialTty::new(
                DeviceSerialTtyConfig {
                    path: path.clone(),
                    baud_rate: config.serial_baud_rate,
                },
                logger.clone(),
            ))
        }
        None => {
            let _ = logger.info("SERIAL_PORT not set, using simulated serial port");
            Arc::new(DeviceSerialFake::new(logger.clone()))
        }
    };

    spawn_serial_monitor(device_serial.clone(), logger.clone());

    if let Err(e) = device_serial.open() {
        let _ = logger.error(&format!("Serial port unavailable: {}", e));
    }

    let dispatcher = Dispatcher::new(
        config.commands.clone(),
        device_serial.clone(),
        logger.clone(),
    );

    let server = PredictServer::new(dispatcher, logger.clone()).start();

    let transport = Arc::new(SettleTransportInProcess::new(server));

    let image_classifier = Arc::new(ImageClassifierFake::new(
        config.class_names.clone(),
        config.thresholds.blank_class.clone(),
        logger.clone(),
    ));

    match config.display_mode {
        DisplayMode::Console => {
            let trash_sorter = TrashSorter::new(
                config,
                logger,
                image_classifier,
                Arc::new(Mutex::new(DeviceDisplayConsole::new())),
                transport,
            );

            trash_sorter.run()
        }

        DisplayMode::Gui => {
            let window = DeviceDisplayGui::new();

            let trash_sorter = TrashSorter::new(
                config,
                logger.clone(),
                image_classifier,
                Arc::new(Mutex::new(window.handle())),
                transport,
            );

            std::thread::spawn(move || {
                if let Err(e) = trash_sorter.run() {
                    let _ = trash_sorter.logger.error(&format!("Sorter stopped: {}", e));
                }
            });

            window.run_window()
        }
    }
}
