use crate::debouncer::core::SettleEvent;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::ClassificationFrame;
use std::error::Error;
use std::sync::{Arc, Mutex};

#[derive(Debug, Clone, PartialEq)]
pub enum DisplayCall {
    Probabilities(ClassificationFrame),
    CountdownStart(String, u64),
    CountdownUpdate(String, u64),
    CountdownClear(String),
    Settled(SettleEvent),
    Status(String),
}

#[derive(Clone, Default)]
pub struct DeviceDisplayFake {
    calls: Arc<Mutex<Vec<DisplayCall>>>,
}

impl DeviceDisplayFake {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn calls(&self) -> Vec<DisplayCall> {
        self.calls.lock().map(|c| c.clone()).unwrap_or_default()
    }

    fn record(&self, call: DisplayCall) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.calls
            .lock()
            .map_err(|_| "display call log poisoned")?
            .push(call);
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayFake {
    fn show_probabilities(
        &mut self,
        frame: &ClassificationFrame,
        _threshold: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::Probabilities(frame.clone()))
    }

    fn countdown_start(
        &mut self,
        class_name: &str,
        seconds: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::CountdownStart(class_name.to_string(), seconds))
    }

    fn countdown_update(
        &mut self,
        class_name: &str,
        seconds_remaining: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::CountdownUpdate(
            class_name.to_string(),
            seconds_remaining,
        ))
    }

    fn countdown_clear(&mut self, class_name: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::CountdownClear(class_name.to_string()))
    }

    fn notify_settled(&mut self, event: &SettleEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::Settled(event.clone()))
    }

    fn show_status(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.record(DisplayCall::Status(message.to_string()))
    }
}
