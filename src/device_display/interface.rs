use crate::debouncer::core::SettleEvent;
use crate::image_classifier::interface::ClassificationFrame;
use std::error::Error;

/// Operator-facing feedback. Nothing here affects sorting decisions.
pub trait DeviceDisplay: Send + Sync {
    /// Per-class confidence bars; classes at or above `threshold` are highlighted.
    fn show_probabilities(
        &mut self,
        frame: &ClassificationFrame,
        threshold: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn countdown_start(
        &mut self,
        class_name: &str,
        seconds: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn countdown_update(
        &mut self,
        class_name: &str,
        seconds_remaining: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn countdown_clear(&mut self, class_name: &str) -> Result<(), Box<dyn Error + Send + Sync>>;

    fn notify_settled(&mut self, event: &SettleEvent) -> Result<(), Box<dyn Error + Send + Sync>>;

    /// Free-form status line, e.g. camera or delivery problems.
    fn show_status(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>>;
}
