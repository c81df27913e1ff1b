use super::core::Notification;
use super::main::TrashSorter;

impl TrashSorter {
    pub fn render(&self, notification: &Notification) {
        let Ok(mut display) = self.device_display.lock() else {
            let _ = self.logger.error("Display lock poisoned");
            return;
        };

        let threshold = self.config.thresholds.threshold;

        let result = match notification {
            Notification::Probabilities(frame) => display.show_probabilities(frame, threshold),
            Notification::CountdownStart {
                class_name,
                seconds,
            } => display.countdown_start(class_name, *seconds),
            Notification::CountdownUpdate {
                class_name,
                seconds_remaining,
            } => display.countdown_update(class_name, *seconds_remaining),
            Notification::CountdownClear { class_name } => display.countdown_clear(class_name),
            Notification::Settled(event) => display.notify_settled(event),
            Notification::Status(message) => display.show_status(message),
        };

        if let Err(e) = result {
            let _ = self.logger.error(&format!("Display update failed: {}", e));
        }
    }
}
