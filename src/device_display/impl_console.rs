use crate::debouncer::core::SettleEvent;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::ClassificationFrame;
use std::collections::HashMap;
use std::error::Error;

const BAR_WIDTH: usize = 20;

/// Prints to stdout. Frames arrive many times a second, so bars are only
/// redrawn when the set of classes above threshold changes.
#[derive(Default)]
pub struct DeviceDisplayConsole {
    active: Vec<String>,
    countdowns: HashMap<String, u64>,
}

impl DeviceDisplayConsole {
    pub fn new() -> Self {
        Self::default()
    }

    fn render_bars(&self, frame: &ClassificationFrame, threshold: f32) {
        println!("┌──────────────────────────────────────────┐");
        for entry in &frame.entries {
            let filled = ((entry.probability.clamp(0.0, 1.0) * BAR_WIDTH as f32).round()
                as usize)
                .min(BAR_WIDTH);
            let marker = if entry.probability >= threshold { '*' } else { ' ' };
            println!(
                "│{} {:<10} {}{} {:>5.1}% │",
                marker,
                entry.class_name,
                "█".repeat(filled),
                "░".repeat(BAR_WIDTH - filled),
                entry.probability * 100.0
            );
        }
        println!("└──────────────────────────────────────────┘");
    }
}

impl DeviceDisplay for DeviceDisplayConsole {
    fn show_probabilities(
        &mut self,
        frame: &ClassificationFrame,
        threshold: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let active: Vec<String> = frame
            .entries
            .iter()
            .filter(|c| c.probability >= threshold)
            .map(|c| c.class_name.clone())
            .collect();

        if active != self.active {
            self.render_bars(frame, threshold);
            self.active = active;
        }
        Ok(())
    }

    fn countdown_start(
        &mut self,
        class_name: &str,
        seconds: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.countdowns.insert(class_name.to_string(), seconds);
        println!("⏱  {} detected, holding for {}s...", class_name, seconds);
        Ok(())
    }

    fn countdown_update(
        &mut self,
        class_name: &str,
        seconds_remaining: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        if self.countdowns.get(class_name) != Some(&seconds_remaining) {
            self.countdowns
                .insert(class_name.to_string(), seconds_remaining);
            println!("⏱  {} {}...", class_name, seconds_remaining);
        }
        Ok(())
    }

    fn countdown_clear(&mut self, class_name: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.countdowns.remove(class_name);
        Ok(())
    }

    fn notify_settled(&mut self, event: &SettleEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!(
            "✅ {} settled at {:.1}%, sending to sorter",
            event.class_name,
            event.probability * 100.0
        );
        Ok(())
    }

    fn show_status(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        println!("ℹ  {}", message);
        Ok(())
    }
}
