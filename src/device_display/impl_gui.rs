use crate::debouncer::core::SettleEvent;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::ClassificationFrame;
use egui::{Color32, RichText};
use std::collections::HashMap;
use std::error::Error;
use std::sync::{Arc, Mutex};
use std::time::{Duration, Instant};

const SETTLED_BANNER_TIME: Duration = Duration::from_secs(2);

#[derive(Default)]
struct GuiState {
    frame: ClassificationFrame,
    threshold: f32,
    countdowns: HashMap<String, u64>,
    settled: Option<(SettleEvent, Instant)>,
    status: Option<String>,
}

#[derive(Clone)]
struct SorterWindow {
    state: Arc<Mutex<GuiState>>,
}

impl eframe::App for SorterWindow {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        ctx.request_repaint_after(Duration::from_millis(50));

        let Ok(state) = self.state.lock() else {
            return;
        };

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Smart Trash Sorter");
            ui.separator();

            for entry in &state.frame.entries {
                let active = entry.probability >= state.threshold;
                ui.horizontal(|ui| {
                    let name = RichText::new(format!("{:<10}", entry.class_name)).monospace();
                    ui.label(if active { name.strong() } else { name });

                    ui.add(
                        egui::ProgressBar::new(entry.probability.clamp(0.0, 1.0))
                            .desired_width(260.0)
                            .text(format!("{:.1}%", entry.probability * 100.0)),
                    );

                    if let Some(seconds) = state.countdowns.get(&entry.class_name) {
                        ui.label(
                            RichText::new(seconds.to_string())
                                .size(22.0)
                                .color(Color32::from_rgb(230, 160, 0)),
                        );
                    }
                });
            }

            ui.separator();

            if let Some((event, at)) = &state.settled {
                if at.elapsed() < SETTLED_BANNER_TIME {
                    ui.label(
                        RichText::new(format!("{} sent to sorter", event.class_name))
                            .size(20.0)
                            .color(Color32::from_rgb(40, 170, 80)),
                    );
                }
            }

            if let Some(status) = &state.status {
                ui.label(RichText::new(status).color(Color32::GRAY));
            }
        });
    }
}

/// Desktop window showing confidence bars and countdowns. The window must run
/// on the main thread, see `run_window`.
#[derive(Default)]
pub struct DeviceDisplayGui {
    state: Arc<Mutex<GuiState>>,
}

impl DeviceDisplayGui {
    pub fn new() -> Self {
        Self::default()
    }

    /// Blocks until the window is closed.
    pub fn run_window(&self) -> Result<(), Box<dyn Error + Send + Sync>> {
        let options = eframe::NativeOptions {
            viewport: egui::ViewportBuilder::default()
                .with_inner_size([480.0, 260.0])
                .with_resizable(false),
            ..Default::default()
        };

        let window = SorterWindow {
            state: self.state.clone(),
        };

        eframe::run_native(
            "Smart Trash Sorter",
            options,
            Box::new(|_cc| Box::new(window)),
        )
        .map_err(|e| e.to_string().into())
    }

    /// A second handle onto the same window state.
    pub fn handle(&self) -> Self {
        Self {
            state: self.state.clone(),
        }
    }

    fn with_state(
        &self,
        f: impl FnOnce(&mut GuiState),
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        let mut state = self.state.lock().map_err(|_| "gui state lock poisoned")?;
        f(&mut state);
        Ok(())
    }
}

impl DeviceDisplay for DeviceDisplayGui {
    fn show_probabilities(
        &mut self,
        frame: &ClassificationFrame,
        threshold: f32,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_state(|state| {
            state.frame = frame.clone();
            state.threshold = threshold;
        })
    }

    fn countdown_start(
        &mut self,
        class_name: &str,
        seconds: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_state(|state| {
            state.countdowns.insert(class_name.to_string(), seconds);
        })
    }

    fn countdown_update(
        &mut self,
        class_name: &str,
        seconds_remaining: u64,
    ) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_state(|state| {
            state
                .countdowns
                .insert(class_name.to_string(), seconds_remaining);
        })
    }

    fn countdown_clear(&mut self, class_name: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_state(|state| {
            state.countdowns.remove(class_name);
        })
    }

    fn notify_settled(&mut self, event: &SettleEvent) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_state(|state| {
            state.settled = Some((event.clone(), Instant::now()));
        })
    }

    fn show_status(&mut self, message: &str) -> Result<(), Box<dyn Error + Send + Sync>> {
        self.with_state(|state| {
            state.status = Some(message.to_string());
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::image_classifier::interface::Classification;

    #[test]
    fn test_countdown_state_follows_notifications() {
        let mut display = DeviceDisplayGui::new();
        let observer = display.handle();

        display.countdown_start("Organik", 3).unwrap();
        display.countdown_update("Organik", 2).unwrap();
        assert_eq!(
            observer.state.lock().unwrap().countdowns.get("Organik"),
            Some(&2)
        );

        display.countdown_clear("Organik").unwrap();
        assert!(observer.state.lock().unwrap().countdowns.is_empty());

        display
            .show_probabilities(
                &ClassificationFrame::new(vec![Classification::new("B3", 0.4)]),
                0.85,
            )
            .unwrap();
        assert_eq!(observer.state.lock().unwrap().frame.entries.len(), 1);
    }
}
