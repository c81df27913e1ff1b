use crate::config::ThresholdConfig;
use crate::image_classifier::interface::{Classification, ClassificationFrame};
use serde::{Deserialize, Serialize};
use std::time::Instant;

/// A class that stayed the confident leader for the whole hold duration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SettleEvent {
    pub class_name: String,
    pub probability: f32,
}

#[derive(Debug, Clone, PartialEq, Eq, Default)]
pub struct ClassTracking {
    pub start_time: Option<Instant>,
    pub fired: bool,
}

impl ClassTracking {
    fn countdown_visible(&self) -> bool {
        self.start_time.is_some() && !self.fired
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum Signal {
    CountdownStart {
        class_name: String,
        seconds: u64,
    },
    CountdownUpdate {
        class_name: String,
        seconds_remaining: u64,
    },
    CountdownClear {
        class_name: String,
    },
    Settle(SettleEvent),
}

/// Per-class hold tracking. Only one class is ever in progress; a class fires
/// once per uninterrupted episode.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Debouncer {
    classes: Vec<(String, ClassTracking)>,
}

impl Debouncer {
    pub fn new(class_names: &[String]) -> Self {
        Self {
            classes: class_names
                .iter()
                .map(|name| (name.clone(), ClassTracking::default()))
                .collect(),
        }
    }

    pub fn tracking(&self, class_name: &str) -> Option<&ClassTracking> {
        self.classes
            .iter()
            .find(|(name, _)| name == class_name)
            .map(|(_, tracking)| tracking)
    }

    /// The class currently being held, if any.
    #[cfg(test)]
    pub fn tracked_class(&self) -> Option<&str> {
        self.classes
            .iter()
            .find(|(_, tracking)| tracking.start_time.is_some())
            .map(|(name, _)| name.as_str())
    }

    pub fn process(
        &mut self,
        config: &ThresholdConfig,
        frame: &ClassificationFrame,
        now: Instant,
    ) -> Vec<Signal> {
        let blank_probability = frame
            .probability_of(&config.blank_class)
            .unwrap_or(0.0);

        if blank_probability > config.threshold {
            return self.reset_all_except(None);
        }

        let leader = match self.leader(config, frame) {
            Some(leader) if leader.probability >= config.threshold => leader.clone(),
            _ => return self.reset_all_except(None),
        };

        let mut signals = vec![];

        if let Some(tracking) = self.tracking_mut(&leader.class_name) {
            match tracking.start_time {
                None => {
                    tracking.start_time = Some(now);
                    tracking.fired = false;
                    signals.push(Signal::CountdownStart {
                        class_name: leader.class_name.clone(),
                        seconds: ceil_seconds(config.hold_duration.as_secs_f64()),
                    });
                }
                Some(start_time) => {
                    let elapsed = now.saturating_duration_since(start_time);
                    if elapsed < config.hold_duration {
                        let remaining =
                            config.hold_duration.as_secs_f64() - elapsed.as_secs_f64();
                        signals.push(Signal::CountdownUpdate {
                            class_name: leader.class_name.clone(),
                            seconds_remaining: ceil_seconds(remaining),
                        });
                    } else if !tracking.fired {
                        tracking.fired = true;
                        signals.push(Signal::Settle(SettleEvent {
                            class_name: leader.class_name.clone(),
                            probability: leader.probability,
                        }));
                        signals.push(Signal::CountdownClear {
                            class_name: leader.class_name.clone(),
                        });
                    }
                }
            }
        }

        signals.extend(self.reset_all_except(Some(&leader.class_name)));

        signals
    }

    /// Highest non-BLANK known class; the earliest entry wins a tie.
    fn leader<'a>(
        &self,
        config: &ThresholdConfig,
        frame: &'a ClassificationFrame,
    ) -> Option<&'a Classification> {
        frame
            .entries
            .iter()
            .filter(|c| c.class_name != config.blank_class)
            .filter(|c| self.tracking(&c.class_name).is_some())
            .fold(None, |best: Option<&Classification>, c| match best {
                Some(b) if b.probability >= c.probability => Some(b),
                _ => Some(c),
            })
    }

    fn tracking_mut(&mut self, class_name: &str) -> Option<&mut ClassTracking> {
        self.classes
            .iter_mut()
            .find(|(name, _)| name == class_name)
            .map(|(_, tracking)| tracking)
    }

    fn reset_all_except(&mut self, keep: Option<&str>) -> Vec<Signal> {
        let mut signals = vec![];
        for (name, tracking) in self.classes.iter_mut() {
            if Some(name.as_str()) == keep {
                continue;
            }
            if tracking.countdown_visible() {
                signals.push(Signal::CountdownClear {
                    class_name: name.clone(),
                });
            }
            *tracking = ClassTracking::default();
        }
        signals
    }
}

fn ceil_seconds(seconds: f64) -> u64 {
    seconds.max(0.0).ceil() as u64
}
