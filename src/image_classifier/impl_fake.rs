use crate::image_classifier::interface::{Classification, ClassificationFrame, ImageClassifier};
use crate::library::logger::interface::Logger;
use rand::Rng;
use std::sync::{Arc, Mutex};

/// Pretends to be a webcam pointed at the sorting tray. Items show up for a
/// few seconds, the model is noisy while they sit there, and the tray is empty
/// in between.
pub struct ImageClassifierFake {
    class_names: Vec<String>,
    blank_class: String,
    scene: Mutex<Scene>,
    logger: Arc<dyn Logger + Send + Sync>,
}

struct Scene {
    item: Option<usize>,
    frames_left: u32,
}

impl ImageClassifierFake {
    pub fn new(
        class_names: Vec<String>,
        blank_class: String,
        logger: Arc<dyn Logger + Send + Sync>,
    ) -> Self {
        Self {
            class_names,
            blank_class,
            scene: Mutex::new(Scene {
                item: None,
                frames_left: 0,
            }),
            logger: logger.with_namespace("image_classifier").with_namespace("fake"),
        }
    }

    fn next_scene(&self, rng: &mut impl Rng) -> Scene {
        if self.class_names.is_empty() || rng.random_bool(0.4) {
            Scene {
                item: None,
                frames_left: rng.random_range(10..40),
            }
        } else {
            Scene {
                item: Some(rng.random_range(0..self.class_names.len())),
                frames_left: rng.random_range(20..60),
            }
        }
    }
}

impl ImageClassifier for ImageClassifierFake {
    fn classify(&self) -> Result<ClassificationFrame, Box<dyn std::error::Error + Send + Sync>> {
        let mut rng = rand::rng();
        let mut scene = self
            .scene
            .lock()
            .map_err(|_| "fake classifier scene lock poisoned")?;

        if scene.frames_left == 0 {
            *scene = self.next_scene(&mut rng);
            match scene.item {
                Some(index) => self
                    .logger
                    .info(&format!("{} placed on the tray", self.class_names[index]))?,
                None => self.logger.info("Tray cleared")?,
            }
        }
        scene.frames_left -= 1;

        // Occasional flicker frames keep the debouncer honest.
        let flicker = rng.random_bool(0.05);

        let mut entries: Vec<Classification> = self
            .class_names
            .iter()
            .enumerate()
            .map(|(index, name)| {
                let probability = match scene.item {
                    Some(item) if item == index && !flicker => rng.random_range(0.86..0.99),
                    Some(item) if item == index => rng.random_range(0.5..0.8),
                    _ => rng.random_range(0.0..0.08),
                };
                Classification::new(name, probability)
            })
            .collect();

        let blank_probability = match scene.item {
            None => rng.random_range(0.9..1.0),
            Some(_) => rng.random_range(0.0..0.1),
        };
        entries.push(Classification::new(&self.blank_class, blank_probability));

        Ok(ClassificationFrame::new(entries))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::logger::impl_fake::LoggerFake;

    #[test]
    fn test_frames_cover_every_class_in_order() {
        let classifier = ImageClassifierFake::new(
            vec!["Organik".to_string(), "Anorganik".to_string(), "B3".to_string()],
            "BLANK".to_string(),
            Arc::new(LoggerFake::new()),
        );

        for _ in 0..200 {
            let frame = classifier.classify().unwrap();
            let names: Vec<&str> = frame.entries.iter().map(|c| c.class_name.as_str()).collect();
            assert_eq!(names, vec!["Organik", "Anorganik", "B3", "BLANK"]);
            assert!(frame
                .entries
                .iter()
                .all(|c| (0.0..=1.0).contains(&c.probability)));
        }
    }
}
