#[derive(Debug, Clone, PartialEq)]
pub struct Classification {
    pub class_name: String,
    pub probability: f32,
}

impl Classification {
    pub fn new(class_name: &str, probability: f32) -> Self {
        Self {
            class_name: class_name.to_string(),
            probability,
        }
    }
}

/// One sampling tick of model output, one entry per known class (BLANK included)
/// in the model's fixed class order.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct ClassificationFrame {
    pub entries: Vec<Classification>,
}

impl ClassificationFrame {
    pub fn new(entries: Vec<Classification>) -> Self {
        Self { entries }
    }

    pub fn probability_of(&self, class_name: &str) -> Option<f32> {
        self.entries
            .iter()
            .find(|c| c.class_name == class_name)
            .map(|c| c.probability)
    }
}

pub trait ImageClassifier {
    fn classify(&self) -> Result<ClassificationFrame, Box<dyn std::error::Error + Send + Sync>>;
}
