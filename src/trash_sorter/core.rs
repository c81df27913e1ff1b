use crate::config::Config;
use crate::debouncer::core::{Debouncer, SettleEvent, Signal};
use crate::image_classifier::interface::ClassificationFrame;
use crate::transport::interface::Delivery;
use std::time::Instant;

//
// Model
//

#[derive(Clone, Debug, PartialEq)]
pub struct Model {
    pub source: ModelSource,
    pub debouncer: Debouncer,
    /// Last classifier failure, kept until a frame comes through again.
    pub camera_error: Option<String>,
}

/// Only one frame is classified at a time; ticks that land while a frame is in
/// flight are dropped.
#[derive(Clone, Debug, PartialEq, Eq, Default)]
pub enum ModelSource {
    #[default]
    Idle,
    Classifying,
}

impl Model {
    pub fn new(config: &Config) -> Self {
        Self {
            source: ModelSource::Idle,
            debouncer: Debouncer::new(&config.class_names),
            camera_error: None,
        }
    }
}

//
// Msg
//

#[derive(Debug)]
pub enum Msg {
    Tick(Instant),
    FrameClassifyDone {
        result: Result<ClassificationFrame, Box<dyn std::error::Error + Send + Sync>>,
        at: Instant,
    },
    SettleSendDone {
        event: SettleEvent,
        delivery: Delivery,
    },
}

//
// Effect
//

#[derive(Clone, Debug, PartialEq)]
pub enum Effect {
    SubscribeTick,
    ClassifyFrame,
    SendSettle(SettleEvent),
    Render(Notification),
}

/// Display side effects. These are applied on the loop thread, in order.
#[derive(Clone, Debug, PartialEq)]
pub enum Notification {
    Probabilities(ClassificationFrame),
    CountdownStart { class_name: String, seconds: u64 },
    CountdownUpdate { class_name: String, seconds_remaining: u64 },
    CountdownClear { class_name: String },
    Settled(SettleEvent),
    Status(String),
}

//
// Init
//

pub fn init(config: &Config) -> (Model, Vec<Effect>) {
    (Model::new(config), vec![Effect::SubscribeTick])
}

//
// Transition
//

pub fn transition(config: &Config, model: Model, msg: Msg) -> (Model, Vec<Effect>) {
    match msg {
        Msg::Tick(_) => transition_tick(model),

        Msg::FrameClassifyDone { result: Ok(frame), at } => {
            transition_frame(config, model, frame, at)
        }

        Msg::FrameClassifyDone { result: Err(e), .. } => {
            let reason = e.to_string();
            let effects = if model.camera_error.as_deref() == Some(reason.as_str()) {
                vec![]
            } else {
                vec![Effect::Render(Notification::Status(format!(
                    "Camera unavailable: {}",
                    reason
                )))]
            };
            (
                Model {
                    source: ModelSource::Idle,
                    camera_error: Some(reason),
                    ..model
                },
                effects,
            )
        }

        Msg::SettleSendDone { event, delivery } => {
            let status = match delivery {
                Ok(_) => format!("{} sent to sorter", event.class_name),
                Err(e) => format!("Failed to send {}: {}", event.class_name, e),
            };
            (model, vec![Effect::Render(Notification::Status(status))])
        }
    }
}

fn transition_tick(model: Model) -> (Model, Vec<Effect>) {
    match model.source {
        ModelSource::Classifying => (model, vec![]),
        ModelSource::Idle => (
            Model {
                source: ModelSource::Classifying,
                ..model
            },
            vec![Effect::ClassifyFrame],
        ),
    }
}

fn transition_frame(
    config: &Config,
    model: Model,
    frame: ClassificationFrame,
    at: Instant,
) -> (Model, Vec<Effect>) {
    let mut effects = vec![];

    if model.camera_error.is_some() {
        effects.push(Effect::Render(Notification::Status(
            "Camera back online".to_string(),
        )));
    }

    let mut debouncer = model.debouncer;
    let signals = debouncer.process(&config.thresholds, &frame, at);

    effects.push(Effect::Render(Notification::Probabilities(frame)));
    effects.extend(signals.into_iter().flat_map(to_effects));

    (
        Model {
            source: ModelSource::Idle,
            debouncer,
            camera_error: None,
        },
        effects,
    )
}

fn to_effects(signal: Signal) -> Vec<Effect> {
    match signal {
        Signal::CountdownStart {
            class_name,
            seconds,
        } => vec![Effect::Render(Notification::CountdownStart {
            class_name,
            seconds,
        })],
        Signal::CountdownUpdate {
            class_name,
            seconds_remaining,
        } => vec![Effect::Render(Notification::CountdownUpdate {
            class_name,
            seconds_remaining,
        })],
        Signal::CountdownClear { class_name } => {
            vec![Effect::Render(Notification::CountdownClear { class_name })]
        }
        Signal::Settle(event) => vec![
            Effect::Render(Notification::Settled(event.clone())),
            Effect::SendSettle(event),
        ],
    }
}
