use crate::config::Config;
use crate::device_display::interface::DeviceDisplay;
use crate::image_classifier::interface::ImageClassifier;
use crate::library::logger::interface::Logger;
use crate::trash_sorter::core::Msg;
use crate::transport::interface::SettleTransport;
use std::sync::mpsc::{channel, Receiver, Sender};
use std::sync::{Arc, Mutex};

#[derive(Clone)]
pub struct TrashSorter {
    pub config: Config,
    pub logger: Arc<dyn Logger + Send + Sync>,
    pub image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
    pub device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
    pub transport: Arc<dyn SettleTransport + Send + Sync>,
    pub msg_sender: Sender<Msg>,
    pub msg_receiver: Arc<Mutex<Receiver<Msg>>>,
}

impl TrashSorter {
    pub fn new(
        config: Config,
        logger: Arc<dyn Logger + Send + Sync>,
        image_classifier: Arc<dyn ImageClassifier + Send + Sync>,
        device_display: Arc<Mutex<dyn DeviceDisplay + Send + Sync>>,
        transport: Arc<dyn SettleTransport + Send + Sync>,
    ) -> Self {
        let (msg_sender, msg_receiver) = channel();

        Self {
            config,
            logger: logger.with_namespace("trash_sorter"),
            image_classifier,
            device_display,
            transport,
            msg_sender,
            msg_receiver: Arc::new(Mutex::new(msg_receiver)),
        }
    }

    pub fn send(&self, msg: Msg) {
        let _ = self.msg_sender.send(msg);
    }
}
