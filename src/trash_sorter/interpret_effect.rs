use super::core::{Effect, Msg};
use super::main::TrashSorter;
use crate::debouncer::core::SettleEvent;
use crate::transport::interface::TransportError;
use std::time::Instant;

impl TrashSorter {
    pub fn interpret_effect(&self, effect: Effect) {
        match effect {
            Effect::SubscribeTick => loop {
                std::thread::sleep(self.config.tick_rate);
                if self.msg_sender.send(Msg::Tick(Instant::now())).is_err() {
                    return;
                }
            },
            Effect::ClassifyFrame => {
                let result = self.image_classifier.classify();
                self.send(Msg::FrameClassifyDone {
                    result,
                    at: Instant::now(),
                });
            }
            Effect::SendSettle(event) => self.send_settle(event),
            Effect::Render(notification) => self.render(&notification),
        }
    }

    /// Queues the request right away so events leave in the order they
    /// settled, then waits for the reply off the loop thread.
    pub fn send_settle(&self, event: SettleEvent) {
        let _ = self.logger.info(&format!(
            "{} settled at {:.0}%, notifying dispatcher",
            event.class_name,
            event.probability * 100.0
        ));

        let pending = self.transport.send(&event);
        let msg_sender = self.msg_sender.clone();

        std::thread::spawn(move || {
            let delivery = pending.recv().unwrap_or(Err(TransportError::NoReply));
            let _ = msg_sender.send(Msg::SettleSendDone { event, delivery });
        });
    }
}
