use super::core::{init, transition, Effect, Msg};
use super::main::TrashSorter;

impl TrashSorter {
    pub fn run(&self) -> Result<(), Box<dyn std::error::Error + Send + Sync>> {
        let (mut model, effects) = init(&self.config);

        self.execute_effects(effects);

        let receiver = self
            .msg_receiver
            .lock()
            .map_err(|_| "message receiver lock poisoned")?;

        for msg in receiver.iter() {
            self.log_msg(&msg);

            let (new_model, effects) = transition(&self.config, model, msg);
            model = new_model;

            self.execute_effects(effects);
        }

        Ok(())
    }

    /// Display effects run here, in order. Anything that can block runs on its
    /// own thread and reports back through a message.
    pub fn execute_effects(&self, effects: Vec<Effect>) {
        for effect in effects {
            match effect {
                Effect::Render(notification) => self.render(&notification),
                Effect::SendSettle(event) => self.send_settle(event),
                effect => {
                    let self_clone = self.clone();
                    std::thread::spawn(move || self_clone.interpret_effect(effect));
                }
            }
        }
    }

    fn log_msg(&self, msg: &Msg) {
        let _ = match msg {
            Msg::Tick(_) | Msg::FrameClassifyDone { result: Ok(_), .. } => Ok(()),
            Msg::FrameClassifyDone { result: Err(e), .. } => {
                self.logger.error(&format!("Classification failed: {}", e))
            }
            Msg::SettleSendDone {
                event,
                delivery: Ok(_),
            } => self
                .logger
                .info(&format!("{} delivered to dispatcher", event.class_name)),
            Msg::SettleSendDone {
                event,
                delivery: Err(e),
            } => self
                .logger
                .error(&format!("{} not delivered: {}", event.class_name, e)),
        };
    }
}
