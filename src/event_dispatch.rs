use crate::events::Event;

/// A Message sent by an Entity. Entities don't own one another, so anything which
/// has an effect beyond the sender (spawning an item, tallying a stomp) is routed
/// through the level as a Message.
#[derive(Debug, Clone, PartialEq)]
pub struct Message {
    /// The entity that sent this message.
    pub sender_entity_id: u32,

    /// The event payload describing whatever happened
    pub event: Event,
}

impl Message {
    fn new(sender: u32, event: Event) -> Self {
        Message {
            sender_entity_id: sender,
            event,
        }
    }
}

pub trait MessageHandler {
    fn handle_message(&mut self, message: &Message);
}

#[derive(Debug)]
pub struct Dispatcher {
    messages: Vec<Message>,
}

impl Default for Dispatcher {
    fn default() -> Self {
        Dispatcher { messages: vec![] }
    }
}

impl Dispatcher {
    pub fn entity_to_global(&mut self, sender: u32, event: Event) {
        self.messages.push(Message::new(sender, event));
    }

    pub fn is_empty(&self) -> bool {
        self.messages.is_empty()
    }

    pub fn dispatch(messages: &[Message], handler: &mut dyn MessageHandler) {
        for m in messages {
            handler.handle_message(m);
        }
    }

    /// Returns the current message buffer, and clears it.
    pub fn drain(&mut self) -> Vec<Message> {
        std::mem::take(&mut self.messages)
    }
}

#[cfg(test)]
mod dispatch_tests {
    use super::*;

    struct Counter {
        senders: Vec<u32>,
    }

    impl MessageHandler for Counter {
        fn handle_message(&mut self, message: &Message) {
            self.senders.push(message.sender_entity_id);
        }
    }

    #[test]
    fn drain_empties_queue_in_send_order() {
        let mut dispatcher = Dispatcher::default();
        dispatcher.entity_to_global(3, Event::EnemyActivated);
        dispatcher.entity_to_global(1, Event::EnemyStomped);
        assert!(!dispatcher.is_empty());

        let messages = dispatcher.drain();
        assert!(dispatcher.is_empty());

        let mut counter = Counter { senders: vec![] };
        Dispatcher::dispatch(&messages, &mut counter);
        assert_eq!(counter.senders, vec![3, 1]);
    }
}
