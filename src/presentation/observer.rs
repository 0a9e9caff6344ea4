use super::TransitionEvent;
use std::sync::mpsc::Sender;
use tracing::trace;

/// Receives transition events. Fire-and-forget: there is no return channel.
pub trait TransitionObserver {
    fn on_transition(&mut self, event: &TransitionEvent);
}

impl<F> TransitionObserver for F
where
    F: FnMut(&TransitionEvent),
{
    fn on_transition(&mut self, event: &TransitionEvent) {
        self(event)
    }
}

/// Drops every event.
#[derive(Debug, Default, Clone, Copy)]
pub struct NoopObserver;

impl TransitionObserver for NoopObserver {
    fn on_transition(&mut self, _event: &TransitionEvent) {}
}

/// Forwards events to a renderer consuming them on its own schedule.
#[derive(Debug, Clone)]
pub struct ChannelObserver {
    sender: Sender<TransitionEvent>,
}

impl ChannelObserver {
    pub fn new(sender: Sender<TransitionEvent>) -> Self {
        Self { sender }
    }
}

impl TransitionObserver for ChannelObserver {
    fn on_transition(&mut self, event: &TransitionEvent) {
        // A renderer that went away must not affect navigation.
        if self.sender.send(event.clone()).is_err() {
            trace!("Transition receiver dropped");
        }
    }
}
