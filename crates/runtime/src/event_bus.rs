use serde::Serialize;

use crate::frame::Frame;

/// An event stamped with the frame it was raised in.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Event<E> {
    pub frame_index: u64,
    pub kind: E,
}

/// Single-owner queue of outgoing events.
///
/// Producers push during event handling or frame advance; the host drains the
/// queue between frames.
#[derive(Debug)]
pub struct EventBus<E> {
    events: Vec<Event<E>>,
}

impl<E> Default for EventBus<E> {
    fn default() -> Self {
        Self { events: Vec::new() }
    }
}

impl<E> EventBus<E> {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn emit(&mut self, frame: Frame, kind: E) {
        self.events.push(Event {
            frame_index: frame.index,
            kind,
        });
    }

    pub fn events(&self) -> &[Event<E>] {
        &self.events
    }

    pub fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    pub fn drain(&mut self) -> Vec<Event<E>> {
        std::mem::take(&mut self.events)
    }
}

#[cfg(test)]
mod tests {
    use super::EventBus;
    use crate::frame::Frame;

    #[test]
    fn records_events_with_frame_index() {
        let mut bus = EventBus::new();
        let f = Frame::first().next(0.016).next(0.016);
        bus.emit(f, "hello");
        assert_eq!(bus.events().len(), 1);
        assert_eq!(bus.events()[0].frame_index, 2);
        assert_eq!(bus.events()[0].kind, "hello");
    }

    #[test]
    fn drain_clears_events_in_order() {
        let mut bus = EventBus::new();
        bus.emit(Frame::first(), 1);
        bus.emit(Frame::first(), 2);
        let drained: Vec<i32> = bus.drain().into_iter().map(|e| e.kind).collect();
        assert_eq!(drained, vec![1, 2]);
        assert!(bus.is_empty());
    }
}
