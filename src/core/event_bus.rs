//! Deferred event queue for decoupled component communication.
//!
//! Widgets and dialogs emit events; the main loop drains them with `poll()`
//! once per frame and applies the side effects (model mutation, enablement
//! recompute, selection updates). Everything runs on the UI thread; the
//! queue only exists to break borrow cycles between render and mutation.

use std::any::Any;
use std::sync::{Arc, Mutex};

use log::warn;

/// Maximum events in queue before oldest are evicted
const MAX_QUEUE_SIZE: usize = 1000;

/// Marker trait for events. Events must be Send + Sync + 'static.
pub trait Event: Any + Send + Sync + 'static {
    fn as_any(&self) -> &dyn Any;
    fn type_name(&self) -> &'static str;
}

// Blanket impl for all qualifying types
impl<T: Any + Send + Sync + 'static> Event for T {
    fn as_any(&self) -> &dyn Any {
        self
    }
    fn type_name(&self) -> &'static str {
        std::any::type_name::<T>()
    }
}

/// Boxed event for queue storage
pub type BoxedEvent = Box<dyn Event>;

/// Deferred event queue drained by the main loop.
#[derive(Clone, Default)]
pub struct EventBus {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl EventBus {
    pub fn new() -> Self {
        Self::default()
    }

    /// Queue an event for processing on the next `poll()`.
    pub fn emit<E: Event>(&self, event: E) {
        self.emit_boxed(Box::new(event));
    }

    /// Queue a boxed event (for dynamic dispatch).
    pub fn emit_boxed(&self, event: BoxedEvent) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!(
                "EventBus queue full ({} events), evicting oldest {}",
                queue.len(),
                evict_count
            );
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }

    /// Drain all queued events for batch processing in the main loop.
    pub fn poll(&self) -> Vec<BoxedEvent> {
        std::mem::take(&mut *self.queue.lock().unwrap_or_else(|e| e.into_inner()))
    }

    /// Get an emitter handle for passing to UI components.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            queue: Arc::clone(&self.queue),
        }
    }

    pub fn queue_len(&self) -> usize {
        self.queue.lock().unwrap_or_else(|e| e.into_inner()).len()
    }
}

/// Lightweight emitter handle for UI components.
///
/// Can be cloned and passed to widgets and models for emitting events.
#[derive(Clone)]
pub struct EventEmitter {
    queue: Arc<Mutex<Vec<BoxedEvent>>>,
}

impl std::fmt::Debug for EventEmitter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventEmitter")
            .field("queue_len", &self.queue.lock().map(|q| q.len()).unwrap_or(0))
            .finish()
    }
}

impl EventEmitter {
    pub fn emit<E: Event>(&self, event: E) {
        self.emit_boxed(Box::new(event));
    }

    pub fn emit_boxed(&self, event: BoxedEvent) {
        let mut queue = self.queue.lock().unwrap_or_else(|e| e.into_inner());
        if queue.len() >= MAX_QUEUE_SIZE {
            let evict_count = queue.len() / 2;
            warn!(
                "EventEmitter queue full ({} events), evicting oldest {}",
                queue.len(),
                evict_count
            );
            queue.drain(0..evict_count);
        }
        queue.push(event);
    }
}

/// Model-side event emitter (wraps Option<EventEmitter>).
///
/// The editor model holds this to announce mutations without owning the bus;
/// a dummy emitter keeps the model usable before wiring and in tests.
#[derive(Clone, Default, Debug)]
pub struct ModelEventEmitter {
    inner: Option<EventEmitter>,
}

impl ModelEventEmitter {
    /// Create a no-op emitter (for initialization before the bus is ready)
    pub fn dummy() -> Self {
        Self { inner: None }
    }

    pub fn from_emitter(emitter: EventEmitter) -> Self {
        Self {
            inner: Some(emitter),
        }
    }

    /// Emit event (no-op if dummy)
    pub fn emit<E: Event>(&self, event: E) {
        if let Some(ref emitter) = self.inner {
            emitter.emit(event);
        }
    }
}

/// Helper: downcast BoxedEvent to concrete type
///
/// IMPORTANT: Must explicitly deref to `dyn Event` before calling `as_any()`.
/// Without explicit deref, the blanket impl `Event for Box<dyn Event>` intercepts
/// the call and returns `&dyn Any` containing `Box<dyn Event>` instead of the
/// original type, causing downcast to always fail.
#[inline]
pub fn downcast_event<E: Event>(event: &BoxedEvent) -> Option<&E> {
    (**event).as_any().downcast_ref::<E>()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEvent {
        value: i32,
    }

    #[derive(Clone, Debug)]
    struct OtherEvent {
        msg: String,
    }

    #[test]
    fn test_emit_queues_for_poll() {
        let bus = EventBus::new();

        bus.emit(TestEvent { value: 1 });
        bus.emit(TestEvent { value: 2 });
        bus.emit(OtherEvent { msg: "hello".into() });

        let events = bus.poll();
        assert_eq!(events.len(), 3);

        // Queue is empty after poll
        assert_eq!(bus.poll().len(), 0);
    }

    #[test]
    fn test_emitter_handle_shares_queue() {
        let bus = EventBus::new();
        let emitter = bus.emitter();
        emitter.emit(TestEvent { value: 42 });
        assert_eq!(bus.queue_len(), 1);

        let events = bus.poll();
        let e = downcast_event::<TestEvent>(&events[0]).unwrap();
        assert_eq!(e.value, 42);
    }

    #[test]
    fn test_model_emitter_dummy_is_silent() {
        let dummy = ModelEventEmitter::dummy();
        dummy.emit(TestEvent { value: 1 }); // must not panic

        let bus = EventBus::new();
        let emitter = ModelEventEmitter::from_emitter(bus.emitter());
        emitter.emit(TestEvent { value: 2 });
        assert_eq!(bus.queue_len(), 1);
    }

    #[test]
    fn test_downcast() {
        let bus = EventBus::new();
        bus.emit(TestEvent { value: 42 });

        for ev in bus.poll() {
            assert!(downcast_event::<OtherEvent>(&ev).is_none());
            let e = downcast_event::<TestEvent>(&ev).unwrap();
            assert_eq!(e.value, 42);
        }
    }

    #[test]
    fn test_queue_eviction() {
        let bus = EventBus::new();
        for i in 0..(MAX_QUEUE_SIZE + 10) {
            bus.emit(TestEvent { value: i as i32 });
        }
        assert!(bus.queue_len() <= MAX_QUEUE_SIZE / 2 + 11);
        // Oldest half was evicted; the newest event survives
        let events = bus.poll();
        let last = downcast_event::<TestEvent>(events.last().unwrap()).unwrap();
        assert_eq!(last.value, (MAX_QUEUE_SIZE + 9) as i32);
    }
}
