//! Event bus: channel-backed dispatch to registered sinks.
//!
//! Producers call [`EventBus::emit`] from inside the step loop; events are
//! buffered in a `std::sync::mpsc` channel and handed to sinks on
//! [`EventBus::flush`], so no sink work happens mid-step.

use std::sync::mpsc;

use crate::events::SimulationEvent;
use crate::sinks::EventSink;

/// Buffered event dispatcher.
pub struct EventBus {
    sender: mpsc::Sender<SimulationEvent>,
    receiver: mpsc::Receiver<SimulationEvent>,
    sinks: Vec<Box<dyn EventSink>>,
    /// Disabled bus is a no-op.
    enabled: bool,
}

impl EventBus {
    pub fn new() -> Self {
        let (sender, receiver) = mpsc::channel();
        Self {
            sender,
            receiver,
            sinks: Vec::new(),
            enabled: true,
        }
    }

    pub fn add_sink(&mut self, sink: Box<dyn EventSink>) {
        self.sinks.push(sink);
    }

    /// Enables or disables the bus. A disabled bus drops events silently.
    pub fn set_enabled(&mut self, enabled: bool) {
        self.enabled = enabled;
    }

    pub fn is_enabled(&self) -> bool {
        self.enabled
    }

    /// Queues an event for the next flush.
    pub fn emit(&self, event: SimulationEvent) {
        if !self.enabled {
            return;
        }
        // The receiver lives in `self`, so sending cannot fail.
        let _ = self.sender.send(event);
    }

    /// A detachable producer handle feeding this bus.
    ///
    /// The handle keeps the enabled state the bus had when it was created.
    pub fn emitter(&self) -> EventEmitter {
        EventEmitter {
            sender: self.sender.clone(),
            enabled: self.enabled,
        }
    }

    /// Dispatches all queued events to every sink, in emission order.
    ///
    /// Returns the number of events dispatched.
    pub fn flush(&mut self) -> usize {
        let mut count = 0;
        while let Ok(event) = self.receiver.try_recv() {
            for sink in &mut self.sinks {
                sink.handle(&event);
            }
            count += 1;
        }
        count
    }

    /// Flushes pending events and finalizes every sink.
    pub fn finish(&mut self) {
        self.flush();
        for sink in &mut self.sinks {
            tracing::debug!(sink = sink.name(), "finalizing telemetry sink");
            sink.finalize();
        }
    }

    pub fn sink_count(&self) -> usize {
        self.sinks.len()
    }
}

/// Cloneable producer side of an [`EventBus`].
#[derive(Debug, Clone)]
pub struct EventEmitter {
    sender: mpsc::Sender<SimulationEvent>,
    enabled: bool,
}

impl EventEmitter {
    /// Queues an event on the owning bus. Events sent after the bus was
    /// dropped are discarded.
    pub fn emit(&self, event: SimulationEvent) {
        if self.enabled {
            let _ = self.sender.send(event);
        }
    }
}

impl Default for EventBus {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for EventBus {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("EventBus")
            .field("sinks", &self.sinks.iter().map(|s| s.name()).collect::<Vec<_>>())
            .field("enabled", &self.enabled)
            .finish()
    }
}
