//! Pluggable event sinks.

use std::sync::{Arc, Mutex};

use crate::events::{EventKind, SimulationEvent};

/// Consumer of flushed events.
pub trait EventSink: Send {
    /// Process a single event.
    fn handle(&mut self, event: &SimulationEvent);

    /// Called once when the run ends.
    fn finalize(&mut self) {}

    fn name(&self) -> &str;
}

/// Collects events into a shared `Vec`.
///
/// Clones share storage, so a clone kept outside the bus can inspect what
/// the boxed copy received.
#[derive(Debug, Clone, Default)]
pub struct VecSink {
    events: Arc<Mutex<Vec<SimulationEvent>>>,
}

impl VecSink {
    pub fn new() -> Self {
        Self::default()
    }

    /// Snapshot of the collected events.
    pub fn events(&self) -> Vec<SimulationEvent> {
        match self.events.lock() {
            Ok(events) => events.clone(),
            Err(poisoned) => poisoned.into_inner().clone(),
        }
    }

    pub fn len(&self) -> usize {
        self.events().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl EventSink for VecSink {
    fn handle(&mut self, event: &SimulationEvent) {
        match self.events.lock() {
            Ok(mut events) => events.push(event.clone()),
            Err(poisoned) => poisoned.into_inner().push(event.clone()),
        }
    }

    fn name(&self) -> &str {
        "vec_sink"
    }
}

/// Forwards events to `tracing`.
///
/// Aborted runs are always logged at `WARN`; everything else at the
/// configured level.
#[derive(Debug, Clone, Copy)]
pub struct TracingSink {
    level: tracing::Level,
}

impl TracingSink {
    pub fn new(level: tracing::Level) -> Self {
        Self { level }
    }

    pub fn level(&self) -> tracing::Level {
        self.level
    }
}

impl Default for TracingSink {
    fn default() -> Self {
        Self::new(tracing::Level::DEBUG)
    }
}

impl EventSink for TracingSink {
    fn handle(&mut self, event: &SimulationEvent) {
        if let EventKind::RunAborted { last_valid_step, reason } = &event.kind {
            tracing::warn!(step = event.step, last_valid_step = *last_valid_step, %reason, "simulation aborted");
            return;
        }
        let name = event.name();
        if self.level == tracing::Level::TRACE {
            tracing::trace!(step = event.step, event = ?event.kind, "{name}");
        } else if self.level == tracing::Level::DEBUG {
            tracing::debug!(step = event.step, event = ?event.kind, "{name}");
        } else {
            tracing::info!(step = event.step, event = ?event.kind, "{name}");
        }
    }

    fn name(&self) -> &str {
        "tracing_sink"
    }
}
