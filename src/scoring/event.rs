use anyhow::{Result, bail, ensure};

use crate::hits::HitRegistry;

/// Binds a [`HitRegistry`]'s lifetime to one simulated event.
///
/// Per event the scope moves through a strictly linear lifecycle: no
/// registry, then a live registry installed by [`EventScope::begin_event`],
/// then discarded by [`EventScope::end_event`]. A new event re-enters the
/// live state via a fresh `begin_event`. Scopes are exclusively owned by
/// their event-processing context and require no locking.
#[derive(Debug, Default)]
pub struct EventScope {
    registry: Option<HitRegistry>,
    events_begun: u64,
}

impl EventScope {
    pub fn new() -> Self {
        Self::default()
    }

    /// Installs a fresh zeroed registry for the next event.
    ///
    /// Calling this while a previous registry is still live is a lifecycle
    /// error (a missing `end_event`), not a recoverable condition.
    pub fn begin_event(&mut self, num_cells: usize) -> Result<()> {
        ensure!(
            self.registry.is_none(),
            "begin_event called while a hit registry is still live (event {} not ended)",
            self.events_begun,
        );
        self.registry = Some(HitRegistry::new(num_cells));
        self.events_begun += 1;
        log::debug!("event scope: registry live for event {}", self.events_begun);
        Ok(())
    }

    /// Discards the current registry, handing it back for optional audit.
    ///
    /// Unflushed accumulators are lost once the returned registry drops;
    /// only rows already appended to the output dataset persist. Returns
    /// `None` when no event was active.
    pub fn end_event(&mut self) -> Option<HitRegistry> {
        self.registry.take()
    }

    /// True while a registry is live and steps may be processed.
    pub fn is_active(&self) -> bool {
        self.registry.is_some()
    }

    /// Number of events begun over this scope's lifetime.
    pub fn events_begun(&self) -> u64 {
        self.events_begun
    }

    /// Read access to the live registry, if any.
    pub fn registry(&self) -> Option<&HitRegistry> {
        self.registry.as_ref()
    }

    /// The live registry; fatal when no event is active.
    pub fn registry_mut(&mut self) -> Result<&mut HitRegistry> {
        match self.registry.as_mut() {
            Some(registry) => Ok(registry),
            None => bail!("no hit registry is live (step delivered outside begin_event/end_event)"),
        }
    }
}
