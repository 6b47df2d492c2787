use std::sync::Arc;

use anyhow::Result;

use crate::dataset::{DetectionRow, DetectionSink};
use crate::engine::TrackAction;
use crate::hits::HitRegistry;
use crate::step::TransportStep;

use super::config::ScorerConfig;
use super::event::EventScope;

/// Per-instance step counters, mergeable across event workers.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct ScorerStats {
    /// Steps delivered to `process`.
    pub steps_seen: u64,
    /// Steps skipped by the zero-deposit/zero-path filter.
    pub steps_skipped: u64,
    /// Non-photon steps passed through untouched.
    pub passed_through: u64,
    /// Photons accepted into the output dataset.
    pub accepted: u64,
    /// Photons rejected and their trajectories terminated.
    pub rejected: u64,
}

impl ScorerStats {
    /// Folds another instance's counters into this one.
    pub fn merge(&mut self, other: &ScorerStats) {
        self.steps_seen += other.steps_seen;
        self.steps_skipped += other.steps_skipped;
        self.passed_through += other.passed_through;
        self.accepted += other.accepted;
        self.rejected += other.rejected;
    }
}

/// The per-step hit-scoring pipeline for one sensitive volume.
///
/// One scorer serves one event-processing context; events running on other
/// worker threads get their own instances. The engine calls
/// [`StepScorer::on_event_start`] before the first step of each event,
/// [`StepScorer::process`] once per step touching the sensitive volume, and
/// [`StepScorer::on_event_end`] afterwards. The injected [`DetectionSink`]
/// is the only state shared with other workers.
pub struct StepScorer {
    name: String,
    config: ScorerConfig,
    sink: Arc<dyn DetectionSink>,
    scope: EventScope,
    stats: ScorerStats,
}

impl StepScorer {
    pub fn new(name: impl Into<String>, config: ScorerConfig, sink: Arc<dyn DetectionSink>) -> Self {
        Self {
            name: name.into(),
            config,
            sink,
            scope: EventScope::new(),
            stats: ScorerStats::default(),
        }
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn config(&self) -> &ScorerConfig {
        &self.config
    }

    pub fn stats(&self) -> ScorerStats {
        self.stats
    }

    /// Read access to the live hit registry, if an event is active.
    pub fn registry(&self) -> Option<&HitRegistry> {
        self.scope.registry()
    }

    /// Installs a fresh hit registry for the next event.
    pub fn on_event_start(&mut self) -> Result<()> {
        self.scope.begin_event(self.config.num_cells)
    }

    /// Discards the current event's registry, returning it for audit.
    pub fn on_event_end(&mut self) -> Option<HitRegistry> {
        self.scope.end_event()
    }

    /// Scores one transport step.
    ///
    /// Returns whether the step contributed to scoring; the engine uses the
    /// value as a diagnostic/continuation flag only. Fatal configuration
    /// errors (no live event, cell index beyond the registry) abort the run.
    pub fn process(&mut self, step: &TransportStep, track: &mut dyn TrackAction) -> Result<bool> {
        self.stats.steps_seen += 1;

        // Nothing deposited and nothing traveled: skipped before any
        // registry access, so an invalid cell index is not observed here.
        if step.is_empty() {
            self.stats.steps_skipped += 1;
            return Ok(false);
        }

        // Bookkeeping into the step's cell and the total slot. The
        // accept/reject decision below never reads these accumulators.
        let registry = self.scope.registry_mut()?;
        let record = registry.record_at(step.cell_index)?;
        record.add(step.deposited_energy, step.path_length, step.event_id);
        registry
            .total_mut()
            .add(step.deposited_energy, step.path_length, step.event_id);

        // Only the reserved optical-photon code is of interest; everything
        // else passes through with its trajectory untouched.
        if step.species_code != self.config.photon_species {
            self.stats.passed_through += 1;
            return Ok(true);
        }

        let wavelength_nm = self.config.wavelength_nm(step.kinetic_energy);
        if !wavelength_nm.is_finite() {
            log::warn!(
                "scorer '{}': non-finite wavelength from kinetic energy {} in event {}",
                self.name,
                step.kinetic_energy,
                step.event_id,
            );
        }

        if wavelength_nm >= self.config.acceptance_threshold_nm {
            self.sink.append(DetectionRow {
                event_id: step.event_id,
                wavelength_nm,
                arrival_time: step.global_time,
            });
            self.stats.accepted += 1;
        } else {
            track.terminate(step);
            self.stats.rejected += 1;
        }
        Ok(true)
    }
}
