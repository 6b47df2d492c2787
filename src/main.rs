use std::sync::Arc;

use anyhow::Result;
use rand::Rng;
use rayon::prelude::*;

use photoscore::{
    DetectionSink, DetectionTable, OPTICAL_PHOTON, ScorerConfig, ScorerStats, StepScorer,
    TrackAction, TransportStep,
};

const NUM_EVENTS: u64 = 8;
const STEPS_PER_EVENT: usize = 200;
const NUM_CELLS: usize = 4;

/// Track handle counting the terminations issued by the scorer.
#[derive(Default)]
struct CountingTrack {
    terminated: u64,
}

impl TrackAction for CountingTrack {
    fn terminate(&mut self, _step: &TransportStep) {
        self.terminated += 1;
    }
}

fn main() -> Result<()> {
    env_logger::init();

    let table = Arc::new(DetectionTable::new());

    // One scorer per event, each on its own worker; the table is the only
    // shared state.
    let results: Vec<(ScorerStats, u64)> = (0..NUM_EVENTS)
        .into_par_iter()
        .map(|event_id| score_event(event_id, Arc::clone(&table)))
        .collect::<Result<_>>()?;

    let mut stats = ScorerStats::default();
    let mut terminated = 0;
    for (event_stats, event_terminated) in &results {
        stats.merge(event_stats);
        terminated += event_terminated;
    }

    println!("events processed:  {NUM_EVENTS}");
    println!("steps delivered:   {}", stats.steps_seen);
    println!("steps skipped:     {}", stats.steps_skipped);
    println!("passed through:    {}", stats.passed_through);
    println!("photons accepted:  {}", stats.accepted);
    println!("photons rejected:  {}", stats.rejected);
    println!("tracks terminated: {terminated}");
    println!("dataset rows:      {}", table.detection_count());

    for row in table.rows().iter().take(5) {
        println!(
            "  event {}  {:.2} nm  t = {:.3}",
            row.event_id, row.wavelength_nm, row.arrival_time
        );
    }
    Ok(())
}

/// Plays the role of the transport engine for one event: generates a toy
/// population of steps touching the sensitive cells and feeds them through
/// the scorer.
fn score_event(event_id: u64, table: Arc<DetectionTable>) -> Result<(ScorerStats, u64)> {
    let mut scorer = StepScorer::new("demo", ScorerConfig::new(NUM_CELLS), table);
    let mut track = CountingTrack::default();
    let mut rng = rand::thread_rng();

    scorer.on_event_start()?;
    for i in 0..STEPS_PER_EVENT {
        let global_time = i as f64 * 0.05;
        let cell_index = rng.gen_range(0..NUM_CELLS);

        let step = if rng.r#gen::<f64>() < 0.9 {
            // Optical photon at its absorption step. Energies span the
            // acceptance threshold (roughly 210 to 830 nm).
            let kinetic_energy = 1.5e-6 + rng.r#gen::<f64>() * 4.5e-6;
            TransportStep {
                event_id,
                species_code: OPTICAL_PHOTON,
                kinetic_energy,
                deposited_energy: kinetic_energy,
                path_length: 0.0,
                global_time,
                cell_index,
            }
        } else {
            // Charged secondary crossing a cell.
            TransportStep {
                event_id,
                species_code: 11,
                kinetic_energy: 0.5,
                deposited_energy: 2.0e-4,
                path_length: 0.8,
                global_time,
                cell_index,
            }
        };
        scorer.process(&step, &mut track)?;
    }
    scorer.on_event_end();

    Ok((scorer.stats(), track.terminated))
}
