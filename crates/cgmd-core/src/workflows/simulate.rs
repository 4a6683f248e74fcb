use crate::engine::error::EngineError;
use crate::engine::progress::{Progress, ProgressReporter};
use crate::engine::simulation::SimulationState;
use tracing::{info, instrument};

/// Summary of a completed run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RunSummary {
    pub steps_completed: u64,
    pub final_kinetic_energy: f64,
    pub final_potential_energy: f64,
    pub final_temperature: f64,
}

/// Advances the simulation by `steps` timesteps.
///
/// The observer is invoked with the untouched initial state (step 0), after
/// every `sample_interval`-th step, and after the final step; this is the seam
/// external trajectory writers and energy loggers hang off of. Observer errors
/// abort the run, as does any engine error raised by a step.
#[instrument(skip_all, name = "simulation_run")]
pub fn run<F, E>(
    state: &mut SimulationState,
    steps: u64,
    sample_interval: u64,
    reporter: &ProgressReporter,
    mut observer: F,
) -> Result<RunSummary, E>
where
    F: FnMut(u64, &SimulationState) -> Result<(), E>,
    E: From<EngineError>,
{
    let interval = sample_interval.max(1);
    info!(steps, interval, "starting simulation run");
    reporter.report(Progress::RunStart { total_steps: steps });

    observer(0, state)?;
    for step in 1..=steps {
        state.step()?;
        reporter.report(Progress::Advance { steps: 1 });
        if step % interval == 0 || step == steps {
            observer(step, state)?;
        }
    }

    reporter.report(Progress::RunFinish);
    let summary = RunSummary {
        steps_completed: steps,
        final_kinetic_energy: state.kinetic_energy(),
        final_potential_energy: state.potential_energy()?,
        final_temperature: state.instantaneous_temperature(),
    };
    info!(
        kinetic = summary.final_kinetic_energy,
        potential = summary.final_potential_energy,
        temperature = summary.final_temperature,
        "simulation run finished"
    );
    Ok(summary)
}
