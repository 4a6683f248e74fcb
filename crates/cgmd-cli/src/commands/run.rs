use crate::cli::RunArgs;
use crate::error::Result;
use crate::output::{EnergyWriter, XyzWriter};
use cgmd::config::{InputConfig, build_simulation};
use cgmd::engine::progress::{Progress, ProgressReporter};
use cgmd::workflows::simulate;
use indicatif::{ProgressBar, ProgressStyle};
use tracing::info;

pub fn run(args: RunArgs) -> Result<()> {
    let mut config = InputConfig::load(&args.input)?;
    if let Some(seed) = args.seed {
        config.simulator.seed = Some(seed);
    }
    let mut state = build_simulation(&config)?;
    info!(
        particles = state.system().len(),
        steps = args.steps,
        "simulation built from {}",
        args.input.display()
    );

    let mut trajectory = match &args.trajectory {
        Some(path) => Some(XyzWriter::create(path)?),
        None => None,
    };
    let mut energies = match &args.energies {
        Some(path) => Some(EnergyWriter::create(path)?),
        None => None,
    };

    let bar = ProgressBar::new(args.steps);
    bar.set_style(
        ProgressStyle::with_template(
            "{spinner:.green} [{elapsed_precise}] [{bar:40.cyan/blue}] {pos}/{len} steps ({eta})",
        )
        .unwrap_or_else(|_| ProgressStyle::default_bar()),
    );
    let reporter = ProgressReporter::with_callback(Box::new(|event| match event {
        Progress::RunStart { total_steps } => bar.set_length(total_steps),
        Progress::Advance { steps } => bar.inc(steps),
        Progress::RunFinish => bar.finish(),
        Progress::Message(message) => bar.println(message),
    }));

    let summary = simulate::run(
        &mut state,
        args.steps,
        args.sample_interval,
        &reporter,
        |step, state| -> Result<()> {
            if let Some(writer) = trajectory.as_mut() {
                writer.write_frame(step, state)?;
            }
            if let Some(writer) = energies.as_mut() {
                writer.write_sample(step, state)?;
            }
            Ok(())
        },
    )?;

    if let Some(writer) = trajectory.as_mut() {
        writer.flush()?;
    }
    if let Some(writer) = energies.as_mut() {
        writer.flush()?;
    }

    println!(
        "Completed {} steps: E_kin = {:.6}, E_pot = {:.6}, T = {:.2}",
        summary.steps_completed,
        summary.final_kinetic_energy,
        summary.final_potential_energy,
        summary.final_temperature,
    );
    Ok(())
}
