use crate::cli::CheckArgs;
use crate::error::Result;
use cgmd::config::{InputConfig, build_simulation};
use cgmd::engine::boundary::BoundaryManager;

pub fn run(args: CheckArgs) -> Result<()> {
    let config = InputConfig::load(&args.input)?;
    let state = build_simulation(&config)?;

    println!("{}: OK", args.input.display());
    println!("  particles:    {}", state.system().len());
    println!("  temperature:  {} K", state.constants().temperature);
    println!("  timescale:    {}", state.constants().timescale);
    println!("  delta_t:      {}", state.delta_t());
    for (name, count) in state.interaction_summary() {
        println!("  interaction:  {name} ({count} bindings)");
    }
    match state.boundary() {
        Some(BoundaryManager::Reflecting(bbox)) => {
            println!(
                "  boundary:     reflecting box {:?} .. {:?}",
                bbox.lower(),
                bbox.upper()
            );
        }
        Some(BoundaryManager::Periodic(bbox)) => {
            println!(
                "  boundary:     periodic box {:?} .. {:?}",
                bbox.lower(),
                bbox.upper()
            );
        }
        None => println!("  boundary:     unlimited"),
    }
    println!("  E_pot:        {:.6}", state.potential_energy()?);
    Ok(())
}
