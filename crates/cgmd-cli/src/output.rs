use cgmd::engine::simulation::SimulationState;
use std::fs::File;
use std::io::{self, BufWriter, Write};
use std::path::Path;

/// Streams simulation frames to an XYZ trajectory file.
///
/// Every frame holds one line per particle in declaration order, so external
/// viewers can track particles across frames by line position.
pub struct XyzWriter {
    writer: BufWriter<File>,
}

impl XyzWriter {
    pub fn create(path: &Path) -> io::Result<Self> {
        Ok(Self {
            writer: BufWriter::new(File::create(path)?),
        })
    }

    pub fn write_frame(&mut self, step: u64, state: &SimulationState) -> io::Result<()> {
        writeln!(self.writer, "{}", state.system().len())?;
        writeln!(self.writer, "step={step}")?;
        for (_, particle) in state.system().particles_iter() {
            writeln!(
                self.writer,
                "X {:.6} {:.6} {:.6}",
                particle.position.x, particle.position.y, particle.position.z
            )?;
        }
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

/// Streams per-sample energies to a CSV file.
pub struct EnergyWriter {
    writer: csv::Writer<File>,
}

impl EnergyWriter {
    pub fn create(path: &Path) -> Result<Self, csv::Error> {
        let mut writer = csv::Writer::from_path(path)?;
        writer.write_record([
            "step",
            "time",
            "kinetic",
            "potential",
            "total",
            "temperature",
        ])?;
        Ok(Self { writer })
    }

    pub fn write_sample(&mut self, step: u64, state: &SimulationState) -> crate::error::Result<()> {
        let kinetic = state.kinetic_energy();
        let potential = state.potential_energy()?;
        let time = step as f64 * state.delta_t();
        self.writer.write_record([
            step.to_string(),
            format!("{time:.6}"),
            format!("{kinetic:.8}"),
            format!("{potential:.8}"),
            format!("{:.8}", kinetic + potential),
            format!("{:.4}", state.instantaneous_temperature()),
        ])?;
        Ok(())
    }

    pub fn flush(&mut self) -> io::Result<()> {
        self.writer.flush()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use cgmd::config::{InputConfig, build_simulation};
    use tempfile::tempdir;

    fn test_state() -> SimulationState {
        let toml = r#"
[simulator]
seed = 1
timescale = 1.0

[simulator.integrator]
type = "UnderdampedLangevin"
gammas = [ { index = 0, gamma = 0.1 }, { index = 1, gamma = 0.1 } ]

[[systems]]
[systems.attributes]
temperature = 100.0

[[systems.particles]]
m = 1.0
pos = [0.0, 0.0, 0.0]
vel = [0.0, 0.0, 0.0]

[[systems.particles]]
m = 1.0
pos = [1.5, 0.0, 0.0]
vel = [0.0, 0.0, 0.0]

[[forcefields]]
[[forcefields.local]]
interaction = "BondLength"
potential = "Harmonic"
parameters = [ { indices = [0, 1], v0 = 1.0, k = 10.0 } ]
"#;
        build_simulation(&InputConfig::from_toml_str(toml).unwrap()).unwrap()
    }

    #[test]
    fn xyz_writer_emits_one_block_per_frame() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("traj.xyz");
        let state = test_state();

        let mut writer = XyzWriter::create(&path).unwrap();
        writer.write_frame(0, &state).unwrap();
        writer.write_frame(100, &state).unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines.len(), 8);
        assert_eq!(lines[0], "2");
        assert_eq!(lines[1], "step=0");
        assert!(lines[2].starts_with("X 0.000000"));
        assert_eq!(lines[4], "2");
        assert_eq!(lines[5], "step=100");
    }

    #[test]
    fn energy_writer_emits_header_and_samples() {
        let dir = tempdir().unwrap();
        let path = dir.path().join("energy.csv");
        let state = test_state();

        let mut writer = EnergyWriter::create(&path).unwrap();
        writer.write_sample(0, &state).unwrap();
        writer.flush().unwrap();

        let content = std::fs::read_to_string(&path).unwrap();
        let lines: Vec<_> = content.lines().collect();
        assert_eq!(lines[0], "step,time,kinetic,potential,total,temperature");
        // Bond stretched by 0.5 with k_scaled = 10: potential 1.25, kinetic 0.
        let fields: Vec<_> = lines[1].split(',').collect();
        assert_eq!(fields[0], "0");
        assert_eq!(fields[2], "0.00000000");
        assert_eq!(fields[3], "1.25000000");
    }
}
