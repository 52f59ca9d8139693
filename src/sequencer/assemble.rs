use crate::sequencer::error::SequenceError;
use crate::sequencer::ramp::{ramp_voltage, sample_count};
use crate::types::Step;
/// Voltage appended after the last pass so the supply ends switched down.
pub const SHUTDOWN_VOLTAGE: f64 = 0.0;
/// Ordered voltage setpoints, one per `resolution` seconds.
#[derive(Clone, Debug, PartialEq)]
pub struct Sequence {
    pub resolution: f64,
    pub voltages: Vec<f64>,
}
impl Sequence {
    pub fn len(&self) -> usize {
        self.voltages.len()
    }
    pub fn is_empty(&self) -> bool {
        self.voltages.is_empty()
    }
    pub fn duration_seconds(&self) -> f64 {
        self.voltages.len() as f64 * self.resolution
    }
    /// `[time_s, voltage]` pairs for plotting.
    pub fn points(&self) -> Vec<[f64; 2]> {
        self.voltages
            .iter()
            .enumerate()
            .map(|(i, v)| [i as f64 * self.resolution, *v])
            .collect()
    }
    pub fn peak_voltage(&self) -> f64 {
        self.voltages
            .iter()
            .copied()
            .fold(SHUTDOWN_VOLTAGE, f64::max)
    }
}
/// Concatenates sampled steps into a full sequence.
pub struct SequenceAssembler {
    resolution: f64,
    max_samples: usize,
}
impl SequenceAssembler {
    pub fn new(resolution: f64, max_samples: usize) -> Result<Self, SequenceError> {
        if !resolution.is_finite() || resolution <= 0.0 {
            return Err(SequenceError::InvalidResolution(resolution));
        }
        Ok(Self {
            resolution,
            max_samples,
        })
    }
    /// Length `assemble` would produce. Saturates instead of overflowing.
    pub fn expected_len(&self, steps: &[Step], repeat_count: u32) -> usize {
        let per_pass = steps
            .iter()
            .map(|s| sample_count(s.step_time, self.resolution))
            .fold(0usize, usize::saturating_add);
        per_pass
            .saturating_mul(repeat_count as usize + 1)
            .saturating_add(1)
    }
    /// Runs `repeat_count + 1` passes over `steps` and appends the shutdown sample.
    pub fn assemble(&self, steps: &[Step], repeat_count: u32) -> Result<Sequence, SequenceError> {
        let expected = self.expected_len(steps, repeat_count);
        if expected > self.max_samples {
            return Err(SequenceError::TooManySamples {
                requested: expected,
                limit: self.max_samples,
            });
        }
        // each step is sampled once and replayed per pass
        let pass: Vec<f64> = steps
            .iter()
            .flat_map(|s| {
                ramp_voltage(s.start_voltage, s.final_voltage, s.step_time, self.resolution)
            })
            .collect();
        let mut voltages = Vec::with_capacity(expected);
        for _ in 0..=repeat_count {
            voltages.extend_from_slice(&pass);
        }
        voltages.push(SHUTDOWN_VOLTAGE);
        log::debug!(
            "assembled {} samples from {} steps x {} passes",
            voltages.len(),
            steps.len(),
            repeat_count as usize + 1
        );
        Ok(Sequence {
            resolution: self.resolution,
            voltages,
        })
    }
}
