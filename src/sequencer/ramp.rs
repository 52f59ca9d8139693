use ndarray::Array1;
/// Default spacing between samples, in seconds.
pub const DEFAULT_RESOLUTION_S: f64 = 0.1;
/// Number of samples a ramp of `duration` seconds yields at `resolution`.
///
/// This is `floor(duration / resolution)`; a negative, NaN or infinite
/// quotient yields zero.
pub fn sample_count(duration: f64, resolution: f64) -> usize {
    let quotient = (duration / resolution).floor();
    if quotient.is_finite() && quotient > 0.0 {
        quotient as usize
    } else {
        0
    }
}
/// Linearly interpolates `start..=end` into `sample_count(duration, resolution)`
/// evenly spaced voltages.
///
/// Both endpoints are included when at least two samples are produced. A single
/// sample degenerates to `[start]`, and a duration shorter than `resolution`
/// yields an empty ramp.
pub fn ramp_voltage(start: f64, end: f64, duration: f64, resolution: f64) -> Vec<f64> {
    let count = sample_count(duration, resolution);
    let mut samples = Array1::linspace(start, end, count).to_vec();
    if count > 1 {
        // linspace accumulates `step * i`; pin the endpoint exactly
        if let Some(last) = samples.last_mut() {
            *last = end;
        }
    }
    samples
}
