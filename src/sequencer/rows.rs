use crate::sequencer::ramp::DEFAULT_RESOLUTION_S;
pub const DEFAULT_CURRENT_A: f64 = 80.0;
pub const DEFAULT_POWER_W: f64 = 2000.0;
pub const OUTPUT_ON: &str = "ON";
pub const R_MODE_OFF: &str = "OFF";
/// One command record for the supply's sequencer table.
#[derive(Clone, Debug, PartialEq)]
pub struct Row {
    /// 1-based.
    pub step: usize,
    pub description: String,
    pub u_set: f64,
    pub i_set: f64,
    pub p_set: f64,
    pub output: &'static str,
    pub hour: u32,
    pub minute: u32,
    pub second: u32,
    pub millisecond: u32,
    pub r_mode: &'static str,
    pub r_set: u32,
}
/// Turns voltage setpoints into sequencer rows with fixed current/power.
#[derive(Clone, Copy, Debug)]
pub struct RowFormatter {
    pub current_a: f64,
    pub power_w: f64,
    pub resolution: f64,
}
impl Default for RowFormatter {
    fn default() -> Self {
        Self {
            current_a: DEFAULT_CURRENT_A,
            power_w: DEFAULT_POWER_W,
            resolution: DEFAULT_RESOLUTION_S,
        }
    }
}
impl RowFormatter {
    pub fn millisecond(&self) -> u32 {
        (self.resolution * 1000.0).round() as u32
    }
    pub fn format(&self, voltages: &[f64]) -> Vec<Row> {
        let millisecond = self.millisecond();
        voltages
            .iter()
            .enumerate()
            .map(|(i, &volt)| Row {
                step: i + 1,
                description: format!(
                    "Set PS U set= {volt:.3}V Iset= {:.3}A output/input= on",
                    self.current_a
                ),
                u_set: round_millis(volt),
                i_set: self.current_a,
                p_set: self.power_w,
                output: OUTPUT_ON,
                hour: 0,
                minute: 0,
                second: 0,
                millisecond,
                r_mode: R_MODE_OFF,
                r_set: 1,
            })
            .collect()
    }
}
/// Rounds to three decimals; `-0.0` comes back as `0.0`.
pub fn round_millis(value: f64) -> f64 {
    let rounded = (value * 1000.0).round() / 1000.0;
    if rounded == 0.0 {
        0.0
    } else {
        rounded
    }
}
