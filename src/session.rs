// src/session.rs
use std::fs::File;
use std::io::{BufRead, BufReader, BufWriter, Write};
use std::path::Path;

use crate::config::SequencerConfig;
use crate::sequencer::export::decimal;
use crate::sequencer::{read_steps, write_steps, Row, Sequence, SequenceError};
use crate::types::Step;

/// Editor state owned by whoever drives the UI. The sequencer itself stays stateless.
#[derive(Clone, Debug)]
pub struct EditorSession {
    pub steps: Vec<Step>,
    /// Raw text from the repeat box; validated on every use.
    pub repeat_input: String,
}

impl Default for EditorSession {
    fn default() -> Self {
        Self::new()
    }
}

impl EditorSession {
    pub fn new() -> Self {
        Self {
            steps: Vec::new(),
            repeat_input: "0".to_owned(),
        }
    }

    pub fn add_step(&mut self) {
        self.steps.push(Step::default());
    }

    pub fn remove_step(&mut self, index: usize) {
        if index < self.steps.len() {
            self.steps.remove(index);
        }
    }

    pub fn step_title(&self, index: usize) -> String {
        match self.steps.get(index) {
            Some(s) => format!(
                "Step {}: {} V → {} V in {} sec",
                index + 1,
                decimal(s.start_voltage),
                decimal(s.final_voltage),
                decimal(s.step_time)
            ),
            None => format!("Step #{}", index + 1),
        }
    }

    /// Additional passes over the step list. Blank means zero.
    pub fn repeat_count(&self) -> Result<u32, SequenceError> {
        let text = self.repeat_input.trim();
        if text.is_empty() {
            return Ok(0);
        }
        text.parse::<u32>()
            .map_err(|_| SequenceError::InvalidRepeatCount(self.repeat_input.clone()))
    }

    pub fn sequence(&self, config: &SequencerConfig) -> Result<Sequence, SequenceError> {
        let repeat = self.repeat_count()?;
        config.assembler()?.assemble(&self.steps, repeat)
    }

    pub fn generate_rows(&self, config: &SequencerConfig) -> Result<Vec<Row>, SequenceError> {
        let sequence = self.sequence(config)?;
        let rows = config.row_formatter().format(&sequence.voltages);
        log::debug!("formatted {} rows", rows.len());
        Ok(rows)
    }

    /// Replaces the step list only if the whole source parses.
    pub fn load_steps<R: BufRead>(&mut self, source: R) -> Result<usize, SequenceError> {
        let steps = read_steps(source)?;
        let count = steps.len();
        self.steps = steps;
        Ok(count)
    }

    pub fn save_steps<W: Write>(&self, sink: W) -> Result<(), SequenceError> {
        write_steps(&self.steps, sink)
    }

    pub fn load_steps_from_path(&mut self, path: impl AsRef<Path>) -> Result<usize, SequenceError> {
        let path = path.as_ref();
        let result = File::open(path)
            .map_err(SequenceError::from)
            .and_then(|f| self.load_steps(BufReader::new(f)));
        match &result {
            Ok(n) => log::info!("loaded {n} steps from {}", path.display()),
            Err(e) => log::warn!("rejected step file {}: {e}", path.display()),
        }
        result
    }

    pub fn save_steps_to_path(&self, path: impl AsRef<Path>) -> Result<(), SequenceError> {
        let path = path.as_ref();
        let file = File::create(path)?;
        self.save_steps(BufWriter::new(file))?;
        log::info!("saved {} steps to {}", self.steps.len(), path.display());
        Ok(())
    }
}
