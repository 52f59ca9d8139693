// src/types.rs

// 新建步骤的默认值：0 V → 5 V，10 秒
pub const DEFAULT_START_VOLTAGE: f64 = 0.0;
pub const DEFAULT_FINAL_VOLTAGE: f64 = 5.0;
pub const DEFAULT_STEP_TIME: f64 = 10.0;

/// One linear voltage ramp. Identity is its position in the step list.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Step {
    pub start_voltage: f64,
    pub final_voltage: f64,
    /// Seconds.
    pub step_time: f64,
}

impl Step {
    pub fn new(start_voltage: f64, final_voltage: f64, step_time: f64) -> Self {
        Self {
            start_voltage,
            final_voltage,
            step_time,
        }
    }
}

impl Default for Step {
    fn default() -> Self {
        Self::new(DEFAULT_START_VOLTAGE, DEFAULT_FINAL_VOLTAGE, DEFAULT_STEP_TIME)
    }
}

// 编辑器状态变化后给日志区的消息
#[derive(Clone, Debug, PartialEq)]
pub enum EditorMessage {
    Info(String),
    Error(String),
}

impl EditorMessage {
    pub fn text(&self) -> &str {
        match self {
            EditorMessage::Info(s) | EditorMessage::Error(s) => s,
        }
    }

    pub fn is_error(&self) -> bool {
        matches!(self, EditorMessage::Error(_))
    }
}
