// 斜坡采样 → 序列拼接 → 行格式化 → 导出
pub mod assemble;
pub mod error;
pub mod export;
pub mod plot;
pub mod ramp;
pub mod rows;
pub mod steps_file;
// 公开导出常用类型，方便外部调用
pub use assemble::{Sequence, SequenceAssembler};
pub use error::SequenceError;
pub use export::{export_rows_to_path, rows_to_csv_bytes};
pub use plot::{write_profile_png, PlotStyle};
pub use ramp::DEFAULT_RESOLUTION_S;
pub use rows::{Row, RowFormatter, DEFAULT_CURRENT_A, DEFAULT_POWER_W};
pub use steps_file::{read_steps, write_steps};
