use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;
use crate::sequencer::error::SequenceError;
use crate::sequencer::rows::Row;
const SEQUENCE_DELIMITER: &str = ";";
pub const SEQUENCE_HEADER: [&str; 12] = [
    "Step",
    "Description",
    "U set (V)",
    "I set (A)",
    "P set (W)",
    "Output/Input",
    "Hour",
    "Minute",
    "Second",
    "Millisecond",
    "R mode",
    "R set",
];
/// Writes the header and one semicolon-delimited line per row into `sink`.
pub fn write_rows<W: Write>(rows: &[Row], mut sink: W) -> Result<(), SequenceError> {
    writeln!(sink, "{}", SEQUENCE_HEADER.join(SEQUENCE_DELIMITER))?;
    for row in rows {
        writeln!(
            sink,
            "{};{};{};{};{};{};{};{};{};{};{};{}",
            row.step,
            row.description,
            decimal(row.u_set),
            row.i_set,
            row.p_set,
            row.output,
            row.hour,
            row.minute,
            row.second,
            row.millisecond,
            row.r_mode,
            row.r_set,
        )?;
    }
    sink.flush()?;
    Ok(())
}
/// In-memory UTF-8 export, e.g. for handing to a download widget.
pub fn rows_to_csv_bytes(rows: &[Row]) -> Result<Vec<u8>, SequenceError> {
    let mut out = Vec::with_capacity(rows.len() * 96);
    write_rows(rows, &mut out)?;
    Ok(out)
}
pub fn export_rows_to_path(rows: &[Row], path: impl AsRef<Path>) -> Result<(), SequenceError> {
    let path = path.as_ref();
    let file = File::create(path)?;
    write_rows(rows, BufWriter::new(file))?;
    log::info!("wrote {} sequence rows to {}", rows.len(), path.display());
    Ok(())
}
/// Float text that always carries a decimal point (`0.0`, `5.0`, `0.051`).
pub(crate) fn decimal(value: f64) -> String {
    format!("{value:?}")
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::rows::RowFormatter;
    #[test]
    fn header_and_row_layout() {
        let rows = RowFormatter::default().format(&[0.0, 0.0505, 5.0]);
        let text = String::from_utf8(rows_to_csv_bytes(&rows).unwrap()).unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 4);
        assert_eq!(
            lines[0],
            "Step;Description;U set (V);I set (A);P set (W);Output/Input;Hour;Minute;Second;Millisecond;R mode;R set"
        );
        assert_eq!(
            lines[1],
            "1;Set PS U set= 0.000V Iset= 80.000A output/input= on;0.0;80;2000;ON;0;0;0;100;OFF;1"
        );
        assert_eq!(
            lines[3],
            "3;Set PS U set= 5.000V Iset= 80.000A output/input= on;5.0;80;2000;ON;0;0;0;100;OFF;1"
        );
        for line in &lines {
            assert_eq!(line.split(SEQUENCE_DELIMITER).count(), SEQUENCE_HEADER.len());
        }
    }
    #[test]
    fn file_sink_matches_memory_sink() {
        let rows = RowFormatter::default().format(&[1.0, 2.0, 0.0]);
        let path = std::env::temp_dir().join(format!(
            "uhs_sequencer_export_{}.csv",
            std::process::id()
        ));
        export_rows_to_path(&rows, &path).unwrap();
        let on_disk = std::fs::read(&path).unwrap();
        std::fs::remove_file(&path).ok();
        assert_eq!(on_disk, rows_to_csv_bytes(&rows).unwrap());
    }
}
