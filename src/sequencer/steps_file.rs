use std::io::{BufRead, Write};
use crate::sequencer::error::SequenceError;
use crate::sequencer::export::decimal;
use crate::types::Step;
pub const START_VOLTAGE: &str = "start_voltage";
pub const FINAL_VOLTAGE: &str = "final_voltage";
pub const STEP_TIME: &str = "step_time";
const REQUIRED_COLUMNS: [&str; 3] = [START_VOLTAGE, FINAL_VOLTAGE, STEP_TIME];
pub fn write_steps<W: Write>(steps: &[Step], mut sink: W) -> Result<(), SequenceError> {
    writeln!(sink, "{}", REQUIRED_COLUMNS.join(","))?;
    for step in steps {
        writeln!(
            sink,
            "{},{},{}",
            decimal(step.start_voltage),
            decimal(step.final_voltage),
            decimal(step.step_time)
        )?;
    }
    sink.flush()?;
    Ok(())
}
/// Parses a comma-delimited step list.
///
/// Columns are matched by header name, so their order is free and extra
/// columns are ignored. The whole read fails on the first bad line; no
/// partial list is ever returned.
pub fn read_steps<R: BufRead>(source: R) -> Result<Vec<Step>, SequenceError> {
    let mut lines = source
        .lines()
        .enumerate()
        .map(|(idx, line)| line.map(|l| (idx + 1, l)));
    let (header_no, header) = loop {
        match lines.next().transpose()? {
            Some((_, line)) if line.trim().is_empty() => continue,
            Some(entry) => break entry,
            None => return Err(SequenceError::MissingColumn(START_VOLTAGE)),
        }
    };
    let columns = split_record(header.trim_start_matches('\u{feff}'), header_no)?;
    let mut positions = [0usize; 3];
    for (slot, name) in positions.iter_mut().zip(REQUIRED_COLUMNS) {
        *slot = columns
            .iter()
            .position(|c| c == name)
            .ok_or(SequenceError::MissingColumn(name))?;
    }
    let mut steps = Vec::new();
    for entry in lines {
        let (line_no, line) = entry?;
        if line.trim().is_empty() {
            continue;
        }
        let fields = split_record(&line, line_no)?;
        if fields.len() != columns.len() {
            return Err(SequenceError::MalformedRecord {
                line: line_no,
                expected: columns.len(),
                found: fields.len(),
            });
        }
        let [start, end, time] = positions;
        steps.push(Step::new(
            parse_field(&fields[start], START_VOLTAGE, line_no)?,
            parse_field(&fields[end], FINAL_VOLTAGE, line_no)?,
            parse_field(&fields[time], STEP_TIME, line_no)?,
        ));
    }
    Ok(steps)
}
/// Splits one record on commas, honoring `"..."` quoting and `""` escapes.
fn split_record(line: &str, line_no: usize) -> Result<Vec<String>, SequenceError> {
    let mut fields = Vec::new();
    let mut field = String::new();
    let mut chars = line.trim().chars().peekable();
    loop {
        while chars.peek().is_some_and(|c| *c == ' ' || *c == '\t') {
            chars.next();
        }
        if chars.peek() == Some(&'"') {
            chars.next();
            loop {
                match chars.next() {
                    Some('"') if chars.peek() == Some(&'"') => {
                        chars.next();
                        field.push('"');
                    }
                    Some('"') => break,
                    Some(c) => field.push(c),
                    None => return Err(SequenceError::UnterminatedQuote { line: line_no }),
                }
            }
            // only padding may follow the closing quote
            while chars.peek().is_some_and(|c| *c == ' ' || *c == '\t') {
                chars.next();
            }
            match chars.next() {
                None => {
                    fields.push(std::mem::take(&mut field));
                    return Ok(fields);
                }
                Some(',') => fields.push(std::mem::take(&mut field)),
                Some(_) => return Err(SequenceError::UnterminatedQuote { line: line_no }),
            }
        } else {
            loop {
                match chars.next() {
                    None => {
                        fields.push(field.trim().to_owned());
                        return Ok(fields);
                    }
                    Some(',') => {
                        fields.push(field.trim().to_owned());
                        field.clear();
                        break;
                    }
                    Some('"') => return Err(SequenceError::UnterminatedQuote { line: line_no }),
                    Some(c) => field.push(c),
                }
            }
        }
    }
}
fn parse_field(raw: &str, column: &'static str, line: usize) -> Result<f64, SequenceError> {
    raw.parse::<f64>()
        .ok()
        .filter(|v| v.is_finite())
        .ok_or_else(|| SequenceError::InvalidNumber {
            line,
            column,
            value: raw.to_owned(),
        })
}
#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Cursor;
    fn read(text: &str) -> Result<Vec<Step>, SequenceError> {
        read_steps(Cursor::new(text))
    }
    #[test]
    fn written_list_reads_back_equal() {
        let steps = vec![
            Step::new(0.0, 5.0, 10.0),
            Step::new(5.0, 12.345, 0.3),
            Step::new(12.345, 0.0, 1.0e-3),
        ];
        let mut buf = Vec::new();
        write_steps(&steps, &mut buf).unwrap();
        assert_eq!(read(&String::from_utf8(buf).unwrap()).unwrap(), steps);
    }
    #[test]
    fn writes_pandas_style_header_and_decimals() {
        let mut buf = Vec::new();
        write_steps(&[Step::default()], &mut buf).unwrap();
        assert_eq!(
            String::from_utf8(buf).unwrap(),
            "start_voltage,final_voltage,step_time\n0.0,5.0,10.0\n"
        );
    }
    #[test]
    fn columns_are_matched_by_name() {
        let steps = read("step_time,note,final_voltage,start_voltage\n4,warmup,2.5,1\n").unwrap();
        assert_eq!(steps, vec![Step::new(1.0, 2.5, 4.0)]);
    }
    #[test]
    fn tolerates_bom_crlf_and_blank_lines() {
        let text = "\u{feff}start_voltage,final_voltage,step_time\r\n\r\n1,2,3\r\n";
        assert_eq!(read(text).unwrap(), vec![Step::new(1.0, 2.0, 3.0)]);
    }
    #[test]
    fn empty_file_is_an_empty_list_once_header_exists() {
        assert!(read("start_voltage,final_voltage,step_time\n")
            .unwrap()
            .is_empty());
    }
    #[test]
    fn missing_step_time_column_is_rejected() {
        let err = read("start_voltage,final_voltage\n0,5\n").unwrap_err();
        assert!(matches!(err, SequenceError::MissingColumn("step_time")));
    }
    #[test]
    fn no_header_at_all_is_rejected() {
        assert!(matches!(
            read("").unwrap_err(),
            SequenceError::MissingColumn("start_voltage")
        ));
    }
    #[test]
    fn short_record_reports_its_line() {
        let err = read("start_voltage,final_voltage,step_time\n0,5,10\n1,2\n").unwrap_err();
        assert!(matches!(
            err,
            SequenceError::MalformedRecord {
                line: 3,
                expected: 3,
                found: 2
            }
        ));
    }
    #[test]
    fn long_record_is_rejected_not_truncated() {
        let err = read("start_voltage,final_voltage,step_time\n1,2,3,4,5\n").unwrap_err();
        assert!(matches!(
            err,
            SequenceError::MalformedRecord {
                line: 2,
                expected: 3,
                found: 5
            }
        ));
    }
    #[test]
    fn quoted_comma_does_not_shift_fields() {
        // "1,5" is one field, and not a number
        let err = read("start_voltage,final_voltage,step_time\n\"1,5\",2,3\n").unwrap_err();
        assert!(matches!(
            err,
            SequenceError::InvalidNumber {
                line: 2,
                column: "start_voltage",
                ..
            }
        ));
    }
    #[test]
    fn unterminated_quote_is_rejected() {
        let err = read("start_voltage,final_voltage,step_time\n\"1,5,2,3\n").unwrap_err();
        assert!(matches!(err, SequenceError::UnterminatedQuote { line: 2 }));
        assert!(read("start_voltage,final_voltage,step_time\n1\"2,5,3\n").is_err());
    }
    #[test]
    fn quoted_numbers_and_headers_are_accepted() {
        let steps = read("\"start_voltage\",\"final_voltage\",\"step_time\"\n\"1.5\", 2 ,\"3\"\n").unwrap();
        assert_eq!(steps, vec![Step::new(1.5, 2.0, 3.0)]);
    }
    #[test]
    fn non_numeric_field_is_rejected() {
        let err = read("start_voltage,final_voltage,step_time\nzero,5,10\n").unwrap_err();
        assert!(matches!(
            err,
            SequenceError::InvalidNumber {
                line: 2,
                column: "start_voltage",
                ..
            }
        ));
        assert!(read("start_voltage,final_voltage,step_time\n0,5,NaN\n").is_err());
    }
}
