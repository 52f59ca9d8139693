// 无界面模式：读取步骤文件 → 生成序列 CSV（可选 PNG 曲线）
use anyhow::{bail, Context, Result};
use std::io::{self, Write};

use crate::cli::Args;
use crate::config::SequencerConfig;
use crate::sequencer::{export_rows_to_path, rows_to_csv_bytes, write_profile_png, PlotStyle};
use crate::session::EditorSession;

pub fn run(args: &Args, config: &SequencerConfig) -> Result<()> {
    let Some(steps_path) = args.steps.as_deref() else {
        bail!("--steps is required with --nogui");
    };

    let mut session = EditorSession::new();
    session.repeat_input = args.repeat.clone();
    session
        .load_steps_from_path(steps_path)
        .with_context(|| format!("loading step list {steps_path}"))?;

    let sequence = session.sequence(config).context("building sequence")?;
    let rows = config.row_formatter().format(&sequence.voltages);
    log::info!(
        "{} steps, {} passes -> {} setpoints ({:.1} s)",
        session.steps.len(),
        session.repeat_count().unwrap_or_default() + 1,
        sequence.len(),
        sequence.duration_seconds()
    );

    let out = args
        .out
        .clone()
        .unwrap_or_else(|| config.export.sequence_file.clone());
    if out == "-" {
        let bytes = rows_to_csv_bytes(&rows)?;
        io::stdout()
            .lock()
            .write_all(&bytes)
            .context("writing to stdout")?;
    } else {
        export_rows_to_path(&rows, &out).with_context(|| format!("writing {out}"))?;
    }

    if let Some(plot_path) = args.plot.as_deref() {
        write_profile_png(&sequence, PlotStyle::default(), plot_path)
            .with_context(|| format!("rendering {plot_path}"))?;
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use clap::Parser;

    fn temp(name: &str) -> std::path::PathBuf {
        std::env::temp_dir().join(format!("uhs_sequencer_headless_{}_{name}", std::process::id()))
    }

    #[test]
    fn generates_sequence_file_from_steps() {
        let steps = temp("steps.csv");
        let out = temp("out.csv");
        std::fs::write(&steps, "start_voltage,final_voltage,step_time\n0,5,10\n").unwrap();
        let args = Args::parse_from([
            "uhs-sequencer",
            "--nogui",
            "--steps",
            steps.to_str().unwrap(),
            "--repeat",
            "1",
            "--out",
            out.to_str().unwrap(),
        ]);
        run(&args, &SequencerConfig::default()).unwrap();
        let text = std::fs::read_to_string(&out).unwrap();
        std::fs::remove_file(&steps).ok();
        std::fs::remove_file(&out).ok();
        // header + 2 passes of 100 + shutdown
        assert_eq!(text.lines().count(), 1 + 201);
        assert!(text.lines().last().unwrap().starts_with("201;"));
    }

    #[test]
    fn missing_steps_flag_is_an_error() {
        let args = Args::parse_from(["uhs-sequencer", "--nogui"]);
        assert!(run(&args, &SequencerConfig::default()).is_err());
    }

    #[test]
    fn invalid_repeat_is_reported() {
        let steps = temp("steps_bad_repeat.csv");
        std::fs::write(&steps, "start_voltage,final_voltage,step_time\n0,5,1\n").unwrap();
        let args = Args::parse_from([
            "uhs-sequencer",
            "--nogui",
            "--steps",
            steps.to_str().unwrap(),
            "--repeat",
            "many",
        ]);
        let err = run(&args, &SequencerConfig::default()).unwrap_err();
        std::fs::remove_file(&steps).ok();
        assert!(format!("{err:#}").contains("repeat count"));
    }
}
