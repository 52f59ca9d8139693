// src/main.rs
mod cli;
mod config;
mod gui;
mod headless;
mod sequencer;
mod session;
mod types;
use anyhow::{anyhow, Context};
use clap::Parser;
use eframe::egui;
use config::SequencerConfig;
use session::EditorSession;
// 入口函数
fn main() -> anyhow::Result<()> {
    env_logger::init();
    let args = cli::Args::parse();
    let config = SequencerConfig::load_or_default(&args.config);
    if args.nogui {
        return headless::run(&args, &config);
    }
    // 启动编辑器前可以预加载步骤文件
    let mut session = EditorSession::new();
    session.repeat_input = args.repeat.clone();
    if let Some(path) = args.steps.as_deref() {
        session
            .load_steps_from_path(path)
            .with_context(|| format!("loading step list {path}"))?;
    }
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1280.0, 800.0])
        .with_min_inner_size([960.0, 600.0])
        .with_title("EA Ramp Control");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "uhs-sequencer",
        options,
        Box::new(move |_cc| Box::new(gui::RampEditorApp::new(config, session))),
    )
    .map_err(|e| anyhow!("editor window failed: {e}"))
}
