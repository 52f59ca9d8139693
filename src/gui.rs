// src/gui.rs
use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints};

use crate::config::SequencerConfig;
use crate::sequencer::{export_rows_to_path, plot::MIN_VOLTAGE_AXIS};
use crate::session::EditorSession;
use crate::types::{EditorMessage, Step};

const MAX_LOG_LINES: usize = 8;
const PROFILE_COLOR: Color32 = Color32::from_rgb(0, 191, 255);

pub struct RampEditorApp {
    config: SequencerConfig,
    session: EditorSession,

    // 导出/保存文件名
    sequence_file: String,
    steps_file: String,

    // 曲线缓存：步骤或重复次数变化时才重新生成
    plot_key: Option<(Vec<Step>, String)>,
    plot_points: Vec<[f64; 2]>,
    plot_error: Option<String>,

    log_messages: Vec<EditorMessage>,
}

impl RampEditorApp {
    pub fn new(config: SequencerConfig, session: EditorSession) -> Self {
        Self {
            sequence_file: config.export.sequence_file.clone(),
            steps_file: config.export.steps_file.clone(),
            config,
            session,
            plot_key: None,
            plot_points: Vec::new(),
            plot_error: None,
            log_messages: vec![EditorMessage::Info("UHS Sequence editor ready.".to_owned())],
        }
    }

    fn log(&mut self, msg: EditorMessage) {
        self.log_messages.push(msg);
        if self.log_messages.len() > MAX_LOG_LINES {
            self.log_messages.remove(0);
        }
    }

    fn refresh_plot(&mut self) {
        let key = (self.session.steps.clone(), self.session.repeat_input.clone());
        if self.plot_key.as_ref() == Some(&key) {
            return;
        }
        match self.session.sequence(&self.config) {
            Ok(seq) => {
                self.plot_points = seq.points();
                self.plot_error = None;
            }
            Err(e) => {
                self.plot_points.clear();
                self.plot_error = Some(e.to_string());
            }
        }
        self.plot_key = Some(key);
    }

    fn generate_sequence(&mut self) {
        let result = self
            .session
            .generate_rows(&self.config)
            .and_then(|rows| export_rows_to_path(&rows, &self.sequence_file).map(|_| rows.len()));
        match result {
            Ok(n) => self.log(EditorMessage::Info(format!(
                "Wrote {n} rows to {}",
                self.sequence_file
            ))),
            Err(e) => self.log(EditorMessage::Error(format!("Generate failed: {e}"))),
        }
    }

    fn save_config(&mut self) {
        match self.session.save_steps_to_path(&self.steps_file) {
            Ok(()) => self.log(EditorMessage::Info(format!(
                "Saved {} steps to {}",
                self.session.steps.len(),
                self.steps_file
            ))),
            Err(e) => self.log(EditorMessage::Error(format!("Save failed: {e}"))),
        }
    }

    fn load_config(&mut self) {
        let path = self.steps_file.clone();
        match self.session.load_steps_from_path(&path) {
            Ok(n) => self.log(EditorMessage::Info(format!(
                "Configuration loaded from {path} ({n} steps)."
            ))),
            // 加载失败时步骤列表保持原样
            Err(e) => self.log(EditorMessage::Error(format!(
                "Error loading uploaded config: {e}"
            ))),
        }
    }

    fn draw_steps(&mut self, ui: &mut egui::Ui) {
        let mut remove = None;
        for i in 0..self.session.steps.len() {
            let title = self.session.step_title(i);
            let step = &mut self.session.steps[i];
            egui::CollapsingHeader::new(RichText::new(title).strong())
                .id_source(("step", i))
                .default_open(true)
                .show(ui, |ui| {
                    ui.horizontal(|ui| {
                        ui.label("Start");
                        ui.add(
                            egui::DragValue::new(&mut step.start_voltage)
                                .speed(0.1)
                                .clamp_range(0.0..=f64::MAX)
                                .suffix(" V"),
                        );
                        ui.label("Final");
                        ui.add(
                            egui::DragValue::new(&mut step.final_voltage)
                                .speed(0.1)
                                .clamp_range(0.0..=f64::MAX)
                                .suffix(" V"),
                        );
                        ui.label("Time");
                        ui.add(
                            egui::DragValue::new(&mut step.step_time)
                                .speed(0.1)
                                .clamp_range(0.0..=f64::MAX)
                                .suffix(" s"),
                        );
                    });
                    if ui.button(format!("🗑 Remove Step #{}", i + 1)).clicked() {
                        remove = Some(i);
                    }
                });
        }
        if let Some(i) = remove {
            self.session.remove_step(i);
        }
    }
}

impl eframe::App for RampEditorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        let mut visuals = egui::Visuals::dark();
        visuals.widgets.noninteractive.bg_fill = Color32::from_rgb(10, 10, 15);
        ctx.set_visuals(visuals);

        egui::SidePanel::left("steps").min_width(360.0).show(ctx, |ui| {
            ui.add_space(10.0);
            ui.heading("EA-PS 9080-100 1U UHS Sequence");
            ui.separator();

            if ui.button("➕ Add Voltage Step").clicked() {
                self.session.add_step();
            }

            egui::ScrollArea::vertical()
                .max_height(ui.available_height() * 0.55)
                .show(ui, |ui| self.draw_steps(ui));

            ui.separator();
            ui.horizontal(|ui| {
                ui.label("Number of times to repeat:");
                ui.text_edit_singleline(&mut self.session.repeat_input);
            });
            if let Err(e) = self.session.repeat_count() {
                ui.label(RichText::new(e.to_string()).color(Color32::RED).small());
            }

            ui.separator();
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut self.sequence_file);
                if ui.button("📥 Generate UHS Sequence").clicked() {
                    self.generate_sequence();
                }
            });

            ui.separator();
            ui.horizontal(|ui| {
                ui.text_edit_singleline(&mut self.steps_file);
            });
            ui.horizontal(|ui| {
                if ui.button("💾 Save Config").clicked() {
                    self.save_config();
                }
                if ui.button("📂 Load Config").clicked() {
                    self.load_config();
                }
            });

            ui.add_space(10.0);
            egui::ScrollArea::vertical()
                .id_source("log")
                .max_height(120.0)
                .show(ui, |ui| {
                    for m in &self.log_messages {
                        let color = if m.is_error() {
                            Color32::RED
                        } else {
                            Color32::GRAY
                        };
                        ui.label(RichText::new(format!("> {}", m.text())).monospace().color(color));
                    }
                });
        });

        self.refresh_plot();

        egui::CentralPanel::default().show(ctx, |ui| {
            ui.heading("Selected Voltage Profile");
            if self.session.steps.is_empty() {
                ui.label("Add a voltage step to see the profile.");
                return;
            }
            if let Some(err) = &self.plot_error {
                ui.label(RichText::new(err).color(Color32::YELLOW));
                return;
            }
            let points = self.plot_points.clone();
            Plot::new("profile_plot")
                .view_aspect(2.0)
                .include_x(0.0)
                .include_y(0.0)
                .include_y(MIN_VOLTAGE_AXIS)
                .x_axis_label("Time (s)")
                .y_axis_label("Voltage (V)")
                .show(ui, |plot_ui| {
                    plot_ui.line(
                        Line::new(PlotPoints::new(points))
                            .name("Voltage")
                            .color(PROFILE_COLOR)
                            .width(3.0),
                    );
                });
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn plot_cache_tracks_session_changes() {
        let mut app = RampEditorApp::new(SequencerConfig::default(), EditorSession::new());
        app.session.add_step();
        app.refresh_plot();
        assert_eq!(app.plot_points.len(), 101);

        app.session.repeat_input = "1".into();
        app.refresh_plot();
        assert_eq!(app.plot_points.len(), 201);

        app.session.repeat_input = "x".into();
        app.refresh_plot();
        assert!(app.plot_points.is_empty());
        assert!(app.plot_error.is_some());
    }

    #[test]
    fn failed_load_keeps_steps_and_logs_error() {
        let mut app = RampEditorApp::new(SequencerConfig::default(), EditorSession::new());
        app.session.steps = vec![Step::new(1.0, 2.0, 3.0)];
        app.steps_file = "/definitely/not/here/ramp_config.csv".into();
        app.load_config();
        assert_eq!(app.session.steps, vec![Step::new(1.0, 2.0, 3.0)]);
        assert!(app.log_messages.last().unwrap().is_error());
    }

    #[test]
    fn log_is_bounded() {
        let mut app = RampEditorApp::new(SequencerConfig::default(), EditorSession::new());
        for i in 0..20 {
            app.log(EditorMessage::Info(format!("line {i}")));
        }
        assert_eq!(app.log_messages.len(), MAX_LOG_LINES);
        assert_eq!(app.log_messages.last().unwrap().text(), "line 19");
    }
}
