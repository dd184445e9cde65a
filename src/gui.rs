// src/gui.rs
use std::fs;
use std::path::PathBuf;
use std::time::{Instant, SystemTime, UNIX_EPOCH};
use anyhow::Context;
use eframe::egui;
use egui::{Color32, RichText};
use egui_plot::{Line, Plot, PlotPoints};
use log::{error, info};
use crate::config::MonitorConfig;
use crate::drivers::{render_series_png, PlotStyle, WaveformGenerator};
use crate::engine::{Monitor, TickClock};
use crate::recorder::AlarmLogFile;
use crate::types::*;
use crate::visualizer::{self, ACCENT, BACKGROUND, PANEL, TRACE};

pub struct MotorMonitorApp {
    monitor: Monitor<WaveformGenerator, AlarmLogFile>,
    clock: TickClock,
    // 状态栏消息
    status: String,
}

impl MotorMonitorApp {
    pub fn new(config: MonitorConfig) -> Self {
        let source = match config.seed {
            Some(seed) => WaveformGenerator::from_seed(seed),
            None => WaveformGenerator::from_entropy(),
        };
        let log = AlarmLogFile::new(&config.log_path);
        info!("alarm log at {}", log.path().display());
        Self {
            clock: TickClock::new(config.tick_period, Instant::now()),
            monitor: Monitor::new(source, log, &config),
            status: "Ready.".to_owned(),
        }
    }

    fn send(&mut self, cmd: Command) {
        if let Err(e) = self.monitor.apply(cmd) {
            error!("{cmd:?} failed: {e}");
            self.status = format!("Error: {e}");
        }
    }

    fn drive(&mut self, now: Instant) {
        for _ in 0..self.clock.poll(now) {
            let Some(report) = self.monitor.tick() else {
                continue;
            };
            if report.new_alarms.is_empty() {
                continue;
            }
            let names: Vec<String> = report
                .new_alarms
                .iter()
                .map(|&c| format!("{} = {:.2} {}", c.label(), report.values.get(c), c.unit()))
                .collect();
            self.status = format!("Tick {}: ALARM {}", report.tick, names.join(", "));
            if let Some(e) = report.log_error {
                self.status.push_str(&format!(" (log write failed: {e})"));
            }
        }
    }

    fn export_chart(&self) -> anyhow::Result<PathBuf> {
        let channel = self.monitor.selected();
        let points = self.monitor.store().window(channel, self.monitor.chart_window());
        let png = render_series_png(channel, &points, &PlotStyle::default())
            .context("rendering chart")?;
        let stamp = SystemTime::now().duration_since(UNIX_EPOCH)?.as_secs();
        let path = PathBuf::from(format!("chart_{}_{}.png", channel.key(), stamp));
        fs::write(&path, png).with_context(|| format!("writing {}", path.display()))?;
        Ok(path)
    }

    fn controls(&self, ui: &mut egui::Ui, pending: &mut Vec<Command>) {
        ui.horizontal(|ui| {
            if ui.button("▶ Start").clicked() { pending.push(Command::Start); }
            if ui.button("⏹ Stop").clicked() { pending.push(Command::Stop); }
            if ui.button("Acknowledge alarms").clicked() { pending.push(Command::ResetAlarms); }
            let view_txt = match self.monitor.view() {
                ViewMode::Chart => "Show log",
                ViewMode::Log => "Show chart",
            };
            if ui.button(view_txt).clicked() { pending.push(Command::ToggleView); }
            if ui.button("Clear log").clicked() { pending.push(Command::RequestClearLog); }

            ui.add_space(20.0);
            let (txt, col) = match self.monitor.run_state() {
                RunState::Running => ("RUNNING", Color32::from_rgb(0, 255, 0)),
                RunState::Stopped => ("STOPPED", Color32::GRAY),
            };
            ui.label(RichText::new(txt).strong().color(col));
            if let Some(tick) = self.monitor.store().ticks().last() {
                ui.monospace(format!("tick {tick}"));
            }
        });
    }

    fn chart(&self, ui: &mut egui::Ui, pending: &mut Vec<Command>, export: &mut bool) {
        ui.horizontal(|ui| {
            ui.label("Channel:");
            for channel in Channel::ALL {
                let fill = if channel == self.monitor.selected() { ACCENT } else { PANEL };
                let btn = egui::Button::new(RichText::new(channel.label()).color(Color32::WHITE)).fill(fill);
                if ui.add(btn).clicked() {
                    pending.push(Command::SelectChannel(channel));
                }
            }
            ui.add_space(20.0);
            let has_data = !self.monitor.store().is_empty();
            if ui.add_enabled(has_data, egui::Button::new("Export PNG")).clicked() {
                *export = true;
            }
        });

        let channel = self.monitor.selected();
        let points = self.monitor.chart_points();
        Plot::new("motor_chart")
            .auto_bounds_x()
            .auto_bounds_y()
            .x_axis_label("Time (s)")
            .y_axis_label(format!("{} ({})", channel.label(), channel.unit()))
            .show(ui, |plot_ui| {
                if !points.is_empty() {
                    plot_ui.line(Line::new(PlotPoints::new(points)).name(channel.label()).color(TRACE));
                }
            });
    }
}

impl eframe::App for MotorMonitorApp {
    fn update(&mut self, ctx: &egui::Context, _frame: &mut eframe::Frame) {
        // 1. 节拍驱动
        let now = Instant::now();
        self.drive(now);
        ctx.request_repaint_after(self.clock.until_next(now));

        // 2. UI 绘制
        let mut visuals = egui::Visuals::dark();
        visuals.panel_fill = BACKGROUND;
        ctx.set_visuals(visuals);

        let mut pending = Vec::new();
        let mut export = false;

        egui::TopBottomPanel::top("controls").show(ctx, |ui| {
            ui.add_space(8.0);
            ui.vertical_centered(|ui| {
                ui.heading("Motor Condition Monitor");
            });
            ui.add_space(6.0);
            self.controls(ui, &mut pending);
            ui.add_space(8.0);
            ui.horizontal(|ui| {
                for channel in Channel::ALL {
                    visualizer::draw_gauge(
                        ui,
                        channel,
                        self.monitor.current(channel),
                        self.monitor.lamp(channel),
                    );
                }
            });
            ui.add_space(8.0);
        });

        egui::TopBottomPanel::bottom("status").show(ctx, |ui| {
            ui.horizontal(|ui| {
                ui.monospace(&self.status);
                let latched = self.monitor.alarms().latched();
                if !latched.is_empty() {
                    let keys: Vec<&str> = latched.iter().map(Channel::key).collect();
                    ui.with_layout(egui::Layout::right_to_left(egui::Align::Center), |ui| {
                        ui.label(RichText::new(format!("Latched: {}", keys.join(", "))).color(Color32::RED));
                    });
                }
            });
        });

        egui::CentralPanel::default().show(ctx, |ui| match self.monitor.view() {
            ViewMode::Chart => self.chart(ui, &mut pending, &mut export),
            ViewMode::Log => {
                egui::ScrollArea::vertical().stick_to_bottom(true).show(ui, |ui| {
                    ui.monospace(self.monitor.log_text());
                });
            }
        });

        if self.monitor.clear_pending() {
            egui::Window::new("Confirm")
                .collapsible(false)
                .resizable(false)
                .anchor(egui::Align2::CENTER_CENTER, [0.0, 0.0])
                .show(ctx, |ui| {
                    ui.label("Clear the alarm log file?");
                    ui.horizontal(|ui| {
                        if ui.button("Yes").clicked() { pending.push(Command::ConfirmClearLog); }
                        if ui.button("No").clicked() { pending.push(Command::CancelClearLog); }
                    });
                });
        }

        for cmd in pending {
            self.send(cmd);
        }
        if export {
            self.status = match self.export_chart() {
                Ok(path) => format!("Chart saved to {}", path.display()),
                Err(e) => {
                    error!("chart export failed: {e:#}");
                    format!("Export failed: {e:#}")
                }
            };
        }
    }
}
