// src/main.rs
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]
mod config;
mod drivers;
mod engine;
mod gui;
mod recorder;
mod types;
mod visualizer;
use eframe::egui;
use config::MonitorConfig;
// 入口函数
fn main() -> eframe::Result<()> {
    env_logger::init();
    let config = MonitorConfig::default();
    log::info!(
        "starting motorwatch: tick {:?}, chart window {} samples",
        config.tick_period,
        config.chart_window
    );
    let viewport = egui::ViewportBuilder::default()
        .with_inner_size([1050.0, 720.0])
        .with_min_inner_size([900.0, 600.0])
        .with_title("Motor Condition Monitor");
    let options = eframe::NativeOptions {
        viewport,
        ..Default::default()
    };
    eframe::run_native(
        "motorwatch",
        options,
        Box::new(move |_cc| Box::new(gui::MotorMonitorApp::new(config))),
    )
}
