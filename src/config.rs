// src/config.rs
use std::path::PathBuf;
use std::time::Duration;
use crate::drivers::alarm::{default_limits, Limits};
use crate::types::{Channel, CHANNEL_COUNT};

/// Compiled-in monitor settings.
#[derive(Clone, Debug)]
pub struct MonitorConfig {
    pub tick_period: Duration,
    /// How many of the newest samples the chart shows.
    pub chart_window: usize,
    pub log_path: PathBuf,
    /// Fixed seed for reproducible runs; `None` seeds from the OS.
    pub seed: Option<u64>,
    pub limits: [Limits; CHANNEL_COUNT],
    pub initial_channel: Channel,
}

impl Default for MonitorConfig {
    fn default() -> Self {
        Self {
            tick_period: Duration::from_secs(1),
            chart_window: 100,
            log_path: PathBuf::from("motor_log.txt"),
            seed: None,
            limits: Channel::ALL.map(default_limits),
            initial_channel: Channel::Vibration,
        }
    }
}
