// src/recorder.rs
use std::fmt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use chrono::{Local, NaiveDateTime};
use crate::drivers::MonitorError;
use crate::types::Channel;

pub const NO_LOG_PLACEHOLDER: &str = "No log entries available.";

/// One alarm transition, rendered as a single log line.
#[derive(Clone, Debug, PartialEq)]
pub struct AlarmEvent {
    pub at: NaiveDateTime,
    pub channel: Channel,
    pub value: f64,
}

impl AlarmEvent {
    pub fn now(channel: Channel, value: f64) -> Self {
        Self { at: Local::now().naive_local(), channel, value }
    }
}

impl fmt::Display for AlarmEvent {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "[{}] ALARM: {} = {:.2}",
            self.at.format("%Y-%m-%d %H:%M:%S"),
            self.channel.key(),
            self.value
        )
    }
}

/// Where alarm events end up.
pub trait EventLog {
    fn append(&mut self, event: &AlarmEvent) -> Result<(), MonitorError>;
    /// Raw log text, `None` if nothing has ever been written.
    fn read(&self) -> Result<Option<String>, MonitorError>;
    fn clear(&mut self) -> Result<(), MonitorError>;

    fn display_text(&self) -> Result<String, MonitorError> {
        Ok(self.read()?.unwrap_or_else(|| NO_LOG_PLACEHOLDER.to_owned()))
    }
}

/// Plain-text log file. The file is opened and closed on every call.
pub struct AlarmLogFile {
    path: PathBuf,
}

impl AlarmLogFile {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }
}

impl EventLog for AlarmLogFile {
    fn append(&mut self, event: &AlarmEvent) -> Result<(), MonitorError> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)
            .map_err(|e| MonitorError::log("open", &self.path, e))?;
        writeln!(file, "{}", event).map_err(|e| MonitorError::log("append to", &self.path, e))
    }

    fn read(&self) -> Result<Option<String>, MonitorError> {
        // 非 UTF-8 字节按替换字符显示，不影响打开日志视图
        match fs::read(&self.path) {
            Ok(bytes) => Ok(Some(String::from_utf8_lossy(&bytes).into_owned())),
            Err(e) if e.kind() == ErrorKind::NotFound => Ok(None),
            Err(e) => Err(MonitorError::log("read", &self.path, e)),
        }
    }

    fn clear(&mut self) -> Result<(), MonitorError> {
        File::create(&self.path)
            .map(drop)
            .map_err(|e| MonitorError::log("truncate", &self.path, e))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::NaiveDate;

    fn event(channel: Channel, value: f64) -> AlarmEvent {
        let at = NaiveDate::from_ymd_opt(2024, 3, 9)
            .unwrap()
            .and_hms_opt(14, 5, 7)
            .unwrap();
        AlarmEvent { at, channel, value }
    }

    #[test]
    fn line_format() {
        assert_eq!(
            event(Channel::Vibration, 3.14159).to_string(),
            "[2024-03-09 14:05:07] ALARM: vibration = 3.14"
        );
        assert_eq!(
            event(Channel::Oil, 1.0).to_string(),
            "[2024-03-09 14:05:07] ALARM: oil = 1.00"
        );
    }

    #[test]
    fn missing_file_shows_placeholder() {
        let dir = tempfile::tempdir().unwrap();
        let log = AlarmLogFile::new(dir.path().join("motor_log.txt"));
        assert_eq!(log.read().unwrap(), None);
        assert_eq!(log.display_text().unwrap(), NO_LOG_PLACEHOLDER);
    }

    #[test]
    fn append_then_read_back() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AlarmLogFile::new(dir.path().join("motor_log.txt"));
        log.append(&event(Channel::Rpm, 3100.456)).unwrap();
        log.append(&event(Channel::Voltage, 421.0)).unwrap();
        let text = log.read().unwrap().unwrap();
        let lines: Vec<&str> = text.lines().collect();
        assert_eq!(lines.len(), 2);
        assert!(lines[0].ends_with("ALARM: rpm = 3100.46"));
        assert!(lines[1].ends_with("ALARM: voltage = 421.00"));
    }

    #[test]
    fn clear_truncates_and_tolerates_empty() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motor_log.txt");
        let mut log = AlarmLogFile::new(&path);
        log.clear().unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        log.clear().unwrap();
        assert_eq!(log.display_text().unwrap(), "");

        log.append(&event(Channel::Temperature, 95.0)).unwrap();
        assert!(fs::metadata(&path).unwrap().len() > 0);
        log.clear().unwrap();
        assert_eq!(fs::metadata(&path).unwrap().len(), 0);
        assert_eq!(log.read().unwrap().as_deref(), Some(""));
    }

    #[test]
    fn foreign_bytes_do_not_block_reading() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("motor_log.txt");
        fs::write(&path, b"[2024-03-09 14:05:07] ALARM: rpm = 3100.00\n\xff\xfe\n").unwrap();
        let log = AlarmLogFile::new(&path);
        let text = log.display_text().unwrap();
        assert!(text.starts_with("[2024-03-09 14:05:07] ALARM: rpm = 3100.00\n"));
        assert!(text.contains('\u{FFFD}'));
    }

    #[test]
    fn unwritable_location_is_an_error() {
        let dir = tempfile::tempdir().unwrap();
        let mut log = AlarmLogFile::new(dir.path().join("missing").join("motor_log.txt"));
        let err = log.append(&event(Channel::Oil, 1.0)).unwrap_err();
        assert!(matches!(err, MonitorError::Log { action: "open", .. }));
    }
}
