// src/types.rs
use std::fmt;

pub const CHANNEL_COUNT: usize = 5;

// 监测通道
#[derive(PartialEq, Eq, Clone, Copy, Debug, Hash, PartialOrd, Ord)]
pub enum Channel {
    Temperature,
    Vibration,
    Rpm,
    Oil,
    Voltage,
}

impl Channel {
    pub const ALL: [Channel; CHANNEL_COUNT] = [
        Channel::Temperature,
        Channel::Vibration,
        Channel::Rpm,
        Channel::Oil,
        Channel::Voltage,
    ];

    pub fn index(self) -> usize {
        self as usize
    }

    /// Lower-case name written to the alarm log.
    pub fn key(self) -> &'static str {
        match self {
            Channel::Temperature => "temperature",
            Channel::Vibration => "vibration",
            Channel::Rpm => "rpm",
            Channel::Oil => "oil",
            Channel::Voltage => "voltage",
        }
    }

    pub fn label(self) -> &'static str {
        match self {
            Channel::Temperature => "Temperature",
            Channel::Vibration => "Vibration",
            Channel::Rpm => "Speed",
            Channel::Oil => "Oil pressure",
            Channel::Voltage => "Voltage",
        }
    }

    pub fn unit(self) -> &'static str {
        match self {
            Channel::Temperature => "°C",
            Channel::Vibration => "mm/s RMS",
            Channel::Rpm => "RPM",
            Channel::Oil => "bar",
            Channel::Voltage => "V",
        }
    }
}

impl fmt::Display for Channel {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

// 运行状态
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum RunState {
    #[default]
    Stopped,
    Running,
}

// 中央面板显示内容
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum ViewMode {
    #[default]
    Chart,
    Log,
}

// 指示灯
#[derive(PartialEq, Eq, Clone, Copy, Debug, Default)]
pub enum Lamp {
    /// Nothing evaluated since start-up or the last alarm reset.
    #[default]
    Idle,
    Normal,
    Alarm,
}

// 操作员命令
#[derive(Clone, Copy, Debug, PartialEq)]
pub enum Command {
    Start,
    Stop,
    ResetAlarms,
    ToggleView,
    SelectChannel(Channel),
    // 清空日志需要二次确认
    RequestClearLog,
    ConfirmClearLog,
    CancelClearLog,
}

/// One value per channel, indexed by `Channel::index`.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Readings([f64; CHANNEL_COUNT]);

impl Readings {
    #[cfg(test)]
    pub fn new(values: [f64; CHANNEL_COUNT]) -> Self {
        Self(values)
    }

    pub fn get(&self, channel: Channel) -> f64 {
        self.0[channel.index()]
    }

    pub fn set(&mut self, channel: Channel, value: f64) {
        self.0[channel.index()] = value;
    }

    pub fn iter(&self) -> impl Iterator<Item = (Channel, f64)> + '_ {
        Channel::ALL.iter().map(move |&c| (c, self.get(c)))
    }
}

/// Output of one generator step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Frame {
    pub tick: u64,
    pub values: Readings,
}

#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn channel_indices_follow_declaration_order() {
        for (i, ch) in Channel::ALL.iter().enumerate() {
            assert_eq!(ch.index(), i);
        }
    }
    #[test]
    fn readings_iterate_in_channel_order() {
        let r = Readings::new([1.0, 2.0, 3.0, 4.0, 5.0]);
        let collected: Vec<_> = r.iter().collect();
        assert_eq!(collected[1], (Channel::Vibration, 2.0));
        assert_eq!(collected[4], (Channel::Voltage, 5.0));
        assert_eq!(Channel::Oil.to_string(), "oil");
    }
}
