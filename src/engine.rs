// src/engine.rs
use std::time::{Duration, Instant};
use log::{debug, error, info, warn};
use crate::config::MonitorConfig;
use crate::drivers::{AlarmEvaluator, MonitorError, SampleSource, SeriesStore};
use crate::recorder::{AlarmEvent, EventLog};
use crate::types::*;

/// What one simulation step produced.
#[derive(Debug)]
pub struct TickReport {
    pub tick: u64,
    pub values: Readings,
    pub new_alarms: Vec<Channel>,
    /// First failed log write of this tick; the alarms above are latched regardless.
    pub log_error: Option<MonitorError>,
}

/// Owns all monitor state: run/view state machine, history, alarm latch.
pub struct Monitor<S: SampleSource, L: EventLog> {
    source: S,
    log: L,
    store: SeriesStore,
    alarms: AlarmEvaluator,
    run_state: RunState,
    view: ViewMode,
    selected: Channel,
    chart_window: usize,
    // 最近一次读数，启动/停止不清空
    current: Option<Readings>,
    lamps: [Lamp; CHANNEL_COUNT],
    log_text: String,
    clear_pending: bool,
}

impl<S: SampleSource, L: EventLog> Monitor<S, L> {
    pub fn new(source: S, log: L, config: &MonitorConfig) -> Self {
        Self {
            source,
            log,
            store: SeriesStore::new(),
            alarms: AlarmEvaluator::new(config.limits),
            run_state: RunState::Stopped,
            view: ViewMode::Chart,
            selected: config.initial_channel,
            chart_window: config.chart_window,
            current: None,
            lamps: [Lamp::Idle; CHANNEL_COUNT],
            log_text: String::new(),
            clear_pending: false,
        }
    }

    pub fn apply(&mut self, cmd: Command) -> Result<(), MonitorError> {
        match cmd {
            Command::Start => {
                if self.run_state == RunState::Stopped {
                    self.store.reset();
                    self.source.rewind();
                    self.run_state = RunState::Running;
                    info!("monitor started");
                }
            }
            Command::Stop => {
                if self.run_state == RunState::Running {
                    self.run_state = RunState::Stopped;
                    info!("monitor stopped after {} ticks", self.store.len());
                }
            }
            Command::ResetAlarms => {
                self.alarms.reset();
                self.lamps = [Lamp::Idle; CHANNEL_COUNT];
                info!("alarms acknowledged");
            }
            Command::ToggleView => {
                self.view = match self.view {
                    ViewMode::Chart => {
                        self.log_text = self.log.display_text()?;
                        ViewMode::Log
                    }
                    ViewMode::Log => ViewMode::Chart,
                };
            }
            Command::SelectChannel(channel) => self.selected = channel,
            Command::RequestClearLog => self.clear_pending = true,
            Command::CancelClearLog => self.clear_pending = false,
            Command::ConfirmClearLog => {
                // 没有待确认的请求时忽略
                if !std::mem::take(&mut self.clear_pending) {
                    return Ok(());
                }
                self.log.clear()?;
                if self.view == ViewMode::Log {
                    self.log_text.clear();
                }
                info!("alarm log cleared");
            }
        }
        Ok(())
    }

    /// One scheduler cycle: generate, store, evaluate, log. `None` while stopped.
    ///
    /// A failing log write does not undo the tick; it is carried in
    /// [`TickReport::log_error`].
    pub fn tick(&mut self) -> Option<TickReport> {
        if self.run_state != RunState::Running {
            return None;
        }
        let frame = self.source.next_frame()?;
        self.store.append(frame.tick, &frame.values);
        self.current = Some(frame.values);

        let mut events = Vec::new();
        for (channel, value) in frame.values.iter() {
            let eval = self.alarms.evaluate(channel, value);
            if eval.newly_latched {
                warn!("alarm latched: {} = {:.2} at tick {}", channel, value, frame.tick);
                events.push(AlarmEvent::now(channel, value));
            } else if eval.violated {
                debug!("{} still out of range: {:.2}", channel, value);
            }
            self.lamps[channel.index()] = if self.alarms.is_latched(channel) {
                Lamp::Alarm
            } else {
                Lamp::Normal
            };
        }
        debug!("tick {}: {:?}", frame.tick, frame.values);

        let mut log_error = None;
        for event in &events {
            if let Err(e) = self.log.append(event) {
                error!("{e}");
                log_error.get_or_insert(e);
            }
        }
        Some(TickReport {
            tick: frame.tick,
            values: frame.values,
            new_alarms: events.iter().map(|e| e.channel).collect(),
            log_error,
        })
    }

    pub fn run_state(&self) -> RunState {
        self.run_state
    }
    pub fn view(&self) -> ViewMode {
        self.view
    }
    pub fn selected(&self) -> Channel {
        self.selected
    }
    pub fn clear_pending(&self) -> bool {
        self.clear_pending
    }
    pub fn store(&self) -> &SeriesStore {
        &self.store
    }
    pub fn alarms(&self) -> &AlarmEvaluator {
        &self.alarms
    }
    pub fn current(&self, channel: Channel) -> Option<f64> {
        self.current.map(|r| r.get(channel))
    }
    pub fn lamp(&self, channel: Channel) -> Lamp {
        self.lamps[channel.index()]
    }
    pub fn log_text(&self) -> &str {
        &self.log_text
    }
    pub fn chart_window(&self) -> usize {
        self.chart_window
    }
    pub fn chart_points(&self) -> Vec<[f64; 2]> {
        self.store.plot_points(self.selected, self.chart_window)
    }
}

// 固定节拍：每经过一个周期就该推进一次
pub struct TickClock {
    period: Duration,
    last: Instant,
}

impl TickClock {
    /// Longest backlog replayed after the UI was not polled for a while.
    pub const MAX_CATCH_UP: u32 = 5;

    pub fn new(period: Duration, now: Instant) -> Self {
        Self { period: period.max(Duration::from_millis(1)), last: now }
    }

    /// Number of whole periods that elapsed since the previous poll.
    pub fn poll(&mut self, now: Instant) -> u32 {
        let elapsed = now.saturating_duration_since(self.last);
        let due = elapsed.as_nanos() / self.period.as_nanos();
        if due > u128::from(Self::MAX_CATCH_UP) {
            self.last = now;
            return Self::MAX_CATCH_UP;
        }
        // due <= MAX_CATCH_UP here
        let due = due as u32;
        self.last += self.period * due;
        due
    }

    pub fn until_next(&self, now: Instant) -> Duration {
        (self.last + self.period).saturating_duration_since(now)
    }
}
