#[cfg(test)]
use std::collections::VecDeque;
use rand::{rngs::StdRng, Rng, SeedableRng};
use crate::types::{Channel, Frame, Readings, CHANNEL_COUNT};
/// Base sinusoid plus uniform jitter for one channel.
#[derive(Clone, Copy, Debug)]
pub struct ChannelProfile {
    pub center: f64,
    pub amplitude: f64,
    /// The base signal is `sin(tick / divisor)`, i.e. a period of `divisor * 2π` ticks.
    pub divisor: f64,
    pub noise: f64,
}
impl ChannelProfile {
    pub fn base(&self, tick: u64) -> f64 {
        self.center + self.amplitude * (tick as f64 / self.divisor).sin()
    }
    pub fn sample(&self, tick: u64, rng: &mut StdRng) -> f64 {
        let noise = if self.noise > 0.0 {
            rng.gen_range(-self.noise..=self.noise)
        } else {
            0.0
        };
        self.base(tick) + noise
    }
}
pub fn default_profile(channel: Channel) -> ChannelProfile {
    let (center, amplitude, divisor, noise) = match channel {
        Channel::Temperature => (70.0, 15.0, 15.0, 1.0),
        Channel::Vibration => (2.0, 1.5, 10.0, 0.5),
        Channel::Rpm => (1500.0, 350.0, 5.0, 50.0),
        Channel::Oil => (3.5, 0.8, 20.0, 0.2),
        Channel::Voltage => (400.0, 15.0, 30.0, 3.0),
    };
    ChannelProfile {
        center,
        amplitude,
        divisor,
        noise,
    }
}
/// Anything that can produce one multi-channel frame per tick.
pub trait SampleSource {
    /// Advance by one tick. `None` means the source has nothing left to give.
    fn next_frame(&mut self) -> Option<Frame>;
    /// Restart the tick counter so the next frame is tick 1.
    fn rewind(&mut self);
}
/// Simulated motor: five noisy sinusoids.
pub struct WaveformGenerator {
    tick: u64,
    rng: StdRng,
    profiles: [ChannelProfile; CHANNEL_COUNT],
}
impl WaveformGenerator {
    pub fn new(rng: StdRng) -> Self {
        Self {
            tick: 0,
            rng,
            profiles: Channel::ALL.map(default_profile),
        }
    }
    pub fn from_seed(seed: u64) -> Self {
        Self::new(StdRng::seed_from_u64(seed))
    }
    pub fn from_entropy() -> Self {
        Self::new(StdRng::from_entropy())
    }
    #[cfg(test)]
    pub fn profile(&self, channel: Channel) -> &ChannelProfile {
        &self.profiles[channel.index()]
    }
    pub fn advance(&mut self) -> Frame {
        self.tick += 1;
        let mut values = Readings::default();
        for channel in Channel::ALL {
            let value = self.profiles[channel.index()].sample(self.tick, &mut self.rng);
            values.set(channel, value);
        }
        Frame {
            tick: self.tick,
            values,
        }
    }
}
impl SampleSource for WaveformGenerator {
    fn next_frame(&mut self) -> Option<Frame> {
        Some(self.advance())
    }
    fn rewind(&mut self) {
        self.tick = 0;
    }
}
/// Scripted source for deterministic scenarios.
#[cfg(test)]
pub struct ManualSource {
    tick: u64,
    queue: VecDeque<Readings>,
}
#[cfg(test)]
impl ManualSource {
    pub fn new(readings: impl IntoIterator<Item = Readings>) -> Self {
        Self {
            tick: 0,
            queue: readings.into_iter().collect(),
        }
    }
    /// Nominal in-range readings with one channel overridden per tick.
    pub fn with_channel(channel: Channel, values: &[f64]) -> Self {
        let nominal = Readings::new([70.0, 2.0, 1500.0, 3.5, 400.0]);
        Self::new(values.iter().map(|&v| {
            let mut r = nominal;
            r.set(channel, v);
            r
        }))
    }
}
#[cfg(test)]
impl SampleSource for ManualSource {
    fn next_frame(&mut self) -> Option<Frame> {
        let values = self.queue.pop_front()?;
        self.tick += 1;
        Some(Frame {
            tick: self.tick,
            values,
        })
    }
    fn rewind(&mut self) {
        self.tick = 0;
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn ticks_increase_by_one() {
        let mut gen = WaveformGenerator::from_seed(7);
        for expected in 1..=5 {
            assert_eq!(gen.advance().tick, expected);
        }
        gen.rewind();
        assert_eq!(gen.advance().tick, 1);
    }
    #[test]
    fn samples_stay_within_noise_bound() {
        let mut gen = WaveformGenerator::from_seed(42);
        for _ in 0..500 {
            let frame = gen.advance();
            for (channel, value) in frame.values.iter() {
                let profile = gen.profile(channel);
                let base = profile.base(frame.tick);
                assert!(
                    (value - base).abs() <= profile.noise + 1e-9,
                    "{channel} at tick {} strayed: {value} vs {base}",
                    frame.tick
                );
            }
        }
    }
    #[test]
    fn same_seed_same_sequence() {
        let mut a = WaveformGenerator::from_seed(3);
        let mut b = WaveformGenerator::from_seed(3);
        for _ in 0..20 {
            assert_eq!(a.advance(), b.advance());
        }
    }
    #[test]
    fn base_signal_matches_table() {
        let rpm = default_profile(Channel::Rpm);
        let expected = 1500.0 + 350.0 * (10.0_f64 / 5.0).sin();
        assert!((rpm.base(10) - expected).abs() < 1e-9);
        let oil = default_profile(Channel::Oil);
        assert!((oil.base(0) - 3.5).abs() < 1e-12);
    }
    #[test]
    fn manual_source_drains() {
        let mut src = ManualSource::with_channel(Channel::Vibration, &[1.0, 4.0]);
        assert_eq!(src.next_frame().map(|f| f.values.get(Channel::Vibration)), Some(1.0));
        let second = src.next_frame().unwrap();
        assert_eq!(second.tick, 2);
        assert!(src.next_frame().is_none());
    }
}
