use crate::types::{Channel, CHANNEL_COUNT};
/// Static alarm bounds of one channel. A missing bound never trips.
#[derive(Clone, Copy, Debug, Default, PartialEq)]
pub struct Limits {
    pub lower: Option<f64>,
    pub upper: Option<f64>,
}
impl Limits {
    pub fn upper(upper: f64) -> Self {
        Self {
            lower: None,
            upper: Some(upper),
        }
    }
    pub fn lower(lower: f64) -> Self {
        Self {
            lower: Some(lower),
            upper: None,
        }
    }
    pub fn is_violated(&self, value: f64) -> bool {
        self.upper.is_some_and(|u| value > u) || self.lower.is_some_and(|l| value < l)
    }
}
pub fn default_limits(channel: Channel) -> Limits {
    match channel {
        Channel::Temperature => Limits::upper(90.0),
        Channel::Vibration => Limits::upper(3.0),
        Channel::Rpm => Limits::upper(3000.0),
        Channel::Oil => Limits::lower(1.5),
        Channel::Voltage => Limits::upper(420.0),
    }
}
/// Channels currently latched in alarm.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct AlarmSet([bool; CHANNEL_COUNT]);
impl AlarmSet {
    pub fn contains(&self, channel: Channel) -> bool {
        self.0[channel.index()]
    }
    /// Returns `true` if the channel was not latched before.
    pub fn insert(&mut self, channel: Channel) -> bool {
        !std::mem::replace(&mut self.0[channel.index()], true)
    }
    pub fn clear(&mut self) {
        self.0 = [false; CHANNEL_COUNT];
    }
    pub fn is_empty(&self) -> bool {
        !self.0.iter().any(|&b| b)
    }
    pub fn iter(&self) -> impl Iterator<Item = Channel> + '_ {
        Channel::ALL.into_iter().filter(move |c| self.contains(*c))
    }
}
/// Result of checking one sample.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct Evaluation {
    pub violated: bool,
    /// Set only on the sample that moved the channel into the latched set.
    pub newly_latched: bool,
}
pub struct AlarmEvaluator {
    limits: [Limits; CHANNEL_COUNT],
    latched: AlarmSet,
}
impl Default for AlarmEvaluator {
    fn default() -> Self {
        Self::new(Channel::ALL.map(default_limits))
    }
}
impl AlarmEvaluator {
    pub fn new(limits: [Limits; CHANNEL_COUNT]) -> Self {
        Self {
            limits,
            latched: AlarmSet::default(),
        }
    }
    pub fn evaluate(&mut self, channel: Channel, value: f64) -> Evaluation {
        let violated = self.limits[channel.index()].is_violated(value);
        let newly_latched = violated && self.latched.insert(channel);
        Evaluation {
            violated,
            newly_latched,
        }
    }
    pub fn is_latched(&self, channel: Channel) -> bool {
        self.latched.contains(channel)
    }
    pub fn latched(&self) -> &AlarmSet {
        &self.latched
    }
    pub fn reset(&mut self) {
        self.latched.clear();
    }
}
#[cfg(test)]
mod tests {
    use super::*;
    #[test]
    fn upper_bound_is_strict() {
        let limits = Limits::upper(3.0);
        assert!(!limits.is_violated(3.0));
        assert!(limits.is_violated(3.0001));
        assert!(!limits.is_violated(-100.0));
    }
    #[test]
    fn lower_bound_is_strict() {
        let limits = Limits::lower(1.5);
        assert!(!limits.is_violated(1.5));
        assert!(limits.is_violated(1.49));
        assert!(!limits.is_violated(1e9));
    }
    #[test]
    fn latch_fires_once_until_reset() {
        let mut eval = AlarmEvaluator::default();
        let first = eval.evaluate(Channel::Vibration, 4.0);
        assert_eq!(first, Evaluation { violated: true, newly_latched: true });
        let second = eval.evaluate(Channel::Vibration, 5.0);
        assert_eq!(second, Evaluation { violated: true, newly_latched: false });
        // back in range, still latched
        assert!(!eval.evaluate(Channel::Vibration, 1.0).violated);
        assert!(eval.is_latched(Channel::Vibration));
        eval.reset();
        assert!(eval.latched().is_empty());
        assert!(eval.evaluate(Channel::Vibration, 4.0).newly_latched);
    }
    #[test]
    fn oil_alarms_low() {
        let mut eval = AlarmEvaluator::default();
        assert!(eval.evaluate(Channel::Oil, 1.2).violated);
        assert!(!eval.evaluate(Channel::Temperature, 89.9).violated);
        assert_eq!(eval.latched().iter().collect::<Vec<_>>(), vec![Channel::Oil]);
    }
}
