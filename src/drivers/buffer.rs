use crate::types::{Channel, Readings, CHANNEL_COUNT};
/// Append-only history of every channel plus the shared tick axis.
///
/// All series always have the same length as `ticks`.
#[derive(Debug, Default)]
pub struct SeriesStore {
    ticks: Vec<u64>,
    per_channel: [Vec<f64>; CHANNEL_COUNT], // channel -> samples
}
impl SeriesStore {
    pub fn new() -> Self {
        Self::default()
    }
    pub fn reset(&mut self) {
        self.ticks.clear();
        for series in &mut self.per_channel {
            series.clear();
        }
    }
    pub fn append(&mut self, tick: u64, values: &Readings) {
        self.ticks.push(tick);
        for (channel, value) in values.iter() {
            self.per_channel[channel.index()].push(value);
        }
    }
    pub fn len(&self) -> usize {
        self.ticks.len()
    }
    pub fn is_empty(&self) -> bool {
        self.ticks.is_empty()
    }
    pub fn ticks(&self) -> &[u64] {
        &self.ticks
    }
    #[cfg(test)]
    pub fn latest(&self, channel: Channel) -> Option<f64> {
        self.per_channel[channel.index()].last().copied()
    }
    /// Last `n` (tick, value) pairs in chronological order.
    pub fn window(&self, channel: Channel, n: usize) -> Vec<(u64, f64)> {
        let start = self.ticks.len().saturating_sub(n);
        self.ticks[start..]
            .iter()
            .copied()
            .zip(self.per_channel[channel.index()][start..].iter().copied())
            .collect()
    }
    /// Same as [`window`](Self::window), shaped for `egui_plot`.
    pub fn plot_points(&self, channel: Channel, n: usize) -> Vec<[f64; 2]> {
        self.window(channel, n)
            .into_iter()
            .map(|(t, v)| [t as f64, v])
            .collect()
    }
}
