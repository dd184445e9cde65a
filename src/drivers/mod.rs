// src/drivers/mod.rs
// 仿真、存储、报警判定与绘图导出
pub mod alarm;
pub mod buffer;
pub mod error;
pub mod plot;
pub mod source;
pub use alarm::AlarmEvaluator;
pub use buffer::SeriesStore;
pub use error::MonitorError;
pub use plot::{render_series_png, PlotStyle};
pub use source::{SampleSource, WaveformGenerator};
