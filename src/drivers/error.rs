use std::path::PathBuf;
use thiserror::Error;
#[derive(Debug, Error)]
pub enum MonitorError {
    #[error("failed to {action} alarm log {path}: {source}")]
    Log {
        action: &'static str,
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("no samples to plot for {0}")]
    EmptyWindow(String),
    #[error("failed to render plot: {0}")]
    Plot(String),
    #[error("failed to encode chart png")]
    Png(#[from] image::ImageError),
}
impl MonitorError {
    pub(crate) fn log(action: &'static str, path: impl Into<PathBuf>, source: std::io::Error) -> Self {
        MonitorError::Log {
            action,
            path: path.into(),
            source,
        }
    }
}
// generic over the backend error, so `#[from]` cannot express it
impl<E> From<plotters::drawing::DrawingAreaErrorKind<E>> for MonitorError
where
    E: std::error::Error + Send + Sync + 'static,
{
    fn from(err: plotters::drawing::DrawingAreaErrorKind<E>) -> Self {
        MonitorError::Plot(err.to_string())
    }
}
