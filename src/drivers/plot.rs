use image::codecs::png::PngEncoder;
use image::{ExtendedColorType, ImageEncoder};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::drivers::error::MonitorError;
use crate::types::Channel;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub line: RGBColor,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 900,
            height: 400,
            background: RGBColor(30, 30, 30),
            line: CYAN,
        }
    }
}
/// Render one channel's (tick, value) window as a PNG.
pub fn render_series_png(
    channel: Channel,
    points: &[(u64, f64)],
    style: &PlotStyle,
) -> Result<Vec<u8>, MonitorError> {
    let (Some(first), Some(last)) = (points.first(), points.last()) else {
        return Err(MonitorError::EmptyWindow(channel.key().to_owned()));
    };
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let (y_min, y_max) = points
            .iter()
            .fold((f64::MAX, f64::MIN), |(lo, hi), &(_, v)| (lo.min(v), hi.max(v)));
        // flat line or single point: give the axis some height
        let pad = ((y_max - y_min) * 0.1).max(1.0);
        let x_range = first.0 as f64..(last.0 as f64).max(first.0 as f64 + 1.0);
        let caption = format!("{} ({})", channel.label(), channel.unit());
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(caption, ("sans-serif", 20).into_font().color(&WHITE))
            .set_label_area_size(LabelAreaPosition::Left, 55)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(x_range, (y_min - pad)..(y_max + pad))?;
        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        chart.draw_series(LineSeries::new(
            points.iter().map(|&(t, v)| (t as f64, v)),
            &style.line,
        ))?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
/// `buffer` is the RGB8 frame the bitmap backend drew into.
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, MonitorError> {
    let mut png = Vec::with_capacity(buffer.len() / 4);
    PngEncoder::new(&mut png).write_image(buffer, width, height, ExtendedColorType::Rgb8)?;
    Ok(png)
}
