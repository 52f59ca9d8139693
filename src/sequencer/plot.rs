use std::io::Cursor;
use image::{DynamicImage, ImageBuffer, ImageFormat, Rgb};
use plotters::prelude::LineSeries;
use plotters::prelude::*;
use crate::sequencer::assemble::Sequence;
use crate::sequencer::error::SequenceError;
/// Lowest top edge of the voltage axis, in volts.
pub const MIN_VOLTAGE_AXIS: f64 = 25.0;
#[derive(Clone, Debug)]
pub struct PlotStyle {
    pub width: u32,
    pub height: u32,
    pub background: RGBColor,
    pub line: RGBColor,
    pub line_width: u32,
}
impl Default for PlotStyle {
    fn default() -> Self {
        Self {
            width: 1200,
            height: 500,
            background: RGBColor(10, 10, 10),
            // deepskyblue
            line: RGBColor(0, 191, 255),
            line_width: 3,
        }
    }
}
/// Renders voltage over time as a PNG.
pub fn render_profile_png(sequence: &Sequence, style: PlotStyle) -> Result<Vec<u8>, SequenceError> {
    if sequence.is_empty() {
        return Err(SequenceError::Plot("sequence has no samples".into()));
    }
    let mut buffer = vec![0u8; (style.width * style.height * 3) as usize];
    {
        let root = BitMapBackend::with_buffer(&mut buffer, (style.width, style.height))
            .into_drawing_area();
        root.fill(&style.background)?;
        let x_max = (sequence.duration_seconds() * 1.01).max(sequence.resolution);
        let y_max = (sequence.peak_voltage() * 1.05).max(MIN_VOLTAGE_AXIS);
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                "Selected Voltage Profile",
                ("sans-serif", 20).into_font().color(&WHITE),
            )
            .set_label_area_size(LabelAreaPosition::Left, 50)
            .set_label_area_size(LabelAreaPosition::Bottom, 40)
            .build_cartesian_2d(0f64..x_max, 0f64..y_max)?;
        chart
            .configure_mesh()
            .x_desc("Time (s)")
            .y_desc("Voltage (V)")
            .axis_desc_style(("sans-serif", 16).into_font().color(&WHITE))
            .label_style(("sans-serif", 14).into_font().color(&WHITE))
            .light_line_style(&WHITE.mix(0.1))
            .draw()?;
        let line = style.line.stroke_width(style.line_width);
        chart
            .draw_series(LineSeries::new(
                sequence.points().into_iter().map(|[t, v]| (t, v)),
                line,
            ))?
            .label("Voltage")
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], line));
        chart
            .configure_series_labels()
            .border_style(&WHITE.mix(0.2))
            .background_style(&style.background)
            .label_font(("sans-serif", 14).into_font().color(&WHITE))
            .draw()?;
        root.present()?;
    }
    encode_png(&buffer, style.width, style.height)
}
pub fn write_profile_png(
    sequence: &Sequence,
    style: PlotStyle,
    path: impl AsRef<std::path::Path>,
) -> Result<(), SequenceError> {
    let path = path.as_ref();
    let png = render_profile_png(sequence, style)?;
    std::fs::write(path, png)?;
    log::info!("wrote voltage profile plot to {}", path.display());
    Ok(())
}
fn encode_png(buffer: &[u8], width: u32, height: u32) -> Result<Vec<u8>, SequenceError> {
    let image = ImageBuffer::<Rgb<u8>, _>::from_raw(width, height, buffer.to_vec())
        .ok_or_else(|| SequenceError::Plot("failed to allocate image buffer".into()))?;
    let mut output = Vec::new();
    let dynamic = DynamicImage::ImageRgb8(image);
    dynamic.write_to(&mut Cursor::new(&mut output), ImageFormat::Png)?;
    Ok(output)
}
#[cfg(test)]
mod tests {
    use super::*;
    use crate::sequencer::assemble::SequenceAssembler;
    use crate::types::Step;
    #[test]
    fn profile_renders_to_png() {
        let seq = SequenceAssembler::new(0.1, 10_000)
            .unwrap()
            .assemble(&[Step::new(0.0, 5.0, 10.0), Step::new(5.0, 30.0, 2.0)], 1)
            .unwrap();
        let png = render_profile_png(&seq, PlotStyle::default()).unwrap();
        assert_eq!(&png[..8], b"\x89PNG\r\n\x1a\n");
    }
    #[test]
    fn empty_sequence_is_a_plot_error() {
        let seq = Sequence {
            resolution: 0.1,
            voltages: Vec::new(),
        };
        assert!(matches!(
            render_profile_png(&seq, PlotStyle::default()),
            Err(SequenceError::Plot(_))
        ));
    }
}
