use std::fmt::Display;

use chrono_tz::Tz;
use plotters::prelude::*;

use super::axis::DayAxis;
use super::font::ensure_font;
use super::series::ChartData;
use super::RenderError;
use crate::settings::config_model::ChartConfig;

/// Plot area colour of the classic "darkgrid" style.
const DARKGRID: RGBColor = RGBColor(234, 234, 242);
const MARKER_SIZE: i32 = 6;

fn draw_err<E: Display>(err: E) -> RenderError {
    RenderError::Drawing(err.to_string())
}

fn up_triangle(size: i32) -> Vec<(i32, i32)> {
    vec![(0, -size), (-size, size), (size, size)]
}

fn down_triangle(size: i32) -> Vec<(i32, i32)> {
    vec![(-size, -size), (size, -size), (0, size)]
}

/// Draws imbalance and activations on one time axis and writes the PNG to `chart.output_file`.
pub fn render_chart(data: &ChartData, chart: &ChartConfig, tz: &Tz) -> Result<(), RenderError> {
    let bounds = data.bounds().ok_or(RenderError::NoData)?;
    ensure_font(chart.font_path.as_deref())?;

    let x_axis = DayAxis::new(bounds.x.clone(), *tz);
    debug!("Drawing {} day ticks", x_axis.ticks().len());

    let root = BitMapBackend::new(&chart.output_file, (chart.width, chart.height)).into_drawing_area();
    root.fill(&WHITE).map_err(draw_err)?;

    let mut ctx = ChartBuilder::on(&root)
        .caption(&chart.title, ("sans-serif", 44))
        .margin(30)
        .x_label_area_size(170)
        .y_label_area_size(110)
        .build_cartesian_2d(x_axis, bounds.y.clone())
        .map_err(draw_err)?;

    ctx.plotting_area().fill(&DARKGRID).map_err(draw_err)?;

    ctx.configure_mesh()
        .bold_line_style(WHITE.stroke_width(2))
        .light_line_style(WHITE.mix(0.5))
        .axis_style(WHITE)
        .x_label_style(("sans-serif", 24).into_font().transform(FontTransform::Rotate90))
        .y_label_style(("sans-serif", 24))
        .x_desc("Timestamp")
        .y_desc("Energy (MWh)")
        .axis_desc_style(("sans-serif", 30))
        .draw()
        .map_err(draw_err)?;

    let lines = [
        (&data.imbalance, BLACK.stroke_width(3)),
        (&data.upward, BLUE.mix(0.5).stroke_width(3)),
        (&data.downward, RED.mix(0.5).stroke_width(3)),
    ];
    for (series, style) in lines {
        for (index, segment) in series.segments.iter().enumerate() {
            let drawn = ctx
                .draw_series(LineSeries::new(segment.iter().copied(), style))
                .map_err(draw_err)?;

            // One legend entry per series, not per segment
            if index == 0 {
                drawn
                    .label(series.label.as_str())
                    .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], style));
            }
        }
    }

    ctx.draw_series(PointSeries::of_element(
        data.upward.markers.iter().copied(),
        MARKER_SIZE,
        BLUE.mix(0.7).filled(),
        &|coord, size, style| EmptyElement::at(coord) + Polygon::new(up_triangle(size), style),
    ))
    .map_err(draw_err)?;

    ctx.draw_series(PointSeries::of_element(
        data.downward.markers.iter().copied(),
        MARKER_SIZE,
        RED.mix(0.7).filled(),
        &|coord, size, style| EmptyElement::at(coord) + Polygon::new(down_triangle(size), style),
    ))
    .map_err(draw_err)?;

    ctx.configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE.mix(0.8).filled())
        .border_style(BLACK.mix(0.3))
        .label_font(("sans-serif", 20))
        .draw()
        .map_err(draw_err)?;

    root.present().map_err(draw_err)?;

    Ok(())
}
