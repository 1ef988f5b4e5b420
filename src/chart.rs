//! Chart composition: one quantity group of one case, one line per method.
//!
//! The chart is drawn once with the plotters SVG backend into an in-memory
//! document. That document is the only rendering of the chart; the exporter
//! derives every artifact from it. The canvas background is left transparent
//! so the exporter can find the tight box around what was actually drawn.

use plotters::prelude::*;
use plotters::style::text_anchor::{HPos, Pos, VPos};

use crate::config::ChartConfig;
use crate::error::PlotError;
use crate::groups::{method_of, QuantityGroup};
use crate::style::{LineDash, MethodStyle, StyleMap};
use crate::table::TimeTable;
use crate::ticks::Ticks;
use crate::{finite_runs, min_and_max};

/// A composed chart, ready for export.
#[derive(Debug, Clone, PartialEq)]
pub struct Chart {
    pub case_id: String,
    pub group: String,
    /// Legend labels of the drawn series, in drawing order
    pub series: Vec<String>,
    pub y_range: (f64, f64),
    svg: String,
    canvas: (u32, u32),
}

impl Chart {
    /// The chart as an SVG document, in points, on a transparent canvas.
    pub fn svg(&self) -> &str {
        &self.svg
    }

    /// Size of the canvas in points.
    pub fn size(&self) -> (u32, u32) {
        self.canvas
    }
}

/// Composes the chart of `group` for one case.
///
/// `available` are the group's columns present in `table` (see
/// [`resolve_group`](crate::groups::resolve_group)); each becomes a series
/// labelled with its method and styled by `styles`.
pub fn compose_chart(
    case_id: &str,
    table: &TimeTable,
    group: &QuantityGroup,
    available: &[String],
    styles: &StyleMap,
    config: &ChartConfig,
) -> Result<Chart, PlotError> {
    let series: Vec<Series> = available
        .iter()
        .map(|column| {
            let values = table.column(column).ok_or_else(|| {
                PlotError::Render(format!("case {}: column {} not in table", case_id, column))
            })?;
            let method = method_of(column);
            Ok(Series {
                label: method.to_string(),
                runs: finite_runs(&table.time, values),
                style: styles.style_for(method),
            })
        })
        .collect::<Result<_, PlotError>>()?;

    let y_range = y_range(&series, config.y_margin);
    let title = format!("Case {} - {}", case_id, group.label);

    let mut svg = String::new();
    draw_chart(&mut svg, &title, &group.label, &series, y_range, config)
        .map_err(|e| PlotError::Render(format!("case {} group {}: {}", case_id, group.name, e)))?;

    Ok(Chart {
        case_id: case_id.to_string(),
        group: group.name.clone(),
        series: series.into_iter().map(|s| s.label).collect(),
        y_range,
        svg,
        canvas: (config.width, config.height),
    })
}

struct Series {
    label: String,
    runs: Vec<Vec<(f64, f64)>>,
    style: MethodStyle,
}

/// Y range of the finite data, padded by `margin` of the span on each side.
fn y_range(series: &[Series], margin: f64) -> (f64, f64) {
    let values: Vec<f64> = series
        .iter()
        .flat_map(|s| s.runs.iter().flatten().map(|(_, y)| *y))
        .collect();
    match min_and_max(&values) {
        None => (0., 1.),
        Some((min, max)) if max > min => {
            let pad = (max - min) * margin;
            (min - pad, max + pad)
        }
        Some((v, _)) => {
            let pad = (v.abs() * margin).max(0.5);
            (v - pad, v + pad)
        }
    }
}

fn draw_chart(
    svg: &mut String,
    title: &str,
    y_label: &str,
    series: &[Series],
    (y_min, y_max): (f64, f64),
    config: &ChartConfig,
) -> Result<(), Box<dyn std::error::Error>> {
    let family = config.font_family.as_str();

    let root = SVGBackend::with_string(svg, (config.width, config.height)).into_drawing_area();
    let mut chart = ChartBuilder::on(&root)
        .caption(title, (family, config.title_size))
        .margin(10)
        .x_label_area_size(40)
        .y_label_area_size(60)
        .build_cartesian_2d(0f64..config.x_max, y_min..y_max)?;

    chart
        .configure_mesh()
        .disable_mesh()
        .axis_style(BLACK.stroke_width(config.axis_width))
        // negative size puts the tick marks inside the plotting area
        .set_all_tick_mark_size(-config.tick_length)
        // X ticks sit on the fixed interval, drawn below
        .x_labels(0)
        .y_labels(8)
        .label_style((family, config.tick_label_size))
        .axis_desc_style((family, config.label_size))
        .x_desc(config.x_label.as_str())
        .y_desc(y_label)
        .draw()?;

    let tick_style = BLACK.stroke_width(config.axis_width);
    let label_style =
        TextStyle::from((family, config.tick_label_size)).pos(Pos::new(HPos::Center, VPos::Top));
    for x in Ticks::new(0., config.x_max, config.x_interval) {
        let (px, py) = chart.backend_coord(&(x, y_min));
        root.draw(&PathElement::new(
            vec![(px, py), (px, py - config.tick_length)],
            tick_style,
        ))?;
        root.draw(&Text::new(
            format!("{}", x),
            (px, py + config.tick_length),
            label_style.clone(),
        ))?;
    }

    // closes the frame on the top and right sides
    chart.plotting_area().draw(&Rectangle::new(
        [(0., y_min), (config.x_max, y_max)],
        BLACK.stroke_width(config.axis_width),
    ))?;

    for s in series {
        let color = s.style.color.mix(config.series_opacity);
        let shape = color.stroke_width(config.line_width);
        let anno = match s.style.dash {
            LineDash::Solid => chart.draw_series(
                s.runs
                    .iter()
                    .map(|run| PathElement::new(run.clone(), shape)),
            )?,
            LineDash::Dashed => chart.draw_series(
                s.runs
                    .iter()
                    .flat_map(|run| DashedLineSeries::new(run.clone().into_iter(), 6, 4, shape)),
            )?,
        };
        anno.label(s.label.as_str())
            .legend(move |(x, y)| PathElement::new(vec![(x, y), (x + 20, y)], shape));
    }

    chart
        .configure_series_labels()
        .position(SeriesLabelPosition::UpperRight)
        .background_style(WHITE)
        .border_style(BLACK.stroke_width(config.axis_width))
        .label_font((family, config.legend_size))
        .draw()?;

    root.present()?;
    Ok(())
}
