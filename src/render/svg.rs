//! SVG drawing for [`Chart`] descriptions.

use std::error::Error;
use std::path::Path;

use plotters::coord::Shift;
use plotters::prelude::*;

use super::charts::{BarChart, Chart, ChartData, LineChart, Panel};

const CANVAS: (u32, u32) = (1280, 720);
const FONT: &str = "sans-serif";
const TITLE_SIZE: u32 = 32;
const PANEL_TITLE_SIZE: u32 = 22;

/// Share of a category slot covered by its bars.
const GROUP_WIDTH: f64 = 0.8;

type DrawResult = std::result::Result<(), Box<dyn Error>>;
type Area<'a> = DrawingArea<SVGBackend<'a>, Shift>;

/// How the value axis of a bar chart is bounded and labelled.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Scale {
    /// Whole-number counts
    Count,
    /// Fractional scores
    Score,
}

impl Scale {
    fn max(self, max: f64) -> f64 {
        match self {
            Scale::Count => axis_max(max),
            Scale::Score if max > 0.0 => max * 1.1,
            Scale::Score => 1.0,
        }
    }

    fn ticks(self, y_max: f64) -> usize {
        match self {
            Scale::Count => y_ticks(y_max),
            Scale::Score => 6,
        }
    }

    fn label(self, y: f64) -> String {
        match self {
            Scale::Count => format!("{y:.0}"),
            Scale::Score => format!("{y:.3}"),
        }
    }
}

/// Draws one chart into an SVG file at `path`.
pub fn draw(chart: &Chart, path: &Path) -> DrawResult {
    let root = SVGBackend::new(path, CANVAS).into_drawing_area();
    root.fill(&WHITE)?;

    match &chart.data {
        ChartData::Bars(bars) => {
            draw_bars(&root, (chart.title.as_str(), TITLE_SIZE), chart, bars, Scale::Count)?;
        }
        ChartData::Line(line) => draw_line(&root, chart, line)?,
        ChartData::Panels(panels) => draw_panels(&root, chart, panels)?,
    }

    root.present()?;
    Ok(())
}

fn draw_bars(
    root: &Area<'_>,
    (title, title_size): (&str, u32),
    chart: &Chart,
    bars: &BarChart,
    scale: Scale,
) -> DrawResult {
    let slots = bars.categories.len().max(1);
    let y_max = scale.max(bars.max_value());

    let mut ctx = ChartBuilder::on(root)
        .caption(title, (FONT, title_size))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d(-0.5f64..(slots as f64 - 0.5), 0f64..y_max)?;

    let x_formatter = |x: &f64| category_at(&bars.categories, *x);
    let y_formatter = |y: &f64| scale.label(*y);
    ctx.configure_mesh()
        .disable_x_mesh()
        .x_labels(slots)
        .y_labels(scale.ticks(y_max))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .axis_desc_style((FONT, 20))
        .draw()?;

    let width = GROUP_WIDTH / bars.series.len().max(1) as f64;
    for (index, series) in bars.series.iter().enumerate() {
        let color = Palette99::pick(index).to_rgba();
        let shift = -GROUP_WIDTH / 2.0 + width * index as f64;

        ctx.draw_series(series.values.iter().enumerate().map(|(slot, &value)| {
            let left = slot as f64 + shift;
            Rectangle::new([(left, 0.0), (left + width, value)], color.filled())
        }))?
        .label(series.name.as_str())
        .legend(move |(x, y)| Rectangle::new([(x, y - 6), (x + 12, y + 6)], color.filled()));
    }

    if bars.series.len() > 1 {
        ctx.configure_series_labels()
            .position(SeriesLabelPosition::UpperRight)
            .background_style(&WHITE.mix(0.85))
            .border_style(&BLACK)
            .label_font((FONT, 18))
            .draw()?;
    }

    Ok(())
}

/// Draws one small bar chart per panel under a shared title.
fn draw_panels(root: &Area<'_>, chart: &Chart, panels: &[Panel]) -> DrawResult {
    let body = root.titled(&chart.title, (FONT, f64::from(TITLE_SIZE)).into_font())?;
    if panels.is_empty() {
        return Ok(());
    }

    let cells = body.split_evenly(grid(panels.len()));
    for (cell, panel) in cells.iter().zip(panels) {
        draw_bars(
            cell,
            (panel.title.as_str(), PANEL_TITLE_SIZE),
            chart,
            &panel.bars,
            Scale::Score,
        )?;
    }
    Ok(())
}

/// Rows and columns for `n` panels: the most square grid whose row count
/// divides `n`, never more rows than columns.
fn grid(n: usize) -> (usize, usize) {
    let mut rows = (n as f64).sqrt().floor().max(1.0) as usize;
    while n % rows != 0 {
        rows -= 1;
    }
    (rows, n / rows)
}

fn draw_line(root: &Area<'_>, chart: &Chart, line: &LineChart) -> DrawResult {
    let span = line.points.last().map_or(0, |p| p.0).max(1) as f64;
    let y_max = axis_max(line.max_value());

    let mut ctx = ChartBuilder::on(root)
        .caption(&chart.title, (FONT, 32))
        .margin(20)
        .x_label_area_size(70)
        .y_label_area_size(80)
        .build_cartesian_2d(0f64..span, 0f64..y_max)?;

    let x_formatter = |x: &f64| {
        line.date_at(x.round().max(0.0) as u64)
            .map(|d| d.format("%Y-%m-%d").to_string())
            .unwrap_or_default()
    };
    let y_formatter = |y: &f64| format!("{y:.0}");
    ctx.configure_mesh()
        .x_labels(8)
        .y_labels(y_ticks(y_max))
        .x_label_formatter(&x_formatter)
        .y_label_formatter(&y_formatter)
        .x_desc(chart.x_label)
        .y_desc(chart.y_label)
        .axis_desc_style((FONT, 20))
        .draw()?;

    let color = Palette99::pick(0).to_rgba();
    ctx.draw_series(LineSeries::new(
        line.points.iter().map(|&(x, y)| (x as f64, y)),
        color.stroke_width(2),
    ))?;

    Ok(())
}

/// Label for an x position on a category axis; blank between slots.
fn category_at(categories: &[String], x: f64) -> String {
    let rounded = x.round();
    if rounded < 0.0 || (x - rounded).abs() > 1e-6 {
        return String::new();
    }
    categories.get(rounded as usize).cloned().unwrap_or_default()
}

/// Upper bound of a count axis, with headroom above the tallest value.
fn axis_max(max: f64) -> f64 {
    (max * 1.1).ceil().max(1.0)
}

/// Tick count that keeps labels on whole numbers.
fn y_ticks(y_max: f64) -> usize {
    (y_max as usize + 1).min(11)
}
