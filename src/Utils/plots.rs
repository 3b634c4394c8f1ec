use crate::datastructures::ordered_sequence::OrderedSequence;
use log::info;
use std::error::Error;
use std::path::PathBuf;
use strum_macros::{Display, EnumString};

/// Receiver of a finished sweep. Called exactly once per successful plot, with `xs` and `ys`
/// of equal length and index-aligned.
pub trait ScatterPlotRenderer {
    fn draw_scatter_plot(
        &mut self,
        title: &str,
        x_label: &str,
        y_label: &str,
        xs: &OrderedSequence<f64>,
        ys: &OrderedSequence<f64>,
    ) -> Result<(), Box<dyn Error>>;
}

/// which drawing library renders the scatter plot
#[derive(Clone, Copy, Debug, PartialEq, Eq, Display, EnumString)]
#[strum(serialize_all = "lowercase")]
pub enum PlotBackend {
    Plotters,
    Gnuplot,
    None,
}

/// builds the renderer for `backend` writing a `width` x `height` PNG to `output`
pub fn make_renderer(
    backend: PlotBackend,
    output: PathBuf,
    width: u32,
    height: u32,
) -> Box<dyn ScatterPlotRenderer> {
    match backend {
        PlotBackend::Plotters => Box::new(PlottersRenderer {
            output,
            width,
            height,
        }),
        PlotBackend::Gnuplot => Box::new(GnuplotRenderer {
            output,
            width,
            height,
        }),
        PlotBackend::None => Box::new(NullRenderer),
    }
}

/// finite (x, y) pairs; NaN and infinities cannot be placed on the chart
fn finite_points(xs: &OrderedSequence<f64>, ys: &OrderedSequence<f64>) -> Vec<(f64, f64)> {
    xs.iter()
        .zip(ys.iter())
        .filter(|(x, y)| x.is_finite() && y.is_finite())
        .map(|(&x, &y)| (x, y))
        .collect()
}

/// axis range with 5% padding; a degenerate range is widened by one unit each side
fn padded_range(values: impl Iterator<Item = f64>) -> Option<(f64, f64)> {
    let (min, max) = values.fold(None, |acc: Option<(f64, f64)>, v| match acc {
        None => Some((v, v)),
        Some((lo, hi)) => Some((lo.min(v), hi.max(v))),
    })?;
    if min == max {
        return Some((min - 1.0, max + 1.0));
    }
    let pad = (max - min) * 0.05;
    Some((min - pad, max + pad))
}

/// PNG scatter plot through plotters' bitmap backend
pub struct PlottersRenderer {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ScatterPlotRenderer for PlottersRenderer {
    fn draw_scatter_plot(
        &mut self,
        title: &str,
        x_label: &str,
        y_label: &str,
        xs: &OrderedSequence<f64>,
        ys: &OrderedSequence<f64>,
    ) -> Result<(), Box<dyn Error>> {
        use plotters::prelude::*;
        let points = finite_points(xs, ys);
        let (x_min, x_max) =
            padded_range(points.iter().map(|p| p.0)).ok_or("no finite samples to plot")?;
        let (y_min, y_max) = padded_range(points.iter().map(|p| p.1)).ok_or("no finite samples to plot")?;

        let root_area = BitMapBackend::new(&self.output, (self.width, self.height)).into_drawing_area();
        root_area.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root_area)
            .caption(title, ("sans-serif", 40))
            .margin(10)
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc(x_label)
            .y_desc(y_label)
            .draw()?;
        chart.draw_series(
            points
                .iter()
                .map(|&(x, y)| Circle::new((x, y), 3, BLUE.filled())),
        )?;
        root_area.present()?;
        info!("scatter plot saved to {}", self.output.display());
        Ok(())
    }
}

/// PNG scatter plot through gnuplot (needs the gnuplot executable)
pub struct GnuplotRenderer {
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
}

impl ScatterPlotRenderer for GnuplotRenderer {
    fn draw_scatter_plot(
        &mut self,
        title: &str,
        x_label: &str,
        y_label: &str,
        xs: &OrderedSequence<f64>,
        ys: &OrderedSequence<f64>,
    ) -> Result<(), Box<dyn Error>> {
        use gnuplot::{AxesCommon, Caption, Figure, PointSymbol};
        let mut fg = Figure::new();
        fg.axes2d()
            .set_title(title, &[])
            .set_x_label(x_label, &[])
            .set_y_label(y_label, &[])
            .points(
                xs.iter().copied(),
                ys.iter().copied(),
                &[Caption(y_label), PointSymbol('O')],
            );
        fg.save_to_png(&self.output, self.width, self.height)?;
        info!("scatter plot saved to {}", self.output.display());
        Ok(())
    }
}

/// discards the samples
pub struct NullRenderer;

impl ScatterPlotRenderer for NullRenderer {
    fn draw_scatter_plot(
        &mut self,
        _title: &str,
        _x_label: &str,
        _y_label: &str,
        _xs: &OrderedSequence<f64>,
        _ys: &OrderedSequence<f64>,
    ) -> Result<(), Box<dyn Error>> {
        Ok(())
    }
}

/// arguments of one `draw_scatter_plot` call
#[derive(Clone, Debug, PartialEq)]
pub struct RecordedPlot {
    pub title: String,
    pub x_label: String,
    pub y_label: String,
    pub xs: Vec<f64>,
    pub ys: Vec<f64>,
}

/// keeps the last plot it was asked to draw
#[derive(Clone, Debug, Default)]
pub struct RecordingRenderer {
    pub calls: usize,
    pub last: Option<RecordedPlot>,
    failure: Option<String>,
}

impl RecordingRenderer {
    pub fn new() -> Self {
        Self::default()
    }

    /// a renderer that refuses every plot with `message`
    pub fn failing(message: &str) -> Self {
        RecordingRenderer {
            failure: Some(message.to_string()),
            ..Self::default()
        }
    }
}

impl ScatterPlotRenderer for RecordingRenderer {
    fn draw_scatter_plot(
        &mut self,
        title: &str,
        x_label: &str,
        y_label: &str,
        xs: &OrderedSequence<f64>,
        ys: &OrderedSequence<f64>,
    ) -> Result<(), Box<dyn Error>> {
        if let Some(message) = &self.failure {
            return Err(message.clone().into());
        }
        self.calls += 1;
        self.last = Some(RecordedPlot {
            title: title.to_string(),
            x_label: x_label.to_string(),
            y_label: y_label.to_string(),
            xs: xs.iter().copied().collect(),
            ys: ys.iter().copied().collect(),
        });
        Ok(())
    }
}
