use anyhow::Result;
use plotters::prelude::*;
use psyphy_lib::artefact::ArtefactDetection;
use psyphy_lib::plot::{figure_from_artefacts, Color as FigColor, Figure, PlotBackend, Series};
use std::path::{Path, PathBuf};

const PLOT_POINTS: usize = 4000;

/// Renders figures to a PNG bitmap.
pub struct PngBackend {
    pub path: PathBuf,
    pub size: (u32, u32),
}

impl PngBackend {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self {
            path: path.into(),
            size: (800, 480),
        }
    }
}

fn rgb(color: FigColor) -> RGBColor {
    let (r, g, b) = color.rgb();
    RGBColor(r, g, b)
}

impl PlotBackend for PngBackend {
    fn draw(&mut self, fig: &Figure) -> Result<()> {
        let ([x_min, x_max], [y_min, mut y_max]) = fig.bounds().unwrap_or(([0.0, 1.0], [0.0, 1.0]));
        if y_max - y_min < 1e-9 {
            y_max = y_min + 1.0;
        }
        let x_max = if x_max - x_min < 1e-9 { x_min + 1.0 } else { x_max };

        let root = BitMapBackend::new(&self.path, self.size).into_drawing_area();
        root.fill(&WHITE)?;
        let mut chart = ChartBuilder::on(&root)
            .margin(10)
            .caption(
                fig.title.clone().unwrap_or_else(|| "EDA".into()),
                ("sans-serif", 24),
            )
            .x_label_area_size(30)
            .y_label_area_size(40)
            .build_cartesian_2d(x_min..x_max, y_min..y_max)?;
        chart
            .configure_mesh()
            .x_desc(fig.x.label.clone().unwrap_or_default())
            .y_desc(fig.y.label.clone().unwrap_or_default())
            .draw()?;

        for series in &fig.series {
            match series {
                Series::Span(span) => {
                    let style = rgb(span.color).mix(span.opacity).filled();
                    chart.draw_series(span.spans.iter().map(|s| {
                        Rectangle::new([(s[0], y_min), (s[1], y_max)], style)
                    }))?;
                }
                Series::Line(line) => {
                    let style = rgb(line.style.color).stroke_width(line.style.width.round() as u32);
                    chart.draw_series(LineSeries::new(
                        line.points.iter().map(|p| (p[0], p[1])),
                        style,
                    ))?;
                }
            }
        }
        root.present()?;
        Ok(())
    }
}

/// Draw the quality-control figure of a detection run to `path`.
pub fn render_artefact_plot(det: &ArtefactDetection, title: &str, path: &Path) -> Result<()> {
    let fig = figure_from_artefacts(title, det, PLOT_POINTS);
    PngBackend::new(path).draw(&fig)
}
