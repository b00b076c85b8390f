//! Backend-independent figure description. Rendering lives with the batch
//! runner, which implements [`PlotBackend`].

use serde::{Deserialize, Serialize};

use crate::artefact::{ArtefactDetection, Label};

/// Shift applied to the filtered trace so it lines up with the raw one (s).
pub const FILTER_DELAY_S: f64 = 0.625;

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Axis {
    pub label: Option<String>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Style {
    pub width: f32,
    pub dash: Option<[f32; 2]>,
    pub color: Color,
}

/// `0xRRGGBB`
#[derive(Debug, Copy, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Color(pub u32);

impl Color {
    pub const RED: Color = Color(0xD62728);
    pub const GREY: Color = Color(0x9E9E9E);

    pub fn rgb(self) -> (u8, u8, u8) {
        (
            ((self.0 >> 16) & 0xFF) as u8,
            ((self.0 >> 8) & 0xFF) as u8,
            (self.0 & 0xFF) as u8,
        )
    }
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct LineSeries {
    pub name: String,
    pub points: Vec<[f64; 2]>,
    pub style: Style,
}

/// Shaded x-ranges drawn behind the lines.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SpanSeries {
    pub name: String,
    pub spans: Vec<[f64; 2]>,
    pub color: Color,
    pub opacity: f64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub enum Series {
    Line(LineSeries),
    Span(SpanSeries),
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Figure {
    pub title: Option<String>,
    pub x: Axis,
    pub y: Axis,
    pub series: Vec<Series>,
}

impl Figure {
    pub fn new(title: impl Into<Option<String>>) -> Self {
        Self {
            title: title.into(),
            x: Axis { label: None },
            y: Axis { label: None },
            series: Vec::new(),
        }
    }

    pub fn add_series(&mut self, series: Series) {
        self.series.push(series);
    }

    /// Combined `(x, y)` extent of all line series.
    pub fn bounds(&self) -> Option<([f64; 2], [f64; 2])> {
        let mut points = self.series.iter().flat_map(|s| match s {
            Series::Line(l) => l.points.as_slice(),
            Series::Span(_) => &[][..],
        });
        let first = points.next()?;
        let init = ([first[0], first[0]], [first[1], first[1]]);
        Some(points.fold(init, |(x, y), p| {
            ([x[0].min(p[0]), x[1].max(p[0])], [y[0].min(p[1]), y[1].max(p[1])])
        }))
    }
}

pub trait PlotBackend {
    fn draw(&mut self, fig: &Figure) -> anyhow::Result<()>;
}

pub fn decimate_points(points: &[[f64; 2]], max_points: usize) -> Vec<[f64; 2]> {
    if points.len() <= max_points {
        return points.to_vec();
    }
    let bucket_size = points.len() as f64 / max_points as f64;
    let mut result = Vec::with_capacity(max_points);
    for i in 0..max_points {
        let start = (i as f64 * bucket_size).floor() as usize;
        if start >= points.len() {
            break;
        }
        result.push(points[start]);
    }
    result
}

/// Merge consecutive epochs carrying `want` into `[start, end]` spans (minutes).
fn label_spans(det: &ArtefactDetection, want: Label) -> Vec<[f64; 2]> {
    let mut spans: Vec<[f64; 2]> = Vec::new();
    for l in det.labels.iter().filter(|l| l.label == want) {
        let (s, e) = (l.start / 60.0, l.end / 60.0);
        match spans.last_mut() {
            Some(last) if (last[1] - s).abs() < 1e-9 => last[1] = e,
            _ => spans.push([s, e]),
        }
    }
    spans
}

/// Quality-control figure: raw and filtered EDA over artefact (red) and
/// questionable (grey) epochs, time in minutes.
pub fn figure_from_artefacts(title: &str, det: &ArtefactDetection, max_points: usize) -> Figure {
    let eda = &det.processed.eda;
    let raw: Vec<[f64; 2]> = eda.samples().map(|s| [s.t / 60.0, s.value]).collect();
    let filtered: Vec<[f64; 2]> = det
        .processed
        .filtered
        .iter()
        .enumerate()
        .map(|(i, v)| [(eda.time_at(i) - FILTER_DELAY_S) / 60.0, *v])
        .collect();

    let mut fig = Figure::new(Some(title.to_string()));
    fig.x.label = Some("Time (min)".into());
    fig.y.label = Some("EDA (µS)".into());
    fig.add_series(Series::Span(SpanSeries {
        name: "artefact".into(),
        spans: label_spans(det, Label::Artefact),
        color: Color::RED,
        opacity: 0.35,
    }));
    fig.add_series(Series::Span(SpanSeries {
        name: "questionable".into(),
        spans: label_spans(det, Label::Questionable),
        color: Color::GREY,
        opacity: 0.35,
    }));
    fig.add_series(Series::Line(LineSeries {
        name: "raw".into(),
        points: decimate_points(&raw, max_points),
        style: Style {
            width: 1.4,
            dash: None,
            color: Color(0x1F77B4),
        },
    }));
    fig.add_series(Series::Line(LineSeries {
        name: "filtered".into(),
        points: decimate_points(&filtered, max_points),
        style: Style {
            width: 1.0,
            dash: Some([4.0, 2.0]),
            color: Color(0xFF7F0E),
        },
    }));
    fig
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::artefact::{detect_artefacts, DetectorConfig};
    use crate::signal::TimeSeries;

    #[test]
    fn decimation_caps_point_count() {
        let points: Vec<[f64; 2]> = (0..1000).map(|i| [i as f64, 0.0]).collect();
        assert_eq!(decimate_points(&points, 100).len(), 100);
        assert_eq!(decimate_points(&points[..10], 100).len(), 10);
    }

    #[test]
    fn artefact_figure_shades_first_epoch() {
        let ts = TimeSeries::new(8.0, 0.0, vec![2.0; 400]);
        let det = detect_artefacts(&ts, &DetectorConfig::default()).unwrap();
        let fig = figure_from_artefacts("P01 all", &det, 2000);
        assert_eq!(fig.series.len(), 4);
        match &fig.series[0] {
            Series::Span(s) => {
                assert_eq!(s.spans.len(), 1);
                assert!((s.spans[0][1] - 5.0 / 60.0).abs() < 1e-12);
            }
            other => panic!("expected spans, got {other:?}"),
        }
        match &fig.series[3] {
            Series::Line(l) => assert!((l.points[0][0] + FILTER_DELAY_S / 60.0).abs() < 1e-12),
            other => panic!("expected line, got {other:?}"),
        }
        let (x, y) = fig.bounds().unwrap();
        assert!(x[0] < 0.0 && x[1] > 0.8);
        assert!(y[0] >= 0.0 && y[1] >= 2.0);
    }

    #[test]
    fn color_components() {
        assert_eq!(Color(0x102030).rgb(), (0x10, 0x20, 0x30));
    }
}
