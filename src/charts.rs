use crate::classify::parse_stat_value;
use crate::record::Dataset;

pub const BAR_CHART_LIMIT: usize = 15;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ChartKind {
    Scatter,
    Bar,
    Line,
}

impl ChartKind {
    pub fn next(self) -> Self {
        match self {
            ChartKind::Scatter => ChartKind::Bar,
            ChartKind::Bar => ChartKind::Line,
            ChartKind::Line => ChartKind::Scatter,
        }
    }
}

pub fn chart_kind_label(kind: ChartKind) -> &'static str {
    match kind {
        ChartKind::Scatter => "Scatter Plot",
        ChartKind::Bar => "Bar Chart",
        ChartKind::Line => "Line Chart",
    }
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartPoint {
    pub name: String,
    pub x: f64,
    pub y: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct Extreme {
    pub name: String,
    pub value: f64,
}

#[derive(Debug, Clone, PartialEq)]
pub struct ChartSeries {
    pub kind: ChartKind,
    pub x_label: String,
    pub y_label: String,
    pub points: Vec<ChartPoint>,
    pub highest: Option<Extreme>,
    pub lowest: Option<Extreme>,
}

impl ChartSeries {
    pub fn title(&self) -> String {
        match self.kind {
            ChartKind::Scatter => format!("{} vs {}", self.x_label, self.y_label),
            ChartKind::Bar => format!("{} by Player", self.y_label),
            ChartKind::Line => format!("{} vs {} Trend", self.x_label, self.y_label),
        }
    }

    pub fn x_bounds(&self) -> [f64; 2] {
        bounds(self.points.iter().map(|p| p.x))
    }

    pub fn y_bounds(&self) -> [f64; 2] {
        bounds(self.points.iter().map(|p| p.y))
    }
}

/// Builds plot points for two metric columns in dataset order. Rows where either axis
/// is not numeric are dropped; the bar chart keeps only the first [`BAR_CHART_LIMIT`].
pub fn build_series(dataset: &Dataset, x_label: &str, y_label: &str, kind: ChartKind) -> ChartSeries {
    let identity = dataset.identity_column().ok();
    let mut points: Vec<ChartPoint> = dataset
        .records()
        .iter()
        .filter_map(|record| {
            let x = parse_stat_value(record.get(x_label)?)?;
            let y = parse_stat_value(record.get(y_label)?)?;
            let name = identity
                .and_then(|col| record.get(col))
                .map(str::trim)
                .filter(|name| !name.is_empty())
                .unwrap_or("Player")
                .to_string();
            Some(ChartPoint { name, x, y })
        })
        .collect();

    if kind == ChartKind::Bar {
        points.truncate(BAR_CHART_LIMIT);
    }

    // Ties go to the earliest row.
    let highest = extreme(&points, |candidate, best| candidate > best);
    let lowest = extreme(&points, |candidate, best| candidate < best);

    ChartSeries {
        kind,
        x_label: x_label.to_string(),
        y_label: y_label.to_string(),
        points,
        highest,
        lowest,
    }
}

fn extreme(points: &[ChartPoint], beats: impl Fn(f64, f64) -> bool) -> Option<Extreme> {
    let mut best: Option<&ChartPoint> = None;
    for point in points {
        match best {
            Some(current) if !beats(point.y, current.y) => {}
            _ => best = Some(point),
        }
    }
    best.map(|p| Extreme {
        name: p.name.clone(),
        value: p.y,
    })
}

fn bounds(values: impl Iterator<Item = f64>) -> [f64; 2] {
    let (lo, hi) = values.fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| {
        (lo.min(v), hi.max(v))
    });
    if !lo.is_finite() || !hi.is_finite() {
        return [0.0, 1.0];
    }
    if (hi - lo).abs() < f64::EPSILON {
        return [lo - 1.0, hi + 1.0];
    }
    [lo, hi]
}
