// Chart models built from the statistics snapshot.
//
// Each chart lives in a handle; drawing a chart disposes the previous handle
// and installs a new one.

pub mod series;

use chrono::NaiveDate;

use crate::config::ChartsConfig;
use crate::models::StatsSnapshot;

pub use series::{day_month_label, frequency_counts, max_weight_per_day, DateCount, ProgressPoint};

/// Bar chart: workouts per day over the trailing window
#[derive(Debug, Clone, PartialEq)]
pub struct FrequencyChart {
    pub label: String,
    pub bars: Vec<DateCount>,
}

impl FrequencyChart {
    pub fn labels(&self) -> Vec<String> {
        self.bars.iter().map(|b| day_month_label(&b.date)).collect()
    }

    pub fn max_count(&self) -> u64 {
        self.bars.iter().map(|b| b.count).max().unwrap_or(0)
    }
}

/// Line chart: heaviest weight per day for one exercise
#[derive(Debug, Clone, PartialEq)]
pub enum ProgressionChart {
    /// Axes only; nothing selected or no data for the selection
    Empty,
    Series {
        exercise: String,
        label: String,
        unit: String,
        points: Vec<ProgressPoint>,
    },
}

impl ProgressionChart {
    pub fn points(&self) -> &[ProgressPoint] {
        match self {
            ProgressionChart::Empty => &[],
            ProgressionChart::Series { points, .. } => points,
        }
    }

    pub fn labels(&self) -> Vec<String> {
        self.points().iter().map(|p| day_month_label(&p.date)).collect()
    }

    /// Heading such as `Max weight (kg) - Squat`
    pub fn title(&self) -> Option<String> {
        match self {
            ProgressionChart::Empty => None,
            ProgressionChart::Series {
                exercise, label, ..
            } => Some(format!("{} - {}", label, exercise)),
        }
    }

    /// Tooltip text for the point at `index`, e.g. `60 kg`
    pub fn tooltip(&self, index: usize) -> Option<String> {
        match self {
            ProgressionChart::Empty => None,
            ProgressionChart::Series { unit, points, .. } => points
                .get(index)
                .map(|p| format!("{} {}", p.weight, unit)),
        }
    }

    /// Y range padded around the data; the axis does not start at zero
    pub fn y_bounds(&self) -> [f64; 2] {
        let points = self.points();
        if points.is_empty() {
            return [0.0, 1.0];
        }

        let min = points.iter().map(|p| p.weight).fold(f64::INFINITY, f64::min);
        let max = points.iter().map(|p| p.weight).fold(f64::NEG_INFINITY, f64::max);
        let pad = ((max - min) * 0.1).max(1.0);

        [(min - pad).max(0.0), max + pad]
    }
}

/// A drawn chart. `id` changes every time the chart is rebuilt.
#[derive(Debug, Clone, PartialEq)]
pub struct ChartHandle<T> {
    pub id: u64,
    pub chart: T,
}

/// The two chart slots of the dashboard
#[derive(Debug, Default)]
pub struct Charts {
    frequency: Option<ChartHandle<FrequencyChart>>,
    progression: Option<ChartHandle<ProgressionChart>>,
    next_id: u64,
    disposed: u64,
}

impl Charts {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn frequency(&self) -> Option<&ChartHandle<FrequencyChart>> {
        self.frequency.as_ref()
    }

    pub fn progression(&self) -> Option<&ChartHandle<ProgressionChart>> {
        self.progression.as_ref()
    }

    /// How many chart instances have been torn down so far
    pub fn disposed(&self) -> u64 {
        self.disposed
    }

    /// Rebuild both charts. Does nothing until a snapshot has been loaded.
    pub fn draw_all(
        &mut self,
        stats: Option<&StatsSnapshot>,
        selected: Option<&str>,
        today: NaiveDate,
        config: &ChartsConfig,
    ) {
        let Some(stats) = stats else {
            return;
        };

        let previous = self.frequency.take();
        let id = self.allocate_id();
        self.frequency = Some(render_frequency(
            previous,
            id,
            stats,
            today,
            config.frequency_window_days,
            &mut self.disposed,
        ));

        self.update_progression(Some(stats), selected, config);
    }

    /// Rebuild only the progression chart, e.g. after the selector changed
    pub fn update_progression(
        &mut self,
        stats: Option<&StatsSnapshot>,
        selected: Option<&str>,
        config: &ChartsConfig,
    ) {
        let previous = self.progression.take();
        let id = self.allocate_id();
        self.progression = Some(render_progression(
            previous,
            id,
            stats,
            selected,
            &config.weight_unit,
            &mut self.disposed,
        ));
    }

    fn allocate_id(&mut self) -> u64 {
        self.next_id += 1;
        self.next_id
    }
}

fn dispose<T>(previous: Option<ChartHandle<T>>, disposed: &mut u64) {
    if let Some(handle) = previous {
        tracing::debug!("Disposing chart #{}", handle.id);
        *disposed += 1;
    }
}

/// Consume the previous frequency chart and build its replacement
pub fn render_frequency(
    previous: Option<ChartHandle<FrequencyChart>>,
    id: u64,
    stats: &StatsSnapshot,
    today: NaiveDate,
    window_days: i64,
    disposed: &mut u64,
) -> ChartHandle<FrequencyChart> {
    dispose(previous, disposed);

    let records = stats.progress_by_exercise.values().flatten();
    let bars = frequency_counts(records, today, window_days);

    ChartHandle {
        id,
        chart: FrequencyChart {
            label: "Workouts (sets)".to_string(),
            bars,
        },
    }
}

/// Consume the previous progression chart and build its replacement
pub fn render_progression(
    previous: Option<ChartHandle<ProgressionChart>>,
    id: u64,
    stats: Option<&StatsSnapshot>,
    selected: Option<&str>,
    unit: &str,
    disposed: &mut u64,
) -> ChartHandle<ProgressionChart> {
    dispose(previous, disposed);

    let records = selected
        .filter(|name| !name.is_empty())
        .and_then(|name| stats?.records_for(name).map(|r| (name, r)));

    let chart = match records {
        Some((name, records)) => ProgressionChart::Series {
            exercise: name.to_string(),
            label: format!("Max weight ({})", unit),
            unit: unit.to_string(),
            points: max_weight_per_day(records),
        },
        None => ProgressionChart::Empty,
    };

    ChartHandle { id, chart }
}
