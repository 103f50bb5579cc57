use anyhow::Result;
use clap::Args;

use super::{require_login, Context};

/// Width of the longest bar in the text charts
const BAR_WIDTH: u64 = 30;

#[derive(Args)]
pub struct StatsCommand {
    /// Show the max-weight progression of this exercise
    #[arg(short, long)]
    exercise: Option<String>,
}

impl StatsCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        require_login(ctx)?;

        let mut state = ctx.new_state();
        let stats = ctx.client.stats().await?;
        state.set_stats(stats);
        state.select_exercise(self.exercise.clone());

        let Some(stats) = &state.stats else {
            return Ok(());
        };

        println!("Training Statistics");
        println!("────────────────────────────────");
        println!("  Total workouts:   {}", stats.total_workouts);
        println!("  This week:        {}", stats.this_week_workouts);
        println!("  Most used:        {}", stats.most_used_label());
        println!("  Exercises:        {}", stats.total_exercises);
        println!();

        if let Some(handle) = state.charts.frequency() {
            let chart = &handle.chart;
            println!(
                "{} - last {} days",
                chart.label, state.chart_config.frequency_window_days
            );
            if chart.bars.is_empty() {
                println!("  No workouts in this period.");
            }
            let max = chart.max_count().max(1);
            for (label, bar) in chart.labels().iter().zip(&chart.bars) {
                let width = (bar.count * BAR_WIDTH).div_ceil(max) as usize;
                println!("  {}  {} {}", label, "█".repeat(width), bar.count);
            }
            println!();
        }

        let progression = state.charts.progression().map(|h| &h.chart);
        match progression.and_then(|chart| chart.title().map(|title| (chart, title))) {
            Some((chart, title)) => {
                println!("{}", title);
                for (index, label) in chart.labels().iter().enumerate() {
                    if let Some(tooltip) = chart.tooltip(index) {
                        println!("  {}  {}", label, tooltip);
                    }
                }
            }
            None => {
                if let Some(name) = &self.exercise {
                    println!("No progression data for '{}'.", name);
                }
                if !state.chart_exercises.is_empty() {
                    println!("Progression available for: {}", state.chart_exercises.join(", "));
                }
            }
        }

        Ok(())
    }
}
