use ratatui::{
    buffer::Buffer,
    layout::Rect,
    style::{Color, Modifier, Style},
    symbols::Marker,
    text::{Line, Span},
    widgets::{
        Axis, BarChart, Block, Borders, Chart, Clear, Dataset, GraphType, List, ListItem,
        Paragraph, Widget, Wrap,
    },
};

use super::form::{FormEditor, FormField};
use crate::charts::{ChartHandle, FrequencyChart, ProgressionChart};
use crate::models::{Exercise, WorkoutEntry};
use crate::state::{AnalysisPanel, AppState};

fn panel(title: &str, border: Color) -> Block<'_> {
    Block::default()
        .borders(Borders::ALL)
        .title(title)
        .border_style(Style::default().fg(border))
}

/// Render the four stat cards
pub fn render_stats_cards(area: Rect, buf: &mut Buffer, state: &AppState) {
    let block = panel(" 📊 Overview ", Color::Gray);
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(stats) = &state.stats else {
        Paragraph::new("Loading statistics...")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    };

    let value = |text: String, color: Color| {
        Span::styled(
            text,
            Style::default().fg(color).add_modifier(Modifier::BOLD),
        )
    };
    let label = |text: &'static str| Span::styled(text, Style::default().fg(Color::Gray));

    let lines = vec![
        Line::from(vec![
            label("Total Workouts: "),
            value(stats.total_workouts.to_string(), Color::Green),
        ]),
        Line::from(vec![
            label("This Week:      "),
            value(stats.this_week_workouts.to_string(), Color::Cyan),
        ]),
        Line::from(vec![
            label("Favorite:       "),
            value(stats.most_used_label().to_string(), Color::Yellow),
        ]),
        Line::from(vec![
            label("Exercises:      "),
            value(stats.total_exercises.to_string(), Color::Magenta),
        ]),
    ];

    Paragraph::new(lines).render(inner, buf);
}

/// Render the workout history list
pub fn render_history(area: Rect, buf: &mut Buffer, history: &[WorkoutEntry], selected: usize) {
    let block = panel(" 🏋 Workout History ", Color::Cyan);
    let inner = block.inner(area);
    block.render(area, buf);

    if history.is_empty() {
        Paragraph::new("No workouts recorded yet.\nPress 'n' to log your first workout!")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    }

    let items: Vec<ListItem> = history
        .iter()
        .enumerate()
        .map(|(idx, workout)| {
            let style = if idx == selected {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            let mut lines = vec![Line::from(Span::styled(
                format!(
                    "{}  {}  {}",
                    workout.display_date(),
                    workout.exercise_name(),
                    workout.volume_summary()
                ),
                style,
            ))];
            if let Some(notes) = workout.notes.as_deref().filter(|n| !n.is_empty()) {
                lines.push(Line::from(Span::styled(
                    format!("    {}", notes),
                    Style::default().fg(Color::DarkGray),
                )));
            }

            ListItem::new(lines)
        })
        .collect();

    List::new(items).render(inner, buf);
}

/// Render the workouts-per-day bar chart
pub fn render_frequency_chart(
    area: Rect,
    buf: &mut Buffer,
    handle: Option<&ChartHandle<FrequencyChart>>,
) {
    let title = handle
        .map(|h| format!(" 📈 {} ", h.chart.label))
        .unwrap_or_else(|| " 📈 Workouts ".to_string());
    let block = panel(&title, Color::Gray);
    let inner = block.inner(area);
    block.render(area, buf);

    let Some(handle) = handle.filter(|h| !h.chart.bars.is_empty()) else {
        Paragraph::new("No recent workouts")
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    };

    let labels = handle.chart.labels();
    let data: Vec<(&str, u64)> = labels
        .iter()
        .map(String::as_str)
        .zip(handle.chart.bars.iter().map(|b| b.count))
        .collect();

    BarChart::default()
        .data(data.as_slice())
        .bar_width(5)
        .bar_gap(1)
        .max(handle.chart.max_count().max(1))
        .bar_style(Style::default().fg(Color::Green))
        .value_style(Style::default().fg(Color::White).bg(Color::Green))
        .render(inner, buf);
}

/// Render the weight progression line chart with the selector in the title
pub fn render_progression_chart(area: Rect, buf: &mut Buffer, state: &AppState) {
    let selector = state.selected_exercise.as_deref().unwrap_or("None");
    let title = format!(" 📉 Progression: ◀ {} ▶ ", selector);

    let chart = state.charts.progression().map(|h| &h.chart);
    let points: Vec<(f64, f64)> = chart
        .map(|c| {
            c.points()
                .iter()
                .enumerate()
                .map(|(i, p)| (i as f64, p.weight))
                .collect()
        })
        .unwrap_or_default();

    let block = panel(&title, Color::Gray);

    let series = chart.filter(|c| matches!(c, ProgressionChart::Series { .. }));
    let Some(chart) = series else {
        let inner = block.inner(area);
        block.render(area, buf);
        let hint = if state.chart_exercises.is_empty() {
            "No progression data yet"
        } else {
            "Use ←/→ to pick an exercise"
        };
        Paragraph::new(hint)
            .style(Style::default().fg(Color::Gray))
            .render(inner, buf);
        return;
    };

    let labels = chart.labels();
    let x_labels: Vec<Span> = match (labels.first(), labels.last()) {
        (Some(first), Some(last)) if labels.len() > 1 => {
            vec![Span::raw(first.clone()), Span::raw(last.clone())]
        }
        (Some(only), _) => vec![Span::raw(only.clone())],
        _ => Vec::new(),
    };

    let [low, high] = chart.y_bounds();
    let y_labels = vec![
        Span::raw(format!("{:.0}", low)),
        Span::raw(format!("{:.0}", high)),
    ];

    let latest = chart
        .tooltip(points.len().saturating_sub(1))
        .map(|t| format!("latest {}", t))
        .unwrap_or_default();

    let dataset = Dataset::default()
        .name(chart.title().unwrap_or_default())
        .marker(Marker::Braille)
        .graph_type(GraphType::Line)
        .style(Style::default().fg(Color::Cyan))
        .data(&points);

    Chart::new(vec![dataset])
        .block(block.title_bottom(Line::from(latest).right_aligned()))
        .x_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([0.0, (points.len().max(2) - 1) as f64])
                .labels(x_labels),
        )
        .y_axis(
            Axis::default()
                .style(Style::default().fg(Color::Gray))
                .bounds([low, high])
                .labels(y_labels),
        )
        .render(area, buf);
}

/// Render the AI analysis button, spinner or result
pub fn render_analysis(area: Rect, buf: &mut Buffer, analysis: &AnalysisPanel) {
    let block = panel(" 🤖 AI Coach ", Color::Magenta);
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines = Vec::new();
    if analysis.loading_visible {
        lines.push(Line::from(Span::styled(
            "⏳ Analyzing your last 30 days...",
            Style::default().fg(Color::Yellow),
        )));
    }
    if let Some(result) = &analysis.result {
        lines.extend(result.lines().map(|l| Line::from(l.to_string())));
        lines.push(Line::from(""));
    }
    if analysis.button_visible {
        lines.push(Line::from(Span::styled(
            "[A] Get AI analysis",
            Style::default()
                .fg(Color::Magenta)
                .add_modifier(Modifier::BOLD),
        )));
    }

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Render the workout entry form overlay
pub fn render_form(area: Rect, buf: &mut Buffer, editor: &FormEditor, exercises: &[Exercise]) {
    Clear.render(area, buf);
    let block = panel(" ➕ Log Workout ", Color::Green).style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    block.render(area, buf);

    let mut lines: Vec<Line> = FormField::ALL
        .iter()
        .map(|field| {
            let value = match field {
                FormField::Exercise => editor
                    .selected_exercise(exercises)
                    .map(|e| format!("◀ {} ▶", e))
                    .unwrap_or_else(|| "(no exercises available)".to_string()),
                _ => editor.value(*field).to_string(),
            };

            let style = if *field == editor.field {
                Style::default()
                    .fg(Color::Yellow)
                    .add_modifier(Modifier::BOLD)
            } else {
                Style::default().fg(Color::White)
            };

            Line::from(vec![
                Span::styled(format!("{:>12}: ", field.label()), Style::default().fg(Color::Gray)),
                Span::styled(value, style),
            ])
        })
        .collect();

    lines.push(Line::from(""));
    lines.push(Line::from(Span::styled(
        "Tab next field · ←/→ exercise · Enter save · Esc close",
        Style::default().fg(Color::DarkGray),
    )));

    Paragraph::new(lines).render(inner, buf);
}

/// Render the delete confirmation overlay
pub fn render_confirm(area: Rect, buf: &mut Buffer, prompt: &str) {
    Clear.render(area, buf);
    let block = panel(" ⚠ Confirm ", Color::Red).style(Style::default().bg(Color::Black));
    let inner = block.inner(area);
    block.render(area, buf);

    let lines = vec![
        Line::from(prompt.to_string()),
        Line::from(""),
        Line::from(Span::styled(
            "[y] Yes   [n] No",
            Style::default().fg(Color::Yellow),
        )),
    ];

    Paragraph::new(lines)
        .wrap(Wrap { trim: true })
        .render(inner, buf);
}

/// Render help overlay
pub fn render_help_overlay(area: Rect, buf: &mut Buffer) {
    Clear.render(area, buf);
    let block = Block::default()
        .borders(Borders::ALL)
        .title(" ❓ Help ")
        .border_style(Style::default().fg(Color::Cyan))
        .style(Style::default().bg(Color::Black));

    let inner = block.inner(area);
    block.render(area, buf);

    let heading = |text: &'static str| Line::from(Span::styled(text, Style::default().fg(Color::Cyan)));

    let help_text = vec![
        Line::from(Span::styled(
            "Keyboard Shortcuts",
            Style::default()
                .fg(Color::Yellow)
                .add_modifier(Modifier::BOLD),
        )),
        Line::from(""),
        heading("History:"),
        Line::from("  ↑/k ↓/j  - Move selection"),
        Line::from("  d        - Delete selected workout"),
        Line::from(""),
        heading("Charts:"),
        Line::from("  ←/→ [ ]  - Pick progression exercise"),
        Line::from(""),
        heading("Actions:"),
        Line::from("  n        - Log workout"),
        Line::from("  a        - AI analysis"),
        Line::from("  r        - Refresh data"),
        Line::from("  o        - Log out"),
        Line::from(""),
        heading("Other:"),
        Line::from("  ?        - Toggle this help"),
        Line::from("  q        - Quit"),
        Line::from(""),
        Line::from(Span::styled(
            "Press ? or ESC to close",
            Style::default().fg(Color::DarkGray),
        )),
    ];

    Paragraph::new(help_text).render(inner, buf);
}

/// Render status bar at bottom: notices first, key hints otherwise
pub fn render_status_bar(area: Rect, buf: &mut Buffer, state: &AppState) {
    let mut spans = vec![Span::styled(
        format!(" 👤 {} ", state.display_name()),
        Style::default().fg(Color::White).bg(Color::DarkGray),
    )];

    if let Some(error) = &state.error {
        spans.push(Span::styled(
            format!(" ✗ {} ", error.message),
            Style::default().fg(Color::White).bg(Color::Red),
        ));
    }
    if let Some(toast) = &state.toast {
        spans.push(Span::styled(
            format!(" ✓ {} ", toast.message),
            Style::default().fg(Color::Black).bg(Color::Green),
        ));
    }
    if state.error.is_none() && state.toast.is_none() {
        spans.push(Span::styled(
            " Press ? for help ",
            Style::default().fg(Color::Gray).bg(Color::DarkGray),
        ));
    }

    Paragraph::new(Line::from(spans)).render(area, buf);
}
