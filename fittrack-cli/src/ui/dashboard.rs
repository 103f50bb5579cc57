use anyhow::{Context as _, Result};
use crossterm::{
    event::{self, DisableMouseCapture, EnableMouseCapture, Event},
    execute,
    terminal::{disable_raw_mode, enable_raw_mode, EnterAlternateScreen, LeaveAlternateScreen},
};
use ratatui::{
    backend::{Backend, CrosstermBackend},
    layout::{Constraint, Direction, Layout, Rect},
    Frame, Terminal,
};
use std::io;
use std::sync::Arc;
use std::time::{Duration, Instant};
use tokio::sync::mpsc;

use super::app::{Action, App, Mode};
use super::widgets;
use crate::api::ApiClient;
use crate::commands::Context;
use crate::flows::{self, DeleteOutcome};
use crate::routing::{Route, RouteTracker};

/// Dashboard manages the TUI lifecycle
pub struct Dashboard {
    terminal: Terminal<CrosstermBackend<io::Stdout>>,
    app: App,
    client: Arc<ApiClient>,
    tracker: RouteTracker,
    analysis_tx: mpsc::UnboundedSender<Result<String, String>>,
    analysis_rx: mpsc::UnboundedReceiver<Result<String, String>>,
    active: bool,
}

impl Dashboard {
    /// Create new dashboard instance
    pub fn new(ctx: &Context) -> Result<Self> {
        // Setup terminal
        enable_raw_mode().context("Failed to enable raw mode")?;
        let mut stdout = io::stdout();
        execute!(stdout, EnterAlternateScreen, EnableMouseCapture)
            .context("Failed to setup terminal")?;

        let backend = CrosstermBackend::new(stdout);
        let terminal = Terminal::new(backend).context("Failed to create terminal")?;

        let (analysis_tx, analysis_rx) = mpsc::unbounded_channel();

        Ok(Self {
            terminal,
            app: App::new(ctx.new_state()),
            client: Arc::clone(&ctx.client),
            tracker: ctx.tracker.clone(),
            analysis_tx,
            analysis_rx,
            active: true,
        })
    }

    /// Load the data, then run the event loop until quit or session loss
    pub async fn run(&mut self) -> Result<()> {
        self.draw()?;
        flows::init_dashboard(&self.client, &mut self.app.state).await;

        loop {
            if self.session_ended() {
                tracing::info!("Session ended, leaving dashboard");
                break;
            }

            self.apply_analysis_results();
            self.app.state.expire_notices(Instant::now());
            self.draw()?;

            if event::poll(Duration::from_millis(100))? {
                if let Event::Key(key) = event::read()? {
                    if key.kind == event::KeyEventKind::Press {
                        if let Some(action) = self.app.handle_key(key.code) {
                            self.perform(action).await?;
                        }
                    }
                }
            }

            if self.app.should_quit {
                break;
            }
        }

        Ok(())
    }

    fn session_ended(&self) -> bool {
        self.tracker.current() == Some(Route::Login)
    }

    /// Results are applied in arrival order, so the last response wins
    fn apply_analysis_results(&mut self) {
        while let Ok(outcome) = self.analysis_rx.try_recv() {
            self.app.state.analysis.finish(outcome);
        }
    }

    fn draw(&mut self) -> Result<()> {
        let app = &self.app;
        self.terminal.draw(|f| ui(f, app))?;
        Ok(())
    }

    async fn perform(&mut self, action: Action) -> Result<()> {
        let client = Arc::clone(&self.client);

        match action {
            Action::Refresh => {
                flows::init_dashboard(&client, &mut self.app.state).await;
                self.app.clamp_selection();
            }
            Action::SaveWorkout => {
                let App { state, mode, .. } = &mut self.app;
                if let Mode::Editing(editor) = mode {
                    let result = flows::save_workout(&client, state, &mut editor.form).await;
                    if let Err(e) = result {
                        tracing::warn!("Saving workout failed: {}", e);
                        state.show_error(flows::save_failure(&e));
                    }
                }
            }
            Action::DeleteWorkout { id, confirmed } => {
                let mut answer = |_: &str| -> Result<bool> { Ok(confirmed) };
                let result =
                    flows::delete_workout(&client, &mut self.app.state, &id, &mut answer).await;
                match result {
                    Ok(DeleteOutcome::Deleted) => self.app.clamp_selection(),
                    Ok(DeleteOutcome::Cancelled) => {}
                    Err(e) => {
                        tracing::warn!("Deleting workout {} failed: {}", id, e);
                        self.app.state.show_error(flows::delete_failure(&e));
                    }
                }
            }
            Action::Analysis => {
                self.app.state.analysis.begin();

                let tx = self.analysis_tx.clone();
                tokio::spawn(async move {
                    let outcome = client
                        .ai_analysis()
                        .await
                        .map(|response| response.analysis)
                        .map_err(|e| e.to_string());
                    if let Err(e) = &outcome {
                        tracing::warn!("AI analysis failed: {}", e);
                    }
                    // The receiver is gone once the dashboard has closed
                    let _ = tx.send(outcome);
                });
            }
            Action::Logout => flows::logout(&client)?,
        }

        Ok(())
    }

    /// Cleanup terminal on exit
    pub fn cleanup(&mut self) -> Result<()> {
        if !self.active {
            return Ok(());
        }
        self.active = false;

        disable_raw_mode().context("Failed to disable raw mode")?;
        execute!(
            self.terminal.backend_mut(),
            LeaveAlternateScreen,
            DisableMouseCapture
        )
        .context("Failed to restore terminal")?;
        self.terminal.show_cursor().context("Failed to show cursor")?;

        Ok(())
    }
}

impl Drop for Dashboard {
    fn drop(&mut self) {
        let _ = self.cleanup();
    }
}

/// Render the UI
fn ui(f: &mut Frame, app: &App) {
    let size = f.area();

    // Main layout: top area + status bar
    let main_chunks = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Min(0), Constraint::Length(1)])
        .split(size);

    let columns = Layout::default()
        .direction(Direction::Horizontal)
        .constraints([Constraint::Percentage(45), Constraint::Percentage(55)])
        .split(main_chunks[0]);

    // Left column: stat cards, history, AI coach
    let left_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Length(6),
            Constraint::Min(0),
            Constraint::Percentage(30),
        ])
        .split(columns[0]);

    // Right column: frequency chart above progression chart
    let right_panels = Layout::default()
        .direction(Direction::Vertical)
        .constraints([Constraint::Percentage(50), Constraint::Percentage(50)])
        .split(columns[1]);

    let state = &app.state;
    let buf = f.buffer_mut();

    widgets::render_stats_cards(left_panels[0], buf, state);
    widgets::render_history(left_panels[1], buf, &state.history, app.selected_index);
    widgets::render_analysis(left_panels[2], buf, &state.analysis);
    widgets::render_frequency_chart(right_panels[0], buf, state.charts.frequency());
    widgets::render_progression_chart(right_panels[1], buf, state);
    widgets::render_status_bar(main_chunks[1], buf, state);

    match &app.mode {
        Mode::Browse => {}
        Mode::Editing(editor) => {
            widgets::render_form(centered_rect(60, 50, size), buf, editor, &state.exercises)
        }
        Mode::ConfirmDelete(_) => {
            widgets::render_confirm(centered_rect(40, 20, size), buf, flows::DELETE_PROMPT)
        }
    }

    if app.show_help {
        widgets::render_help_overlay(centered_rect(60, 80, size), buf);
    }
}

/// Draw one frame of `app` on any backend
pub fn draw_app<B: Backend>(terminal: &mut Terminal<B>, app: &App) -> Result<()> {
    terminal.draw(|f| ui(f, app))?;
    Ok(())
}

/// Helper function to create a centered rect
fn centered_rect(percent_x: u16, percent_y: u16, r: Rect) -> Rect {
    let popup_layout = Layout::default()
        .direction(Direction::Vertical)
        .constraints([
            Constraint::Percentage((100 - percent_y) / 2),
            Constraint::Percentage(percent_y),
            Constraint::Percentage((100 - percent_y) / 2),
        ])
        .split(r);

    Layout::default()
        .direction(Direction::Horizontal)
        .constraints([
            Constraint::Percentage((100 - percent_x) / 2),
            Constraint::Percentage(percent_x),
            Constraint::Percentage((100 - percent_x) / 2),
        ])
        .split(popup_layout[1])[1]
}
