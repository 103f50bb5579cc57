use anyhow::Result;
use clap::Args;
use indicatif::{ProgressBar, ProgressStyle};
use std::time::Duration;

use super::{require_login, Context};
use crate::flows;

#[derive(Args)]
pub struct AnalysisCommand {}

impl AnalysisCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        require_login(ctx)?;

        let mut state = ctx.new_state();

        let spinner = ProgressBar::new_spinner();
        spinner.set_style(ProgressStyle::with_template("{spinner} {msg}")?);
        spinner.set_message("Analyzing your last 30 days...");
        spinner.enable_steady_tick(Duration::from_millis(100));

        flows::get_ai_analysis(&ctx.client, &mut state.analysis).await;

        spinner.finish_and_clear();

        println!("AI Coach");
        println!("────────────────────────────────");
        if let Some(result) = &state.analysis.result {
            println!("{}", result);
        }

        Ok(())
    }
}
