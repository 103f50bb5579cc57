use anyhow::Result;
use clap::Args;

use super::{require_login, Context};

#[derive(Args)]
pub struct ExercisesCommand {}

impl ExercisesCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        require_login(ctx)?;

        let exercises = ctx.client.exercises().await?;

        println!("Exercises");
        println!("────────────────────────────────");

        if exercises.is_empty() {
            println!("The catalog is empty.");
            return Ok(());
        }

        for exercise in &exercises {
            println!("  {:<38} {}", exercise.id, exercise);
        }

        Ok(())
    }
}
