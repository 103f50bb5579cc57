use anyhow::Result;
use clap::Args;

use super::{show_success, Context};
use crate::flows;

#[derive(Args)]
pub struct LogoutCommand {}

impl LogoutCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        if !ctx.is_authenticated() {
            println!("You are not logged in.");
            return Ok(());
        }

        flows::logout(&ctx.client)?;

        show_success("Logged out successfully!");

        Ok(())
    }
}
