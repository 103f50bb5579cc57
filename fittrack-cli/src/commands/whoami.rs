use anyhow::Result;
use clap::Args;

use super::{require_login, show_error, Context};

#[derive(Args)]
pub struct WhoamiCommand {}

impl WhoamiCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        require_login(ctx)?;

        println!("Fetching profile...");
        println!();

        match ctx.client.profile().await {
            Ok(profile) => {
                println!("✓ Logged in as:");
                println!();
                println!("  Username: {}", profile.display_name());
                if let Some(id) = &profile.id {
                    println!("  User ID:  {}", id);
                }
                println!("  Server:   {}", ctx.client.base_url());

                Ok(())
            }
            Err(e) => {
                show_error(&format!("Failed to fetch profile: {}", e));
                Err(e.into())
            }
        }
    }
}
