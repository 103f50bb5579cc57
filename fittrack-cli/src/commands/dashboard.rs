use anyhow::Result;
use clap::Args;

use super::{require_login, Context};
use crate::ui::Dashboard;

#[derive(Args)]
pub struct DashboardCommand {}

impl DashboardCommand {
    pub async fn execute(self, ctx: &Context) -> Result<()> {
        require_login(ctx)?;

        let mut dashboard = Dashboard::new(ctx)?;
        let result = dashboard.run().await;
        dashboard.cleanup()?;

        result
    }
}
