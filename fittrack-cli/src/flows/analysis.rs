use crate::api::ApiClient;
use crate::state::AnalysisPanel;

/// Fetch the AI analysis into the panel. The button is restored on both the
/// success and the failure path.
pub async fn get_ai_analysis(client: &ApiClient, panel: &mut AnalysisPanel) {
    panel.begin();

    let outcome = client.ai_analysis().await.map(|response| response.analysis);
    if let Err(e) = &outcome {
        tracing::warn!("AI analysis failed: {}", e);
    }

    panel.finish(outcome);
}
