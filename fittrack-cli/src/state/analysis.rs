use std::fmt::Display;

/// Visibility of the AI analysis button, spinner and result box
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AnalysisPanel {
    pub button_visible: bool,
    pub loading_visible: bool,
    pub result: Option<String>,
}

impl Default for AnalysisPanel {
    fn default() -> Self {
        Self {
            button_visible: true,
            loading_visible: false,
            result: None,
        }
    }
}

impl AnalysisPanel {
    /// Hide the button and any previous result, show the spinner
    pub fn begin(&mut self) {
        self.button_visible = false;
        self.loading_visible = true;
        self.result = None;
    }

    /// Show the outcome and restore the button, whichever way it went
    pub fn finish<E: Display>(&mut self, outcome: Result<String, E>) {
        self.result = Some(match outcome {
            Ok(analysis) => analysis,
            Err(e) => format!("Could not fetch the analysis: {}", e),
        });
        self.loading_visible = false;
        self.button_visible = true;
    }

    pub fn is_loading(&self) -> bool {
        self.loading_visible
    }
}
