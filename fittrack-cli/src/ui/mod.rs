// Terminal UI module using ratatui

mod app;
mod dashboard;
mod form;
mod widgets;

pub use app::{Action, App, Mode};
pub use dashboard::{draw_app, Dashboard};
pub use form::{FormEditor, FormField, FormInput};
