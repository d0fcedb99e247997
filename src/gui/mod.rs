pub mod app;
pub mod health_bar;

pub use app::ReplayApp;
pub use health_bar::{hp_label, show_health_bar, text_bar};
