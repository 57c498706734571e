//! UIコンポーネント

pub mod analyze_button;
pub mod error_panel;
pub mod header;
pub mod loading_indicator;
pub mod results_panel;
pub mod upload_area;
