pub mod panels;
pub mod state;
pub mod theme;

pub use panels::{draw_help_overlay, draw_hud};
pub use state::UiState;
pub use theme::apply_theme;
