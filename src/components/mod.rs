pub mod app;
pub mod direction_pad;
pub mod map_view;
pub mod score_panel;

pub use app::App;
