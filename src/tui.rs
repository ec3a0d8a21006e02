pub mod app;
pub mod events;
pub mod rendering;
mod utils;

pub use app::App;
pub use events::run_tui;
