pub mod error;
pub mod navigation;
pub mod state;
pub mod ui;

pub use error::AppError;
pub use navigation::{resolve, Resolution};
pub use state::AppState;
pub use ui::LoggingUi;
