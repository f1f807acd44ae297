pub mod controller;
pub mod state;

pub use controller::App;
pub use state::{AppEvent, AppState};
