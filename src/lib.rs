pub mod aggregate;
pub mod app;
pub mod combine;
pub mod errors;
pub mod handlers;
pub mod models;
pub mod money;
pub mod state;
pub mod storage;
pub mod ui;

pub use app::router;
pub use state::AppState;
pub use storage::{load_dataset, resolve_data_path};
