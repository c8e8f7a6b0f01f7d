pub mod postgres;

pub use postgres::{connect, AppState};
