pub mod azel;
pub mod error;
pub mod records;
pub mod stars;
pub mod store;
pub mod time;
pub mod toolkit;
pub mod topo;
pub mod tracking;

pub use error::{GateError, Result};
pub use time::Epoch;
