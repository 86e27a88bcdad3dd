pub mod store;
pub mod types;

pub use store::{SessionStore, SNAPSHOT_WINDOW};
pub use types::{PerformanceRecord, SessionSnapshot, StudentSession};
