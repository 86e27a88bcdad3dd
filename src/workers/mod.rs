pub mod session_cleanup;

pub use session_cleanup::CleanupWorker;
