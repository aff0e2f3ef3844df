pub mod heartbeat;
pub mod ranging;
#[cfg(feature = "multi-threaded")]
pub mod worker;

// Re-exports
pub use heartbeat::*;
pub use ranging::*;
#[cfg(feature = "multi-threaded")]
pub use worker::*;
