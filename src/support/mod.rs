mod registry;
pub use registry::Slot;

mod retry;
pub use retry::Retry;

mod time;
pub use time::{elapsed_ms, Clock, Platform};
