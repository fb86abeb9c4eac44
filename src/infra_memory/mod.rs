mod session_activity_store_memory;

pub use session_activity_store_memory::*;
