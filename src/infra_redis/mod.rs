mod session_activity_store_redis;

pub use session_activity_store_redis::*;
