// store

mod session_activity_store;

pub use session_activity_store::*;
