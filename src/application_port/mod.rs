mod activity_refresher;
mod login_gate;
mod session_admission;
mod session_lifecycle;

pub use activity_refresher::*;
pub use login_gate::*;
pub use session_admission::*;
pub use session_lifecycle::*;
