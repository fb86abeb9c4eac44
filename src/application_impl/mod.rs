mod activity_refresher_impl;
mod login_gate_impl;
mod oldest_session;
mod session_admission_fake;
mod session_admission_impl;
mod session_lifecycle_impl;

#[cfg(test)]
pub(crate) mod test_support;

pub use activity_refresher_impl::*;
pub use login_gate_impl::*;
pub use oldest_session::*;
pub use session_admission_fake::*;
pub use session_admission_impl::*;
pub use session_lifecycle_impl::*;
