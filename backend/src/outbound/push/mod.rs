//! Web-push delivery adapters.

mod transport;
mod vapid;

pub use transport::{HttpPushTransport, LoggingPushTransport};
pub use vapid::{VapidError, VapidKeys};
