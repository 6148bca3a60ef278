//! Hotel daily-menu backend library modules.
//!
//! A small multi-tenant service: hotels authenticate by phone number,
//! publish one menu photo per local calendar day, and subscribed browsers
//! are notified over web push when the menu changes.

pub mod doc;
pub mod domain;
pub mod inbound;
pub mod middleware;
pub mod outbound;
pub mod server;

/// Public OpenAPI surface used by tooling.
pub use doc::ApiDoc;
/// Request-id middleware applied to every route.
pub use middleware::RequestId;
