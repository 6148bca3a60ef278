//! Shared HTTP adapter state.
//!
//! Handlers receive this bundle via `actix_web::web::Data`, so they depend
//! only on domain services and ports and stay testable without real I/O.

use std::sync::Arc;

use crate::domain::ports::{HotelRepository, MenuRepository};
use crate::domain::{AuthService, MenuPublishService, PushRegistry};

/// Dependency bundle for HTTP handlers.
#[derive(Clone)]
pub struct HttpState {
    /// OTP and login flows.
    pub auth: Arc<AuthService>,
    /// Menu publish workflow.
    pub publisher: Arc<MenuPublishService>,
    /// Subscription registry operations.
    pub registry: Arc<PushRegistry>,
    /// Hotel lookups for the dashboard.
    pub hotels: Arc<dyn HotelRepository>,
    /// Menu listings (history, today, latest).
    pub menus: Arc<dyn MenuRepository>,
    /// Public VAPID key served to subscribing clients.
    pub vapid_public_key: String,
}
