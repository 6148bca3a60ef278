//! PostgreSQL persistence adapters using Diesel ORM.
//!
//! Concrete implementations of the domain repository ports backed by
//! PostgreSQL via `diesel-async` with `bb8` pooling. Adapters stay thin:
//! they translate between Diesel rows and domain types and map database
//! errors to port error types; no business logic lives here.

mod diesel_hotel_repository;
mod diesel_menu_repository;
mod diesel_otp_repository;
mod diesel_subscription_repository;
mod error_mapping;
mod models;
mod pool;
mod schema;

pub use diesel_hotel_repository::DieselHotelRepository;
pub use diesel_menu_repository::DieselMenuRepository;
pub use diesel_otp_repository::DieselOtpRepository;
pub use diesel_subscription_repository::DieselSubscriptionRepository;
pub use pool::{DbPool, PoolConfig, PoolError};
