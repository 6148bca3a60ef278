//! Domain primitives, services, and ports.
//!
//! Purpose: strongly typed entities for hotels, one-time codes, menu
//! records, and push subscriptions, plus the services that implement the
//! publish and fan-out workflows. External collaborators are reached only
//! through the traits in [`ports`].

pub mod auth_service;
pub mod error;
pub mod hotel;
pub mod menu;
pub mod menu_service;
pub mod notify;
pub mod otp;
pub mod ports;
pub mod push_service;
pub mod subscription;
pub mod token;

pub use self::auth_service::{AuthService, ProfileFields};
pub use self::error::{Error, ErrorCode};
pub use self::hotel::{Hotel, HotelId, HotelValidationError, MobileNumber, Role};
pub use self::menu::{MenuId, MenuRecord, local_day_bounds, same_local_day};
pub use self::menu_service::{ImageUpload, MenuPublishService, PublishAction, PublishOutcome};
pub use self::notify::{FanoutSummary, MenuNotifier};
pub use self::otp::{DEFAULT_OTP_TTL, OneTimeCode, OtpCode};
pub use self::push_service::PushRegistry;
pub use self::subscription::{
    NotificationPayload, PushSubscription, SubscriptionKeys, WebPushSubscription,
};
pub use self::token::{SessionClaims, TokenCodec};

/// Convenient result alias for domain operations.
pub type ApiResult<T> = Result<T, Error>;
