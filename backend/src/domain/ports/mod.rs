//! Domain ports for the hexagonal boundary.
//!
//! Each port is one trait describing a collaborator the domain depends on:
//! the four persistence stores, image storage, push delivery, and SMS. The
//! outbound adapters implement them; tests substitute mockall mocks.

mod blob_sink;
mod hotel_repository;
mod menu_repository;
mod otp_repository;
mod push_transport;
mod sms_relay;
mod subscription_repository;

#[cfg(test)]
pub use blob_sink::MockBlobSink;
pub use blob_sink::{BlobSink, BlobSinkError, BlobUpload, StorageKind, StoredBlob};
#[cfg(test)]
pub use hotel_repository::MockHotelRepository;
pub use hotel_repository::{HotelRepository, HotelRepositoryError};
#[cfg(test)]
pub use menu_repository::MockMenuRepository;
pub use menu_repository::{MenuRepository, MenuRepositoryError, MenuWithHotel, PageWindow};
#[cfg(test)]
pub use otp_repository::MockOtpRepository;
pub use otp_repository::{OtpRepository, OtpRepositoryError};
#[cfg(test)]
pub use push_transport::MockPushTransport;
pub use push_transport::{PushDeliveryError, PushTransport};
#[cfg(test)]
pub use sms_relay::MockSmsRelay;
pub use sms_relay::{SmsRelay, SmsRelayError};
#[cfg(test)]
pub use subscription_repository::MockSubscriptionRepository;
pub use subscription_repository::{SubscriptionRepository, SubscriptionRepositoryError};
