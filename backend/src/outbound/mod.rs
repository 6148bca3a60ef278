//! Outbound adapters implementing the domain ports.

pub mod media;
pub mod persistence;
pub mod push;
pub mod sms;
