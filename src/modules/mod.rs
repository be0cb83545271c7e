//! Modules layer - Infrastructure components
//!
//! Contains adapters that sit between the features and the outside world,
//! such as media storage and outbound mail.

pub mod mail;
pub mod storage;
