//! Core domain concepts shared across all subdomains.
//!
//! - [`request::Request`]: a validated learner request
//! - [`error::DomainError`]: domain-level errors

pub mod error;
pub mod request;
