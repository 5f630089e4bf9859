//! Booking-details collaborator.
//!
//! Chat messages sometimes carry only a bare sender id; the display name for
//! the other party comes from booking metadata instead. [`BookingDirectory`]
//! abstracts that lookup (a single GET in production) so the runtime can
//! resolve the counterpart once per room join.

use async_trait::async_trait;
use huddle_proto::PartyProfile;
use thiserror::Error;

/// Errors from booking-details lookups.
#[derive(Debug, Clone, Error, PartialEq, Eq)]
pub enum DirectoryError {
    /// The lookup request failed.
    #[error("booking lookup failed: {0}")]
    Lookup(String),

    /// The booking exists but its party data is unusable.
    #[error("booking has malformed party data: {0}")]
    Malformed(String),
}

/// The two parties of a booking.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BookingParties {
    /// The customer who booked the service.
    pub customer: PartyProfile,
    /// The provider delivering the service.
    pub provider: PartyProfile,
}

impl BookingParties {
    /// The party that is not the given user.
    ///
    /// An unknown or missing user id resolves to the customer, matching the
    /// provider-facing default of the original product.
    pub fn counterpart_of(&self, user_id: Option<&str>) -> &PartyProfile {
        if user_id == Some(self.customer.id.as_str()) {
            &self.provider
        } else {
            &self.customer
        }
    }
}

/// Read-only booking-details collaborator.
#[async_trait]
pub trait BookingDirectory: Send + Sync {
    /// Fetch the two parties of a booking.
    async fn booking_parties(&self, booking_id: &str) -> Result<BookingParties, DirectoryError>;
}
