//! Reservation Model

use serde::{Deserialize, Serialize};

use super::raw::RawScalar;

/// Reservation lifecycle status
///
/// Stored as the display string (`"No-Show"`), matching the CHECK constraint.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::Type))]
pub enum ReservationStatus {
    #[default]
    Confirmed,
    Seated,
    Cancelled,
    Completed,
    #[serde(rename = "No-Show")]
    #[cfg_attr(feature = "db", sqlx(rename = "No-Show"))]
    NoShow,
}

impl ReservationStatus {
    pub const ALL: [ReservationStatus; 5] = [
        Self::Confirmed,
        Self::Seated,
        Self::Cancelled,
        Self::Completed,
        Self::NoShow,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Confirmed => "Confirmed",
            Self::Seated => "Seated",
            Self::Cancelled => "Cancelled",
            Self::Completed => "Completed",
            Self::NoShow => "No-Show",
        }
    }

    /// Whether a reservation in this status still holds its table
    pub fn holds_table(&self) -> bool {
        !matches!(self, Self::Cancelled | Self::Completed)
    }
}

/// Reservation entity
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct Reservation {
    pub id: i64,
    pub customer_id: i64,
    pub table_number: i64,
    /// Unix millis (UTC)
    pub date_time: i64,
    pub number_of_guests: i64,
    pub status: ReservationStatus,
}

/// Public booking form
///
/// `date` is `YYYY-MM-DD`, `time` is `HH:MM`. Guests may arrive as a string
/// from a form post.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationRequest {
    #[serde(alias = "customer_name")]
    pub name: String,
    #[serde(default, alias = "customer_phone")]
    pub phone: Option<String>,
    #[serde(default, alias = "customer_email")]
    pub email: Option<String>,
    pub date: String,
    pub time: String,
    #[serde(alias = "num_guests")]
    pub guests: RawScalar,
}

/// Upcoming reservation row for the staff list and dashboard
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationListing {
    pub id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub table_number: i64,
    pub date_time: i64,
    pub number_of_guests: i64,
    pub status: ReservationStatus,
}

/// Confirmation view shown to the customer after booking
#[derive(Debug, Clone, Serialize, Deserialize)]
#[cfg_attr(feature = "db", derive(sqlx::FromRow))]
pub struct ReservationConfirmation {
    pub id: i64,
    pub customer_name: String,
    pub phone: Option<String>,
    pub email: Option<String>,
    pub table_number: i64,
    pub date_time: i64,
    pub number_of_guests: i64,
    pub status: ReservationStatus,
}

/// Status change payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReservationStatusUpdate {
    pub status: ReservationStatus,
}
