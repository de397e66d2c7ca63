//! Front-desk REST payloads.
//!
//! Field names follow the backend's camelCase JSON. Dates travel as
//! ISO-8601 strings (`2025-03-14`, `2025-03-14T09:30:00`) and are kept as
//! such; the backend is the only party that does date arithmetic.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Spring-style page envelope returned by list endpoints.
///
/// `number` is the 0-based page index as sent by the server; use
/// [`Page::page`] for the 1-based value.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Page<T> {
    pub content: Vec<T>,
    #[serde(default)]
    pub total_elements: u64,
    #[serde(default)]
    pub total_pages: u32,
    #[serde(default)]
    pub size: u32,
    #[serde(default)]
    pub number: u32,
    #[serde(default)]
    pub first: bool,
    #[serde(default)]
    pub last: bool,
}

impl<T> Page<T> {
    /// 1-based page index.
    pub fn page(&self) -> u32 {
        self.number + 1
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Amenity {
    pub id: u64,
    pub name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body for `POST /amenities`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewAmenity {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

/// Body for `PUT /amenities/{id}`; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct AmenityUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub icon: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: u64,
    pub room_number: String,
    pub adult_capacity: u32,
    pub children_capacity: u32,
    pub price: f64,
    #[serde(default)]
    pub amenities: Vec<Amenity>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

/// Body for `POST /rooms`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoom {
    pub room_number: String,
    pub adult_capacity: u32,
    pub children_capacity: u32,
    pub price: f64,
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub amenity_ids: Vec<u64>,
}

/// Body for `PUT /rooms/{id}`; unset fields are left unchanged.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomUpdate {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub room_number: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub adult_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub children_capacity: Option<u32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub price: Option<f64>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub amenity_ids: Option<Vec<u64>>,
}

/// Lifecycle of a booking.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum BookingStatus {
    Booked,
    Cancelled,
    CheckedIn,
    CheckedOut,
}

impl BookingStatus {
    pub const ALL: [BookingStatus; 4] = [
        BookingStatus::Booked,
        BookingStatus::Cancelled,
        BookingStatus::CheckedIn,
        BookingStatus::CheckedOut,
    ];

    /// Wire value, e.g. `CHECKED_IN`.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Booked => "BOOKED",
            Self::Cancelled => "CANCELLED",
            Self::CheckedIn => "CHECKED_IN",
            Self::CheckedOut => "CHECKED_OUT",
        }
    }

    /// Human label, e.g. `Checked In`.
    pub fn label(self) -> &'static str {
        match self {
            Self::Booked => "Booked",
            Self::Cancelled => "Cancelled",
            Self::CheckedIn => "Checked In",
            Self::CheckedOut => "Checked Out",
        }
    }
}

impl fmt::Display for BookingStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for BookingStatus {
    type Err = String;

    /// Accepts the wire value in any case, with `-` or `_` separators.
    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown booking status `{value}` (expected booked, cancelled, checked-in or checked-out)")
            })
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Booking {
    pub id: u64,
    pub first_name: String,
    pub last_name: String,
    #[serde(default)]
    pub pronouns: Option<String>,
    pub check_in_date: String,
    pub check_out_date: String,
    pub adult_capacity: u32,
    #[serde(default)]
    pub children_capacity: u32,
    #[serde(default)]
    pub total_amount: f64,
    pub status: BookingStatus,
    #[serde(default)]
    pub room_id: Option<u64>,
    #[serde(default)]
    pub room_number: Option<String>,
    #[serde(default)]
    pub room_price: Option<f64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
}

impl Booking {
    pub fn guest_name(&self) -> String {
        format!("{} {}", self.first_name, self.last_name)
            .trim()
            .to_string()
    }
}

/// Body for `POST /bookings`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewBooking {
    pub first_name: String,
    pub last_name: String,
    pub pronouns: String,
    pub check_in_date: String,
    pub check_out_date: String,
    pub adult_capacity: u32,
    pub children_capacity: u32,
    pub room_id: u64,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ServiceCharge {
    pub name: String,
    pub amount: f64,
}

/// Bill shown before checking a guest out.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CheckoutSummary {
    pub room_total: f64,
    #[serde(default)]
    pub service_charges: Vec<ServiceCharge>,
    pub grand_total: f64,
    pub total_nights: u32,
    pub check_in_date: String,
    pub check_out_date: String,
}

/// Dashboard row for today's arrivals and departures.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct GuestSummary {
    pub id: u64,
    pub guest_name: String,
    pub room_number: String,
    pub check_in_date: String,
    pub check_out_date: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub day_remaining: Option<i64>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub total_amount: Option<f64>,
}

#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyDataPoint {
    pub day: u32,
    pub approved: u32,
    pub declined: u32,
}

/// Weekly occupancy figures for the dashboard.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct OccupancyRate {
    /// Percentage of rooms occupied today.
    #[serde(alias = "rate")]
    pub occupancy_rate: f64,
    #[serde(default)]
    pub total_rooms: u32,
    #[serde(default)]
    pub occupied_rooms: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub available_rooms: Option<u32>,
    #[serde(default)]
    pub data: Vec<OccupancyDataPoint>,
}

impl OccupancyRate {
    /// Rooms not occupied, computed when the server omits it.
    pub fn available(&self) -> u32 {
        self.available_rooms
            .unwrap_or_else(|| self.total_rooms.saturating_sub(self.occupied_rooms))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Deserialize, Serialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum RoomServiceStatus {
    Pending,
    InProgress,
    Completed,
    Cancelled,
}

impl RoomServiceStatus {
    pub const ALL: [RoomServiceStatus; 4] = [
        RoomServiceStatus::Pending,
        RoomServiceStatus::InProgress,
        RoomServiceStatus::Completed,
        RoomServiceStatus::Cancelled,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Pending => "PENDING",
            Self::InProgress => "IN_PROGRESS",
            Self::Completed => "COMPLETED",
            Self::Cancelled => "CANCELLED",
        }
    }
}

impl fmt::Display for RoomServiceStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoomServiceStatus {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        let normalized = value.trim().to_ascii_uppercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|status| status.as_str() == normalized)
            .ok_or_else(|| {
                format!("unknown service status `{value}` (expected pending, in-progress, completed or cancelled)")
            })
    }
}

/// Service request raised against an occupied room.
#[derive(Debug, Clone, PartialEq, Deserialize, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RoomService {
    pub id: u64,
    pub room_number: String,
    /// One of `CLEANING`, `MAINTENANCE`, `FOOD_DELIVERY`, `LAUNDRY`,
    /// `MINI_BAR`, `TOWEL_CHANGE`, `AMENITIES`, `OTHER`.
    pub service_type: String,
    pub amount: f64,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    pub status: RoomServiceStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub requested_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub completed_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub guest_name: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
}

/// Body for `POST /room-services`.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct NewRoomService {
    pub room_number: String,
    pub service_type: String,
    pub amount: f64,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
}

/// `{"count": n}` as returned by the count endpoints.
#[derive(Debug, Deserialize)]
pub(crate) struct CountResponse {
    pub(crate) count: u64,
}

/// `{"exists": bool}` from `/amenities/check-name/{name}`.
#[derive(Debug, Deserialize)]
pub(crate) struct ExistsResponse {
    #[serde(default)]
    pub(crate) exists: bool,
}
