//! Front-desk REST client.
//!
//! Endpoints are grouped by resource:
//! - `rooms`: `/rooms`
//! - `bookings`: `/bookings` and the guest lifecycle
//! - `dashboard`: today's arrivals/departures and occupancy
//! - `room_services`: `/room-services`
//! - `amenities`: `/amenities`
//!
//! `client` holds the shared dispatch and status mapping.

mod amenities;
mod bookings;
mod client;
mod dashboard;
mod query;
mod room_services;
mod rooms;
mod types;

pub use client::FrontDeskClient;
pub use query::{
    AmenityFilters, AvailabilityQuery, BookingFilters, PageRequest, RoomFilters, SortDirection,
};
pub use types::{
    Amenity, AmenityUpdate, Booking, BookingStatus, CheckoutSummary, GuestSummary, NewAmenity, NewBooking, NewRoom,
    NewRoomService, OccupancyDataPoint, OccupancyRate, Page, Room, RoomService,
    RoomServiceStatus, RoomUpdate, ServiceCharge,
};
