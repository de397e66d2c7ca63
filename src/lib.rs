//! Frontdesk: an authenticated client for a hotel front-desk REST backend.
//!
//! The crate keeps an operator signed in across calls: access tokens are
//! checked for expiry locally, refreshed through a single shared exchange
//! when they lapse, and a rejected call is retried once with the fresh
//! token before the session is given up.
//!
//! # Quick start
//!
//! ```no_run
//! use std::sync::Arc;
//! use std::time::Duration;
//!
//! use frontdesk::api::{FrontDeskClient, PageRequest, RoomFilters};
//! use frontdesk::auth::{AuthEndpoints, MemoryTokenStore, SessionManager};
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let base_url = "http://localhost:8080/api";
//! let endpoints = AuthEndpoints::new(base_url, Duration::from_secs(30));
//! let session = SessionManager::builder(Arc::new(MemoryTokenStore::new()), endpoints).build();
//!
//! let outcome = session.endpoints().login("desk@hotel.test", "secret").await?;
//! session.store_tokens(&outcome.tokens)?;
//!
//! let client = FrontDeskClient::new(session, base_url);
//! let rooms = client.list_rooms(&PageRequest::default(), &RoomFilters::default()).await?;
//! println!("{} rooms", rooms.total_elements);
//! # Ok(())
//! # }
//! ```

pub mod api;
pub mod auth;
pub mod build_info;
pub mod config;
pub mod error;
pub mod logging;
#[cfg(test)]
pub mod testsupport;
pub mod transport;
