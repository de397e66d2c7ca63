//! `/rooms` endpoints.

use crate::auth::RequestOptions;
use crate::error::ApiError;

use super::client::FrontDeskClient;
use super::query::{PageRequest, QueryPairs, RoomFilters};
use super::types::{NewRoom, Page, Room, RoomUpdate};

impl FrontDeskClient {
    /// One page of rooms matching `filters`.
    pub async fn list_rooms(
        &self,
        page: &PageRequest,
        filters: &RoomFilters,
    ) -> Result<Page<Room>, ApiError> {
        let mut query = QueryPairs::new();
        page.push_into(&mut query);
        filters.push_into(&mut query);
        self.get_json("/rooms", &query).await
    }

    pub async fn get_room(&self, id: u64) -> Result<Room, ApiError> {
        self.get_json(&format!("/rooms/{id}"), &QueryPairs::new())
            .await
    }

    pub async fn create_room(&self, room: &NewRoom) -> Result<Room, ApiError> {
        let options = RequestOptions::new(reqwest::Method::POST).json(room)?;
        self.send_json("/rooms", &QueryPairs::new(), options).await
    }

    pub async fn update_room(&self, id: u64, update: &RoomUpdate) -> Result<Room, ApiError> {
        let options = RequestOptions::put().json(update)?;
        self.send_json(&format!("/rooms/{id}"), &QueryPairs::new(), options)
            .await
    }

    pub async fn delete_room(&self, id: u64) -> Result<(), ApiError> {
        self.send_empty(&format!("/rooms/{id}"), RequestOptions::delete())
            .await
    }
}
