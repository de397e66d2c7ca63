//! `/amenities` endpoints.

use crate::auth::RequestOptions;
use crate::error::ApiError;

use super::client::{path_segment, FrontDeskClient};
use super::query::{AmenityFilters, PageRequest, QueryPairs};
use super::types::{Amenity, AmenityUpdate, CountResponse, ExistsResponse, NewAmenity, Page};

impl FrontDeskClient {
    /// One page of amenities, optionally only active ones.
    pub async fn list_amenities(
        &self,
        page: &PageRequest,
        filters: &AmenityFilters,
    ) -> Result<Page<Amenity>, ApiError> {
        let mut query = QueryPairs::new();
        page.push_into(&mut query);
        filters.push_into(&mut query);
        self.get_json("/amenities", &query).await
    }

    /// Amenities that can be attached to rooms.
    pub async fn active_amenities(&self) -> Result<Vec<Amenity>, ApiError> {
        self.get_json("/amenities/active", &QueryPairs::new()).await
    }

    pub async fn get_amenity(&self, id: u64) -> Result<Amenity, ApiError> {
        self.get_json(&format!("/amenities/{id}"), &QueryPairs::new())
            .await
    }

    pub async fn get_amenity_by_name(&self, name: &str) -> Result<Amenity, ApiError> {
        let path = format!("/amenities/name/{}", path_segment(name));
        self.get_json(&path, &QueryPairs::new()).await
    }

    pub async fn create_amenity(&self, amenity: &NewAmenity) -> Result<Amenity, ApiError> {
        let options = RequestOptions::new(reqwest::Method::POST).json(amenity)?;
        self.send_json("/amenities", &QueryPairs::new(), options).await
    }

    pub async fn update_amenity(
        &self,
        id: u64,
        update: &AmenityUpdate,
    ) -> Result<Amenity, ApiError> {
        let options = RequestOptions::put().json(update)?;
        self.send_json(&format!("/amenities/{id}"), &QueryPairs::new(), options)
            .await
    }

    /// Soft delete: the backend deactivates the amenity.
    pub async fn delete_amenity(&self, id: u64) -> Result<(), ApiError> {
        self.send_empty(&format!("/amenities/{id}"), RequestOptions::delete())
            .await
    }

    pub async fn permanently_delete_amenity(&self, id: u64) -> Result<(), ApiError> {
        self.send_empty(
            &format!("/amenities/{id}/permanent"),
            RequestOptions::delete(),
        )
        .await
    }

    pub async fn amenity_count(&self) -> Result<u64, ApiError> {
        let count: CountResponse = self
            .get_json("/amenities/count", &QueryPairs::new())
            .await?;
        Ok(count.count)
    }

    pub async fn amenity_name_exists(&self, name: &str) -> Result<bool, ApiError> {
        let path = format!("/amenities/check-name/{}", path_segment(name));
        let response: ExistsResponse = self.get_json(&path, &QueryPairs::new()).await?;
        Ok(response.exists)
    }

    /// Amenities attached to at least one room.
    pub async fn amenities_used_by_rooms(&self) -> Result<Vec<Amenity>, ApiError> {
        self.get_json("/amenities/used-by-rooms", &QueryPairs::new())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::test_helpers::signed_in_client;
    use crate::testsupport::{MockResponse, MockServer};

    const WIFI: &str = r#"{"id":1,"name":"WiFi","icon":"wifi","isActive":true}"#;

    #[tokio::test]
    async fn active_amenities_decodes_list() {
        let server = MockServer::start(|_| {
            MockResponse::json(
                200,
                r#"[{"id":1,"name":"WiFi","isActive":true},{"id":2,"name":"Mini bar","description":"Stocked daily"}]"#,
            )
        })
        .await;
        let amenities = signed_in_client(&server).active_amenities().await.unwrap();
        assert_eq!(amenities.len(), 2);
        assert_eq!(amenities[0].is_active, Some(true));
        assert_eq!(amenities[1].description.as_deref(), Some("Stocked daily"));
        assert_eq!(server.requests()[0].path(), "/amenities/active");
    }

    #[tokio::test]
    async fn list_amenities_sends_page_and_active_filter() {
        let body = format!(
            r#"{{"content":[{WIFI}],"totalElements":1,"totalPages":1,"size":5,"number":0,"first":true,"last":true}}"#
        );
        let server = MockServer::start(move |_| MockResponse::json(200, &body)).await;
        let page = signed_in_client(&server)
            .list_amenities(
                &PageRequest::new(1, 5),
                &AmenityFilters {
                    search: Some("wi".into()),
                    active_only: Some(true),
                },
            )
            .await
            .unwrap();
        assert_eq!(page.content[0].name, "WiFi");
        let sent = &server.requests()[0];
        assert_eq!(sent.path(), "/amenities");
        assert_eq!(sent.query(), Some("page=0&size=5&search=wi&activeOnly=true"));
    }

    #[tokio::test]
    async fn create_update_and_both_deletes_hit_expected_routes() {
        let server = MockServer::start(|request| match request.method.as_str() {
            "DELETE" => MockResponse::json(204, ""),
            _ => MockResponse::json(200, WIFI),
        })
        .await;
        let client = signed_in_client(&server);

        client
            .create_amenity(&NewAmenity {
                name: "WiFi".into(),
                description: None,
                icon: Some("wifi".into()),
                is_active: Some(true),
            })
            .await
            .unwrap();
        client
            .update_amenity(
                1,
                &AmenityUpdate {
                    is_active: Some(false),
                    ..AmenityUpdate::default()
                },
            )
            .await
            .unwrap();
        client.delete_amenity(1).await.unwrap();
        client.permanently_delete_amenity(1).await.unwrap();

        let requests = server.requests();
        let routes: Vec<(&str, &str)> = requests
            .iter()
            .map(|request| (request.method.as_str(), request.path()))
            .collect();
        assert_eq!(
            routes,
            vec![
                ("POST", "/amenities"),
                ("PUT", "/amenities/1"),
                ("DELETE", "/amenities/1"),
                ("DELETE", "/amenities/1/permanent"),
            ]
        );
        let created: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(created["isActive"], true);
        assert!(created.get("description").is_none());
        assert_eq!(requests[1].body, r#"{"isActive":false}"#);
    }

    #[tokio::test]
    async fn count_name_check_and_usage_lookups() {
        let server = MockServer::start(|request| match request.path() {
            "/amenities/count" => MockResponse::json(200, r#"{"count":7}"#),
            "/amenities/used-by-rooms" => MockResponse::json(200, &format!("[{WIFI}]")),
            path if path.starts_with("/amenities/check-name/") => {
                MockResponse::json(200, r#"{"exists":true}"#)
            }
            _ => MockResponse::json(200, WIFI),
        })
        .await;
        let client = signed_in_client(&server);

        assert_eq!(client.amenity_count().await.unwrap(), 7);
        assert!(client.amenity_name_exists("Mini bar/2").await.unwrap());
        assert_eq!(client.amenities_used_by_rooms().await.unwrap()[0].id, 1);
        assert_eq!(client.get_amenity_by_name("WiFi").await.unwrap().icon.as_deref(), Some("wifi"));

        let paths: Vec<String> = server
            .requests()
            .iter()
            .map(|request| request.path().to_string())
            .collect();
        assert_eq!(paths[1], "/amenities/check-name/Mini%20bar%2F2");
        assert_eq!(paths[3], "/amenities/name/WiFi");
    }
}
