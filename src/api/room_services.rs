//! `/room-services` endpoints.

use crate::auth::RequestOptions;
use crate::error::ApiError;

use super::client::FrontDeskClient;
use super::query::QueryPairs;
use super::types::{NewRoomService, RoomService, RoomServiceStatus};

impl FrontDeskClient {
    /// Raise a service request; the backend adds the charge to the stay.
    pub async fn create_room_service(
        &self,
        request: &NewRoomService,
    ) -> Result<RoomService, ApiError> {
        let options = RequestOptions::new(reqwest::Method::POST).json(request)?;
        self.send_json("/room-services", &QueryPairs::new(), options)
            .await
    }

    pub async fn list_room_services(&self) -> Result<Vec<RoomService>, ApiError> {
        self.get_json("/room-services", &QueryPairs::new()).await
    }

    pub async fn get_room_service(&self, id: u64) -> Result<RoomService, ApiError> {
        self.get_json(&format!("/room-services/{id}"), &QueryPairs::new())
            .await
    }

    pub async fn update_room_service_status(
        &self,
        id: u64,
        status: RoomServiceStatus,
    ) -> Result<RoomService, ApiError> {
        let query: QueryPairs = vec![("status", status.to_string())];
        self.send_json(
            &format!("/room-services/{id}/status"),
            &query,
            RequestOptions::put(),
        )
        .await
    }

    pub async fn delete_room_service(&self, id: u64) -> Result<(), ApiError> {
        self.send_empty(&format!("/room-services/{id}"), RequestOptions::delete())
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::test_helpers::signed_in_client;
    use crate::testsupport::{MockResponse, MockServer};

    const SERVICE: &str = r#"{"id":5,"roomNumber":"101","serviceType":"LAUNDRY","amount":15.5,
        "status":"PENDING","requestedAt":"2025-03-14T09:30:00","guestName":"Ada Lovelace"}"#;

    #[tokio::test]
    async fn create_then_complete_service_request() {
        let server = MockServer::start(|request| {
            if request.path().ends_with("/status") {
                MockResponse::json(200, &SERVICE.replace("PENDING", "COMPLETED"))
            } else {
                MockResponse::json(200, SERVICE)
            }
        })
        .await;
        let client = signed_in_client(&server);

        let created = client
            .create_room_service(&NewRoomService {
                room_number: "101".into(),
                service_type: "LAUNDRY".into(),
                amount: 15.5,
                description: None,
            })
            .await
            .unwrap();
        assert_eq!(created.status, RoomServiceStatus::Pending);
        let done = client
            .update_room_service_status(5, RoomServiceStatus::Completed)
            .await
            .unwrap();
        assert_eq!(done.status, RoomServiceStatus::Completed);

        let requests = server.requests();
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body["serviceType"], "LAUNDRY");
        assert!(body.get("description").is_none());
        assert_eq!(requests[1].method, "PUT");
        assert_eq!(requests[1].target, "/room-services/5/status?status=COMPLETED");
    }

    #[tokio::test]
    async fn list_get_and_delete() {
        let list = format!("[{SERVICE}]");
        let server = MockServer::start(move |request| match request.method.as_str() {
            "DELETE" => MockResponse::json(200, ""),
            _ if request.path() == "/room-services" => MockResponse::json(200, &list),
            _ => MockResponse::json(200, SERVICE),
        })
        .await;
        let client = signed_in_client(&server);

        assert_eq!(client.list_room_services().await.unwrap().len(), 1);
        assert_eq!(client.get_room_service(5).await.unwrap().id, 5);
        client.delete_room_service(5).await.unwrap();
        assert_eq!(server.count("/room-services/5"), 2);
    }
}
