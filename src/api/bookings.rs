//! `/bookings` endpoints: reservations and the guest lifecycle.
//!
//! Status moves `BOOKED -> CHECKED_IN -> CHECKED_OUT`, or `BOOKED ->
//! CANCELLED`. The backend enforces the transitions; a rejected move comes
//! back as [`ApiError::Status`].

use crate::auth::RequestOptions;
use crate::error::ApiError;

use super::client::FrontDeskClient;
use super::query::{AvailabilityQuery, BookingFilters, PageRequest, QueryPairs};
use super::types::{Booking, BookingStatus, CheckoutSummary, CountResponse, NewBooking, Page, Room};

impl FrontDeskClient {
    pub async fn list_bookings(
        &self,
        page: &PageRequest,
        filters: &BookingFilters,
    ) -> Result<Page<Booking>, ApiError> {
        let mut query = QueryPairs::new();
        page.push_into(&mut query);
        filters.push_into(&mut query);
        self.get_json("/bookings", &query).await
    }

    pub async fn get_booking(&self, id: u64) -> Result<Booking, ApiError> {
        self.get_json(&format!("/bookings/{id}"), &QueryPairs::new())
            .await
    }

    pub async fn create_booking(&self, booking: &NewBooking) -> Result<Booking, ApiError> {
        let options = RequestOptions::new(reqwest::Method::POST).json(booking)?;
        self.send_json("/bookings", &QueryPairs::new(), options)
            .await
    }

    pub async fn update_booking_status(
        &self,
        id: u64,
        status: BookingStatus,
    ) -> Result<Booking, ApiError> {
        let query: QueryPairs = vec![("status", status.to_string())];
        self.send_json(&format!("/bookings/{id}/status"), &query, RequestOptions::put())
            .await
    }

    pub async fn cancel_booking(&self, id: u64) -> Result<Booking, ApiError> {
        self.booking_action(id, "cancel").await
    }

    pub async fn check_in(&self, id: u64) -> Result<Booking, ApiError> {
        self.booking_action(id, "check-in").await
    }

    pub async fn check_out(&self, id: u64) -> Result<Booking, ApiError> {
        self.booking_action(id, "check-out").await
    }

    /// Room total, service charges and grand total for a stay.
    pub async fn checkout_summary(&self, id: u64) -> Result<CheckoutSummary, ApiError> {
        self.get_json(&format!("/bookings/{id}/checkout-summary"), &QueryPairs::new())
            .await
    }

    /// Rooms free for the whole stay that fit the party.
    pub async fn available_rooms(&self, stay: &AvailabilityQuery) -> Result<Vec<Room>, ApiError> {
        self.get_json("/bookings/available-rooms", &stay.to_query())
            .await
    }

    pub async fn upcoming_check_ins(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/bookings/upcoming-checkins", &QueryPairs::new())
            .await
    }

    pub async fn current_guests(&self) -> Result<Vec<Booking>, ApiError> {
        self.get_json("/bookings/current-guests", &QueryPairs::new())
            .await
    }

    pub async fn booking_count(&self) -> Result<u64, ApiError> {
        let count: CountResponse = self.get_json("/bookings/count", &QueryPairs::new()).await?;
        Ok(count.count)
    }

    pub async fn booking_count_by_status(&self, status: BookingStatus) -> Result<u64, ApiError> {
        let count: CountResponse = self
            .get_json(&format!("/bookings/count/{status}"), &QueryPairs::new())
            .await?;
        Ok(count.count)
    }

    async fn booking_action(&self, id: u64, action: &str) -> Result<Booking, ApiError> {
        let booking: Booking = self
            .send_json(
                &format!("/bookings/{id}/{action}"),
                &QueryPairs::new(),
                RequestOptions::put(),
            )
            .await?;
        tracing::info!(booking = id, action, status = %booking.status, "booking updated");
        Ok(booking)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api::client::test_helpers::signed_in_client;
    use crate::testsupport::{MockResponse, MockServer};

    fn booking_json(status: &str) -> String {
        format!(
            r#"{{"id":12,"firstName":"Ada","lastName":"Lovelace","pronouns":"she/her","checkInDate":"2025-03-14",
                "checkOutDate":"2025-03-16","adultCapacity":2,"childrenCapacity":0,"totalAmount":240.0,
                "status":"{status}","roomId":3,"roomNumber":"101","roomPrice":120.0}}"#
        )
    }

    #[tokio::test]
    async fn lifecycle_actions_use_put_paths() {
        let server = MockServer::start(|request| {
            let status = match request.path() {
                "/bookings/12/check-in" => "CHECKED_IN",
                "/bookings/12/check-out" => "CHECKED_OUT",
                "/bookings/12/cancel" => "CANCELLED",
                _ => "BOOKED",
            };
            MockResponse::json(200, &booking_json(status))
        })
        .await;
        let client = signed_in_client(&server);

        assert_eq!(client.check_in(12).await.unwrap().status, BookingStatus::CheckedIn);
        assert_eq!(client.check_out(12).await.unwrap().status, BookingStatus::CheckedOut);
        assert_eq!(client.cancel_booking(12).await.unwrap().status, BookingStatus::Cancelled);
        let updated = client
            .update_booking_status(12, BookingStatus::Booked)
            .await
            .unwrap();
        assert_eq!(updated.status, BookingStatus::Booked);

        let requests = server.requests();
        assert!(requests.iter().all(|r| r.method == "PUT"));
        assert_eq!(requests[3].target, "/bookings/12/status?status=BOOKED");
    }

    #[tokio::test]
    async fn list_bookings_filters_by_status() {
        let body = format!(
            r#"{{"content":[{}],"totalElements":1,"totalPages":1,"size":5,"number":0}}"#,
            booking_json("CHECKED_IN")
        );
        let server = MockServer::start(move |_| MockResponse::json(200, &body)).await;
        let page = signed_in_client(&server)
            .list_bookings(
                &PageRequest::new(1, 5),
                &BookingFilters {
                    status: Some(BookingStatus::CheckedIn),
                    ..BookingFilters::default()
                },
            )
            .await
            .unwrap();
        assert_eq!(page.total_elements, 1);
        assert_eq!(
            server.requests()[0].target,
            "/bookings?page=0&size=5&status=CHECKED_IN"
        );
    }

    #[tokio::test]
    async fn create_booking_posts_guest_and_stay() {
        let server = MockServer::start(|_| MockResponse::json(201, &booking_json("BOOKED"))).await;
        let booking = signed_in_client(&server)
            .create_booking(&NewBooking {
                first_name: "Ada".into(),
                last_name: "Lovelace".into(),
                pronouns: "she/her".into(),
                check_in_date: "2025-03-14".into(),
                check_out_date: "2025-03-16".into(),
                adult_capacity: 2,
                children_capacity: 0,
                room_id: 3,
            })
            .await
            .unwrap();
        assert_eq!(booking.id, 12);
        let body: serde_json::Value = serde_json::from_str(&server.requests()[0].body).unwrap();
        assert_eq!(body["checkInDate"], "2025-03-14");
        assert_eq!(body["roomId"], 3);
    }

    #[tokio::test]
    async fn available_rooms_sends_stay_parameters() {
        let server = MockServer::start(|_| MockResponse::json(200, "[]")).await;
        let rooms = signed_in_client(&server)
            .available_rooms(&AvailabilityQuery {
                check_in_date: "2025-03-14".into(),
                check_out_date: "2025-03-16".into(),
                adult_capacity: 2,
                children_capacity: 1,
            })
            .await
            .unwrap();
        assert!(rooms.is_empty());
        assert_eq!(
            server.requests()[0].target,
            "/bookings/available-rooms?checkInDate=2025-03-14&checkOutDate=2025-03-16&adultCapacity=2&childrenCapacity=1"
        );
    }

    #[tokio::test]
    async fn counts_unwrap_count_field() {
        let server = MockServer::start(|request| {
            if request.path() == "/bookings/count" {
                MockResponse::json(200, r#"{"count":42}"#)
            } else {
                MockResponse::json(200, r#"{"count":7}"#)
            }
        })
        .await;
        let client = signed_in_client(&server);
        assert_eq!(client.booking_count().await.unwrap(), 42);
        assert_eq!(
            client
                .booking_count_by_status(BookingStatus::CheckedOut)
                .await
                .unwrap(),
            7
        );
        assert_eq!(server.requests()[1].path(), "/bookings/count/CHECKED_OUT");
    }

    #[tokio::test]
    async fn checkout_summary_lists_service_charges() {
        let server = MockServer::start(|_| {
            MockResponse::json(
                200,
                r#"{"roomTotal":240.0,"serviceCharges":[{"name":"LAUNDRY","amount":15.5}],
                    "grandTotal":255.5,"totalNights":2,"checkInDate":"2025-03-14","checkOutDate":"2025-03-16"}"#,
            )
        })
        .await;
        let summary = signed_in_client(&server).checkout_summary(12).await.unwrap();
        assert_eq!(summary.total_nights, 2);
        assert_eq!(summary.service_charges[0].amount, 15.5);
        assert_eq!(summary.grand_total, 255.5);
    }

    #[tokio::test]
    async fn rejected_transition_surfaces_status() {
        let server = MockServer::start(|_| {
            MockResponse::json(400, r#"{"message":"Booking is not checked in"}"#)
        })
        .await;
        let err = signed_in_client(&server).check_out(12).await.unwrap_err();
        assert_eq!(err.to_string(), "status 400: Booking is not checked in");
    }
}
