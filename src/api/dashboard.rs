//! Dashboard feeds: today's arrivals, departures and occupancy.

use crate::error::ApiError;

use super::client::FrontDeskClient;
use super::query::QueryPairs;
use super::types::{GuestSummary, OccupancyRate};

impl FrontDeskClient {
    pub async fn today_check_ins(&self) -> Result<Vec<GuestSummary>, ApiError> {
        self.get_json("/bookings/today/check-ins", &QueryPairs::new())
            .await
    }

    pub async fn today_check_outs(&self) -> Result<Vec<GuestSummary>, ApiError> {
        self.get_json("/bookings/today/check-outs", &QueryPairs::new())
            .await
    }

    pub async fn occupancy_rate(&self) -> Result<OccupancyRate, ApiError> {
        self.get_json("/dashboard/occupancy-rate", &QueryPairs::new())
            .await
    }
}
