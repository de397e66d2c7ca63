//! Query-string builders for list endpoints.
//!
//! Callers count pages from 1; the backend counts from 0.

use std::fmt;
use std::str::FromStr;

use super::types::BookingStatus;

pub(crate) type QueryPairs = Vec<(&'static str, String)>;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Asc,
    Desc,
}

impl SortDirection {
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Asc => "asc",
            Self::Desc => "desc",
        }
    }
}

impl fmt::Display for SortDirection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for SortDirection {
    type Err = String;

    fn from_str(value: &str) -> Result<Self, Self::Err> {
        match value.trim().to_ascii_lowercase().as_str() {
            "asc" => Ok(Self::Asc),
            "desc" => Ok(Self::Desc),
            other => Err(format!("unknown sort direction `{other}` (expected asc or desc)")),
        }
    }
}

/// Paging and sort options shared by list endpoints.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PageRequest {
    /// 1-based page number; 0 is treated as 1.
    pub page: u32,
    pub size: u32,
    pub sort_by: Option<String>,
    pub sort_direction: Option<SortDirection>,
}

impl Default for PageRequest {
    fn default() -> Self {
        Self {
            page: 1,
            size: 10,
            sort_by: None,
            sort_direction: None,
        }
    }
}

impl PageRequest {
    pub fn new(page: u32, size: u32) -> Self {
        Self {
            page,
            size,
            ..Self::default()
        }
    }

    pub fn sorted(mut self, sort_by: impl Into<String>, direction: SortDirection) -> Self {
        self.sort_by = Some(sort_by.into());
        self.sort_direction = Some(direction);
        self
    }

    pub(crate) fn push_into(&self, query: &mut QueryPairs) {
        query.push(("page", self.page.saturating_sub(1).to_string()));
        query.push(("size", self.size.max(1).to_string()));
        if let Some(sort_by) = non_blank(self.sort_by.as_deref()) {
            query.push(("sortBy", sort_by.to_string()));
        }
        if let Some(direction) = self.sort_direction {
            query.push(("sortDirection", direction.to_string()));
        }
    }
}

/// Optional filters for `GET /rooms`.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RoomFilters {
    pub search: Option<String>,
    pub min_price: Option<f64>,
    pub max_price: Option<f64>,
    pub adult_capacity: Option<u32>,
    pub children_capacity: Option<u32>,
}

impl RoomFilters {
    pub(crate) fn push_into(&self, query: &mut QueryPairs) {
        if let Some(search) = non_blank(self.search.as_deref()) {
            query.push(("search", search.to_string()));
        }
        if let Some(min) = self.min_price {
            query.push(("minPrice", min.to_string()));
        }
        if let Some(max) = self.max_price {
            query.push(("maxPrice", max.to_string()));
        }
        if let Some(adults) = self.adult_capacity {
            query.push(("adultCapacity", adults.to_string()));
        }
        if let Some(children) = self.children_capacity {
            query.push(("childrenCapacity", children.to_string()));
        }
    }
}

/// Optional filters for `GET /bookings`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookingFilters {
    pub search: Option<String>,
    pub status: Option<BookingStatus>,
}

impl BookingFilters {
    pub(crate) fn push_into(&self, query: &mut QueryPairs) {
        if let Some(search) = non_blank(self.search.as_deref()) {
            query.push(("search", search.to_string()));
        }
        if let Some(status) = self.status {
            query.push(("status", status.to_string()));
        }
    }
}

/// Optional filters for `GET /amenities`.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct AmenityFilters {
    pub search: Option<String>,
    pub active_only: Option<bool>,
}

impl AmenityFilters {
    pub(crate) fn push_into(&self, query: &mut QueryPairs) {
        if let Some(search) = non_blank(self.search.as_deref()) {
            query.push(("search", search.to_string()));
        }
        if let Some(active_only) = self.active_only {
            query.push(("activeOnly", active_only.to_string()));
        }
    }
}

/// Stay parameters for `GET /bookings/available-rooms`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AvailabilityQuery {
    pub check_in_date: String,
    pub check_out_date: String,
    pub adult_capacity: u32,
    pub children_capacity: u32,
}

impl AvailabilityQuery {
    pub(crate) fn to_query(&self) -> QueryPairs {
        vec![
            ("checkInDate", self.check_in_date.clone()),
            ("checkOutDate", self.check_out_date.clone()),
            ("adultCapacity", self.adult_capacity.to_string()),
            ("childrenCapacity", self.children_capacity.to_string()),
        ]
    }
}

fn non_blank(value: Option<&str>) -> Option<&str> {
    value.map(str::trim).filter(|v| !v.is_empty())
}
