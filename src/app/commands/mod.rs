//! Subcommand handlers. Each returns `Err(message)` for the entry point to
//! print; successful output goes to stdout.

pub(crate) mod amenities;
pub(crate) mod bookings;
pub(crate) mod dashboard;
pub(crate) mod rooms;
pub(crate) mod services;
pub(crate) mod session;

use frontdesk::api::PageRequest;

use crate::cli::PageArgs;

/// Render any library error as the one-line message shown to the operator.
pub(crate) fn describe<E: std::fmt::Display>(err: E) -> String {
    err.to_string()
}

pub(crate) fn page_request(args: &PageArgs) -> PageRequest {
    PageRequest {
        page: args.page,
        size: args.size,
        sort_by: args.sort_by.clone(),
        sort_direction: args.sort,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use frontdesk::api::SortDirection;

    #[test]
    fn page_args_map_onto_request() {
        let args = PageArgs {
            page: 3,
            size: 20,
            sort_by: Some("price".into()),
            sort: Some(SortDirection::Asc),
        };
        let request = page_request(&args);
        assert_eq!(request, PageRequest::new(3, 20).sorted("price", SortDirection::Asc));
    }
}
