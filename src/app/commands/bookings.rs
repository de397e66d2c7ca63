use frontdesk::api::{AvailabilityQuery, BookingFilters, FrontDeskClient, NewBooking};

use super::{describe, page_request};
use crate::app::output::{print_action, print_json};
use crate::cli::BookingsCommand;

pub(crate) async fn run(client: &FrontDeskClient, command: BookingsCommand) -> Result<(), String> {
    match command {
        BookingsCommand::List { page, search, status } => {
            let filters = BookingFilters { search, status };
            let bookings = client
                .list_bookings(&page_request(&page), &filters)
                .await
                .map_err(describe)?;
            print_json(&bookings)
        }
        BookingsCommand::Show { id } => {
            print_json(&client.get_booking(id).await.map_err(describe)?)
        }
        BookingsCommand::Create {
            first_name,
            last_name,
            pronouns,
            check_in,
            check_out,
            adults,
            children,
            room,
        } => {
            let booking = NewBooking {
                first_name,
                last_name,
                pronouns,
                check_in_date: check_in,
                check_out_date: check_out,
                adult_capacity: adults,
                children_capacity: children,
                room_id: room,
            };
            print_json(&client.create_booking(&booking).await.map_err(describe)?)
        }
        BookingsCommand::SetStatus { id, status } => {
            let booking = client
                .update_booking_status(id, status)
                .await
                .map_err(describe)?;
            print_action(&format!("booking {id} is now {}", booking.status.label()));
            Ok(())
        }
        BookingsCommand::CheckIn { id } => {
            let booking = client.check_in(id).await.map_err(describe)?;
            print_action(&format!("{} checked in (booking {id})", booking.guest_name()));
            Ok(())
        }
        BookingsCommand::CheckOut { id } => {
            let booking = client.check_out(id).await.map_err(describe)?;
            print_action(&format!("{} checked out (booking {id})", booking.guest_name()));
            Ok(())
        }
        BookingsCommand::Cancel { id } => {
            client.cancel_booking(id).await.map_err(describe)?;
            print_action(&format!("booking {id} cancelled"));
            Ok(())
        }
        BookingsCommand::Summary { id } => {
            print_json(&client.checkout_summary(id).await.map_err(describe)?)
        }
        BookingsCommand::Available {
            check_in,
            check_out,
            adults,
            children,
        } => {
            let stay = AvailabilityQuery {
                check_in_date: check_in,
                check_out_date: check_out,
                adult_capacity: adults,
                children_capacity: children,
            };
            print_json(&client.available_rooms(&stay).await.map_err(describe)?)
        }
        BookingsCommand::Upcoming => {
            print_json(&client.upcoming_check_ins().await.map_err(describe)?)
        }
        BookingsCommand::Current => print_json(&client.current_guests().await.map_err(describe)?),
        BookingsCommand::Count { status } => {
            let count = match status {
                Some(status) => client.booking_count_by_status(status).await,
                None => client.booking_count().await,
            }
            .map_err(describe)?;
            print_action(&count.to_string());
            Ok(())
        }
    }
}
