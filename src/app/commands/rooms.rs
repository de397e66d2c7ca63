use frontdesk::api::{FrontDeskClient, NewRoom, RoomFilters, RoomUpdate};

use super::{describe, page_request};
use crate::app::output::{print_action, print_json};
use crate::cli::RoomsCommand;

pub(crate) async fn run(client: &FrontDeskClient, command: RoomsCommand) -> Result<(), String> {
    match command {
        RoomsCommand::List {
            page,
            search,
            min_price,
            max_price,
            adults,
            children,
        } => {
            let filters = RoomFilters {
                search,
                min_price,
                max_price,
                adult_capacity: adults,
                children_capacity: children,
            };
            let rooms = client
                .list_rooms(&page_request(&page), &filters)
                .await
                .map_err(describe)?;
            print_json(&rooms)
        }
        RoomsCommand::Show { id } => print_json(&client.get_room(id).await.map_err(describe)?),
        RoomsCommand::Create {
            number,
            adults,
            children,
            price,
            amenities,
        } => {
            let room = NewRoom {
                room_number: number,
                adult_capacity: adults,
                children_capacity: children,
                price,
                amenity_ids: amenities,
            };
            print_json(&client.create_room(&room).await.map_err(describe)?)
        }
        RoomsCommand::Update {
            id,
            number,
            adults,
            children,
            price,
            amenities,
        } => {
            let update = RoomUpdate {
                room_number: number,
                adult_capacity: adults,
                children_capacity: children,
                price,
                amenity_ids: amenities,
            };
            if update == RoomUpdate::default() {
                return Err("nothing to update; pass at least one field".to_string());
            }
            print_json(&client.update_room(id, &update).await.map_err(describe)?)
        }
        RoomsCommand::Delete { id } => {
            client.delete_room(id).await.map_err(describe)?;
            print_action(&format!("room {id} deleted"));
            Ok(())
        }
    }
}
