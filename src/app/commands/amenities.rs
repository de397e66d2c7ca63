use frontdesk::api::{AmenityFilters, AmenityUpdate, FrontDeskClient, NewAmenity};

use super::{describe, page_request};
use crate::app::output::{print_action, print_json};
use crate::cli::AmenitiesCommand;

pub(crate) async fn run(client: &FrontDeskClient, command: AmenitiesCommand) -> Result<(), String> {
    match command {
        AmenitiesCommand::Active => print_json(&client.active_amenities().await.map_err(describe)?),
        AmenitiesCommand::List {
            page,
            search,
            active_only,
        } => {
            let filters = AmenityFilters {
                search,
                active_only: active_only.then_some(true),
            };
            let amenities = client
                .list_amenities(&page_request(&page), &filters)
                .await
                .map_err(describe)?;
            print_json(&amenities)
        }
        AmenitiesCommand::Show { id } => {
            print_json(&client.get_amenity(id).await.map_err(describe)?)
        }
        AmenitiesCommand::Find { name } => {
            print_json(&client.get_amenity_by_name(&name).await.map_err(describe)?)
        }
        AmenitiesCommand::Create {
            name,
            description,
            icon,
            inactive,
        } => {
            if client.amenity_name_exists(&name).await.map_err(describe)? {
                return Err(format!("an amenity named `{name}` already exists"));
            }
            let amenity = NewAmenity {
                name,
                description,
                icon,
                is_active: Some(!inactive),
            };
            print_json(&client.create_amenity(&amenity).await.map_err(describe)?)
        }
        AmenitiesCommand::Update {
            id,
            name,
            description,
            icon,
            active,
        } => {
            let update = AmenityUpdate {
                name,
                description,
                icon,
                is_active: active,
            };
            if update == AmenityUpdate::default() {
                return Err("nothing to update; pass at least one field".to_string());
            }
            print_json(&client.update_amenity(id, &update).await.map_err(describe)?)
        }
        AmenitiesCommand::Delete { id, permanent } => {
            if permanent {
                client.permanently_delete_amenity(id).await.map_err(describe)?;
                print_action(&format!("amenity {id} permanently deleted"));
            } else {
                client.delete_amenity(id).await.map_err(describe)?;
                print_action(&format!("amenity {id} deactivated"));
            }
            Ok(())
        }
        AmenitiesCommand::Count => {
            print_action(&client.amenity_count().await.map_err(describe)?.to_string());
            Ok(())
        }
        AmenitiesCommand::CheckName { name } => {
            let taken = client.amenity_name_exists(&name).await.map_err(describe)?;
            print_action(if taken { "taken" } else { "available" });
            Ok(())
        }
        AmenitiesCommand::InUse => {
            print_json(&client.amenities_used_by_rooms().await.map_err(describe)?)
        }
    }
}
