use frontdesk::api::{FrontDeskClient, NewRoomService};

use super::describe;
use crate::app::output::{print_action, print_json};
use crate::cli::ServicesCommand;

pub(crate) async fn run(client: &FrontDeskClient, command: ServicesCommand) -> Result<(), String> {
    match command {
        ServicesCommand::List => print_json(&client.list_room_services().await.map_err(describe)?),
        ServicesCommand::Show { id } => {
            print_json(&client.get_room_service(id).await.map_err(describe)?)
        }
        ServicesCommand::Create {
            room,
            service_type,
            amount,
            description,
        } => {
            let request = NewRoomService {
                room_number: room,
                service_type: service_type.trim().to_ascii_uppercase(),
                amount,
                description,
            };
            print_json(&client.create_room_service(&request).await.map_err(describe)?)
        }
        ServicesCommand::SetStatus { id, status } => {
            client
                .update_room_service_status(id, status)
                .await
                .map_err(describe)?;
            print_action(&format!("service request {id} is now {status}"));
            Ok(())
        }
        ServicesCommand::Delete { id } => {
            client.delete_room_service(id).await.map_err(describe)?;
            print_action(&format!("service request {id} deleted"));
            Ok(())
        }
    }
}
