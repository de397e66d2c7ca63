use frontdesk::api::FrontDeskClient;
use serde::Serialize;

use super::describe;
use crate::app::output::print_json;

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct DashboardView<A, D, O> {
    check_ins: A,
    check_outs: D,
    occupancy: O,
}

/// Fetch the three dashboard panels concurrently.
pub(crate) async fn run(client: &FrontDeskClient) -> Result<(), String> {
    let (check_ins, check_outs, occupancy) = tokio::try_join!(
        client.today_check_ins(),
        client.today_check_outs(),
        client.occupancy_rate(),
    )
    .map_err(describe)?;
    print_json(&DashboardView {
        check_ins,
        check_outs,
        occupancy,
    })
}
