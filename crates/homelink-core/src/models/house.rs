use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A named home, the grouping unit for hosts and devices.
/// Also the body for `POST /house/update`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct House {
    pub id: Uuid,
    pub name: String,
    #[serde(rename = "ownerId")]
    pub owner_id: Uuid,
}

/// Body for `POST /house/new`.
#[derive(Debug, Serialize)]
pub struct NewHouse<'a> {
    pub name: &'a str,
}

/// Body for `POST /house/delete`.
#[derive(Debug, Serialize)]
pub struct HouseId {
    pub id: Uuid,
}
