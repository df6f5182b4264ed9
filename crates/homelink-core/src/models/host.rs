use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A bridge unit that devices connect through.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Host {
    pub id: Uuid,
    #[serde(rename = "houseId")]
    pub house_id: Option<Uuid>,
    #[serde(rename = "ownerId")]
    pub owner_id: Option<Uuid>,
    #[serde(rename = "assocState")]
    pub assoc_state: String,
}

/// Single-id body and the `GET /host/register` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct HostId {
    pub id: Uuid,
}

/// Body for `POST /host/houseAssoc`.
#[derive(Debug, Serialize)]
pub struct HostHouseAssoc {
    #[serde(rename = "hostId")]
    pub host_id: Uuid,
    #[serde(rename = "houseId")]
    pub house_id: Uuid,
}
