use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A sensor device, attached to a host and optionally associated with a
/// house.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Device {
    pub id: Uuid,
    #[serde(rename = "type")]
    pub kind: String,
    #[serde(rename = "updateFrequency")]
    pub update_frequency: u32,
    #[serde(rename = "hostId")]
    pub host_id: Option<Uuid>,
    #[serde(rename = "houseId")]
    pub house_id: Option<Uuid>,
    #[serde(rename = "ownerId")]
    pub owner_id: Option<Uuid>,
    #[serde(rename = "assocState")]
    pub assoc_state: String,
}

/// Single-id body and the `GET /device/register` response.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DeviceId {
    pub id: Uuid,
}

/// Body for `POST /device/changeUpdateFrequency`.
#[derive(Debug, Serialize)]
pub struct ChangeUpdateFrequency {
    #[serde(rename = "deviceId")]
    pub device_id: Uuid,
    #[serde(rename = "updateFrequency")]
    pub update_frequency: u32,
}

/// Body for `POST /device/houseAssoc`.
#[derive(Debug, Serialize)]
pub struct DeviceHouseAssoc {
    #[serde(rename = "deviceId")]
    pub device_id: Uuid,
    #[serde(rename = "houseId")]
    pub house_id: Uuid,
}
