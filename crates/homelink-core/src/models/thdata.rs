use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// One thermo-hygrometer history record.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ThData {
    pub id: Uuid,
    pub temperature: f64,
    pub humidity: f64,
    #[serde(rename = "heatIndex")]
    pub heat_index: f64,
    #[serde(rename = "batteryPercentage")]
    pub battery_percentage: f64,
    pub timestamp: DateTime<Utc>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn parses_wire_format() {
        let json = r#"{
            "id": "5f38a3e2-9c60-4f8b-91a4-7d0a3bd26e11",
            "temperature": 21.4,
            "humidity": 54.0,
            "heatIndex": 21.1,
            "batteryPercentage": 87.5,
            "timestamp": "2023-06-04T18:21:09Z"
        }"#;
        let data: ThData = serde_json::from_str(json).expect("valid thdata record");
        assert_eq!(data.temperature, 21.4);
        assert_eq!(data.heat_index, 21.1);
        assert_eq!(data.timestamp.to_rfc3339(), "2023-06-04T18:21:09+00:00");
    }
}
