//! `thdata` namespace: thermo-hygrometer history records.

use anyhow::Result;
use chrono::Local;
use homelink_core::models::ThData;
use homelink_core::ApiClient;

use super::uuid_arg;

pub const HELP: &str = "\
thdata detail <recordId>    Show one history record
thdata list <deviceId>      List all records for a device";

fn print_record(data: &ThData) {
    println!("ID: {}", data.id);
    println!("    Temperature: {}°C", data.temperature);
    println!("    Humidity: {}%", data.humidity);
    println!("    Heat Index: {}°C", data.heat_index);
    println!("    Battery Percentage: {}%", data.battery_percentage);
    println!("    Timestamp: {}", data.timestamp.with_timezone(&Local));
}

pub async fn run(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some((sub, rest)) = args.split_first() else {
        println!("{HELP}");
        return Ok(());
    };
    match sub.to_ascii_lowercase().as_str() {
        "detail" => {
            let data = client.thdata_detail(uuid_arg(rest, 0, "recordId")?).await?;
            print_record(&data);
        }
        "list" => {
            for record in &client.thdata_list(uuid_arg(rest, 0, "deviceId")?).await? {
                print_record(record);
            }
        }
        _ => println!("{HELP}"),
    }
    Ok(())
}
