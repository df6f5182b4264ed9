//! `device` namespace: sensor devices.

use anyhow::Result;
use homelink_core::models::Device;
use homelink_core::ApiClient;

use super::{arg, fmt_id, uuid_arg};

pub const HELP: &str = "\
device detail <deviceId>             Show one device
device list owner                    List your devices
device list house <houseId>          List devices in a house
device list host <hostId>            List devices behind a host
device freq <deviceId> <seconds>     Change the update frequency
device assoc begin <deviceId>        Start associating a device
device assoc house <devId> <houseId> Bind a device to a house
device assoc reset <deviceId>        Clear a device association
device register                      Register a new device (admin only)
device enable <deviceId>             Enable a device (admin only)
device disable <deviceId>            Disable a device (admin only)";

fn print_device(device: &Device) {
    println!("ID: {}", device.id);
    println!("    Type: {}", device.kind);
    println!("    Update Frequency: {}", device.update_frequency);
    println!("    Host ID: {}", fmt_id(device.host_id));
    println!("    House ID: {}", fmt_id(device.house_id));
    println!("    Owner ID: {}", fmt_id(device.owner_id));
    println!("    Association State: {}", device.assoc_state);
}

pub async fn run(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some((sub, rest)) = args.split_first() else {
        println!("{HELP}");
        return Ok(());
    };
    match sub.to_ascii_lowercase().as_str() {
        "detail" => {
            let device = client.device_detail(uuid_arg(rest, 0, "deviceId")?).await?;
            print_device(&device);
        }
        "list" => list(client, rest).await?,
        "freq" => {
            let device_id = uuid_arg(rest, 0, "deviceId")?;
            let seconds: u32 = arg(rest, 1, "seconds")?.parse().map_err(|_| {
                homelink_core::ClientError::MalformedInput("Malformed number: seconds".to_string())
            })?;
            client.change_update_frequency(device_id, seconds).await?;
            println!("Updated");
        }
        "assoc" => assoc(client, rest).await?,
        "register" => {
            let new_id = client.register_device().await?;
            println!("{}", new_id.id);
        }
        "enable" => {
            client.enable_device(uuid_arg(rest, 0, "deviceId")?).await?;
            println!("Enabled");
        }
        "disable" => {
            client.disable_device(uuid_arg(rest, 0, "deviceId")?).await?;
            println!("Disabled");
        }
        _ => println!("{HELP}"),
    }
    Ok(())
}

async fn list(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some((scope, rest)) = args.split_first() else {
        println!("{HELP}");
        return Ok(());
    };
    let devices = match scope.to_ascii_lowercase().as_str() {
        "owner" => client.list_devices_by_owner().await?,
        "house" => client.list_devices_by_house(uuid_arg(rest, 0, "houseId")?).await?,
        "host" => client.list_devices_by_host(uuid_arg(rest, 0, "hostId")?).await?,
        _ => {
            println!("{HELP}");
            return Ok(());
        }
    };
    for device in &devices {
        print_device(device);
    }
    Ok(())
}

async fn assoc(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some((action, rest)) = args.split_first() else {
        println!("{HELP}");
        return Ok(());
    };
    match action.to_ascii_lowercase().as_str() {
        "begin" => {
            client.begin_device_assoc(uuid_arg(rest, 0, "deviceId")?).await?;
            println!("Association started");
        }
        "house" => {
            let device_id = uuid_arg(rest, 0, "deviceId")?;
            let house_id = uuid_arg(rest, 1, "houseId")?;
            client.device_house_assoc(device_id, house_id).await?;
            println!("Associated");
        }
        "reset" => {
            client.reset_device_assoc(uuid_arg(rest, 0, "deviceId")?).await?;
            println!("Association reset");
        }
        _ => println!("{HELP}"),
    }
    Ok(())
}
