//! `house` namespace: named homes grouping hosts and devices.

use anyhow::Result;
use homelink_core::models::House;
use homelink_core::ApiClient;

use super::{arg, uuid_arg};

pub const HELP: &str = "\
house detail <houseId>            Show one house
house list                        List your houses
house new <name>                  Create a house
house update <houseId> <name>     Rename a house
house delete <houseId>            Delete a house";

fn print_house(house: &House) {
    println!("ID: {}", house.id);
    println!("    Name: {}", house.name);
    println!("    Owner ID: {}", house.owner_id);
}

pub async fn run(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some((sub, rest)) = args.split_first() else {
        println!("{HELP}");
        return Ok(());
    };
    match sub.to_ascii_lowercase().as_str() {
        "detail" => {
            let house = client.house_detail(uuid_arg(rest, 0, "houseId")?).await?;
            print_house(&house);
        }
        "list" => {
            for house in &client.list_houses().await? {
                print_house(house);
            }
        }
        "new" => {
            client.new_house(arg(rest, 0, "name")?).await?;
            println!("Created");
        }
        "update" => {
            let house_id = uuid_arg(rest, 0, "houseId")?;
            let new_name = arg(rest, 1, "name")?;
            client.update_house(house_id, new_name).await?;
            println!("Updated");
        }
        "delete" => {
            client.delete_house(uuid_arg(rest, 0, "houseId")?).await?;
            println!("Deleted");
        }
        _ => println!("{HELP}"),
    }
    Ok(())
}
