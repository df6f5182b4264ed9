//! `host` namespace: bridge units.

use anyhow::Result;
use homelink_core::models::Host;
use homelink_core::ApiClient;

use super::{fmt_id, uuid_arg};

pub const HELP: &str = "\
host detail <hostId>               Show one host
host list owner                    List your hosts
host list house <houseId>          List hosts in a house
host assoc begin <hostId>          Start associating a host
host assoc house <hostId> <houseId> Bind a host to a house
host assoc reset <hostId>          Clear a host association
host register                      Register a new host (admin only)
host enable <hostId>               Enable a host (admin only)
host disable <hostId>              Disable a host (admin only)";

fn print_host(host: &Host) {
    println!("ID: {}", host.id);
    println!("    House ID: {}", fmt_id(host.house_id));
    println!("    Owner ID: {}", fmt_id(host.owner_id));
    println!("    Association State: {}", host.assoc_state);
}

pub async fn run(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some((sub, rest)) = args.split_first() else {
        println!("{HELP}");
        return Ok(());
    };
    match sub.to_ascii_lowercase().as_str() {
        "detail" => {
            let host = client.host_detail(uuid_arg(rest, 0, "hostId")?).await?;
            print_host(&host);
        }
        "list" => list(client, rest).await?,
        "assoc" => assoc(client, rest).await?,
        "register" => {
            let new_id = client.register_host().await?;
            println!("{}", new_id.id);
        }
        "enable" => {
            client.enable_host(uuid_arg(rest, 0, "hostId")?).await?;
            println!("Enabled");
        }
        "disable" => {
            client.disable_host(uuid_arg(rest, 0, "hostId")?).await?;
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
    let hosts = match scope.to_ascii_lowercase().as_str() {
        "owner" => client.list_hosts_by_owner().await?,
        "house" => client.list_hosts_by_house(uuid_arg(rest, 0, "houseId")?).await?,
        _ => {
            println!("{HELP}");
            return Ok(());
        }
    };
    for host in &hosts {
        print_host(host);
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
            client.begin_host_assoc(uuid_arg(rest, 0, "hostId")?).await?;
            println!("Association started");
        }
        "house" => {
            let host_id = uuid_arg(rest, 0, "hostId")?;
            let house_id = uuid_arg(rest, 1, "houseId")?;
            client.host_house_assoc(host_id, house_id).await?;
            println!("Associated");
        }
        "reset" => {
            client.reset_host_assoc(uuid_arg(rest, 0, "hostId")?).await?;
            println!("Association reset");
        }
        _ => println!("{HELP}"),
    }
    Ok(())
}
