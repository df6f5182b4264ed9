//! `user` namespace: account details and edits.

use anyhow::Result;
use homelink_core::ApiClient;

use super::{prompt, uuid_arg};

pub const HELP: &str = "\
user detail              Show the current user
user edit mail           Change the account mail (prompts)
user edit password       Change the account password (prompts, logs out)
user enable <userId>     Enable a user account (admin only)
user disable <userId>    Disable a user account (admin only)";

pub async fn run(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some((sub, rest)) = args.split_first() else {
        println!("{HELP}");
        return Ok(());
    };
    match sub.to_ascii_lowercase().as_str() {
        "detail" => {
            let user = client.user_detail().await?;
            println!("ID: {}", user.id);
            println!("    Name: {}", user.name);
            println!("    Mail: {}", user.mail);
        }
        "edit" => edit(client, rest).await?,
        "enable" => {
            client.enable_user(uuid_arg(rest, 0, "userId")?).await?;
            println!("Enabled");
        }
        "disable" => {
            client.disable_user(uuid_arg(rest, 0, "userId")?).await?;
            println!("Disabled");
        }
        _ => println!("{HELP}"),
    }
    Ok(())
}

async fn edit(client: &ApiClient, args: &[&str]) -> Result<()> {
    let Some(field) = args.first() else {
        println!("{HELP}");
        return Ok(());
    };
    match field.to_ascii_lowercase().as_str() {
        "mail" => {
            let new_mail = prompt("New mail: ")?;
            if new_mail.is_empty() {
                println!("Empty mail");
                return Ok(());
            }
            client.edit_mail(&new_mail).await?;
            println!("Updated");
        }
        "password" => {
            let old_password = rpassword::prompt_password("Old password: ")?;
            let new_password = rpassword::prompt_password("New password: ")?;
            if old_password.is_empty() || new_password.is_empty() {
                println!("Passwords empty");
                return Ok(());
            }
            client.edit_password(&old_password, &new_password).await?;
            // The old tokens are tied to the old password
            client.logout().await;
            println!("Success. You need to login again.");
        }
        _ => println!("{HELP}"),
    }
    Ok(())
}
