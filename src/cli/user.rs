use crate::{services::auth, Config, Database};
use anyhow::Result;
use std::path::Path;

use super::UserCommand;

fn prompt_new_password(prompt: &str) -> Result<String> {
    let password = rpassword::prompt_password(prompt)?;
    let password_confirm = rpassword::prompt_password("Confirm password: ")?;
    if password != password_confirm {
        anyhow::bail!("Passwords do not match");
    }
    Ok(password)
}

pub async fn run(config_path: &Path, command: UserCommand) -> Result<()> {
    let config = Config::load(config_path)?;
    let db = Database::open(&config.database.path, config.database.pool_size)?;
    db.migrate()?;

    match command {
        UserCommand::Add {
            username,
            email,
            role,
            password,
        } => {
            let password = match password {
                Some(p) => p,
                None => prompt_new_password("Password: ")?,
            };

            let role = role.parse().map_err(|_| {
                anyhow::anyhow!("Invalid role '{}': expected admin, author or viewer", role)
            })?;
            auth::create_user(&db, &username, &email, &password, role)?;
            tracing::info!("User '{}' created", username);
        }
        UserCommand::List => {
            let users = auth::list_users(&db)?;

            println!("{:<20} {:<30} {:<8} {:<6}", "USERNAME", "EMAIL", "ROLE", "ADMIN");
            println!("{}", "-".repeat(66));
            for user in users {
                let admin = if auth::is_admin(&user, &config.auth) {
                    "yes"
                } else {
                    "no"
                };
                println!(
                    "{:<20} {:<30} {:<8} {:<6}",
                    user.username,
                    user.email,
                    user.role.to_string(),
                    admin
                );
            }
        }
        UserCommand::Remove { username } => {
            if auth::delete_user(&db, &username)? {
                tracing::info!("User '{}' removed", username);
            } else {
                tracing::warn!("User '{}' not found", username);
            }
        }
        UserCommand::Passwd { username } => {
            let password = prompt_new_password("New password: ")?;
            auth::update_password(&db, &username, &password)?;
            tracing::info!("Password updated for '{}'", username);
        }
    }

    Ok(())
}
