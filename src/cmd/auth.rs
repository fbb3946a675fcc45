//! Login, registration, logout, and whoami.

use anyhow::Result;
use console::style;
use dialoguer::{Input, Password};

use taskboard::stores::AuthKind;

use super::{bootstrap, require_login};
use crate::Cli;

pub async fn cmd_login(cli: &Cli, email: Option<&str>) -> Result<()> {
    let ctx = bootstrap(cli)?;

    let email = match email {
        Some(email) => email.to_string(),
        None => Input::new().with_prompt("Email").interact_text()?,
    };
    let password = Password::new().with_prompt("Password").interact()?;

    ctx.stores.auth.set_auth_kind(AuthKind::Login);
    ctx.stores.auth.modify_form(|f| {
        f.email = Some(email);
        f.password = Some(password);
    });
    ctx.stores.auth.login().await;

    let error = ctx.stores.auth.error_message();
    if !error.is_empty() {
        anyhow::bail!("Login failed: {error}");
    }
    match ctx.stores.user.current_user() {
        Some(user) => {
            println!("Logged in as {} <{}>", style(&user.name).bold(), user.email);
            Ok(())
        }
        None => anyhow::bail!("Login failed: server did not return a user"),
    }
}

pub async fn cmd_register(cli: &Cli) -> Result<()> {
    let ctx = bootstrap(cli)?;

    let name: String = Input::new().with_prompt("Name").interact_text()?;
    let email: String = Input::new().with_prompt("Email").interact_text()?;
    let password = Password::new()
        .with_prompt("Password")
        .with_confirmation("Confirm password", "Passwords do not match")
        .interact()?;

    ctx.stores.auth.set_auth_kind(AuthKind::Register);
    ctx.stores.auth.modify_form(|f| {
        f.name = Some(name);
        f.email = Some(email);
        f.password = Some(password.clone());
        f.password_confirmation = Some(password);
    });
    ctx.stores.auth.register().await;

    let error = ctx.stores.auth.error_message();
    if !error.is_empty() {
        anyhow::bail!("Registration failed: {error}");
    }
    match ctx.stores.user.current_user() {
        Some(user) => {
            println!("Registered and logged in as {}", style(&user.name).bold());
            Ok(())
        }
        None => anyhow::bail!("Registration failed: server did not return a user"),
    }
}

pub async fn cmd_logout(cli: &Cli) -> Result<()> {
    let ctx = bootstrap(cli)?;
    ctx.stores.auth.logout();
    println!("Logged out.");
    Ok(())
}

pub async fn cmd_whoami(cli: &Cli) -> Result<()> {
    let ctx = bootstrap(cli)?;
    let user = require_login(&ctx.stores).await?;
    println!("{} <{}>", style(&user.name).bold(), user.email);
    Ok(())
}
