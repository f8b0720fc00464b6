//! Account commands

use anyhow::Context;
use std::io::BufRead;

use magicpen_core::{App, Credentials, Registration};

use super::fail;

fn resolve_password(password: Option<String>) -> anyhow::Result<String> {
    if let Some(password) = password {
        return Ok(password);
    }

    eprint!("Password: ");
    let mut line = String::new();
    std::io::stdin()
        .lock()
        .read_line(&mut line)
        .context("reading password from stdin")?;

    let password = line.trim_end_matches(['\r', '\n']).to_string();
    if password.is_empty() {
        anyhow::bail!("Password is required");
    }
    Ok(password)
}

pub async fn register(
    app: &App,
    name: String,
    email: String,
    password: Option<String>,
) -> anyhow::Result<()> {
    let registration = Registration {
        name,
        email,
        password: resolve_password(password)?,
    };

    let response = app.client().register(&registration).await?;
    if !response.success {
        return fail(response.message.as_deref().unwrap_or("Registration failed"));
    }

    println!(
        "{}",
        response
            .message
            .as_deref()
            .unwrap_or("Account created. You can now log in.")
    );
    Ok(())
}

pub async fn login(app: &App, email: String, password: Option<String>) -> anyhow::Result<()> {
    let credentials = Credentials {
        email,
        password: resolve_password(password)?,
    };

    let response = app.client().login(&credentials).await?;
    if !response.success || !app.session().is_authenticated() {
        return fail(response.message.as_deref().unwrap_or("Login failed"));
    }

    match response.user {
        Some(user) => println!("Signed in as {} <{}>", user.name, user.email),
        None => println!("Signed in"),
    }
    Ok(())
}

pub fn logout(app: &App) -> anyhow::Result<()> {
    app.client().logout();
    println!("Signed out");
    Ok(())
}

pub async fn me(app: &App) -> anyhow::Result<()> {
    if !app.session().is_authenticated() {
        return fail("Not signed in");
    }

    let response = app.client().get_me().await?;
    let Some(user) = response.user.filter(|_| response.success) else {
        return fail("Could not load the current user");
    };

    println!("{} <{}>", user.name, user.email);
    if let Some(account_type) = user.account_type.as_deref() {
        println!("Account: {}", account_type);
    }
    println!("Posts left: {}", user.allowance());
    Ok(())
}
