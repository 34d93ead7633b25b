// register / login / logout / profile.

use anyhow::{bail, Context, Result};

use crate::api::ApiClient;
use crate::config::Config;
use crate::prompt;

const MIN_PASSWORD_LEN: usize = 8;

pub fn register(client: &mut ApiClient) -> Result<()> {
    println!("Registering new account...");

    let name = prompt::text("Name", true)?;
    let email = prompt::email("Email")?;
    let password = prompt::password("Password (min 8 characters)")?;
    if password.chars().count() < MIN_PASSWORD_LEN {
        bail!("password must be at least 8 characters");
    }

    let spinner = prompt::spinner("Registering...");
    let result = client.register(&name, &email, &password);
    spinner.finish_and_clear();
    let auth = result.context("registration failed")?;

    println!("Account registered successfully!");
    println!("Welcome, {}!", auth.user.name);
    Ok(())
}

pub fn login(client: &mut ApiClient) -> Result<()> {
    println!("Logging in...");

    let email = prompt::email("Email")?;
    let password = prompt::password("Password")?;

    let spinner = prompt::spinner("Logging in...");
    let result = client.login(&email, &password);
    spinner.finish_and_clear();
    let auth = result.context("login failed")?;

    println!("Login successful!");
    println!("Welcome back, {}!", auth.user.name);
    Ok(())
}

/// Clears the stored token unconditionally; no network call involved.
pub fn logout(config: &mut Config) -> Result<()> {
    config.clear_token()?;
    println!("Logged out successfully");
    Ok(())
}

pub fn profile(client: &mut ApiClient) -> Result<()> {
    client.require_token()?;

    let profile = client.profile().context("failed to get profile")?;

    println!("Profile Information:");
    println!("  User ID: {}", profile.user_id);
    println!("  Email: {}", profile.email);
    println!("  Token issued at: {}", profile.issued_at);
    println!("  Token expires at: {}", profile.expires_at);
    Ok(())
}
