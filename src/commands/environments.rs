// Environment commands. The owning project comes from an explicit
// argument, the selected project in the config, or an interactive pick.

use anyhow::{Context, Result};

use crate::api::ApiClient;
use crate::prompt;

use super::{opt, resolve_project};

pub fn create(client: &mut ApiClient, project_id: Option<String>) -> Result<()> {
    client.require_token()?;

    let project_id = resolve_project(client, project_id)?;
    let project = client
        .get_project(&project_id)
        .context("failed to get project")?;

    println!(
        "Creating environment for project: {} (ID: {})",
        project.name, project.id
    );
    if !prompt::confirm("Is this correct?")? {
        println!("Operation cancelled");
        return Ok(());
    }

    let name = prompt::text("Environment name", true)?;
    let description = prompt::text("Description (optional)", false)?;

    let spinner = prompt::spinner("Creating environment...");
    let result = client.create_environment(&project_id, &name, opt(&description));
    spinner.finish_and_clear();
    let environment = result.context("failed to create environment")?;

    println!("Environment created successfully!");
    println!("  ID: {}", environment.id);
    println!("  Name: {}", environment.name);
    if let Some(description) = environment.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description: {}", description);
    }
    println!("  Project ID: {}", environment.project_id);
    Ok(())
}

pub fn list(client: &mut ApiClient, project_id: Option<String>) -> Result<()> {
    client.require_token()?;

    let project_id = resolve_project(client, project_id)?;
    let environments = client
        .list_environments(&project_id)
        .context("failed to list environments")?;

    if environments.is_empty() {
        println!("No environments found");
        return Ok(());
    }

    let current = client.config().environment.clone();

    println!("Found {} environment(s):\n", environments.len());
    for environment in &environments {
        if current.as_deref() == Some(environment.id.as_str()) {
            println!("* ID: {}", environment.id);
        } else {
            println!("  ID: {}", environment.id);
        }
        println!("  Name: {}", environment.name);
        if let Some(description) = environment.description.as_deref().filter(|d| !d.is_empty()) {
            println!("  Description: {}", description);
        }
        if let Some(created) = environment.created_at {
            println!("  Created: {}", created.to_rfc3339());
        }
        println!();
    }
    Ok(())
}

pub fn get(client: &mut ApiClient, environment_id: &str, project_id: Option<String>) -> Result<()> {
    client.require_token()?;

    let project_id = resolve_project(client, project_id)?;
    let environment = client
        .get_environment(&project_id, environment_id)
        .context("failed to get environment")?;

    println!("Environment Details:");
    println!("  ID: {}", environment.id);
    println!("  Name: {}", environment.name);
    if let Some(description) = environment.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description: {}", description);
    }
    println!("  Project ID: {}", environment.project_id);
    if let Some(created) = environment.created_at {
        println!("  Created: {}", created.to_rfc3339());
    }
    if let Some(updated) = environment.updated_at {
        println!("  Updated: {}", updated.to_rfc3339());
    }
    Ok(())
}

pub fn update(
    client: &mut ApiClient,
    environment_id: &str,
    project_id: Option<String>,
) -> Result<()> {
    client.require_token()?;

    let project_id = resolve_project(client, project_id)?;
    let environment = client
        .get_environment(&project_id, environment_id)
        .context("failed to get environment")?;

    let name = prompt::text_with_default("Environment name", &environment.name)?;

    let mut description = prompt::text("Description (leave empty to keep current)", false)?;
    if description.is_empty() {
        description = environment.description.clone().unwrap_or_default();
    }

    let updated = client
        .update_environment(&project_id, environment_id, &name, opt(&description))
        .context("failed to update environment")?;

    println!("Environment updated successfully!");
    println!("  Name: {}", updated.name);
    if let Some(description) = updated.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description: {}", description);
    }
    Ok(())
}

pub fn delete(
    client: &mut ApiClient,
    environment_id: &str,
    project_id: Option<String>,
) -> Result<()> {
    client.require_token()?;

    let project_id = resolve_project(client, project_id)?;
    let environment = client
        .get_environment(&project_id, environment_id)
        .context("failed to get environment")?;

    println!(
        "Are you sure you want to delete environment '{}' (ID: {})?",
        environment.name, environment.id
    );
    if !prompt::confirm("This action cannot be undone")? {
        println!("Operation cancelled");
        return Ok(());
    }

    client
        .delete_environment(&project_id, environment_id)
        .context("failed to delete environment")?;
    println!("Environment deleted successfully");
    Ok(())
}

pub fn use_environment(client: &mut ApiClient, id: &str) -> Result<()> {
    client.require_token()?;

    let project_id = resolve_project(client, None)?;
    let environment = client
        .get_environment(&project_id, id)
        .context("failed to get environment")?;

    client.config_mut().set_environment(&environment.id)?;
    println!(
        "Now using environment: {} (ID: {})",
        environment.name, environment.id
    );
    Ok(())
}

pub fn unset(client: &mut ApiClient) -> Result<()> {
    client.config_mut().clear_environment()?;
    println!("Current environment cleared");
    Ok(())
}
