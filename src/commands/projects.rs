// Project commands.

use anyhow::{Context, Result};

use crate::api::projects::Project;
use crate::api::ApiClient;
use crate::gitrepo;
use crate::prompt;

use super::opt;

pub fn create(client: &mut ApiClient) -> Result<()> {
    client.require_token()?;

    let name = prompt::text("Project name", true)?;
    let description = prompt::text("Description (optional)", false)?;

    let git_repo = match gitrepo::detect_repo() {
        Some(repo) => {
            println!("Detected git repository: {}", repo);
            if prompt::confirm("Use this git repository?")? {
                repo
            } else {
                prompt::text("Git repository (owner/repo, optional)", false)?
            }
        }
        None => prompt::text("Git repository (owner/repo, optional)", false)?,
    };

    let spinner = prompt::spinner("Creating project...");
    let result = client.create_project(&name, opt(&description), opt(&git_repo));
    spinner.finish_and_clear();
    let project = result.context("failed to create project")?;

    println!("Project created successfully!");
    print_project(&project);
    Ok(())
}

pub fn list(client: &mut ApiClient) -> Result<()> {
    client.require_token()?;

    let projects = client.list_projects().context("failed to list projects")?;
    if projects.is_empty() {
        println!("No projects found");
        return Ok(());
    }

    let current = client.config().project.clone();

    println!("Found {} project(s):\n", projects.len());
    for project in &projects {
        if current.as_deref() == Some(project.id.as_str()) {
            println!("* ID: {}", project.id);
        } else {
            println!("  ID: {}", project.id);
        }
        println!("  Name: {}", project.name);
        if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
            println!("  Description: {}", description);
        }
        if let Some(git_repo) = project.git_repo.as_deref().filter(|g| !g.is_empty()) {
            println!("  Git Repository: {}", git_repo);
        }
        if let Some(created) = project.created_at {
            println!("  Created: {}", created.to_rfc3339());
        }
        println!();
    }
    Ok(())
}

pub fn get(client: &mut ApiClient, id: &str) -> Result<()> {
    client.require_token()?;

    let project = client.get_project(id).context("failed to get project")?;

    println!("Project Details:");
    print_project(&project);
    println!("  Owner ID: {}", project.owner_id);
    if let Some(created) = project.created_at {
        println!("  Created: {}", created.to_rfc3339());
    }
    if let Some(updated) = project.updated_at {
        println!("  Updated: {}", updated.to_rfc3339());
    }
    Ok(())
}

pub fn update(client: &mut ApiClient, id: &str) -> Result<()> {
    client.require_token()?;

    let project = client.get_project(id).context("failed to get project")?;

    let name = prompt::text_with_default("Project name", &project.name)?;

    let mut description = prompt::text("Description (leave empty to keep current)", false)?;
    if description.is_empty() {
        description = project.description.clone().unwrap_or_default();
    }

    let mut git_repo =
        prompt::text("Git repository owner/repo (leave empty to keep current)", false)?;
    if git_repo.is_empty() {
        git_repo = project.git_repo.clone().unwrap_or_default();
    }

    let updated = client
        .update_project(id, &name, opt(&description), opt(&git_repo))
        .context("failed to update project")?;

    println!("Project updated successfully!");
    println!("  Name: {}", updated.name);
    if let Some(description) = updated.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description: {}", description);
    }
    if let Some(git_repo) = updated.git_repo.as_deref().filter(|g| !g.is_empty()) {
        println!("  Git Repository: {}", git_repo);
    }
    Ok(())
}

pub fn delete(client: &mut ApiClient, id: &str) -> Result<()> {
    client.require_token()?;

    let project = client.get_project(id).context("failed to get project")?;

    println!(
        "Are you sure you want to delete project '{}' (ID: {})?",
        project.name, project.id
    );
    if !prompt::confirm("This action cannot be undone")? {
        println!("Operation cancelled");
        return Ok(());
    }

    client.delete_project(id).context("failed to delete project")?;
    println!("Project deleted successfully");
    Ok(())
}

pub fn use_project(client: &mut ApiClient, id: &str) -> Result<()> {
    client.require_token()?;

    let project = client.get_project(id).context("failed to get project")?;

    client.config_mut().set_project(&project.id)?;
    println!("Now using project: {} (ID: {})", project.name, project.id);
    Ok(())
}

pub fn unset(client: &mut ApiClient) -> Result<()> {
    client.config_mut().clear_project()?;
    println!("Current project cleared");
    Ok(())
}

fn print_project(project: &Project) {
    println!("  ID: {}", project.id);
    println!("  Name: {}", project.name);
    if let Some(description) = project.description.as_deref().filter(|d| !d.is_empty()) {
        println!("  Description: {}", description);
    }
    if let Some(git_repo) = project.git_repo.as_deref().filter(|g| !g.is_empty()) {
        println!("  Git Repository: {}", git_repo);
    }
}
