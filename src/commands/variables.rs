// Variable commands, including `.env` import/export.

use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use anyhow::{bail, Context, Result};

use crate::api::ApiClient;
use crate::envfile;
use crate::prompt;

use super::{select_environment, select_project, selection_or_cancel};

pub fn create(client: &mut ApiClient, project_id: &str, environment_id: &str) -> Result<()> {
    client.require_token()?;

    let key = prompt::text("Variable key", true)?;
    let value = prompt::text("Variable value", true)?;

    let variable = client
        .create_variable(project_id, environment_id, &key, &value)
        .context("failed to create variable")?;

    println!("Variable created successfully!");
    println!("  ID: {}", variable.id);
    println!("  Key: {}", variable.key);
    println!("  Value: {}", variable.value);
    Ok(())
}

pub fn list(client: &mut ApiClient, project_id: &str, environment_id: &str) -> Result<()> {
    client.require_token()?;

    let variables = client
        .list_variables(project_id, environment_id)
        .context("failed to list variables")?;

    if variables.is_empty() {
        println!("No variables found");
        return Ok(());
    }

    println!("Found {} variable(s):\n", variables.len());
    for variable in &variables {
        println!("  ID: {}", variable.id);
        println!("  Key: {}", variable.key);
        println!("  Value: {}", variable.value);
        if let Some(updated) = variable.updated_at {
            println!("  Updated: {}", updated.to_rfc3339());
        }
        println!();
    }
    Ok(())
}

pub fn get(
    client: &mut ApiClient,
    variable_id: &str,
    project_id: &str,
    environment_id: &str,
) -> Result<()> {
    client.require_token()?;

    let variable = client
        .get_variable(project_id, environment_id, variable_id)
        .context("failed to get variable")?;

    println!("Variable Details:");
    println!("  ID: {}", variable.id);
    println!("  Key: {}", variable.key);
    println!("  Value: {}", variable.value);
    println!("  Environment ID: {}", variable.environment_id);
    if let Some(created) = variable.created_at {
        println!("  Created: {}", created.to_rfc3339());
    }
    if let Some(updated) = variable.updated_at {
        println!("  Updated: {}", updated.to_rfc3339());
    }
    Ok(())
}

pub fn update(
    client: &mut ApiClient,
    variable_id: &str,
    project_id: &str,
    environment_id: &str,
) -> Result<()> {
    client.require_token()?;

    let variable = client
        .get_variable(project_id, environment_id, variable_id)
        .context("failed to get variable")?;

    let key = prompt::text_with_default("Variable key", &variable.key)?;
    let value = prompt::text("Variable value", true)?;

    let updated = client
        .update_variable(project_id, environment_id, variable_id, &key, &value)
        .context("failed to update variable")?;

    println!("Variable updated successfully!");
    println!("  Key: {}", updated.key);
    println!("  Value: {}", updated.value);
    Ok(())
}

pub fn delete(
    client: &mut ApiClient,
    variable_id: &str,
    project_id: &str,
    environment_id: &str,
) -> Result<()> {
    client.require_token()?;

    let variable = client
        .get_variable(project_id, environment_id, variable_id)
        .context("failed to get variable")?;

    println!(
        "Are you sure you want to delete variable '{}' (ID: {})?",
        variable.key, variable.id
    );
    if !prompt::confirm("This action cannot be undone")? {
        println!("Operation cancelled");
        return Ok(());
    }

    client
        .delete_variable(project_id, environment_id, variable_id)
        .context("failed to delete variable")?;
    println!("Variable deleted successfully");
    Ok(())
}

/// Import variables from a `.env` file. Each variable is created
/// independently; failures are reported per key and the loop continues.
pub fn import(client: &mut ApiClient, file: &Path) -> Result<()> {
    client.require_token()?;

    let Some(project_id) = selection_or_cancel(select_project(client))? else {
        println!("Import cancelled");
        return Ok(());
    };
    let Some(environment_id) = selection_or_cancel(select_environment(client, &project_id))?
    else {
        println!("Import cancelled");
        return Ok(());
    };

    if !file.exists() {
        bail!("file '{}' not found", file.display());
    }

    let variables = envfile::parse_file(file)?;
    if variables.is_empty() {
        println!("No variables found in {}", file.display());
        return Ok(());
    }

    println!("Found {} variable(s) in {}:\n", variables.len(), file.display());
    for (key, value) in &variables {
        println!("  {}={}", key, value);
    }
    println!();

    if !prompt::confirm("Import these variables?")? {
        println!("Import cancelled");
        return Ok(());
    }

    let mut created = 0;
    for (key, value) in &variables {
        match client.create_variable(&project_id, &environment_id, key, value) {
            Ok(_) => created += 1,
            Err(err) => eprintln!("Failed to import variable {}: {:#}", key, err),
        }
    }

    println!("Successfully imported {} variable(s)", created);
    Ok(())
}

/// Export variables to a `.env` file, sorted by key. The default file
/// name is derived from the environment name.
pub fn export(client: &mut ApiClient, file: Option<PathBuf>) -> Result<()> {
    client.require_token()?;

    let Some(project_id) = selection_or_cancel(select_project(client))? else {
        println!("Export cancelled");
        return Ok(());
    };
    let Some(environment_id) = selection_or_cancel(select_environment(client, &project_id))?
    else {
        println!("Export cancelled");
        return Ok(());
    };

    let output = match file {
        Some(path) => path,
        None => match client.get_environment(&project_id, &environment_id) {
            Ok(environment) => {
                PathBuf::from(format!(".env.{}", sanitize_filename(&environment.name)))
            }
            Err(err) => {
                eprintln!("Warning: failed to get environment name: {:#}", err);
                println!("Using default filename .env");
                PathBuf::from(".env")
            }
        },
    };

    let variables = client
        .list_variables(&project_id, &environment_id)
        .context("failed to list variables")?;

    if variables.is_empty() {
        println!("No variables to export");
        return Ok(());
    }

    if output.exists() {
        println!(
            "Warning: file '{}' already exists in current directory",
            output.display()
        );
        if !prompt::confirm("Overwrite existing file?")? {
            println!("Export cancelled");
            return Ok(());
        }
    }

    let map: BTreeMap<String, String> = variables
        .into_iter()
        .map(|v| (v.key, v.value))
        .collect();

    envfile::write_file(&output, &map)?;
    println!("Exported {} variable(s) to {}", map.len(), output.display());
    Ok(())
}

/// Reduce an environment name to a safe lowercase file name fragment.
fn sanitize_filename(name: &str) -> String {
    name.chars()
        .map(|c| {
            if c.is_ascii_alphanumeric() || c == '_' || c == '-' || c == '.' {
                c.to_ascii_lowercase()
            } else {
                '_'
            }
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sanitizes_environment_names() {
        assert_eq!(sanitize_filename("Staging"), "staging");
        assert_eq!(sanitize_filename("prod v2"), "prod_v2");
        assert_eq!(sanitize_filename("eu/west-1"), "eu_west-1");
        assert_eq!(sanitize_filename("dev.local"), "dev.local");
    }
}
