// Command handlers: prompt flows on top of the API client. Each handler
// returns `anyhow::Result<()>`; `main` reports failures and sets the
// exit code.

use anyhow::{bail, Result};

use crate::api::ApiClient;
use crate::prompt::{self, Cancelled, SelectOption};

pub mod auth;
pub mod environments;
pub mod projects;
pub mod variables;

/// Empty prompt answers mean "not provided".
fn opt(input: &str) -> Option<&str> {
    if input.is_empty() {
        None
    } else {
        Some(input)
    }
}

fn described_label(name: &str, description: Option<&str>) -> String {
    match description {
        Some(d) if !d.is_empty() => format!("{} - {}", name, d),
        _ => name.to_string(),
    }
}

/// Interactive project picker over `projects list`.
fn select_project(client: &mut ApiClient) -> Result<String> {
    let projects = client.list_projects()?;
    if projects.is_empty() {
        bail!("no projects found. Please create a project first with 'envoy projects create'");
    }

    let options: Vec<SelectOption> = projects
        .iter()
        .map(|p| SelectOption {
            label: described_label(&p.name, p.description.as_deref()),
            value: p.id.clone(),
        })
        .collect();

    prompt::select("Select a project", &options, true)
}

/// Interactive environment picker within a project.
fn select_environment(client: &mut ApiClient, project_id: &str) -> Result<String> {
    let environments = client.list_environments(project_id)?;
    if environments.is_empty() {
        bail!(
            "no environments found. Please create an environment first with 'envoy environments create {}'",
            project_id
        );
    }

    let options: Vec<SelectOption> = environments
        .iter()
        .map(|e| SelectOption {
            label: described_label(&e.name, e.description.as_deref()),
            value: e.id.clone(),
        })
        .collect();

    prompt::select("Select an environment", &options, true)
}

/// Resolve the project a command operates on: explicit argument first,
/// then the selected project from the config, then an interactive pick.
fn resolve_project(client: &mut ApiClient, explicit: Option<String>) -> Result<String> {
    if let Some(id) = explicit {
        return Ok(id);
    }
    if let Some(id) = client.config().project.clone() {
        return Ok(id);
    }
    select_project(client)
}

/// Unwrap a selection result, mapping user cancellation to `None`.
fn selection_or_cancel(result: Result<String>) -> Result<Option<String>> {
    match result {
        Ok(value) => Ok(Some(value)),
        Err(err) if err.downcast_ref::<Cancelled>().is_some() => Ok(None),
        Err(err) => Err(err),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_input_is_absent() {
        assert_eq!(opt(""), None);
        assert_eq!(opt("x"), Some("x"));
    }

    #[test]
    fn labels_append_non_empty_descriptions() {
        assert_eq!(described_label("api", None), "api");
        assert_eq!(described_label("api", Some("")), "api");
        assert_eq!(described_label("api", Some("backend")), "api - backend");
    }

    #[test]
    fn cancellation_maps_to_none() {
        let cancelled: Result<String> = Err(Cancelled.into());
        assert_eq!(selection_or_cancel(cancelled).unwrap(), None);

        let picked: Result<String> = Ok("p-1".into());
        assert_eq!(selection_or_cancel(picked).unwrap().as_deref(), Some("p-1"));

        let failed: Result<String> = Err(anyhow::anyhow!("boom"));
        assert!(selection_or_cancel(failed).is_err());
    }
}
