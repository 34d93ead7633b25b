// Environment CRUD calls, nested under a project.

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ApiClient;

#[derive(Serialize)]
struct EnvironmentBody<'a> {
    name: &'a str,
    description: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct Environment {
    pub id: String,
    pub project_id: String,
    pub name: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    pub fn create_environment(
        &mut self,
        project_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Environment> {
        let body = EnvironmentBody { name, description };
        let resp = self.request(
            Method::POST,
            &format!("/projects/{}/environments", project_id),
            Some(&body),
            true,
        )?;
        resp.json()
    }

    pub fn list_environments(&mut self, project_id: &str) -> Result<Vec<Environment>> {
        let resp = self.get(&format!("/projects/{}/environments", project_id))?;
        resp.json()
    }

    pub fn get_environment(
        &mut self,
        project_id: &str,
        environment_id: &str,
    ) -> Result<Environment> {
        let resp = self.get(&format!(
            "/projects/{}/environments/{}",
            project_id, environment_id
        ))?;
        resp.json()
    }

    pub fn update_environment(
        &mut self,
        project_id: &str,
        environment_id: &str,
        name: &str,
        description: Option<&str>,
    ) -> Result<Environment> {
        let body = EnvironmentBody { name, description };
        let resp = self.request(
            Method::PUT,
            &format!("/projects/{}/environments/{}", project_id, environment_id),
            Some(&body),
            true,
        )?;
        resp.json()
    }

    pub fn delete_environment(&mut self, project_id: &str, environment_id: &str) -> Result<()> {
        self.delete(&format!(
            "/projects/{}/environments/{}",
            project_id, environment_id
        ))
    }
}
