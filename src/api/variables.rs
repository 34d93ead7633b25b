// Environment variable CRUD calls, nested under a project's environment.

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ApiClient;

#[derive(Serialize)]
struct VariableBody<'a> {
    key: &'a str,
    value: &'a str,
}

#[derive(Debug, Deserialize)]
pub struct EnvironmentVariable {
    pub id: String,
    pub environment_id: String,
    pub key: String,
    pub value: String,
    pub description: Option<String>,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    pub fn create_variable(
        &mut self,
        project_id: &str,
        environment_id: &str,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable> {
        let body = VariableBody { key, value };
        let resp = self.request(
            Method::POST,
            &format!(
                "/projects/{}/environments/{}/variables",
                project_id, environment_id
            ),
            Some(&body),
            true,
        )?;
        resp.json()
    }

    pub fn list_variables(
        &mut self,
        project_id: &str,
        environment_id: &str,
    ) -> Result<Vec<EnvironmentVariable>> {
        let resp = self.get(&format!(
            "/projects/{}/environments/{}/variables",
            project_id, environment_id
        ))?;
        resp.json()
    }

    pub fn get_variable(
        &mut self,
        project_id: &str,
        environment_id: &str,
        variable_id: &str,
    ) -> Result<EnvironmentVariable> {
        let resp = self.get(&format!(
            "/projects/{}/environments/{}/variables/{}",
            project_id, environment_id, variable_id
        ))?;
        resp.json()
    }

    pub fn update_variable(
        &mut self,
        project_id: &str,
        environment_id: &str,
        variable_id: &str,
        key: &str,
        value: &str,
    ) -> Result<EnvironmentVariable> {
        let body = VariableBody { key, value };
        let resp = self.request(
            Method::PUT,
            &format!(
                "/projects/{}/environments/{}/variables/{}",
                project_id, environment_id, variable_id
            ),
            Some(&body),
            true,
        )?;
        resp.json()
    }

    pub fn delete_variable(
        &mut self,
        project_id: &str,
        environment_id: &str,
        variable_id: &str,
    ) -> Result<()> {
        self.delete(&format!(
            "/projects/{}/environments/{}/variables/{}",
            project_id, environment_id, variable_id
        ))
    }
}
