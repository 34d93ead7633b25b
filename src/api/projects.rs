// Project CRUD calls.

use anyhow::Result;
use chrono::{DateTime, Utc};
use reqwest::Method;
use serde::{Deserialize, Serialize};

use super::ApiClient;

/// Create/update body. Absent optional fields are sent as explicit JSON
/// null; updates resend the full desired state.
#[derive(Serialize)]
struct ProjectBody<'a> {
    name: &'a str,
    description: Option<&'a str>,
    git_repo: Option<&'a str>,
}

#[derive(Debug, Deserialize)]
pub struct Project {
    pub id: String,
    pub name: String,
    pub description: Option<String>,
    pub git_repo: Option<String>,
    pub owner_id: String,
    pub created_at: Option<DateTime<Utc>>,
    pub updated_at: Option<DateTime<Utc>>,
}

impl ApiClient {
    pub fn create_project(
        &mut self,
        name: &str,
        description: Option<&str>,
        git_repo: Option<&str>,
    ) -> Result<Project> {
        let body = ProjectBody {
            name,
            description,
            git_repo,
        };
        let resp = self.request(Method::POST, "/projects", Some(&body), true)?;
        resp.json()
    }

    /// List projects in server order.
    pub fn list_projects(&mut self) -> Result<Vec<Project>> {
        let resp = self.get("/projects")?;
        resp.json()
    }

    pub fn get_project(&mut self, project_id: &str) -> Result<Project> {
        let resp = self.get(&format!("/projects/{}", project_id))?;
        resp.json()
    }

    pub fn update_project(
        &mut self,
        project_id: &str,
        name: &str,
        description: Option<&str>,
        git_repo: Option<&str>,
    ) -> Result<Project> {
        let body = ProjectBody {
            name,
            description,
            git_repo,
        };
        let resp = self.request(
            Method::PUT,
            &format!("/projects/{}", project_id),
            Some(&body),
            true,
        )?;
        resp.json()
    }

    pub fn delete_project(&mut self, project_id: &str) -> Result<()> {
        self.delete(&format!("/projects/{}", project_id))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn absent_optionals_serialize_to_null() {
        let body = ProjectBody {
            name: "api",
            description: None,
            git_repo: None,
        };
        let json = serde_json::to_value(&body).unwrap();
        assert_eq!(
            json,
            serde_json::json!({
                "name": "api",
                "description": null,
                "git_repo": null
            })
        );
    }

    #[test]
    fn project_decodes_with_nulls() {
        let json = r#"{
            "id": "p-42",
            "name": "api",
            "description": null,
            "git_repo": "acme/api",
            "owner_id": "u-1",
            "created_at": "2024-05-01T12:00:00Z",
            "updated_at": null
        }"#;
        let project: Project = serde_json::from_str(json).unwrap();
        assert_eq!(project.id, "p-42");
        assert!(project.description.is_none());
        assert_eq!(project.git_repo.as_deref(), Some("acme/api"));
        assert!(project.updated_at.is_none());
    }

    #[test]
    fn list_decodes_bare_array() {
        let json = r#"[
            {"id": "p-1", "name": "one", "owner_id": "u-1"},
            {"id": "p-2", "name": "two", "owner_id": "u-1"}
        ]"#;
        let projects: Vec<Project> = serde_json::from_str(json).unwrap();
        assert_eq!(projects.len(), 2);
        assert_eq!(projects[1].name, "two");
    }
}
