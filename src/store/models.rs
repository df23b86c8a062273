use crate::dataset::Record;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

#[derive(Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum Role {
    Admin,
    #[default]
    User,
}

/// A registered user. The password is stored alongside the account and is
/// stripped before anything leaves the store (see [`UserPublic`]).
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct User {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub password: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

/// Password-free view of a [`User`]; the only shape callers ever receive.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct UserPublic {
    pub id: Uuid,
    pub name: String,
    pub email: String,
    pub role: Role,
    pub created_at: DateTime<Utc>,
}

impl From<&User> for UserPublic {
    fn from(user: &User) -> Self {
        Self {
            id: user.id,
            name: user.name.clone(),
            email: user.email.clone(),
            role: user.role,
            created_at: user.created_at,
        }
    }
}

/// Registration payload.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct NewUser {
    pub name: String,
    pub email: String,
    pub password: String,
    #[serde(default)]
    pub role: Role,
}

/// A project: uploaded dataset, chart visualizations and the collaborator
/// list that gates who may change them.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Project {
    pub id: Uuid,
    pub name: String,
    pub description: String,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
    pub created_by: Uuid,
    /// Always contains the creator.
    pub collaborators: Vec<Uuid>,
    pub data: Vec<Record>,
    pub visualizations: Vec<Visualization>,
}

impl Project {
    pub fn is_collaborator(&self, user_id: Uuid) -> bool {
        self.collaborators.contains(&user_id)
    }
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct NewProject {
    pub name: String,
    pub description: String,
}

/// Partial project update; `None` fields are left untouched.
#[derive(Clone, Default, Serialize, Deserialize, Debug)]
pub struct ProjectPatch {
    pub name: Option<String>,
    pub description: Option<String>,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "lowercase")]
pub enum ChartKind {
    Line,
    Bar,
    Pie,
    Scatter,
}

/// Axis binding for a chart: one x-axis field, one or more series fields.
#[derive(Clone, Serialize, Deserialize, Debug)]
#[serde(rename_all = "camelCase")]
pub struct ChartConfig {
    pub x_axis: String,
    pub y_axis: Vec<String>,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Visualization {
    pub id: Uuid,
    pub name: String,
    pub kind: ChartKind,
    pub config: ChartConfig,
    pub created_at: DateTime<Utc>,
    pub created_by: Uuid,
}

#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct NewVisualization {
    pub name: String,
    pub kind: ChartKind,
    pub config: ChartConfig,
}

#[derive(Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Debug)]
#[serde(rename_all = "snake_case")]
pub enum ActivityKind {
    ProjectCreated,
    ProjectUpdated,
    ProjectDeleted,
    DataAdded,
    VisualizationAdded,
    CollaboratorAdded,
}

/// One entry in the append-only activity log.
#[derive(Clone, Serialize, Deserialize, Debug)]
pub struct Activity {
    pub id: Uuid,
    pub timestamp: DateTime<Utc>,
    pub kind: ActivityKind,
    pub project_id: Uuid,
    pub user_id: Uuid,
    pub details: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_user_public_strips_password() {
        let user = User {
            id: Uuid::new_v4(),
            name: "Ada".to_owned(),
            email: "ada@example.com".to_owned(),
            password: "s3cret".to_owned(),
            role: Role::Admin,
            created_at: Utc::now(),
        };
        let public = UserPublic::from(&user);
        let json = serde_json::to_string(&public).unwrap();
        assert!(!json.contains("s3cret"));
        assert!(!json.contains("password"));
    }

    #[test]
    fn test_activity_kind_wire_spelling() {
        assert_eq!(
            serde_json::to_string(&ActivityKind::ProjectCreated).unwrap(),
            "\"project_created\""
        );
        assert_eq!(
            serde_json::to_string(&ActivityKind::VisualizationAdded).unwrap(),
            "\"visualization_added\""
        );
    }

    #[test]
    fn test_chart_config_wire_spelling() {
        let config: ChartConfig =
            serde_json::from_str(r#"{"xAxis":"month","yAxis":["sales","expenses"]}"#).unwrap();
        assert_eq!(config.x_axis, "month");
        assert_eq!(config.y_axis.len(), 2);
    }
}
