//! Workspace service: CRUD with ownership checks over a [`BlobStore`].
//!
//! Rules, enforced here and nowhere else:
//! - every mutation requires a signed-in user;
//! - collaborators may update a project, replace its data and add
//!   visualizations;
//! - only the creator may delete a project or add collaborators;
//! - every mutation appends an [`Activity`] entry.

use super::models::{
    Activity, ActivityKind, ChartConfig, ChartKind, NewProject, NewUser, NewVisualization,
    Project, ProjectPatch, Role, User, UserPublic, Visualization,
};
use super::repository::{keys, BlobStore};
use crate::dataset::Record;
use crate::error::{DataCollabError, Result};
use chrono::Utc;
use secrecy::{ExposeSecret as _, SecretString};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

pub struct Workspace<S: BlobStore> {
    store: S,
}

impl<S: BlobStore> Workspace<S> {
    pub fn new(store: S) -> Self {
        Self { store }
    }

    // ---- users & session ----

    /// All registered users, passwords stripped.
    pub fn users(&self) -> Result<Vec<UserPublic>> {
        let users: Vec<User> = self.read_collection(keys::USERS)?;
        Ok(users.iter().map(UserPublic::from).collect())
    }

    /// Register a user. Emails are unique.
    pub fn create_user(&self, new_user: NewUser) -> Result<UserPublic> {
        let mut users: Vec<User> = self.read_collection(keys::USERS)?;

        if users.iter().any(|u| u.email == new_user.email) {
            return Err(DataCollabError::EmailTaken(new_user.email));
        }

        let user = User {
            id: Uuid::new_v4(),
            name: new_user.name,
            email: new_user.email,
            password: new_user.password,
            role: new_user.role,
            created_at: Utc::now(),
        };
        let public = UserPublic::from(&user);

        users.push(user);
        self.write_collection(keys::USERS, &users)?;
        tracing::info!(user = %public.id, "User registered");
        Ok(public)
    }

    /// Sign in. Unknown email and wrong password report the same error so the
    /// response does not leak which accounts exist.
    pub fn login(&self, email: &str, password: &SecretString) -> Result<UserPublic> {
        let users: Vec<User> = self.read_collection(keys::USERS)?;
        let user = users
            .iter()
            .find(|u| u.email == email)
            .ok_or(DataCollabError::InvalidCredentials)?;

        if user.password != password.expose_secret() {
            return Err(DataCollabError::InvalidCredentials);
        }

        let public = UserPublic::from(user);
        self.store
            .put(keys::CURRENT_USER, &serde_json::to_string(&public)?)?;
        tracing::info!(user = %public.id, "User logged in");
        Ok(public)
    }

    pub fn logout(&self) -> Result<()> {
        self.store.remove(keys::CURRENT_USER)
    }

    pub fn current_user(&self) -> Result<Option<UserPublic>> {
        match self.store.get(keys::CURRENT_USER)? {
            Some(json) => Ok(Some(serde_json::from_str(&json)?)),
            None => Ok(None),
        }
    }

    fn require_login(&self) -> Result<UserPublic> {
        self.current_user()?.ok_or(DataCollabError::NotLoggedIn)
    }

    // ---- projects ----

    pub fn projects(&self) -> Result<Vec<Project>> {
        self.read_collection(keys::PROJECTS)
    }

    pub fn project(&self, project_id: Uuid) -> Result<Project> {
        self.projects()?
            .into_iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| DataCollabError::NotFound("Project".to_owned()))
    }

    /// Create a project; the creator becomes its first collaborator.
    pub fn create_project(&self, new_project: NewProject) -> Result<Project> {
        let user = self.require_login()?;
        let mut projects: Vec<Project> = self.read_collection(keys::PROJECTS)?;

        let now = Utc::now();
        let project = Project {
            id: Uuid::new_v4(),
            name: new_project.name,
            description: new_project.description,
            created_at: now,
            updated_at: now,
            created_by: user.id,
            collaborators: vec![user.id],
            data: Vec::new(),
            visualizations: Vec::new(),
        };

        projects.push(project.clone());
        self.write_collection(keys::PROJECTS, &projects)?;

        self.log_activity(
            ActivityKind::ProjectCreated,
            project.id,
            user.id,
            format!("Project \"{}\" created", project.name),
        )?;
        Ok(project)
    }

    /// Rename or re-describe a project. Collaborators only.
    pub fn update_project(&self, project_id: Uuid, patch: ProjectPatch) -> Result<Project> {
        let user = self.require_login()?;
        self.mutate_project(project_id, user.id, |project| {
            if !project.is_collaborator(user.id) {
                return Err(DataCollabError::Forbidden(
                    "only collaborators can modify this project".to_owned(),
                ));
            }
            if let Some(name) = patch.name.clone() {
                project.name = name;
            }
            if let Some(description) = patch.description.clone() {
                project.description = description;
            }
            Ok((
                ActivityKind::ProjectUpdated,
                format!("Project \"{}\" updated", project.name),
            ))
        })
    }

    /// Delete a project. Creator only.
    pub fn delete_project(&self, project_id: Uuid) -> Result<()> {
        let user = self.require_login()?;
        let mut projects: Vec<Project> = self.read_collection(keys::PROJECTS)?;

        let project = projects
            .iter()
            .find(|p| p.id == project_id)
            .ok_or_else(|| DataCollabError::NotFound("Project".to_owned()))?;

        if project.created_by != user.id {
            return Err(DataCollabError::Forbidden(
                "only the creator can delete a project".to_owned(),
            ));
        }
        let name = project.name.clone();

        projects.retain(|p| p.id != project_id);
        self.write_collection(keys::PROJECTS, &projects)?;

        self.log_activity(
            ActivityKind::ProjectDeleted,
            project_id,
            user.id,
            format!("Project \"{name}\" deleted"),
        )?;
        Ok(())
    }

    /// Replace the project's dataset with freshly parsed records.
    /// Collaborators only.
    pub fn set_project_data(&self, project_id: Uuid, data: Vec<Record>) -> Result<Project> {
        let user = self.require_login()?;
        let rows = data.len();
        self.mutate_project(project_id, user.id, move |project| {
            if !project.is_collaborator(user.id) {
                return Err(DataCollabError::Forbidden(
                    "only collaborators can modify this project".to_owned(),
                ));
            }
            project.data = data;
            Ok((
                ActivityKind::DataAdded,
                format!("{rows} rows added to project \"{}\"", project.name),
            ))
        })
    }

    /// Attach a chart visualization. Collaborators only.
    pub fn add_visualization(
        &self,
        project_id: Uuid,
        new_viz: NewVisualization,
    ) -> Result<Project> {
        let user = self.require_login()?;
        self.mutate_project(project_id, user.id, move |project| {
            if !project.is_collaborator(user.id) {
                return Err(DataCollabError::Forbidden(
                    "only collaborators can modify this project".to_owned(),
                ));
            }
            let viz = Visualization {
                id: Uuid::new_v4(),
                name: new_viz.name.clone(),
                kind: new_viz.kind,
                config: new_viz.config.clone(),
                created_at: Utc::now(),
                created_by: user.id,
            };
            let details = format!(
                "Visualization \"{}\" added to project \"{}\"",
                viz.name, project.name
            );
            project.visualizations.push(viz);
            Ok((ActivityKind::VisualizationAdded, details))
        })
    }

    /// Grant another user access. Creator only; the user must exist and not
    /// already collaborate.
    pub fn add_collaborator(&self, project_id: Uuid, user_id: Uuid) -> Result<Project> {
        let current = self.require_login()?;

        let users: Vec<User> = self.read_collection(keys::USERS)?;
        let added = users
            .iter()
            .find(|u| u.id == user_id)
            .map(|u| u.name.clone())
            .ok_or_else(|| DataCollabError::NotFound("User".to_owned()))?;

        self.mutate_project(project_id, current.id, move |project| {
            if project.created_by != current.id {
                return Err(DataCollabError::Forbidden(
                    "only the creator can add collaborators".to_owned(),
                ));
            }
            if project.is_collaborator(user_id) {
                return Err(DataCollabError::Other(
                    "User is already a collaborator on this project".to_owned(),
                ));
            }
            project.collaborators.push(user_id);
            Ok((
                ActivityKind::CollaboratorAdded,
                format!(
                    "{added} added as collaborator to project \"{}\"",
                    project.name
                ),
            ))
        })
    }

    // ---- activity log ----

    /// The activity log, optionally filtered to one project.
    pub fn activity(&self, project_id: Option<Uuid>) -> Result<Vec<Activity>> {
        let all: Vec<Activity> = self.read_collection(keys::ACTIVITY_LOG)?;
        Ok(match project_id {
            Some(id) => all.into_iter().filter(|a| a.project_id == id).collect(),
            None => all,
        })
    }

    fn log_activity(
        &self,
        kind: ActivityKind,
        project_id: Uuid,
        user_id: Uuid,
        details: String,
    ) -> Result<()> {
        let mut activities: Vec<Activity> = self.read_collection(keys::ACTIVITY_LOG)?;
        tracing::info!(project = %project_id, user = %user_id, ?kind, "{details}");
        activities.push(Activity {
            id: Uuid::new_v4(),
            timestamp: Utc::now(),
            kind,
            project_id,
            user_id,
            details,
        });
        self.write_collection(keys::ACTIVITY_LOG, &activities)
    }

    // ---- demo data ----

    /// Seed a demo workspace: two users, a project with six monthly records
    /// and a line chart. Runs once; a non-empty workspace is left alone.
    /// Returns whether seeding happened.
    pub fn init_demo_data(&self) -> Result<bool> {
        if !self.users()?.is_empty() || !self.projects()?.is_empty() {
            return Ok(false);
        }

        self.create_user(NewUser {
            name: "Admin".to_owned(),
            email: "admin@datacollab.example".to_owned(),
            password: "admin123".to_owned(),
            role: Role::Admin,
        })?;
        self.create_user(NewUser {
            name: "Test User".to_owned(),
            email: "user@datacollab.example".to_owned(),
            password: "user123".to_owned(),
            role: Role::User,
        })?;

        self.login(
            "admin@datacollab.example",
            &SecretString::from("admin123"),
        )?;

        let project = self.create_project(NewProject {
            name: "Demo project".to_owned(),
            description: "A project demonstrating the DataCollab features".to_owned(),
        })?;

        let data = crate::dataset::parse_json_records(
            r#"[
                {"month": "January",  "sales": 1200, "expenses": 800},
                {"month": "February", "sales": 1800, "expenses": 1200},
                {"month": "March",    "sales": 1400, "expenses": 1100},
                {"month": "April",    "sales": 2200, "expenses": 1300},
                {"month": "May",      "sales": 2600, "expenses": 1500},
                {"month": "June",     "sales": 2900, "expenses": 1700}
            ]"#,
        )?;
        self.set_project_data(project.id, data)?;

        self.add_visualization(
            project.id,
            NewVisualization {
                name: "Sales and expenses over time".to_owned(),
                kind: ChartKind::Line,
                config: ChartConfig {
                    x_axis: "month".to_owned(),
                    y_axis: vec!["sales".to_owned(), "expenses".to_owned()],
                },
            },
        )?;

        tracing::info!("Demo workspace seeded");
        Ok(true)
    }

    // ---- blob helpers ----

    /// Load a project, apply the mutation, bump `updated_at`, persist, and
    /// log the activity the closure reports.
    fn mutate_project<F>(&self, project_id: Uuid, user_id: Uuid, mutate: F) -> Result<Project>
    where
        F: FnOnce(&mut Project) -> Result<(ActivityKind, String)>,
    {
        let mut projects: Vec<Project> = self.read_collection(keys::PROJECTS)?;
        let project = projects
            .iter_mut()
            .find(|p| p.id == project_id)
            .ok_or_else(|| DataCollabError::NotFound("Project".to_owned()))?;

        let (kind, details) = mutate(project)?;
        project.updated_at = Utc::now();
        let updated = project.clone();

        self.write_collection(keys::PROJECTS, &projects)?;
        self.log_activity(kind, project_id, user_id, details)?;
        Ok(updated)
    }

    /// Missing blob reads as an empty collection.
    fn read_collection<T: DeserializeOwned>(&self, key: &str) -> Result<Vec<T>> {
        match self.store.get(key)? {
            Some(json) => Ok(serde_json::from_str(&json)?),
            None => Ok(Vec::new()),
        }
    }

    fn write_collection<T: Serialize>(&self, key: &str, items: &[T]) -> Result<()> {
        self.store.put(key, &serde_json::to_string_pretty(items)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::store::repository::MemoryStore;

    fn workspace() -> Workspace<MemoryStore> {
        Workspace::new(MemoryStore::default())
    }

    fn register(ws: &Workspace<MemoryStore>, name: &str, email: &str) -> UserPublic {
        ws.create_user(NewUser {
            name: name.to_owned(),
            email: email.to_owned(),
            password: "pw".to_owned(),
            role: Role::User,
        })
        .unwrap()
    }

    fn sign_in(ws: &Workspace<MemoryStore>, email: &str) {
        ws.login(email, &SecretString::from("pw")).unwrap();
    }

    #[test]
    fn test_duplicate_email_rejected() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");
        let err = ws
            .create_user(NewUser {
                name: "Imposter".to_owned(),
                email: "ada@example.com".to_owned(),
                password: "x".to_owned(),
                role: Role::User,
            })
            .unwrap_err();
        assert!(matches!(err, DataCollabError::EmailTaken(_)));
    }

    #[test]
    fn test_login_failures_are_uniform() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");

        let unknown = ws
            .login("ghost@example.com", &SecretString::from("pw"))
            .unwrap_err();
        let wrong = ws
            .login("ada@example.com", &SecretString::from("nope"))
            .unwrap_err();
        assert!(matches!(unknown, DataCollabError::InvalidCredentials));
        assert!(matches!(wrong, DataCollabError::InvalidCredentials));
    }

    #[test]
    fn test_session_lifecycle() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");
        assert!(ws.current_user().unwrap().is_none());

        sign_in(&ws, "ada@example.com");
        assert_eq!(
            ws.current_user().unwrap().unwrap().email,
            "ada@example.com"
        );

        ws.logout().unwrap();
        assert!(ws.current_user().unwrap().is_none());
    }

    #[test]
    fn test_mutations_require_login() {
        let ws = workspace();
        let err = ws
            .create_project(NewProject {
                name: "p".to_owned(),
                description: String::new(),
            })
            .unwrap_err();
        assert!(matches!(err, DataCollabError::NotLoggedIn));
    }

    #[test]
    fn test_creator_becomes_collaborator() {
        let ws = workspace();
        let ada = register(&ws, "Ada", "ada@example.com");
        sign_in(&ws, "ada@example.com");

        let project = ws
            .create_project(NewProject {
                name: "Sales".to_owned(),
                description: String::new(),
            })
            .unwrap();
        assert_eq!(project.created_by, ada.id);
        assert_eq!(project.collaborators, vec![ada.id]);
    }

    #[test]
    fn test_non_collaborator_cannot_modify() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");
        register(&ws, "Bob", "bob@example.com");

        sign_in(&ws, "ada@example.com");
        let project = ws
            .create_project(NewProject {
                name: "Sales".to_owned(),
                description: String::new(),
            })
            .unwrap();

        sign_in(&ws, "bob@example.com");
        let err = ws
            .update_project(
                project.id,
                ProjectPatch {
                    name: Some("Hijacked".to_owned()),
                    description: None,
                },
            )
            .unwrap_err();
        assert!(matches!(err, DataCollabError::Forbidden(_)));
    }

    #[test]
    fn test_only_creator_deletes() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");
        let bob = register(&ws, "Bob", "bob@example.com");

        sign_in(&ws, "ada@example.com");
        let project = ws
            .create_project(NewProject {
                name: "Sales".to_owned(),
                description: String::new(),
            })
            .unwrap();
        ws.add_collaborator(project.id, bob.id).unwrap();

        // Bob collaborates but did not create, so delete is refused.
        sign_in(&ws, "bob@example.com");
        assert!(matches!(
            ws.delete_project(project.id).unwrap_err(),
            DataCollabError::Forbidden(_)
        ));

        sign_in(&ws, "ada@example.com");
        ws.delete_project(project.id).unwrap();
        assert!(ws.projects().unwrap().is_empty());
    }

    #[test]
    fn test_collaborator_can_attach_data_and_charts() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");
        let bob = register(&ws, "Bob", "bob@example.com");

        sign_in(&ws, "ada@example.com");
        let project = ws
            .create_project(NewProject {
                name: "Sales".to_owned(),
                description: String::new(),
            })
            .unwrap();
        ws.add_collaborator(project.id, bob.id).unwrap();

        sign_in(&ws, "bob@example.com");
        let records = crate::dataset::parse_json_records(r#"[{"v":1},{"v":2}]"#).unwrap();
        let updated = ws.set_project_data(project.id, records).unwrap();
        assert_eq!(updated.data.len(), 2);

        let updated = ws
            .add_visualization(
                project.id,
                NewVisualization {
                    name: "Trend".to_owned(),
                    kind: ChartKind::Bar,
                    config: ChartConfig {
                        x_axis: "v".to_owned(),
                        y_axis: vec!["v".to_owned()],
                    },
                },
            )
            .unwrap();
        assert_eq!(updated.visualizations.len(), 1);
        assert_eq!(updated.visualizations[0].created_by, bob.id);
    }

    #[test]
    fn test_add_collaborator_rules() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");
        let bob = register(&ws, "Bob", "bob@example.com");

        sign_in(&ws, "ada@example.com");
        let project = ws
            .create_project(NewProject {
                name: "Sales".to_owned(),
                description: String::new(),
            })
            .unwrap();

        assert!(matches!(
            ws.add_collaborator(project.id, Uuid::new_v4()).unwrap_err(),
            DataCollabError::NotFound(_)
        ));

        ws.add_collaborator(project.id, bob.id).unwrap();
        assert!(ws.add_collaborator(project.id, bob.id).is_err());
    }

    #[test]
    fn test_activity_log_filtering() {
        let ws = workspace();
        register(&ws, "Ada", "ada@example.com");
        sign_in(&ws, "ada@example.com");

        let first = ws
            .create_project(NewProject {
                name: "First".to_owned(),
                description: String::new(),
            })
            .unwrap();
        let second = ws
            .create_project(NewProject {
                name: "Second".to_owned(),
                description: String::new(),
            })
            .unwrap();
        ws.update_project(
            second.id,
            ProjectPatch {
                name: Some("Second v2".to_owned()),
                description: None,
            },
        )
        .unwrap();

        assert_eq!(ws.activity(None).unwrap().len(), 3);
        assert_eq!(ws.activity(Some(first.id)).unwrap().len(), 1);
        assert_eq!(ws.activity(Some(second.id)).unwrap().len(), 2);

        let kinds: Vec<ActivityKind> = ws
            .activity(Some(second.id))
            .unwrap()
            .iter()
            .map(|a| a.kind)
            .collect();
        assert_eq!(
            kinds,
            vec![ActivityKind::ProjectCreated, ActivityKind::ProjectUpdated]
        );
    }

    #[test]
    fn test_demo_data_seeds_once() {
        let ws = workspace();
        assert!(ws.init_demo_data().unwrap());
        assert!(!ws.init_demo_data().unwrap());

        assert_eq!(ws.users().unwrap().len(), 2);
        let projects = ws.projects().unwrap();
        assert_eq!(projects.len(), 1);
        assert_eq!(projects[0].data.len(), 6);
        assert_eq!(projects[0].visualizations.len(), 1);
        assert!(ws.current_user().unwrap().is_some());
    }
}
