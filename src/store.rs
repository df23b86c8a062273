//! Workspace store: users, projects, visualizations and the activity log.
//!
//! Persistence is a set of named JSON blobs behind the [`BlobStore`] trait, so
//! the derive layer above stays pure and the whole workspace can run against
//! an in-memory backend in tests. [`Workspace`] owns the business rules:
//! every mutation requires a signed-in user, collaborator/creator checks gate
//! writes, and each change appends to the activity log.
//!
//! ## Usage
//!
//! ```
//! use datacollab::store::{MemoryStore, NewProject, NewUser, Workspace};
//! use secrecy::SecretString;
//!
//! # fn example() -> datacollab::error::Result<()> {
//! let workspace = Workspace::new(MemoryStore::default());
//!
//! workspace.create_user(NewUser {
//!     name: "Ada".to_owned(),
//!     email: "ada@example.com".to_owned(),
//!     password: "s3cret".to_owned(),
//!     role: Default::default(),
//! })?;
//! workspace.login("ada@example.com", &SecretString::from("s3cret"))?;
//!
//! let project = workspace.create_project(NewProject {
//!     name: "Quarterly sales".to_owned(),
//!     description: "CSV uploads and charts".to_owned(),
//! })?;
//! assert_eq!(workspace.projects()?.len(), 1);
//! assert_eq!(workspace.activity(Some(project.id))?.len(), 1);
//! # Ok(())
//! # }
//! # example().unwrap();
//! ```

pub mod models;
pub mod repository;
pub mod service;

pub use models::{
    Activity, ActivityKind, ChartConfig, ChartKind, NewProject, NewUser, NewVisualization,
    Project, ProjectPatch, Role, User, UserPublic, Visualization,
};
pub use repository::{BlobStore, JsonFileStore, MemoryStore};
pub use service::Workspace;
