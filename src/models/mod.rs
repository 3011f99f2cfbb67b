mod envelope;
mod project;

pub use envelope::{ProjectEnvelope, ProjectList, StatusReport};
pub use project::{NewProject, Project, ACTIVE_STATUS, ALL_CATEGORIES};
