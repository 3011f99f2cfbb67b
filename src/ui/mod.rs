pub mod catalog;
pub mod project_wizard;
