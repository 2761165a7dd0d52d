//! The fixed project set tasks are grouped under.
//!
//! Membership is not enforced: a task may carry any `project_id`. Lookups of
//! ids outside the set resolve to `ProjectRef::Unknown` so projections can put
//! such tasks in a neutral group instead of failing.

use serde::Serialize;

pub const DEFAULT_PROJECT_ID: &str = "work";

/// Id used for the catch-all group of tasks with unrecognized project ids.
pub const UNKNOWN_PROJECT_ID: &str = "unknown";

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub struct Project {
    pub id: &'static str,
    pub name: &'static str,
}

pub static PROJECTS: [Project; 3] = [
    Project {
        id: "work",
        name: "Work Tasks",
    },
    Project {
        id: "personal",
        name: "Personal",
    },
    Project {
        id: "learning",
        name: "Learning",
    },
];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ProjectRef<'a> {
    Known(&'static Project),
    Unknown(&'a str),
}

impl ProjectRef<'_> {
    /// Display name, or "Unknown project" for ids outside the fixed set.
    pub fn name(&self) -> &'static str {
        match self {
            ProjectRef::Known(p) => p.name,
            ProjectRef::Unknown(_) => "Unknown project",
        }
    }

    pub fn is_known(&self) -> bool {
        matches!(self, ProjectRef::Known(_))
    }
}

impl Project {
    pub fn all() -> &'static [Project] {
        &PROJECTS
    }

    pub fn lookup(id: &str) -> ProjectRef<'_> {
        PROJECTS
            .iter()
            .find(|p| p.id == id)
            .map(ProjectRef::Known)
            .unwrap_or(ProjectRef::Unknown(id))
    }
}
