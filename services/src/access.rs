//! Who may do what.
//!
//! Every service entry point calls [`AccessPolicy::authorize`] before it reads
//! protected data or performs a write. The policy is pure; it only looks at the
//! actor, the action and, where ownership matters, the target record.

use thiserror::Error;

/// The caller of a service operation.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Actor {
    Anonymous,
    Teacher { id: i64 },
    Admin { id: i64 },
}

impl Actor {
    pub fn id(&self) -> Option<i64> {
        match self {
            Actor::Anonymous => None,
            Actor::Teacher { id } | Actor::Admin { id } => Some(*id),
        }
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Actor::Admin { .. })
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Action {
    ReadStudents,
    ReadMarks,
    CreateStudent,
    UpdateStudent,
    DeleteStudent,
    RegisterTeacher,
    ListTeachers,
    ReadTeacher,
    ReadOwnProfile,
    UpdateOwnProfile,
    CreateMarks,
    UpdateMarks,
    DeleteMarks,
    ClassAnalytics,
    ExportMarks,
}

/// The record an action targets, when ownership decides the outcome.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum Resource {
    #[default]
    Any,
    /// A marks record and the teacher that entered it.
    Marks { entered_by: i64 },
    /// A teacher profile.
    Profile { teacher_id: i64 },
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AccessError {
    #[error("You must be logged in to perform this action")]
    Unauthenticated,

    #[error("{0}")]
    Forbidden(String),
}

pub const ADMIN_REQUIRED: &str = "You must be an admin to perform this action";
pub const NOT_MARKS_OWNER_UPDATE: &str = "You can only update marks you entered";
pub const NOT_MARKS_OWNER_DELETE: &str = "You can only delete marks you entered";
pub const NOT_PROFILE_OWNER: &str = "You can only update your own profile";

pub struct AccessPolicy;

impl AccessPolicy {
    /// Returns the caller's id, or `Unauthenticated` for anonymous callers.
    pub fn require_authenticated(actor: &Actor) -> Result<i64, AccessError> {
        actor.id().ok_or(AccessError::Unauthenticated)
    }

    pub fn authorize(actor: &Actor, action: Action, resource: &Resource) -> Result<(), AccessError> {
        let actor_id = Self::require_authenticated(actor)?;
        let admin = actor.is_admin();

        match action {
            Action::ReadStudents
            | Action::ReadMarks
            | Action::CreateStudent
            | Action::UpdateStudent
            | Action::ReadOwnProfile
            | Action::CreateMarks
            | Action::ClassAnalytics
            | Action::ExportMarks => Ok(()),

            Action::DeleteStudent
            | Action::RegisterTeacher
            | Action::ListTeachers
            | Action::ReadTeacher => {
                if admin {
                    Ok(())
                } else {
                    Err(AccessError::Forbidden(ADMIN_REQUIRED.into()))
                }
            }

            Action::UpdateMarks => Self::owner_or_admin(actor_id, admin, resource, NOT_MARKS_OWNER_UPDATE),
            Action::DeleteMarks => Self::owner_or_admin(actor_id, admin, resource, NOT_MARKS_OWNER_DELETE),

            // Admins get no exemption here.
            Action::UpdateOwnProfile => match resource {
                Resource::Profile { teacher_id } if *teacher_id == actor_id => Ok(()),
                _ => Err(AccessError::Forbidden(NOT_PROFILE_OWNER.into())),
            },
        }
    }

    fn owner_or_admin(
        actor_id: i64,
        admin: bool,
        resource: &Resource,
        denial: &str,
    ) -> Result<(), AccessError> {
        if admin {
            return Ok(());
        }
        match resource {
            Resource::Marks { entered_by } if *entered_by == actor_id => Ok(()),
            _ => Err(AccessError::Forbidden(denial.into())),
        }
    }
}
