pub mod access;
pub mod analytics;
pub mod error;
pub mod export;
pub mod grade;
pub mod marks;
pub mod student;
pub mod teacher;
pub mod validation;

pub use access::{AccessError, AccessPolicy, Action, Actor, Resource};
pub use error::{ServiceError, ServiceResult};
pub use grade::{Grade, GradeEngine};
