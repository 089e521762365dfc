use async_graphql::{Error, ErrorExtensions};
use services::error::ServiceError;

/// Extension codes carried in `errors[].extensions.code`.
pub const UNAUTHENTICATED: &str = "UNAUTHENTICATED";
pub const FORBIDDEN: &str = "FORBIDDEN";
pub const BAD_USER_INPUT: &str = "BAD_USER_INPUT";
pub const NOT_FOUND: &str = "NOT_FOUND";
pub const INTERNAL_SERVER_ERROR: &str = "INTERNAL_SERVER_ERROR";

fn coded(message: impl Into<String>, code: &'static str) -> Error {
    Error::new(message).extend_with(|_, e| e.set("code", code))
}

pub fn bad_input(message: impl Into<String>) -> Error {
    coded(message, BAD_USER_INPUT)
}

pub fn internal() -> Error {
    coded("Internal server error", INTERNAL_SERVER_ERROR)
}

/// Maps a service failure onto a GraphQL error with an extension code.
pub fn gql_error(err: ServiceError) -> Error {
    match err {
        ServiceError::Validation(m) => coded(m, BAD_USER_INPUT),
        ServiceError::NotFound(m) => coded(m, NOT_FOUND),
        ServiceError::Unauthenticated(m) => coded(m, UNAUTHENTICATED),
        ServiceError::Forbidden(m) => coded(m, FORBIDDEN),
        other => {
            tracing::error!(error = %other, "graphql request failed");
            internal()
        }
    }
}
