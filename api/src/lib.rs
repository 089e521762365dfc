pub mod auth;
pub mod graphql;
pub mod response;
pub mod routes;
