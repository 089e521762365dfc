use serde::{Deserialize, Serialize};

/// JWT payload. `sub` is the teacher id.
#[derive(Debug, Serialize, Deserialize, Clone)]
pub struct Claims {
    pub sub: i64,
    pub exp: usize,
    pub admin: bool,
}

/// Claims of a request carrying a valid bearer token.
#[derive(Debug, Clone)]
pub struct AuthUser(pub Claims);
