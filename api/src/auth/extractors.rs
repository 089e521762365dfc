use axum::{
    Json,
    extract::{FromRef, FromRequestParts},
    http::{StatusCode, request::Parts},
};
use axum_extra::extract::TypedHeader;
use headers::{Authorization, authorization::Bearer};
use services::access::Actor;
use services::teacher::TeacherService;
use util::state::AppState;

use crate::auth::claims::AuthUser;
use crate::auth::decode_jwt;
use crate::response::{ApiResponse, Empty};

/// Extracts `AuthUser` from a valid `Authorization: Bearer` header.
///
/// # Errors
/// `401 Unauthorized` if the header is missing, malformed, or the token is invalid or expired.
impl<S> FromRequestParts<S> for AuthUser
where
    S: Send + Sync,
{
    type Rejection = (StatusCode, &'static str);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let TypedHeader(Authorization(bearer)) =
            TypedHeader::<Authorization<Bearer>>::from_request_parts(parts, state)
                .await
                .map_err(|_| (StatusCode::UNAUTHORIZED, "Missing or invalid Authorization header"))?;

        decode_jwt(bearer.token())
            .map(AuthUser)
            .ok_or((StatusCode::UNAUTHORIZED, "Invalid or expired token"))
    }
}

/// The caller as seen by the access policy.
///
/// Never rejects for missing or bad credentials: those resolve to
/// `Actor::Anonymous` and the service decides. A token whose teacher is gone
/// or deactivated is anonymous too.
#[derive(Debug, Clone, Copy)]
pub struct CurrentActor(pub Actor);

impl<S> FromRequestParts<S> for CurrentActor
where
    S: Send + Sync,
    AppState: FromRef<S>,
{
    type Rejection = (StatusCode, Json<ApiResponse<Empty>>);

    async fn from_request_parts(parts: &mut Parts, state: &S) -> Result<Self, Self::Rejection> {
        let Ok(AuthUser(claims)) = AuthUser::from_request_parts(parts, state).await else {
            return Ok(CurrentActor(Actor::Anonymous));
        };

        let app_state = AppState::from_ref(state);
        match TeacherService::actor_for(app_state.db(), claims.sub).await {
            Ok(actor) => Ok(CurrentActor(actor)),
            Err(e) => {
                tracing::error!(error = %e, teacher_id = claims.sub, "failed to resolve actor");
                Err((
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(ApiResponse::error("Internal server error")),
                ))
            }
        }
    }
}
