//! GraphQL endpoint (`/graphql`).
//!
//! Resolvers call the same services as the REST handlers; the caller's
//! `Actor` is attached to each request as context data.

pub mod errors;
pub mod mutation;
pub mod query;
pub mod types;

use async_graphql::{Context, EmptySubscription, Schema, http::GraphiQLSource};
use async_graphql_axum::{GraphQLRequest, GraphQLResponse};
use axum::{
    Router,
    extract::{FromRef, State},
    response::{Html, IntoResponse},
    routing::get,
};
use sea_orm::DatabaseConnection;
use services::access::Actor;
use util::state::AppState;

use crate::auth::CurrentActor;
use mutation::MutationRoot;
use query::QueryRoot;

pub type SchoolSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Builds the schema with the shared database handle as context data.
pub fn build_schema(app_state: &AppState) -> SchoolSchema {
    Schema::build(QueryRoot, MutationRoot, EmptySubscription)
        .data(app_state.db_clone())
        .finish()
}

pub(crate) fn db<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a DatabaseConnection> {
    ctx.data::<DatabaseConnection>()
}

pub(crate) fn actor<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a Actor> {
    ctx.data::<Actor>()
}

#[derive(Clone)]
pub struct GraphQlState {
    app: AppState,
    schema: SchoolSchema,
}

impl FromRef<GraphQlState> for AppState {
    fn from_ref(state: &GraphQlState) -> Self {
        state.app.clone()
    }
}

async fn graphql_handler(
    State(state): State<GraphQlState>,
    CurrentActor(actor): CurrentActor,
    req: GraphQLRequest,
) -> GraphQLResponse {
    state.schema.execute(req.into_inner().data(actor)).await.into()
}

async fn graphiql() -> impl IntoResponse {
    Html(GraphiQLSource::build().endpoint("/graphql").finish())
}

/// `GET /graphql` serves GraphiQL, `POST /graphql` executes queries.
pub fn graphql_routes(app_state: AppState) -> Router {
    let schema = build_schema(&app_state);
    Router::new()
        .route("/graphql", get(graphiql).post(graphql_handler))
        .with_state(GraphQlState {
            app: app_state,
            schema,
        })
}
