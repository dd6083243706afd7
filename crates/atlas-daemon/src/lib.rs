//! HTTP control-plane daemon for Atlas: wires `atlas-ingest`, `atlas-query`,
//! and `atlas-workflow`'s handlers to a shared `atlas-store::GraphStore` and
//! `atlas-workflow::WorkflowStore` behind an Axum router.
#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod auth;
mod error;
pub mod middleware;

use atlas_canon::{Signer, SignerConfig};
use atlas_core::{Context, StateRecord, TransitionRecord};
use atlas_error::AtlasError;
use atlas_ingest::{IngestBundle, IngestHandler};
use atlas_ontology::OntologyRegistries;
use atlas_query::{HealthHandler, QueryHandler};
use atlas_store::{GraphStore, GraphStoreConfig};
use atlas_workflow::{Workflow, WorkflowHandler, WorkflowStore};
use auth::{AuthConfig, Authenticator};
use axum::extract::{Path as AxPath, Query, State};
use axum::middleware as axum_middleware;
use axum::response::IntoResponse;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde::Deserialize;
use std::sync::Arc;

pub use error::ApiError;

/// Shared daemon state: one graph store, one workflow store, the
/// read/write handlers built over them, the shared ontology vocabulary, and
/// the optional authenticator/signer.
#[derive(Clone)]
pub struct AppState {
    ingest: IngestHandler,
    query: QueryHandler,
    health: HealthHandler,
    workflow: WorkflowHandler,
    ontology: Arc<OntologyRegistries>,
    authenticator: Option<Arc<Authenticator>>,
    signer: Option<Arc<Signer>>,
}

impl AppState {
    /// Construct fresh, empty daemon state with the given store limits, no
    /// authentication, and no payload signing.
    pub fn new(store_config: GraphStoreConfig) -> Self {
        let store = Arc::new(GraphStore::new(store_config));
        let workflow_store = Arc::new(WorkflowStore::new());

        Self {
            ingest: IngestHandler::new(store.clone()),
            query: QueryHandler::new(store.clone()),
            health: HealthHandler::new(store.clone()),
            workflow: WorkflowHandler::new(store, workflow_store),
            ontology: Arc::new(OntologyRegistries::with_builtins()),
            authenticator: None,
            signer: None,
        }
    }

    /// Enable API-key authentication using the given configuration.
    pub fn with_auth(mut self, config: AuthConfig) -> Self {
        self.authenticator = Some(Arc::new(Authenticator::new(config)));
        self
    }

    /// Enable HMAC payload signing using the given configuration.
    ///
    /// # Errors
    ///
    /// Returns an error if `config` names an unsupported hash algorithm.
    pub fn with_signer(mut self, config: SignerConfig) -> Result<Self, AtlasError> {
        self.signer = Some(Arc::new(Signer::new(config)?));
        Ok(self)
    }

    /// The shared UI role/pattern/intent vocabulary.
    pub fn ontology(&self) -> &Arc<OntologyRegistries> {
        &self.ontology
    }

    /// The configured authenticator, if any.
    pub fn authenticator(&self) -> Option<Arc<Authenticator>> {
        self.authenticator.clone()
    }

    /// The configured payload signer, if any.
    pub fn signer(&self) -> Option<Arc<Signer>> {
        self.signer.clone()
    }
}

impl Default for AppState {
    fn default() -> Self {
        Self::new(GraphStoreConfig::default())
    }
}

/// Build the Axum router with all daemon routes.
///
/// Authentication applies uniformly to every route once `state` carries an
/// authenticator; there is no per-route opt-out.
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .route("/health", get(cmd_health))
        .route("/ingest/context", post(cmd_ingest_context))
        .route("/ingest/state", post(cmd_ingest_state))
        .route("/ingest/states", post(cmd_ingest_states))
        .route("/ingest/transition", post(cmd_ingest_transition))
        .route("/ingest/transitions", post(cmd_ingest_transitions))
        .route("/ingest/bundle", post(cmd_ingest_bundle))
        .route("/contexts", get(cmd_list_contexts))
        .route("/contexts/{context_id}", get(cmd_get_context))
        .route("/contexts/{context_id}/states", get(cmd_list_states))
        .route(
            "/contexts/{context_id}/states/{state_id}",
            get(cmd_get_state),
        )
        .route(
            "/contexts/{context_id}/transitions",
            get(cmd_list_transitions),
        )
        .route(
            "/contexts/{context_id}/transitions/{transition_id}",
            get(cmd_get_transition),
        )
        .route(
            "/contexts/{context_id}/states/{state_id}/outgoing",
            get(cmd_list_outgoing),
        )
        .route(
            "/contexts/{context_id}/states/{state_id}/incoming",
            get(cmd_list_incoming),
        )
        .route(
            "/contexts/{context_id}/path",
            get(cmd_shortest_path),
        )
        .route("/workflows", post(cmd_upsert_workflow).get(cmd_list_workflows))
        .route(
            "/workflows/{workflow_id}",
            get(cmd_get_workflow).delete(cmd_delete_workflow),
        )
        .layer(axum_middleware::from_fn_with_state(
            state.clone(),
            auth::require_auth,
        ))
        .with_state(state)
}

async fn cmd_health(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.health.health())
}

#[derive(Debug, Deserialize)]
struct OverwriteQuery {
    #[serde(default = "default_true")]
    overwrite: bool,
}

fn default_true() -> bool {
    true
}

async fn cmd_ingest_context(
    State(state): State<AppState>,
    Query(q): Query<OverwriteQuery>,
    Json(context): Json<Context>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.ingest.ingest_context(context, q.overwrite)?;
    Ok(Json(result))
}

async fn cmd_ingest_state(
    State(state): State<AppState>,
    Json(record): Json<StateRecord>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.ingest.ingest_state_record(record)?;
    Ok(Json(result))
}

async fn cmd_ingest_states(
    State(state): State<AppState>,
    Json(records): Json<Vec<StateRecord>>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.ingest.ingest_state_records(records)?;
    Ok(Json(result))
}

async fn cmd_ingest_transition(
    State(state): State<AppState>,
    Json(record): Json<TransitionRecord>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.ingest.ingest_transition_record(record)?;
    Ok(Json(result))
}

async fn cmd_ingest_transitions(
    State(state): State<AppState>,
    Json(records): Json<Vec<TransitionRecord>>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.ingest.ingest_transition_records(records)?;
    Ok(Json(result))
}

async fn cmd_ingest_bundle(
    State(state): State<AppState>,
    Json(bundle): Json<IngestBundle>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.ingest.ingest_bundle(bundle)?;
    Ok(Json(result))
}

async fn cmd_list_contexts(State(state): State<AppState>) -> impl IntoResponse {
    Json(state.query.list_contexts())
}

async fn cmd_get_context(
    State(state): State<AppState>,
    AxPath(context_id): AxPath<String>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.get_context(&context_id)?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct StateFilterQuery {
    tag: Option<String>,
    source: Option<String>,
    review_status: Option<String>,
}

async fn cmd_list_states(
    State(state): State<AppState>,
    AxPath(context_id): AxPath<String>,
    Query(q): Query<StateFilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.list_states(
        &context_id,
        q.tag.as_deref(),
        q.source.as_deref(),
        q.review_status.as_deref(),
    )?;
    Ok(Json(result))
}

async fn cmd_get_state(
    State(state): State<AppState>,
    AxPath((context_id, state_id)): AxPath<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.get_state(&context_id, &state_id)?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct TransitionFilterQuery {
    source: Option<String>,
    review_status: Option<String>,
    intent_id: Option<String>,
}

async fn cmd_list_transitions(
    State(state): State<AppState>,
    AxPath(context_id): AxPath<String>,
    Query(q): Query<TransitionFilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.list_transitions(
        &context_id,
        q.source.as_deref(),
        q.review_status.as_deref(),
        q.intent_id.as_deref(),
    )?;
    Ok(Json(result))
}

async fn cmd_get_transition(
    State(state): State<AppState>,
    AxPath((context_id, transition_id)): AxPath<(String, String)>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.get_transition(&context_id, &transition_id)?;
    Ok(Json(result))
}

async fn cmd_list_outgoing(
    State(state): State<AppState>,
    AxPath((context_id, state_id)): AxPath<(String, String)>,
    Query(q): Query<TransitionFilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.list_outgoing(
        &context_id,
        &state_id,
        q.source.as_deref(),
        q.review_status.as_deref(),
        q.intent_id.as_deref(),
    )?;
    Ok(Json(result))
}

async fn cmd_list_incoming(
    State(state): State<AppState>,
    AxPath((context_id, state_id)): AxPath<(String, String)>,
    Query(q): Query<TransitionFilterQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.list_incoming(
        &context_id,
        &state_id,
        q.source.as_deref(),
        q.review_status.as_deref(),
        q.intent_id.as_deref(),
    )?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct PathQuery {
    source_state_id: String,
    target_state_id: String,
    max_depth: Option<usize>,
}

async fn cmd_shortest_path(
    State(state): State<AppState>,
    AxPath(context_id): AxPath<String>,
    Query(q): Query<PathQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.query.shortest_path(
        &context_id,
        &q.source_state_id,
        &q.target_state_id,
        q.max_depth,
    )?;
    Ok(Json(result))
}

async fn cmd_upsert_workflow(
    State(state): State<AppState>,
    Json(workflow): Json<Workflow>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.workflow.upsert_workflow(workflow)?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct ExpandQuery {
    #[serde(default)]
    expand: bool,
}

async fn cmd_get_workflow(
    State(state): State<AppState>,
    AxPath(workflow_id): AxPath<String>,
    Query(q): Query<ExpandQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.workflow.get_workflow(&workflow_id, q.expand)?;
    Ok(Json(result))
}

#[derive(Debug, Deserialize)]
struct WorkflowListQuery {
    context_id: Option<String>,
    intent_id: Option<String>,
    tag: Option<String>,
}

async fn cmd_list_workflows(
    State(state): State<AppState>,
    Query(q): Query<WorkflowListQuery>,
) -> Result<impl IntoResponse, ApiError> {
    let result = state.workflow.list_workflows(
        q.context_id.as_deref(),
        q.intent_id.as_deref(),
        q.tag.as_deref(),
    )?;
    Ok(Json(result))
}

async fn cmd_delete_workflow(
    State(state): State<AppState>,
    AxPath(workflow_id): AxPath<String>,
) -> impl IntoResponse {
    Json(state.workflow.delete_workflow(&workflow_id))
}
