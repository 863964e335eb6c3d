//! HTTP API for the SuiteGate gateway.
//!
//! Every envelope response is HTTP 200; success or failure is carried in the
//! `success` member so RESTlet-era clients keep working unchanged.

mod config;

pub use config::{GatewayConfig, StoreKind};

use std::sync::Arc;

use axum::{
    Router,
    body::Bytes,
    extract::{Path, Query, State, rejection::QueryRejection},
    http::Method,
    response::Json,
    routing::{get, post},
};
use serde::Serialize;
use suitegate_facade::{
    ApprovalNotifier, ApprovalWorkflow, EntityFacade, EntityQuery, EntityRequest, Envelope,
    FacadeConfig, Operation,
};
use suitegate_model::{EntityDescriptor, EntityType};
use suitegate_store::RecordStore;
use tracing::{debug, warn};

/// Shared state behind every handler.
pub struct AppState {
    pub facade: EntityFacade,
    pub approvals: ApprovalWorkflow,
}

impl AppState {
    pub fn new(
        store: Arc<dyn RecordStore>,
        notifier: Arc<dyn ApprovalNotifier>,
        config: FacadeConfig,
    ) -> Self {
        let approvals = ApprovalWorkflow::new(store.clone(), notifier, &config);
        Self {
            facade: EntityFacade::new(store, config),
            approvals,
        }
    }
}

/// One row of the `/entity-types` listing.
#[derive(Serialize)]
struct EntityTypeInfo {
    label: &'static str,
    writable: bool,
    #[serde(flatten)]
    descriptor: &'static EntityDescriptor,
}

async fn read_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EntityQuery>, QueryRejection>,
) -> Json<Envelope> {
    Json(query_operation(&state, Operation::Read, query).await)
}

async fn delete_handler(
    State(state): State<Arc<AppState>>,
    query: Result<Query<EntityQuery>, QueryRejection>,
) -> Json<Envelope> {
    Json(query_operation(&state, Operation::Delete, query).await)
}

async fn create_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Json<Envelope> {
    Json(body_operation(&state, Operation::Create, &body).await)
}

async fn update_handler(State(state): State<Arc<AppState>>, body: Bytes) -> Json<Envelope> {
    Json(body_operation(&state, Operation::Update, &body).await)
}

async fn unsupported_method(method: Method) -> Json<Envelope> {
    warn!(%method, "Unsupported method on entities endpoint");
    Json(Envelope::failure(format!(
        "Unsupported method {method}. Use GET, POST, PUT, or DELETE."
    )))
}

async fn approval_handler(
    State(state): State<Arc<AppState>>,
    Path(id): Path<String>,
) -> Json<Envelope> {
    Json(state.approvals.handle(&id).await)
}

async fn entity_types_handler() -> Json<Envelope> {
    let types: Vec<EntityTypeInfo> = EntityType::ALL
        .iter()
        .map(|&entity_type| EntityTypeInfo {
            label: entity_type.label(),
            writable: entity_type.is_writable(),
            descriptor: EntityDescriptor::for_type(entity_type),
        })
        .collect();
    match serde_json::to_value(types) {
        Ok(data) => Json(Envelope::data(data)),
        Err(e) => Json(Envelope::failure(format!("Failed to list entity types: {e}"))),
    }
}

async fn query_operation(
    state: &AppState,
    operation: Operation,
    query: Result<Query<EntityQuery>, QueryRejection>,
) -> Envelope {
    match query {
        Ok(Query(query)) => state.facade.handle(operation, EntityRequest::from(query)).await,
        Err(rejection) => {
            debug!(%operation, "Rejected query string: {}", rejection);
            Envelope::failure(format!("Invalid query string: {}", rejection.body_text()))
        }
    }
}

async fn body_operation(state: &AppState, operation: Operation, body: &[u8]) -> Envelope {
    match serde_json::from_slice::<EntityRequest>(body) {
        Ok(request) => state.facade.handle(operation, request).await,
        Err(e) => {
            debug!(%operation, "Rejected request body: {}", e);
            Envelope::failure(format!("Invalid JSON body: {e}"))
        }
    }
}

/// Build the HTTP API router over the given state.
pub fn build_router(state: Arc<AppState>) -> Router {
    Router::new()
        .route(
            "/api/v1/entities",
            get(read_handler)
                .post(create_handler)
                .put(update_handler)
                .delete(delete_handler)
                .fallback(unsupported_method),
        )
        .route("/api/v1/purchaseorders/{id}/approval", post(approval_handler))
        .route("/api/v1/entity-types", get(entity_types_handler))
        .with_state(state)
}
