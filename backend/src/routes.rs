use actix_web::{HttpResponse, get, web};
use serde::Deserialize;
use serde_json::json;
use tracing::warn;

use crate::{
    AppState,
    credentials::Credentials,
    error::AppError,
    models::tree::{JsTreeNode, TreeNode},
};

pub fn register(cfg: &mut web::ServiceConfig) {
    cfg.service(health)
        .service(get_tree)
        .service(web::scope("/api/forge").service(get_datamanagement_tree));
}

#[get("/healthz")]
async fn health() -> HttpResponse {
    HttpResponse::Ok().json(json!({
        "status": "ok",
        "service": "dm-tree-backend",
        "version": env!("CARGO_PKG_VERSION")
    }))
}

#[derive(Deserialize)]
struct TreeQuery {
    id: Option<String>,
}

#[get("/tree")]
async fn get_tree(
    query: web::Query<TreeQuery>,
    credentials: Credentials,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let nodes = expand_node(query.into_inner(), credentials, state).await?;
    Ok(HttpResponse::Ok().json(nodes))
}

/// Legacy path for jsTree front ends; nodes use jsTree's `text`/`type`/`children` keys.
#[get("/datamanagement")]
async fn get_datamanagement_tree(
    query: web::Query<TreeQuery>,
    credentials: Credentials,
    state: web::Data<AppState>,
) -> Result<HttpResponse, AppError> {
    let nodes: Vec<JsTreeNode> = expand_node(query.into_inner(), credentials, state)
        .await?
        .into_iter()
        .map(JsTreeNode::from)
        .collect();
    Ok(HttpResponse::Ok().json(nodes))
}

async fn expand_node(
    query: TreeQuery,
    credentials: Credentials,
    state: web::Data<AppState>,
) -> Result<Vec<TreeNode>, AppError> {
    state
        .resolver
        .resolve(query.id.as_deref(), credentials.token())
        .await
        .inspect_err(|err| warn!(node_id = ?query.id, error = %err, "tree expansion failed"))
}
