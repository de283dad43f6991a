use std::{
    collections::HashMap,
    sync::Arc,
    time::{SystemTime, UNIX_EPOCH},
};

use axum::{
    extract::{Path, Query, State},
    http::StatusCode,
    routing::{get, post},
    Form, Json, Router,
};
use serde::{Deserialize, Serialize};
use tokio::{net::TcpListener, sync::RwLock};
use tracing::{debug, info};
use uuid::Uuid;

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Author {
    pub id: String,
    pub screen_name: String,
}

#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct Status {
    pub id: String,
    pub created_at: String,
    pub text: String,
    pub html: String,
    pub source: String,
    pub lang: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub external_url: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_status_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub in_reply_to_user_id: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub channel: Option<String>,
    pub truncated: bool,
    pub favorited: bool,
    pub user: Author,
}

#[derive(Deserialize)]
pub struct UpdateForm {
    pub status: String,
    pub lang: Option<String>,
    pub source: Option<String>,
    pub in_reply_to_status_id: Option<String>,
    pub external_url: Option<String>,
    pub data: Option<String>,
    pub channel: Option<String>,
}

#[derive(Deserialize)]
pub struct ApiKey {
    pub apikey: Option<String>,
}

pub type Db = Arc<RwLock<HashMap<String, Status>>>;

pub fn app() -> Router {
    let db: Db = Arc::new(RwLock::new(HashMap::new()));
    Router::new()
        .route("/api/statuses/update.json", post(update_status))
        .route("/api/statuses/show/{file}", get(show_status))
        .with_state(db)
}

pub async fn run(listener: TcpListener) -> Result<(), std::io::Error> {
    if let Ok(addr) = listener.local_addr() {
        info!(%addr, "mock qaiku listening");
    }
    axum::serve(listener, app()).await
}

/// The account an API key posts as.
fn author_for(key: &str) -> Author {
    Author {
        id: format!("u-{key}"),
        screen_name: key.to_string(),
    }
}

fn require_key(query: &ApiKey) -> Result<&str, StatusCode> {
    match query.apikey.as_deref() {
        Some(key) if !key.is_empty() => Ok(key),
        _ => Err(StatusCode::UNAUTHORIZED),
    }
}

async fn update_status(
    State(db): State<Db>,
    Query(query): Query<ApiKey>,
    Form(input): Form<UpdateForm>,
) -> Result<Json<Status>, StatusCode> {
    let key = require_key(&query)?;
    if input.status.is_empty() {
        return Err(StatusCode::BAD_REQUEST);
    }

    let reply_to = match input.in_reply_to_status_id {
        Some(id) => {
            let statuses = db.read().await;
            let parent = statuses.get(&id).ok_or(StatusCode::NOT_FOUND)?;
            Some((id, parent.user.id.clone()))
        }
        None => None,
    };
    let (in_reply_to_status_id, in_reply_to_user_id) = reply_to.unzip();

    let created_at = SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .map(|d| d.as_secs().to_string())
        .unwrap_or_default();

    let status = Status {
        id: Uuid::new_v4().simple().to_string(),
        created_at,
        html: format!("<p>{}</p>", input.status),
        text: input.status,
        source: input.source.unwrap_or_else(|| "web".to_string()),
        lang: input.lang.unwrap_or_else(|| "en".to_string()),
        data: input.data,
        external_url: input.external_url,
        in_reply_to_status_id,
        in_reply_to_user_id,
        channel: input.channel,
        truncated: false,
        favorited: false,
        user: author_for(key),
    };
    debug!(id = %status.id, "stored status");
    db.write().await.insert(status.id.clone(), status.clone());
    Ok(Json(status))
}

async fn show_status(
    State(db): State<Db>,
    Path(file): Path<String>,
    Query(query): Query<ApiKey>,
) -> Result<Json<Status>, StatusCode> {
    require_key(&query)?;
    let id = file.strip_suffix(".json").ok_or(StatusCode::NOT_FOUND)?;
    let statuses = db.read().await;
    statuses.get(id).cloned().map(Json).ok_or(StatusCode::NOT_FOUND)
}
