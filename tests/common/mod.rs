//! 测试辅助 - 进程内 fake 后端
//!
//! 用 axum 起一个模拟 StoryPhonic 后端：固定凭证、canned 响应、
//! 全量请求计数（用于断言"无 token 时不发请求"）

#![allow(dead_code)]

use axum::extract::{Multipart, Path, Request, State};
use axum::http::{HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::{IntoResponse, Response};
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::sync::atomic::{AtomicUsize, Ordering};
use std::sync::Arc;

/// 后端认可的 access token
pub const ACCESS_TOKEN: &str = "test-access-token";
/// 后端认可的 refresh token
pub const REFRESH_TOKEN: &str = "test-refresh-token";
/// Google 提供方认可的 access token
pub const PROVIDER_TOKEN: &str = "provider-access-token";

pub const USER_ID: &str = "7f3a2c9e-58f1-4ad8-9c16-0a1b2c3d4e5f";
pub const NOVEL_ID_1: &str = "11111111-1111-4111-8111-111111111111";
pub const NOVEL_ID_2: &str = "22222222-2222-4222-8222-222222222222";
pub const CHARACTER_ID_1: &str = "33333333-3333-4333-8333-333333333333";
pub const CHARACTER_ID_2: &str = "44444444-4444-4444-8444-444444444444";
pub const CHARACTER_ID_3: &str = "55555555-5555-4555-8555-555555555555";

#[derive(Default)]
pub struct ServerState {
    pub hits: AtomicUsize,
}

/// 运行中的 fake 后端
pub struct FakeBackend {
    pub base_url: String,
    state: Arc<ServerState>,
}

impl FakeBackend {
    /// 启动时刻以来收到的请求数
    pub fn hits(&self) -> usize {
        self.state.hits.load(Ordering::SeqCst)
    }
}

/// 在随机端口上启动 fake 后端
pub async fn spawn_backend() -> FakeBackend {
    let state = Arc::new(ServerState::default());
    let app = router(state.clone());

    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });

    FakeBackend {
        base_url: format!("http://{}", addr),
        state,
    }
}

fn router(state: Arc<ServerState>) -> Router {
    Router::new()
        // oauth
        .route("/api/oauth/token/", post(login))
        .route("/api/oauth/register/", post(register))
        .route("/api/oauth/me/", get(me))
        .route("/api/oauth/profile/", get(profile).put(update_profile))
        .route("/api/oauth/change-password/", post(change_password))
        .route("/api/oauth/avatar/", post(avatar))
        .route("/api/oauth/google/callback/", post(google_callback))
        // google userinfo（提供方一侧）
        .route("/oauth2/userinfo", get(userinfo))
        // audiobook
        .route("/api/audiobook/novels/", get(list_novels).post(create_novel))
        .route(
            "/api/audiobook/novels/:id/",
            get(get_novel).delete(delete_novel),
        )
        .route(
            "/api/audiobook/novels/:id/create_audiobook/",
            post(create_audiobook),
        )
        // characters
        .route("/api/characters/", get(list_characters).post(create_character))
        .route(
            "/api/characters/:id/",
            axum::routing::put(update_character).delete(delete_character),
        )
        // annotations
        .route("/api/chunk-annotations/", get(list_chunk_annotations))
        .route("/api/sentence-annotations/", get(list_sentence_annotations))
        .route(
            "/api/chunk-context-memories/",
            get(list_context_memories),
        )
        // stories
        .route("/api/stories/", get(list_stories))
        .route("/api/stories/:id/", get(get_story))
        .layer(middleware::from_fn_with_state(state.clone(), count_hits))
        .with_state(state)
}

async fn count_hits(State(state): State<Arc<ServerState>>, req: Request, next: Next) -> Response {
    state.hits.fetch_add(1, Ordering::SeqCst);
    next.run(req).await
}

fn bearer(headers: &HeaderMap) -> Option<&str> {
    headers
        .get("authorization")
        .and_then(|v| v.to_str().ok())
        .and_then(|v| v.strip_prefix("Bearer "))
}

fn unauthorized() -> Response {
    (
        StatusCode::UNAUTHORIZED,
        Json(json!({"detail": "Invalid token"})),
    )
        .into_response()
}

fn require_auth(headers: &HeaderMap) -> Result<(), Response> {
    match bearer(headers) {
        Some(ACCESS_TOKEN) => Ok(()),
        _ => Err(unauthorized()),
    }
}

// ---------- 样例数据 ----------

pub fn user_json() -> Value {
    json!({
        "id": USER_ID,
        "email": "a@b.com",
        "first_name": "Ada",
        "last_name": "Byron",
        "is_active": true,
        "is_staff": false,
        "roles": [{"id": 1, "name": "user", "description": null}],
        "created_at": "2025-01-01T00:00:00Z",
        "updated_at": "2025-01-01T00:00:00Z"
    })
}

pub fn novel_json(id: &str, name: &str) -> Value {
    json!({
        "id": id,
        "user": USER_ID,
        "name": name,
        "content": "Once upon a time...",
        "status": "uploaded",
        "created_at": "2025-02-01T00:00:00Z",
        "s3_audio_metadata_url": null,
        "s3_audio_file_url": null,
        "is_deleted": false
    })
}

pub fn character_json(id: &str, name: &str, index: i64) -> Value {
    json!({
        "id": id,
        "novel": NOVEL_ID_1,
        "name": name,
        "character_info": format!("{} info", name),
        "index": index,
        "created_at": "2025-02-01T00:00:00Z",
        "updated_at": "2025-02-01T00:00:00Z",
        "is_deleted": false
    })
}

fn story_json(id: i64, title: &str) -> Value {
    json!({
        "id": id,
        "title": title,
        "content": "A short story.",
        "level": 2,
        "points": 10,
        "created_at": "2025-03-01T00:00:00Z",
        "updated_at": "2025-03-01T00:00:00Z"
    })
}

// ---------- oauth handlers ----------

async fn login(Json(body): Json<Value>) -> Response {
    if body["password"] == "secret" {
        Json(json!({"access": ACCESS_TOKEN, "refresh": REFRESH_TOKEN})).into_response()
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({"detail": "Invalid credentials"})),
        )
            .into_response()
    }
}

async fn register(Json(body): Json<Value>) -> Response {
    if body.get("password") != body.get("password2") {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Passwords do not match"})),
        )
            .into_response();
    }
    let mut user = user_json();
    user["email"] = body["email"].clone();
    Json(json!({"user": user, "token": ACCESS_TOKEN})).into_response()
}

async fn me(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(user_json()).into_response(),
        Err(resp) => resp,
    }
}

async fn profile(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!({
            "full_name": "Ada Byron",
            "avatar": null,
            "bio": "Reader of novels"
        }))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn update_profile(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!({
            "first_name": body["first_name"],
            "last_name": body["last_name"],
            "email": body["email"]
        }))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn change_password(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    if body["current_password"] == "wrong" {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Current password is incorrect"})),
        )
            .into_response();
    }
    // 后端此接口成功时返回空体
    StatusCode::OK.into_response()
}

async fn avatar(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    while let Ok(Some(field)) = multipart.next_field().await {
        if field.name() == Some("avatar") {
            let file_name = field.file_name().unwrap_or("avatar").to_string();
            let _ = field.bytes().await;
            return Json(json!({"avatar": format!("http://cdn.test/{}", file_name)}))
                .into_response();
        }
    }
    (
        StatusCode::BAD_REQUEST,
        Json(json!({"detail": "No avatar file provided"})),
    )
        .into_response()
}

async fn google_callback(Json(body): Json<Value>) -> Response {
    let Some(email) = body["user_info"]["email"].as_str() else {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"error": "No user info provided"})),
        )
            .into_response();
    };
    let mut user = user_json();
    user["email"] = json!(email);
    Json(json!({
        "user": user,
        "tokens": {"access": ACCESS_TOKEN, "refresh": REFRESH_TOKEN}
    }))
    .into_response()
}

async fn userinfo(headers: HeaderMap) -> Response {
    match bearer(&headers) {
        Some(PROVIDER_TOKEN) => Json(json!({
            "email": "g@b.com",
            "given_name": "Ada",
            "family_name": "Byron",
            "picture": "http://cdn.test/pic.png"
        }))
        .into_response(),
        _ => unauthorized(),
    }
}

// ---------- audiobook handlers ----------

async fn list_novels(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!([
            novel_json(NOVEL_ID_1, "The Little Prince"),
            novel_json(NOVEL_ID_2, "Alice in Wonderland"),
        ]))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn get_novel(headers: HeaderMap, Path(id): Path<String>) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(novel_json(&id, "The Little Prince")).into_response(),
        Err(resp) => resp,
    }
}

async fn create_novel(headers: HeaderMap, mut multipart: Multipart) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    let mut name = String::new();
    while let Ok(Some(field)) = multipart.next_field().await {
        let field_name = field.name().map(str::to_string);
        match field_name.as_deref() {
            Some("name") => name = field.text().await.unwrap_or_default(),
            _ => {
                let _ = field.bytes().await;
            }
        }
    }
    if name.is_empty() {
        return (
            StatusCode::BAD_REQUEST,
            Json(json!({"detail": "Name is required"})),
        )
            .into_response();
    }
    (
        StatusCode::CREATED,
        Json(novel_json(NOVEL_ID_1, &name)),
    )
        .into_response()
}

async fn delete_novel(headers: HeaderMap, Path(_id): Path<String>) -> Response {
    match require_auth(&headers) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(resp) => resp,
    }
}

async fn create_audiobook(headers: HeaderMap, Path(_id): Path<String>) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!({"status": "queued", "message": "Audiobook creation started"}))
            .into_response(),
        Err(resp) => resp,
    }
}

// ---------- character handlers ----------

async fn list_characters(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!([
            character_json(CHARACTER_ID_1, "Prince", 0),
            character_json(CHARACTER_ID_2, "Fox", 1),
            character_json(CHARACTER_ID_3, "Rose", 2),
        ]))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn create_character(headers: HeaderMap, Json(body): Json<Value>) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    let mut character = character_json(CHARACTER_ID_1, "Prince", 0);
    character["name"] = body["name"].clone();
    character["character_info"] = body["character_info"].clone();
    character["index"] = body["index"].clone();
    (StatusCode::CREATED, Json(character)).into_response()
}

async fn update_character(
    headers: HeaderMap,
    Path(id): Path<String>,
    Json(body): Json<Value>,
) -> Response {
    if let Err(resp) = require_auth(&headers) {
        return resp;
    }
    let mut character = character_json(&id, "Prince", 0);
    if let Some(name) = body.get("name") {
        character["name"] = name.clone();
    }
    if let Some(info) = body.get("character_info") {
        character["character_info"] = info.clone();
    }
    if let Some(index) = body.get("index") {
        character["index"] = index.clone();
    }
    Json(character).into_response()
}

async fn delete_character(headers: HeaderMap, Path(_id): Path<String>) -> Response {
    match require_auth(&headers) {
        Ok(()) => StatusCode::NO_CONTENT.into_response(),
        Err(resp) => resp,
    }
}

// ---------- annotation handlers ----------

async fn list_chunk_annotations(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!([{
            "id": "66666666-6666-4666-8666-666666666666",
            "novel": NOVEL_ID_1,
            "raw_text": "\"Hello,\" she said.",
            "clean_text": "Hello, she said.",
            "index": 0,
            "status": "done",
            "created_at": "2025-02-01T00:00:00Z",
            "updated_at": "2025-02-01T00:00:00Z",
            "is_deleted": false
        }]))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn list_sentence_annotations(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!([{
            "id": "77777777-7777-4777-8777-777777777777",
            "novel": NOVEL_ID_1,
            "context": "\"Hello,\" she said.",
            "index": 0,
            "type": "dialogue",
            "raw_character": "Rose",
            "emotion": "happy",
            "identity": null,
            "gender": "Female",
            "voice_actor": "voice_07",
            "chunk_annotation_belong": null,
            "chunk_index": 0,
            "created_at": "2025-02-01T00:00:00Z",
            "updated_at": "2025-02-01T00:00:00Z",
            "is_deleted": false
        }]))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn list_context_memories(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!([{
            "id": "88888888-8888-4888-8888-888888888888",
            "novel": NOVEL_ID_1,
            "content": "The prince has met the fox.",
            "index": 0,
            "created_at": "2025-02-01T00:00:00Z",
            "updated_at": "2025-02-01T00:00:00Z",
            "is_deleted": false
        }]))
        .into_response(),
        Err(resp) => resp,
    }
}

// ---------- story handlers ----------

async fn list_stories(headers: HeaderMap) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(json!([
            story_json(1, "The Tortoise and the Hare"),
            story_json(2, "The Boy Who Cried Wolf"),
        ]))
        .into_response(),
        Err(resp) => resp,
    }
}

async fn get_story(headers: HeaderMap, Path(id): Path<i64>) -> Response {
    match require_auth(&headers) {
        Ok(()) => Json(story_json(id, "The Tortoise and the Hare")).into_response(),
        Err(resp) => resp,
    }
}
