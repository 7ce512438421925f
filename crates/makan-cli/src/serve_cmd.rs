use std::net::SocketAddr;

use anyhow::Result;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{Html, IntoResponse};
use axum::routing::{get, post};
use axum::{Json, Router};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use sqlx::PgPool;
use tower_http::cors::CorsLayer;
use uuid::Uuid;

use makan_core::menu::{create_menu_from_text, menu_export};
use makan_core::order::{OrderForm, insert_order_with_details, validate_order_form};
use makan_core::summary::render_menu_summary;
use makan_db::models::{Menu, MenuItem, Order, OrderDetail};
use makan_db::queries::orders::OrderStats;
use makan_db::queries::{menu_items, menus, orders};

// ---------------------------------------------------------------------------
// Error type
// ---------------------------------------------------------------------------

pub struct AppError {
    status: StatusCode,
    message: String,
}

impl AppError {
    pub fn not_found(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::NOT_FOUND,
            message: msg.into(),
        }
    }

    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::BAD_REQUEST,
            message: msg.into(),
        }
    }

    pub fn conflict(msg: impl Into<String>) -> Self {
        Self {
            status: StatusCode::CONFLICT,
            message: msg.into(),
        }
    }

    pub fn internal(err: anyhow::Error) -> Self {
        Self {
            status: StatusCode::INTERNAL_SERVER_ERROR,
            message: format!("{err:#}"),
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let body = serde_json::json!({ "error": self.message });
        (self.status, Json(body)).into_response()
    }
}

// ---------------------------------------------------------------------------
// Request / response types
// ---------------------------------------------------------------------------

#[derive(Debug, Deserialize)]
pub struct CreateMenuRequest {
    pub menu_date: NaiveDate,
    pub raw_text: String,
    #[serde(default)]
    pub is_closed: bool,
}

#[derive(Debug, Serialize)]
pub struct MenuSummaryResponse {
    #[serde(flatten)]
    pub menu: Menu,
    pub stats: OrderStats,
}

#[derive(Debug, Serialize)]
pub struct MenuCreatedResponse {
    #[serde(flatten)]
    pub menu: Menu,
    pub items: Vec<MenuItem>,
}

#[derive(Debug, Serialize)]
pub struct OrderCreatedResponse {
    #[serde(flatten)]
    pub order: Order,
    pub details: Vec<OrderDetail>,
}

#[derive(Debug, Serialize)]
pub struct SummaryResponse {
    pub summary: String,
}

// ---------------------------------------------------------------------------
// Router
// ---------------------------------------------------------------------------

pub fn build_router(pool: PgPool) -> Router {
    Router::new()
        .route("/", get(index))
        .route("/api/menus", get(list_menus).post(create_menu))
        .route("/api/menus/{id}", get(get_menu_detail))
        .route("/api/menus/{id}/orders", post(submit_order))
        .route("/api/menus/{id}/summary", get(get_menu_summary))
        .layer(CorsLayer::permissive())
        .with_state(pool)
}

// ---------------------------------------------------------------------------
// Entry point
// ---------------------------------------------------------------------------

pub async fn run_serve(pool: PgPool, bind: &str, port: u16) -> Result<()> {
    let app = build_router(pool);
    let addr: SocketAddr = format!("{bind}:{port}").parse()?;
    tracing::info!("makan serve listening on http://{addr}");
    let listener = tokio::net::TcpListener::bind(addr).await?;
    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await?;
    tracing::info!("makan serve shut down");
    Ok(())
}

async fn shutdown_signal() {
    tokio::signal::ctrl_c()
        .await
        .expect("failed to install Ctrl+C handler");
}

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

async fn index(State(pool): State<PgPool>) -> Result<axum::response::Response, AppError> {
    let all = menus::list_menus(&pool).await.map_err(AppError::internal)?;

    let rows = if all.is_empty() {
        "<tr><td colspan=\"4\">No menus yet.</td></tr>".to_string()
    } else {
        let mut rows = Vec::with_capacity(all.len());
        for menu in &all {
            let stats = orders::order_stats_for_menu(&pool, menu.id)
                .await
                .map_err(AppError::internal)?;
            rows.push(format!(
                "<tr><td><a href=\"/api/menus/{id}\">{date}</a></td><td>{status}</td><td>{total}</td><td>{id}</td></tr>",
                id = menu.id,
                date = menu.menu_date,
                status = menu.status_label(),
                total = stats.total,
            ));
        }
        rows.join("\n")
    };

    let html = format!(
        "<!DOCTYPE html>\
<html><head><title>makan</title></head><body>\
<h1>makan</h1>\
<p><a href=\"/api/menus\">/api/menus</a></p>\
<table><tr><th>Date</th><th>Status</th><th>Orders</th><th>ID</th></tr>{rows}</table>\
</body></html>"
    );

    Ok(Html(html).into_response())
}

async fn list_menus(State(pool): State<PgPool>) -> Result<axum::response::Response, AppError> {
    let all = menus::list_menus(&pool).await.map_err(AppError::internal)?;

    let mut results = Vec::with_capacity(all.len());
    for menu in all {
        let stats = orders::order_stats_for_menu(&pool, menu.id)
            .await
            .map_err(AppError::internal)?;
        results.push(MenuSummaryResponse { menu, stats });
    }

    Ok(Json(results).into_response())
}

async fn create_menu(
    State(pool): State<PgPool>,
    Json(req): Json<CreateMenuRequest>,
) -> Result<axum::response::Response, AppError> {
    if req.raw_text.trim().is_empty() {
        return Err(AppError::bad_request("raw_text must not be empty"));
    }

    let (menu, items) = create_menu_from_text(&pool, &req.raw_text, req.menu_date, req.is_closed)
        .await
        .map_err(AppError::internal)?;

    Ok((StatusCode::CREATED, Json(MenuCreatedResponse { menu, items })).into_response())
}

async fn get_menu_detail(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    menus::get_menu(&pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("menu {id} not found")))?;

    let export = menu_export(&pool, id).await.map_err(AppError::internal)?;

    Ok(Json(export).into_response())
}

async fn submit_order(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
    Json(form): Json<OrderForm>,
) -> Result<axum::response::Response, AppError> {
    let menu = menus::get_menu(&pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("menu {id} not found")))?;

    if menu.is_closed {
        return Err(AppError::conflict("orders are closed for this menu"));
    }

    let items = menu_items::list_items_for_menu(&pool, id)
        .await
        .map_err(AppError::internal)?;
    let item_names: Vec<String> = items.into_iter().map(|item| item.item_name).collect();
    validate_order_form(&form, &item_names)
        .map_err(|err| AppError::bad_request(err.to_string()))?;

    let (order, details) = insert_order_with_details(&pool, id, &form)
        .await
        .map_err(AppError::internal)?;

    Ok((
        StatusCode::CREATED,
        Json(OrderCreatedResponse { order, details }),
    )
        .into_response())
}

async fn get_menu_summary(
    State(pool): State<PgPool>,
    Path(id): Path<Uuid>,
) -> Result<axum::response::Response, AppError> {
    menus::get_menu(&pool, id)
        .await
        .map_err(AppError::internal)?
        .ok_or_else(|| AppError::not_found(format!("menu {id} not found")))?;

    let summary = render_menu_summary(&pool, id)
        .await
        .map_err(AppError::internal)?;

    Ok(Json(SummaryResponse { summary }).into_response())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use axum::body::Body;
    use axum::http::{Request, StatusCode};
    use chrono::NaiveDate;
    use sqlx::PgPool;
    use tower::ServiceExt;

    use makan_core::menu::create_menu_from_text;
    use makan_db::models::Menu;
    use makan_db::queries::menus::set_menu_closed;
    use makan_test_utils::{create_test_db, drop_test_db};

    // -----------------------------------------------------------------------
    // HTTP helpers
    // -----------------------------------------------------------------------

    async fn send_request(pool: PgPool, uri: &str) -> axum::response::Response {
        let app = super::build_router(pool);
        app.oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap()
    }

    async fn post_json(
        pool: PgPool,
        uri: &str,
        body: serde_json::Value,
    ) -> axum::response::Response {
        let app = super::build_router(pool);
        app.oneshot(
            Request::builder()
                .method("POST")
                .uri(uri)
                .header("content-type", "application/json")
                .body(Body::from(body.to_string()))
                .unwrap(),
        )
        .await
        .unwrap()
    }

    async fn body_json(response: axum::response::Response) -> serde_json::Value {
        let bytes = axum::body::to_bytes(response.into_body(), 1_048_576)
            .await
            .unwrap();
        serde_json::from_slice(&bytes).unwrap()
    }

    async fn seed_menu(pool: &PgPool) -> Menu {
        let (menu, _) = create_menu_from_text(
            pool,
            "Ayam Masak Merah\nSayur Campur",
            NaiveDate::from_ymd_opt(2025, 8, 22).unwrap(),
            false,
        )
        .await
        .expect("menu creation should succeed");
        menu
    }

    fn ali_order() -> serde_json::Value {
        serde_json::json!({
            "customer_name": "Ali",
            "lines": [
                { "item_name": "Nasi Putih", "quantity": 1 },
                { "item_name": "Sayur Campur", "quantity": 0 },
            ],
            "remarks": "less spicy",
        })
    }

    // -----------------------------------------------------------------------
    // Tests
    // -----------------------------------------------------------------------

    #[tokio::test]
    async fn test_index_returns_html() {
        let (pool, db_name) = create_test_db().await;

        let resp = send_request(pool.clone(), "/").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let content_type = resp
            .headers()
            .get("content-type")
            .expect("should have content-type header")
            .to_str()
            .unwrap();
        assert!(
            content_type.contains("text/html"),
            "content-type should contain text/html, got: {content_type}"
        );

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_list_menus_empty() {
        let (pool, db_name) = create_test_db().await;

        let resp = send_request(pool.clone(), "/api/menus").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json, serde_json::json!([]));

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_list_menus_with_data() {
        let (pool, db_name) = create_test_db().await;

        seed_menu(&pool).await;

        let resp = send_request(pool.clone(), "/api/menus").await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        let arr = json.as_array().expect("response should be an array");
        assert_eq!(arr.len(), 1);
        assert_eq!(arr[0]["menu_date"], "2025-08-22");
        assert_eq!(arr[0]["stats"]["total"], 0);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_create_menu() {
        let (pool, db_name) = create_test_db().await;

        let resp = post_json(
            pool.clone(),
            "/api/menus",
            serde_json::json!({
                "menu_date": "2025-08-22",
                "raw_text": "Ayam Masak Merah\nHarga RM8",
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["menu_date"], "2025-08-22");
        assert_eq!(json["is_closed"], false);
        let items = json["items"].as_array().expect("should have items array");
        assert_eq!(items[0]["item_name"], "Nasi Putih");
        assert_eq!(items[1]["item_name"], "Ayam Masak Merah");

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_create_menu_rejects_blank_text() {
        let (pool, db_name) = create_test_db().await;

        let resp = post_json(
            pool.clone(),
            "/api/menus",
            serde_json::json!({
                "menu_date": "2025-08-22",
                "raw_text": "   \n  ",
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_get_menu_detail() {
        let (pool, db_name) = create_test_db().await;

        let menu = seed_menu(&pool).await;

        let resp = send_request(pool.clone(), &format!("/api/menus/{}", menu.id)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["menu"]["id"], menu.id.to_string());
        assert!(json["items"].is_array(), "should have items array");
        assert!(json["orders"].is_array(), "should have orders array");
        assert_eq!(json["stats"]["total"], 0);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_get_menu_not_found() {
        let (pool, db_name) = create_test_db().await;

        let random_id = uuid::Uuid::new_v4();
        let resp = send_request(pool.clone(), &format!("/api/menus/{random_id}")).await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_submit_order() {
        let (pool, db_name) = create_test_db().await;

        let menu = seed_menu(&pool).await;

        let resp = post_json(
            pool.clone(),
            &format!("/api/menus/{}/orders", menu.id),
            ali_order(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);
        let json = body_json(resp).await;
        assert_eq!(json["customer_name"], "Ali");
        assert_eq!(json["remarks"], "less spicy");
        // The zero-quantity line is dropped at persistence.
        let details = json["details"].as_array().expect("should have details");
        assert_eq!(details.len(), 1);
        assert_eq!(details[0]["item_name"], "Nasi Putih");

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_submit_order_unknown_item_is_bad_request() {
        let (pool, db_name) = create_test_db().await;

        let menu = seed_menu(&pool).await;

        let resp = post_json(
            pool.clone(),
            &format!("/api/menus/{}/orders", menu.id),
            serde_json::json!({
                "customer_name": "Ali",
                "lines": [{ "item_name": "Burger Special", "quantity": 1 }],
            }),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
        let json = body_json(resp).await;
        let message = json["error"].as_str().expect("should have error message");
        assert!(
            message.contains("not on this menu"),
            "unexpected error: {message}"
        );

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_submit_order_closed_menu_conflicts() {
        let (pool, db_name) = create_test_db().await;

        let menu = seed_menu(&pool).await;
        set_menu_closed(&pool, menu.id, true).await.unwrap();

        let resp = post_json(
            pool.clone(),
            &format!("/api/menus/{}/orders", menu.id),
            ali_order(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CONFLICT);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_submit_order_unknown_menu_not_found() {
        let (pool, db_name) = create_test_db().await;

        let random_id = uuid::Uuid::new_v4();
        let resp = post_json(
            pool.clone(),
            &format!("/api/menus/{random_id}/orders"),
            ali_order(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::NOT_FOUND);

        pool.close().await;
        drop_test_db(&db_name).await;
    }

    #[tokio::test]
    async fn test_summary_endpoint() {
        let (pool, db_name) = create_test_db().await;

        let menu = seed_menu(&pool).await;

        // Fresh menu: sentinel text.
        let resp = send_request(pool.clone(), &format!("/api/menus/{}/summary", menu.id)).await;
        assert_eq!(resp.status(), StatusCode::OK);
        let json = body_json(resp).await;
        assert_eq!(json["summary"], "No orders yet.");

        // With an order: the rendered block.
        let resp = post_json(
            pool.clone(),
            &format!("/api/menus/{}/orders", menu.id),
            ali_order(),
        )
        .await;
        assert_eq!(resp.status(), StatusCode::CREATED);

        let resp = send_request(pool.clone(), &format!("/api/menus/{}/summary", menu.id)).await;
        let json = body_json(resp).await;
        let summary = json["summary"].as_str().expect("summary should be text");
        assert!(summary.contains("Order List"), "got: {summary}");
        assert!(summary.contains("1. *Ali*"), "got: {summary}");

        pool.close().await;
        drop_test_db(&db_name).await;
    }
}
