//! End-to-end tests driving the full router against an in-memory database.
//!
//! No sockets: `tower::ServiceExt::oneshot` pushes requests through the
//! exact production routing table, middleware included.

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use dukaan_db::{Database, DbConfig};
use dukaan_server::config::ServerConfig;
use dukaan_server::{bootstrap_admin, router, AppState};

async fn app() -> Router {
    let db = Database::new(DbConfig::in_memory()).await.unwrap();
    let state = AppState::new(db, ServerConfig::default());
    bootstrap_admin(&state).await.unwrap();
    router(state)
}

fn form_request(uri: &str, body: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder()
        .method("POST")
        .uri(uri)
        .header(header::CONTENT_TYPE, "application/x-www-form-urlencoded");
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::from(body.to_string())).unwrap()
}

fn get_request(uri: &str, cookie: Option<&str>) -> Request<Body> {
    let mut builder = Request::builder().method("GET").uri(uri);
    if let Some(cookie) = cookie {
        builder = builder.header(header::COOKIE, cookie);
    }
    builder.body(Body::empty()).unwrap()
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

/// Logs in as the bootstrap admin and returns the session cookie pair.
async fn login(app: &Router) -> String {
    let response = app
        .clone()
        .oneshot(form_request(
            "/login",
            "username=admin&password=admin123",
            None,
        ))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");

    let set_cookie = response.headers()[header::SET_COOKIE].to_str().unwrap();
    set_cookie
        .split(';')
        .next()
        .unwrap()
        .trim()
        .to_string()
}

async fn add_item(app: &Router, cookie: &str, name: &str, price: &str, qty: &str) -> i64 {
    let body = json!({
        "item_name": name,
        "category": "General",
        "purchase_price": price,
        "quantity": qty,
    });

    let request = Request::builder()
        .method("POST")
        .uri("/api/inventory/add")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, cookie)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    json["item"]["id"].as_i64().unwrap()
}

#[tokio::test]
async fn login_failures_are_indistinguishable() {
    let app = app().await;

    let wrong_password = app
        .clone()
        .oneshot(form_request("/login", "username=admin&password=nope", None))
        .await
        .unwrap();
    let unknown_user = app
        .clone()
        .oneshot(form_request("/login", "username=ghost&password=nope", None))
        .await
        .unwrap();

    assert_eq!(wrong_password.status(), StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status(), StatusCode::UNAUTHORIZED);

    let a = body_json(wrong_password).await;
    let b = body_json(unknown_user).await;
    assert_eq!(a["message"], b["message"]);
}

#[tokio::test]
async fn protected_routes_redirect_to_login() {
    let app = app().await;

    for uri in ["/", "/dashboard", "/inventory", "/sales", "/reports"] {
        let response = app.clone().oneshot(get_request(uri, None)).await.unwrap();
        assert_eq!(response.status(), StatusCode::SEE_OTHER, "{uri}");
        assert_eq!(response.headers()[header::LOCATION], "/login", "{uri}");
    }
}

#[tokio::test]
async fn logout_invalidates_the_session() {
    let app = app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/logout", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/login");

    let response = app
        .clone()
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
}

#[tokio::test]
async fn api_add_then_search_round_trip() {
    let app = app().await;
    let cookie = login(&app).await;

    let id = add_item(&app, &cookie, "Pepsi Cola 500ml", "1.5", "10").await;
    assert!(id > 0);

    let response = app
        .clone()
        .oneshot(get_request("/api/inventory/search?q=pepsi", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let hits = body_json(response).await;
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["item_name"], "Pepsi Cola 500ml");
    // Coerced from the string form values.
    assert_eq!(hits[0]["purchase_price"], 1.5);
    assert_eq!(hits[0]["quantity"], 10);
}

#[tokio::test]
async fn api_add_accepts_numeric_json_values() {
    let app = app().await;
    let cookie = login(&app).await;

    // JSON clients send real numbers, not the strings a form would.
    let body = json!({
        "item_name": "Lux Soap",
        "category": "Household",
        "purchase_price": 12.5,
        "quantity": 4,
    });
    let request = Request::builder()
        .method("POST")
        .uri("/api/inventory/add")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["success"], true);
    assert_eq!(json["item"]["purchase_price"], 12.5);
    assert_eq!(json["item"]["quantity"], 4);
}

#[tokio::test]
async fn api_search_empty_query_lists_all_in_stock() {
    let app = app().await;
    let cookie = login(&app).await;

    add_item(&app, &cookie, "Pepsi Cola 500ml", "1.5", "10").await;
    add_item(&app, &cookie, "Sold Out Biscuits", "2.0", "0").await;

    let response = app
        .clone()
        .oneshot(get_request("/api/inventory/search?q=", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let hits = body_json(response).await;
    let hits = hits.as_array().unwrap();
    assert_eq!(hits.len(), 1);
    assert_eq!(hits[0]["item_name"], "Pepsi Cola 500ml");
}

#[tokio::test]
async fn api_add_rejects_bad_input() {
    let app = app().await;
    let cookie = login(&app).await;

    let body = json!({
        "item_name": "Widget",
        "category": "General",
        "purchase_price": "abc",
        "quantity": "1",
    });
    let request = Request::builder()
        .method("POST")
        .uri("/api/inventory/add")
        .header(header::CONTENT_TYPE, "application/json")
        .header(header::COOKIE, &cookie)
        .body(Body::from(body.to_string()))
        .unwrap();

    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    let json = body_json(response).await;
    assert_eq!(json["success"], false);
}

#[tokio::test]
async fn sale_decrements_stock_and_insufficient_stock_is_rejected() {
    let app = app().await;
    let cookie = login(&app).await;
    let id = add_item(&app, &cookie, "Widget", "10", "5").await;

    // Asking for more than on hand changes nothing.
    let response = app
        .clone()
        .oneshot(form_request(
            "/sales/add",
            &format!("inventory_id={id}&quantity_sold=6&selling_price=15"),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Insufficient stock! Available quantity: 5");

    // A valid sale goes through and decrements.
    let response = app
        .clone()
        .oneshot(form_request(
            "/sales/add",
            &format!("inventory_id={id}&quantity_sold=3&selling_price=15"),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["sale"]["quantity_sold"], 3);
    assert_eq!(json["sale"]["payment_method"], "Cash");

    let response = app
        .clone()
        .oneshot(get_request("/inventory", Some(&cookie)))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert_eq!(json["items"][0]["quantity"], 2);
}

#[tokio::test]
async fn sale_against_unknown_item_is_404() {
    let app = app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/sales/add",
            "inventory_id=42&quantity_sold=1&selling_price=1",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn dashboard_reflects_the_widget_scenario() {
    let app = app().await;
    let cookie = login(&app).await;
    let id = add_item(&app, &cookie, "Widget", "10", "5").await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/sales/add",
            &format!("inventory_id={id}&quantity_sold=3&selling_price=15"),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/dashboard", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["total_sales"], 45.0);
    assert_eq!(json["total_profit"], 15.0);
    // 2 widgets left at cost 10.
    assert_eq!(json["total_inventory_value"], 20.0);
    assert_eq!(json["monthly"].as_array().unwrap().len(), 12);
    assert_eq!(json["recent_sales"].as_array().unwrap().len(), 1);
}

#[tokio::test]
async fn malformed_dashboard_dates_warn_and_fall_back() {
    let app = app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request(
            "/dashboard?start_date=08/01/2026&end_date=08/30/2026",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let json = body_json(response).await;
    assert_eq!(json["warning"], "Invalid date format. Please use YYYY-MM-DD.");
}

#[tokio::test]
async fn easypaisa_flow_and_daily_breakdown() {
    let app = app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/easypaisa/add",
            "transaction_type=Withdraw&client_name=Ali&phone_number=03001234567\
             &total_amount=1000&profit_amount=50",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/easypaisa", Some(&cookie)))
        .await
        .unwrap();
    let json = body_json(response).await;

    assert_eq!(json["report_type"], "daily");
    assert_eq!(json["summary"]["total_amount"], 1000.0);
    assert_eq!(json["summary"]["total_profit"], 50.0);
    assert_eq!(json["summary"]["withdraw_count"], 1);
    assert_eq!(json["daily"][0]["count"], 1);
    assert_eq!(json["daily"][0]["total_amount"], 1000.0);
    assert_eq!(json["daily"][0]["total_profit"], 50.0);
}

#[tokio::test]
async fn easypaisa_rejects_unknown_transaction_type() {
    let app = app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/easypaisa/add",
            "transaction_type=Deposit&client_name=Ali&phone_number=0300\
             &total_amount=1000&profit_amount=50",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn expense_requires_a_well_formed_date() {
    let app = app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/expenses/add",
            "title=Rent&category=Rent&amount=500&expense_date=01-08-2026",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let json = body_json(response).await;
    assert_eq!(json["message"], "Invalid date format. Please use YYYY-MM-DD.");

    let response = app
        .clone()
        .oneshot(form_request(
            "/expenses/add",
            "title=Rent&category=Rent&amount=500&expense_date=2026-08-01",
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let json = body_json(response).await;
    assert_eq!(json["expense"]["amount"], 500.0);
}

#[tokio::test]
async fn inventory_delete_cascades_into_sales() {
    let app = app().await;
    let cookie = login(&app).await;
    let id = add_item(&app, &cookie, "Widget", "10", "5").await;

    let response = app
        .clone()
        .oneshot(form_request(
            "/sales/add",
            &format!("inventory_id={id}&quantity_sold=1&selling_price=15"),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request(
            &format!("/inventory/delete/{id}"),
            Some(&cookie),
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let response = app
        .clone()
        .oneshot(get_request("/sales", Some(&cookie)))
        .await
        .unwrap();
    let json = body_json(response).await;
    assert!(json["sales"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn root_redirects_to_dashboard_once_logged_in() {
    let app = app().await;
    let cookie = login(&app).await;

    let response = app
        .clone()
        .oneshot(get_request("/", Some(&cookie)))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::SEE_OTHER);
    assert_eq!(response.headers()[header::LOCATION], "/dashboard");
}
