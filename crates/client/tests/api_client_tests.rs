//! Integration tests for `ApiClient` against an in-process mock backend.

use std::collections::HashMap;

use axum::{
    extract::{Path, Query},
    http::{HeaderMap, StatusCode},
    response::IntoResponse,
    routing::{get, post},
    Json, Router,
};
use serde_json::{json, Value};

use wealthtrack_client::ApiClient;
use wealthtrack_core::market_data::PriceProviderTrait;
use wealthtrack_core::users::{AuthProviderTrait, Credentials, Registration};
use wealthtrack_core::{
    AssetProviderTrait, AssetType, Error, NewAsset, PortfolioProviderTrait,
};

const GOOD_TOKEN: &str = "good-token";

type HandlerResult<T> = Result<T, (StatusCode, Json<Value>)>;

// =============================================================================
// Mock backend
// =============================================================================

fn user_json() -> Value {
    json!({ "id": "u1", "name": "Jane Doe", "email": "jane@example.com" })
}

fn asset_json(id: &str) -> Value {
    json!({
        "id": id,
        "userId": "u1",
        "symbol": "AAPL",
        "name": "Apple Inc.",
        "type": "STOCK",
        "quantity": 10,
        "purchasePrice": 150.0,
        "createdAt": "2024-01-02T03:04:05Z"
    })
}

fn authorized(headers: &HeaderMap) -> HandlerResult<()> {
    let expected = format!("Bearer {}", GOOD_TOKEN);
    match headers.get("authorization").and_then(|v| v.to_str().ok()) {
        Some(value) if value == expected => Ok(()),
        _ => Err((
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid token" })),
        )),
    }
}

async fn login(Json(body): Json<Value>) -> impl IntoResponse {
    if body["password"] == "correct-horse" {
        (
            StatusCode::OK,
            Json(json!({ "token": GOOD_TOKEN, "user": user_json() })),
        )
    } else {
        (
            StatusCode::UNAUTHORIZED,
            Json(json!({ "message": "Invalid credentials" })),
        )
    }
}

async fn register(Json(body): Json<Value>) -> impl IntoResponse {
    if body["email"] == "taken@example.com" {
        return (
            StatusCode::CONFLICT,
            Json(json!({ "error": "Email already registered" })),
        );
    }
    (
        StatusCode::CREATED,
        Json(json!({
            "token": GOOD_TOKEN,
            "user": { "id": "u2", "name": body["name"], "email": body["email"] }
        })),
    )
}

async fn me(headers: HeaderMap) -> HandlerResult<Json<Value>> {
    authorized(&headers).map(|_| Json(user_json()))
}

async fn list_assets(headers: HeaderMap) -> HandlerResult<Json<Value>> {
    authorized(&headers).map(|_| Json(json!([asset_json("a1"), asset_json("a2")])))
}

async fn get_asset(headers: HeaderMap, Path(id): Path<String>) -> HandlerResult<Json<Value>> {
    authorized(&headers)?;
    if id == "a1" {
        Ok(Json(asset_json("a1")))
    } else {
        Err((
            StatusCode::NOT_FOUND,
            Json(json!({ "message": format!("Asset {} not found", id) })),
        ))
    }
}

async fn create_asset(
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> HandlerResult<(StatusCode, Json<Value>)> {
    authorized(&headers)?;
    let mut created = body;
    created["id"] = json!("new-id");
    created["userId"] = json!("u1");
    Ok((StatusCode::CREATED, Json(created)))
}

async fn delete_asset(headers: HeaderMap, Path(_id): Path<String>) -> HandlerResult<StatusCode> {
    authorized(&headers).map(|_| StatusCode::NO_CONTENT)
}

async fn price(
    headers: HeaderMap,
    Path(symbol): Path<String>,
    Query(params): Query<HashMap<String, String>>,
) -> HandlerResult<Json<Value>> {
    authorized(&headers)?;
    let source = match params.get("type").map(String::as_str) {
        Some("CRYPTO") => "coingecko",
        _ => "yahoo",
    };
    Ok(Json(json!({
        "data": {
            "symbol": symbol,
            "price": 42.5,
            "currency": "USD",
            "source": source,
            "timestamp": "2024-06-01T12:00:00Z"
        }
    })))
}

async fn portfolio(headers: HeaderMap) -> HandlerResult<Json<Value>> {
    authorized(&headers)?;
    Ok(Json(json!({
        "totalValue": 2000.0,
        "totalCost": 1600.0,
        "totalGainLoss": 400.0,
        "totalGainLossPercent": 25.0,
        "assets": [
            {
                "id": "a1", "symbol": "AAPL", "name": "Apple", "type": "STOCK",
                "quantity": 10, "purchasePrice": 100, "currentPrice": 150,
                "cost": 1000, "currentValue": 1500, "gainLoss": 500,
                "gainLossPercent": 50, "lastPriceUpdate": "2024-06-01T12:00:00Z",
                "priceSource": "yahoo"
            },
            {
                "id": "a2", "symbol": "GIFT", "name": "Gifted", "type": "OTHER",
                "quantity": 1, "purchasePrice": 0, "currentPrice": 0,
                "cost": 0, "currentValue": 0, "gainLoss": 0,
                "gainLossPercent": null, "lastPriceUpdate": null,
                "priceSource": "unavailable"
            },
            {
                "id": "a3", "symbol": "BTC", "name": "Bitcoin", "type": "CRYPTO",
                "quantity": 0.01, "purchasePrice": 60000, "currentPrice": 50000,
                "cost": 600, "currentValue": 500, "gainLoss": -100,
                "gainLossPercent": -16.666, "lastPriceUpdate": "2024-06-01T12:00:00Z",
                "priceSource": "coingecko"
            }
        ]
    })))
}

async fn broken() -> impl IntoResponse {
    (StatusCode::INTERNAL_SERVER_ERROR, "kaboom")
}

fn router() -> Router {
    Router::new()
        .route("/api/auth/login", post(login))
        .route("/api/auth/register", post(register))
        .route("/api/users/me", get(me))
        .route("/api/assets", get(list_assets).post(create_asset))
        .route("/api/assets/{id}", get(get_asset).delete(delete_asset))
        .route("/api/prices/{symbol}", get(price))
        .route("/api/portfolio/value", get(portfolio))
}

async fn spawn_backend(router: Router) -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, router).await.unwrap();
    });
    format!("http://{}", addr)
}

async fn client() -> ApiClient {
    ApiClient::new(&spawn_backend(router()).await).unwrap()
}

// =============================================================================
// Tests
// =============================================================================

#[tokio::test]
async fn login_returns_session() {
    let client = client().await;

    let session = client
        .login(&Credentials::new("jane@example.com", "correct-horse"))
        .await
        .unwrap();

    assert_eq!(session.token, GOOD_TOKEN);
    assert_eq!(session.user.name, "Jane Doe");
}

#[tokio::test]
async fn login_with_bad_password_is_unauthorized() {
    let client = client().await;

    let result = client
        .login(&Credentials::new("jane@example.com", "wrong"))
        .await;

    assert!(matches!(result, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn register_conflict_surfaces_error_message() {
    let client = client().await;

    let ok = client
        .register(&Registration::new("Sam", "sam@example.com", "hunter22"))
        .await
        .unwrap();
    assert_eq!(ok.user.name, "Sam");

    let conflict = client
        .register(&Registration::new("Sam", "taken@example.com", "hunter22"))
        .await;
    match conflict {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 409);
            assert_eq!(message, "Email already registered");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn current_user_requires_valid_token() {
    let client = client().await;

    let user = client.current_user(GOOD_TOKEN).await.unwrap();
    assert_eq!(user.email, "jane@example.com");

    let rejected = client.current_user("stale-token").await;
    assert!(matches!(rejected, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn asset_crud_round_trip() {
    let client = client().await;

    let assets = client.list_assets(GOOD_TOKEN).await.unwrap();
    assert_eq!(assets.len(), 2);
    assert_eq!(assets[0].asset_type, AssetType::Stock);

    let asset = client.get_asset(GOOD_TOKEN, "a1").await.unwrap();
    assert_eq!(asset.symbol, "AAPL");

    let new_asset = NewAsset {
        symbol: "ETH".to_string(),
        name: "Ethereum".to_string(),
        asset_type: AssetType::Crypto,
        quantity: 2.0,
        purchase_price: 3000.0,
        purchase_date: None,
    };
    let created = client.create_asset(GOOD_TOKEN, &new_asset).await.unwrap();
    assert_eq!(created.id, "new-id");
    assert_eq!(created.asset_type, AssetType::Crypto);
    assert_eq!(created.quantity, 2.0);

    client.delete_asset(GOOD_TOKEN, "a1").await.unwrap();
}

#[tokio::test]
async fn missing_asset_is_not_found_with_server_message() {
    let client = client().await;

    let result = client.get_asset(GOOD_TOKEN, "nope").await;

    assert!(matches!(result, Err(Error::NotFound(ref m)) if m == "Asset nope not found"));
}

#[tokio::test]
async fn price_unwraps_data_envelope_and_sends_type() {
    let client = client().await;

    let quote = client
        .get_price(GOOD_TOKEN, "btc", AssetType::Crypto)
        .await
        .unwrap();

    assert_eq!(quote.symbol, "BTC");
    assert_eq!(quote.price, 42.5);
    assert_eq!(quote.source.as_deref(), Some("coingecko"));
}

#[tokio::test]
async fn portfolio_snapshot_tolerates_null_percent() {
    let client = client().await;

    let snapshot = client.fetch_portfolio(GOOD_TOKEN).await.unwrap();

    assert_eq!(snapshot.assets.len(), 3);
    assert_eq!(snapshot.total_value, 2000.0);
    assert_eq!(snapshot.assets[1].gain_loss_percent, 0.0);
    assert!(!snapshot.assets[1].is_priced());
}

#[tokio::test]
async fn portfolio_with_expired_token_is_unauthorized() {
    let client = client().await;

    let result = client.fetch_portfolio("expired").await;

    assert!(matches!(result, Err(Error::Unauthorized)));
}

#[tokio::test]
async fn plain_text_server_error_becomes_api_error() {
    let base = spawn_backend(Router::new().route("/api/portfolio/value", get(broken))).await;
    let client = ApiClient::new(&base).unwrap();

    let result = client.fetch_portfolio(GOOD_TOKEN).await;

    match result {
        Err(Error::Api { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "kaboom");
        }
        other => panic!("unexpected result: {:?}", other),
    }
}

#[tokio::test]
async fn unparsable_body_is_unexpected() {
    async fn garbage() -> impl IntoResponse {
        (StatusCode::OK, "this is not json")
    }
    let base = spawn_backend(Router::new().route("/api/assets", get(garbage))).await;
    let client = ApiClient::new(&base).unwrap();

    let result = client.list_assets(GOOD_TOKEN).await;

    assert!(matches!(result, Err(Error::Unexpected(_))));
}

#[tokio::test]
async fn wrapped_snapshot_with_malformed_holding_is_unexpected() {
    async fn malformed() -> Json<Value> {
        Json(json!({
            "data": {
                "totalValue": 1500.0,
                "totalCost": 1000.0,
                "totalGainLoss": 500.0,
                "totalGainLossPercent": 50.0,
                "assets": [
                    {
                        "id": "a1", "symbol": "AAPL", "name": null, "type": "STOCK",
                        "quantity": 10, "purchasePrice": 100, "currentPrice": 150,
                        "cost": 1000, "currentValue": 1500, "gainLoss": 500,
                        "gainLossPercent": 50, "lastPriceUpdate": null,
                        "priceSource": "yahoo"
                    }
                ]
            }
        }))
    }
    let base = spawn_backend(Router::new().route("/api/portfolio/value", get(malformed))).await;
    let client = ApiClient::new(&base).unwrap();

    let result = client.fetch_portfolio(GOOD_TOKEN).await;

    assert!(matches!(result, Err(Error::Unexpected(_))), "got {:?}", result);
}

#[tokio::test]
async fn wrapped_snapshot_decodes_payload() {
    async fn wrapped() -> Json<Value> {
        Json(json!({ "data": { "totalValue": 42.0, "assets": [] } }))
    }
    let base = spawn_backend(Router::new().route("/api/portfolio/value", get(wrapped))).await;
    let client = ApiClient::new(&base).unwrap();

    let snapshot = client.fetch_portfolio(GOOD_TOKEN).await.unwrap();

    assert_eq!(snapshot.total_value, 42.0);
    assert!(snapshot.is_empty());
}

#[tokio::test]
async fn unreachable_backend_is_network_error() {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    drop(listener);
    let client = ApiClient::new(&format!("http://{}", addr)).unwrap();

    let result = client.list_assets(GOOD_TOKEN).await;

    assert!(matches!(result, Err(Error::Network(_))));
}
