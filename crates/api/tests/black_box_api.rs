use chrono::{Duration as ChronoDuration, Utc};
use jsonwebtoken::{Algorithm, EncodingKey, Header};
use reqwest::StatusCode;
use serde_json::{Value, json};

use travelhub_api::config::AppConfig;
use travelhub_auth::{JwtClaims, UserRole};

const JWT_SECRET: &str = "test-secret";

struct TestServer {
    base_url: String,
    client: reqwest::Client,
    handle: tokio::task::JoinHandle<()>,
}

impl TestServer {
    async fn spawn() -> Self {
        // Same router as prod over the in-memory store, on an ephemeral port.
        let config = AppConfig::from_lookup(|var| match var {
            "JWT_SECRET" => Some(JWT_SECRET.to_string()),
            _ => None,
        })
        .expect("test config");
        let app = travelhub_api::app::build_app(&config);

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("failed to bind ephemeral port");
        let addr = listener.local_addr().unwrap();
        let base_url = format!("http://{}", addr);

        let handle = tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        Self {
            base_url,
            client: reqwest::Client::new(),
            handle,
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{}", self.base_url, path)
    }

    async fn get(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.get(self.url(path)).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }

    async fn post(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.post(self.url(path)).json(&body).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }

    async fn put(&self, path: &str, body: Value) -> (StatusCode, Value) {
        let res = self.client.put(self.url(path)).json(&body).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }

    async fn delete(&self, path: &str) -> (StatusCode, Value) {
        let res = self.client.delete(self.url(path)).send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }

    async fn protected(&self, token: Option<&str>) -> (StatusCode, Value) {
        let mut req = self.client.get(self.url("/auth/protected"));
        if let Some(token) = token {
            req = req.bearer_auth(token);
        }
        let res = req.send().await.unwrap();
        (res.status(), res.json().await.unwrap())
    }
}

impl Drop for TestServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

fn mint_jwt(secret: &str, claims: &JwtClaims) -> String {
    jsonwebtoken::encode(
        &Header::new(Algorithm::HS256),
        claims,
        &EncodingKey::from_secret(secret.as_bytes()),
    )
    .expect("failed to encode jwt")
}

fn tour(title: &str) -> Value {
    json!({ "title": title, "vehicle": "jeep", "type": "adventure" })
}

fn error_code(body: &Value) -> u64 {
    body["error"]["errorCode"].as_u64().unwrap()
}

#[tokio::test]
async fn health_is_ok() {
    let srv = TestServer::spawn().await;
    let res = srv.client.get(srv.url("/health")).send().await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn duplicate_tour_title_conflicts() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.post("/tours", tour("Safari")).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "SUCCESS");
    assert_eq!(body["data"]["tourId"], 1);
    assert_eq!(body["data"]["title"], "Safari");
    assert!(body.get("error").is_none());

    let (status, body) = srv.post("/tours", tour("Safari")).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "CONFLICT");
    assert_eq!(body["error"]["messages"], "Tour's title must be unique");
    assert_eq!(error_code(&body), 2102);
    assert!(body.get("data").is_none());
}

#[tokio::test]
async fn invalid_bodies_are_rejected() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.post("/tours", json!({ "title": 5, "vehicle": "jeep" })).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["message"], "VALIDATION_FAILED");
    assert_eq!(error_code(&body), 1001);
    assert_eq!(
        body["error"]["messages"],
        "title must be a string. type should not be empty"
    );

    let res = srv
        .client
        .post(srv.url("/tours"))
        .header("content-type", "application/json")
        .body("{not json")
        .send()
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let body: Value = res.json().await.unwrap();
    assert_eq!(body["message"], "BAD_REQUEST");
    assert_eq!(error_code(&body), 400);

    let (status, body) = srv.get("/tours/abc").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["error"]["messages"], "id must be a number string");
}

#[tokio::test]
async fn partial_update_then_delete() {
    let srv = TestServer::spawn().await;
    srv.post("/tours", tour("Safari")).await;

    let (status, body) = srv.put("/tours/1", json!({ "hotel": "Ritz", "price": "450" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({}));

    let (_, body) = srv.post("/tours/1", json!({ "isTrending": true })).await;
    assert_eq!(body["success"], true);

    let (status, body) = srv.get("/tours/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "Safari");
    assert_eq!(body["data"]["hotel"], "Ritz");
    assert_eq!(body["data"]["price"], 450.0);
    assert_eq!(body["data"]["isTrending"], true);
    assert_eq!(body["data"]["duration"], Value::Null);

    let (status, _) = srv.delete("/tours/1").await;
    assert_eq!(status, StatusCode::OK);

    let (status, body) = srv.get("/tours/1").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], Value::Null);

    let (status, body) = srv.delete("/tours/1").await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["messages"], "Tour does not exist");
    assert_eq!(error_code(&body), 2104);

    let (status, body) = srv.put("/tours/1", json!({ "hotel": "Hilton" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 2104);
}

#[tokio::test]
async fn list_pages_report_page_size() {
    let srv = TestServer::spawn().await;
    for title in ["a", "b", "c"] {
        srv.post("/tours", tour(title)).await;
    }

    let (status, body) = srv.get("/tours?limit=2&offset=0").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["edges"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["pageInfo"], json!({ "limit": 2, "offset": 0, "total": 2 }));

    let (_, body) = srv.get("/tours?limit=2&offset=2").await;
    assert_eq!(body["data"]["edges"][0]["title"], "c");

    let (_, body) = srv.get("/tours?limit=-1&offset=0").await;
    assert_eq!(body["data"]["pageInfo"]["total"], 3);

    let (_, body) = srv.get("/tours").await;
    assert_eq!(body["data"]["pageInfo"], json!({ "limit": 0, "offset": 0, "total": 3 }));

    let (status, body) = srv.get("/tours?limit=1&limit=2").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "BAD_REQUEST");
    assert_eq!(error_code(&body), 400);
}

#[tokio::test]
async fn order_requires_existing_product() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.post("/orders", json!({ "productId": 1, "quantity": 2 })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["error"]["messages"], "Product does not exist");
    assert_eq!(error_code(&body), 2604);

    let (status, _) = srv
        .post("/products", json!({ "name": "Hat", "price": 9.5, "quantity": 3 }))
        .await;
    assert_eq!(status, StatusCode::CREATED);

    let (status, body) = srv.post("/orders", json!({ "productId": 1, "quantity": 2 })).await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"], json!({ "orderId": 1, "productId": 1, "quantity": 2 }));
}

#[tokio::test]
async fn user_login_and_protected_route() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv
        .post("/users", json!({ "username": "a", "password": "p", "role": "admin" }))
        .await;
    assert_eq!(status, StatusCode::CREATED);
    assert_eq!(body["data"]["userId"], 1);
    assert!(body["data"].get("password").is_none());
    assert!(body["data"].get("salt").is_none());

    let (status, body) = srv.post("/users", json!({ "username": "a", "password": "q" })).await;
    assert_eq!(status, StatusCode::CONFLICT);
    assert_eq!(error_code(&body), 2012);

    let (status, body) = srv.post("/auth/login", json!({ "username": "a", "password": "p" })).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["user"]["username"], "a");
    assert!(body["data"]["user"].get("password").is_none());
    let token = body["data"]["token"].as_str().unwrap().to_string();

    let (status, body) = srv.protected(Some(&token)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "id": 1, "username": "a", "role": "admin" }));

    let (status, body) = srv.post("/auth/login", json!({ "username": "a", "password": "wrong" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["message"], "AUTHENTICATION_FAILED");
    assert_eq!(error_code(&body), 1104);

    let (status, body) = srv.post("/auth/login", json!({ "username": "b", "password": "p" })).await;
    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(error_code(&body), 2001);
}

#[tokio::test]
async fn password_update_changes_login() {
    let srv = TestServer::spawn().await;
    srv.post("/users", json!({ "username": "a", "password": "old" })).await;

    let (status, _) = srv.put("/users/1", json!({ "password": "new" })).await;
    assert_eq!(status, StatusCode::OK);

    let (status, _) = srv.post("/auth/login", json!({ "username": "a", "password": "old" })).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    let (status, _) = srv.post("/auth/login", json!({ "username": "a", "password": "new" })).await;
    assert_eq!(status, StatusCode::OK);
}

#[tokio::test]
async fn protected_route_rejects_bad_tokens() {
    let srv = TestServer::spawn().await;

    let (status, body) = srv.protected(None).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["messages"], "Missing JWT token");
    assert_eq!(error_code(&body), 1003);

    let expired = JwtClaims::new(1, "a", None, Utc::now() - ChronoDuration::hours(2), 60);
    let (status, body) = srv.protected(Some(&mint_jwt(JWT_SECRET, &expired))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body["error"]["messages"], "Invalid token");
    assert_eq!(error_code(&body), 1002);

    let valid = JwtClaims::new(7, "z", Some(UserRole::User), Utc::now(), 600);
    let (status, body) = srv.protected(Some(&mint_jwt("other-secret", &valid))).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(error_code(&body), 1002);

    let (status, body) = srv.protected(Some(&mint_jwt(JWT_SECRET, &valid))).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"], json!({ "id": 7, "username": "z", "role": "user" }));
}

#[tokio::test]
async fn charts_aggregate_current_rows() {
    let srv = TestServer::spawn().await;
    for (title, price) in [("a", 150.0), ("b", 250.0), ("c", 399.0)] {
        let mut body = tour(title);
        body["price"] = json!(price);
        srv.post("/tours", body).await;
    }
    for (category, quantity) in [("shoes", 5), ("hats", 2), ("shoes", 3)] {
        srv.post(
            "/products",
            json!({ "name": category, "price": 1, "quantity": quantity, "category": category }),
        )
        .await;
    }

    let (status, body) = srv.get("/charts/tour-bar-chart").await;
    assert_eq!(status, StatusCode::OK);
    let points = body["data"].as_array().unwrap();
    assert_eq!(points.len(), 8);
    assert_eq!(points[0], json!({ "x": "$0-200", "y": 1 }));
    assert_eq!(points[1], json!({ "x": "$200-400", "y": 2 }));

    let (_, body) = srv.get("/charts/product-pie-chart").await;
    assert_eq!(
        body["data"],
        json!([{ "x": "hats", "y": 2 }, { "x": "shoes", "y": 8 }])
    );
}
