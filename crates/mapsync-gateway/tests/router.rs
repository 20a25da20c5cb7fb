use std::sync::Arc;

use axum::body::Body;
use axum::http::{header, Request, StatusCode};
use axum::Router;
use mapsync_core::{
    DisabledIdentityVerifier, IdentityVerifier, Repository, StaticIdentityVerifier, TripPlanner,
    WritePolicy,
};
use mapsync_gateway::cors::cors_layer;
use mapsync_gateway::{App, AppState, Deployment};
use mapsync_generator::SeqGenerator;
use mapsync_planner::{TripService, TripServiceSettings};
use mapsync_storage::{DisconnectedRepository, InMemoryRepository};
use serde_json::{json, Value};
use tower::ServiceExt;

fn identity() -> Arc<dyn IdentityVerifier> {
    Arc::new(
        StaticIdentityVerifier::new()
            .with_token("tok-alice", "alice")
            .with_token("tok-bob", "bob"),
    )
}

fn service<R: Repository>(
    repo: R,
    settings: TripServiceSettings,
) -> Arc<TripService<R, SeqGenerator>> {
    Arc::new(TripService::with_settings(repo, SeqGenerator::new(), settings))
}

fn app_with<R: Repository>(planner: Arc<TripService<R, SeqGenerator>>) -> Router {
    let planner: Arc<dyn TripPlanner> = planner;
    App::router(AppState::new(planner, identity()))
}

fn in_memory() -> (Arc<TripService<InMemoryRepository, SeqGenerator>>, Router) {
    let planner = service(InMemoryRepository::new(), TripServiceSettings::default());
    let app = app_with(Arc::clone(&planner));
    (planner, app)
}

fn disconnected() -> Router {
    app_with(service(DisconnectedRepository::new(), TripServiceSettings::default()))
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

fn with_bearer(mut request: Request<Body>, token: &str) -> Request<Body> {
    request.headers_mut().insert(
        header::AUTHORIZATION,
        format!("Bearer {token}").parse().unwrap(),
    );
    request
}

fn get(uri: &str) -> Request<Body> {
    Request::get(uri).body(Body::empty()).unwrap()
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    let value = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
    (status, value)
}

fn is_trip_code(code: &str) -> bool {
    code.len() == 6
        && code
            .chars()
            .all(|c| c.is_ascii_uppercase() || c.is_ascii_digit())
}

#[tokio::test]
async fn health_and_home() {
    let (_, app) = in_memory();

    let (status, body) = send(&app, get("/health")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "ok" }));

    let response = app.clone().oneshot(get("/")).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);
}

#[tokio::test]
async fn create_then_fetch_trip() {
    let (_, app) = in_memory();

    let (status, body) = send(
        &app,
        post_json(
            "/trips",
            json!({ "origin": "A", "destination": "B", "stops": ["C", "D"] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    assert_eq!(body["tripId"], "AAAAAA");
    assert_eq!(body["shareLink"], "/trips/AAAAAA");

    let (status, body) = send(&app, get("/trips/AAAAAA")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");
    let trip = &body["trip"];
    assert_eq!(trip["id"], "AAAAAA");
    assert_eq!(trip["origin"], "A");
    assert_eq!(trip["destination"], "B");
    assert_eq!(
        trip["stops"],
        json!([
            { "id": "stop-0", "name": "C", "address": "C" },
            { "id": "stop-1", "name": "D", "address": "D" },
        ])
    );
    assert_eq!(trip["createdBy"], "anonymous");
    assert_eq!(trip["participants"], json!([]));
    assert!(trip["createdAt"].is_string());
}

#[tokio::test]
async fn newtrip_path_creates_trips_too() {
    let (planner, app) = in_memory();

    let (status, body) = send(
        &app,
        post_json(
            "/newtrip",
            json!({ "origin": "A", "destination": "B", "stops": [] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    assert!(is_trip_code(body["tripId"].as_str().unwrap()));
    assert_eq!(planner.repository().len(), 1);
}

#[tokio::test]
async fn missing_fields_are_rejected_without_write() {
    let (planner, app) = in_memory();

    let (status, body) = send(
        &app,
        post_json("/trips", json!({ "origin": "A", "stops": ["C"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
    assert_eq!(body["message"], "missing required fields: destination");

    let (status, _) = send(
        &app,
        post_json("/trips", json!({ "destination": "B", "stops": ["C"] })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, _) = send(
        &app,
        post_json(
            "/trips",
            json!({ "origin": " ", "destination": "B", "stops": [] }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    assert!(planner.repository().is_empty());
}

#[tokio::test]
async fn malformed_body_is_a_bad_request() {
    let (_, app) = in_memory();

    let request = Request::post("/trips")
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn unknown_trip_is_not_found() {
    let (_, app) = in_memory();

    let (status, body) = send(&app, get("/trips/ZZZZZZ")).await;

    assert_eq!(status, StatusCode::NOT_FOUND);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn malformed_code_is_a_bad_request() {
    let (_, app) = in_memory();

    let (status, _) = send(&app, get("/trips/abc")).await;

    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn lookup_without_store_is_unavailable() {
    let app = disconnected();

    let (status, body) = send(&app, get("/trips/ZZZZZZ")).await;

    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
    assert_eq!(body["status"], "error");
}

#[tokio::test]
async fn create_without_store_still_succeeds() {
    let app = disconnected();

    let (status, body) = send(
        &app,
        post_json(
            "/trips",
            json!({ "origin": "A", "destination": "B", "stops": ["C"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::OK);
    let code = body["tripId"].as_str().unwrap();
    assert!(is_trip_code(code));
    assert_eq!(body["shareLink"], format!("/trips/{code}"));
}

#[tokio::test]
async fn strict_policy_surfaces_write_failure() {
    let settings = TripServiceSettings::builder()
        .write_policy(WritePolicy::Strict)
        .build();
    let app = app_with(service(DisconnectedRepository::new(), settings));

    let (status, body) = send(
        &app,
        post_json(
            "/trips",
            json!({ "origin": "A", "destination": "B", "stops": ["C"] }),
        ),
    )
    .await;

    assert_eq!(status, StatusCode::INTERNAL_SERVER_ERROR);
    assert_eq!(body["message"], "internal server error");
}

#[tokio::test]
async fn bearer_token_sets_creator() {
    let (_, app) = in_memory();

    let request = with_bearer(
        post_json(
            "/trips",
            json!({ "origin": "A", "destination": "B", "stops": [] }),
        ),
        "tok-alice",
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);

    let code = body["tripId"].as_str().unwrap();
    let (_, body) = send(&app, get(&format!("/trips/{code}"))).await;
    assert_eq!(body["trip"]["createdBy"], "alice");

    let request = with_bearer(
        post_json(
            "/trips",
            json!({ "origin": "A", "destination": "B", "stops": [] }),
        ),
        "tok-mallory",
    );
    let (status, _) = send(&app, request).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
}

#[tokio::test]
async fn bearer_without_identity_provider_creates_anonymous_trip() {
    let planner = service(InMemoryRepository::new(), TripServiceSettings::default());
    let dyn_planner: Arc<dyn TripPlanner> = planner.clone();
    let app = App::router(AppState::new(dyn_planner, Arc::new(DisabledIdentityVerifier)));

    let request = with_bearer(
        post_json(
            "/trips",
            json!({ "origin": "A", "destination": "B", "stops": ["C"] }),
        ),
        "anything",
    );
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["status"], "success");

    let code = body["tripId"].as_str().unwrap();
    let (_, body) = send(&app, get(&format!("/trips/{code}"))).await;
    assert_eq!(body["trip"]["createdBy"], "anonymous");
    assert_eq!(planner.repository().len(), 1);

    let join = with_bearer(post_json(&format!("/trips/join/{code}"), json!({})), "anything");
    let (status, _) = send(&app, join).await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn join_trip_and_list_user_trips() {
    let (_, app) = in_memory();
    let create = with_bearer(
        post_json(
            "/trips",
            json!({ "origin": "A", "destination": "B", "stops": ["C"] }),
        ),
        "tok-alice",
    );
    let (_, body) = send(&app, create).await;
    let code = body["tripId"].as_str().unwrap().to_string();

    let anonymous_join = Request::post(format!("/trips/join/{code}"))
        .body(Body::empty())
        .unwrap();
    let (status, _) = send(&app, anonymous_join).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let join = with_bearer(
        Request::post(format!("/trips/join/{code}"))
            .body(Body::empty())
            .unwrap(),
        "tok-bob",
    );
    let (status, body) = send(&app, join).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["trip"]["participants"], json!(["bob"]));

    let join_missing = with_bearer(
        Request::post("/trips/join/ZZZZZZ")
            .body(Body::empty())
            .unwrap(),
        "tok-bob",
    );
    let (status, _) = send(&app, join_missing).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    for user in ["alice", "bob"] {
        let (status, body) = send(&app, get(&format!("/trips/user/{user}"))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["trips"].as_array().unwrap().len(), 1);
        assert_eq!(body["trips"][0]["id"], code.as_str());
    }

    let (_, body) = send(&app, get("/trips/user/carol")).await;
    assert_eq!(body["trips"], json!([]));
}

#[tokio::test]
async fn demo_login_is_opt_in() {
    let (planner, app) = in_memory();
    let credentials = json!({ "email": "test@example.com", "password": "1234" });

    let (status, _) = send(&app, post_json("/login", credentials.clone())).await;
    assert_eq!(status, StatusCode::NOT_FOUND);

    let planner: Arc<dyn TripPlanner> = planner;
    let app = App::router(AppState::new(planner, identity()).with_demo_login(true));

    let (status, body) = send(&app, post_json("/login", credentials)).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "status": "success", "user_id": "demo-user" }));

    let (status, body) = send(
        &app,
        post_json(
            "/login",
            json!({ "email": "test@example.com", "password": "wrong" }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        body,
        json!({ "status": "error", "message": "Invalid credentials" })
    );
}

#[tokio::test]
async fn verify_token_uses_identity_provider() {
    let (planner, app) = in_memory();

    let (status, body) = send(
        &app,
        post_json("/auth/verify-token", json!({ "token": "tok-bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "bob");

    let (status, _) = send(
        &app,
        post_json("/auth/verify-token", json!({ "token": "nope" })),
    )
    .await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);

    let (status, _) = send(&app, post_json("/auth/verify-token", json!({}))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let planner: Arc<dyn TripPlanner> = planner;
    let app = App::router(AppState::new(planner, Arc::new(DisabledIdentityVerifier)));
    let (status, _) = send(
        &app,
        post_json("/auth/verify-token", json!({ "token": "tok-bob" })),
    )
    .await;
    assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
}

#[tokio::test]
async fn sync_echoes_payload() {
    let (_, app) = in_memory();

    let (status, body) = send(
        &app,
        post_json(
            "/sync",
            json!({ "user_id": "u1", "google_maps_data": { "routes": [1, 2] } }),
        ),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["user_id"], "u1");
    assert_eq!(body["maps_data"], json!({ "routes": [1, 2] }));

    let (status, _) = send(&app, post_json("/sync", json!({ "user_id": "u1" }))).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn routes_are_derived_from_user_trips() {
    let (_, app) = in_memory();
    let create = with_bearer(
        post_json(
            "/trips",
            json!({ "origin": "Boston", "destination": "New York", "stops": ["Providence"] }),
        ),
        "tok-alice",
    );
    send(&app, create).await;

    let (status, _) = send(&app, get("/routes")).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);

    let (status, body) = send(&app, get("/routes?user_id=alice")).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(
        body,
        json!({
            "user_id": "alice",
            "routes": [{
                "route_id": "AAAAAA",
                "name": "Boston to New York",
                "stops": ["Providence"],
            }],
        })
    );
}

async fn preflight(app: &Router, origin: &str) -> (StatusCode, Option<String>) {
    let request = Request::options("/trips")
        .header(header::ORIGIN, origin)
        .header(header::ACCESS_CONTROL_REQUEST_METHOD, "POST")
        .header(header::ACCESS_CONTROL_REQUEST_HEADERS, "content-type,authorization")
        .body(Body::empty())
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    let allowed = response
        .headers()
        .get(header::ACCESS_CONTROL_ALLOW_ORIGIN)
        .map(|value| value.to_str().unwrap().to_string());
    (response.status(), allowed)
}

fn cors_app(deployment: Deployment, production_origins: &[String]) -> Router {
    let planner: Arc<dyn TripPlanner> =
        service(InMemoryRepository::new(), TripServiceSettings::default());
    let cors = cors_layer(deployment, production_origins).unwrap();
    App::service(AppState::new(planner, identity()), cors)
}

#[tokio::test]
async fn local_cors_allows_dev_servers_only() {
    let app = cors_app(Deployment::Local, &["https://mapsync.app".to_string()]);

    for origin in ["http://localhost:5173", "http://localhost:3000"] {
        let (status, allowed) = preflight(&app, origin).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(allowed.as_deref(), Some(origin));
    }

    let (_, allowed) = preflight(&app, "https://mapsync.app").await;
    assert_eq!(allowed, None);
}

#[tokio::test]
async fn production_cors_allows_configured_origin_only() {
    let app = cors_app(Deployment::Production, &["https://mapsync.app".to_string()]);

    let (status, allowed) = preflight(&app, "https://mapsync.app").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(allowed.as_deref(), Some("https://mapsync.app"));

    let (_, allowed) = preflight(&app, "http://localhost:5173").await;
    assert_eq!(allowed, None);
    let (_, allowed) = preflight(&app, "https://evil.example").await;
    assert_eq!(allowed, None);
}
