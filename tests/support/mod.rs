//! In-process mock of the rental marketplace API
//!
//! Implements the documented contract in memory on an ephemeral port, with
//! switches that make it misbehave in specific ways.

#![allow(dead_code)]

use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

use axum::extract::{Path, Query, Request, State};
use axum::http::{header::AUTHORIZATION, HeaderMap, StatusCode};
use axum::middleware::{self, Next};
use axum::response::Response;
use axum::routing::{delete, get, post};
use axum::{Json, Router};
use serde_json::{json, Value};

use conformance::http::{Executor, ReqwestTransport};

/// Ways the mock deviates from the contract
#[derive(Debug, Clone, Copy, Default)]
pub struct Misbehavior {
    /// Health endpoint answers 503
    pub health_down: bool,
    /// Registration and login succeed but carry no token
    pub omit_tokens: bool,
    /// A customer may review the same listing repeatedly
    pub allow_duplicate_reviews: bool,
    /// Valid listings fail with 500
    pub reject_listings: bool,
    /// Any role string is stored while the user has none
    pub accept_any_role: bool,
    /// Only the first registration is accepted
    pub reject_second_registration: bool,
    /// `GET /listings` never answers within a client timeout
    pub stall_listing_index: bool,
}

struct User {
    id: String,
    name: String,
    email: String,
    password: String,
    token: String,
    role: Option<String>,
}

struct Review {
    id: String,
    listing_id: String,
    user_id: String,
    rating: i64,
    comment: String,
}

impl Review {
    fn to_json(&self) -> Value {
        json!({
            "_id": self.id,
            "listingId": self.listing_id,
            "userId": self.user_id,
            "rating": self.rating,
            "comment": self.comment,
        })
    }
}

#[derive(Default)]
struct Store {
    behavior: Misbehavior,
    next_id: u64,
    users: Vec<User>,
    profiles: HashMap<String, Value>,
    listings: Vec<Value>,
    reviews: Vec<Review>,
    requests: Vec<String>,
}

impl Store {
    fn next_id(&mut self) -> String {
        self.next_id += 1;
        format!("{:024x}", self.next_id)
    }

    fn authenticate(&self, headers: &HeaderMap) -> Result<usize, Reply> {
        headers
            .get(AUTHORIZATION)
            .and_then(|value| value.to_str().ok())
            .and_then(|value| value.strip_prefix("Bearer "))
            .and_then(|token| self.users.iter().position(|u| u.token == token))
            .ok_or_else(|| reply(StatusCode::UNAUTHORIZED, json!({"success": false, "message": "Not authorized"})))
    }

    fn listing(&self, id: &str) -> Option<&Value> {
        self.listings.iter().find(|l| l["_id"] == id)
    }
}

type Shared = Arc<Mutex<Store>>;
type Reply = (StatusCode, Json<Value>);

fn reply(status: StatusCode, body: Value) -> Reply {
    (status, Json(body))
}

fn bad_request(message: &str) -> Reply {
    reply(StatusCode::BAD_REQUEST, json!({"success": false, "message": message}))
}

fn forbidden() -> Reply {
    reply(StatusCode::FORBIDDEN, json!({"success": false, "message": "Access denied"}))
}

fn not_found(message: &str) -> Reply {
    reply(StatusCode::NOT_FOUND, json!({"success": false, "message": message}))
}

fn text(body: &Value, key: &str) -> Option<String> {
    body.get(key)
        .and_then(Value::as_str)
        .filter(|s| !s.is_empty())
        .map(String::from)
}

pub struct MockMarketplace {
    pub base_url: String,
    state: Shared,
}

impl MockMarketplace {
    pub async fn start(behavior: Misbehavior) -> Self {
        let state: Shared = Arc::new(Mutex::new(Store {
            behavior,
            ..Store::default()
        }));

        let listener = tokio::net::TcpListener::bind("127.0.0.1:0")
            .await
            .expect("bind mock marketplace");
        let addr = listener.local_addr().expect("mock address");
        let app = router(state.clone());
        tokio::spawn(async move {
            axum::serve(listener, app).await.expect("mock marketplace");
        });

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn api_url(&self) -> String {
        format!("{}/api", self.base_url)
    }

    pub fn executor(&self) -> Executor {
        self.executor_with_timeout(Duration::from_secs(5))
    }

    pub fn executor_with_timeout(&self, timeout: Duration) -> Executor {
        let transport = ReqwestTransport::new(timeout).expect("http client");
        Executor::new(self.api_url(), Box::new(transport))
    }

    /// `METHOD /path` of every request received, in order
    pub fn requests(&self) -> Vec<String> {
        self.state.lock().unwrap().requests.clone()
    }
}

fn router(state: Shared) -> Router {
    Router::new()
        .route("/api", get(health))
        .route("/api/auth/register", post(register))
        .route("/api/auth/login", post(login))
        .route("/api/user/me", get(me))
        .route("/api/user/select-role", post(select_role))
        .route("/api/owner/profile", post(create_profile).get(get_profile))
        .route("/api/listings", post(create_listing).get(list_listings))
        .route("/api/listings/:id", get(get_listing))
        .route("/api/reviews", post(create_review))
        .route("/api/reviews/user", get(user_reviews))
        .route("/api/reviews/listing/:id", get(listing_reviews))
        .route("/api/reviews/:id", delete(delete_review))
        .layer(middleware::from_fn_with_state(state.clone(), record_request))
        .with_state(state)
}

async fn record_request(State(state): State<Shared>, request: Request, next: Next) -> Response {
    let line = format!("{} {}", request.method(), request.uri().path());
    state.lock().unwrap().requests.push(line);
    next.run(request).await
}

async fn health(State(state): State<Shared>) -> Reply {
    if state.lock().unwrap().behavior.health_down {
        reply(StatusCode::SERVICE_UNAVAILABLE, json!({"message": "maintenance"}))
    } else {
        reply(StatusCode::OK, json!({"message": "Rental Marketplace API"}))
    }
}

async fn register(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let mut store = state.lock().unwrap();
    let (Some(name), Some(email), Some(password)) =
        (text(&body, "name"), text(&body, "email"), text(&body, "password"))
    else {
        return bad_request("Name, email and password are required");
    };
    if store.users.iter().any(|u| u.email == email) {
        return bad_request("User already exists");
    }
    if store.behavior.reject_second_registration && !store.users.is_empty() {
        return bad_request("Registration closed");
    }

    let id = store.next_id();
    let token = format!("token-{}", id);
    let mut response = json!({
        "success": true,
        "requiresRoleSelection": true,
        "user": {"id": id, "name": name, "email": email, "role": null},
    });
    if !store.behavior.omit_tokens {
        response["token"] = json!(token);
    }
    store.users.push(User {
        id,
        name,
        email,
        password,
        token,
        role: None,
    });
    reply(StatusCode::CREATED, response)
}

async fn login(State(state): State<Shared>, Json(body): Json<Value>) -> Reply {
    let store = state.lock().unwrap();
    let user = store.users.iter().find(|u| {
        Some(&u.email) == text(&body, "email").as_ref()
            && Some(&u.password) == text(&body, "password").as_ref()
    });
    match user {
        Some(user) => {
            let mut response = json!({
                "success": true,
                "user": {"id": user.id, "name": user.name, "role": user.role},
            });
            if !store.behavior.omit_tokens {
                response["token"] = json!(user.token);
            }
            reply(StatusCode::OK, response)
        }
        None => bad_request("Invalid credentials"),
    }
}

async fn me(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let store = state.lock().unwrap();
    let user = match store.authenticate(&headers) {
        Ok(index) => &store.users[index],
        Err(denied) => return denied,
    };
    reply(
        StatusCode::OK,
        json!({
            "success": true,
            "requiresRoleSelection": user.role.is_none(),
            "user": {"id": user.id, "email": user.email, "role": user.role},
        }),
    )
}

async fn select_role(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut store = state.lock().unwrap();
    let index = match store.authenticate(&headers) {
        Ok(index) => index,
        Err(denied) => return denied,
    };
    let accept_any_role = store.behavior.accept_any_role;
    let user = &mut store.users[index];
    if user.role.is_some() {
        return bad_request("Role already selected");
    }
    let role = match text(&body, "role") {
        Some(role) if accept_any_role || role == "OWNER" || role == "CUSTOMER" => role,
        _ => return bad_request("Invalid role"),
    };
    user.role = Some(role.clone());
    reply(
        StatusCode::OK,
        json!({"success": true, "user": {"id": user.id, "role": role}}),
    )
}

/// Index of the authenticated user if they hold `role`
fn require_role(store: &Store, headers: &HeaderMap, role: &str) -> Result<usize, Reply> {
    let index = store.authenticate(headers)?;
    if store.users[index].role.as_deref() == Some(role) {
        Ok(index)
    } else {
        Err(forbidden())
    }
}

async fn create_profile(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut store = state.lock().unwrap();
    let index = match require_role(&store, &headers, "OWNER") {
        Ok(index) => index,
        Err(denied) => return denied,
    };
    let Some(contact_number) = text(&body, "contactNumber") else {
        return bad_request("Contact number is required");
    };
    let user_id = store.users[index].id.clone();
    let profile = json!({
        "userId": user_id,
        "contactNumber": contact_number,
        "description": body.get("description").cloned().unwrap_or(Value::Null),
    });
    store.profiles.insert(user_id, profile.clone());
    reply(StatusCode::CREATED, json!({"success": true, "profile": profile}))
}

async fn get_profile(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let store = state.lock().unwrap();
    let index = match require_role(&store, &headers, "OWNER") {
        Ok(index) => index,
        Err(denied) => return denied,
    };
    match store.profiles.get(&store.users[index].id) {
        Some(profile) => reply(StatusCode::OK, json!({"success": true, "profile": profile})),
        None => not_found("Profile not found"),
    }
}

async fn create_listing(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut store = state.lock().unwrap();
    let index = match require_role(&store, &headers, "OWNER") {
        Ok(index) => index,
        Err(denied) => return denied,
    };

    let valid_type = matches!(
        body.get("type").and_then(Value::as_str),
        Some("room" | "house" | "lodge")
    );
    if text(&body, "title").is_none()
        || !valid_type
        || !body.get("price").is_some_and(Value::is_number)
        || !body.get("squareFeet").is_some_and(Value::is_number)
    {
        return bad_request("Validation failed");
    }
    if store.behavior.reject_listings {
        return reply(
            StatusCode::INTERNAL_SERVER_ERROR,
            json!({"success": false, "message": "Server error"}),
        );
    }

    let mut listing = body;
    listing["_id"] = json!(store.next_id());
    listing["ownerId"] = json!(store.users[index].id);
    listing["status"] = json!("available");
    store.listings.push(listing.clone());
    reply(StatusCode::CREATED, json!({"success": true, "listing": listing}))
}

async fn list_listings(
    State(state): State<Shared>,
    Query(params): Query<HashMap<String, String>>,
) -> Reply {
    let stalled = state.lock().unwrap().behavior.stall_listing_index;
    if stalled {
        tokio::time::sleep(Duration::from_secs(30)).await;
    }

    let store = state.lock().unwrap();
    let listings: Vec<Value> = store
        .listings
        .iter()
        .filter(|l| match params.get("ownerId") {
            Some(owner) => l["ownerId"] == owner.as_str(),
            None => true,
        })
        .cloned()
        .collect();
    reply(
        StatusCode::OK,
        json!({"success": true, "count": listings.len(), "listings": listings}),
    )
}

async fn get_listing(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    let store = state.lock().unwrap();
    match store.listing(&id) {
        Some(listing) => reply(StatusCode::OK, json!({"success": true, "listing": listing})),
        None => not_found("Listing not found"),
    }
}

async fn create_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Json(body): Json<Value>,
) -> Reply {
    let mut store = state.lock().unwrap();
    let index = match store.authenticate(&headers) {
        Ok(index) => index,
        Err(denied) => return denied,
    };
    if store.users[index].role.is_none() {
        return forbidden();
    }

    let listing_id = text(&body, "listingId");
    let rating = body
        .get("rating")
        .and_then(Value::as_i64)
        .filter(|r| (1..=5).contains(r));
    let (Some(listing_id), Some(rating)) = (listing_id, rating) else {
        return bad_request("Validation failed");
    };

    let user_id = store.users[index].id.clone();
    let Some(listing) = store.listing(&listing_id) else {
        return not_found("Listing not found");
    };
    if listing["ownerId"] == user_id.as_str() {
        return bad_request("You cannot review your own listing");
    }
    let duplicate = store
        .reviews
        .iter()
        .any(|r| r.listing_id == listing_id && r.user_id == user_id);
    if duplicate && !store.behavior.allow_duplicate_reviews {
        return bad_request("You have already reviewed this listing");
    }

    let review = Review {
        id: store.next_id(),
        listing_id,
        user_id,
        rating,
        comment: text(&body, "comment").unwrap_or_default(),
    };
    let response = json!({"success": true, "review": review.to_json()});
    store.reviews.push(review);
    reply(StatusCode::CREATED, response)
}

async fn listing_reviews(State(state): State<Shared>, Path(id): Path<String>) -> Reply {
    let store = state.lock().unwrap();
    let reviews: Vec<&Review> = store.reviews.iter().filter(|r| r.listing_id == id).collect();
    let average = if reviews.is_empty() {
        0.0
    } else {
        reviews.iter().map(|r| r.rating as f64).sum::<f64>() / reviews.len() as f64
    };
    reply(
        StatusCode::OK,
        json!({
            "success": true,
            "count": reviews.len(),
            "averageRating": format!("{:.1}", average),
            "reviews": reviews.iter().map(|r| r.to_json()).collect::<Vec<_>>(),
        }),
    )
}

async fn user_reviews(State(state): State<Shared>, headers: HeaderMap) -> Reply {
    let store = state.lock().unwrap();
    let index = match store.authenticate(&headers) {
        Ok(index) => index,
        Err(denied) => return denied,
    };
    let user_id = &store.users[index].id;
    let reviews: Vec<Value> = store
        .reviews
        .iter()
        .filter(|r| &r.user_id == user_id)
        .map(Review::to_json)
        .collect();
    reply(
        StatusCode::OK,
        json!({"success": true, "count": reviews.len(), "reviews": reviews}),
    )
}

async fn delete_review(
    State(state): State<Shared>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Reply {
    let mut store = state.lock().unwrap();
    let index = match store.authenticate(&headers) {
        Ok(index) => index,
        Err(denied) => return denied,
    };
    let Some(position) = store.reviews.iter().position(|r| r.id == id) else {
        return not_found("Review not found");
    };
    if store.reviews[position].user_id != store.users[index].id {
        return reply(
            StatusCode::FORBIDDEN,
            json!({"success": false, "message": "Not authorized to delete this review"}),
        );
    }
    store.reviews.remove(position);
    reply(StatusCode::OK, json!({"success": true, "message": "Review deleted successfully"}))
}
