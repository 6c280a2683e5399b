//! Fake catalog API server for integration tests.
//!
//! Spins up a minimal `axum` HTTP server on a random TCP port bound to
//! 127.0.0.1. Serves the three endpoints the sync controller consumes:
//! - `GET /products` — the seeded product list
//! - `PUT /products/{id}` — applies the payload and returns the updated record
//! - `POST /products` — assigns an id and returns the created record
//!
//! Failure injection: [`FakeCatalogApi::set_fail_list`] makes the list
//! endpoint return 500, [`FakeCatalogApi::set_fail_writes`] does the same for
//! PUT/POST. Successful writes are recorded so tests can assert on the exact
//! wire payloads.
//!
//! # Example
//!
//! ```rust,no_run
//! # tokio_test::block_on(async {
//! use common::fake_catalog_api::FakeCatalogApi;
//!
//! let api = FakeCatalogApi::start().await.unwrap();
//! api.seed(vec![/* products */]).await;
//!
//! // Point an HttpCatalogClient at api.base_url()
//! let url = api.base_url();
//! # });
//! ```

use axum::{
    extract::{Path, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    routing::{get, put},
    Json, Router,
};
use backroom::{Category, Product, ProductPayload};
use std::net::SocketAddr;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::sync::Mutex;

/// State shared between the router and test code.
#[derive(Default)]
struct ApiState {
    products: Vec<Product>,
    fail_list: bool,
    fail_writes: bool,
    /// Successful PUT bodies, with the target id.
    received_updates: Vec<(u64, ProductPayload)>,
    /// Successful POST bodies.
    received_creates: Vec<ProductPayload>,
}

/// Handle to the running fake catalog API server.
pub struct FakeCatalogApi {
    addr: SocketAddr,
    state: Arc<Mutex<ApiState>>,
}

impl FakeCatalogApi {
    /// Start the fake catalog API server on a random port. Returns once the
    /// server is listening.
    pub async fn start() -> std::io::Result<Self> {
        let listener = TcpListener::bind("127.0.0.1:0").await?;
        let addr = listener.local_addr()?;
        let state = Arc::new(Mutex::new(ApiState::default()));

        let app = Router::new()
            .route("/products", get(list_products).post(create_product))
            .route("/products/{id}", put(update_product))
            .with_state(state.clone());

        tokio::spawn(async move {
            axum::serve(listener, app).await.unwrap();
        });

        // Give the task a moment to register.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;

        Ok(Self { addr, state })
    }

    /// Base URL for the API (e.g. `http://127.0.0.1:PORT`).
    pub fn base_url(&self) -> String {
        format!("http://{}", self.addr)
    }

    /// Replace the product list served by `GET /products`.
    pub async fn seed(&self, products: Vec<Product>) {
        self.state.lock().await.products = products;
    }

    /// Make `GET /products` answer 500 (or stop doing so).
    pub async fn set_fail_list(&self, fail: bool) {
        self.state.lock().await.fail_list = fail;
    }

    /// Make `PUT` / `POST` answer 500 (or stop doing so).
    pub async fn set_fail_writes(&self, fail: bool) {
        self.state.lock().await.fail_writes = fail;
    }

    /// Successful PUT payloads received so far, with their target ids.
    pub async fn updates(&self) -> Vec<(u64, ProductPayload)> {
        self.state.lock().await.received_updates.clone()
    }

    /// Successful POST payloads received so far.
    pub async fn creates(&self) -> Vec<ProductPayload> {
        self.state.lock().await.received_creates.clone()
    }
}

// ---------------------------------------------------------------------------
// Route handlers
// ---------------------------------------------------------------------------

async fn list_products(State(state): State<Arc<Mutex<ApiState>>>) -> Response {
    let state = state.lock().await;
    if state.fail_list {
        return (StatusCode::INTERNAL_SERVER_ERROR, "list unavailable").into_response();
    }
    Json(state.products.clone()).into_response()
}

async fn update_product(
    Path(id): Path<u64>,
    State(state): State<Arc<Mutex<ApiState>>>,
    Json(payload): Json<ProductPayload>,
) -> Response {
    let mut state = state.lock().await;
    if state.fail_writes {
        return (StatusCode::INTERNAL_SERVER_ERROR, "write unavailable").into_response();
    }

    let Some(slot) = state.products.iter_mut().find(|p| p.id == id) else {
        return (StatusCode::NOT_FOUND, "no such product").into_response();
    };

    slot.title = payload.title.clone();
    slot.price = payload.price;
    slot.description = payload.description.clone();
    slot.category = Category {
        id: payload.category_id,
        name: format!("category-{}", payload.category_id),
    };
    slot.images = payload.images.clone();
    let updated = slot.clone();

    state.received_updates.push((id, payload));
    Json(updated).into_response()
}

async fn create_product(
    State(state): State<Arc<Mutex<ApiState>>>,
    Json(payload): Json<ProductPayload>,
) -> Response {
    let mut state = state.lock().await;
    if state.fail_writes {
        return (StatusCode::INTERNAL_SERVER_ERROR, "write unavailable").into_response();
    }

    let id = state.products.iter().map(|p| p.id).max().unwrap_or(0) + 1;
    let created = Product {
        id,
        title: payload.title.clone(),
        price: payload.price,
        description: payload.description.clone(),
        category: Category {
            id: payload.category_id,
            name: format!("category-{}", payload.category_id),
        },
        images: payload.images.clone(),
    };

    state.products.push(created.clone());
    state.received_creates.push(payload);
    Json(created).into_response()
}
