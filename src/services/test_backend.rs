// src/services/test_backend.rs
// DOCUMENTATION: In-process trip service stub for client tests
// PURPOSE: Serve the trip API on an ephemeral port and record every request

use actix_web::{web, App, HttpRequest, HttpResponse, HttpServer};
use serde_json::{json, Value};
use std::collections::HashMap;
use std::sync::{Arc, Mutex};
use std::time::Duration;

/// A request as the stub received it
#[derive(Debug, Clone)]
pub struct RecordedRequest {
    pub method: String,
    /// Raw (still percent-encoded) path
    pub path: String,
    /// Raw query string, without the leading `?`
    pub query: String,
    pub body: String,
}

/// Canned reply for one places category
#[derive(Debug, Clone)]
pub struct PlacesReply {
    pub status: u16,
    pub body: Value,
    pub delay: Duration,
}

impl PlacesReply {
    pub fn ok(body: Value) -> Self {
        Self {
            status: 200,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn status(status: u16, body: Value) -> Self {
        Self {
            status,
            body,
            delay: Duration::ZERO,
        }
    }

    pub fn delayed(mut self, millis: u64) -> Self {
        self.delay = Duration::from_millis(millis);
        self
    }
}

#[derive(Default)]
struct StubData {
    requests: Vec<RecordedRequest>,
    trips: Vec<Value>,
    next_id: i64,
    places: HashMap<String, PlacesReply>,
    patch_status: Option<u16>,
    pdf: Option<(u16, Vec<u8>)>,
    pdf_delay: Duration,
}

#[derive(Clone, Default)]
struct StubState {
    inner: Arc<Mutex<StubData>>,
}

impl StubState {
    fn record(&self, req: &HttpRequest, body: &[u8]) {
        let mut data = self.inner.lock().unwrap();
        data.requests.push(RecordedRequest {
            method: req.method().to_string(),
            path: req.path().to_string(),
            query: req.query_string().to_string(),
            body: String::from_utf8_lossy(body).to_string(),
        });
    }
}

fn reply(status: u16, body: &Value) -> HttpResponse {
    let status = actix_web::http::StatusCode::from_u16(status)
        .unwrap_or(actix_web::http::StatusCode::INTERNAL_SERVER_ERROR);
    match body {
        Value::String(text) => HttpResponse::build(status).body(text.clone()),
        other => HttpResponse::build(status).json(other),
    }
}

async fn list_trips(req: HttpRequest, state: web::Data<StubState>, body: web::Bytes) -> HttpResponse {
    state.record(&req, &body);
    let trips = state.inner.lock().unwrap().trips.clone();
    HttpResponse::Ok().json(trips)
}

async fn save_trip(req: HttpRequest, state: web::Data<StubState>, body: web::Bytes) -> HttpResponse {
    state.record(&req, &body);
    let mut trip: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return HttpResponse::UnprocessableEntity().body(e.to_string()),
    };
    let mut data = state.inner.lock().unwrap();
    data.next_id += 1;
    trip["id"] = json!(data.next_id + 100);
    data.trips.push(trip);
    HttpResponse::Ok().json(json!({"status": "saved"}))
}

async fn delete_trip(
    req: HttpRequest,
    state: web::Data<StubState>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> HttpResponse {
    state.record(&req, &body);
    let id = path.into_inner();
    let mut data = state.inner.lock().unwrap();
    let before = data.trips.len();
    data.trips.retain(|t| t["id"].as_i64() != Some(id));
    if data.trips.len() == before {
        return HttpResponse::NotFound().body("Trip not found");
    }
    HttpResponse::Ok().json(json!({"status": "deleted"}))
}

async fn patch_places(
    req: HttpRequest,
    state: web::Data<StubState>,
    path: web::Path<i64>,
    body: web::Bytes,
) -> HttpResponse {
    state.record(&req, &body);
    let id = path.into_inner();
    let mut data = state.inner.lock().unwrap();

    if let Some(status) = data.patch_status {
        return reply(status, &json!("places update rejected"));
    }

    let update: Value = match serde_json::from_slice(&body) {
        Ok(v) => v,
        Err(e) => return HttpResponse::UnprocessableEntity().body(e.to_string()),
    };
    match data.trips.iter_mut().find(|t| t["id"].as_i64() == Some(id)) {
        Some(trip) => {
            trip["placesToVisit"] = update["places"].clone();
            HttpResponse::Ok().json(json!({"status": "ok"}))
        }
        None => HttpResponse::NotFound().body("Trip not found"),
    }
}

async fn export_pdf(req: HttpRequest, state: web::Data<StubState>, body: web::Bytes) -> HttpResponse {
    state.record(&req, &body);
    let (pdf, delay) = {
        let data = state.inner.lock().unwrap();
        (data.pdf.clone(), data.pdf_delay)
    };
    if !delay.is_zero() {
        actix_rt::time::sleep(delay).await;
    }
    match pdf {
        Some((200, bytes)) => HttpResponse::Ok()
            .content_type("application/pdf")
            .body(bytes),
        Some((status, _)) => reply(status, &json!("export failed")),
        None => HttpResponse::NotFound().body("Trip not found"),
    }
}

async fn places(
    req: HttpRequest,
    state: web::Data<StubState>,
    query: web::Query<HashMap<String, String>>,
    body: web::Bytes,
) -> HttpResponse {
    state.record(&req, &body);
    let category = query.get("category").cloned().unwrap_or_default();
    let canned = state.inner.lock().unwrap().places.get(&category).cloned();
    let canned = canned.unwrap_or_else(|| PlacesReply::ok(json!({"places": []})));

    if !canned.delay.is_zero() {
        actix_rt::time::sleep(canned.delay).await;
    }
    reply(canned.status, &canned.body)
}

/// Route configuration of the stub
fn config(cfg: &mut web::ServiceConfig) {
    cfg.route("/trips", web::get().to(list_trips))
        .route("/save_trip", web::post().to(save_trip))
        .route("/trips/{id}", web::delete().to(delete_trip))
        .route("/trips/{id}/places", web::patch().to(patch_places))
        .route("/trips/{id}/export/pdf", web::get().to(export_pdf))
        .route("/places/{city}", web::get().to(places));
}

/// Running stub server
pub struct TestBackend {
    pub base_url: String,
    state: StubState,
}

impl TestBackend {
    /// Bind on an ephemeral port and serve in the background
    /// DOCUMENTATION: Must run inside an actix system (`#[actix_rt::test]`)
    pub async fn start() -> Self {
        let state = StubState::default();
        let data = web::Data::new(state.clone());

        let server = HttpServer::new(move || App::new().app_data(data.clone()).configure(config))
            .workers(1)
            .bind(("127.0.0.1", 0))
            .expect("bind test backend");
        let addr = server.addrs()[0];
        actix_rt::spawn(server.run());

        Self {
            base_url: format!("http://{}", addr),
            state,
        }
    }

    pub fn requests(&self) -> Vec<RecordedRequest> {
        self.state.inner.lock().unwrap().requests.clone()
    }

    pub fn trips(&self) -> Vec<Value> {
        self.state.inner.lock().unwrap().trips.clone()
    }

    pub fn add_trip(&self, trip: Value) {
        self.state.inner.lock().unwrap().trips.push(trip);
    }

    pub fn set_places(&self, category: &str, reply: PlacesReply) {
        self.state
            .inner
            .lock()
            .unwrap()
            .places
            .insert(category.to_string(), reply);
    }

    /// Reject every places update with `status`
    pub fn fail_patches(&self, status: u16) {
        self.state.inner.lock().unwrap().patch_status = Some(status);
    }

    pub fn accept_patches(&self) {
        self.state.inner.lock().unwrap().patch_status = None;
    }

    pub fn set_pdf(&self, status: u16, bytes: Vec<u8>) {
        self.state.inner.lock().unwrap().pdf = Some((status, bytes));
    }

    pub fn set_pdf_delay(&self, millis: u64) {
        self.state.inner.lock().unwrap().pdf_delay = Duration::from_millis(millis);
    }
}
