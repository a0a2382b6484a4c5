// src/services/trip_client.rs
// DOCUMENTATION: Trip service API client
// PURPOSE: Handle communication with the trip storage, places search and PDF export endpoints

use crate::config::Config;
use crate::errors::TripPlannerError;
use crate::models::{
    parse_places_response, CreateTripRequest, Language, Place, PlaceCategory, Trip,
    UpdatePlacesRequest,
};
use reqwest::{Client, Response, Url};
use validator::Validate;

/// Trip service API client
/// DOCUMENTATION: One pooled HTTP client with the configured timeout, shared by
/// every page of the application
pub struct TripPlannerClient {
    /// HTTP client for making requests
    client: Client,
    /// Service origin, without trailing slash
    base_url: String,
}

impl TripPlannerClient {
    /// Create new client from configuration
    /// DOCUMENTATION: Request timeout expiry surfaces as a network failure
    pub fn new(config: &Config) -> Result<Self, TripPlannerError> {
        let client = Client::builder()
            .timeout(config.timeout())
            .build()
            .map_err(|e| {
                TripPlannerError::NetworkFailure(format!("Failed to build HTTP client: {}", e))
            })?;

        // Reject an unusable origin up front
        Url::parse(&config.api_url).map_err(|e| {
            TripPlannerError::InvalidInput(format!("Invalid API URL {}: {}", config.api_url, e))
        })?;

        Ok(Self {
            client,
            base_url: config.api_url.trim_end_matches('/').to_string(),
        })
    }

    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Build an endpoint URL, percent-encoding each path segment
    fn url(&self, segments: &[&str]) -> Result<Url, TripPlannerError> {
        let mut url = Url::parse(&self.base_url)
            .map_err(|e| TripPlannerError::InvalidInput(format!("Invalid API URL: {}", e)))?;
        url.path_segments_mut()
            .map_err(|_| TripPlannerError::InvalidInput("API URL cannot be a base".to_string()))?
            .pop_if_empty()
            .extend(segments);
        Ok(url)
    }

    /// GET /trips
    pub async fn list_trips(&self) -> Result<Vec<Trip>, TripPlannerError> {
        let url = self.url(&["trips"])?;
        log::debug!("Listing trips: {}", url);

        let response = self.client.get(url).send().await.map_err(|e| {
            log::error!("Trip list request failed: {}", e);
            TripPlannerError::from(e)
        })?;
        let response = check_status(response, "Trip list").await?;

        let trips: Vec<Trip> = response.json().await.map_err(|e| {
            log::error!("Failed to parse trip list: {}", e);
            TripPlannerError::from(e)
        })?;
        log::info!("Loaded {} trips", trips.len());
        Ok(trips)
    }

    /// Look up one trip
    /// DOCUMENTATION: The service has no single-trip endpoint, so the list is
    /// fetched and searched
    pub async fn get_trip(&self, trip_id: i64) -> Result<Trip, TripPlannerError> {
        self.list_trips()
            .await?
            .into_iter()
            .find(|t| t.id == trip_id)
            .ok_or(TripPlannerError::NotFound(trip_id))
    }

    /// POST /save_trip
    pub async fn create_trip(&self, request: &CreateTripRequest) -> Result<(), TripPlannerError> {
        request.validate()?;

        let url = self.url(&["save_trip"])?;
        log::debug!("Creating trip for {} ({} days)", request.city, request.days);

        let response = self
            .client
            .post(url)
            .json(request)
            .send()
            .await
            .map_err(|e| {
                log::error!("Create trip request failed: {}", e);
                TripPlannerError::from(e)
            })?;
        check_status(response, "Create trip").await?;

        log::info!("Saved trip to {}", request.city);
        Ok(())
    }

    /// DELETE /trips/{id}
    pub async fn delete_trip(&self, trip_id: i64) -> Result<(), TripPlannerError> {
        let url = self.url(&["trips", &trip_id.to_string()])?;
        log::debug!("Deleting trip {}", trip_id);

        let response = self.client.delete(url).send().await.map_err(|e| {
            log::error!("Delete trip request failed: {}", e);
            TripPlannerError::from(e)
        })?;
        check_status(response, "Delete trip").await?;

        log::info!("Deleted trip {}", trip_id);
        Ok(())
    }

    /// PATCH /trips/{id}/places
    /// DOCUMENTATION: Sends the full set, the service replaces what it stored
    pub async fn set_trip_places(
        &self,
        trip_id: i64,
        places: &[String],
    ) -> Result<(), TripPlannerError> {
        let url = self.url(&["trips", &trip_id.to_string(), "places"])?;
        let body = UpdatePlacesRequest {
            places: places.to_vec(),
        };
        log::debug!("Saving {} places for trip {}", places.len(), trip_id);

        let response = self
            .client
            .patch(url)
            .json(&body)
            .send()
            .await
            .map_err(|e| {
                log::error!("Save places request failed: {}", e);
                TripPlannerError::from(e)
            })?;
        check_status(response, "Save places").await?;
        Ok(())
    }

    /// GET /trips/{id}/export/pdf
    pub async fn export_trip_pdf(&self, trip_id: i64) -> Result<Vec<u8>, TripPlannerError> {
        let url = self.url(&["trips", &trip_id.to_string(), "export", "pdf"])?;
        log::debug!("Exporting trip {} as PDF", trip_id);

        let response = self.client.get(url).send().await.map_err(|e| {
            log::error!("PDF export request failed: {}", e);
            TripPlannerError::from(e)
        })?;
        let response = check_status(response, "PDF export").await?;

        let bytes = response.bytes().await.map_err(|e| {
            log::error!("PDF export body could not be read: {}", e);
            TripPlannerError::from(e)
        })?;
        if bytes.is_empty() {
            return Err(TripPlannerError::NetworkFailure(
                "PDF export returned an empty document".to_string(),
            ));
        }
        Ok(bytes.to_vec())
    }

    /// GET /places/{city}
    /// DOCUMENTATION: Nearby places for a city, always requesting images
    ///
    /// # Arguments
    /// * `city` - City name, sent as a path segment
    /// * `category` - Category filter (`all` included)
    /// * `limit` - Page size
    /// * `language` - Language of translated names
    pub async fn search_places(
        &self,
        city: &str,
        category: PlaceCategory,
        limit: u32,
        language: Language,
    ) -> Result<Vec<Place>, TripPlannerError> {
        if city.trim().is_empty() {
            return Err(TripPlannerError::InvalidInput(
                "City is required for places search".to_string(),
            ));
        }

        let url = self.url(&["places", city])?;
        let limit = limit.to_string();
        let params = [
            ("category", category.as_str()),
            ("limit", limit.as_str()),
            ("with_images", "true"),
            ("lang", language.code()),
        ];

        log::debug!(
            "Places search: city={}, category={}, lang={}",
            city,
            category,
            language
        );

        let response = self
            .client
            .get(url)
            .query(&params)
            .send()
            .await
            .map_err(|e| {
                log::error!("Places request failed: {}", e);
                TripPlannerError::from(e)
            })?;
        let response = check_status(response, "Places search").await?;

        let body: serde_json::Value = response.json().await.map_err(|e| {
            log::error!("Failed to parse places response: {}", e);
            TripPlannerError::from(e)
        })?;
        let places = parse_places_response(body)?;

        log::info!("Places search for {} returned {} results", city, places.len());
        Ok(places)
    }
}

/// Turn a non-success response into a server rejection carrying the body text
async fn check_status(response: Response, context: &str) -> Result<Response, TripPlannerError> {
    let status = response.status();
    if status.is_success() {
        return Ok(response);
    }

    let body = response.text().await.unwrap_or_default();
    let message = if body.trim().is_empty() {
        status
            .canonical_reason()
            .unwrap_or("Request failed")
            .to_string()
    } else {
        body
    };

    log::error!("{} failed with {}: {}", context, status, message);
    Err(TripPlannerError::ServerRejection {
        status: status.as_u16(),
        message,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::test_backend::{PlacesReply, TestBackend};
    use serde_json::json;

    fn client_for(backend: &TestBackend) -> TripPlannerClient {
        TripPlannerClient::new(&Config::for_base_url(&backend.base_url)).unwrap()
    }

    #[test]
    fn test_url_encodes_segments() {
        let client = TripPlannerClient::new(&Config::for_base_url("http://127.0.0.1:8000/")).unwrap();
        assert_eq!(client.base_url(), "http://127.0.0.1:8000");

        let url = client.url(&["places", "São Paulo"]).unwrap();
        assert_eq!(url.as_str(), "http://127.0.0.1:8000/places/S%C3%A3o%20Paulo");
    }

    #[actix_rt::test]
    async fn test_search_places_query_shape() {
        let backend = TestBackend::start().await;
        backend.set_places(
            "museums",
            PlacesReply::ok(json!({
                "places": [{"xid": "a1", "name": "National Museum", "kinds": "museums"}]
            })),
        );
        let client = client_for(&backend);

        let places = client
            .search_places("Prague", PlaceCategory::Museums, 10, Language::En)
            .await
            .unwrap();

        assert_eq!(places.len(), 1);
        assert_eq!(places[0].label(), "National Museum");

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "GET");
        assert_eq!(requests[0].path, "/places/Prague");
        assert_eq!(
            requests[0].query,
            "category=museums&limit=10&with_images=true&lang=en"
        );
    }

    #[actix_rt::test]
    async fn test_search_places_rejects_empty_city() {
        let backend = TestBackend::start().await;
        let client = client_for(&backend);

        let result = client
            .search_places("  ", PlaceCategory::All, 10, Language::En)
            .await;
        assert!(matches!(result, Err(TripPlannerError::InvalidInput(_))));
        assert!(backend.requests().is_empty());
    }

    #[actix_rt::test]
    async fn test_server_rejection_carries_body() {
        let backend = TestBackend::start().await;
        backend.set_places("all", PlacesReply::status(502, json!("upstream down")));
        let client = client_for(&backend);

        let err = client
            .search_places("Prague", PlaceCategory::All, 10, Language::En)
            .await
            .unwrap_err();
        assert_eq!(err.status(), Some(502));
        assert!(err.user_message().contains("upstream down"));
    }

    #[actix_rt::test]
    async fn test_get_trip_finds_by_id() {
        let backend = TestBackend::start().await;
        backend.add_trip(json!({"id": 7, "city": "Brno", "days": 2, "description": ""}));
        backend.add_trip(json!({"id": 42, "city": "Prague", "days": 3, "description": "",
                                "placesToVisit": ["a1"]}));
        let client = client_for(&backend);

        let trip = client.get_trip(42).await.unwrap();
        assert_eq!(trip.city, "Prague");
        assert_eq!(trip.places_to_visit, vec!["a1"]);

        let missing = client.get_trip(99).await;
        assert_eq!(missing, Err(TripPlannerError::NotFound(99)));
    }

    #[actix_rt::test]
    async fn test_create_trip_validates_before_sending() {
        let backend = TestBackend::start().await;
        let client = client_for(&backend);

        let invalid = CreateTripRequest::new("", 2, "nothing");
        assert!(matches!(
            client.create_trip(&invalid).await,
            Err(TripPlannerError::ValidationError(_))
        ));
        assert!(backend.requests().is_empty());

        let valid = CreateTripRequest::new("Brno", 2, "Špilberk");
        client.create_trip(&valid).await.unwrap();

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/save_trip");
        let body: serde_json::Value = serde_json::from_str(&requests[0].body).unwrap();
        assert_eq!(body, json!({"city": "Brno", "days": 2, "description": "Špilberk"}));
        assert_eq!(backend.trips().len(), 1);
    }

    #[actix_rt::test]
    async fn test_delete_trip() {
        let backend = TestBackend::start().await;
        backend.add_trip(json!({"id": 5, "city": "Olomouc", "days": 1, "description": ""}));
        let client = client_for(&backend);

        client.delete_trip(5).await.unwrap();
        assert!(backend.trips().is_empty());

        let err = client.delete_trip(5).await.unwrap_err();
        assert_eq!(err.status(), Some(404));
    }

    #[actix_rt::test]
    async fn test_export_rejects_empty_document() {
        let backend = TestBackend::start().await;
        backend.set_pdf(200, Vec::new());
        let client = client_for(&backend);

        let result = client.export_trip_pdf(7).await;
        assert!(matches!(result, Err(TripPlannerError::NetworkFailure(_))));
    }

    #[actix_rt::test]
    async fn test_unreachable_service_is_network_failure() {
        // Port 9 (discard) is not served by the test backend
        let client = TripPlannerClient::new(&Config::for_base_url("http://127.0.0.1:9")).unwrap();
        let result = client.list_trips().await;
        assert!(matches!(result, Err(TripPlannerError::NetworkFailure(_))));
    }
}
