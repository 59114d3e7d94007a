use serde::{de::DeserializeOwned, Deserialize};
use ureq::Agent;

use crate::{Error, GeoPoint, PlaceId, PlaceRecord, Result};

pub const NEARBY_SEARCH_URL: &str = "https://maps.googleapis.com/maps/api/place/nearbysearch/json";
pub const PLACE_DETAILS_URL: &str = "https://maps.googleapis.com/maps/api/place/details/json";

/// Extra headers applied to every request made by one client. Fixed at
/// construction, never shared across clients.
#[derive(Clone, Debug, Default)]
pub struct RequestConfig {
    pub headers: Vec<(String, String)>,
}

/// The places-lookup boundary. Implemented over HTTP by [`HttpPlaces`] and
/// by canned fakes in tests.
pub trait PlacesService {
    /// Ids of the places of the given type nearest to `location`.
    fn nearby_search(&self, location: GeoPoint, place_type: &str) -> Result<Vec<PlaceId>>;

    /// The full record of one place.
    fn place_details(&self, id: &PlaceId) -> Result<PlaceRecord>;
}

pub struct HttpPlaces {
    agent: Agent,
    api_key: String,
    config: RequestConfig,
}

impl HttpPlaces {
    pub fn new(api_key: impl Into<String>) -> Self {
        Self::with_config(api_key, RequestConfig::default())
    }

    pub fn with_config(api_key: impl Into<String>, config: RequestConfig) -> Self {
        HttpPlaces {
            agent: Agent::new(),
            api_key: api_key.into(),
            config,
        }
    }

    fn get<T: DeserializeOwned>(&self, url: &str, query: &[(&str, &str)]) -> Result<T> {
        let mut request = self.agent.get(url);
        for (name, value) in query {
            request = request.query(name, value);
        }
        for (name, value) in &self.config.headers {
            request = request.set(name, value);
        }
        Ok(request.call()?.into_json()?)
    }
}

impl PlacesService for HttpPlaces {
    fn nearby_search(&self, location: GeoPoint, place_type: &str) -> Result<Vec<PlaceId>> {
        let location = location.to_string();
        let response: SearchResponse = self.get(
            NEARBY_SEARCH_URL,
            &[
                ("location", location.as_str()),
                ("type", place_type),
                ("rankby", "distance"),
                ("key", &self.api_key),
            ],
        )?;
        status_check(&response.status)?;

        Ok(response.results.into_iter().map(|x| x.place_id).collect())
    }

    fn place_details(&self, id: &PlaceId) -> Result<PlaceRecord> {
        let response: DetailsResponse = self.get(
            PLACE_DETAILS_URL,
            &[("place_id", id.as_str()), ("key", &self.api_key)],
        )?;
        status_check(&response.status)?;

        response
            .result
            .ok_or_else(|| Error::Parse(format!("details response for {id} has no result")))
    }
}

fn status_check(status: &str) -> Result<()> {
    if status != "OK" && status != "ZERO_RESULTS" {
        return Err(Error::Status(status.to_string()));
    }
    Ok(())
}

#[derive(Deserialize)]
struct SearchResponse {
    status: String,
    #[serde(default)]
    results: Vec<SearchResult>,
}

#[derive(Deserialize)]
struct SearchResult {
    place_id: PlaceId,
}

#[derive(Deserialize)]
struct DetailsResponse {
    status: String,
    result: Option<PlaceRecord>,
}
