use std::fmt;

use serde::{Deserialize, Serialize};

pub mod api;
pub mod collect;
pub mod details;
pub mod error;
pub mod grid;
mod utils;

pub use api::{HttpPlaces, PlacesService, RequestConfig};
pub use error::{Error, Result};
pub use grid::GeoPoint;

/// Opaque place identifier issued by the service. Doubles as the file name
/// of the persisted record.
#[derive(Clone, Debug, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct PlaceId(String);

impl PlaceId {
    pub fn new(id: impl Into<String>) -> Self {
        PlaceId(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for PlaceId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Full details of one place, passed through from the service without a
/// schema.
pub type PlaceRecord = serde_json::Map<String, serde_json::Value>;
