use serde::Serialize;

use crate::constants::{MARKER_SIZE, MARKER_SYMBOL};
use crate::domain::{GroupCatalog, GroupRecord};
use crate::error::{MeetupError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct MapCenter {
    pub latitude: f64,
    pub longitude: f64,
}

/// Summary shown next to the map for each group
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MarkerDetails {
    pub category: String,
    pub location: String,
    pub description: String,
    pub link: String,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapMarker {
    pub label: String,
    pub latitude: f64,
    pub longitude: f64,
    pub hover_text: String,
    pub symbol: &'static str,
    pub size: u32,
    pub details: MarkerDetails,
}

impl MapMarker {
    fn from_record(record: &GroupRecord) -> Self {
        Self {
            label: record.name.clone(),
            latitude: record.latitude,
            longitude: record.longitude,
            hover_text: record.name.clone(),
            symbol: MARKER_SYMBOL,
            size: MARKER_SIZE,
            details: MarkerDetails {
                category: record.category.clone(),
                location: record.location(),
                description: record.display_description(),
                link: record.link.clone(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct MapProjection {
    pub markers: Vec<MapMarker>,
    pub center: MapCenter,
}

impl MapProjection {
    /// Looks a marker up by label. With repeated names the last one wins.
    pub fn marker(&self, label: &str) -> Option<&MapMarker> {
        self.markers.iter().rev().find(|marker| marker.label == label)
    }
}

/// One marker per group in catalog order, centered on the first group.
pub fn project(catalog: &GroupCatalog) -> Result<MapProjection> {
    let first = catalog.first().ok_or(MeetupError::EmptyCatalog)?;
    let center = MapCenter {
        latitude: first.latitude,
        longitude: first.longitude,
    };

    let markers = catalog.iter().map(MapMarker::from_record).collect();
    Ok(MapProjection { markers, center })
}
