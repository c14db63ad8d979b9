//! plotly `scattermapbox` figure built from a projection
//!
//! The page hands this document to plotly.js, which draws the markers on a
//! mapbox base map.

use serde::Serialize;

use crate::config::MapConfig;
use crate::constants::MAP_TITLE;
use crate::error::Result;
use crate::map::projector::{MapCenter, MapMarker, MapProjection};

/// Static look of the map; independent of the search.
#[derive(Debug, Clone)]
pub struct MapStyle {
    pub style: String,
    pub zoom: u32,
    pub pad: u32,
    pub background_color: String,
    pub access_token: String,
}

impl From<&MapConfig> for MapStyle {
    fn from(config: &MapConfig) -> Self {
        Self {
            style: config.style.clone(),
            zoom: config.zoom,
            pad: config.pad,
            background_color: config.background_color.clone(),
            access_token: config.access_token.clone(),
        }
    }
}

impl Default for MapStyle {
    fn default() -> Self {
        Self::from(&MapConfig::default())
    }
}

#[derive(Debug, Serialize)]
pub struct MapFigure {
    data: Vec<Trace>,
    layout: Layout,
}

#[derive(Debug, Serialize)]
struct Trace {
    #[serde(rename = "type")]
    kind: &'static str,
    name: String,
    lat: [f64; 1],
    lon: [f64; 1],
    mode: &'static str,
    marker: MarkerStyle,
    text: String,
    hoverinfo: &'static str,
}

#[derive(Debug, Serialize)]
struct MarkerStyle {
    symbol: &'static str,
    size: u32,
}

#[derive(Debug, Serialize)]
struct Layout {
    title: &'static str,
    autosize: bool,
    hovermode: &'static str,
    margin: Margin,
    paper_bgcolor: String,
    mapbox: Mapbox,
}

#[derive(Debug, Serialize)]
struct Margin {
    l: u32,
    r: u32,
    b: u32,
    t: u32,
    pad: u32,
}

#[derive(Debug, Serialize)]
struct Mapbox {
    style: String,
    accesstoken: String,
    bearing: u32,
    center: Coordinates,
    pitch: u32,
    zoom: u32,
}

#[derive(Debug, Serialize)]
struct Coordinates {
    lat: f64,
    lon: f64,
}

impl From<MapCenter> for Coordinates {
    fn from(center: MapCenter) -> Self {
        Self {
            lat: center.latitude,
            lon: center.longitude,
        }
    }
}

impl From<&MapMarker> for Trace {
    fn from(marker: &MapMarker) -> Self {
        Self {
            kind: "scattermapbox",
            name: marker.label.clone(),
            lat: [marker.latitude],
            lon: [marker.longitude],
            mode: "markers",
            marker: MarkerStyle {
                symbol: marker.symbol,
                size: marker.size,
            },
            text: marker.hover_text.clone(),
            hoverinfo: "text",
        }
    }
}

impl MapFigure {
    pub fn new(projection: &MapProjection, style: &MapStyle) -> Self {
        Self {
            data: projection.markers.iter().map(Trace::from).collect(),
            layout: Layout {
                title: MAP_TITLE,
                autosize: true,
                hovermode: "closest",
                margin: Margin {
                    l: 0,
                    r: 0,
                    b: 0,
                    t: 0,
                    pad: style.pad,
                },
                paper_bgcolor: style.background_color.clone(),
                mapbox: Mapbox {
                    style: style.style.clone(),
                    accesstoken: style.access_token.clone(),
                    bearing: 0,
                    center: projection.center.into(),
                    pitch: 0,
                    zoom: style.zoom,
                },
            },
        }
    }

    pub fn trace_count(&self) -> usize {
        self.data.len()
    }

    /// JSON safe to place inside a `<script>` element.
    pub fn to_embedded_json(&self) -> Result<String> {
        let json = serde_json::to_string(self)?;
        Ok(json.replace('<', "\\u003c"))
    }
}
