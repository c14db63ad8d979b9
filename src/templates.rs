use askama::Template;

use crate::map::MapMarker;

#[derive(Template)]
#[template(path = "meetups.html")]
pub struct MeetupsTemplate {
    pub location: String,
    pub figure_json: Option<String>,
    pub markers: Vec<MapMarker>,
    pub notice: Option<String>,
}

impl MeetupsTemplate {
    pub fn with_map(location: &str, figure_json: String, markers: Vec<MapMarker>) -> Self {
        Self {
            location: location.to_string(),
            figure_json: Some(figure_json),
            markers,
            notice: None,
        }
    }

    pub fn with_notice(location: &str, notice: impl Into<String>) -> Self {
        Self {
            location: location.to_string(),
            figure_json: None,
            markers: Vec::new(),
            notice: Some(notice.into()),
        }
    }
}
