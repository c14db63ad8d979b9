use std::sync::Arc;
use tracing::{info, instrument};

use crate::domain::GroupCatalog;
use crate::error::Result;
use crate::map::{project, MapProjection};
use crate::types::GroupSource;

/// Runs one search through the pipeline: directory, catalog, projection.
///
/// Holds no per-request state, so one instance serves concurrent requests.
#[derive(Clone)]
pub struct PresentationService {
    source: Arc<dyn GroupSource>,
}

impl PresentationService {
    pub fn new(source: Arc<dyn GroupSource>) -> Self {
        Self { source }
    }

    #[instrument(skip(self), fields(source = self.source.source_name()))]
    pub async fn find_groups(&self, location: &str, radius: u32) -> Result<GroupCatalog> {
        let raw_groups = self.source.search_groups(location, radius).await?;
        GroupCatalog::build(&raw_groups)
    }

    pub async fn find_and_project(&self, location: &str, radius: u32) -> Result<MapProjection> {
        let catalog = self.find_groups(location, radius).await?;
        let projection = project(&catalog)?;
        info!(
            "Projected {} groups near {} (radius {})",
            projection.markers.len(),
            location,
            radius
        );
        Ok(projection)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::constants::DEFAULT_RADIUS;
    use crate::error::MeetupError;
    use crate::types::RawGroupData;
    use async_trait::async_trait;
    use serde_json::json;
    use std::sync::Mutex;

    enum Reply {
        Groups(Vec<RawGroupData>),
        Status(u16),
    }

    struct MockGroupSource {
        reply: Reply,
        calls: Mutex<Vec<(String, u32)>>,
    }

    impl MockGroupSource {
        fn new(reply: Reply) -> Self {
            Self {
                reply,
                calls: Mutex::new(Vec::new()),
            }
        }
    }

    #[async_trait]
    impl GroupSource for MockGroupSource {
        fn source_name(&self) -> &'static str {
            "mock"
        }

        async fn search_groups(&self, location: &str, radius: u32) -> Result<Vec<RawGroupData>> {
            self.calls.lock().unwrap().push((location.to_string(), radius));
            match &self.reply {
                Reply::Groups(groups) => Ok(groups.clone()),
                Reply::Status(status) => Err(MeetupError::Remote { status: *status }),
            }
        }
    }

    fn raw_group(name: &str, lat: f64, lon: f64) -> RawGroupData {
        json!({
            "category": { "name": "Games" },
            "city": "Seattle",
            "country": "US",
            "description": "Board games on Thursdays",
            "join_mode": "open",
            "lat": lat,
            "lon": lon,
            "link": "https://example.com/games",
            "members": 30,
            "name": name
        })
    }

    #[tokio::test]
    async fn test_find_and_project_runs_pipeline() {
        let source = Arc::new(MockGroupSource::new(Reply::Groups(vec![
            raw_group("Board Gamers", 47.66, -122.31),
            raw_group("Go Club", 47.61, -122.33),
        ])));
        let service = PresentationService::new(source.clone());

        let projection = service.find_and_project("98105", DEFAULT_RADIUS).await.unwrap();

        assert_eq!(projection.markers.len(), 2);
        assert_eq!(projection.markers[1].label, "Go Club");
        assert_eq!(projection.center.latitude, 47.66);
        assert_eq!(
            source.calls.lock().unwrap().as_slice(),
            &[("98105".to_string(), 20)]
        );
    }

    #[tokio::test]
    async fn test_remote_error_propagates() {
        let service = PresentationService::new(Arc::new(MockGroupSource::new(Reply::Status(500))));

        match service.find_and_project("98105", DEFAULT_RADIUS).await {
            Err(MeetupError::Remote { status }) => assert_eq!(status, 500),
            other => panic!("expected Remote error, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn test_no_groups_is_empty_catalog() {
        let service = PresentationService::new(Arc::new(MockGroupSource::new(Reply::Groups(vec![]))));

        assert!(matches!(
            service.find_and_project("98105", DEFAULT_RADIUS).await,
            Err(MeetupError::EmptyCatalog)
        ));
    }

    #[tokio::test]
    async fn test_malformed_entry_fails_whole_search() {
        let mut broken = raw_group("No Coordinates", 0.0, 0.0);
        broken.as_object_mut().unwrap().remove("lat");
        let service = PresentationService::new(Arc::new(MockGroupSource::new(Reply::Groups(vec![
            raw_group("Fine", 47.0, -122.0),
            broken,
        ]))));

        assert!(matches!(
            service.find_groups("98105", 5).await,
            Err(MeetupError::MalformedEntry { .. })
        ));
    }

    #[tokio::test]
    async fn test_concurrent_searches_share_service() {
        let service = PresentationService::new(Arc::new(MockGroupSource::new(Reply::Groups(vec![
            raw_group("Board Gamers", 47.66, -122.31),
        ]))));

        let handles: Vec<_> = (0..4)
            .map(|i| {
                let service = service.clone();
                tokio::spawn(async move { service.find_and_project(&format!("9810{i}"), 10).await })
            })
            .collect();

        for handle in handles {
            let projection = handle.await.unwrap().unwrap();
            assert_eq!(projection.markers.len(), 1);
        }
    }
}
