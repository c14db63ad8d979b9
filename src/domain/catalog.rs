use serde::Serialize;
use tracing::{debug, warn};

use crate::domain::group::GroupRecord;
use crate::error::Result;
use crate::types::RawGroupData;

/// Groups from one search, in the order the directory returned them.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(transparent)]
pub struct GroupCatalog {
    groups: Vec<GroupRecord>,
}

impl GroupCatalog {
    /// Fails on the first malformed entry; a catalog is never partial.
    pub fn build(raw_entries: &[RawGroupData]) -> Result<Self> {
        let groups = raw_entries
            .iter()
            .enumerate()
            .map(|(index, entry)| {
                GroupRecord::from_raw(entry).map_err(|e| {
                    warn!("Rejecting directory response at entry {}: {}", index, e);
                    e
                })
            })
            .collect::<Result<Vec<_>>>()?;

        debug!("Built catalog with {} groups", groups.len());
        crate::metrics::catalog::groups_built(groups.len());
        Ok(Self { groups })
    }

    pub fn first(&self) -> Option<&GroupRecord> {
        self.groups.first()
    }

    pub fn len(&self) -> usize {
        self.groups.len()
    }

    pub fn is_empty(&self) -> bool {
        self.groups.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, GroupRecord> {
        self.groups.iter()
    }
}

impl From<Vec<GroupRecord>> for GroupCatalog {
    fn from(groups: Vec<GroupRecord>) -> Self {
        Self { groups }
    }
}

impl<'a> IntoIterator for &'a GroupCatalog {
    type Item = &'a GroupRecord;
    type IntoIter = std::slice::Iter<'a, GroupRecord>;

    fn into_iter(self) -> Self::IntoIter {
        self.groups.iter()
    }
}
