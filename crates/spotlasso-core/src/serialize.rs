//! Saving and restoring the regions of a session.
//!
//! Two formats are supported:
//! - [`RegionDump`], keyed by region name. Regions sharing a name collapse
//!   into one entry, the later region winning.
//! - [`Snapshot`], keyed by region id. Nothing is lost, and names and colors
//!   come back on restore.
//!
//! Either way, spot selections are recomputed on load rather than trusted,
//! and region ids are minted fresh.

use crate::color::SerializableColor;
use crate::error::{SelectError, SelectResult};
use crate::geometry::Ring;
use crate::region::RegionId;
use crate::selector::RegionSet;
use serde::de::{MapAccess, Visitor};
use serde::ser::SerializeMap;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::collections::{BTreeMap, HashMap};
use std::fmt;

/// Current [`Snapshot`] format version.
pub const SNAPSHOT_VERSION: u32 = 1;

/// One region in the name-keyed dump.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DumpEntry {
    /// Outline rings. Exactly one ring is written and accepted.
    pub vertices: Vec<Ring>,
    pub point_ids: Vec<u32>,
}

/// Name-keyed interchange format: `{ name: { vertices, pointIds } }`.
///
/// Entries keep first-insertion order; inserting an existing name replaces
/// its entry in place.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct RegionDump {
    entries: Vec<(String, DumpEntry)>,
}

impl RegionDump {
    pub fn new() -> Self {
        Self::default()
    }

    /// Insert an entry, returning the one it replaced.
    pub fn insert(&mut self, name: impl Into<String>, entry: DumpEntry) -> Option<DumpEntry> {
        let name = name.into();
        match self.entries.iter_mut().find(|(n, _)| *n == name) {
            Some((_, slot)) => Some(std::mem::replace(slot, entry)),
            None => {
                self.entries.push((name, entry));
                None
            }
        }
    }

    pub fn get(&self, name: &str) -> Option<&DumpEntry> {
        self.entries.iter().find(|(n, _)| n == name).map(|(_, e)| e)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &DumpEntry)> {
        self.entries.iter().map(|(n, e)| (n.as_str(), e))
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> SelectResult<Self> {
        serde_json::from_str(json).map_err(|e| SelectError::MalformedState(e.to_string()))
    }
}

impl Serialize for RegionDump {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let mut map = serializer.serialize_map(Some(self.entries.len()))?;
        for (name, entry) in &self.entries {
            map.serialize_entry(name, entry)?;
        }
        map.end()
    }
}

impl<'de> Deserialize<'de> for RegionDump {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        struct DumpVisitor;

        impl<'de> Visitor<'de> for DumpVisitor {
            type Value = RegionDump;

            fn expecting(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str("a map from region name to region entry")
            }

            fn visit_map<A: MapAccess<'de>>(self, mut access: A) -> Result<RegionDump, A::Error> {
                let mut dump = RegionDump::new();
                while let Some((name, entry)) = access.next_entry::<String, DumpEntry>()? {
                    dump.insert(name, entry);
                }
                Ok(dump)
            }
        }

        deserializer.deserialize_map(DumpVisitor)
    }
}

/// One region in a [`Snapshot`].
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SnapshotRegion {
    pub name: String,
    pub color: SerializableColor,
    pub vertices: Vec<Ring>,
    pub point_ids: Vec<u32>,
}

/// Lossless, id-keyed record of every live region.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Snapshot {
    pub version: u32,
    /// Regions by id; ascending ids are creation order.
    pub regions: BTreeMap<u64, SnapshotRegion>,
}

impl Default for Snapshot {
    fn default() -> Self {
        Self {
            version: SNAPSHOT_VERSION,
            regions: BTreeMap::new(),
        }
    }
}

impl Snapshot {
    pub fn to_json(&self) -> Result<String, serde_json::Error> {
        serde_json::to_string_pretty(self)
    }

    pub fn from_json(json: &str) -> SelectResult<Self> {
        serde_json::from_str(json).map_err(|e| SelectError::MalformedState(e.to_string()))
    }
}

/// The single outline ring of a stored region.
fn outline(what: &str, rings: &[Ring]) -> SelectResult<Ring> {
    match rings {
        [ring] => {
            ring.validate()
                .map_err(|e| SelectError::MalformedState(format!("{}: {}", what, e)))?;
            Ok(ring.clone())
        }
        [] => Err(SelectError::MalformedState(format!("{}: missing vertices", what))),
        _ => Err(SelectError::MalformedState(format!(
            "{}: {} rings given, polygons with holes are not supported",
            what,
            rings.len()
        ))),
    }
}

impl RegionSet {
    /// Name-keyed dump of every live region.
    pub fn dump(&self) -> RegionDump {
        let mut dump = RegionDump::new();
        for region in self.regions() {
            let entry = DumpEntry {
                vertices: vec![region.vertices().clone()],
                point_ids: self.points().claimed_by(region.id()),
            };
            if dump.insert(region.name(), entry).is_some() {
                log::warn!(
                    "Region name {:?} is used more than once; the dump keeps region {}",
                    region.name(),
                    region.id()
                );
            }
        }
        dump
    }

    /// Outline of each region, keyed by name.
    pub fn dump_polygons(&self) -> HashMap<String, Vec<Ring>> {
        self.dump()
            .entries
            .into_iter()
            .map(|(name, entry)| (name, entry.vertices))
            .collect()
    }

    /// Spot ids currently claimed by each region, keyed by name.
    pub fn dump_points(&self) -> HashMap<String, Vec<u32>> {
        self.dump()
            .entries
            .into_iter()
            .map(|(name, entry)| (name, entry.point_ids))
            .collect()
    }

    /// Replace every region with the contents of a name-keyed dump.
    ///
    /// The dump is fully validated first; on error the session is untouched.
    pub fn load_dump(&mut self, dump: &RegionDump) -> SelectResult<Vec<RegionId>> {
        let rings = dump
            .iter()
            .map(|(name, entry)| -> SelectResult<_> {
                Ok((name, outline(name, &entry.vertices)?))
            })
            .collect::<SelectResult<Vec<_>>>()
            .inspect_err(|e| log::warn!("Rejected region dump: {}", e))?;
        if !self.is_ready() {
            return Err(SelectError::NotReady);
        }

        self.clear();
        let mut ids = Vec::with_capacity(rings.len());
        for (name, ring) in rings {
            self.begin_draw()?;
            let id = self.commit(ring)?;
            self.rename(id, name)?;
            ids.push(id);
        }
        log::info!("Loaded {} regions from dump", ids.len());
        Ok(ids)
    }

    /// Id-keyed snapshot of every live region.
    pub fn snapshot(&self) -> Snapshot {
        let regions = self
            .regions()
            .iter()
            .map(|region| {
                let entry = SnapshotRegion {
                    name: region.name().to_string(),
                    color: region.color(),
                    vertices: vec![region.vertices().clone()],
                    point_ids: self.points().claimed_by(region.id()),
                };
                (region.id().0, entry)
            })
            .collect();
        Snapshot {
            version: SNAPSHOT_VERSION,
            regions,
        }
    }

    /// Replace every region with those of `snapshot`, restoring names and colors.
    ///
    /// The snapshot is fully validated first; on error the session is untouched.
    pub fn restore(&mut self, snapshot: &Snapshot) -> SelectResult<Vec<RegionId>> {
        if snapshot.version != SNAPSHOT_VERSION {
            return Err(SelectError::MalformedState(format!(
                "unsupported snapshot version {}",
                snapshot.version
            )));
        }
        let rings = snapshot
            .regions
            .iter()
            .map(|(id, entry)| -> SelectResult<_> {
                Ok((entry, outline(&format!("region {}", id), &entry.vertices)?))
            })
            .collect::<SelectResult<Vec<_>>>()
            .inspect_err(|e| log::warn!("Rejected snapshot: {}", e))?;
        if !self.is_ready() {
            return Err(SelectError::NotReady);
        }

        self.clear();
        let mut ids = Vec::with_capacity(rings.len());
        for (entry, ring) in rings {
            self.begin_draw()?;
            let id = self.commit(ring)?;
            self.rename(id, entry.name.clone())?;
            self.recolor(id, entry.color)?;
            ids.push(id);
        }
        log::info!("Restored {} regions from snapshot", ids.len());
        Ok(ids)
    }
}
