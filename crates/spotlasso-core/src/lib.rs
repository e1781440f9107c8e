//! Spotlasso Core Library
//!
//! Region selection over spatial spot samples: users draw polygons on the
//! canvas and each region keeps the set of spots it currently selects.

pub mod color;
pub mod config;
pub mod error;
pub mod geometry;
pub mod gesture;
pub mod highlight;
pub mod points;
pub mod region;
pub mod selector;
pub mod serialize;
pub mod storage;
pub mod style;
pub mod template;

pub use color::{Palette, SerializableColor, TABLEAU10};
pub use config::SelectorConfig;
pub use error::{SelectError, SelectResult};
pub use geometry::Ring;
pub use gesture::{GestureAdapter, GestureEvent, GestureOutcome};
pub use highlight::HighlightController;
pub use points::PointSet;
pub use region::{Region, RegionId};
pub use selector::{DraftState, RegionSet};
pub use serialize::{DumpEntry, RegionDump, Snapshot, SnapshotRegion};
pub use style::{MarkerShape, PointStyle, RegionStyle};
pub use template::{Spot, SpotTemplate, StaticTemplate, TemplateSource};
