//! # POI Data Source
//!
//! The external parking database: a trait seam ([`source::PoiSource`]) plus
//! the Overpass API implementation behind it.

pub mod overpass;
pub mod source;
pub mod types;

pub use overpass::OverpassClient;
pub use source::{PoiSource, QueryError};
pub use types::PoiRecord;
