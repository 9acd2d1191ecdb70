//! Annual meteor showers: the catalog, the yearly active windows, the radiant
//! overlay and the status summary.

pub mod catalog;
pub mod layer;
pub mod status;
pub mod window;
