mod equatorial;
mod lla;

pub use equatorial::{Equatorial, Horizontal};
pub use lla::Lla;
