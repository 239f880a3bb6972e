pub mod area;
pub mod store;
pub mod sub_area;

pub use area::{Area, AreaHandle};
pub use store::{AreaView, FilterStore};
pub use sub_area::{normalize, SubArea, SubAreaHandle, WILDCARD, WILDCARD_RANGE};
