//! Filterman Core - areas, sub-areas and their file formats
//!
//! This crate holds everything the editor front-end calls into: the area
//! spec parser, the filter store, the JSON and line codecs, and the
//! flattening used when filters are copied out for pasting elsewhere.

pub mod app;
pub mod codec;
pub mod cursor;
pub mod error;
pub mod export;
pub mod io;
pub mod model;
pub mod spec;

pub use app::{App, InputTarget, Mode};
pub use codec::Format;
pub use cursor::{Row, Selection};
pub use error::{FilterError, Result};
pub use export::{flatten, to_json, Flattened};
pub use model::{normalize, Area, AreaHandle, AreaView, FilterStore, SubArea, SubAreaHandle};
