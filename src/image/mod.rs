//! Image reference handling
//!
//! Parsing of user-supplied image lists into `repository:tag` references.

pub mod reference;

pub use reference::{DEFAULT_TAG, ImageReference, parse_image_list};
