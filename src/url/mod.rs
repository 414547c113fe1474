//! URL handling module for Catalog-Harvest
//!
//! This module resolves navigation hrefs against the catalog's base URL and
//! maps category URLs to output file names.

mod naming;
mod resolve;

pub use naming::{derive_file_name, CSV_EXTENSION};
pub use resolve::resolve_href;
