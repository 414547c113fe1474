//! Output module for persisting scraped products
//!
//! Each category is written to its own CSV file named after the category.

mod csv_file;

pub use csv_file::write_products;
