use crate::product::Product;
use crate::Result;
use csv::{Terminator, WriterBuilder};
use std::path::Path;

/// Writes a category's products to a CSV file
///
/// The file is created or truncated. The header row is always written, even
/// for an empty list, followed by one row per product in field order.
/// Free-text fields are quoted when they contain delimiters, quotes or
/// newlines. Records end with `\r\n`.
///
/// # Arguments
///
/// * `path` - Destination file
/// * `products` - Products in the order they appeared on the page
pub fn write_products(path: &Path, products: &[Product]) -> Result<()> {
    let mut writer = WriterBuilder::new()
        .has_headers(false)
        .terminator(Terminator::CRLF)
        .from_path(path)?;

    writer.write_record(Product::FIELDS)?;
    for product in products {
        writer.serialize(product)?;
    }

    writer.flush()?;
    Ok(())
}
