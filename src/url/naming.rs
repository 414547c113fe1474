use crate::config::OutputConfig;
use url::Url;

/// Extension appended to every category file
pub const CSV_EXTENSION: &str = "csv";

/// Derives the output file name for a category URL
///
/// Takes the last non-empty path segment, substitutes the configured home
/// name when that segment is the home marker (or when the path is empty),
/// and appends `.csv`. Two categories sharing a final segment map to the
/// same file.
///
/// # Examples
///
/// ```
/// use catalog_harvest::config::OutputConfig;
/// use catalog_harvest::url::derive_file_name;
/// use url::Url;
///
/// let naming = OutputConfig::default();
/// let home = Url::parse("https://webscraper.io/test-sites/e-commerce/more").unwrap();
/// let phones = Url::parse("https://webscraper.io/test-sites/e-commerce/more/phones").unwrap();
/// assert_eq!(derive_file_name(&home, &naming), "home.csv");
/// assert_eq!(derive_file_name(&phones, &naming), "phones.csv");
/// ```
pub fn derive_file_name(url: &Url, naming: &OutputConfig) -> String {
    let segment = url
        .path()
        .rsplit('/')
        .find(|segment| !segment.is_empty())
        .unwrap_or("");

    let stem = if segment.is_empty() || segment == naming.home_marker {
        naming.home_name.as_str()
    } else {
        segment
    };

    format!("{}.{}", stem, CSV_EXTENSION)
}
