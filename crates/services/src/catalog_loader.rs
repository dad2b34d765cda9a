use std::path::PathBuf;

use log::info;
use study_core::model::Catalog;

use crate::error::ServicesError;

/// Where the content catalog comes from.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// JSON compiled into the binary.
    Embedded(&'static str),
    /// JSON file on disk.
    File(PathBuf),
}

/// Read and validate the catalog.
///
/// # Errors
///
/// Returns `ServicesError::CatalogIo` if the file cannot be read, or
/// `ServicesError::Catalog` if the document is malformed or has duplicate ids.
pub fn load_catalog(source: &CatalogSource) -> Result<Catalog, ServicesError> {
    let catalog = match source {
        CatalogSource::Embedded(json) => Catalog::from_json_str(json)?,
        CatalogSource::File(path) => {
            let json = std::fs::read_to_string(path).map_err(|source| {
                ServicesError::CatalogIo {
                    path: path.clone(),
                    source,
                }
            })?;
            Catalog::from_json_str(&json)?
        }
    };
    info!(
        "catalog loaded: {} domains, {} cards",
        catalog.domains().len(),
        catalog.card_count()
    );
    Ok(catalog)
}
