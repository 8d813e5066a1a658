pub mod params;
pub mod predict;

use crate::error::Result;
use chofas::core::propensity::table::PropensityTable;
use std::path::Path;
use tracing::info;

/// The custom table at `path`, or the built-in Chou–Fasman parameters.
fn load_propensity_table(path: Option<&Path>) -> Result<PropensityTable> {
    match path {
        Some(path) => {
            info!("Loading propensity table from {:?}", path);
            let table = PropensityTable::load(path)?;
            info!(residues = table.len(), "Propensity table loaded.");
            Ok(table)
        }
        None => Ok(PropensityTable::chou_fasman()),
    }
}
