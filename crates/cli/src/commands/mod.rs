//! CLI command implementations.

pub mod catalog;
pub mod pos;
pub mod product;
pub mod variants;

use std::path::Path;

use serde::Serialize;
use serde::de::DeserializeOwned;

/// Read and parse a JSON file.
pub(crate) async fn read_json<T: DeserializeOwned>(
    path: &Path,
) -> Result<T, Box<dyn std::error::Error>> {
    if !path.exists() {
        return Err(format!("File not found: {}", path.display()).into());
    }
    let content = tokio::fs::read_to_string(path).await?;
    Ok(serde_json::from_str(&content)?)
}

/// Write a value to stdout as pretty JSON.
pub(crate) fn print_json<T: Serialize>(value: &T) -> Result<(), Box<dyn std::error::Error>> {
    let json = serde_json::to_string_pretty(value)?;
    #[allow(clippy::print_stdout)]
    {
        println!("{json}");
    }
    Ok(())
}
