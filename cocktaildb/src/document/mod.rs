// Document I/O - the whole store lives in one JSON file

use crate::error::{CocktailDbError, Result};
use crate::schema::{Cocktail, Ingredient};
use serde::{Deserialize, Serialize};
use std::io::Write;
use std::path::Path;

/// The full persisted state. This is the unit of load and store; there is no
/// partial load.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Document {
    #[serde(default)]
    pub cocktails: Vec<Cocktail>,
    #[serde(default)]
    pub ingredients: Vec<Ingredient>,
}

/// Read and parse the document at `path`.
pub fn read_document(path: &Path) -> Result<Document> {
    let bytes = std::fs::read(path).map_err(|e| read_error(path, e))?;
    let doc: Document = serde_json::from_slice(&bytes).map_err(|e| read_error(path, e))?;
    log::debug!(
        "Loaded {}: {} cocktails, {} ingredients",
        path.display(),
        doc.cocktails.len(),
        doc.ingredients.len()
    );
    Ok(doc)
}

/// Serialize the document and replace the file at `path` with it.
///
/// The bytes are written to a temporary file next to the target and renamed
/// over it, so a failure at any point leaves the previous contents in place.
pub fn write_document(path: &Path, doc: &Document) -> Result<()> {
    let mut bytes = serde_json::to_vec_pretty(doc).map_err(|e| write_error(path, e))?;
    bytes.push(b'\n');

    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };

    let mut tmp = tempfile::NamedTempFile::new_in(dir).map_err(|e| write_error(path, e))?;
    // the temp file is owner-only; carry over whatever mode the document already has
    if let Ok(existing) = std::fs::metadata(path) {
        tmp.as_file()
            .set_permissions(existing.permissions())
            .map_err(|e| write_error(path, e))?;
    }
    tmp.write_all(&bytes).map_err(|e| write_error(path, e))?;
    tmp.as_file().sync_all().map_err(|e| write_error(path, e))?;
    tmp.persist(path).map_err(|e| write_error(path, e.error))?;

    log::debug!(
        "Stored {}: {} cocktails, {} ingredients",
        path.display(),
        doc.cocktails.len(),
        doc.ingredients.len()
    );
    Ok(())
}

fn read_error(path: &Path, e: impl std::fmt::Display) -> CocktailDbError {
    CocktailDbError::StorageRead {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

fn write_error(path: &Path, e: impl std::fmt::Display) -> CocktailDbError {
    CocktailDbError::StorageWrite {
        path: path.display().to_string(),
        message: e.to_string(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::schema::IngredientQuantity;
    use pretty_assertions::assert_eq;
    use tempfile::TempDir;

    fn sample() -> Document {
        Document {
            cocktails: vec![Cocktail {
                id: 1,
                name: "Mojito".into(),
                category: "Cocktail".into(),
                instructions: "Muddle mint leaves with sugar and lime juice.".into(),
                ingredients: vec![IngredientQuantity {
                    name: "Soda Water".into(),
                    quantity: "to top".into(),
                }],
            }],
            ingredients: vec![Ingredient {
                id: 1,
                name: "Rum".into(),
                description: "Sugarcane spirit".into(),
                is_alcoholic: true,
            }],
        }
    }

    #[test]
    fn test_write_then_read() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");

        write_document(&path, &sample()).unwrap();
        let loaded = read_document(&path).unwrap();
        assert_eq!(loaded, sample());
    }

    #[test]
    fn test_written_file_is_pretty_json() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");

        write_document(&path, &Document::default()).unwrap();
        let text = std::fs::read_to_string(&path).unwrap();
        assert_eq!(text, "{\n  \"cocktails\": [],\n  \"ingredients\": []\n}\n");
    }

    #[test]
    fn test_missing_collections_load_empty() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(
            &path,
            r#"{ "ingredients": [{ "id": 3, "name": "cola", "desc": "cola", "is_alcoholic": false }] }"#,
        )
        .unwrap();

        let doc = read_document(&path).unwrap();
        assert!(doc.cocktails.is_empty());
        assert_eq!(doc.ingredients[0].description, "cola");
    }

    #[test]
    fn test_missing_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let result = read_document(&tmp.path().join("absent.json"));
        assert!(matches!(result, Err(CocktailDbError::StorageRead { .. })));
    }

    #[test]
    fn test_malformed_file_is_read_error() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        std::fs::write(&path, "{ \"cocktails\": [ {").unwrap();

        let result = read_document(&path);
        assert!(matches!(result, Err(CocktailDbError::StorageRead { .. })));
    }

    #[test]
    fn test_write_into_missing_directory_fails_cleanly() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nope").join("data.json");

        let result = write_document(&path, &sample());
        assert!(matches!(result, Err(CocktailDbError::StorageWrite { .. })));
        assert!(!path.exists());
    }

    #[cfg(unix)]
    #[test]
    fn test_overwrite_keeps_file_permissions() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");
        write_document(&path, &Document::default()).unwrap();
        std::fs::set_permissions(&path, std::fs::Permissions::from_mode(0o644)).unwrap();

        write_document(&path, &sample()).unwrap();
        let mode = std::fs::metadata(&path).unwrap().permissions().mode() & 0o777;
        assert_eq!(mode, 0o644);
    }

    #[cfg(unix)]
    #[test]
    fn test_failed_write_keeps_previous_document() {
        use std::os::unix::fs::PermissionsExt;

        let tmp = TempDir::new().unwrap();
        let dir = tmp.path().join("store");
        std::fs::create_dir(&dir).unwrap();
        let path = dir.join("data.json");
        write_document(&path, &sample()).unwrap();
        let before = std::fs::read(&path).unwrap();

        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o555)).unwrap();
        // privileged users ignore directory permissions, nothing to check then
        if std::fs::write(dir.join("write-check"), b"").is_ok() {
            std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();
            return;
        }

        let result = write_document(&path, &Document::default());
        std::fs::set_permissions(&dir, std::fs::Permissions::from_mode(0o755)).unwrap();

        assert!(matches!(result, Err(CocktailDbError::StorageWrite { .. })));
        assert_eq!(std::fs::read(&path).unwrap(), before);
        assert_eq!(read_document(&path).unwrap(), sample());
    }

    #[test]
    fn test_overwrite_replaces_whole_document() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("data.json");

        write_document(&path, &sample()).unwrap();
        write_document(&path, &Document::default()).unwrap();
        assert_eq!(read_document(&path).unwrap(), Document::default());
        // no stray temp files are left next to the document
        assert_eq!(std::fs::read_dir(tmp.path()).unwrap().count(), 1);
    }
}
