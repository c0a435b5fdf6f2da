//! Manifest files: declarations of one source file serialized as JSON or YAML.

use std::fs;
use std::path::Path;

use tracing::debug;

use super::Manifest;
use crate::types::{AutocommentError, Result};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum ManifestFormat {
    Json,
    Yaml,
}

impl ManifestFormat {
    fn from_path(path: &Path) -> Result<Self> {
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => Ok(Self::Json),
            Some("yaml" | "yml") => Ok(Self::Yaml),
            _ => Err(AutocommentError::manifest(
                path.display().to_string(),
                "expected a .json, .yaml or .yml file",
            )),
        }
    }
}

impl Manifest {
    /// Read a manifest, picking the format from the file extension
    pub fn load(path: &Path) -> Result<Self> {
        let format = ManifestFormat::from_path(path)?;
        let content = fs::read_to_string(path)?;
        debug!("Loading manifest {}", path.display());

        let invalid = |e: String| AutocommentError::manifest(path.display().to_string(), e);
        let manifest = match format {
            ManifestFormat::Json => {
                serde_json::from_str(&content).map_err(|e| invalid(e.to_string()))?
            }
            ManifestFormat::Yaml => {
                serde_yaml::from_str(&content).map_err(|e| invalid(e.to_string()))?
            }
        };
        Ok(manifest)
    }

    /// Write the manifest back in the format its extension names
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = match ManifestFormat::from_path(path)? {
            ManifestFormat::Json => {
                let mut text = serde_json::to_string_pretty(self)?;
                text.push('\n');
                text
            }
            ManifestFormat::Yaml => serde_yaml::to_string(self)?,
        };
        fs::write(path, content)?;
        Ok(())
    }

    pub fn to_json(&self) -> Result<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::decl::{Declaration, DeclarationShape, FuncDecl, TypeRef};
    use tempfile::TempDir;

    const YAML: &str = r#"
file: store.go
declarations:
  - kind: method
    receiver: { type_name: Store, pointer: true }
    func:
      name: Lookup
      params: [{ name: key, type: string }]
      results: [{ type: "[]byte" }, { type: error }]
  - kind: type_alias
    name: Celsius
    underlying: float64
"#;

    #[test]
    fn test_load_yaml() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("store.yaml");
        fs::write(&path, YAML).unwrap();

        let manifest = Manifest::load(&path).unwrap();
        assert_eq!(manifest.file.as_deref(), Some("store.go"));
        match &manifest.declarations[0].shape {
            DeclarationShape::Method(method) => {
                assert!(method.receiver.pointer);
                assert_eq!(
                    method.func.results[0].ty,
                    TypeRef::slice(TypeRef::named("byte"))
                );
            }
            other => panic!("unexpected shape: {:?}", other),
        }
    }

    #[test]
    fn test_save_and_reload_json() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("run.json");
        let manifest = Manifest {
            file: None,
            declarations: vec![
                Declaration::new(DeclarationShape::Function(
                    FuncDecl::new("Run").param("ctx", "context.Context"),
                ))
                .with_doc("Run runs."),
            ],
        };
        manifest.save(&path).unwrap();

        let raw = fs::read_to_string(&path).unwrap();
        assert!(raw.contains("\"type\": \"context.Context\""));
        assert_eq!(Manifest::load(&path).unwrap(), manifest);
    }

    #[test]
    fn test_unknown_extension_rejected() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("decls.txt");
        fs::write(&path, "{}").unwrap();
        assert!(matches!(
            Manifest::load(&path),
            Err(AutocommentError::Manifest { .. })
        ));
    }

    #[test]
    fn test_malformed_manifest_names_file() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("bad.json");
        fs::write(&path, "{\"declarations\": [{\"kind\": \"lambda\"}]}").unwrap();
        let err = Manifest::load(&path).unwrap_err();
        assert!(err.to_string().contains("bad.json"));
    }
}
