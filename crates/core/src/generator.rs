//! End-to-end generation: load the document, build the models, render, write.

use std::fs;
use std::path::{Path, PathBuf};

use tracing::{debug, info};

use crate::error::{GeneseError, GeneseResult};
use crate::openapi::{EndpointsBuilder, ImportRegistry, OpenApiDocument, build_data_types};
use crate::render::{GeneratedFile, RenderOptions, Renderer};

/// Inputs of a generation run. Paths are used as given; callers resolve them
/// against the project directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GenerateOptions {
    /// OpenAPI JSON document.
    pub input: PathBuf,
    pub render: RenderOptions,
}

/// Read and parse the OpenAPI document.
pub fn load_document(path: &Path) -> GeneseResult<OpenApiDocument> {
    if !path.is_file() {
        return Err(GeneseError::DocumentNotFound(path.to_path_buf()));
    }
    let contents = fs::read_to_string(path).map_err(|err| GeneseError::io(path, err))?;
    let document = OpenApiDocument::from_json(&contents)?;
    debug!(
        path = %path.display(),
        paths = document.paths.len(),
        "Loaded OpenAPI document."
    );
    Ok(document)
}

/// Render every output file in memory. Nothing touches the disk on failure.
pub fn generate(options: &GenerateOptions) -> GeneseResult<Vec<GeneratedFile>> {
    let document = load_document(&options.input)?;
    let render = &options.render;

    let data_types = build_data_types(&document, &render.datatype_extension);
    let registry = ImportRegistry::for_output_dirs(
        &render.services_output,
        &render.datatypes_output,
        render.datatype_extension.as_str(),
    );
    let endpoints = EndpointsBuilder::new(&document, registry).build();

    Renderer::new(render.clone())?.render_all(&data_types, endpoints)
}

/// Write rendered files, creating parent directories as needed.
pub fn write_files(files: &[GeneratedFile]) -> GeneseResult<()> {
    for file in files {
        if let Some(parent) = file.path.parent() {
            fs::create_dir_all(parent).map_err(|err| GeneseError::io(parent, err))?;
        }
        fs::write(&file.path, &file.contents).map_err(|err| GeneseError::io(&file.path, err))?;
        info!(path = %file.path.display(), "Wrote file.");
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used, clippy::expect_used)]
mod tests {
    use super::*;
    use crate::render::Framework;
    use tempfile::TempDir;

    #[test]
    fn test_missing_document() {
        let dir = TempDir::new().unwrap();
        let missing = dir.path().join("genese-api.json");
        assert!(matches!(
            load_document(&missing),
            Err(GeneseError::DocumentNotFound(path)) if path == missing
        ));
    }

    #[test]
    fn test_directory_is_not_a_document() {
        let dir = TempDir::new().unwrap();
        assert!(matches!(
            load_document(dir.path()),
            Err(GeneseError::DocumentNotFound(_))
        ));
    }

    #[test]
    fn test_invalid_document() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("api.json");
        fs::write(&path, "{ \"paths\": ").unwrap();
        assert!(matches!(
            load_document(&path),
            Err(GeneseError::InvalidDocument(_))
        ));

        fs::write(&path, "[1, 2, 3]").unwrap();
        assert!(load_document(&path).unwrap().paths.is_empty());
    }

    #[test]
    fn test_service_imports_follow_output_dirs() {
        let dir = TempDir::new().unwrap();
        let input = dir.path().join("api.json");
        fs::write(
            &input,
            r##"{ "paths": { "/widgets/{id}": {
                "parameters": [{ "name": "id", "in": "path" }],
                "get": { "responses": { "200": { "content": { "application/json": { "schema": { "$ref": "#/components/schemas/Widget" } } } } } }
            } } }"##,
        )
        .unwrap();

        let mut render = RenderOptions::new(Framework::Angular);
        render.datatypes_output = dir.path().join("app/models");
        render.services_output = dir.path().join("app/api/services");
        render.datatype_extension = "model".to_string();
        let files = generate(&GenerateOptions { input, render }).unwrap();

        assert_eq!(files.len(), 1);
        assert!(files[0]
            .contents
            .contains("import { Widget } from '../../models/widget.model';"));
    }

    #[test]
    fn test_write_files_creates_directories() {
        let dir = TempDir::new().unwrap();
        let files = vec![
            GeneratedFile {
                path: dir.path().join("a/b/one.ts"),
                contents: "export class One {\n}\n".to_string(),
            },
            GeneratedFile {
                path: dir.path().join("two.ts"),
                contents: String::new(),
            },
        ];
        write_files(&files).unwrap();
        assert_eq!(
            fs::read_to_string(dir.path().join("a/b/one.ts")).unwrap(),
            "export class One {\n}\n"
        );
        assert!(dir.path().join("two.ts").is_file());
    }
}
