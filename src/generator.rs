//! Write a rendered DBML document to the configured location.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{Context, Result};
use tracing::{error, info};

use crate::config::GeneratorConfig;
use crate::dmmf::Datamodel;
use crate::schema::Schema;

/// Build, render and persist the schema. Returns the written path.
///
/// The document is rendered completely before anything is written, so a
/// build or render error never leaves a partial file behind.
pub fn write_dbml_schema(datamodel: &Datamodel, config: &GeneratorConfig) -> Result<PathBuf> {
    let schema = Schema::from_datamodel(datamodel)?;
    let dbml = schema.print(&config.render_options())?;

    let path = config.output_path();
    if let Err(err) = persist(&config.directory, &path, &dbml) {
        error!(path = %path.display(), "unable to write file");
        return Err(err);
    }

    info!(path = %path.display(), bytes = dbml.len(), "wrote DBML schema");
    Ok(path)
}

fn persist(directory: &Path, path: &Path, contents: &str) -> Result<()> {
    fs::create_dir_all(directory)
        .with_context(|| format!("failed to create directory {}", directory.display()))?;
    fs::write(path, contents).with_context(|| format!("failed to write {}", path.display()))?;
    Ok(())
}
