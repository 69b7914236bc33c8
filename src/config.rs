//! Generator configuration as declared in a Prisma `generator` block.
//!
//! Prisma hands every option over as a string, so flags are compared against
//! their literal spelling.

use std::collections::HashMap;
use std::path::PathBuf;

use crate::options::RenderOptions;

pub const DEFAULT_DIRECTORY: &str = "./";
pub const DEFAULT_FILENAME: &str = "schema.dbml";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct GeneratorConfig {
    pub directory: PathBuf,
    pub filename: String,
    pub use_alias: bool,
    pub use_native_type: bool,
    pub expand_implicit_many_to_many: bool,
}

impl Default for GeneratorConfig {
    fn default() -> Self {
        Self {
            directory: PathBuf::from(DEFAULT_DIRECTORY),
            filename: DEFAULT_FILENAME.to_string(),
            use_alias: false,
            use_native_type: false,
            expand_implicit_many_to_many: true,
        }
    }
}

impl GeneratorConfig {
    pub fn new() -> Self {
        Self::default()
    }

    /// Read the string options of a generator block.
    ///
    /// The file lands in `directory`, or `./` when unset. Prisma's resolved
    /// `output` for the generator is not consulted.
    pub fn from_map(config: &HashMap<String, String>) -> Self {
        let defaults = Self::default();
        let get = |key: &str| config.get(key).map(String::as_str);

        Self {
            directory: get("directory")
                .map(PathBuf::from)
                .unwrap_or(defaults.directory),
            filename: get("filename")
                .map(str::to_string)
                .unwrap_or(defaults.filename),
            use_alias: get("useAlias") == Some("true"),
            use_native_type: get("useNativeType") == Some("true"),
            expand_implicit_many_to_many: get("expandImplicitManyToMany") != Some("false"),
        }
    }

    pub fn directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.directory = directory.into();
        self
    }

    pub fn filename(mut self, filename: impl Into<String>) -> Self {
        self.filename = filename.into();
        self
    }

    pub fn output_path(&self) -> PathBuf {
        self.directory.join(&self.filename)
    }

    pub fn render_options(&self) -> RenderOptions {
        RenderOptions::new()
            .use_alias(self.use_alias)
            .use_native_type(self.use_native_type)
            .expand_implicit_many_to_many(self.expand_implicit_many_to_many)
    }
}
