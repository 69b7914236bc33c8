//! Root aggregate and its staged construction.
//!
//! Construction runs three phases in a fixed order:
//!
//! 1. enums and tables (scalar/enum columns only, object fields queued),
//! 2. indexes, which may flag single columns as key or unique,
//! 3. relationships, which read those flags to find natural keys.
//!
//! Each phase is a distinct type so a later phase cannot run before an
//! earlier one.

use indexmap::IndexMap;
use tracing::debug;

use crate::dmmf::{Datamodel, Index};
use crate::enums::Enum;
use crate::error::{Error, Result};
use crate::index::TableIndex;
use crate::options::RenderOptions;
use crate::relationship::Relationship;
use crate::table::Table;

#[derive(Debug, Clone)]
pub struct Schema {
    enums: Vec<Enum>,
    tables: Vec<Table>,
    /// Keyed by relation name, in first-resolved order.
    relationships: IndexMap<String, Relationship>,
}

/// Phase 1 output: tables hold their columns, no index has been applied.
struct ColumnsBuilt {
    enums: Vec<Enum>,
    tables: Vec<Table>,
}

/// Phase 2 output: column key/unique flags are final.
struct IndexesResolved {
    enums: Vec<Enum>,
    tables: Vec<Table>,
}

impl ColumnsBuilt {
    fn new(datamodel: &Datamodel) -> Result<Self> {
        let enums: Vec<Enum> = datamodel.enums.iter().map(Enum::from_datamodel).collect();
        let tables = datamodel
            .models
            .iter()
            .map(Table::from_model)
            .collect::<Result<Vec<_>>>()?;
        debug!(enums = enums.len(), tables = tables.len(), "built tables");
        Ok(Self { enums, tables })
    }

    fn resolve_indexes(self, indexes: &[Index]) -> Result<IndexesResolved> {
        let Self { enums, mut tables } = self;
        let mut materialized = 0;
        for index in indexes {
            if TableIndex::resolve(index, &mut tables)?.is_some() {
                materialized += 1;
            }
        }
        debug!(indexes = indexes.len(), materialized, "resolved indexes");
        Ok(IndexesResolved { enums, tables })
    }
}

impl IndexesResolved {
    fn resolve_relationships(self) -> Result<Schema> {
        let Self { enums, tables } = self;
        let mut relationships = IndexMap::new();

        for table in &tables {
            for field in table.list_object_fields() {
                let Some(relation) = field.relation_name.as_deref() else {
                    return Err(Error::MissingRelationName {
                        table: table.name().to_string(),
                        field: field.name.clone(),
                    });
                };
                // Both endpoints name the relation; resolve it once.
                if relationships.contains_key(relation) {
                    continue;
                }
                let relationship = Relationship::resolve(relation, &tables)?;
                relationships.insert(relation.to_string(), relationship);
            }
        }
        debug!(relationships = relationships.len(), "resolved relationships");

        Ok(Schema {
            enums,
            tables,
            relationships,
        })
    }
}

impl Schema {
    pub fn from_datamodel(datamodel: &Datamodel) -> Result<Self> {
        ColumnsBuilt::new(datamodel)?
            .resolve_indexes(&datamodel.indexes)?
            .resolve_relationships()
    }

    pub fn enums(&self) -> &[Enum] {
        &self.enums
    }

    pub fn tables(&self) -> &[Table] {
        &self.tables
    }

    pub fn relationships(&self) -> impl Iterator<Item = &Relationship> {
        self.relationships.values()
    }

    pub fn relationship(&self, name: &str) -> Option<&Relationship> {
        self.relationships.get(name)
    }

    /// Render the whole document: tables, enums, then references.
    pub fn print(&self, opts: &RenderOptions) -> Result<String> {
        let tables: Vec<String> = self.tables.iter().map(|t| t.print(opts)).collect();
        let enums: Vec<String> = self.enums.iter().map(|e| e.print(opts)).collect();
        let relationships = self
            .relationships
            .values()
            .map(|r| r.print(&self.tables, opts))
            .collect::<Result<Vec<_>>>()?;

        let blocks = [tables.join("\n\n"), enums.join("\n\n"), relationships.join("\n")];
        Ok(blocks
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect::<Vec<_>>()
            .join("\n\n"))
    }
}
