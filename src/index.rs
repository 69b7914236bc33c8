use tracing::trace;

use crate::dmmf::{Index, IndexType};
use crate::error::{Error, Result};
use crate::table::Table;

/// A key, unique or plain index over columns of a table.
///
/// Columns are referenced by name; their flags live on the owning table.
#[derive(Debug, Clone, PartialEq)]
pub struct TableIndex {
    name: Option<String>,
    columns: Vec<String>,
    is_key: bool,
    is_unique: bool,
}

impl TableIndex {
    pub fn new(name: Option<String>, columns: Vec<String>, is_key: bool, is_unique: bool) -> Self {
        Self {
            name,
            columns,
            is_key,
            is_unique,
        }
    }

    /// Apply a raw index to its table.
    ///
    /// A key or unique index over a single column only flags that column and
    /// yields `None`. Every other index is registered on the table.
    pub fn resolve<'a>(index: &Index, tables: &'a mut [Table]) -> Result<Option<&'a TableIndex>> {
        let is_key = index.index_type == IndexType::Id;
        let is_unique = is_key || index.index_type == IndexType::Unique;

        let table = tables
            .iter_mut()
            .find(|t| t.name() == index.model)
            .ok_or_else(|| Error::TableNotFound {
                name: index.model.clone(),
            })?;

        let columns = index
            .fields
            .iter()
            .map(|field| table.column(&field.name).map(|c| c.name().to_string()))
            .collect::<Result<Vec<_>>>()?;

        if columns.is_empty() {
            return Err(Error::EmptyIndex {
                table: table.name().to_string(),
            });
        }

        if let [single] = columns.as_slice() {
            if is_key || is_unique {
                let column = table.column_mut(single)?;
                if is_key {
                    column.set_key();
                }
                if is_unique {
                    column.set_unique();
                }
                trace!(table = %index.model, column = %single, is_key, is_unique, "collapsed index into column");
                return Ok(None);
            }
        }

        table.add_index(TableIndex::new(index.name.clone(), columns, is_key, is_unique));
        Ok(table.indexes().last())
    }

    pub fn name(&self) -> Option<&str> {
        self.name.as_deref()
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    /// Index columns always print their logical names.
    pub fn print(&self) -> String {
        let mut output = format!("({})", self.columns.join(", "));

        let mut attributes = Vec::new();
        if self.is_key {
            attributes.push("pk");
        }
        if self.is_unique {
            attributes.push("unique");
        }
        if !attributes.is_empty() {
            output.push_str(&format!(" [{}]", attributes.join(", ")));
        }
        output
    }
}
