use indexmap::IndexMap;

use crate::column::Column;
use crate::dmmf::{Field, Model};
use crate::error::{Error, Result};
use crate::index::TableIndex;
use crate::options::RenderOptions;
use crate::text::escape_note;

/// A model rendered as a DBML table.
#[derive(Debug, Clone)]
pub struct Table {
    name: String,
    alias: Option<String>,
    note: Option<String>,
    /// Keyed by logical column name, in declaration order.
    columns: IndexMap<String, Column>,
    indexes: Vec<TableIndex>,
    /// Relation endpoints waiting to be paired into relationships.
    object_fields: Vec<Field>,
}

impl Table {
    pub fn new(name: impl Into<String>, alias: Option<String>, note: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
            note,
            columns: IndexMap::new(),
            indexes: Vec::new(),
            object_fields: Vec::new(),
        }
    }

    /// Build a table holding the scalar and enum columns of a model.
    /// Object fields are queued for relationship resolution.
    pub fn from_model(model: &Model) -> Result<Self> {
        let mut table = Self::new(model.name.clone(), model.db_name.clone(), model.documentation.clone());

        for field in &model.fields {
            if field.is_object() {
                table.object_fields.push(field.clone());
            } else {
                table.add_column(Column::from_field(field)?);
            }
        }

        Ok(table)
    }

    /// Pivot table for an implicit many-to-many relation.
    pub fn from_relationship(name: &str, from: &Column, to: &Column) -> Self {
        let mut table = Self::new(name, None, None);
        table.add_column(Column::new("A", from.type_name()));
        table.add_column(Column::new("B", to.type_name()));
        table.add_index(TableIndex::new(
            None,
            vec!["A".to_string(), "B".to_string()],
            false,
            true,
        ));
        table.add_index(TableIndex::new(None, vec!["B".to_string()], false, false));
        table
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn add_column(&mut self, column: Column) {
        self.columns.insert(column.name().to_string(), column);
    }

    pub fn columns(&self) -> impl Iterator<Item = &Column> {
        self.columns.values()
    }

    pub fn column(&self, name: &str) -> Result<&Column> {
        self.columns.get(name).ok_or_else(|| self.column_not_found(name))
    }

    pub(crate) fn column_mut(&mut self, name: &str) -> Result<&mut Column> {
        if !self.columns.contains_key(name) {
            return Err(self.column_not_found(name));
        }
        Ok(&mut self.columns[name])
    }

    fn column_not_found(&self, name: &str) -> Error {
        Error::ColumnNotFound {
            table: self.name.clone(),
            column: name.to_string(),
        }
    }

    pub fn add_index(&mut self, index: TableIndex) {
        self.indexes.push(index);
    }

    pub fn indexes(&self) -> &[TableIndex] {
        &self.indexes
    }

    /// The natural key: a key index's columns, else the single key column.
    pub fn key(&self) -> Option<Vec<&Column>> {
        if let Some(index) = self.indexes.iter().find(|idx| idx.is_key()) {
            return index
                .columns()
                .iter()
                .map(|name| self.columns.get(name))
                .collect();
        }
        self.columns
            .values()
            .find(|c| c.is_key())
            .map(|column| vec![column])
    }

    pub fn has_object_field(&self, relation: &str) -> bool {
        self.object_fields
            .iter()
            .any(|f| f.relation_name.as_deref() == Some(relation))
    }

    pub fn list_object_fields(&self) -> &[Field] {
        &self.object_fields
    }

    pub fn object_fields(&self, relation: &str) -> Result<Vec<&Field>> {
        let fields: Vec<&Field> = self
            .object_fields
            .iter()
            .filter(|f| f.relation_name.as_deref() == Some(relation))
            .collect();
        if fields.is_empty() {
            return Err(Error::ObjectFieldNotFound {
                table: self.name.clone(),
                relation: relation.to_string(),
            });
        }
        Ok(fields)
    }

    pub fn print(&self, opts: &RenderOptions) -> String {
        let columns: Vec<String> = self
            .columns
            .values()
            .map(|c| format!("  {}", c.print(opts)))
            .collect();
        let columns = columns.join("\n");

        let mut indexes = String::new();
        if !self.indexes.is_empty() {
            let lines: Vec<String> = self
                .indexes
                .iter()
                .map(|idx| format!("    {}", idx.print()))
                .collect();
            indexes = format!("  indexes {{\n{}\n  }}", lines.join("\n"));
        }

        let mut note = String::new();
        if let Some(text) = self.note.as_deref().filter(|n| !n.is_empty()) {
            note = format!("  Note: \"{}\"", escape_note(text));
        }

        let blocks: Vec<&str> = [columns.as_str(), indexes.as_str(), note.as_str()]
            .into_iter()
            .filter(|block| !block.is_empty())
            .collect();

        format!(
            "Table {} {{\n{}\n}}",
            opts.display_name(&self.name, self.alias.as_deref()),
            blocks.join("\n\n")
        )
    }
}
