//! Pairing of relation endpoints into directional DBML references.
//!
//! Both sides of a relation are object fields sharing a relation name. The
//! side that declares foreign-key fields decides the direction; when both
//! sides are lists the relation is an implicit many-to-many and direction is
//! normalized by the endpoint type names.

use tracing::trace;

use crate::dmmf::Field;
use crate::error::{Error, Result};
use crate::options::RenderOptions;
use crate::table::Table;
use crate::text::{collate, pascal_to_spaced};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RelationKind {
    OneToOne,
    ManyToOne,
    ManyToMany,
}

impl RelationKind {
    fn classify(from: &Field, to: &Field) -> Self {
        match (from.is_list, to.is_list) {
            (true, true) => Self::ManyToMany,
            (false, false) => Self::OneToOne,
            _ => Self::ManyToOne,
        }
    }

    fn connector(self) -> &'static str {
        match self {
            Self::OneToOne => "-",
            Self::ManyToOne => ">",
            Self::ManyToMany => "<>",
        }
    }
}

/// A resolved relation between two tables (or a table and itself).
///
/// Tables are referenced by their position in the schema's table list and
/// columns by name.
#[derive(Debug, Clone, PartialEq)]
pub struct Relationship {
    name: String,
    from: usize,
    from_columns: Vec<String>,
    to: usize,
    to_columns: Vec<String>,
    kind: RelationKind,
    on_update: Option<String>,
    on_delete: Option<String>,
}

impl Relationship {
    /// Resolve the relation named `relation` from the pending object fields
    /// of `tables`.
    pub fn resolve(relation: &str, tables: &[Table]) -> Result<Self> {
        let (from, to) = endpoints(relation, tables)?;
        let kind = RelationKind::classify(from, to);

        // The declaring field points at the referenced table, so the tables
        // are swapped relative to the fields.
        let from_table = table_position(tables, &to.type_name)?;
        let to_table = table_position(tables, &from.type_name)?;

        let (from_columns, to_columns) = match kind {
            RelationKind::ManyToMany => (
                natural_key(relation, &tables[from_table])?,
                natural_key(relation, &tables[to_table])?,
            ),
            _ => {
                let (Some(from_fields), Some(to_fields)) =
                    (&from.relation_from_fields, &from.relation_to_fields)
                else {
                    return Err(Error::MissingRelationFields {
                        relation: relation.to_string(),
                    });
                };
                (
                    existing_columns(&tables[from_table], from_fields)?,
                    existing_columns(&tables[to_table], to_fields)?,
                )
            }
        };

        trace!(
            relation,
            ?kind,
            from = tables[from_table].name(),
            to = tables[to_table].name(),
            "resolved relationship"
        );

        Ok(Self {
            name: relation.to_string(),
            from: from_table,
            from_columns,
            to: to_table,
            to_columns,
            kind,
            on_update: from.relation_on_update.clone(),
            on_delete: from.relation_on_delete.clone(),
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> RelationKind {
        self.kind
    }

    pub fn from_columns(&self) -> &[String] {
        &self.from_columns
    }

    pub fn to_columns(&self) -> &[String] {
        &self.to_columns
    }

    /// Render the relation. `tables` must be the list it was resolved against.
    pub fn print(&self, tables: &[Table], opts: &RenderOptions) -> Result<String> {
        let (Some(from), Some(to)) = (tables.get(self.from), tables.get(self.to)) else {
            return Err(Error::RelationTablesNotFound {
                relation: self.name.clone(),
            });
        };

        if self.kind == RelationKind::ManyToMany && opts.expand_implicit_many_to_many {
            return self.print_expanded(from, to, opts);
        }

        let mut options = Vec::new();
        if let Some(action) = &self.on_update {
            options.push(format!("update: {}", pascal_to_spaced(action)));
        }
        if let Some(action) = &self.on_delete {
            options.push(format!("delete: {}", pascal_to_spaced(action)));
        }

        let from = format!("{}.{}", from.name(), print_columns(&self.from_columns));
        let to = format!("{}.{}", to.name(), print_columns(&self.to_columns));

        // DBML places the foreign key holder second in a one-to-one pair.
        let (left, right) = match self.kind {
            RelationKind::OneToOne => (to, from),
            _ => (from, to),
        };

        let mut output = format!("Ref {}: {} {} {}", self.name, left, self.kind.connector(), right);
        if !options.is_empty() {
            output.push_str(&format!(" [{}]", options.join(", ")));
        }
        Ok(output)
    }

    fn print_expanded(&self, from: &Table, to: &Table, opts: &RenderOptions) -> Result<String> {
        let ([from_key], [to_key]) = (self.from_columns.as_slice(), self.to_columns.as_slice()) else {
            return Err(Error::CompositeManyToMany {
                relation: self.name.clone(),
            });
        };

        let pivot = Table::from_relationship(&self.name, from.column(from_key)?, to.column(to_key)?);

        Ok(format!(
            "{}\n\nRef {name}: {}.{} < {pivot}.A\nRef {name}: {}.{} < {pivot}.B",
            pivot.print(opts),
            from.name(),
            from_key,
            to.name(),
            to_key,
            name = self.name,
            pivot = pivot.name(),
        ))
    }
}

/// Find the two endpoints of a relation, ordered `(from, to)`.
fn endpoints<'a>(relation: &str, tables: &'a [Table]) -> Result<(&'a Field, &'a Field)> {
    let owners: Vec<&Table> = tables
        .iter()
        .filter(|t| t.has_object_field(relation))
        .collect();
    match owners.len() {
        0 => {
            return Err(Error::RelationTablesNotFound {
                relation: relation.to_string(),
            });
        }
        1 | 2 => {}
        count => {
            return Err(Error::TooManyRelationTables {
                relation: relation.to_string(),
                count,
            });
        }
    }

    let mut fields = Vec::new();
    for table in owners {
        fields.extend(table.object_fields(relation)?);
    }
    let [first, second] = fields.as_slice() else {
        return Err(Error::RelationFieldCount {
            relation: relation.to_string(),
            count: fields.len(),
        });
    };
    let (first, second) = (*first, *second);

    if first.is_list && second.is_list {
        // Direction is arbitrary; order by type name so output is stable.
        if collate(&first.type_name, &second.type_name).is_lt() {
            return Ok((first, second));
        }
        return Ok((second, first));
    }

    match (first.declares_foreign_key(), second.declares_foreign_key()) {
        (true, false) => Ok((first, second)),
        (false, true) => Ok((second, first)),
        _ => Err(Error::RelationDirection {
            relation: relation.to_string(),
        }),
    }
}

fn table_position(tables: &[Table], name: &str) -> Result<usize> {
    tables
        .iter()
        .position(|t| t.name() == name)
        .ok_or_else(|| Error::TableNotFound {
            name: name.to_string(),
        })
}

fn natural_key(relation: &str, table: &Table) -> Result<Vec<String>> {
    let key = table.key().ok_or_else(|| Error::MissingNaturalKey {
        relation: relation.to_string(),
        table: table.name().to_string(),
    })?;
    Ok(key.iter().map(|c| c.name().to_string()).collect())
}

fn existing_columns(table: &Table, names: &[String]) -> Result<Vec<String>> {
    names
        .iter()
        .map(|name| table.column(name).map(|c| c.name().to_string()))
        .collect()
}

fn print_columns(columns: &[String]) -> String {
    match columns {
        [single] => single.clone(),
        _ => format!("({})", columns.join(", ")),
    }
}
