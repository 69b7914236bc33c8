//! Error taxonomy for schema construction and rendering.

use thiserror::Error;

pub type Result<T, E = Error> = std::result::Result<T, E>;

/// Coarse classification of an [`Error`].
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ErrorKind {
    /// A referenced table, column or relation endpoint does not exist.
    Lookup,
    /// A relation cannot be turned into a directional association.
    RelationShape,
    /// A field default could not be decoded.
    DefaultValue,
    /// The input document could not be decoded.
    Input,
}

#[derive(Debug, Error)]
pub enum Error {
    // Lookup failures
    #[error("table `{name}` not found")]
    TableNotFound { name: String },

    #[error("column `{column}` not found in table `{table}`")]
    ColumnNotFound { table: String, column: String },

    #[error("empty index found on table `{table}`")]
    EmptyIndex { table: String },

    #[error("could not find tables for relation `{relation}`")]
    RelationTablesNotFound { relation: String },

    #[error("found {count} tables for relation `{relation}`, expected at most 2")]
    TooManyRelationTables { relation: String, count: usize },

    #[error("table `{table}` has no object field for relation `{relation}`")]
    ObjectFieldNotFound { table: String, relation: String },

    // Relation shape failures
    #[error("object field `{table}.{field}` has no relation name")]
    MissingRelationName { table: String, field: String },

    #[error("found {count} fields for relation `{relation}`, expected 2")]
    RelationFieldCount { relation: String, count: usize },

    #[error("could not determine from and to fields of relation `{relation}`")]
    RelationDirection { relation: String },

    #[error("relation `{relation}` does not declare its referencing and referenced fields")]
    MissingRelationFields { relation: String },

    #[error("table `{table}` used by many-to-many relation `{relation}` has no key")]
    MissingNaturalKey { relation: String, table: String },

    #[error("many-to-many relation `{relation}` cannot be expanded: keys must have exactly one column")]
    CompositeManyToMany { relation: String },

    // Default value failures
    #[error("dbgenerated default of field `{field}` does not have an argument")]
    DbGeneratedMissingArgument { field: String },

    #[error("dbgenerated default of field `{field}` does not have a string argument")]
    DbGeneratedNonStringArgument { field: String },

    // Input decoding
    #[error("invalid DMMF document: {0}")]
    Json(#[from] serde_json::Error),
}

impl Error {
    pub fn kind(&self) -> ErrorKind {
        match self {
            Self::TableNotFound { .. }
            | Self::ColumnNotFound { .. }
            | Self::EmptyIndex { .. }
            | Self::RelationTablesNotFound { .. }
            | Self::TooManyRelationTables { .. }
            | Self::ObjectFieldNotFound { .. } => ErrorKind::Lookup,
            Self::MissingRelationName { .. }
            | Self::RelationFieldCount { .. }
            | Self::RelationDirection { .. }
            | Self::MissingRelationFields { .. }
            | Self::MissingNaturalKey { .. }
            | Self::CompositeManyToMany { .. } => ErrorKind::RelationShape,
            Self::DbGeneratedMissingArgument { .. } | Self::DbGeneratedNonStringArgument { .. } => {
                ErrorKind::DefaultValue
            }
            Self::Json(_) => ErrorKind::Input,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_classification() {
        let err = Error::ColumnNotFound {
            table: "User".to_string(),
            column: "email".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::Lookup);
        assert_eq!(err.to_string(), "column `email` not found in table `User`");

        let err = Error::CompositeManyToMany {
            relation: "RoleToUser".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::RelationShape);

        let err = Error::DbGeneratedMissingArgument {
            field: "id".to_string(),
        };
        assert_eq!(err.kind(), ErrorKind::DefaultValue);
    }

    #[test]
    fn test_json_error_is_input() {
        let err: Error = serde_json::from_str::<serde_json::Value>("{")
            .unwrap_err()
            .into();
        assert_eq!(err.kind(), ErrorKind::Input);
    }
}
