//! Data model document as produced by Prisma's schema introspection (DMMF).
//!
//! Only the parts consumed by the DBML builder are modeled; unknown keys are
//! ignored so newer documents keep decoding.

use serde::Deserialize;
use serde_json::Value;

#[derive(Debug, Clone, Default, Deserialize)]
pub struct Document {
    pub datamodel: Datamodel,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Datamodel {
    #[serde(default)]
    pub enums: Vec<DatamodelEnum>,
    #[serde(default)]
    pub models: Vec<Model>,
    #[serde(default)]
    pub indexes: Vec<Index>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Model {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub documentation: Option<String>,
    #[serde(default)]
    pub fields: Vec<Field>,
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum FieldKind {
    #[default]
    Scalar,
    Object,
    Enum,
    #[serde(other)]
    Unsupported,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Field {
    pub name: String,
    pub kind: FieldKind,
    #[serde(rename = "type")]
    pub type_name: String,
    /// Backend type name and its arguments, e.g. `["Decimal", ["65", "30"]]`.
    pub native_type: Option<(String, Vec<String>)>,
    pub db_name: Option<String>,
    pub is_list: bool,
    pub is_required: bool,
    pub is_unique: bool,
    pub is_id: bool,
    pub default: Option<FieldDefault>,
    pub documentation: Option<String>,

    // Relation fields
    pub relation_name: Option<String>,
    pub relation_from_fields: Option<Vec<String>>,
    pub relation_to_fields: Option<Vec<String>>,
    pub relation_on_update: Option<String>,
    pub relation_on_delete: Option<String>,
}

impl Field {
    pub fn is_object(&self) -> bool {
        self.kind == FieldKind::Object
    }

    /// True when the field names the foreign-key columns of its relation.
    pub fn declares_foreign_key(&self) -> bool {
        self.relation_from_fields
            .as_ref()
            .is_some_and(|fields| !fields.is_empty())
    }
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum FieldDefault {
    // Tried before `Function`, which would also accept a sequence.
    List(Vec<DefaultScalar>),
    /// A generator such as `now()`, `autoincrement()` or `dbgenerated("...")`.
    Function(DefaultFunction),
    Scalar(DefaultScalar),
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct DefaultFunction {
    pub name: String,
    #[serde(default)]
    pub args: Vec<Value>,
}

#[derive(Debug, Clone, PartialEq, Deserialize)]
#[serde(untagged)]
pub enum DefaultScalar {
    Bool(bool),
    Number(serde_json::Number),
    String(String),
}

impl std::fmt::Display for DefaultScalar {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Bool(b) => write!(f, "{}", b),
            Self::Number(n) => write!(f, "{}", n),
            Self::String(s) => f.write_str(s),
        }
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum IndexType {
    Id,
    Unique,
    /// `normal`, `fulltext` and any other non-constraint index.
    #[default]
    #[serde(other)]
    Plain,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Index {
    pub model: String,
    #[serde(rename = "type", default)]
    pub index_type: IndexType,
    #[serde(default)]
    pub name: Option<String>,
    #[serde(default)]
    pub fields: Vec<IndexField>,
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct IndexField {
    pub name: String,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DatamodelEnum {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
    #[serde(default)]
    pub values: Vec<EnumValue>,
}

#[derive(Debug, Clone, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct EnumValue {
    pub name: String,
    #[serde(default)]
    pub db_name: Option<String>,
}

/// Decode a DMMF document from its JSON text.
pub fn parse_document(input: &str) -> crate::Result<Document> {
    Ok(serde_json::from_str(input)?)
}


#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_field() {
        let field: Field = serde_json::from_str(
            r#"{
                "name": "decimal",
                "kind": "scalar",
                "isList": false,
                "isRequired": true,
                "isUnique": false,
                "isId": false,
                "isReadOnly": false,
                "hasDefaultValue": false,
                "type": "Decimal",
                "nativeType": ["Decimal", ["65", "30"]],
                "isGenerated": false,
                "isUpdatedAt": false
            }"#,
        )
        .unwrap();

        assert_eq!(field.kind, FieldKind::Scalar);
        assert_eq!(field.type_name, "Decimal");
        assert_eq!(
            field.native_type,
            Some(("Decimal".to_string(), vec!["65".to_string(), "30".to_string()]))
        );
        assert!(field.is_required);
        assert!(field.default.is_none());
    }

    #[test]
    fn test_parse_defaults() {
        let parse = |s: &str| serde_json::from_str::<FieldDefault>(s).unwrap();

        assert_eq!(
            parse(r#"{"name": "now", "args": []}"#),
            FieldDefault::Function(DefaultFunction {
                name: "now".to_string(),
                args: vec![],
            })
        );
        assert_eq!(
            parse(r#"["here", "there"]"#),
            FieldDefault::List(vec![
                DefaultScalar::String("here".to_string()),
                DefaultScalar::String("there".to_string()),
            ])
        );
        assert_eq!(parse("true"), FieldDefault::Scalar(DefaultScalar::Bool(true)));
        assert_eq!(
            parse(r#""VIEWER""#),
            FieldDefault::Scalar(DefaultScalar::String("VIEWER".to_string()))
        );
        assert!(matches!(parse("42"), FieldDefault::Scalar(DefaultScalar::Number(_))));
    }

    #[test]
    fn test_parse_index_types() {
        let parse = |s: &str| serde_json::from_str::<IndexType>(s).unwrap();
        assert_eq!(parse(r#""id""#), IndexType::Id);
        assert_eq!(parse(r#""unique""#), IndexType::Unique);
        assert_eq!(parse(r#""normal""#), IndexType::Plain);
        assert_eq!(parse(r#""fulltext""#), IndexType::Plain);
    }

    #[test]
    fn test_declares_foreign_key() {
        let mut field = Field::default();
        assert!(!field.declares_foreign_key());
        field.relation_from_fields = Some(vec![]);
        assert!(!field.declares_foreign_key());
        field.relation_from_fields = Some(vec!["roleId".to_string()]);
        assert!(field.declares_foreign_key());
    }

    #[test]
    fn test_parse_document_ignores_unknown_keys() {
        let doc = parse_document(
            r#"{
                "datamodel": {
                    "enums": [],
                    "models": [{"name": "User", "dbName": null, "schema": null, "fields": [], "primaryKey": null}],
                    "types": [],
                    "indexes": []
                },
                "schema": {},
                "mappings": {}
            }"#,
        )
        .unwrap();
        assert_eq!(doc.datamodel.models.len(), 1);
        assert_eq!(doc.datamodel.models[0].name, "User");
    }
}
