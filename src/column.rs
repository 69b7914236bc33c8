use serde_json::Value;

use crate::dmmf::{DefaultScalar, Field, FieldDefault};
use crate::error::{Error, Result};
use crate::options::RenderOptions;
use crate::text::{escape_note, native_type_to_string};

/// Generator whose single argument is a raw database expression.
const DB_GENERATED: &str = "dbgenerated";
const AUTO_INCREMENT: &str = "autoincrement";

/// One attribute of a table.
#[derive(Debug, Clone, PartialEq)]
pub struct Column {
    name: String,
    alias: Option<String>,
    type_name: String,
    native_type: Option<String>,
    /// Pre-formatted DBML literal or backtick expression.
    default: Option<String>,
    is_list: bool,
    is_key: bool,
    is_unique: bool,
    is_nullable: bool,
    is_increment: bool,
    note: Option<String>,
}

impl Column {
    /// A required, non-list column with no attributes beyond `not null`.
    pub fn new(name: impl Into<String>, type_name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            alias: None,
            type_name: type_name.into(),
            native_type: None,
            default: None,
            is_list: false,
            is_key: false,
            is_unique: false,
            is_nullable: false,
            is_increment: false,
            note: None,
        }
    }

    pub fn from_field(field: &Field) -> Result<Self> {
        let default = field
            .default
            .as_ref()
            .map(|d| default_to_string(d, &field.name))
            .transpose()?;
        let is_increment = field.default.as_ref().is_some_and(is_auto_increment);

        Ok(Self {
            name: field.name.clone(),
            alias: field.db_name.clone(),
            type_name: field.type_name.clone(),
            native_type: field
                .native_type
                .as_ref()
                .map(|(name, args)| native_type_to_string(name, args)),
            default: if is_increment { None } else { default },
            is_list: field.is_list,
            is_key: field.is_id,
            is_unique: field.is_id || field.is_unique,
            is_nullable: !field.is_required,
            is_increment,
            note: field.documentation.clone(),
        })
    }

    pub fn alias(mut self, alias: impl Into<String>) -> Self {
        self.alias = Some(alias.into());
        self
    }

    pub fn native_type(mut self, native_type: impl Into<String>) -> Self {
        self.native_type = Some(native_type.into());
        self
    }

    /// Set a pre-formatted default. Ignored on auto-incrementing columns.
    pub fn default_value(mut self, value: impl Into<String>) -> Self {
        if !self.is_increment {
            self.default = Some(value.into());
        }
        self
    }

    pub fn list(mut self) -> Self {
        self.is_list = true;
        self
    }

    pub fn nullable(mut self) -> Self {
        self.is_nullable = true;
        self
    }

    pub fn increment(mut self) -> Self {
        self.is_increment = true;
        self.default = None;
        self
    }

    pub fn note(mut self, note: impl Into<String>) -> Self {
        self.note = Some(note.into());
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn type_name(&self) -> &str {
        &self.type_name
    }

    pub fn is_key(&self) -> bool {
        self.is_key
    }

    pub fn is_unique(&self) -> bool {
        self.is_unique
    }

    pub(crate) fn set_key(&mut self) {
        self.is_key = true;
    }

    pub(crate) fn set_unique(&mut self) {
        self.is_unique = true;
    }

    pub fn print(&self, opts: &RenderOptions) -> String {
        let name = opts.display_name(&self.name, self.alias.as_deref());
        let type_name = match &self.native_type {
            Some(native) if opts.use_native_type && !native.is_empty() => native,
            _ => &self.type_name,
        };
        let mut output = format!("{} {}", name, type_name);
        if self.is_list {
            output.push_str("[]");
        }

        let mut attributes = Vec::new();
        if self.is_key {
            attributes.push("primary key".to_string());
        }
        if self.is_unique {
            attributes.push("unique".to_string());
        }
        if !self.is_nullable {
            attributes.push("not null".to_string());
        }
        if self.is_increment {
            attributes.push("increment".to_string());
        }
        if let Some(default) = self.default.as_deref().filter(|d| !d.is_empty()) {
            attributes.push(format!("default: {}", default));
        }
        if let Some(note) = self.note.as_deref().filter(|n| !n.is_empty()) {
            attributes.push(format!("note: \"{}\"", escape_note(note)));
        }

        if !attributes.is_empty() {
            output.push_str(&format!(" [{}]", attributes.join(", ")));
        }
        output
    }
}

fn is_auto_increment(default: &FieldDefault) -> bool {
    matches!(default, FieldDefault::Function(f) if f.name == AUTO_INCREMENT && f.args.is_empty())
}

/// Format a field default as a DBML default value.
fn default_to_string(default: &FieldDefault, field: &str) -> Result<String> {
    match default {
        FieldDefault::Scalar(DefaultScalar::String(s)) => Ok(format!("\"{}\"", s)),
        FieldDefault::Scalar(scalar) => Ok(scalar.to_string()),
        FieldDefault::List(values) => {
            let values: Vec<String> = values.iter().map(ToString::to_string).collect();
            Ok(format!("`[{}]`", values.join(", ")))
        }
        FieldDefault::Function(f) if f.name == DB_GENERATED => match f.args.first() {
            Some(Value::String(expr)) if !expr.is_empty() => Ok(format!("`{}`", expr)),
            None | Some(Value::Null) | Some(Value::String(_)) => Err(Error::DbGeneratedMissingArgument {
                field: field.to_string(),
            }),
            Some(_) => Err(Error::DbGeneratedNonStringArgument {
                field: field.to_string(),
            }),
        },
        FieldDefault::Function(f) if f.args.is_empty() => Ok(format!("`{}()`", f.name)),
        FieldDefault::Function(f) => {
            let args: Vec<String> = f.args.iter().map(arg_to_string).collect();
            Ok(format!("`{}({})`", f.name, args.join(", ")))
        }
    }
}

fn arg_to_string(arg: &Value) -> String {
    match arg {
        Value::String(s) => s.clone(),
        other => other.to_string(),
    }
}
