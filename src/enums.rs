use crate::dmmf::{DatamodelEnum, EnumValue as DmmfEnumValue};
use crate::options::RenderOptions;

#[derive(Debug, Clone, PartialEq)]
pub struct EnumValue {
    name: String,
    alias: Option<String>,
}

impl EnumValue {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
        }
    }

    fn from_datamodel(value: &DmmfEnumValue) -> Self {
        Self::new(value.name.clone(), value.db_name.clone())
    }

    pub fn print(&self, opts: &RenderOptions) -> String {
        opts.display_name(&self.name, self.alias.as_deref()).to_string()
    }
}

/// An enumeration with values in declaration order.
#[derive(Debug, Clone, PartialEq)]
pub struct Enum {
    name: String,
    alias: Option<String>,
    values: Vec<EnumValue>,
}

impl Enum {
    pub fn new(name: impl Into<String>, alias: Option<String>) -> Self {
        Self {
            name: name.into(),
            alias,
            values: Vec::new(),
        }
    }

    pub fn from_datamodel(enumeration: &DatamodelEnum) -> Self {
        let mut e = Self::new(enumeration.name.clone(), enumeration.db_name.clone());
        for value in &enumeration.values {
            e.add_value(EnumValue::from_datamodel(value));
        }
        e
    }

    pub fn add_value(&mut self, value: EnumValue) {
        self.values.push(value);
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn print(&self, opts: &RenderOptions) -> String {
        let values: Vec<String> = self
            .values
            .iter()
            .map(|v| format!("  {}", v.print(opts)))
            .collect();
        format!(
            "enum {} {{\n{}\n}}",
            opts.display_name(&self.name, self.alias.as_deref()),
            values.join("\n")
        )
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn role() -> Enum {
        let mut e = Enum::new("Role", Some("role".to_string()));
        e.add_value(EnumValue::new("VIEWER", Some("viewer".to_string())));
        e.add_value(EnumValue::new("EDITOR", None));
        e
    }

    #[test]
    fn test_print_enum() {
        assert_eq!(role().print(&RenderOptions::new()), "enum Role {\n  VIEWER\n  EDITOR\n}");
    }

    #[test]
    fn test_print_enum_with_alias() {
        assert_eq!(
            role().print(&RenderOptions::new().use_alias(true)),
            "enum role {\n  viewer\n  EDITOR\n}"
        );
    }

    #[test]
    fn test_from_datamodel_keeps_order() {
        let e = Enum::from_datamodel(&DatamodelEnum {
            name: "Status".to_string(),
            db_name: None,
            values: ["B", "A", "C"]
                .iter()
                .map(|name| DmmfEnumValue {
                    name: name.to_string(),
                    db_name: None,
                })
                .collect(),
        });
        assert_eq!(e.name(), "Status");
        assert_eq!(e.print(&RenderOptions::new()), "enum Status {\n  B\n  A\n  C\n}");
    }

    #[test]
    fn test_print_empty_enum() {
        assert_eq!(Enum::new("Empty", None).print(&RenderOptions::new()), "enum Empty {\n\n}");
    }
}
