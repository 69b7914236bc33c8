/// Rendering switches threaded through every `print` call.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct RenderOptions {
    /// Prefer mapped database names for tables, columns, enums and enum values.
    pub use_alias: bool,
    /// Prefer the backend-specific column type when one is declared.
    pub use_native_type: bool,
    /// Render implicit many-to-many relations as a pivot table plus two refs.
    pub expand_implicit_many_to_many: bool,
}

impl RenderOptions {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn use_alias(mut self, value: bool) -> Self {
        self.use_alias = value;
        self
    }

    pub fn use_native_type(mut self, value: bool) -> Self {
        self.use_native_type = value;
        self
    }

    pub fn expand_implicit_many_to_many(mut self, value: bool) -> Self {
        self.expand_implicit_many_to_many = value;
        self
    }

    /// Pick the mapped name over the logical one when aliasing is enabled.
    pub(crate) fn display_name<'a>(&self, name: &'a str, alias: Option<&'a str>) -> &'a str {
        match alias {
            Some(alias) if self.use_alias && !alias.is_empty() => alias,
            _ => name,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_is_all_off() {
        let opts = RenderOptions::new();
        assert!(!opts.use_alias);
        assert!(!opts.use_native_type);
        assert!(!opts.expand_implicit_many_to_many);
    }

    #[test]
    fn test_display_name() {
        let plain = RenderOptions::new();
        let aliased = RenderOptions::new().use_alias(true);

        assert_eq!(plain.display_name("User", Some("users")), "User");
        assert_eq!(aliased.display_name("User", Some("users")), "users");
        assert_eq!(aliased.display_name("User", None), "User");
    }
}
