use std::fmt;

use super::Attributes;

/// Where a variable lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum VariableScope {
    /// Local to one platform.
    Platform(String),
    /// Shared by the whole design.
    Global,
}

impl VariableScope {
    pub fn platform(name: impl Into<String>) -> Self {
        Self::Platform(name.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Self::Platform(_) => "platform variable",
            Self::Global => "global variable",
        }
    }
}

impl fmt::Display for VariableScope {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Platform(name) => write!(f, "platform {}", name),
            Self::Global => write!(f, "design"),
        }
    }
}

/// The single content pair a variable carries.
///
/// The value is routed as given; pre-encrypted payloads are never touched.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct VariableContent<'a> {
    pub value: &'a str,
    pub secure: bool,
}

impl<'a> VariableContent<'a> {
    pub fn new(value: &'a str, secure: bool) -> Self {
        Self { value, secure }
    }

    /// Attribute key the value goes into.
    pub fn value_key(&self) -> &'static str {
        if self.secure {
            "encrypted_value"
        } else {
            "value"
        }
    }

    /// Attribute key that must not be present alongside [`Self::value_key`].
    pub fn excluded_key(&self) -> &'static str {
        if self.secure {
            "value"
        } else {
            "encrypted_value"
        }
    }

    pub fn overrides(&self) -> Attributes {
        let mut attrs = Attributes::new();
        attrs.insert("secure".to_string(), self.secure.to_string());
        attrs.insert(self.value_key().to_string(), self.value.to_string());
        attrs
    }
}
