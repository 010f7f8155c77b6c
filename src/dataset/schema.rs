//! Attribute declarations.
//!
//! A [`Schema`] is fixed when a dataset is built. Each attribute carries its
//! declared [`AttributeKind`] and ordinal position, so operations check types
//! against the schema instead of inspecting values.

use crate::error::{DescryError, Result};
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::fmt;

#[derive(Clone, Copy, Deserialize, Serialize, PartialEq, Eq, Hash, Debug)]
#[serde(rename_all = "lowercase")]
pub enum AttributeKind {
    Numeric,
    Categorical,
}

impl AttributeKind {
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Numeric => "numeric",
            Self::Categorical => "categorical",
        }
    }
}

impl fmt::Display for AttributeKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

/// A named column with a declared type and fixed position.
#[derive(Clone, Deserialize, Serialize, PartialEq, Eq, Debug)]
pub struct Attribute {
    pub name: String,
    pub kind: AttributeKind,
    pub position: usize,
    /// Declared level set for categorical attributes. `None` means the levels
    /// are whatever distinct values the data contains.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub levels: Option<Vec<String>>,
}

impl Attribute {
    pub fn is_numeric(&self) -> bool {
        self.kind == AttributeKind::Numeric
    }
}

#[derive(Clone, Default, Deserialize, Serialize, PartialEq, Eq, Debug)]
pub struct Schema {
    attributes: Vec<Attribute>,
}

impl Schema {
    pub fn builder() -> SchemaBuilder {
        SchemaBuilder::default()
    }

    /// Builds a schema from `(name, kind)` pairs in position order.
    ///
    /// # Errors
    ///
    /// Returns [`DescryError::InvalidSchema`] on duplicate or empty names.
    pub fn from_pairs<S: Into<String>>(
        pairs: impl IntoIterator<Item = (S, AttributeKind)>,
    ) -> Result<Self> {
        pairs
            .into_iter()
            .fold(Self::builder(), |b, (name, kind)| b.attribute(name, kind))
            .build()
    }

    pub fn len(&self) -> usize {
        self.attributes.len()
    }

    pub fn is_empty(&self) -> bool {
        self.attributes.is_empty()
    }

    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn get(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name == name)
    }

    pub fn position(&self, name: &str) -> Option<usize> {
        self.get(name).map(|a| a.position)
    }

    /// Looks up an attribute by name, failing with `SchemaMismatch`.
    ///
    /// # Errors
    ///
    /// Returns [`DescryError::SchemaMismatch`] when no attribute has that name.
    pub fn require(&self, name: &str) -> Result<&Attribute> {
        self.get(name).ok_or_else(|| DescryError::SchemaMismatch {
            attribute: name.to_owned(),
        })
    }

    pub fn names(&self) -> impl Iterator<Item = &str> {
        self.attributes.iter().map(|a| a.name.as_str())
    }

    pub fn numeric_attributes(&self) -> impl Iterator<Item = &Attribute> {
        self.attributes.iter().filter(|a| a.is_numeric())
    }
}

/// Incrementally declares attributes; positions follow declaration order.
#[derive(Default, Debug)]
pub struct SchemaBuilder {
    attributes: Vec<Attribute>,
}

impl SchemaBuilder {
    #[must_use]
    pub fn attribute(mut self, name: impl Into<String>, kind: AttributeKind) -> Self {
        let position = self.attributes.len();
        self.attributes.push(Attribute {
            name: name.into(),
            kind,
            position,
            levels: None,
        });
        self
    }

    #[must_use]
    pub fn numeric(self, name: impl Into<String>) -> Self {
        self.attribute(name, AttributeKind::Numeric)
    }

    #[must_use]
    pub fn categorical(self, name: impl Into<String>) -> Self {
        self.attribute(name, AttributeKind::Categorical)
    }

    /// Declares a categorical attribute whose values must come from `levels`.
    /// Level order is kept as given.
    #[must_use]
    pub fn factor<S: Into<String>>(
        mut self,
        name: impl Into<String>,
        levels: impl IntoIterator<Item = S>,
    ) -> Self {
        let position = self.attributes.len();
        self.attributes.push(Attribute {
            name: name.into(),
            kind: AttributeKind::Categorical,
            position,
            levels: Some(levels.into_iter().map(Into::into).collect()),
        });
        self
    }

    /// # Errors
    ///
    /// Returns [`DescryError::InvalidSchema`] for empty or duplicate attribute
    /// names and for duplicate declared levels.
    pub fn build(self) -> Result<Schema> {
        let mut seen = HashSet::new();
        for attr in &self.attributes {
            if attr.name.is_empty() {
                return Err(DescryError::InvalidSchema(format!(
                    "attribute at position {} has an empty name",
                    attr.position
                )));
            }
            if !seen.insert(attr.name.as_str()) {
                return Err(DescryError::InvalidSchema(format!(
                    "duplicate attribute name '{}'",
                    attr.name
                )));
            }
            if let Some(levels) = &attr.levels {
                let mut level_set = HashSet::new();
                if let Some(dup) = levels.iter().find(|l| !level_set.insert(l.as_str())) {
                    return Err(DescryError::InvalidSchema(format!(
                        "attribute '{}' declares level '{dup}' twice",
                        attr.name
                    )));
                }
            }
        }
        Ok(Schema {
            attributes: self.attributes,
        })
    }
}
