//! Declarative schema documents.

use anyhow::{bail, Context as _, Result};
use lattice_core::{
    ArraySchema, Attribute, Datatype, Dimension, Domain, FilterList, SchemaOptions,
    DEFAULT_CAPACITY,
};
use serde::Deserialize;
use std::path::Path;

/// A schema document as written by an operator, in TOML or JSON.
#[derive(Debug, Deserialize)]
pub struct SchemaSpec {
    #[serde(default)]
    pub sparse: bool,
    #[serde(default = "default_capacity")]
    pub capacity: u64,
    #[serde(default)]
    pub allow_duplicates: bool,
    pub dimensions: Vec<DimensionSpec>,
    #[serde(default)]
    pub attributes: Vec<AttributeSpec>,
}

/// One dimension of the schema document.
#[derive(Debug, Deserialize)]
pub struct DimensionSpec {
    pub name: String,
    pub low: i32,
    pub high: i32,
    pub tile: i32,
    #[serde(default = "default_datatype")]
    pub datatype: Datatype,
}

/// One attribute of the schema document.
#[derive(Debug, Deserialize)]
pub struct AttributeSpec {
    pub name: String,
    #[serde(default = "default_datatype")]
    pub datatype: Datatype,
    #[serde(default)]
    pub var_sized: bool,
    #[serde(default)]
    pub filters: FilterList,
}

fn default_capacity() -> u64 {
    DEFAULT_CAPACITY
}

fn default_datatype() -> Datatype {
    Datatype::Int32
}

impl SchemaSpec {
    /// Load a document from disk, picking the format by file extension.
    /// Files without an extension are read as TOML.
    pub fn load(path: &Path) -> Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("failed to read {}", path.display()))?;
        match path.extension().and_then(|e| e.to_str()) {
            Some("json") => serde_json::from_str(&text).context("invalid JSON schema document"),
            Some("toml") | None => toml::from_str(&text).context("invalid TOML schema document"),
            Some(other) => bail!("unsupported schema document format: .{other}"),
        }
    }

    /// Build the typed schema this document describes.
    pub fn build(&self) -> Result<ArraySchema> {
        let mut domain = Domain::empty();
        for dim in &self.dimensions {
            domain.add_dimension(Dimension::new(
                &dim.name,
                (dim.low, dim.high),
                dim.tile,
                dim.datatype,
            )?)?;
        }

        let mut attributes = Vec::with_capacity(self.attributes.len());
        for attr in &self.attributes {
            attributes.push(Attribute::with_options(
                &attr.name,
                attr.datatype,
                attr.var_sized,
                attr.filters.clone(),
            )?);
        }

        let schema = ArraySchema::new(
            domain,
            attributes,
            SchemaOptions {
                sparse: self.sparse,
                capacity: self.capacity,
                allow_duplicates: self.allow_duplicates,
                ..SchemaOptions::default()
            },
        )?;
        Ok(schema)
    }
}
