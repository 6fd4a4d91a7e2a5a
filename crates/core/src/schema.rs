//! Array schema: domain, attributes and layout settings.

use crate::attribute::Attribute;
use crate::domain::Domain;
use crate::error::{Error, Result};
use crate::filter::FilterList;
use crate::layout::Layout;
use serde::{Deserialize, Serialize};

/// Default cell capacity of a space tile, matching the engine default.
pub const DEFAULT_CAPACITY: u64 = 10_000;

/// Dense or sparse array.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum ArrayType {
    /// A value is stored for every coordinate in the domain.
    Dense,
    /// Only explicitly written coordinates are stored.
    Sparse,
}

/// Layout, capacity and sparsity settings for schema construction.
#[derive(Clone, Debug)]
pub struct SchemaOptions {
    /// Requested cell order within a tile.
    pub cell_order: Layout,
    /// Requested tile order within the array.
    pub tile_order: Layout,
    /// Sparse-tile cell capacity. Stored with the schema, not yet applied.
    pub capacity: u64,
    /// Filter pipeline for coordinate tiles. Stored, not yet applied.
    pub coords_filters: FilterList,
    /// Filter pipeline for variable-size offset tiles. Stored, not yet applied.
    pub offsets_filters: FilterList,
    /// Whether sparse writes may repeat a coordinate. Stored, not yet applied.
    pub allow_duplicates: bool,
    /// Build a sparse schema instead of a dense one.
    pub sparse: bool,
}

impl Default for SchemaOptions {
    fn default() -> Self {
        Self {
            cell_order: Layout::RowMajor,
            tile_order: Layout::RowMajor,
            capacity: DEFAULT_CAPACITY,
            coords_filters: FilterList::default(),
            offsets_filters: FilterList::default(),
            allow_duplicates: false,
            sparse: false,
        }
    }
}

/// The complete structural definition of an array, sealed before any data
/// is stored. This document is what the engine persists at create time and
/// hands back when an array is opened.
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct ArraySchema {
    array_type: ArrayType,
    domain: Domain,
    attributes: Vec<Attribute>,
    cell_order: Layout,
    tile_order: Layout,
    capacity: u64,
    #[serde(default)]
    coords_filters: FilterList,
    #[serde(default)]
    offsets_filters: FilterList,
    #[serde(default)]
    allow_duplicates: bool,
}

impl ArraySchema {
    /// Compose a schema from a domain and attributes.
    ///
    /// Duplicate attribute names are rejected. Requested cell and tile
    /// orders are normalized to row-major before the schema is sealed.
    // TODO: honor options.cell_order/tile_order once the engine accepts
    // layouts other than row-major.
    pub fn new(
        domain: Domain,
        attributes: Vec<Attribute>,
        options: SchemaOptions,
    ) -> Result<Self> {
        for (i, attribute) in attributes.iter().enumerate() {
            if attributes[..i].iter().any(|a| a.name() == attribute.name()) {
                return Err(Error::DuplicateAttribute(attribute.name().to_string()));
            }
        }

        Ok(Self {
            array_type: if options.sparse {
                ArrayType::Sparse
            } else {
                ArrayType::Dense
            },
            domain,
            attributes,
            cell_order: Layout::RowMajor,
            tile_order: Layout::RowMajor,
            capacity: options.capacity,
            coords_filters: options.coords_filters,
            offsets_filters: options.offsets_filters,
            allow_duplicates: options.allow_duplicates,
        })
    }

    pub fn array_type(&self) -> ArrayType {
        self.array_type
    }

    pub fn is_sparse(&self) -> bool {
        self.array_type == ArrayType::Sparse
    }

    pub fn domain(&self) -> &Domain {
        &self.domain
    }

    /// Attributes in insertion order.
    pub fn attributes(&self) -> &[Attribute] {
        &self.attributes
    }

    pub fn attribute_count(&self) -> usize {
        self.attributes.len()
    }

    /// Look up an attribute by name.
    pub fn attribute(&self, name: &str) -> Option<&Attribute> {
        self.attributes.iter().find(|a| a.name() == name)
    }

    pub fn cell_order(&self) -> Layout {
        self.cell_order
    }

    pub fn tile_order(&self) -> Layout {
        self.tile_order
    }

    pub fn capacity(&self) -> u64 {
        self.capacity
    }

    pub fn allows_duplicates(&self) -> bool {
        self.allow_duplicates
    }

    pub fn coords_filters(&self) -> &FilterList {
        &self.coords_filters
    }

    pub fn offsets_filters(&self) -> &FilterList {
        &self.offsets_filters
    }
}
