//! Attribute: a named, typed data field stored per cell.

use crate::datatype::Datatype;
use crate::error::{Error, Result};
use crate::filter::FilterList;
use serde::{Deserialize, Serialize};

/// A named, typed data field stored for every written cell, distinct from
/// the cell's coordinates. Immutable once constructed.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct Attribute {
    name: String,
    datatype: Datatype,
    cell_val_num: u32,
    var_sized: bool,
    #[serde(default)]
    filters: FilterList,
}

impl Attribute {
    /// A fixed-size, filter-free attribute.
    pub fn new(name: impl Into<String>, datatype: Datatype) -> Result<Self> {
        Self::with_options(name, datatype, false, FilterList::default())
    }

    /// An attribute with variable-size and filter settings.
    ///
    /// `var_sized` and `filters` are recorded on the attribute but not yet
    /// forwarded to the engine; the cell value count stays fixed at 1.
    pub fn with_options(
        name: impl Into<String>,
        datatype: Datatype,
        var_sized: bool,
        filters: FilterList,
    ) -> Result<Self> {
        let name = name.into();
        if name.is_empty() {
            return Err(Error::EmptyName { kind: "attribute" });
        }
        datatype.ensure_supported()?;

        Ok(Self {
            name,
            datatype,
            cell_val_num: 1,
            var_sized,
            filters,
        })
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn datatype(&self) -> Datatype {
        self.datatype
    }

    /// Values stored per cell. Currently always 1.
    pub fn cell_val_num(&self) -> u32 {
        self.cell_val_num
    }

    pub fn is_var_sized(&self) -> bool {
        self.var_sized
    }

    pub fn filters(&self) -> &FilterList {
        &self.filters
    }
}
