//! Domain: the ordered set of dimensions defining a coordinate space.

use crate::dimension::Dimension;
use crate::error::{Error, Result};
use serde::{Deserialize, Serialize};

/// An array's coordinate space.
///
/// Insertion order is significant: it determines the order of coordinate
/// tuples. A domain with zero dimensions is valid at this layer; whether it
/// is usable is decided when a schema is put to work.
#[derive(Clone, Debug, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct Domain {
    dimensions: Vec<Dimension>,
}

impl Domain {
    /// An empty domain; dimensions are attached with [`Domain::add_dimension`].
    pub fn empty() -> Self {
        Self::default()
    }

    /// Build a domain from dimensions in order.
    pub fn new(dimensions: Vec<Dimension>) -> Result<Self> {
        let mut domain = Self::default();
        for dimension in dimensions {
            domain.add_dimension(dimension)?;
        }
        Ok(domain)
    }

    /// Append a dimension. Duplicate names are rejected.
    pub fn add_dimension(&mut self, dimension: Dimension) -> Result<()> {
        if self.dimensions.iter().any(|d| d.name() == dimension.name()) {
            return Err(Error::DuplicateDimension(dimension.name().to_string()));
        }
        self.dimensions.push(dimension);
        Ok(())
    }

    /// Number of dimensions.
    pub fn ndim(&self) -> usize {
        self.dimensions.len()
    }

    pub fn is_empty(&self) -> bool {
        self.dimensions.is_empty()
    }

    /// Dimensions in insertion order.
    pub fn dimensions(&self) -> &[Dimension] {
        &self.dimensions
    }

    /// Look up a dimension by name.
    pub fn dimension(&self, name: &str) -> Option<&Dimension> {
        self.dimensions.iter().find(|d| d.name() == name)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::datatype::Datatype;

    fn dim(name: &str) -> Dimension {
        Dimension::new(name, (1, 100), 10, Datatype::Int32).unwrap()
    }

    #[test]
    fn test_empty_domain_is_valid() {
        let domain = Domain::new(Vec::new()).unwrap();
        assert_eq!(domain.ndim(), 0);
        assert!(domain.is_empty());
    }

    #[test]
    fn test_insertion_order_preserved() {
        let domain = Domain::new(vec![dim("rows"), dim("cols"), dim("depth")]).unwrap();
        let names: Vec<&str> = domain.dimensions().iter().map(|d| d.name()).collect();
        assert_eq!(names, ["rows", "cols", "depth"]);
        assert_eq!(domain.dimension("cols").unwrap().name(), "cols");
        assert!(domain.dimension("missing").is_none());
    }

    #[test]
    fn test_duplicate_dimension_name_rejected() {
        let mut domain = Domain::empty();
        domain.add_dimension(dim("rows")).unwrap();
        match domain.add_dimension(dim("rows")) {
            Err(Error::DuplicateDimension(name)) => assert_eq!(name, "rows"),
            other => panic!("expected DuplicateDimension, got {other:?}"),
        }
        assert_eq!(domain.ndim(), 1);
    }
}
