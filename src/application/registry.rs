//! Schema registry: the model's declared feature order.

use std::collections::HashSet;
use std::sync::Arc;

use crate::domain::{Column, SchemaDescription};

/// Errors building a schema from a model's feature list.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SchemaError {
    #[error("Model declares no features")]
    Empty,

    #[error("Model declares feature {0:?} more than once")]
    Duplicate(String),

    #[error("Model declares unknown feature {0:?}")]
    UnknownFeature(String),
}

/// Ordered feature names resolved against the column catalogue.
///
/// Built once at startup and never mutated afterwards.
#[derive(Debug, Clone, PartialEq)]
pub struct SchemaRegistry {
    names: Arc<[String]>,
    columns: Vec<Column>,
}

impl SchemaRegistry {
    /// Resolve a declared feature list.
    ///
    /// # Errors
    /// Returns `SchemaError` if the list is empty, repeats a name, or names
    /// a column the normalizer cannot produce.
    pub fn from_feature_names<S: AsRef<str>>(names: &[S]) -> Result<Self, SchemaError> {
        if names.is_empty() {
            return Err(SchemaError::Empty);
        }

        let mut seen = HashSet::with_capacity(names.len());
        let mut columns = Vec::with_capacity(names.len());
        for name in names {
            let name = name.as_ref();
            let column = Column::from_header(name)
                .ok_or_else(|| SchemaError::UnknownFeature(name.to_string()))?;
            if !seen.insert(column) {
                return Err(SchemaError::Duplicate(name.to_string()));
            }
            columns.push(column);
        }

        let names: Vec<String> = names.iter().map(|n| n.as_ref().to_string()).collect();
        Ok(Self {
            names: names.into(),
            columns,
        })
    }

    /// The full training schema in catalogue order.
    #[must_use]
    pub fn full() -> Self {
        let names: Vec<String> = Column::ALL.iter().map(|c| c.header().to_string()).collect();
        Self {
            names: names.into(),
            columns: Column::ALL.to_vec(),
        }
    }

    #[must_use]
    pub fn feature_names(&self) -> &[String] {
        &self.names
    }

    /// Shared handle to the names, for building vectors without copying.
    #[must_use]
    pub fn shared_names(&self) -> Arc<[String]> {
        Arc::clone(&self.names)
    }

    #[must_use]
    pub fn columns(&self) -> &[Column] {
        &self.columns
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.columns.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.columns.is_empty()
    }

    #[must_use]
    pub fn describe(&self) -> SchemaDescription {
        SchemaDescription {
            count: self.len(),
            names: self.names.to_vec(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_full_schema() {
        let schema = SchemaRegistry::full();
        assert_eq!(schema.len(), 43);
        assert_eq!(schema.feature_names()[2], " Age (yrs)");
        assert_eq!(schema.describe().count, 43);
    }

    #[test]
    fn test_preserves_declared_order() {
        let schema = SchemaRegistry::from_feature_names(&["BMI", " Age (yrs)", "Blood Group"])
            .expect("Should resolve");
        assert_eq!(schema.columns(), &[Column::Bmi, Column::Age, Column::BloodGroup]);
        assert_eq!(schema.describe().names, vec!["BMI", " Age (yrs)", "Blood Group"]);
    }

    #[test]
    fn test_rejects_bad_schemas() {
        let empty: [&str; 0] = [];
        assert_eq!(SchemaRegistry::from_feature_names(&empty), Err(SchemaError::Empty));
        assert_eq!(
            SchemaRegistry::from_feature_names(&["BMI", "BMI"]),
            Err(SchemaError::Duplicate("BMI".into()))
        );
        assert_eq!(
            SchemaRegistry::from_feature_names(&["BMI", "Shoe size"]),
            Err(SchemaError::UnknownFeature("Shoe size".into()))
        );
    }
}
