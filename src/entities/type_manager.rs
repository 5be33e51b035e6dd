//! Data type manager: the platform service that knows which base types exist.
//!
//! The dialog's base-type picker and the side-panel type tree both read from
//! this registry. It is shared via `Arc` and never mutated after startup.

use indexmap::IndexMap;

use super::data_type::DataType;

/// Registry of the primitive types offered by the platform, grouped by
/// category in display order.
#[derive(Debug)]
pub struct DataTypeManager {
    categories: IndexMap<&'static str, Vec<DataType>>,
}

impl DataTypeManager {
    /// Registry with the built-in primitive categories.
    pub fn builtin() -> Self {
        let mut categories = IndexMap::new();
        categories.insert(
            "Character",
            vec![DataType::Char, DataType::Bool],
        );
        categories.insert(
            "Integer",
            vec![
                DataType::Int8,
                DataType::UInt8,
                DataType::Int16,
                DataType::UInt16,
                DataType::Int32,
                DataType::UInt32,
                DataType::Int64,
                DataType::UInt64,
            ],
        );
        categories.insert("Floating point", vec![DataType::Float, DataType::Double]);
        Self { categories }
    }

    /// Category names in display order.
    pub fn categories(&self) -> impl Iterator<Item = (&'static str, &[DataType])> {
        self.categories.iter().map(|(name, types)| (*name, types.as_slice()))
    }

    /// Every registered type, category order flattened.
    pub fn all(&self) -> Vec<DataType> {
        self.categories.values().flatten().copied().collect()
    }

    /// Types usable as bitfield storage units.
    pub fn bitfield_bases(&self) -> Vec<DataType> {
        self.all().into_iter().filter(DataType::is_integer).collect()
    }

    /// Look up a type by display name.
    pub fn find(&self, name: &str) -> Option<DataType> {
        self.all().into_iter().find(|dt| dt.name() == name)
    }
}

impl Default for DataTypeManager {
    fn default() -> Self {
        Self::builtin()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_builtin_registry() {
        let dtm = DataTypeManager::builtin();
        assert_eq!(dtm.categories().count(), 3);
        assert_eq!(dtm.find("int"), Some(DataType::Int32));
        assert_eq!(dtm.find("no-such-type"), None);
    }

    #[test]
    fn test_bitfield_bases_exclude_floats() {
        let bases = DataTypeManager::builtin().bitfield_bases();
        assert!(bases.contains(&DataType::Int32));
        assert!(!bases.contains(&DataType::Float));
        assert!(!bases.contains(&DataType::Double));
    }
}
