use std::collections::{BTreeMap, HashMap};

use parking_lot::RwLock;
use tracing::debug;

use crate::ast::LiteralType;
use crate::error::{Result, RuleError};

/// Attribute name to literal type, fixed by the first comparison that uses
/// the attribute.
///
/// One registry is shared by every rule compiled against it and consulted
/// again at evaluation time. Entries are never removed. The map sits behind
/// a lock so one registry can serve parses and evaluations on several
/// threads; [`TypeRegistry::declare`] checks and inserts under a single write
/// lock.
#[derive(Debug, Default)]
pub struct TypeRegistry {
    types: RwLock<HashMap<String, LiteralType>>,
}

impl TypeRegistry {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn get(&self, attribute: &str) -> Option<LiteralType> {
        self.types.read().get(attribute).copied()
    }

    /// Records `literal_type` for `attribute`, or checks it against the type
    /// already recorded.
    ///
    /// # Errors
    ///
    /// [`RuleError::Type`] when the attribute is already registered with the
    /// other type.
    pub fn declare(&self, attribute: &str, literal_type: LiteralType) -> Result<()> {
        let mut types = self.types.write();
        match types.get(attribute) {
            Some(&declared) if declared == literal_type => Ok(()),
            Some(&declared) => Err(RuleError::Type {
                attribute: attribute.to_string(),
                value: literal_type.to_string(),
                reference: declared.to_string(),
            }),
            None => {
                debug!(attribute, %literal_type, "registered attribute type");
                types.insert(attribute.to_string(), literal_type);
                Ok(())
            }
        }
    }

    pub fn len(&self) -> usize {
        self.types.read().len()
    }

    pub fn is_empty(&self) -> bool {
        self.types.read().is_empty()
    }

    /// Sorted copy of the current entries.
    pub fn snapshot(&self) -> BTreeMap<String, LiteralType> {
        self.types
            .read()
            .iter()
            .map(|(name, ty)| (name.clone(), *ty))
            .collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;
    use std::thread;

    #[test]
    fn test_first_declaration_wins() {
        let registry = TypeRegistry::new();
        assert!(registry.is_empty());

        registry.declare("age", LiteralType::Number).unwrap();
        registry.declare("age", LiteralType::Number).unwrap();
        assert_eq!(registry.get("age"), Some(LiteralType::Number));

        let err = registry.declare("age", LiteralType::String).unwrap_err();
        assert_eq!(
            err,
            RuleError::Type {
                attribute: "age".into(),
                value: "STRING".into(),
                reference: "NUMBER".into(),
            }
        );
        assert_eq!(registry.get("age"), Some(LiteralType::Number));
        assert_eq!(registry.len(), 1);
    }

    #[test]
    fn test_snapshot_is_sorted() {
        let registry = TypeRegistry::new();
        registry.declare("salary", LiteralType::Number).unwrap();
        registry.declare("department", LiteralType::String).unwrap();

        let names: Vec<_> = registry.snapshot().into_keys().collect();
        assert_eq!(names, vec!["department", "salary"]);
    }

    #[test]
    fn test_concurrent_declarations_agree() {
        let registry = Arc::new(TypeRegistry::new());

        let handles: Vec<_> = (0..8)
            .map(|i| {
                let registry = Arc::clone(&registry);
                thread::spawn(move || {
                    let ty = if i % 2 == 0 {
                        LiteralType::Number
                    } else {
                        LiteralType::String
                    };
                    registry.declare("shared", ty).is_ok()
                })
            })
            .collect();

        let accepted: Vec<bool> = handles.into_iter().map(|h| h.join().unwrap()).collect();
        let winner = registry.get("shared").unwrap();

        // Exactly the threads that asked for the winning type succeeded.
        for (i, ok) in accepted.into_iter().enumerate() {
            let asked = if i % 2 == 0 {
                LiteralType::Number
            } else {
                LiteralType::String
            };
            assert_eq!(ok, asked == winner);
        }
    }
}
