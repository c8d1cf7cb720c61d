//! Name resolution for option descriptors.

use std::collections::HashMap;

use crate::error::{ParseError, Result};
use crate::option::OptionSpec;

/// Maps every short and long name to the index of its descriptor.
///
/// Built fresh for each parse call. Both names of one descriptor resolve to
/// the same index.
///
/// # Examples
///
/// ```
/// use argument_parser_core::{OptionRegistry, OptionSpec};
///
/// let (mut a, mut b) = (0, String::new());
/// let options = vec![
///     OptionSpec::int(Some('a'), Some("as"), &mut a),
///     OptionSpec::string(Some('b'), None, &mut b),
/// ];
/// let registry = OptionRegistry::build(&options).unwrap();
/// assert_eq!(registry.resolve("a"), Some(0));
/// assert_eq!(registry.resolve("as"), Some(0));
/// assert_eq!(registry.resolve("b"), Some(1));
/// assert_eq!(registry.len(), 3);
/// ```
#[derive(Debug, Default, Clone)]
pub struct OptionRegistry {
    names: HashMap<String, usize>,
}

impl OptionRegistry {
    /// Builds the registry.
    ///
    /// # Errors
    ///
    /// Returns [`ParseError::DuplicateName`] at the first name (short or long,
    /// within or across descriptors) seen a second time.
    pub fn build(options: &[OptionSpec<'_>]) -> Result<Self> {
        let mut names = HashMap::new();

        for (index, option) in options.iter().enumerate() {
            for name in option.names() {
                if names.contains_key(&name) {
                    return Err(ParseError::DuplicateName(name));
                }
                names.insert(name, index);
            }
        }

        Ok(Self { names })
    }

    /// Returns the descriptor index for a name.
    pub fn resolve(&self, name: &str) -> Option<usize> {
        self.names.get(name).copied()
    }

    /// Number of registered names (not descriptors).
    pub fn len(&self) -> usize {
        self.names.len()
    }

    pub fn is_empty(&self) -> bool {
        self.names.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::ErrorKind;
    use crate::option::Binding;

    #[test]
    fn test_no_options() {
        let registry = OptionRegistry::build(&[]).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_unnamed_options_are_skipped() {
        let options = vec![OptionSpec::new(None, None, Binding::Bool(None))];
        let registry = OptionRegistry::build(&options).unwrap();
        assert!(registry.is_empty());
    }

    #[test]
    fn test_duplicate_long_name() {
        let options = vec![
            OptionSpec::new(Some('a'), Some("same"), Binding::Int(None)),
            OptionSpec::new(Some('b'), Some("same"), Binding::Int(None)),
        ];
        let err = OptionRegistry::build(&options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
        assert!(err.to_string().contains("same"));
    }

    #[test]
    fn test_duplicate_short_name() {
        let options = vec![
            OptionSpec::new(Some('a'), Some("alpha"), Binding::Int(None)),
            OptionSpec::new(Some('a'), Some("apple"), Binding::Int(None)),
        ];
        let err = OptionRegistry::build(&options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
    }

    #[test]
    fn test_short_long_collision_across_descriptors() {
        let options = vec![
            OptionSpec::new(Some('x'), None, Binding::Bool(None)),
            OptionSpec::new(None, Some("x"), Binding::Bool(None)),
        ];
        let err = OptionRegistry::build(&options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
    }

    #[test]
    fn test_same_name_within_descriptor() {
        let options = vec![OptionSpec::new(Some('v'), Some("v"), Binding::Bool(None))];
        let err = OptionRegistry::build(&options).unwrap_err();
        assert_eq!(err.kind(), ErrorKind::DuplicateName);
    }

    #[test]
    fn test_ok_names() {
        let options = vec![
            OptionSpec::new(Some('a'), Some("as"), Binding::Int(None)),
            OptionSpec::new(Some('b'), Some("bs"), Binding::Int(None)),
        ];
        let registry = OptionRegistry::build(&options).unwrap();

        for (name, index) in [("a", 0), ("as", 0), ("b", 1), ("bs", 1)] {
            assert_eq!(registry.resolve(name), Some(index), "name: {name}");
        }
        assert_eq!(registry.resolve("c"), None);
    }
}
