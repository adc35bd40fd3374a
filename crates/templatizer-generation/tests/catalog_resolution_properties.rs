//! Property-based tests for token catalog resolution
//! Covers casing derivations, namespace formatting and input validation.

use proptest::prelude::*;
use templatizer_generation::{
    resolve_catalog, BaseInputs, Derivation, GenerationError, TokenCatalog,
};

/// Strategy for generating arbitrary non-empty names, including non-ASCII
fn any_name_strategy() -> impl Strategy<Value = String> {
    "\\PC{1,16}"
}

/// Strategy for generating namespace segments
fn segment_strategy() -> impl Strategy<Value = String> {
    "[a-zA-Z][a-zA-Z0-9_]{0,7}".prop_map(|s| s.to_string())
}

proptest! {
    /// Property: NAME-UPCASE and NAME-LOWCASE are the ASCII case transforms of NAME
    #[test]
    fn prop_casing_derivations(name in any_name_strategy()) {
        let resolved = resolve_catalog(&BaseInputs::new(name.clone())).unwrap();

        prop_assert_eq!(resolved.get("NAME").unwrap(), name.as_str());
        prop_assert_eq!(resolved.get("NAME-UPCASE").unwrap(), name.to_ascii_uppercase());
        prop_assert_eq!(resolved.get("NAME-LOWCASE").unwrap(), name.to_ascii_lowercase());
    }

    /// Property: casing preserves character count for every character class
    #[test]
    fn prop_casing_preserves_length(name in any_name_strategy()) {
        let resolved = resolve_catalog(&BaseInputs::new(name.clone())).unwrap();
        prop_assert_eq!(resolved.get("NAME-UPCASE").unwrap().len(), name.len());
        prop_assert_eq!(resolved.get("NAME-LOWCASE").unwrap().len(), name.len());
    }

    /// Property: namespace tokens have one separator per segment and are empty for an empty path
    #[test]
    fn prop_namespace_formatting(
        segments in prop::collection::vec(segment_strategy(), 0..5),
    ) {
        let inputs = BaseInputs::new("Widget").with_namespace(segments.clone());
        let resolved = resolve_catalog(&inputs).unwrap();

        let include = resolved.get("NAMESPACE-INC").unwrap();
        let open = resolved.get("NAMESPACE-OPEN").unwrap();

        prop_assert_eq!(include.matches('/').count(), segments.len());
        prop_assert_eq!(open.matches("::").count(), segments.len());
        prop_assert_eq!(include.is_empty(), segments.is_empty());
        prop_assert_eq!(open.is_empty(), segments.is_empty());
        prop_assert_eq!(include, include.to_ascii_lowercase());

        let reopened: Vec<&str> = open.split("::").filter(|s| !s.is_empty()).collect();
        prop_assert_eq!(reopened, segments.iter().map(String::as_str).collect::<Vec<_>>());
    }

    /// Property: resolution succeeds for every non-empty name, blank or not
    #[test]
    fn prop_whitespace_name_resolves(name in "[ \\t]{1,4}") {
        let catalog = resolve_catalog(&BaseInputs::new(name.clone())).unwrap();
        prop_assert_eq!(catalog.get("NAME"), Some(name.as_str()));
    }

    /// Property: only the empty name fails, with InvalidInput on `name`
    #[test]
    fn prop_empty_name_fails(namespace in prop::collection::vec(segment_strategy(), 0..3)) {
        let result = resolve_catalog(&BaseInputs::new("").with_namespace(namespace));
        let is_name_error = matches!(
            result,
            Err(GenerationError::InvalidInput { ref field, .. }) if field == "name"
        );
        prop_assert!(is_name_error);
    }

    /// Property: every registered token resolves
    #[test]
    fn prop_every_token_resolves(
        name in any_name_strategy(),
        constant in "[A-Z][A-Z-]{0,6}[A-Z]",
        value in "\\PC{0,12}",
    ) {
        let mut catalog = TokenCatalog::new();
        prop_assume!(!catalog.contains(&constant));
        catalog.register(constant.clone(), Derivation::Constant(value.clone())).unwrap();

        let resolved = catalog.resolve(&BaseInputs::new(name)).unwrap();
        prop_assert_eq!(resolved.len(), catalog.len());
        prop_assert_eq!(resolved.get(&constant).unwrap(), value.as_str());
    }
}
