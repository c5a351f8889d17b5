//! Resource-name normalization and per-type fetch capabilities.

/// Alternate spellings accepted on search-style endpoints, mapped to the
/// canonical names the API expects. Fetch-by-id endpoints use the caller's
/// literal spelling and never consult this table.
const SEARCH_ALIASES: &[(&str, &str)] = &[
    ("tag-elements", "tag-element"),
    ("tags-elements", "tag-element"),
    ("elements-tags", "elements-tag"),
    ("assets", "asset"),
    ("documents", "document"),
    ("objects", "object"),
    ("tags", "tag"),
];

/// Query extension each resource type accepts on fetch-by-id requests.
const FETCH_EXTENSIONS: &[(&str, &str)] = &[
    ("object", "inheritance"),
    ("asset", "light"),
    ("image", "light"),
];

/// Resolve a search resource name, falling back to the caller's spelling
/// when no alias matches.
#[must_use]
pub fn canonical_search_name(resource: &str) -> &str {
    SEARCH_ALIASES
        .iter()
        .find(|(alias, _)| *alias == resource)
        .map_or(resource, |(_, name)| *name)
}

/// The query extension a resource type supports on fetch-by-id, if any.
pub(crate) fn fetch_extension(resource: &str) -> Option<&'static str> {
    FETCH_EXTENSIONS
        .iter()
        .find(|(name, _)| *name == resource)
        .map(|(_, extension)| *extension)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn aliases_resolve_to_canonical_names() {
        assert_eq!(canonical_search_name("objects"), "object");
        assert_eq!(canonical_search_name("assets"), "asset");
        assert_eq!(canonical_search_name("documents"), "document");
        assert_eq!(canonical_search_name("tags"), "tag");
        assert_eq!(canonical_search_name("tag-elements"), "tag-element");
        assert_eq!(canonical_search_name("tags-elements"), "tag-element");
        assert_eq!(canonical_search_name("elements-tags"), "elements-tag");
    }

    #[test]
    fn unknown_names_pass_through() {
        assert_eq!(canonical_search_name("object"), "object");
        assert_eq!(canonical_search_name("classificationstore"), "classificationstore");
    }

    #[test]
    fn extensions_are_gated_by_resource_type() {
        assert_eq!(fetch_extension("object"), Some("inheritance"));
        assert_eq!(fetch_extension("asset"), Some("light"));
        assert_eq!(fetch_extension("image"), Some("light"));
        assert_eq!(fetch_extension("document"), None);
    }
}
