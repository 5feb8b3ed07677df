//! Type tags and the type-system boundary

use serde::{Deserialize, Serialize};

/// Symbolic data type tag carried by sockets and node state.
///
/// The tag is opaque to the node core: resolution and connection
/// compatibility belong to a [`TypeRegistry`] and are only consulted at
/// resync time. A tag the registry does not know is stored verbatim so a
/// document can round-trip through a build that cannot resolve it.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct TypeTag(String);

impl TypeTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Standard float tag, the default for newly created nodes
    pub fn float() -> Self {
        Self::new("Float")
    }

    /// Standard integer tag
    pub fn integer() -> Self {
        Self::new("Integer")
    }

    /// Standard boolean tag
    pub fn boolean() -> Self {
        Self::new("Boolean")
    }
}

impl std::fmt::Display for TypeTag {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for TypeTag {
    fn from(tag: &str) -> Self {
        Self::new(tag)
    }
}

/// Resolves type tags and answers connection compatibility for the graph
pub trait TypeRegistry {
    /// Whether the registry knows this tag
    fn contains(&self, tag: &TypeTag) -> bool;

    /// Whether a connection from an output of type `from` to an input of
    /// type `to` type-checks. Unknown tags never connect.
    fn can_connect(&self, from: &TypeTag, to: &TypeTag) -> bool;

    /// Tags offered by the type-selection UI, in display order
    fn tags(&self) -> Vec<TypeTag>;
}

const STANDARD_TAGS: &[&str] = &[
    "Float", "Integer", "Boolean", "Vector3", "Color", "String", "Any",
];

/// The built-in data type catalog.
///
/// `Any` connects to everything; all other tags connect only to
/// themselves.
#[derive(Debug, Clone, Copy, Default)]
pub struct StandardTypes;

impl TypeRegistry for StandardTypes {
    fn contains(&self, tag: &TypeTag) -> bool {
        STANDARD_TAGS.iter().any(|t| *t == tag.as_str())
    }

    fn can_connect(&self, from: &TypeTag, to: &TypeTag) -> bool {
        if !self.contains(from) || !self.contains(to) {
            return false;
        }
        from == to || from.as_str() == "Any" || to.as_str() == "Any"
    }

    fn tags(&self) -> Vec<TypeTag> {
        STANDARD_TAGS.iter().map(|t| TypeTag::new(*t)).collect()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_standard_tags_connect_to_themselves() {
        let types = StandardTypes;
        assert!(types.can_connect(&TypeTag::float(), &TypeTag::float()));
        assert!(!types.can_connect(&TypeTag::float(), &TypeTag::integer()));
    }

    #[test]
    fn test_any_connects_to_everything() {
        let types = StandardTypes;
        let any = TypeTag::new("Any");
        assert!(types.can_connect(&any, &TypeTag::boolean()));
        assert!(types.can_connect(&TypeTag::float(), &any));
    }

    #[test]
    fn test_unknown_tags_never_connect() {
        let types = StandardTypes;
        let unknown = TypeTag::new("Quaternion");
        assert!(!types.contains(&unknown));
        assert!(!types.can_connect(&unknown, &unknown));
        assert!(!types.can_connect(&unknown, &TypeTag::float()));
    }

    #[test]
    fn test_tag_serializes_as_plain_string() {
        let json = serde_json::to_string(&TypeTag::float()).unwrap();
        assert_eq!(json, "\"Float\"");
        let parsed: TypeTag = serde_json::from_str("\"Quaternion\"").unwrap();
        assert_eq!(parsed.as_str(), "Quaternion");
    }
}
