//! Newtype wrappers for semantic IDs and URIs
//!
//! These keep anchor identifiers (heading and link targets) apart from resource
//! URIs (images) so the two cannot be mixed up in generator signatures.

use serde::{Deserialize, Serialize};
use std::fmt;
use std::hash::Hash;
use std::sync::Arc;

macro_rules! string_id {
    ($(#[$meta:meta])* $name:ident) => {
        $(#[$meta])*
        #[derive(Debug, Clone, Eq, PartialEq, Hash, Serialize, Deserialize)]
        #[serde(transparent)]
        pub struct $name(Arc<str>);

        impl $name {
            pub fn new(value: impl Into<Arc<str>>) -> Self {
                Self(value.into())
            }

            pub fn as_str(&self) -> &str {
                &self.0
            }
        }

        impl From<String> for $name {
            fn from(s: String) -> Self {
                Self(s.into())
            }
        }

        impl From<&str> for $name {
            fn from(s: &str) -> Self {
                Self(s.into())
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }

        impl fmt::Display for $name {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(&self.0)
            }
        }
    };
}

string_id! {
    /// An identifier for a document anchor (heading targets, internal links, page citations).
    AnchorId
}

string_id! {
    /// A relative path or URI of an external resource such as an image.
    ResourceUri
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_anchor_id_creation() {
        let id1 = AnchorId::new("section-1");
        let id2 = AnchorId::from("section-1");
        let id3 = AnchorId::from(String::from("section-1"));

        assert_eq!(id1, id2);
        assert_eq!(id2, id3);
        assert_eq!(id1.as_str(), "section-1");
        assert_eq!(id1.to_string(), "section-1");
    }

    #[test]
    fn test_resource_uri_creation() {
        let uri1 = ResourceUri::new("images/logo.png");
        let uri2 = ResourceUri::from("images/logo.png");

        assert_eq!(uri1, uri2);
        assert_eq!(uri1.as_str(), "images/logo.png");
    }

    #[test]
    fn test_ids_serialize_as_plain_strings() {
        let id: AnchorId = serde_json::from_str("\"intro\"").unwrap();
        assert_eq!(id.as_str(), "intro");
        assert_eq!(serde_json::to_string(&id).unwrap(), "\"intro\"");
    }
}
