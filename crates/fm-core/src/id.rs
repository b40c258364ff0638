//! Interned identities for menu slots and the targets they attach to.
//!
//! Both kinds come from the rendering layer as strings on every frame and are
//! compared on every frame, so they are interned once and compared as `Spur`s.

use lasso::{Spur, ThreadedRodeo};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;
use std::sync::LazyLock;

/// Global string interner shared by menu keys and target ids.
static INTERNER: LazyLock<ThreadedRodeo> = LazyLock::new(ThreadedRodeo::default);

/// Identity of a floating menu slot (e.g. `connector-toolbar`).
///
/// One `MenuKey` owns one entry in the placement store. Internally a `Spur`
/// index: 4 bytes, `Copy`, O(1) `Eq` and `Hash`.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct MenuKey(Spur);

/// Identity of the logical target a menu slot currently represents
/// (e.g. the id of the selected connector).
///
/// When the same menu slot is reused for another target, the stabilizer
/// drops any frozen placement and recomputes.
#[derive(Clone, Copy, PartialEq, Eq, Hash)]
pub struct TargetId(Spur);

macro_rules! interned_id {
    ($ty:ident) => {
        impl $ty {
            /// Intern a string, or return the existing handle if already interned.
            pub fn intern(s: &str) -> Self {
                $ty(INTERNER.get_or_intern(s))
            }

            /// Resolve back to a string slice.
            pub fn as_str(&self) -> &str {
                INTERNER.resolve(&self.0)
            }
        }

        impl fmt::Debug for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($ty), self.as_str())
            }
        }

        /// Bare name, as it appears in log lines (`menu connector-toolbar: ...`).
        impl fmt::Display for $ty {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                f.write_str(self.as_str())
            }
        }

        impl Serialize for $ty {
            fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
                serializer.serialize_str(self.as_str())
            }
        }

        impl<'de> Deserialize<'de> for $ty {
            fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
                let s = String::deserialize(deserializer)?;
                Ok($ty::intern(&s))
            }
        }
    };
}

interned_id!(MenuKey);
interned_id!(TargetId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn same_menu_name_is_same_slot() {
        let a = MenuKey::intern("connector-toolbar");
        let b = MenuKey::intern("connector-toolbar");
        assert_eq!(a, b);
        assert_eq!(a.as_str(), "connector-toolbar");
        assert_ne!(a, MenuKey::intern("shape-toolbar"));
    }

    #[test]
    fn target_and_menu_share_names_without_mixing_types() {
        let target = TargetId::intern("shape-toolbar");
        let key = MenuKey::intern("shape-toolbar");
        assert_eq!(target.as_str(), key.as_str());
        assert_eq!(format!("{target:?}"), "TargetId(shape-toolbar)");
        assert_eq!(format!("{key:?}"), "MenuKey(shape-toolbar)");
    }

    #[test]
    fn display_is_bare_name() {
        assert_eq!(TargetId::intern("edge_1").to_string(), "edge_1");
    }

    #[test]
    fn identity_travels_as_plain_json_string() {
        let ids: Vec<TargetId> = serde_json::from_str(r#"["edge_1","edge_2"]"#).unwrap();
        assert_ne!(ids[0], ids[1]);
        assert_eq!(serde_json::to_string(&ids[1]).unwrap(), r#""edge_2""#);
    }
}
