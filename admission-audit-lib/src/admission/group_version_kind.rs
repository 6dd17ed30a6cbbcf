use core::fmt;
use serde::{Deserialize, Serialize};

/// Identifies a resource schema: API group, version and kind.
///
/// The core API group is the empty string.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq, Eq, Hash, Default)]
pub struct GroupVersionKind {
    #[serde(default)]
    pub group: String,
    pub version: String,
    pub kind: String,
}

impl GroupVersionKind {
    #[must_use]
    pub fn new(group: impl Into<String>, version: impl Into<String>, kind: impl Into<String>) -> Self {
        Self {
            group: group.into(),
            version: version.into(),
            kind: kind.into(),
        }
    }

    /// The version-independent part of the identity.
    #[must_use]
    pub fn group_kind(&self) -> GroupKind<'_> {
        GroupKind {
            group: &self.group,
            kind: &self.kind,
        }
    }
}

impl fmt::Display for GroupVersionKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}/{}", self.version, self.kind)
        } else {
            write!(f, "{}/{}/{}", self.group, self.version, self.kind)
        }
    }
}

/// An API group and kind, without a version.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct GroupKind<'a> {
    pub group: &'a str,
    pub kind: &'a str,
}

impl fmt::Display for GroupKind<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        if self.group.is_empty() {
            write!(f, "{}", self.kind)
        } else {
            write!(f, "{}.{}", self.kind, self.group)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_group_kind_drops_version() {
        let v1 = GroupVersionKind::new("apps", "v1", "Deployment");
        let v1beta1 = GroupVersionKind::new("apps", "v1beta1", "Deployment");
        assert_eq!(v1.group_kind(), v1beta1.group_kind());
    }

    #[test]
    fn test_display() {
        assert_eq!(GroupVersionKind::new("apps", "v1", "Deployment").to_string(), "apps/v1/Deployment");
        assert_eq!(GroupVersionKind::new("", "v1", "Pod").to_string(), "v1/Pod");
        assert_eq!(GroupVersionKind::new("", "v1", "Pod").group_kind().to_string(), "Pod");
        assert_eq!(
            GroupVersionKind::new("events.k8s.io", "v1", "Event").group_kind().to_string(),
            "Event.events.k8s.io"
        );
    }

    #[test]
    fn test_deserialize_core_group_may_be_omitted() {
        let gvk: GroupVersionKind = serde_json::from_str(r#"{"version": "v1", "kind": "ConfigMap"}"#).unwrap();
        assert_eq!(gvk, GroupVersionKind::new("", "v1", "ConfigMap"));
    }
}
