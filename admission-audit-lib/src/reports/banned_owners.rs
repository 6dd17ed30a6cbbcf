use crate::admission::{GroupKind, GroupVersionKind};

const fn kind(group: &'static str, kind: &'static str) -> GroupKind<'static> {
    GroupKind { group, kind }
}

/// Resource kinds that never get reports attached to them.
///
/// Events and reports are excluded so that reporting on them cannot feed back
/// into itself; review kinds are excluded because they are never persisted.
pub const BANNED_OWNERS: &[GroupKind<'static>] = &[
    kind("", "Event"),
    kind("events.k8s.io", "Event"),
    kind("wgpolicyk8s.io", "PolicyReport"),
    kind("wgpolicyk8s.io", "ClusterPolicyReport"),
    kind("openreports.io", "Report"),
    kind("openreports.io", "ClusterReport"),
    kind("reports.kyverno.io", "EphemeralReport"),
    kind("reports.kyverno.io", "ClusterEphemeralReport"),
    kind("authentication.k8s.io", "TokenReview"),
    kind("authentication.k8s.io", "SelfSubjectReview"),
    kind("authorization.k8s.io", "SubjectAccessReview"),
    kind("authorization.k8s.io", "SelfSubjectAccessReview"),
    kind("authorization.k8s.io", "LocalSubjectAccessReview"),
    kind("authorization.k8s.io", "SelfSubjectRulesReview"),
];

/// Whether resources of this kind may own reports. The version is ignored.
#[must_use]
pub fn is_kind_supported(gvk: &GroupVersionKind) -> bool {
    let group_kind = gvk.group_kind();
    !BANNED_OWNERS.iter().any(|banned| *banned == group_kind)
}
