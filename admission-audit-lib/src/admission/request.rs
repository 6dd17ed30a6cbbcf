use super::{GroupVersionKind, Operation, TargetResource};
use crate::Result;
use ohno::IntoAppError;
use serde::{Deserialize, Serialize};

/// One intercepted admission request.
///
/// Field names follow the Kubernetes `admission.k8s.io/v1` `AdmissionRequest`.
#[derive(Serialize, Deserialize, Debug, Clone, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct AdmissionOperation {
    #[serde(default)]
    pub uid: String,
    pub kind: GroupVersionKind,
    pub operation: Operation,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub dry_run: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub namespace: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub name: Option<String>,
    #[serde(default)]
    pub object: serde_json::Value,
    #[serde(default)]
    pub old_object: serde_json::Value,
}

#[derive(Deserialize)]
#[serde(untagged)]
enum Envelope {
    Review { request: AdmissionOperation },
    Request(AdmissionOperation),
}

impl AdmissionOperation {
    #[must_use]
    pub fn new(kind: GroupVersionKind, operation: Operation) -> Self {
        Self {
            uid: String::new(),
            kind,
            operation,
            dry_run: None,
            namespace: None,
            name: None,
            object: serde_json::Value::Null,
            old_object: serde_json::Value::Null,
        }
    }

    /// Decode either a bare `AdmissionRequest` or an `AdmissionReview` carrying one.
    ///
    /// # Errors
    ///
    /// Returns an error if the content is not a JSON admission request.
    pub fn from_json(content: &[u8]) -> Result<Self> {
        let envelope: Envelope = serde_json::from_slice(content).into_app_err("decoding admission request")?;
        Ok(match envelope {
            Envelope::Review { request } | Envelope::Request(request) => request,
        })
    }

    /// A null `dryRun` counts as `false`.
    #[must_use]
    pub fn is_dry_run(&self) -> bool {
        self.dry_run.unwrap_or(false)
    }

    /// The object being acted upon; for deletions this is the old object.
    #[must_use]
    pub fn target(&self) -> TargetResource<'_> {
        if self.operation == Operation::Delete && self.object.is_null() {
            TargetResource::new(&self.old_object)
        } else {
            TargetResource::new(&self.object)
        }
    }
}
