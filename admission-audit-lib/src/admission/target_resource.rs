/// Read-only view of the object an admission request acts upon.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TargetResource<'a> {
    object: &'a serde_json::Value,
}

impl<'a> TargetResource<'a> {
    #[must_use]
    pub const fn new(object: &'a serde_json::Value) -> Self {
        Self { object }
    }

    #[must_use]
    pub const fn object(&self) -> &'a serde_json::Value {
        self.object
    }

    /// The object's `metadata.uid`, if present and non-empty.
    #[must_use]
    pub fn uid(&self) -> Option<&'a str> {
        self.object
            .pointer("/metadata/uid")
            .and_then(serde_json::Value::as_str)
            .filter(|uid| !uid.is_empty())
    }
}
