//! Operation extraction from the `paths` section.

use serde_json::Value;

/// HTTP methods that name operations in a path item.
pub const HTTP_METHODS: &[&str] = &["get", "head", "post", "put", "patch", "delete", "options"];

/// Prefix of vendor extension keys.
pub const EXTENSION_PREFIX: &str = "x-";

/// Operation-level marker that removes an operation from linting.
pub const EXCLUDE_MARKER: &str = "x-sdk-exclude";

/// One operation found under `paths`.
#[derive(Debug, Clone, Copy)]
pub struct OperationRef<'a> {
    /// Path template, e.g. `/pets/{id}`.
    pub path: &'a str,
    /// Lowercase method key as written in the document.
    pub method: &'a str,
    /// The operation node. May be a non-mapping in malformed documents.
    pub node: &'a Value,
}

impl<'a> OperationRef<'a> {
    /// Field of the operation, absent when the operation is not a mapping.
    pub fn field(&self, name: &str) -> Option<&'a Value> {
        self.node.as_object().and_then(|obj| obj.get(name))
    }

    /// Locator for a field of this operation: `paths.<path>.<method>.<field>`.
    pub fn locate(&self, field: &str) -> String {
        format!("paths.{}.{}.{}", self.path, self.method, field)
    }

    fn is_excluded(&self) -> bool {
        self.field(EXCLUDE_MARKER).and_then(|v| v.as_bool()) == Some(true)
    }
}

/// Iterate every lintable operation in document order.
///
/// Extension keys under `paths` are skipped without looking inside them.
/// Path items that are not mappings are skipped, as are unknown keys within a
/// path item and operations marked with `x-sdk-exclude: true`.
pub fn operations(root: &Value) -> impl Iterator<Item = OperationRef<'_>> {
    root.get("paths")
        .and_then(|v| v.as_object())
        .into_iter()
        .flat_map(|paths| paths.iter())
        .filter(|(path, _)| {
            let extension = path.starts_with(EXTENSION_PREFIX);
            if extension {
                tracing::trace!(key = %path, "skipping extension key under paths");
            }
            !extension
        })
        .filter_map(|(path, item)| item.as_object().map(|obj| (path, obj)))
        .flat_map(|(path, item)| {
            item.iter()
                .filter(|(method, _)| HTTP_METHODS.contains(&method.as_str()))
                .map(move |(method, node)| OperationRef {
                    path: path.as_str(),
                    method: method.as_str(),
                    node,
                })
        })
        .filter(|op| {
            let excluded = op.is_excluded();
            if excluded {
                tracing::trace!(path = op.path, method = op.method, "operation excluded");
            }
            !excluded
        })
}

/// Visit every lintable operation, synchronously and in document order.
pub fn for_each_operation<'a, F>(root: &'a Value, mut visit: F)
where
    F: FnMut(OperationRef<'a>),
{
    for op in operations(root) {
        visit(op);
    }
}
