//! Operation rules.
//!
//! Each rule reads a single operation (and, for pointers and global defaults,
//! the document root) and reports zero or more [`Finding`]s. Rules do not
//! depend on each other; the order in [`Rule::ALL`] only fixes the order in
//! which findings are emitted.

use std::fmt;

use serde_json::Value;

use crate::document::{field_presence, presence, resolve};
use crate::lint::Finding;
use crate::operations::OperationRef;

/// The operation rules, in evaluation order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Rule {
    /// PUT and POST must declare what they consume.
    ConsumesRequired,
    /// GET must not declare `consumes`.
    ConsumesForbidden,
    /// Every operation except HEAD must declare what it produces.
    ProducesRequired,
    OperationIdRequired,
    SummaryRequired,
    /// GET responses must not return a top-level array.
    NoArrayResponses,
    /// Required parameters come before optional ones.
    ParameterOrder,
}

impl Rule {
    pub const ALL: [Rule; 7] = [
        Rule::ConsumesRequired,
        Rule::ConsumesForbidden,
        Rule::ProducesRequired,
        Rule::OperationIdRequired,
        Rule::SummaryRequired,
        Rule::NoArrayResponses,
        Rule::ParameterOrder,
    ];

    /// Configuration key of the rule.
    pub fn key(self) -> &'static str {
        match self {
            Rule::ConsumesRequired => "no_consumes_for_put_or_post",
            Rule::ConsumesForbidden => "get_op_has_consumes",
            Rule::ProducesRequired => "no_produces",
            Rule::OperationIdRequired => "no_operation_id",
            Rule::SummaryRequired => "no_summary",
            Rule::NoArrayResponses => "no_array_responses",
            Rule::ParameterOrder => "parameter_order",
        }
    }

    pub fn from_key(key: &str) -> Option<Self> {
        Rule::ALL.into_iter().find(|rule| rule.key() == key)
    }

    /// Message attached to every finding of the rule.
    pub fn message(self) -> &'static str {
        match self {
            Rule::ConsumesRequired => {
                "PUT and POST operations must have a non-empty `consumes` field."
            }
            Rule::ConsumesForbidden => "GET operations should not specify a consumes field.",
            Rule::ProducesRequired => "Operations must have a non-empty `produces` field.",
            Rule::OperationIdRequired => "Operations must have a non-empty `operationId`.",
            Rule::SummaryRequired => "Operations must have a non-empty `summary` field.",
            Rule::NoArrayResponses => {
                "Arrays MUST NOT be returned as the top-level structure in a response body."
            }
            Rule::ParameterOrder => {
                "Required parameters should appear before optional parameters."
            }
        }
    }

    /// Run the rule against one operation.
    pub fn check(self, op: &OperationRef<'_>, root: &Value) -> Vec<Finding> {
        match self {
            Rule::ConsumesRequired => check_consumes_required(op, root),
            Rule::ConsumesForbidden => check_consumes_forbidden(op),
            Rule::ProducesRequired => check_produces_required(op, root),
            Rule::OperationIdRequired => check_non_empty(op, "operationId", self),
            Rule::SummaryRequired => check_non_empty(op, "summary", self),
            Rule::NoArrayResponses => check_array_responses(op, root),
            Rule::ParameterOrder => check_parameter_order(op, root),
        }
    }

    fn finding(self, path: String) -> Finding {
        Finding {
            path,
            message: self.message().to_string(),
        }
    }
}

impl fmt::Display for Rule {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.pad(self.key())
    }
}

/// A content-type list is satisfied locally when non-empty, or by a
/// document-level declaration. A blank document-level string declares
/// nothing; an empty document-level list still counts.
fn declares_media_types(op: &OperationRef<'_>, root: &Value, field: &str) -> bool {
    if field_presence(op.node, field).is_non_empty() {
        return true;
    }
    match root.get(field) {
        Some(Value::String(s)) => !s.trim().is_empty(),
        global => presence(global).is_present(),
    }
}

fn check_consumes_required(op: &OperationRef<'_>, root: &Value) -> Vec<Finding> {
    if !matches!(op.method, "put" | "post") || declares_media_types(op, root, "consumes") {
        return Vec::new();
    }
    vec![Rule::ConsumesRequired.finding(op.locate("consumes"))]
}

fn check_consumes_forbidden(op: &OperationRef<'_>) -> Vec<Finding> {
    // Any `consumes` key counts, including `[]` and `null`.
    let declared = op
        .node
        .as_object()
        .is_some_and(|obj| obj.contains_key("consumes"));
    if op.method != "get" || !declared {
        return Vec::new();
    }
    vec![Rule::ConsumesForbidden.finding(op.locate("consumes"))]
}

fn check_produces_required(op: &OperationRef<'_>, root: &Value) -> Vec<Finding> {
    if op.method == "head" || declares_media_types(op, root, "produces") {
        return Vec::new();
    }
    vec![Rule::ProducesRequired.finding(op.locate("produces"))]
}

fn check_non_empty(op: &OperationRef<'_>, field: &str, rule: Rule) -> Vec<Finding> {
    if field_presence(op.node, field).is_non_empty() {
        return Vec::new();
    }
    vec![rule.finding(op.locate(field))]
}

fn check_array_responses(op: &OperationRef<'_>, root: &Value) -> Vec<Finding> {
    if op.method != "get" {
        return Vec::new();
    }
    let Some(responses) = op.field("responses").and_then(|v| v.as_object()) else {
        return Vec::new();
    };

    responses
        .iter()
        .filter(|(_, response)| {
            response
                .get("schema")
                .and_then(|schema| resolve(schema, root))
                .and_then(|schema| schema.get("type"))
                .and_then(|t| t.as_str())
                == Some("array")
        })
        .map(|(code, _)| {
            Rule::NoArrayResponses.finding(op.locate(&format!("responses.{}.schema", code)))
        })
        .collect()
}

fn is_required(param: &Value) -> bool {
    param.get("required").and_then(|v| v.as_bool()) == Some(true)
}

fn check_parameter_order(op: &OperationRef<'_>, root: &Value) -> Vec<Finding> {
    let Some(params) = op.field("parameters").and_then(|v| v.as_array()) else {
        return Vec::new();
    };

    // The first optional parameter is judged on the parameter as written.
    let Some(first_optional) = params.iter().position(|param| !is_required(param)) else {
        return Vec::new();
    };

    params
        .iter()
        .enumerate()
        .skip(first_optional + 1)
        .filter(|(_, param)| resolve(param, root).is_some_and(is_required))
        .map(|(index, _)| {
            Rule::ParameterOrder.finding(op.locate(&format!("parameters[{}]", index)))
        })
        .collect()
}
