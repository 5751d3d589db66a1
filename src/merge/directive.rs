//! Merge directives
//!
//! Directives are attributes in the merge namespace placed on elements of a
//! config fragment:
//!
//! ```xml
//! <feature xmlns:xm="http://schemas.omax.com/xml-merge"
//!          xm:add="IfNotExist" xm:condition="!has-flag">
//!   <child xm:newCondition="has-flag"/>
//! </feature>
//! ```
//!
//! `add` selects the [`DirectiveKind`], `condition` is parsed into a
//! [`Condition`], and `newCondition` marks the descendant whose presence in
//! the target is probed.

use xot::{NameId, NamespaceId, Xot};

/// Namespace URI of every directive attribute
pub const MERGE_NAMESPACE: &str = "http://schemas.omax.com/xml-merge";

/// Local name of the directive kind attribute
pub const ADD_ATTRIBUTE: &str = "add";

/// Local name of the condition attribute
pub const CONDITION_ATTRIBUTE: &str = "condition";

/// Local name of the marker attribute on the probed descendant
pub const MARKER_ATTRIBUTE: &str = "newCondition";

/// `add` value for conditional insertion
pub const IF_NOT_EXIST: &str = "IfNotExist";

/// What a directive asks the merger to do
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum DirectiveKind {
    /// `add="IfNotExist"`: insert the element depending on its condition
    InsertIfCondition,
    /// Any other `add` value; consumed but never applied
    Unsupported(String),
}

impl DirectiveKind {
    /// Classify an `add` attribute value
    pub fn parse(value: &str) -> Self {
        match value {
            IF_NOT_EXIST => DirectiveKind::InsertIfCondition,
            other => DirectiveKind::Unsupported(other.to_string()),
        }
    }
}

/// A parsed `condition` attribute
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Condition {
    /// Marker value identifying the probed descendant
    pub reference: String,
    /// Set when the raw value starts with `!`
    pub negate: bool,
}

impl Condition {
    /// Parse `[!]<ref>`. Returns `None` when the reference is empty.
    ///
    /// # Examples
    ///
    /// ```
    /// use xml_merge::merge::directive::Condition;
    ///
    /// let condition = Condition::parse("!has-flag").unwrap();
    /// assert!(condition.negate);
    /// assert_eq!(condition.reference, "has-flag");
    /// ```
    pub fn parse(raw: &str) -> Option<Self> {
        let (negate, reference) = match raw.strip_prefix('!') {
            Some(rest) => (true, rest),
            None => (false, raw),
        };
        if reference.is_empty() {
            return None;
        }
        Some(Self {
            reference: reference.to_string(),
            negate,
        })
    }

    /// Whether the element is inserted, given whether the probe exists in
    /// the target
    pub fn should_add(&self, exists: bool) -> bool {
        if self.negate {
            !exists
        } else {
            exists
        }
    }
}

/// Interned names of the directive attributes
#[derive(Clone, Copy, Debug)]
pub struct MergeNames {
    pub namespace: NamespaceId,
    pub add: NameId,
    pub condition: NameId,
    pub marker: NameId,
}

impl MergeNames {
    /// Look up or create the directive names in `xot`
    pub fn register(xot: &mut Xot) -> Self {
        let namespace = xot.add_namespace(MERGE_NAMESPACE);
        Self {
            namespace,
            add: xot.add_name_ns(ADD_ATTRIBUTE, namespace),
            condition: xot.add_name_ns(CONDITION_ATTRIBUTE, namespace),
            marker: xot.add_name_ns(MARKER_ATTRIBUTE, namespace),
        }
    }
}
