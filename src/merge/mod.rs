//! Directive-driven XML merge
//!
//! [`DirectiveMerger`] walks a config fragment for elements carrying an `add`
//! directive and inserts them into a target document when their condition
//! holds. See [`directive`] for the attribute format.
//!
//! ## Algorithm
//!
//! 1. Snapshot every config element that carries `add`. Directive attributes
//!    are stripped while processing, so the set is collected up front.
//! 2. For each element `E` with `add="IfNotExist"`:
//!    - read and strip `condition`, split off a leading `!`;
//!    - find the descendant whose `newCondition` equals the reference and
//!      strip the marker;
//!    - the probe *exists* when some target element named like `E` has a
//!      descendant deep-equal to the marked one;
//!    - insert when `exists` (or when it does not, for a negated condition)
//!      by appending `E` to the first target element named like `E`'s parent.
//! 3. Strip any directive attributes left in the target.
//!
//! Any directive error aborts the merge. Callers that write the target only
//! after `apply` returns never persist a partial merge.

pub mod directive;

use log::{debug, warn};
use xot::{NameId, Node, Xot};

use crate::document::{
    adopt_inherited_namespaces, deep_equal, display_name, element_name, elements, remove_namespace,
};
use crate::error::{Error, Result};
use directive::{Condition, DirectiveKind, MergeNames};

/// Merge behaviour switches
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct MergeOptions {
    /// Fail with `Error::TargetAnchorNotFound` when there is nowhere to
    /// insert an element. When unset the element is skipped with a warning.
    pub strict: bool,
}

impl Default for MergeOptions {
    fn default() -> Self {
        Self { strict: true }
    }
}

/// Counts of what happened to each directive
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct MergeReport {
    /// Elements appended to the target
    pub inserted: usize,
    /// Elements whose condition did not hold, or that had no anchor in
    /// lenient mode
    pub skipped: usize,
    /// Elements whose directive kind is not supported
    pub unsupported: usize,
}

impl MergeReport {
    /// Number of directives processed
    pub fn total(&self) -> usize {
        self.inserted + self.skipped + self.unsupported
    }
}

/// Applies the directives of a config document to a target document
#[derive(Debug, Clone, Default)]
pub struct DirectiveMerger {
    options: MergeOptions,
}

impl DirectiveMerger {
    /// Create a merger with default (strict) options
    pub fn new() -> Self {
        Self::default()
    }

    /// Create a merger with the given options
    pub fn with_options(options: MergeOptions) -> Self {
        Self { options }
    }

    /// Apply every directive in `config` to `target`.
    ///
    /// Both nodes must live in `xot`. `target` is mutated in place; elements
    /// that get inserted are moved out of `config`.
    ///
    /// # Errors
    ///
    /// - `Error::MissingDirective` if an `IfNotExist` element has no
    ///   condition.
    /// - `Error::ConditionNotFound` if no descendant carries the marker.
    /// - `Error::TargetAnchorNotFound` in strict mode when the target has no
    ///   element to insert under.
    pub fn apply(&self, xot: &mut Xot, target: Node, config: Node) -> Result<MergeReport> {
        let names = MergeNames::register(xot);

        let candidates: Vec<Node> = elements(xot, config)
            .into_iter()
            .filter(|&n| xot.attributes(n).get(names.add).is_some())
            .collect();
        debug!("Found {} merge directive(s)", candidates.len());

        let mut report = MergeReport::default();
        for element in candidates {
            let kind = xot
                .attributes_mut(element)
                .remove(names.add)
                .unwrap_or_default();

            match DirectiveKind::parse(&kind) {
                DirectiveKind::InsertIfCondition => {
                    if self.insert_if_condition(xot, &names, target, element)? {
                        report.inserted += 1;
                    } else {
                        report.skipped += 1;
                    }
                }
                DirectiveKind::Unsupported(kind) => {
                    warn!(
                        "Unsupported merge directive add=\"{}\" on <{}>; element not merged",
                        kind,
                        describe(xot, element)
                    );
                    report.unsupported += 1;
                }
            }
        }

        strip_directives(xot, target);
        Ok(report)
    }

    /// Handle one `IfNotExist` element. Returns whether it was inserted.
    fn insert_if_condition(
        &self,
        xot: &mut Xot,
        names: &MergeNames,
        target: Node,
        element: Node,
    ) -> Result<bool> {
        let element_label = describe(xot, element);

        let raw = xot.attributes_mut(element).remove(names.condition);
        let condition = raw
            .as_deref()
            .and_then(Condition::parse)
            .ok_or_else(|| Error::MissingDirective {
                element: element_label.clone(),
                attribute: directive::CONDITION_ATTRIBUTE.to_string(),
            })?;

        let marker = find_marker(xot, names, element, &condition.reference).ok_or_else(|| {
            Error::ConditionNotFound {
                element: element_label.clone(),
                condition: condition.reference.clone(),
            }
        })?;
        xot.attributes_mut(marker).remove(names.marker);

        let (scope, probe) = match (element_name(xot, element), element_name(xot, marker)) {
            (Some(scope), Some(probe)) => (scope, probe),
            _ => {
                return Err(Error::Unexpected {
                    message: format!("directive on <{}> is not attached to an element", element_label),
                })
            }
        };
        let exists = counterpart_exists(xot, target, scope, probe, marker);
        if !condition.should_add(exists) {
            warn!("Did not merge element <{}>", element_label);
            return Ok(false);
        }

        let parent_name = xot
            .parent(element)
            .and_then(|parent| element_name(xot, parent));
        let anchor = parent_name.and_then(|name| first_named(xot, target, name));

        match anchor {
            Some(anchor) => {
                adopt_inherited_namespaces(xot, element, names.namespace);
                xot.detach(element)?;
                xot.append(anchor, element)?;
                debug!(
                    "Merged <{}> into <{}>",
                    element_label,
                    describe(xot, anchor)
                );
                Ok(true)
            }
            None => {
                let anchor_label = parent_name
                    .map(|name| display_name(xot, name))
                    .unwrap_or_else(|| "(document)".to_string());
                if self.options.strict {
                    return Err(Error::TargetAnchorNotFound {
                        element: element_label,
                        anchor: anchor_label,
                    });
                }
                warn!(
                    "Did not merge element <{}>: no <{}> in target",
                    element_label, anchor_label
                );
                Ok(false)
            }
        }
    }
}

fn describe(xot: &Xot, element: Node) -> String {
    element_name(xot, element)
        .map(|name| display_name(xot, name))
        .unwrap_or_default()
}

/// First proper descendant of `element` whose marker equals `reference`
fn find_marker(xot: &Xot, names: &MergeNames, element: Node, reference: &str) -> Option<Node> {
    elements(xot, element).into_iter().find(|&n| {
        n != element
            && xot
                .attributes(n)
                .get(names.marker)
                .is_some_and(|value| value == reference)
    })
}

/// Whether some element named `scope` in `target` has a proper descendant
/// named `probe` that is deep-equal to `marker`
fn counterpart_exists(xot: &Xot, target: Node, scope: NameId, probe: NameId, marker: Node) -> bool {
    elements(xot, target)
        .into_iter()
        .filter(|&n| element_name(xot, n) == Some(scope))
        .any(|container| {
            elements(xot, container).into_iter().any(|n| {
                n != container
                    && element_name(xot, n) == Some(probe)
                    && deep_equal(xot, n, marker)
            })
        })
}

/// First element in document order named `name`
fn first_named(xot: &Xot, root: Node, name: NameId) -> Option<Node> {
    elements(xot, root)
        .into_iter()
        .find(|&n| element_name(xot, n) == Some(name))
}

/// Remove every merge-namespace attribute and declaration left under `root`
fn strip_directives(xot: &mut Xot, root: Node) {
    let removed = remove_namespace(xot, root, directive::MERGE_NAMESPACE);
    if removed > 0 {
        debug!("Dropped {} stray merge attribute(s)", removed);
    }
}
