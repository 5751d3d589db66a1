//! XML document helpers
//!
//! Documents are held in a [`xot::Xot`] arena. The target and the config are
//! parsed into the same arena so the merger can move elements from one tree
//! to the other.
//!
//! ## Deep equality
//!
//! [`deep_equal`] compares qualified names, attribute sets and children.
//! Whitespace-only text, comments and processing instructions are not
//! significant, so a probe written across several indented lines in the
//! config still matches a compact element in the target.
//!
//! ## Output
//!
//! [`serialize`] writes the tree back out after [`omit_duplicate_namespaces`]
//! has dropped declarations an ancestor already makes. The XML declaration of
//! the source document, if any, is carried over since the tree does not keep
//! it.

use std::borrow::Borrow;
use std::collections::HashMap;
use std::fs;
use std::path::Path;

use xot::{NameId, NamespaceId, Node, PrefixId, Xot};

use crate::error::{Error, Result};
use crate::merge::{DirectiveMerger, MergeOptions, MergeReport};

/// Result of [`merge_documents`]
#[derive(Debug, Clone)]
pub struct MergeOutput {
    /// Serialized target document after the merge
    pub xml: String,
    pub report: MergeReport,
}

/// Read a whole document from disk
pub fn load_file(path: &Path) -> Result<String> {
    Ok(fs::read_to_string(path)?)
}

/// Write a whole document to disk, replacing the file
pub fn save_file(path: &Path, xml: &str) -> Result<()> {
    Ok(fs::write(path, xml)?)
}

/// Parse `text` into a new document in `xot`.
///
/// `source_name` only labels the error message.
pub fn parse(xot: &mut Xot, text: &str, source_name: &str) -> Result<Node> {
    xot.parse(strip_bom(text)).map_err(|e| Error::XmlParse {
        source_name: source_name.to_string(),
        message: e.to_string(),
    })
}

/// The `<?xml ...?>` declaration at the start of `text`, if there is one
pub fn xml_declaration(text: &str) -> Option<&str> {
    let text = strip_bom(text);
    if !text.starts_with("<?xml") {
        return None;
    }
    text.find("?>").map(|end| &text[..end + 2])
}

/// Serialize `node`, prefixed with `declaration` on its own line
pub fn serialize(xot: &Xot, node: Node, declaration: Option<&str>) -> Result<String> {
    let body = xot.to_string(node)?;
    Ok(match declaration {
        Some(declaration) => format!("{}\n{}", declaration, body),
        None => body,
    })
}

/// Merge `config_xml` into `target_xml` and serialize the result.
///
/// The XML declaration and trailing newline of the target are kept.
///
/// # Examples
///
/// ```
/// use xml_merge::document::merge_documents;
/// use xml_merge::merge::MergeOptions;
///
/// let target = "<app><feature/></app>";
/// let config = r#"<app xmlns:xm="http://schemas.omax.com/xml-merge">
///   <feature xm:add="IfNotExist" xm:condition="!has-flag">
///     <child xm:newCondition="has-flag"/>
///   </feature>
/// </app>"#;
///
/// let output = merge_documents(target, config, MergeOptions::default()).unwrap();
/// assert_eq!(output.report.inserted, 1);
/// assert!(!output.xml.contains("xm:"));
/// ```
pub fn merge_documents(
    target_xml: &str,
    config_xml: &str,
    options: MergeOptions,
) -> Result<MergeOutput> {
    let mut xot = Xot::new();
    let target = parse(&mut xot, target_xml, "target")?;
    let config = parse(&mut xot, config_xml, "config")?;

    let report = DirectiveMerger::with_options(options).apply(&mut xot, target, config)?;
    let xml = render_target(&mut xot, target, target_xml)?;
    Ok(MergeOutput { xml, report })
}

/// Serialize a merged target the way it is written back to disk.
///
/// Duplicate namespace declarations are dropped, and the XML declaration and
/// trailing newline of `original` (the text the target was parsed from) are
/// kept.
pub fn render_target(xot: &mut Xot, target: Node, original: &str) -> Result<String> {
    omit_duplicate_namespaces(xot, target);
    let mut xml = serialize(xot, target, xml_declaration(original))?;
    if original.ends_with('\n') && !xml.ends_with('\n') {
        xml.push('\n');
    }
    Ok(xml)
}

/// Structural equality of two nodes.
///
/// Elements are equal when their qualified names and attribute sets match
/// and their significant children are pairwise equal in order. Text nodes
/// are equal when their content matches.
pub fn deep_equal(xot: &Xot, a: Node, b: Node) -> bool {
    match (xot.element(a), xot.element(b)) {
        (Some(left), Some(right)) => {
            if left.name() != right.name() || attribute_map(xot, a) != attribute_map(xot, b) {
                return false;
            }
            let left_children = significant_children(xot, a);
            let right_children = significant_children(xot, b);
            left_children.len() == right_children.len()
                && left_children
                    .iter()
                    .zip(&right_children)
                    .all(|(&l, &r)| deep_equal(xot, l, r))
        }
        (None, None) => match (xot.text_str(a), xot.text_str(b)) {
            (Some(left), Some(right)) => left == right,
            _ => false,
        },
        _ => false,
    }
}

/// Remove namespace declarations that an ancestor already makes with the
/// same prefix and URI.
pub fn omit_duplicate_namespaces(xot: &mut Xot, node: Node) {
    for element in elements(xot, node) {
        let inherited = inherited_namespaces(xot, element);
        let duplicates: Vec<PrefixId> = namespace_declarations(xot, element)
            .into_iter()
            .filter(|(prefix, namespace)| inherited.get(prefix) == Some(namespace))
            .map(|(prefix, _)| prefix)
            .collect();

        if duplicates.is_empty() {
            continue;
        }
        let mut declarations = xot.namespaces_mut(element);
        for prefix in duplicates {
            declarations.remove(prefix);
        }
    }
}

/// Declare on `element` every namespace it inherits from its ancestors and
/// does not declare itself, except `skip`.
///
/// Called before an element is moved to another tree so its prefixes stay
/// resolvable there.
pub fn adopt_inherited_namespaces(xot: &mut Xot, element: Node, skip: NamespaceId) {
    let own: HashMap<PrefixId, NamespaceId> =
        namespace_declarations(xot, element).into_iter().collect();
    let missing: Vec<(PrefixId, NamespaceId)> = inherited_namespaces(xot, element)
        .into_iter()
        .filter(|(prefix, namespace)| *namespace != skip && !own.contains_key(prefix))
        .collect();

    if missing.is_empty() {
        return;
    }
    let mut declarations = xot.namespaces_mut(element);
    for (prefix, namespace) in missing {
        declarations.insert(prefix, namespace);
    }
}

/// Remove every attribute in namespace `uri` from `root` and its element
/// descendants, along with the declarations binding `uri` once nothing
/// under `root` is named in it. Returns the number of attributes removed.
pub fn remove_namespace(xot: &mut Xot, root: Node, uri: &str) -> usize {
    let namespace = xot.add_namespace(uri);
    let mut removed = 0;

    for element in elements(xot, root) {
        let doomed: Vec<NameId> = xot
            .attributes(element)
            .iter()
            .map(|(name, _)| copied::<NameId, _>(name))
            .filter(|&name| namespace_uri(xot, name) == uri)
            .collect();
        if doomed.is_empty() {
            continue;
        }
        let mut attributes = xot.attributes_mut(element);
        for name in doomed {
            attributes.remove(name);
            removed += 1;
        }
    }

    let in_use = elements(xot, root)
        .into_iter()
        .filter_map(|n| element_name(xot, n))
        .any(|name| namespace_uri(xot, name) == uri);
    if in_use {
        return removed;
    }

    for element in elements(xot, root) {
        let prefixes: Vec<PrefixId> = namespace_declarations(xot, element)
            .into_iter()
            .filter(|&(_, declared)| declared == namespace)
            .map(|(prefix, _)| prefix)
            .collect();
        if prefixes.is_empty() {
            continue;
        }
        let mut declarations = xot.namespaces_mut(element);
        for prefix in prefixes {
            declarations.remove(prefix);
        }
    }
    removed
}

/// `node` and all element descendants in document order
pub fn elements(xot: &Xot, node: Node) -> Vec<Node> {
    xot.descendants(node)
        .filter(|&n| xot.element(n).is_some())
        .collect()
}

/// Qualified name of an element node
pub fn element_name(xot: &Xot, node: Node) -> Option<NameId> {
    xot.element(node).map(|element| element.name())
}

/// Namespace URI of a name, empty for names without one
pub fn namespace_uri(xot: &Xot, name: NameId) -> &str {
    let (_local, namespace) = xot.name_ns_str(name);
    namespace
}

/// Local part of a name, for messages
pub fn display_name(xot: &Xot, name: NameId) -> String {
    let (local, _namespace) = xot.name_ns_str(name);
    local.to_string()
}

fn strip_bom(text: &str) -> &str {
    text.strip_prefix('\u{feff}').unwrap_or(text)
}

// NodeMap iterators may hand out keys and values by reference.
fn copied<T: Copy, B: Borrow<T>>(value: B) -> T {
    *value.borrow()
}

fn attribute_map(xot: &Xot, node: Node) -> HashMap<NameId, String> {
    xot.attributes(node)
        .iter()
        .map(|(name, value)| (copied::<NameId, _>(name), value.to_string()))
        .collect()
}

fn namespace_declarations(xot: &Xot, node: Node) -> Vec<(PrefixId, NamespaceId)> {
    xot.namespaces(node)
        .iter()
        .map(|(prefix, namespace)| {
            (
                copied::<PrefixId, _>(prefix),
                copied::<NamespaceId, _>(namespace),
            )
        })
        .collect()
}

/// In-scope declarations coming from the ancestors of `node`; the nearest
/// ancestor wins.
fn inherited_namespaces(xot: &Xot, node: Node) -> HashMap<PrefixId, NamespaceId> {
    let mut in_scope = HashMap::new();
    let mut current = xot.parent(node);
    while let Some(ancestor) = current {
        if xot.element(ancestor).is_some() {
            for (prefix, namespace) in namespace_declarations(xot, ancestor) {
                in_scope.entry(prefix).or_insert(namespace);
            }
        }
        current = xot.parent(ancestor);
    }
    in_scope
}

fn significant_children(xot: &Xot, node: Node) -> Vec<Node> {
    xot.children(node)
        .filter(|&child| {
            xot.element(child).is_some()
                || xot
                    .text_str(child)
                    .is_some_and(|text| !text.trim().is_empty())
        })
        .collect()
}
