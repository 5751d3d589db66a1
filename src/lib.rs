//! # XML Merge Library
//!
//! This library merges fragments of configuration XML into a target document
//! (typically an Android manifest) and keeps a backup of the target so the
//! merge can be undone. It is used by the `xml-merge` command-line tool but
//! can be embedded in any build step that patches XML.
//!
//! ## Quick Example
//!
//! ```
//! use xml_merge::document::merge_documents;
//! use xml_merge::merge::MergeOptions;
//!
//! let target = r#"<manifest><application/></manifest>"#;
//! let config = r#"<manifest xmlns:xm="http://schemas.omax.com/xml-merge">
//!   <application>
//!     <service name="Sync" xm:add="IfNotExist" xm:condition="!sync">
//!       <probe xm:newCondition="sync"/>
//!     </service>
//!   </application>
//! </manifest>"#;
//!
//! let output = merge_documents(target, config, MergeOptions::default()).unwrap();
//! assert_eq!(output.report.inserted, 1);
//! assert!(output.xml.contains(r#"<service name="Sync">"#));
//! ```
//!
//! ## Core Concepts
//!
//! - **Directives (`merge::directive`)**: attributes in the
//!   `http://schemas.omax.com/xml-merge` namespace that say which config
//!   elements to insert and under what condition.
//! - **Merger (`merge`)**: evaluates each directive against the target and
//!   moves qualifying elements into it.
//! - **Documents (`document`)**: parsing, deep equality, namespace cleanup and
//!   serialization on top of `xot`.
//! - **Backup cache (`cache`, `filesystem`)**: saves a pristine copy of the
//!   target before it is rewritten and restores it on demand.
//!
//! ## Execution Flow
//!
//! A merge run:
//!
//! 1.  **Validation**: both input files must exist.
//! 2.  **Parsing**: target and config are parsed into one `xot` arena.
//! 3.  **Backup**: the target is copied into the cache unless a copy exists.
//! 4.  **Merge**: directives are applied to the target in memory.
//! 5.  **Output**: the target is serialized and written back.
//!
//! A restore run copies the cached file back and removes the cache entry.

pub mod cache;
pub mod defaults;
pub mod document;
pub mod error;
pub mod exit_codes;
pub mod filesystem;
pub mod merge;

#[cfg(test)]
mod cache_proptest;
