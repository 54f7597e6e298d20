//! vFlow Workflow
//!
//! Handling of published workflow documents (`workflows/*.json`):
//!
//! - [`validate_workflow`] checks the `_meta` block against the filename
//! - [`sanitize_workflow`] clears the runtime flags before publishing
//! - [`WorkflowScanner`] ties both together, rewriting each valid file in
//!   place and producing a [`WorkflowEntry`] for the index

mod document;
mod entry;
mod scanner;

pub use document::{
  META_KEY, REQUIRED_META_FIELDS, RUNTIME_FLAGS, WORKFLOW_EXTENSION, sanitize_workflow,
  validate_workflow,
};
pub use entry::WorkflowEntry;
pub use scanner::WorkflowScanner;
