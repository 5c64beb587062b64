//! # creg-schema: Contract Schema Engine
//!
//! Parses contract schema documents, validates messages against them and
//! synthesizes sample messages from them.
//!
//! ## Data Flow
//!
//! ```text
//! raw schema text ──► resolve ──► SchemaDictionary ──┬──► validate ──► ValidationResult
//!                                                     ├──► sample   ──► example JSON
//!                                                     └──► display  ──► outline
//! ```
//!
//! - [`resolve`] parses the document and resolves every `$ref`, returning a
//!   [`SchemaError`] for structural failures instead of partial output.
//!   References to object and array definitions carry their nested
//!   structure along rather than acting as leaf types.
//! - [`validate`] runs the unknown / missing / type checks and collects all
//!   findings as fixed sentences.
//! - [`sample`] builds an example message that validates against its source.
//! - [`display`] renders the contract as an indented outline.
//! - [`tester`] layers contract-version deprecation over validation.
//! - [`rules`] checks the registry's requirements on the `Contract` node.
//!
//! ## Crate Policy
//!
//! - Depends only on `creg-core` internally.
//! - Everything here is synchronous and free of shared mutable state; a
//!   resolved dictionary may be shared across threads.
//! - Expected bad input never panics: it becomes a finding, a
//!   [`SchemaError`], or a placeholder value.

pub mod display;
pub mod error;
pub mod node;
pub mod resolve;
pub mod rules;
pub mod sample;
pub mod tester;
pub mod validate;

pub use display::{outline, render_html, render_text, OutlineLine};
pub use error::{PatternError, SchemaError};
pub use node::{parse_reference_name, Properties, SchemaFormat, SchemaNode, SchemaType};
pub use resolve::{build_schema_dictionary, populate_references, SchemaDictionary, CONTRACT_KEY};
pub use rules::check_contract_requirements;
pub use sample::{
    generate_sample, synthesize_from_pattern, SampleGenerator, SampleOptions, INVALID_PATTERN,
};
pub use tester::{test_contract_version, ContractVersion, TestOutcome};
pub use validate::{test_message, MessageValidator, TestOptions, ValidationResult};
