//! Profile-aware JSON fixtures.
//!
//! A fixture document holds a `master` section and optional per-profile
//! sections. Loading it under a profile such as `GB-en` merges the sections of
//! that profile's hierarchy, spreads `default` values into sibling objects,
//! then resolves `get:`/`include:` references and `{macro}` placeholders.

pub mod cache;
pub mod error;
pub mod fixtures;
pub mod lexer;
pub mod loader;
pub mod macros;
pub mod node;
pub mod options;
pub mod parser;
pub mod profile;
pub mod registry;
pub mod resolver;
pub mod source;

pub use error::FixtureError;
pub use fixtures::{FixtureRequest, Fixtures, Loaded};
pub use loader::Loader;
pub use macros::{Macro, MacroRegistry};
pub use options::{LoaderOptions, OptionsPatch};
pub use resolver::{
    FnResolver, ReferenceDescriptor, ReferenceGroup, ResolutionContext, ResolvedField,
    ResolvedFields, Resolver, ResolverRegistry,
};
pub use source::{DocumentSource, FsSource, MemorySource};
