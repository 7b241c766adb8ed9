//! Local import tracing for JavaScript/TypeScript projects.
//!
//! This crate starts from a file or directory and builds two maps: file contents and
//! each file's resolved local imports. It provides:
//! - Pattern-based extraction of relative and alias-prefixed import specifiers
//! - `tsconfig.json` path alias loading by upward directory search
//! - Specifier resolution with extension and index-file probing
//! - Bounded, cycle-safe parallel traversal of the import graph
//!
//! # Examples
//!
//! ```no_run
//! # fn main() -> anyhow::Result<()> {
//! let result = deepcontext_core::analyze("app/page.tsx", 2, false)?;
//! for (file, imports) in &result.imports {
//!     println!("{} imports {} files", file.display(), imports.len());
//! }
//! # Ok(())
//! # }
//! ```

mod analyzer;
mod collector;
mod config;
mod constants;
mod fs;
mod parser;
mod resolver;
mod trace;
mod types;

// Re-export public API
pub use analyzer::{Analyzer, analyze};
pub use collector::{collect_source_files, is_js_or_ts_file};
pub use config::{AliasCache, AliasConfig, load_alias_config};
pub use constants::{EXCLUDED_DIRS, INDEX_FILES, JS_TS_EXTENSIONS, RESOLVE_EXTENSIONS};
pub use fs::{DirEntry, FileSystem, OsFileSystem};
pub use parser::{extract_imports, read_source_file};
pub use resolver::resolve;
pub use trace::{LogTracer, NullTracer, ProbeKind, TraceEvent, Tracer};
pub use types::{AnalysisResult, SourceFile};
