//! Constants for file extensions and resolution order.
//!
//! Typed sources are probed before untyped ones so that a `.ts`/`.tsx` file wins
//! over a compiled or hand-written `.js` sibling.

/// File extensions collected when a directory is analyzed
pub const JS_TS_EXTENSIONS: &[&str] = &["js", "jsx", "ts", "tsx"];

/// Extensions appended to an extensionless specifier (in priority order)
pub const RESOLVE_EXTENSIONS: &[&str] = &[".tsx", ".ts", ".jsx", ".js"];

/// Index files tried when a specifier names a directory (in priority order)
pub const INDEX_FILES: &[&str] = &["index.tsx", "index.ts", "index.jsx", "index.js"];

/// Directory names never descended into during discovery
pub const EXCLUDED_DIRS: &[&str] = &["node_modules", ".git", "dist"];

/// Name of the project configuration holding `compilerOptions.paths`
pub const TSCONFIG_FILE: &str = "tsconfig.json";

/// Upper bound on chained alias rewrites for a single specifier
pub const MAX_ALIAS_REWRITES: usize = 8;
