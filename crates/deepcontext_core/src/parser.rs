use anyhow::{Context, Result};
use log::trace;
use regex::Regex;
use std::{path::Path, sync::OnceLock};

use crate::{
    fs::FileSystem,
    trace::{TraceEvent, Tracer},
    types::SourceFile,
};

fn import_regex() -> &'static Regex {
    static RE: OnceLock<Regex> = OnceLock::new();
    // Only specifiers starting with `.`, `/` or `@` are local; bare package names never match.
    // Binding names are ASCII word characters only.
    RE.get_or_init(|| {
        Regex::new(r#"import\s+(?:(?:[0-9A-Za-z_*\s{},]*)\s+from\s+)?['"]([@./][^'"]+)['"]"#)
            .expect("valid regex literal")
    })
}

/// Extracts local import specifiers from JS/TS source text.
///
/// This is pattern matching, not parsing: an import-shaped string inside a comment or
/// a template literal is reported like a real import.
pub fn extract_imports(content: &str) -> Vec<String> {
    let normalized = content.replace("\r\n", "\n");
    import_regex()
        .captures_iter(&normalized)
        .filter_map(|c| c.get(1))
        .map(|m| {
            trace!("Found import specifier: '{}'", m.as_str());
            m.as_str().to_string()
        })
        .collect()
}

/// Reads `path` and extracts its local import specifiers.
pub fn read_source_file(
    fs: &dyn FileSystem,
    path: &Path,
    tracer: &dyn Tracer,
) -> Result<SourceFile> {
    let content =
        fs.read_to_string(path).with_context(|| format!("Failed to read {}", path.display()))?;
    let imports = extract_imports(&content);
    for specifier in &imports {
        tracer.event(TraceEvent::SpecifierFound { file: path, specifier });
    }
    Ok(SourceFile { path: path.to_path_buf(), content, imports })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{fs::OsFileSystem, trace::NullTracer, trace::testing::RecordingTracer};
    use std::{fs, path::PathBuf};
    use tempfile::TempDir;

    fn create_test_file(dir: &Path, name: &str, content: &str) -> PathBuf {
        let file_path = dir.join(name);
        fs::write(&file_path, content).expect("Failed to write test file");
        file_path
    }

    #[test]
    fn test_default_import() {
        assert_eq!(extract_imports("import foo from './foo';"), vec!["./foo"]);
    }

    #[test]
    fn test_named_import() {
        assert_eq!(extract_imports("import { bar, baz } from './utils';"), vec!["./utils"]);
    }

    #[test]
    fn test_namespace_import() {
        assert_eq!(extract_imports("import * as utils from \"./utils\";"), vec!["./utils"]);
    }

    #[test]
    fn test_side_effect_import() {
        assert_eq!(extract_imports("import './polyfills';"), vec!["./polyfills"]);
    }

    #[test]
    fn test_default_and_named_import() {
        assert_eq!(
            extract_imports("import React, { useState } from '../hooks/react';"),
            vec!["../hooks/react"]
        );
    }

    #[test]
    fn test_multiline_destructured_import() {
        let src = "import {\r\n  Alpha,\r\n  Beta,\r\n} from '@app/letters';\r\nconst x = 1;\r\n";
        assert_eq!(extract_imports(src), vec!["@app/letters"]);
    }

    #[test]
    fn test_bare_package_excluded() {
        let src = "import fs from 'fs'\nimport x from './x'\nimport y from '@y/thing'\n";
        assert_eq!(extract_imports(src), vec!["./x", "@y/thing"]);
    }

    #[test]
    fn test_absolute_specifier() {
        assert_eq!(extract_imports("import cfg from '/etc/app/config';"), vec!["/etc/app/config"]);
    }

    #[test]
    fn test_order_and_duplicates_preserved() {
        let src = "import b from './b';\nimport a from './a';\nimport again from './b';";
        assert_eq!(extract_imports(src), vec!["./b", "./a", "./b"]);
    }

    #[test]
    fn test_commented_import_still_matches() {
        // Pattern matching does not understand comments.
        assert_eq!(extract_imports("// import old from './old';"), vec!["./old"]);
    }

    #[test]
    fn test_non_ascii_binding_not_matched() {
        let src = "import café from './x';\nimport { naïve } from './y';\nimport z from './z';";
        assert_eq!(extract_imports(src), vec!["./z"]);
    }

    #[test]
    fn test_no_imports() {
        assert!(extract_imports("const x = 42;\nexport default x;").is_empty());
    }

    #[test]
    fn test_read_source_file() {
        let temp_dir = TempDir::new().unwrap();
        let file = create_test_file(
            temp_dir.path(),
            "page.tsx",
            "import { Button } from './components/Button';\n\
             import styles from './page.module.css';",
        );
        let tracer = RecordingTracer::default();
        let source = read_source_file(&OsFileSystem, &file, &tracer).unwrap();
        assert_eq!(source.path, file);
        assert_eq!(source.imports, vec!["./components/Button", "./page.module.css"]);
        assert!(source.content.starts_with("import { Button }"));
        assert!(tracer.contains("found import './components/Button'"));
    }

    #[test]
    fn test_read_source_file_missing() {
        let temp_dir = TempDir::new().unwrap();
        let err = read_source_file(&OsFileSystem, &temp_dir.path().join("gone.ts"), &NullTracer)
            .unwrap_err();
        assert!(err.to_string().contains("Failed to read"));
    }
}
