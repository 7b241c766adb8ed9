use std::io::{self, Write};

use colored::Colorize;
use deepcontext_core::AnalysisResult;

/// Writes every recorded file as a `# <path>` header followed by its content.
pub fn print_content_dump<W: Write>(
    out: &mut W,
    result: &AnalysisResult,
    show_imports: bool,
) -> io::Result<()> {
    for (path, content) in &result.content {
        writeln!(out, "\n{}\n", format!("# {}", path.display()).bold())?;

        if show_imports && let Some(imports) = result.imports.get(path) {
            for import in imports {
                let marker = if result.content.contains_key(import) {
                    "→".green()
                } else {
                    "→".dimmed()
                };
                writeln!(out, "{} {}", marker, import.display())?;
            }
            if !imports.is_empty() {
                writeln!(out)?;
            }
        }

        writeln!(out, "{}", content)?;
    }
    Ok(())
}

pub fn print_json<W: Write>(out: &mut W, result: &AnalysisResult) -> anyhow::Result<()> {
    serde_json::to_writer_pretty(&mut *out, result)?;
    writeln!(out)?;
    Ok(())
}
