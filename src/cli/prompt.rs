// ============================================================
// Layer 1 — Interactive Setup Prompts
// ============================================================
// The guided project setup. This is deliberately a thin adapter:
// it only COLLECTS field values from the terminal and feeds them
// into exactly the same constructors the flag-driven path uses
// (ProjectStore::create, DatasetSourceRegistry::add_source).
// Nothing below Layer 1 ever prompts or reads stdin.
//
// Each prompt accepts an empty response as "take the default"
// where a default is shown in brackets.

use anyhow::Result;
use std::io::{BufRead, Write};
use std::path::PathBuf;

use crate::domain::project::DatasetSource;

/// Field values collected by the guided setup.
#[derive(Debug, Clone, PartialEq)]
pub struct ProjectSetup {
    pub annotations: PathBuf,
    pub source: Option<DatasetSource>,
}

/// Run the guided setup against stdin/stdout.
pub fn project_setup() -> Result<ProjectSetup> {
    let stdin = std::io::stdin();
    let mut input = stdin.lock();
    let mut output = std::io::stdout();
    collect_project_setup(&mut input, &mut output)
}

/// Prompt for every project field. Split from `project_setup` so
/// tests can drive it with a scripted reader.
pub fn collect_project_setup(
    input: &mut impl BufRead,
    output: &mut impl Write,
) -> Result<ProjectSetup> {
    let annotations = line_input(
        input,
        output,
        "Path to annotation file [annotations.csv]: ",
        Some("annotations.csv"),
    )?;

    let source = if yes_no_input(input, output, "Register a dataset source now? [y/N]: ", false)? {
        let name      = required_input(input, output, "Source name: ")?;
        let slides    = line_input(input, output, "Slides directory [slides]: ", Some("slides"))?;
        let roi       = line_input(input, output, "ROI directory [roi]: ", Some("roi"))?;
        let tiles     = line_input(input, output, "Tiles directory [tiles]: ", Some("tiles"))?;
        let tfrecords = line_input(
            input,
            output,
            "TFRecords directory [tfrecords]: ",
            Some("tfrecords"),
        )?;
        Some(DatasetSource::new(name, slides, roi, tiles, tfrecords))
    } else {
        None
    };

    Ok(ProjectSetup {
        annotations: PathBuf::from(annotations),
        source,
    })
}

/// Prompt for one line; empty input falls back to the default.
fn line_input(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
    default: Option<&str>,
) -> Result<String> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        let trimmed = line.trim();

        if !trimmed.is_empty() {
            return Ok(trimmed.to_string());
        }
        if let Some(default) = default {
            return Ok(default.to_string());
        }
        writeln!(output, "A value is required.")?;
    }
}

/// Prompt for a line with no default — re-asks until non-empty.
fn required_input(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
) -> Result<String> {
    line_input(input, output, prompt, None)
}

/// Prompt for a yes/no answer; empty input takes the default.
fn yes_no_input(
    input: &mut impl BufRead,
    output: &mut impl Write,
    prompt: &str,
    default: bool,
) -> Result<bool> {
    loop {
        write!(output, "{prompt}")?;
        output.flush()?;

        let mut line = String::new();
        input.read_line(&mut line)?;
        match line.trim().to_lowercase().as_str() {
            "" => return Ok(default),
            "y" | "yes" => return Ok(true),
            "n" | "no" => return Ok(false),
            other => writeln!(output, "Invalid response: {other:?}")?,
        }
    }
}

// ─── Unit Tests ───────────────────────────────────────────────────────────────
#[cfg(test)]
mod tests {
    use super::*;

    fn run(script: &str) -> ProjectSetup {
        let mut input  = script.as_bytes();
        let mut output = Vec::new();
        collect_project_setup(&mut input, &mut output).unwrap()
    }

    #[test]
    fn test_all_defaults_no_source() {
        let setup = run("\n\n");
        assert_eq!(setup.annotations, PathBuf::from("annotations.csv"));
        assert!(setup.source.is_none());
    }

    #[test]
    fn test_explicit_values_with_source() {
        let setup = run("clinical.csv\ny\nTCGA\n/data/slides\n\n\n\n");
        assert_eq!(setup.annotations, PathBuf::from("clinical.csv"));

        let source = setup.source.unwrap();
        assert_eq!(source.name, "TCGA");
        assert_eq!(source.slides, PathBuf::from("/data/slides"));
        assert_eq!(source.roi, PathBuf::from("roi"));
    }

    #[test]
    fn test_invalid_yes_no_reprompts() {
        let setup = run("\nmaybe\nn\n");
        assert!(setup.source.is_none());
    }

    #[test]
    fn test_required_name_reprompts_until_given() {
        let setup = run("\ny\n\nTCGA\n\n\n\n\n");
        assert_eq!(setup.source.unwrap().name, "TCGA");
    }
}
