//! Rendering of run results to the output streams.

use std::io::{self, Write};

use spindle_engine::{Disposition, RunReport};

/// Writes every previewed file as `-- <path> --` followed by its contents.
pub(crate) fn write_previews<W: Write>(stdout: &mut W, report: &RunReport) -> io::Result<()> {
    for outcome in report.outcomes() {
        if let Disposition::Preview(content) = &outcome.disposition {
            writeln!(stdout, "-- {} --", outcome.path.display())?;
            stdout.write_all(content)?;
        }
    }
    stdout.flush()
}

/// Writes one line per diagnostic of every failed file.
pub(crate) fn write_failures<E: Write>(stderr: &mut E, report: &RunReport) -> io::Result<()> {
    for failure in report.failures() {
        for line in failure.diagnostics() {
            writeln!(stderr, "{line}")?;
        }
    }
    stderr.flush()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_report_writes_nothing() {
        let report = RunReport::default();
        let mut out = Vec::new();
        write_previews(&mut out, &report).expect("write previews");
        write_failures(&mut out, &report).expect("write failures");
        assert!(out.is_empty());
    }
}
