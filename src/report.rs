use indicatif::{ProgressBar, ProgressDrawTarget, ProgressState, ProgressStyle};
use std::fmt::{self, Write};

const RULE_WIDTH: usize = 35;

/// Progress bar drawn on stdout, redrawn in place.
///
/// The length is unknown until the metadata is loaded; operations set it.
pub fn logo_bar() -> Result<ProgressBar, indicatif::style::TemplateError> {
    let style = ProgressStyle::with_template("Progress: [{bar:40}] {pos}/{len} ({percent_tenths}%)")?
        .with_key("percent_tenths", |state: &ProgressState, w: &mut dyn Write| {
            let _ = write!(w, "{:.1}", state.fraction() * 100.0);
        })
        .progress_chars("█ ");

    let pb = ProgressBar::with_draw_target(None, ProgressDrawTarget::stdout());
    pb.set_style(style);
    Ok(pb)
}

/// Render a titled tally box shared by both operations' reports.
pub(crate) fn write_tally(
    f: &mut fmt::Formatter<'_>,
    title: &str,
    rows: &[(&str, usize)],
) -> fmt::Result {
    let rule = "=".repeat(RULE_WIDTH);
    writeln!(f, "{rule}")?;
    writeln!(f, "📊 {title}")?;
    writeln!(f, "{rule}")?;
    for (label, count) in rows {
        writeln!(f, "{label}: {count}")?;
    }
    write!(f, "{rule}")
}

#[cfg(test)]
mod tests {
    use super::*;

    struct Sample;

    impl fmt::Display for Sample {
        fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
            write_tally(f, "Sample Report", &[("✅ Done", 3), ("⚠️ Skipped", 1)])
        }
    }

    #[test]
    fn tally_layout() {
        let rendered = Sample.to_string();
        let lines: Vec<_> = rendered.lines().collect();
        assert_eq!(lines.len(), 6);
        assert_eq!(lines[0], "=".repeat(RULE_WIDTH));
        assert_eq!(lines[1], "📊 Sample Report");
        assert_eq!(lines[3], "✅ Done: 3");
        assert_eq!(lines[4], "⚠️ Skipped: 1");
        assert_eq!(lines[5], lines[0]);
    }

    #[test]
    fn bar_template_is_valid() {
        let pb = logo_bar().unwrap();
        pb.set_draw_target(ProgressDrawTarget::hidden());
        pb.set_length(4);
        pb.inc(2);
        assert_eq!(pb.position(), 2);
    }
}
