//! Rendering helpers (markdown) for human-readable artifacts.

use pbxpatch_types::report::{PatchReport, StepStatus};

pub fn render_report_md(report: &PatchReport) -> String {
    let mut out = String::new();
    out.push_str("# pbxpatch report\n\n");
    out.push_str(&format!("- Manifest: `{}`\n", report.manifest.path));
    out.push_str(&format!(
        "- Written: `{}`\n",
        report.manifest.written
    ));
    out.push_str(&format!(
        "- Applied: {}\n- Skipped: {}\n\n",
        report.summary.applied, report.summary.skipped
    ));

    out.push_str("## Identifiers\n\n");
    out.push_str(&format!("- File reference: `{}`\n", report.ids.file_ref));
    out.push_str(&format!("- Build file: `{}`\n\n", report.ids.build_file));

    out.push_str("## Steps\n\n");
    if report.steps.is_empty() {
        out.push_str("_No steps recorded._\n");
        return out;
    }

    for (i, s) in report.steps.iter().enumerate() {
        out.push_str(&format!(
            "{}. `{}`: `{}`",
            i + 1,
            s.step.label(),
            status_label(s.status)
        ));
        if let Some(msg) = &s.message {
            out.push_str(&format!(" ({})", msg));
        }
        out.push('\n');
    }

    if let (Some(before), Some(after)) = (
        report.manifest.sha256_before.as_deref(),
        report.manifest.sha256_after.as_deref(),
    ) {
        out.push_str(&format!("\n**sha256** {} → {}\n", before, after));
    }

    out
}

fn status_label(s: StepStatus) -> &'static str {
    match s {
        StepStatus::Applied => "applied",
        StepStatus::Skipped => "skipped",
    }
}
