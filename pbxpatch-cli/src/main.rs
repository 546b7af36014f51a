mod config;

use anyhow::Context;
use camino::{Utf8Path, Utf8PathBuf};
use clap::Parser;
use config::ConfigMerger;
use fs_err as fs;
use pbxpatch_edit::{ApplyOptions, ManifestPatcher};
use pbxpatch_render::render_report_md;
use pbxpatch_types::report::{PatchReport, ToolInfo};
use pbxpatch_types::target::PatchTarget;
use std::process::ExitCode;
use tracing::{debug, error, info};
use tracing_subscriber::EnvFilter;

#[derive(Debug, Parser)]
#[command(
    name = "pbxpatch",
    version,
    about = "Adds GoogleMaps.bundle to the EcoVision Xcode project."
)]
struct Cli {
    /// Directory containing EcoVision.xcodeproj (default: current directory).
    #[arg(long, default_value = ".")]
    project_root: Utf8PathBuf,

    /// Print the patch instead of writing the manifest.
    #[arg(long, default_value_t = false)]
    dry_run: bool,

    /// Write report.json, report.md and patch.diff to this directory.
    #[arg(long)]
    out_dir: Option<Utf8PathBuf>,
}

fn main() -> ExitCode {
    if let Err(e) = real_main() {
        error!("{:?}", e);
        return ExitCode::from(1);
    }
    ExitCode::from(0)
}

fn real_main() -> anyhow::Result<()> {
    // stdout carries only the result message or the dry-run patch.
    tracing_subscriber::fmt()
        .with_env_filter(EnvFilter::from_default_env())
        .with_writer(std::io::stderr)
        .init();

    let cli = Cli::parse();
    cmd_patch(cli)
}

fn cmd_patch(args: Cli) -> anyhow::Result<()> {
    let project_root = args.project_root;

    let file_config =
        config::load_or_default(&project_root).context("load pbxpatch.toml config")?;
    let merged = ConfigMerger::new(file_config).merge_run_args(
        &project_root,
        args.dry_run,
        args.out_dir,
    );
    debug!(
        "merged config: dry_run={}, out_dir={:?}",
        merged.dry_run, merged.out_dir
    );

    let patcher = ManifestPatcher::new(PatchTarget::default())?;

    let opts = ApplyOptions {
        dry_run: merged.dry_run,
    };
    let (report, patch) = patcher.apply(&project_root, &opts, tool_info())?;

    if let Some(out_dir) = &merged.out_dir {
        write_artifacts(out_dir, &report, &patch)?;
    }

    if merged.dry_run {
        print!("{}", patch);
    } else {
        println!(
            "Successfully added {} to the Xcode project!",
            patcher.target().bundle_name
        );
    }
    Ok(())
}

fn write_artifacts(out_dir: &Utf8Path, report: &PatchReport, patch: &str) -> anyhow::Result<()> {
    fs::create_dir_all(out_dir).with_context(|| format!("create {}", out_dir))?;
    write_json(&out_dir.join("report.json"), report)?;
    fs::write(out_dir.join("report.md"), render_report_md(report))?;
    fs::write(out_dir.join("patch.diff"), patch)?;
    info!("wrote artifacts to {}", out_dir);
    Ok(())
}

fn write_json<T: serde::Serialize>(path: &Utf8Path, v: &T) -> anyhow::Result<()> {
    let s = serde_json::to_string_pretty(v).context("serialize json")?;
    fs::write(path, s).with_context(|| format!("write {}", path))?;
    Ok(())
}

fn tool_info() -> ToolInfo {
    ToolInfo {
        name: "pbxpatch".to_string(),
        version: Some(env!("CARGO_PKG_VERSION").to_string()),
        repo: None,
        commit: None,
    }
}
