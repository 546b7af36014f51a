//! Edit engine for pbxpatch.
//!
//! Responsibilities:
//! - Locate the four manifest regions with fixed regexes.
//! - Splice the bundle entries into them (in-memory or on disk).
//! - Generate a unified diff preview.
//!
//! Each insertion is best-effort. A region that does not match is left
//! alone and recorded as a skipped step; it is never an error.

pub mod error;
pub mod sections;

pub use error::{PatchError, PatchResult};

use camino::Utf8Path;
use chrono::Utc;
use diffy::PatchFormatter;
use fs_err as fs;
use pbxpatch_types::ident::EntryIds;
use pbxpatch_types::report::{
    ManifestInfo, PatchReport, StepKind, StepResult, StepStatus, ToolInfo,
};
use pbxpatch_types::target::PatchTarget;
use regex::Regex;
use sections::Section;
use sha2::{Digest, Sha256};
use tracing::{debug, info};

#[derive(Debug, Clone, Default)]
pub struct ApplyOptions {
    pub dry_run: bool,
}

/// Result of patching manifest text in memory.
#[derive(Debug, Clone)]
pub struct PatchOutcome {
    pub content: String,
    pub steps: Vec<StepResult>,
}

impl PatchOutcome {
    pub fn applied(&self, step: StepKind) -> bool {
        self.steps
            .iter()
            .any(|s| s.step == step && s.status == StepStatus::Applied)
    }
}

pub struct ManifestPatcher {
    target: PatchTarget,
    file_refs: Section,
    build_files: Section,
    resources: Section,
    main_group: Section,
    root_group: Regex,
}

impl ManifestPatcher {
    pub fn new(target: PatchTarget) -> PatchResult<Self> {
        Ok(Self {
            file_refs: Section::marker("PBXFileReference")?,
            build_files: Section::marker("PBXBuildFile")?,
            resources: Section::resources_phase(&target.resources_phase_id)?,
            main_group: Section::group_children(&target.main_group_id)?,
            root_group: sections::synchronized_root_group(
                &target.root_group_id,
                &target.root_group_name,
            )?,
            target,
        })
    }

    pub fn target(&self) -> &PatchTarget {
        &self.target
    }

    pub fn file_reference_line(&self, ids: &EntryIds) -> String {
        let t = &self.target;
        format!(
            "\t\t{id} /* {name} */ = {{isa = PBXFileReference; lastKnownFileType = {ty}; name = {name}; path = {path}; sourceTree = {tree}; }};",
            id = ids.file_ref,
            name = t.bundle_name,
            ty = t.file_type,
            path = t.bundle_path,
            tree = t.source_tree,
        )
    }

    pub fn build_file_line(&self, ids: &EntryIds) -> String {
        format!(
            "\t\t{id} /* {name} in Resources */ = {{isa = PBXBuildFile; fileRef = {file_ref} /* {name} */; }};",
            id = ids.build_file,
            name = self.target.bundle_name,
            file_ref = ids.file_ref,
        )
    }

    pub fn resources_entry_line(&self, ids: &EntryIds) -> String {
        format!(
            "\t\t\t\t{} /* {} in Resources */,",
            ids.build_file, self.target.bundle_name
        )
    }

    pub fn group_entry_line(&self, ids: &EntryIds) -> String {
        format!("\t\t\t\t{} /* {} */,", ids.file_ref, self.target.bundle_name)
    }

    /// Run the four insertions over `content`, in order.
    pub fn patch_content(&self, content: &str, ids: &EntryIds) -> PatchOutcome {
        let mut current = content.to_string();
        let mut steps = Vec::with_capacity(StepKind::ALL.len());

        for step in StepKind::ALL {
            let patched = match step {
                StepKind::FileReference => self
                    .file_refs
                    .append_line(&current, &self.file_reference_line(ids)),
                StepKind::BuildFile => self
                    .build_files
                    .append_line(&current, &self.build_file_line(ids)),
                StepKind::ResourcesPhase => self
                    .resources
                    .append_line(&current, &self.resources_entry_line(ids)),
                StepKind::MainGroup => {
                    if self.root_group.is_match(&current) {
                        self.main_group
                            .append_line(&current, &self.group_entry_line(ids))
                    } else {
                        debug!(
                            group = %self.target.root_group_id,
                            "synchronized root group not found"
                        );
                        None
                    }
                }
            };

            match patched {
                Some(next) => {
                    debug!(step = step.label(), "applied");
                    current = next;
                    steps.push(StepResult::applied(step));
                }
                None => {
                    debug!(step = step.label(), "pattern not found, skipping");
                    steps.push(StepResult::skipped(step, "pattern not found"));
                }
            }
        }

        PatchOutcome {
            content: current,
            steps,
        }
    }

    /// Patch the manifest under `project_root` with freshly generated ids.
    pub fn apply(
        &self,
        project_root: &Utf8Path,
        opts: &ApplyOptions,
        tool: ToolInfo,
    ) -> PatchResult<(PatchReport, String)> {
        self.apply_with_ids(project_root, EntryIds::generate(), opts, tool)
    }

    /// Patch the manifest under `project_root`. When `opts.dry_run` is true
    /// nothing is written, but the report and patch are still produced.
    pub fn apply_with_ids(
        &self,
        project_root: &Utf8Path,
        ids: EntryIds,
        opts: &ApplyOptions,
        tool: ToolInfo,
    ) -> PatchResult<(PatchReport, String)> {
        let started_at = Utc::now();
        let rel = &self.target.manifest_path;
        let abs = if rel.is_absolute() {
            rel.to_path_buf()
        } else {
            project_root.join(rel)
        };

        if !abs.is_file() {
            return Err(PatchError::ManifestMissing { path: abs });
        }

        let raw = fs::read_to_string(&abs).map_err(|source| PatchError::Io {
            path: abs.clone(),
            source,
        })?;
        // The locators are anchored on `\n`; CRLF manifests are rewritten with LF.
        let before = raw.replace("\r\n", "\n");

        debug!(file_ref = %ids.file_ref, build_file = %ids.build_file, "generated ids");
        let outcome = self.patch_content(&before, &ids);
        let changed = outcome.content != raw;

        if changed && !opts.dry_run {
            fs::write(&abs, &outcome.content).map_err(|source| PatchError::Io {
                path: abs.clone(),
                source,
            })?;
            info!("wrote {}", abs);
        }

        let patch = render_patch(rel, &before, &outcome.content);

        let manifest = ManifestInfo {
            path: rel.to_string(),
            written: changed && !opts.dry_run,
            sha256_before: Some(sha256_hex(raw.as_bytes())),
            sha256_after: Some(sha256_hex(outcome.content.as_bytes())),
        };
        let mut report = PatchReport::new(tool, manifest, ids);
        for step in outcome.steps {
            report.push_step(step);
        }
        report.run.started_at = Some(started_at);
        report.run.ended_at = Some(Utc::now());

        Ok((report, patch))
    }
}

pub fn sha256_hex(bytes: &[u8]) -> String {
    let mut hasher = Sha256::new();
    hasher.update(bytes);
    hex::encode(hasher.finalize())
}

/// Unified diff of one file, `git diff` style. Empty when nothing changed.
pub fn render_patch(path: &Utf8Path, before: &str, after: &str) -> String {
    if before == after {
        return String::new();
    }

    let mut out = String::new();
    out.push_str(&format!("diff --git a/{0} b/{0}\n", path));
    out.push_str(&format!("--- a/{0}\n+++ b/{0}\n", path));

    let formatter = PatchFormatter::new();
    let patch = diffy::create_patch(before, after);
    let body = formatter.fmt_patch(&patch).to_string();
    // diffy emits its own ---/+++ header; keep only the hunks.
    let hunks = match body.split_once("\n@@") {
        Some((_, rest)) => format!("@@{rest}"),
        None => body.clone(),
    };
    out.push_str(&hunks);
    if !out.ends_with('\n') {
        out.push('\n');
    }

    out
}
