use camino::Utf8PathBuf;
use serde::{Deserialize, Serialize};

/// The fixed edit pbxpatch performs: which manifest, which bundle, and the
/// literal object ids of the blocks it appends to.
///
/// The ids are copied from the one project this tool was written for. A
/// manifest without them simply has nothing to match.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PatchTarget {
    /// Manifest path, relative to the project root.
    pub manifest_path: Utf8PathBuf,

    /// Display name of the bundle (`name = ...` and the `/* ... */` comments).
    pub bundle_name: String,

    /// Path recorded on the file reference.
    pub bundle_path: String,

    pub file_type: String,
    pub source_tree: String,

    /// `PBXResourcesBuildPhase` whose `files` list receives the build file.
    pub resources_phase_id: String,

    /// Top-level `PBXGroup` whose `children` list receives the file reference.
    pub main_group_id: String,

    /// `PBXFileSystemSynchronizedRootGroup` that must exist before the main
    /// group is touched.
    pub root_group_id: String,
    pub root_group_name: String,
}

impl Default for PatchTarget {
    fn default() -> Self {
        Self {
            manifest_path: Utf8PathBuf::from("EcoVision.xcodeproj/project.pbxproj"),
            bundle_name: "GoogleMaps.bundle".to_string(),
            bundle_path: "EcoVision/GoogleMaps.bundle".to_string(),
            file_type: "wrapper.cfbundle".to_string(),
            source_tree: "SOURCE_ROOT".to_string(),
            resources_phase_id: "C448AFA12E447AB1004CDA11".to_string(),
            main_group_id: "C448AF9A2E447AB1004CDA11".to_string(),
            root_group_id: "C448AFA52E447AB1004CDA11".to_string(),
            root_group_name: "EcoVision".to_string(),
        }
    }
}
