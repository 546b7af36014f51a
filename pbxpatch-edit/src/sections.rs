//! Regex locators for the manifest regions pbxpatch appends to.
//!
//! Every locator captures three groups: the opening text, the body, and the
//! closing text. The body is either empty or a run of complete lines, so an
//! entry is appended by inserting one line at the end of the body.

use regex::Regex;
use std::ops::Range;

/// A compiled locator for one appendable region.
#[derive(Debug, Clone)]
pub struct Section {
    re: Regex,
}

impl Section {
    /// A `/* Begin <isa> section */` ... `/* End <isa> section */` listing.
    pub fn marker(isa: &str) -> Result<Self, regex::Error> {
        let isa = regex::escape(isa);
        Self::compile(&format!(
            r"(?s)(/\* Begin {isa} section \*/\n)(.*?)(/\* End {isa} section \*/\n)"
        ))
    }

    /// The `files` list of the resources build phase keyed by `id`.
    pub fn resources_phase(id: &str) -> Result<Self, regex::Error> {
        let id = regex::escape(id);
        Self::compile(&format!(
            concat!(
                r"(?s)({id} /\* Resources \*/ = \{{\n",
                r"\t\t\tisa = PBXResourcesBuildPhase;\n",
                r"\t\t\tbuildActionMask = 2147483647;\n",
                r"\t\t\tfiles = \(\n)",
                r"(.*?)",
                r"(\t\t\t\);\n",
                r"\t\t\trunOnlyForDeploymentPostprocessing = 0;\n",
                r"\t\t\}};)",
            ),
            id = id
        ))
    }

    /// The `children` list of the `PBXGroup` keyed by `id`.
    pub fn group_children(id: &str) -> Result<Self, regex::Error> {
        let id = regex::escape(id);
        Self::compile(&format!(
            concat!(
                r"(?s)({id} = \{{\n",
                r"\t\t\tisa = PBXGroup;\n",
                r"\t\t\tchildren = \(\n)",
                r"(.*?)",
                r"(\t\t\t\);\n",
                r#"\t\t\tsourceTree = "<group>";\n"#,
                r"\t\t\}};)",
            ),
            id = id
        ))
    }

    fn compile(pattern: &str) -> Result<Self, regex::Error> {
        Ok(Self {
            re: Regex::new(pattern)?,
        })
    }

    /// Byte range of the first matching region's body.
    pub fn body(&self, content: &str) -> Option<Range<usize>> {
        self.re
            .captures(content)
            .and_then(|caps| caps.get(2))
            .map(|m| m.range())
    }

    /// Append `line` to the end of the first matching body. `None` when the
    /// region is not present.
    pub fn append_line(&self, content: &str, line: &str) -> Option<String> {
        let body = self.body(content)?;
        Some(splice_line(content, body, line))
    }
}

/// Locator for the synchronized root group that gates the main group edit.
pub fn synchronized_root_group(id: &str, name: &str) -> Result<Regex, regex::Error> {
    let id = regex::escape(id);
    let name = regex::escape(name);
    Regex::new(&format!(
        concat!(
            r"{id} /\* {name} \*/ = \{{\n",
            r"\t\t\tisa = PBXFileSystemSynchronizedRootGroup;\n",
            r"\t\t\texceptions = \(\n",
            r"\t\t\t\);\n",
            r"\t\t\tpath = {name};\n",
            r#"\t\t\tsourceTree = "<group>";\n"#,
            r"\t\t\}};",
        ),
        id = id,
        name = name
    ))
}

fn splice_line(content: &str, body: Range<usize>, line: &str) -> String {
    let mut out = String::with_capacity(content.len() + line.len() + 2);
    out.push_str(&content[..body.end]);
    if !body.is_empty() && !content[body.clone()].ends_with('\n') {
        out.push('\n');
    }
    out.push_str(line);
    out.push('\n');
    out.push_str(&content[body.end..]);
    out
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    const BUILD_FILES: &str = "// !$*UTF8*$!\n\
/* Begin PBXBuildFile section */\n\
\t\tAAAA /* a.swift in Sources */ = {isa = PBXBuildFile; };\n\
/* End PBXBuildFile section */\n\
\n";

    #[test]
    fn marker_body_covers_entries_only() {
        let section = Section::marker("PBXBuildFile").unwrap();
        let body = section.body(BUILD_FILES).unwrap();
        assert_eq!(
            &BUILD_FILES[body],
            "\t\tAAAA /* a.swift in Sources */ = {isa = PBXBuildFile; };\n"
        );
    }

    #[test]
    fn marker_append_lands_before_end_marker() {
        let section = Section::marker("PBXBuildFile").unwrap();
        let out = section.append_line(BUILD_FILES, "\t\tBBBB = {};").unwrap();
        assert_eq!(
            out,
            "// !$*UTF8*$!\n\
/* Begin PBXBuildFile section */\n\
\t\tAAAA /* a.swift in Sources */ = {isa = PBXBuildFile; };\n\
\t\tBBBB = {};\n\
/* End PBXBuildFile section */\n\
\n"
        );
    }

    #[test]
    fn marker_append_into_empty_section() {
        let content = "/* Begin PBXFileReference section */\n/* End PBXFileReference section */\n";
        let section = Section::marker("PBXFileReference").unwrap();
        let out = section.append_line(content, "\t\tX;").unwrap();
        assert_eq!(
            out,
            "/* Begin PBXFileReference section */\n\t\tX;\n/* End PBXFileReference section */\n"
        );
    }

    #[test]
    fn missing_marker_yields_none() {
        let section = Section::marker("PBXFileReference").unwrap();
        assert!(section.append_line(BUILD_FILES, "\t\tX;").is_none());
    }

    #[test]
    fn body_without_trailing_newline_gets_one() {
        let out = splice_line("ab|cd", 0..2, "X");
        assert_eq!(out, "ab\nX\n|cd");
    }

    #[test]
    fn group_children_matches_exact_layout() {
        let content = "\t\tC448AF9A2E447AB1004CDA11 = {\n\
\t\t\tisa = PBXGroup;\n\
\t\t\tchildren = (\n\
\t\t\t\tAAAA /* EcoVision */,\n\
\t\t\t);\n\
\t\t\tsourceTree = \"<group>\";\n\
\t\t};\n";
        let section = Section::group_children("C448AF9A2E447AB1004CDA11").unwrap();
        let body = section.body(content).unwrap();
        assert_eq!(&content[body], "\t\t\t\tAAAA /* EcoVision */,\n");
    }

    #[test]
    fn group_children_ignores_other_ids() {
        let section = Section::group_children("0000").unwrap();
        let content = "C448AF9A2E447AB1004CDA11 = {\n\t\t\tisa = PBXGroup;\n\t\t\tchildren = (\n\t\t\t);\n\t\t\tsourceTree = \"<group>\";\n\t\t};";
        assert!(section.body(content).is_none());
    }

    #[test]
    fn root_group_pattern_requires_synchronized_isa() {
        let re = synchronized_root_group("C448AFA52E447AB1004CDA11", "EcoVision").unwrap();
        let synced = "C448AFA52E447AB1004CDA11 /* EcoVision */ = {\n\
\t\t\tisa = PBXFileSystemSynchronizedRootGroup;\n\
\t\t\texceptions = (\n\
\t\t\t);\n\
\t\t\tpath = EcoVision;\n\
\t\t\tsourceTree = \"<group>\";\n\
\t\t};";
        assert!(re.is_match(synced));
        assert!(!re.is_match(&synced.replace("PBXFileSystemSynchronizedRootGroup", "PBXGroup")));
    }
}
