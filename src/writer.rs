//! Persistence of generated components and edits to shared project files.
//!
//! Nothing touches its destination until [`ProjectWriter::commit`]: every
//! output is first staged into a temporary file next to its target, and the
//! staged files are renamed into place only once all of them exist. A failure
//! while staging drops the temporaries and leaves the project unchanged.
//!
//! The project is assumed to have a single writer at a time; no lock is taken.

use crate::error::{Error, Result};
use log::{debug, info, warn};
use std::fmt;
use std::fs;
use std::io::Write;
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;

const SUBDIRECTORY_DIRECTIVE: &str = "add_subdirectory(";

/// Result of an idempotent edit to a shared file.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EditOutcome {
    Inserted,
    AlreadyPresent,
}

impl fmt::Display for EditOutcome {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            EditOutcome::Inserted => write!(f, "Updated"),
            EditOutcome::AlreadyPresent => write!(f, "Unchanged"),
        }
    }
}

/// The `#include` line registering an internal node, e.g.
/// `#include "EdgeDetect/edge_detect.hpp"`.
pub fn registry_include(class_name: &str, file_base_name: &str) -> String {
    format!("#include \"{class_name}/{file_base_name}.hpp\"")
}

/// The build manifest directive for an external plugin, e.g.
/// `    add_subdirectory(./Plugins/EdgeDetect)`.
pub fn manifest_directive<P: AsRef<Path>>(output_root: P, class_name: &str) -> String {
    let root = output_root.as_ref().to_string_lossy().replace('\\', "/");
    let root = root.trim_start_matches("./").trim_end_matches('/');
    format!("    {SUBDIRECTORY_DIRECTIVE}./{root}/{class_name})")
}

/// Inserts `include` right before the first blank line, or at the end when
/// the file has none. Nothing changes when the exact line already exists.
pub fn insert_registry_include(lines: &[String], include: &str) -> (Vec<String>, EditOutcome) {
    if lines.iter().any(|line| line.trim() == include.trim()) {
        return (lines.to_vec(), EditOutcome::AlreadyPresent);
    }
    let at = lines
        .iter()
        .position(|line| line.trim().is_empty())
        .unwrap_or(lines.len());

    let mut edited = lines.to_vec();
    edited.insert(at, include.to_string());
    (edited, EditOutcome::Inserted)
}

/// Returns the directory a subdirectory directive points at, if `line` is one.
fn directive_target(line: &str) -> Option<&str> {
    let start = line.find(SUBDIRECTORY_DIRECTIVE)? + SUBDIRECTORY_DIRECTIVE.len();
    let rest = &line[start..];
    let arg = &rest[..rest.find(')')?];
    arg.trim().trim_end_matches('/').rsplit('/').next()
}

/// Inserts `directive` at the end of the section opened by `section_marker`.
///
/// The section ends at its first blank line (or end of file). A section that
/// already includes `class_name` is left as is. Returns `None` when the
/// marker is absent.
pub fn insert_manifest_directive(
    lines: &[String],
    section_marker: &str,
    class_name: &str,
    directive: &str,
) -> Option<(Vec<String>, EditOutcome)> {
    let start = lines.iter().position(|line| line.contains(section_marker))?;

    let mut end = lines.len();
    for (index, line) in lines.iter().enumerate().skip(start + 1) {
        if directive_target(line) == Some(class_name) {
            return Some((lines.to_vec(), EditOutcome::AlreadyPresent));
        }
        if line.trim().is_empty() {
            end = index;
            break;
        }
    }

    let mut edited = lines.to_vec();
    edited.insert(end, directive.to_string());
    Some((edited, EditOutcome::Inserted))
}

/// Line ending convention of a text file, kept when the file is rewritten.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LineStyle {
    pub crlf: bool,
    pub final_newline: bool,
}

impl Default for LineStyle {
    fn default() -> Self {
        Self {
            crlf: false,
            final_newline: true,
        }
    }
}

impl LineStyle {
    pub fn detect(content: &str) -> Self {
        Self {
            crlf: content.contains("\r\n"),
            final_newline: content.is_empty() || content.ends_with('\n'),
        }
    }

    fn eol(&self) -> &'static str {
        if self.crlf {
            "\r\n"
        } else {
            "\n"
        }
    }

    /// Joins `lines` back into file content.
    pub fn join(&self, lines: &[String]) -> String {
        let mut content = lines.join(self.eol());
        if self.final_newline && !lines.is_empty() {
            content.push_str(self.eol());
        }
        content
    }
}

/// A shared project file split into lines.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SharedFile {
    pub lines: Vec<String>,
    pub style: LineStyle,
}

/// Reads a shared file as lines, remembering its line endings.
///
/// # Errors
/// * `Error::MissingSharedFile` if `path` does not exist
pub fn read_shared_file<P: AsRef<Path>>(path: P) -> Result<SharedFile> {
    let path = path.as_ref();
    if !path.is_file() {
        return Err(Error::MissingSharedFile(path.to_path_buf()));
    }
    let content = fs::read_to_string(path)?;
    Ok(SharedFile {
        lines: content.lines().map(str::to_string).collect(),
        style: LineStyle::detect(&content),
    })
}

struct StagedFile {
    temp: NamedTempFile,
    target: PathBuf,
    shared: bool,
}

/// Collects every output of a generation run and writes them together.
///
/// Component files are moved into place before the shared files, so the
/// registry header and build manifest never name a component whose sources
/// were not written.
#[derive(Default)]
pub struct ProjectWriter {
    staged: Vec<StagedFile>,
}

impl ProjectWriter {
    pub fn new() -> Self {
        Self::default()
    }

    /// Paths that [`ProjectWriter::commit`] will write, in staging order.
    pub fn pending(&self) -> Vec<&Path> {
        self.staged.iter().map(|staged| staged.target.as_path()).collect()
    }

    /// Stages `lines` to replace (or create) `target`.
    ///
    /// Missing parent directories are created; existing files are
    /// overwritten on commit without a backup.
    pub fn stage<P: AsRef<Path>>(&mut self, target: P, lines: &[String]) -> Result<()> {
        self.stage_content(target.as_ref(), &LineStyle::default().join(lines), false)
    }

    fn stage_content(&mut self, target: &Path, content: &str, shared: bool) -> Result<()> {
        let parent = match target.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        };
        fs::create_dir_all(&parent)?;

        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(content.as_bytes())?;
        temp.as_file().sync_all()?;
        match_permissions(temp.path(), target)?;

        debug!("Staged {} at {}", target.display(), temp.path().display());
        self.staged.push(StagedFile {
            temp,
            target: target.to_path_buf(),
            shared,
        });
        Ok(())
    }

    /// Stages the generated sources of one component under
    /// `<output_root>/<class_name>/` and returns that directory.
    ///
    /// `build_file` is the optional per-plugin build file, written as
    /// `<output_root>/<class_name>/<name>`.
    pub fn write_component<P: AsRef<Path>>(
        &mut self,
        output_root: P,
        class_name: &str,
        file_base_name: &str,
        header: &[String],
        implementation: &[String],
        build_file: Option<(&str, &[String])>,
    ) -> Result<PathBuf> {
        let component_dir = output_root.as_ref().join(class_name);
        if let Some((name, lines)) = build_file {
            self.stage(component_dir.join(name), lines)?;
        }
        self.stage(component_dir.join(format!("{file_base_name}.hpp")), header)?;
        self.stage(component_dir.join(format!("{file_base_name}.cpp")), implementation)?;
        Ok(component_dir)
    }

    /// Stages the registry header with `include` added.
    ///
    /// # Errors
    /// * `Error::MissingSharedFile` if the registry header does not exist
    pub fn edit_registry_header<P: AsRef<Path>>(
        &mut self,
        path: P,
        include: &str,
    ) -> Result<EditOutcome> {
        let path = path.as_ref();
        let file = read_shared_file(path)?;
        let (edited, outcome) = insert_registry_include(&file.lines, include);
        match outcome {
            EditOutcome::Inserted => self.stage_content(path, &file.style.join(&edited), true)?,
            EditOutcome::AlreadyPresent => {
                warn!("{} already contains '{}'", path.display(), include)
            }
        }
        Ok(outcome)
    }

    /// Stages the build manifest with `directive` added to its plugin section.
    ///
    /// # Errors
    /// * `Error::MissingSharedFile` if the manifest does not exist
    /// * `Error::ManifestSectionNotFound` if the section marker is absent
    pub fn edit_build_manifest<P: AsRef<Path>>(
        &mut self,
        path: P,
        section_marker: &str,
        class_name: &str,
        directive: &str,
    ) -> Result<EditOutcome> {
        let path = path.as_ref();
        let file = read_shared_file(path)?;
        let (edited, outcome) =
            insert_manifest_directive(&file.lines, section_marker, class_name, directive).ok_or_else(
                || Error::ManifestSectionNotFound {
                    marker: section_marker.to_string(),
                    path: path.to_path_buf(),
                },
            )?;
        match outcome {
            EditOutcome::Inserted => self.stage_content(path, &file.style.join(&edited), true)?,
            EditOutcome::AlreadyPresent => {
                warn!("{} already includes {}", path.display(), class_name)
            }
        }
        Ok(outcome)
    }

    /// Moves every staged file into place and returns the written paths,
    /// component files first and shared files last.
    pub fn commit(self) -> Result<Vec<PathBuf>> {
        let mut written = Vec::with_capacity(self.staged.len());
        let (shared, component): (Vec<_>, Vec<_>) =
            self.staged.into_iter().partition(|staged| staged.shared);
        for StagedFile { temp, target, .. } in component.into_iter().chain(shared) {
            temp.persist(&target).map_err(|e| Error::IoError(e.error))?;
            info!("Wrote {}", target.display());
            written.push(target);
        }
        Ok(written)
    }
}

/// Gives the staged file the target's permissions, or regular file
/// permissions for a new file.
fn match_permissions(temp: &Path, target: &Path) -> Result<()> {
    if let Ok(metadata) = fs::metadata(target) {
        fs::set_permissions(temp, metadata.permissions())?;
        return Ok(());
    }
    #[cfg(unix)]
    {
        use std::os::unix::fs::PermissionsExt;
        fs::set_permissions(temp, fs::Permissions::from_mode(0o644))?;
    }
    Ok(())
}
