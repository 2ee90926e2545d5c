//! Conversion of `.oft` templates into `.eml` files.

pub mod batch;
pub mod content_type;
pub mod mime;

use std::path::{Path, PathBuf};

use tracing::info;

use crate::error::{ConvertError, Result};
use crate::parser::oft;

/// Extension of produced files.
pub const EML_EXTENSION: &str = "eml";

/// Convert one template.
///
/// When `output` is `None` the message is written to `<stem>.eml` in the
/// current directory. Returns the path that was written.
pub fn convert_oft_to_eml(input: impl AsRef<Path>, output: Option<&Path>) -> Result<PathBuf> {
    let input = input.as_ref();
    if !input.exists() {
        return Err(ConvertError::FileNotFound(input.to_path_buf()));
    }

    let output = match output {
        Some(path) => path.to_path_buf(),
        None => default_output_path(input)?,
    };

    let template = oft::read_template_file(input)?;
    let eml = mime::build_eml(&template)?;
    write_eml(&output, &eml)?;

    info!(
        input = %input.display(),
        output = %output.display(),
        attachments = template.attachments.len(),
        bytes = eml.len(),
        "Converted template"
    );
    Ok(output)
}

/// `<stem>.eml`, relative to the current directory.
pub fn default_output_path(input: &Path) -> Result<PathBuf> {
    Ok(PathBuf::from(eml_file_name(input)?))
}

/// `<output_dir>/<stem>.eml`.
///
/// With `overwrite == false`, an existing file gets a numeric suffix instead
/// of being replaced.
pub fn output_path_in(input: &Path, output_dir: &Path, overwrite: bool) -> Result<PathBuf> {
    let path = output_dir.join(eml_file_name(input)?);
    if overwrite {
        Ok(path)
    } else {
        Ok(unique_path(&path))
    }
}

fn eml_file_name(input: &Path) -> Result<String> {
    let stem = input
        .file_stem()
        .map(|s| s.to_string_lossy().to_string())
        .filter(|s| !s.is_empty())
        .ok_or_else(|| ConvertError::InvalidPath(input.display().to_string()))?;
    Ok(format!("{stem}.{EML_EXTENSION}"))
}

/// Write message bytes, creating the parent directory if needed.
fn write_eml(path: &Path, bytes: &[u8]) -> Result<()> {
    if let Some(parent) = path.parent().filter(|p| !p.as_os_str().is_empty()) {
        std::fs::create_dir_all(parent).map_err(|e| ConvertError::io(parent, e))?;
    }
    std::fs::write(path, bytes).map_err(|e| ConvertError::io(path, e))
}

/// Next free `<stem>_<n>.<ext>` sibling of `path`, or `path` itself when unused.
fn unique_path(path: &Path) -> PathBuf {
    if !path.exists() {
        return path.to_path_buf();
    }

    let stem = path.file_stem().and_then(|s| s.to_str()).unwrap_or("message");
    let ext = path.extension().and_then(|e| e.to_str());
    let parent = path.parent().unwrap_or(Path::new("."));
    let numbered = |n: u32| match ext {
        Some(ext) => parent.join(format!("{stem}_{n}.{ext}")),
        None => parent.join(format!("{stem}_{n}")),
    };

    (1..u32::MAX)
        .map(numbered)
        .find(|candidate| !candidate.exists())
        .unwrap_or_else(|| numbered(u32::MAX))
}
