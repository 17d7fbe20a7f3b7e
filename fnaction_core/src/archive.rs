// SPDX-FileCopyrightText: © 2024 Technical University of Munich, Chair of Connected Mobility
// SPDX-License-Identifier: MIT
use std::io::Write;

/// Packs the function code into an in-memory zip archive.
#[derive(Debug, Clone)]
pub struct ArchiveBuilder {
    options: zip::write::SimpleFileOptions,
}

impl Default for ArchiveBuilder {
    fn default() -> Self {
        Self {
            options: zip::write::SimpleFileOptions::default().compression_method(zip::CompressionMethod::Deflated),
        }
    }
}

impl ArchiveBuilder {
    /// Zip `source_folder` with paths relative to it.
    ///
    /// If `common_folder` is given, it is added relative to its own parent,
    /// i.e., the archive contains a top-level directory named after it.
    pub fn build(&self, source_folder: &std::path::Path, common_folder: Option<&std::path::Path>) -> Result<Vec<u8>, crate::DeployError> {
        let mut writer = zip::ZipWriter::new(std::io::Cursor::new(Vec::new()));

        let source_folder = std::fs::canonicalize(source_folder)?;
        self.add_tree(&mut writer, &source_folder, &source_folder)?;

        if let Some(common_folder) = common_folder {
            let common_folder = std::fs::canonicalize(common_folder)?;
            let base = common_folder.parent().unwrap_or(&common_folder).to_path_buf();
            log::info!("- Added common directory: '{}' to the file/function", common_folder.display());
            self.add_tree(&mut writer, &common_folder, &base)?;
        }

        Ok(writer.finish()?.into_inner())
    }

    fn add_tree(
        &self,
        writer: &mut zip::ZipWriter<std::io::Cursor<Vec<u8>>>,
        root: &std::path::Path,
        base: &std::path::Path,
    ) -> Result<(), crate::DeployError> {
        for entry in walkdir::WalkDir::new(root).follow_links(true).sort_by_file_name() {
            let entry = entry?;
            let name = match entry_name(entry.path(), base) {
                Some(name) => name,
                // The root of the source folder itself.
                None => continue,
            };
            if entry.file_type().is_dir() {
                writer.add_directory(name, self.options)?;
            } else {
                writer.start_file(name, self.options)?;
                writer.write_all(&std::fs::read(entry.path())?)?;
            }
        }
        Ok(())
    }
}

// Archive entries always use forward slashes.
fn entry_name(path: &std::path::Path, base: &std::path::Path) -> Option<String> {
    let relative = path.strip_prefix(base).ok()?;
    let parts: Vec<String> = relative.components().map(|c| c.as_os_str().to_string_lossy().into_owned()).collect();
    if parts.is_empty() {
        None
    } else {
        Some(parts.join("/"))
    }
}
