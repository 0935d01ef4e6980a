use std::fs::{self, File};
use std::io::{BufWriter, Write};
use std::path::{Path, PathBuf};

use serde::Serialize;

use crate::types::{COLUMNS, Course};

pub const UNKNOWN_TOKEN: &str = "Unknown";

#[derive(Debug, thiserror::Error)]
pub enum PartitionError {
    #[error("Departments '{first}' and '{second}' both map to file token '{token}'")]
    TokenCollision {
        token: String,
        first: String,
        second: String,
    },
}

#[derive(Debug, thiserror::Error)]
pub enum WriteError {
    #[error("Failed to create directory {path}: {source}")]
    CreateDir {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to write {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to encode JSON for {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Failed to encode CSV for {path}: {source}")]
    Csv { path: PathBuf, source: csv::Error },
}

impl WriteError {
    pub fn path(&self) -> &Path {
        match self {
            WriteError::CreateDir { path, .. }
            | WriteError::Io { path, .. }
            | WriteError::Json { path, .. }
            | WriteError::Csv { path, .. } => path,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentGroup<'a> {
    pub department: &'a str,
    pub token: String,
    pub courses: Vec<&'a Course>,
}

impl DepartmentGroup<'_> {
    pub fn json_file_name(&self) -> String {
        format!("{}_courses.json", self.token)
    }

    pub fn csv_file_name(&self) -> String {
        format!("{}_courses.csv", self.token)
    }
}

/// Filesystem-safe form of a department name: keeps alphanumerics, spaces,
/// `-` and `_`, trims, then turns spaces into underscores.
pub fn sanitize_token(department: &str) -> String {
    let kept: String = department
        .chars()
        .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '-' | '_'))
        .collect();
    let token = kept.trim().replace(' ', "_");
    if token.is_empty() {
        UNKNOWN_TOKEN.to_string()
    } else {
        token
    }
}

pub fn partition(courses: &[Course]) -> Result<Vec<DepartmentGroup<'_>>, PartitionError> {
    let mut groups: Vec<DepartmentGroup> = Vec::new();

    for course in courses {
        if let Some(group) = groups
            .iter_mut()
            .find(|g| g.department == course.department)
        {
            group.courses.push(course);
            continue;
        }

        let token = sanitize_token(&course.department);
        if let Some(existing) = groups.iter().find(|g| g.token == token) {
            return Err(PartitionError::TokenCollision {
                token,
                first: existing.department.to_string(),
                second: course.department.clone(),
            });
        }
        groups.push(DepartmentGroup {
            department: &course.department,
            token,
            courses: vec![course],
        });
    }

    Ok(groups)
}

#[derive(Debug, Clone)]
pub struct CatalogWriter {
    data_dir: PathBuf,
}

impl CatalogWriter {
    pub fn new<P: Into<PathBuf>>(data_dir: P) -> Self {
        Self {
            data_dir: data_dir.into(),
        }
    }

    pub fn data_dir(&self) -> &Path {
        &self.data_dir
    }

    pub fn write_groups(&self, groups: &[DepartmentGroup]) -> Result<Vec<PathBuf>, WriteError> {
        ensure_dir(&self.data_dir)?;

        let mut written = Vec::with_capacity(groups.len() * 2);
        for group in groups {
            let json_path = self.data_dir.join(group.json_file_name());
            write_json(&json_path, &group.courses)?;
            written.push(json_path);

            let csv_path = self.data_dir.join(group.csv_file_name());
            write_csv(&csv_path, group.courses.iter().copied())?;
            written.push(csv_path);

            log::info!("Saved {} courses for {}", group.courses.len(), group.token);
        }

        log::info!(
            "Created {} major-specific files in {}/",
            written.len(),
            self.data_dir.display()
        );
        Ok(written)
    }

    pub fn write_master(
        &self,
        dir: &Path,
        stem: &str,
        courses: &[Course],
    ) -> Result<[PathBuf; 2], WriteError> {
        ensure_dir(dir)?;

        let json_path = dir.join(format!("{stem}.json"));
        write_json(&json_path, courses)?;
        log::info!("Saved {} courses to {}", courses.len(), json_path.display());

        let csv_path = dir.join(format!("{stem}.csv"));
        write_csv(&csv_path, courses.iter())?;
        log::info!("Saved {} courses to {}", courses.len(), csv_path.display());

        Ok([json_path, csv_path])
    }
}

pub(crate) fn ensure_dir(dir: &Path) -> Result<(), WriteError> {
    if dir.as_os_str().is_empty() {
        return Ok(());
    }
    fs::create_dir_all(dir).map_err(|source| WriteError::CreateDir {
        path: dir.to_path_buf(),
        source,
    })
}

fn create(path: &Path) -> Result<BufWriter<File>, WriteError> {
    File::create(path)
        .map(BufWriter::new)
        .map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })
}

pub fn write_json<T: Serialize + ?Sized>(path: &Path, value: &T) -> Result<(), WriteError> {
    let mut out = create(path)?;
    serde_json::to_writer_pretty(&mut out, value).map_err(|source| WriteError::Json {
        path: path.to_path_buf(),
        source,
    })?;
    out.flush().map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}

pub fn write_csv<'a, I>(path: &Path, courses: I) -> Result<(), WriteError>
where
    I: IntoIterator<Item = &'a Course>,
{
    let csv_err = |source: csv::Error| WriteError::Csv {
        path: path.to_path_buf(),
        source,
    };

    let out = create(path)?;
    let mut writer = csv::WriterBuilder::new()
        .has_headers(false)
        .from_writer(out);

    writer.write_record(COLUMNS).map_err(csv_err)?;
    for course in courses {
        writer.serialize(course).map_err(csv_err)?;
    }
    writer.flush().map_err(|source| WriteError::Io {
        path: path.to_path_buf(),
        source,
    })
}
