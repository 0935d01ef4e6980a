use std::fmt::Display;
use std::path::{Path, PathBuf};

use chrono::{DateTime, Local};

use crate::catalog::{Catalog, CatalogError};
use crate::dice::Dice;
use crate::generator::Generator;
use crate::report::SummaryReport;
use crate::types::Layout;
use crate::writer::{CatalogWriter, PartitionError, WriteError, partition};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Stage {
    Generate,
    Partition,
    WriteDepartments,
    WriteMaster,
    WriteReport,
}

impl Display for Stage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Stage::Generate => write!(f, "generate"),
            Stage::Partition => write!(f, "partition"),
            Stage::WriteDepartments => write!(f, "write department files"),
            Stage::WriteMaster => write!(f, "write master files"),
            Stage::WriteReport => write!(f, "write summary report"),
        }
    }
}

#[derive(Debug, thiserror::Error)]
pub enum StageError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
    #[error(transparent)]
    Partition(#[from] PartitionError),
    #[error(transparent)]
    Write(#[from] WriteError),
}

#[derive(Debug, thiserror::Error)]
#[error("{stage} stage failed: {source}")]
pub struct PipelineError {
    pub stage: Stage,
    #[source]
    pub source: StageError,
}

impl PipelineError {
    pub fn new<E: Into<StageError>>(stage: Stage, source: E) -> Self {
        Self {
            stage,
            source: source.into(),
        }
    }

    pub fn path(&self) -> Option<&Path> {
        match &self.source {
            StageError::Write(e) => Some(e.path()),
            StageError::Catalog(CatalogError::Io { path, .. })
            | StageError::Catalog(CatalogError::Json { path, .. }) => Some(path),
            _ => None,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OutputConfig {
    pub out_dir: PathBuf,
    pub data_dir: PathBuf,
}

impl Default for OutputConfig {
    fn default() -> Self {
        Self {
            out_dir: PathBuf::from("."),
            data_dir: PathBuf::from("data"),
        }
    }
}

impl OutputConfig {
    pub fn data_path(&self) -> PathBuf {
        self.out_dir.join(&self.data_dir)
    }

    pub fn master_stem(&self, catalog: &Catalog) -> String {
        format!("{}_comprehensive_courses", catalog.short_name)
    }

    pub fn report_path(&self, catalog: &Catalog) -> PathBuf {
        self.out_dir
            .join(format!("{}_course_summary.txt", catalog.short_name))
    }
}

/// Generate → partition → department files → master files → report, run
/// strictly in that order. A failing stage stops the run; files already
/// written are left in place.
#[derive(Debug, Clone)]
pub struct Pipeline {
    pub catalog: Catalog,
    pub layout: Layout,
    pub output: OutputConfig,
}

impl Pipeline {
    pub fn new(catalog: Catalog, layout: Layout, output: OutputConfig) -> Self {
        Self {
            catalog,
            layout,
            output,
        }
    }

    pub fn run<D: Dice + ?Sized>(&self, dice: &mut D) -> Result<RunSummary, PipelineError> {
        self.catalog
            .validate()
            .map_err(|e| PipelineError::new(Stage::Generate, e))?;
        let courses = Generator::new(&self.catalog, self.layout).generate(dice);

        let groups = partition(&courses).map_err(|e| PipelineError::new(Stage::Partition, e))?;

        let data_dir = self.output.data_path();
        let writer = CatalogWriter::new(&data_dir);
        let department_files = writer
            .write_groups(&groups)
            .map_err(|e| PipelineError::new(Stage::WriteDepartments, e))?;

        let master_files = writer
            .write_master(
                &self.output.out_dir,
                &self.output.master_stem(&self.catalog),
                &courses,
            )
            .map_err(|e| PipelineError::new(Stage::WriteMaster, e))?;

        let report_path = self.output.report_path(&self.catalog);
        let report = SummaryReport::from_courses(&self.catalog.name, &courses)
            .write_to(&report_path)
            .map_err(|e| PipelineError::new(Stage::WriteReport, e))?
            .then_some(report_path);

        Ok(RunSummary {
            catalog_name: self.catalog.name.clone(),
            layout: self.layout,
            total_courses: courses.len(),
            departments: groups.len(),
            data_dir,
            department_files,
            master_files,
            report,
            finished_at: Local::now(),
        })
    }
}

#[derive(Debug, Clone)]
pub struct RunSummary {
    pub catalog_name: String,
    pub layout: Layout,
    pub total_courses: usize,
    pub departments: usize,
    pub data_dir: PathBuf,
    pub department_files: Vec<PathBuf>,
    pub master_files: [PathBuf; 2],
    pub report: Option<PathBuf>,
    pub finished_at: DateTime<Local>,
}

impl RunSummary {
    pub fn files_written(&self) -> usize {
        self.department_files.len() + self.master_files.len() + usize::from(self.report.is_some())
    }
}

impl Display for RunSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\n=== FINAL SUMMARY ===")?;
        writeln!(f, "Catalog: {} ({} layout)", self.catalog_name, self.layout)?;
        writeln!(f, "Total courses generated: {}", self.total_courses)?;
        writeln!(f, "Departments covered: {}", self.departments)?;
        writeln!(
            f,
            "Files created: {} (JSON + CSV per department)",
            self.department_files.len()
        )?;
        writeln!(f, "Data stored in: {}/ folder", self.data_dir.display())?;
        writeln!(
            f,
            "Master files: {}, {}",
            self.master_files[0].display(),
            self.master_files[1].display()
        )?;
        if let Some(report) = &self.report {
            writeln!(f, "Summary report: {}", report.display())?;
        }
        writeln!(
            f,
            "Finished at: {}",
            self.finished_at.format("%Y-%m-%d %H:%M:%S")
        )
    }
}
