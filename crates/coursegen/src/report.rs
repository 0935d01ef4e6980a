use std::fmt::Display;
use std::fs;
use std::path::Path;

use crate::types::Course;
use crate::writer::{WriteError, ensure_dir};

pub const SAMPLE_DEPARTMENTS: usize = 10;
pub const SAMPLE_COURSES: usize = 3;

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DepartmentSummary {
    pub name: String,
    pub count: usize,
    pub samples: Vec<(String, String)>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SummaryReport {
    pub catalog_name: String,
    pub total_courses: usize,
    pub departments: Vec<DepartmentSummary>,
}

impl SummaryReport {
    pub fn from_courses(catalog_name: &str, courses: &[Course]) -> Self {
        let mut departments: Vec<DepartmentSummary> = Vec::new();
        for course in courses {
            let summary = match departments.iter().position(|d| d.name == course.department) {
                Some(i) => &mut departments[i],
                None => {
                    departments.push(DepartmentSummary {
                        name: course.department.clone(),
                        count: 0,
                        samples: Vec::new(),
                    });
                    let last = departments.len() - 1;
                    &mut departments[last]
                }
            };
            summary.count += 1;
            if summary.samples.len() < SAMPLE_COURSES {
                summary
                    .samples
                    .push((course.code.clone(), course.title.clone()));
            }
        }

        departments.sort_by(|a, b| b.count.cmp(&a.count));

        Self {
            catalog_name: catalog_name.to_string(),
            total_courses: courses.len(),
            departments,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.total_courses == 0
    }

    /// Writes the rendered report to `path`. An empty report writes nothing
    /// and returns `false`.
    pub fn write_to(&self, path: &Path) -> Result<bool, WriteError> {
        if self.is_empty() {
            log::warn!("No courses to summarize, skipping {}", path.display());
            return Ok(false);
        }
        if let Some(parent) = path.parent() {
            ensure_dir(parent)?;
        }
        fs::write(path, self.to_string()).map_err(|source| WriteError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        log::info!("Generated comprehensive summary report: {}", path.display());
        Ok(true)
    }
}

impl Display for SummaryReport {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(
            f,
            "{} - COMPREHENSIVE COURSE CATALOG SUMMARY",
            self.catalog_name.to_uppercase()
        )?;
        writeln!(f, "{}", "=".repeat(60))?;
        writeln!(f, "Total Courses: {}", self.total_courses)?;
        writeln!(f, "Total Departments: {}", self.departments.len())?;
        writeln!(f)?;

        writeln!(f, "DEPARTMENTS AND COURSE COUNTS:")?;
        writeln!(f, "{}", "-".repeat(40))?;
        for dept in &self.departments {
            writeln!(f, "{}: {} courses", dept.name, dept.count)?;
        }

        writeln!(f)?;
        writeln!(f, "SAMPLE COURSES BY DEPARTMENT:")?;
        write!(f, "{}", "-".repeat(40))?;
        for dept in self.departments.iter().take(SAMPLE_DEPARTMENTS) {
            write!(f, "\n\n{}:", dept.name.to_uppercase())?;
            for (code, title) in &dept.samples {
                write!(f, "\n  {code}: {title}")?;
            }
        }
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn course(department: &str, code: &str, title: &str) -> Course {
        Course {
            department: department.to_string(),
            code: code.to_string(),
            title: title.to_string(),
            description: String::new(),
            credit_hours: "3".to_string(),
            prerequisites: "None".to_string(),
        }
    }

    #[test]
    fn test_report_ranks_departments() {
        let courses = vec![
            course("Art", "ART 1001", "Introduction to Theory"),
            course("Physics", "PHYS 1001", "Principles of Mechanics"),
            course("Physics", "PHYS 2001", "Applied Optics"),
            course("Music", "MUSI 1001", "Fundamentals of Practice"),
            course("Physics", "PHYS 3001", "Advanced Quantum"),
            course("Physics", "PHYS 4001", "Senior Research"),
            course("Music", "MUSI 2001", "Intermediate Practice"),
        ];
        let report = SummaryReport::from_courses("University of Houston", &courses);
        let names: Vec<&str> = report.departments.iter().map(|d| d.name.as_str()).collect();
        assert_eq!(names, ["Physics", "Music", "Art"]);
        assert_eq!(report.departments[0].count, 4);
        assert_eq!(report.departments[0].samples.len(), SAMPLE_COURSES);

        let expected = "\
UNIVERSITY OF HOUSTON - COMPREHENSIVE COURSE CATALOG SUMMARY
============================================================
Total Courses: 7
Total Departments: 3

DEPARTMENTS AND COURSE COUNTS:
----------------------------------------
Physics: 4 courses
Music: 2 courses
Art: 1 courses

SAMPLE COURSES BY DEPARTMENT:
----------------------------------------

PHYSICS:
  PHYS 1001: Principles of Mechanics
  PHYS 2001: Applied Optics
  PHYS 3001: Advanced Quantum

MUSIC:
  MUSI 1001: Fundamentals of Practice
  MUSI 2001: Intermediate Practice

ART:
  ART 1001: Introduction to Theory";
        assert_eq!(report.to_string(), expected);
    }

    #[test]
    fn test_ties_keep_first_appearance() {
        let courses = vec![
            course("Zoology", "ZOOL 1001", "A"),
            course("Anatomy", "ANAT 1001", "B"),
        ];
        let report = SummaryReport::from_courses("Test", &courses);
        assert_eq!(report.departments[0].name, "Zoology");
        assert_eq!(report.departments[1].name, "Anatomy");
    }

    #[test]
    fn test_sample_listing_is_capped() {
        let courses: Vec<Course> = (0..15)
            .map(|i| course(&format!("Dept {i:02}"), &format!("DEP 1{i:03}"), "Topic"))
            .collect();
        let text = SummaryReport::from_courses("Test", &courses).to_string();
        assert!(text.contains("DEPT 09:"));
        assert!(!text.contains("DEPT 10:"));
        assert!(text.contains("Dept 14: 1 courses"));
    }

    #[test]
    fn test_write_to_skips_empty() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("summary.txt");

        let empty = SummaryReport::from_courses("Test", &[]);
        assert!(!empty.write_to(&path).unwrap());
        assert!(!path.exists());

        let report = SummaryReport::from_courses("Test", &[course("Art", "ART 1001", "Studio")]);
        assert!(report.write_to(&path).unwrap());
        assert_eq!(fs::read_to_string(&path).unwrap(), report.to_string());
    }
}
