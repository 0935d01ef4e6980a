use crate::types::{Course, Level};

#[derive(Debug, Default)]
pub struct CourseFilter {
    pub department: Option<String>,
    pub level: Option<Level>,
    pub limit: Option<usize>,
    pub offset: Option<usize>,
}

impl CourseFilter {
    pub fn apply(self, mut courses: Vec<Course>) -> Vec<Course> {
        if let Some(department) = &self.department {
            let department = department.to_lowercase();
            courses.retain(|c| c.department.to_lowercase() == department);
        }
        if let Some(level) = self.level {
            courses.retain(|c| c.level() == Some(level));
        }
        if let Some(off) = self.offset {
            courses = courses.into_iter().skip(off).collect();
        }
        if let Some(lim) = self.limit {
            courses.truncate(lim);
        }
        courses
    }

    pub fn validate(self) -> Result<Self, String> {
        if self
            .department
            .as_ref()
            .is_some_and(|d| d.trim().is_empty())
        {
            return Err("Department must not be empty".to_string());
        }
        if self.offset.is_some_and(|o| o == 0) {
            return Err("Offset must be greater than 0".to_string());
        }
        if self.limit.is_some_and(|l| l == 0) {
            return Err("Limit must be greater than 0".to_string());
        }
        Ok(self)
    }
}

#[derive(Debug)]
pub struct CatalogStats {
    pub by_level: [usize; 5],
    pub departments: usize,
    pub total: usize,
}

impl CatalogStats {
    pub fn from_courses(courses: &[Course]) -> CatalogStats {
        let mut by_level = [0; 5];
        for course in courses {
            if let Some(i) = course
                .level()
                .and_then(|l| Level::ALL.iter().position(|x| *x == l))
            {
                by_level[i] += 1;
            }
        }

        let mut departments: Vec<&str> = courses.iter().map(|c| c.department.as_str()).collect();
        departments.sort_unstable();
        departments.dedup();

        CatalogStats {
            by_level,
            departments: departments.len(),
            total: courses.len(),
        }
    }
}

impl std::fmt::Display for CatalogStats {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "\nStatistics:")?;
        for (level, count) in Level::ALL.iter().zip(self.by_level) {
            writeln!(f, "  {:<12}{}", format!("{level}:"), count)?;
        }
        writeln!(f, "  {:<12}{}", "Departments:", self.departments)?;
        writeln!(f, "  {:<12}{}", "Total:", self.total)
    }
}
