use std::fs;
use std::path::{Path, PathBuf};

use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

use crate::types::CourseCode;

#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    #[error("Failed to read catalog {path}: {source}")]
    Io {
        path: PathBuf,
        source: std::io::Error,
    },
    #[error("Failed to decode catalog {path}: {source}")]
    Json {
        path: PathBuf,
        source: serde_json::Error,
    },
    #[error("Invalid catalog: {0}")]
    Invalid(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Department {
    pub name: String,
    pub prefixes: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct TopicGroup {
    pub keyword: String,
    pub topics: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
pub struct Catalog {
    pub name: String,
    pub short_name: String,
    pub departments: Vec<Department>,
    #[serde(default)]
    pub topics: Vec<TopicGroup>,
    pub fallback_topics: Vec<String>,
}

pub const BUILTIN_NAMES: [&str; 2] = ["houston", "dallas"];

impl Catalog {
    pub fn houston() -> Self {
        Self::from_tables(
            "University of Houston",
            "uh",
            HOUSTON_DEPARTMENTS,
            HOUSTON_TOPICS,
            &["Theory", "Practice", "Analysis", "Research", "Methods", "Applications"],
        )
    }

    pub fn dallas() -> Self {
        let departments: Vec<(&str, &[&str])> = DALLAS_DEPARTMENTS
            .iter()
            .map(|(prefix, name)| (*name, std::slice::from_ref(prefix)))
            .collect();
        Self::from_tables(
            "University of Texas at Dallas",
            "utd",
            &departments,
            DALLAS_TOPICS,
            &["Theory", "Methods", "Applications", "Practice", "Research"],
        )
    }

    pub fn builtin(name: &str) -> Option<Self> {
        match name.to_ascii_lowercase().as_str() {
            "houston" | "uh" => Some(Self::houston()),
            "dallas" | "utd" => Some(Self::dallas()),
            _ => None,
        }
    }

    pub fn resolve(name_or_path: &str) -> Result<Self, CatalogError> {
        match Self::builtin(name_or_path) {
            Some(catalog) => Ok(catalog),
            None => Self::from_path(name_or_path),
        }
    }

    pub fn from_path<P: AsRef<Path>>(path: P) -> Result<Self, CatalogError> {
        let path = path.as_ref();
        let raw = fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let catalog: Catalog = serde_json::from_str(&raw).map_err(|source| CatalogError::Json {
            path: path.to_path_buf(),
            source,
        })?;
        log::debug!(
            "Loaded catalog '{}' with {} departments from {}",
            catalog.name,
            catalog.departments.len(),
            path.display()
        );
        catalog.validate()?;
        Ok(catalog)
    }

    pub fn validate(&self) -> Result<(), CatalogError> {
        if self.name.trim().is_empty() {
            return Err(CatalogError::Invalid("name must not be empty".to_string()));
        }
        if self.short_name.trim().is_empty() {
            return Err(CatalogError::Invalid(
                "short_name must not be empty".to_string(),
            ));
        }
        if self.departments.is_empty() {
            return Err(CatalogError::Invalid(
                "at least one department is required".to_string(),
            ));
        }
        if let Some(dept) = self.departments.iter().find(|d| d.prefixes.is_empty()) {
            return Err(CatalogError::Invalid(format!(
                "department '{}' has no course prefixes",
                dept.name
            )));
        }
        if let Some((dept, prefix)) = self.departments.iter().find_map(|d| {
            d.prefixes
                .iter()
                .find(|p| !CourseCode::is_valid_prefix(p))
                .map(|p| (d, p))
        }) {
            return Err(CatalogError::Invalid(format!(
                "department '{}' has prefix '{}'; prefixes must be a letter followed by letters, digits or '&'",
                dept.name, prefix
            )));
        }
        if self.fallback_topics.is_empty() {
            return Err(CatalogError::Invalid(
                "fallback_topics must not be empty".to_string(),
            ));
        }
        Ok(())
    }

    /// Topics for `department`: the first group whose keyword it contains,
    /// otherwise the fallback list.
    pub fn topics_for(&self, department: &str) -> &[String] {
        let department = department.to_lowercase();
        self.topics
            .iter()
            .find(|g| department.contains(&g.keyword.to_lowercase()))
            .map(|g| g.topics.as_slice())
            .unwrap_or(self.fallback_topics.as_slice())
    }

    fn from_tables(
        name: &str,
        short_name: &str,
        departments: &[(&str, &[&str])],
        topics: &[(&str, &[&str])],
        fallback: &[&str],
    ) -> Self {
        fn owned(items: &[&str]) -> Vec<String> {
            items.iter().map(|s| s.to_string()).collect()
        }
        Self {
            name: name.to_string(),
            short_name: short_name.to_string(),
            departments: departments
                .iter()
                .map(|(name, prefixes)| Department {
                    name: name.to_string(),
                    prefixes: owned(*prefixes),
                })
                .collect(),
            topics: topics
                .iter()
                .map(|(keyword, topics)| TopicGroup {
                    keyword: keyword.to_string(),
                    topics: owned(*topics),
                })
                .collect(),
            fallback_topics: owned(fallback),
        }
    }
}

impl Default for Catalog {
    fn default() -> Self {
        Self::houston()
    }
}

const HOUSTON_DEPARTMENTS: &[(&str, &[&str])] = &[
    // Engineering
    ("Biomedical Engineering", &["BIOE"]),
    ("Chemical Engineering", &["CHEE"]),
    ("Civil Engineering", &["CIVE"]),
    ("Computer Engineering", &["EECE"]),
    ("Electrical Engineering", &["EECE"]),
    ("Industrial Engineering", &["INDE"]),
    ("Mechanical Engineering", &["MECE"]),
    ("Petroleum Engineering", &["PETE"]),
    // Natural Sciences and Mathematics
    ("Biology", &["BIOL"]),
    ("Biochemistry", &["BIOC"]),
    ("Chemistry", &["CHEM"]),
    ("Computer Science", &["COSC"]),
    ("Earth and Atmospheric Sciences", &["GEOS"]),
    ("Mathematics", &["MATH"]),
    ("Physics", &["PHYS"]),
    ("Statistics", &["STAT"]),
    // Business
    ("Accounting", &["ACCT"]),
    ("Business Administration", &["BUSA"]),
    ("Entrepreneurship", &["ENTR"]),
    ("Finance", &["FINA"]),
    ("Information Systems", &["ISDS"]),
    ("Management", &["MGMT"]),
    ("Marketing", &["MARK"]),
    ("Supply Chain Management", &["SCM"]),
    // Liberal Arts and Social Sciences
    ("Anthropology", &["ANTH"]),
    ("Art", &["ART"]),
    ("Communications", &["COMM"]),
    ("Economics", &["ECON"]),
    ("English", &["ENGL"]),
    ("History", &["HIST"]),
    ("Philosophy", &["PHIL"]),
    ("Political Science", &["POLS"]),
    ("Psychology", &["PSYC"]),
    ("Sociology", &["SOCI"]),
    ("Spanish", &["SPAN"]),
    ("Music", &["MUSI"]),
    ("Theatre", &["THEA"]),
    // Education
    ("Curriculum and Instruction", &["CUIN"]),
    ("Educational Psychology", &["EPSY"]),
    ("Health and Human Performance", &["HHPA"]),
    // Architecture and Design
    ("Architecture", &["ARCH"]),
    ("Industrial Design", &["IDES"]),
    // Pharmacy
    ("Pharmaceutical Sciences", &["PHAR"]),
    ("Pharmacology", &["PHAR"]),
    // Health professions and public service
    ("Optometry", &["OPTO"]),
    ("Social Work", &["SOCW"]),
    ("Hotel and Restaurant Management", &["HRMA"]),
    ("Nursing", &["NURS"]),
    ("Medical Sciences", &["MEDS"]),
    ("Public Affairs", &["PUAD"]),
    // Interdisciplinary
    ("Women's Studies", &["WOMS"]),
    ("African American Studies", &["AFAS"]),
    ("Mexican American Studies", &["MAST"]),
    ("Religious Studies", &["RELS"]),
    ("Environmental Science", &["ENVS"]),
    ("Interdisciplinary Studies", &["INST"]),
];

const HOUSTON_TOPICS: &[(&str, &[&str])] = &[
    (
        "Computer Science",
        &[
            "Programming",
            "Data Structures",
            "Algorithms",
            "Software Engineering",
            "Database Systems",
            "Computer Networks",
            "Machine Learning",
            "Artificial Intelligence",
            "Cybersecurity",
            "Web Development",
        ],
    ),
    (
        "Mathematics",
        &[
            "Calculus",
            "Linear Algebra",
            "Differential Equations",
            "Statistics",
            "Discrete Mathematics",
            "Abstract Algebra",
            "Real Analysis",
            "Number Theory",
            "Probability",
            "Geometry",
        ],
    ),
    (
        "Engineering",
        &[
            "Design",
            "Systems",
            "Analysis",
            "Materials",
            "Thermodynamics",
            "Dynamics",
            "Controls",
            "Project Management",
            "Ethics",
            "Innovation",
        ],
    ),
    (
        "Biology",
        &[
            "Cell Biology",
            "Genetics",
            "Ecology",
            "Evolution",
            "Microbiology",
            "Molecular Biology",
            "Physiology",
            "Biochemistry",
            "Biotechnology",
            "Bioinformatics",
        ],
    ),
    (
        "Chemistry",
        &[
            "Organic Chemistry",
            "Inorganic Chemistry",
            "Physical Chemistry",
            "Analytical Chemistry",
            "Biochemistry",
            "Materials Chemistry",
            "Environmental Chemistry",
            "Medicinal Chemistry",
        ],
    ),
    (
        "Business",
        &[
            "Management",
            "Marketing",
            "Finance",
            "Operations",
            "Strategy",
            "Leadership",
            "Accounting",
            "Economics",
            "Entrepreneurship",
            "Analytics",
        ],
    ),
    (
        "Psychology",
        &[
            "Cognitive Psychology",
            "Social Psychology",
            "Developmental Psychology",
            "Abnormal Psychology",
            "Research Methods",
            "Statistics",
            "Personality",
            "Learning",
        ],
    ),
    (
        "English",
        &[
            "Literature",
            "Writing",
            "Rhetoric",
            "Composition",
            "American Literature",
            "British Literature",
            "World Literature",
            "Creative Writing",
            "Technical Writing",
        ],
    ),
    (
        "History",
        &[
            "American History",
            "World History",
            "European History",
            "Ancient History",
            "Modern History",
            "Cultural History",
            "Political History",
            "Social History",
        ],
    ),
];

// (prefix, department)
const DALLAS_DEPARTMENTS: &[(&str, &str)] = &[
    ("ACCT", "Accounting"),
    ("AEC", "Arts & Entertainment Technologies"),
    ("AERO", "Aerospace Engineering"),
    ("AHST", "Art History"),
    ("ARAB", "Arabic Language"),
    ("ARCH", "Architecture"),
    ("ARTS", "Art Studio"),
    ("ASDN", "Asian Studies"),
    ("ATEC", "Arts, Technology & Emerging Communication"),
    ("BA", "Business Administration"),
    ("BCOM", "Business Communication"),
    ("BIOL", "Biology"),
    ("BLAW", "Business Law"),
    ("BMEN", "Biomedical Engineering"),
    ("CE", "Civil Engineering"),
    ("CHEM", "Chemistry"),
    ("CHIN", "Chinese"),
    ("COMD", "Communication Disorders"),
    ("COMM", "Communication"),
    ("CS", "Computer Science"),
    ("DANC", "Dance"),
    ("ECON", "Economics"),
    ("ECSC", "Environmental Science"),
    ("ECS", "Engineering & Computer Science"),
    ("EE", "Electrical Engineering"),
    ("EEGR", "Electrical Engineering Graduate"),
    ("EEMF", "Electrical Engineering Manufacturing"),
    ("EERF", "Electrical Engineering RF"),
    ("EMAC", "Emerging Media & Communication"),
    ("ENGL", "English"),
    ("ENGR", "Engineering"),
    ("EPCS", "Engineering Projects in Community Service"),
    ("EPPS", "Economic, Political & Policy Sciences"),
    ("FILM", "Film Studies"),
    ("FIN", "Finance"),
    ("FREN", "French"),
    ("GEOG", "Geography"),
    ("GEOS", "Geosciences"),
    ("GERM", "German"),
    ("GISC", "Geographic Information Systems"),
    ("GOVT", "Government"),
    ("HIST", "History"),
    ("HLTH", "Health"),
    ("HMGT", "Healthcare Management"),
    ("HONS", "Honors"),
    ("HUM", "Humanities"),
    ("IDEA", "Innovation & Entrepreneurship"),
    ("IMS", "International Management Studies"),
    ("IPEC", "International Political Economy"),
    ("ISAE", "Interdisciplinary Studies in Arts & Engineering"),
    ("ISGS", "Interdisciplinary Studies"),
    ("ITAL", "Italian"),
    ("JAPN", "Japanese"),
    ("KORE", "Korean"),
    ("LANG", "Language"),
    ("LATS", "Latin American Studies"),
    ("LIT", "Literature"),
    ("MATH", "Mathematics"),
    ("MECH", "Mechanical Engineering"),
    ("MILS", "Military Science"),
    ("MIS", "Management Information Systems"),
    ("MKT", "Marketing"),
    ("MSEN", "Materials Science & Engineering"),
    ("MTHE", "Mathematical Sciences"),
    ("MUSI", "Music"),
    ("NATS", "Natural Sciences"),
    ("NEUR", "Neuroscience"),
    ("NSCM", "Neuroscience"),
    ("OPRE", "Operations Research"),
    ("PA", "Public Affairs"),
    ("PHIL", "Philosophy"),
    ("PHIN", "Philosophy of Science"),
    ("PHYS", "Physics"),
    ("PSY", "Psychology"),
    ("PSYC", "Psychology"),
    ("RHET", "Rhetoric"),
    ("RISK", "Risk Management"),
    ("SCOM", "Speech Communication"),
    ("SE", "Software Engineering"),
    ("SOCS", "Social Sciences"),
    ("SOC", "Sociology"),
    ("SPAN", "Spanish"),
    ("SPAU", "Speech-Language Pathology & Audiology"),
    ("STAT", "Statistics"),
    ("SYSE", "Systems Engineering"),
    ("THEA", "Theatre"),
    ("UNIV", "University"),
    ("VISA", "Visual Arts"),
    ("WS", "Women's Studies"),
];

const DALLAS_TOPICS: &[(&str, &[&str])] = &[
    ("Accounting", &["Financial", "Managerial", "Auditing", "Tax", "Systems"]),
    (
        "Computer Science",
        &["Programming", "Data Structures", "Algorithms", "Software", "Systems"],
    ),
    (
        "Mathematics",
        &["Calculus", "Algebra", "Analysis", "Statistics", "Geometry"],
    ),
    (
        "Physics",
        &["Mechanics", "Electromagnetism", "Quantum", "Thermodynamics", "Optics"],
    ),
    (
        "Chemistry",
        &["Organic", "Inorganic", "Physical", "Analytical", "Biochemistry"],
    ),
    (
        "Biology",
        &["Cellular", "Molecular", "Genetics", "Ecology", "Physiology"],
    ),
    (
        "Engineering",
        &["Design", "Analysis", "Systems", "Control", "Materials"],
    ),
    (
        "Economics",
        &["Micro", "Macro", "Econometrics", "Finance", "Policy"],
    ),
    (
        "Psychology",
        &["Cognitive", "Social", "Clinical", "Developmental", "Research"],
    ),
    ("History", &["American", "World", "European", "Asian", "Modern"]),
];
