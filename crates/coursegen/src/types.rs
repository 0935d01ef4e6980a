use std::ops::RangeInclusive;
use std::sync::LazyLock;
use std::{fmt::Display, str::FromStr};

use regex::Regex;
use schemars::JsonSchema;
use serde::{Deserialize, Serialize};

pub const NO_PREREQUISITES: &str = "None";

pub const COLUMNS: [&str; 6] = [
    "department",
    "code",
    "title",
    "description",
    "credit_hours",
    "prerequisites",
];

static RE_COURSE_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"^\s*([A-Za-z][A-Za-z0-9&]*)\s+(\d{4})\s*$").expect("invalid regex: course code")
});
static RE_PREFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"^[A-Za-z][A-Za-z0-9&]*$").expect("invalid regex: prefix"));
static RE_EMBEDDED_CODE: LazyLock<Regex> = LazyLock::new(|| {
    Regex::new(r"\b([A-Za-z][A-Za-z0-9&]*)\s(\d{4})\b").expect("invalid regex: embedded code")
});

#[derive(Debug, thiserror::Error)]
#[error("Invalid layout '{0}'. Accepted values: 'randomized', 'sectioned'")]
pub struct LayoutParseError(String);

#[derive(Debug, thiserror::Error)]
#[error(
    "Invalid level '{0}'. Accepted values: 'freshman', 'sophomore', 'junior', 'senior', 'graduate'"
)]
pub struct LevelParseError(String);

#[derive(Debug, thiserror::Error)]
#[error("Invalid course code '{0}'. Expected '<PREFIX> <number>', e.g. 'COSC 1301'")]
pub struct CodeParseError(String);

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Layout {
    #[default]
    Randomized,
    Sectioned,
}

impl Layout {
    pub fn slug(&self) -> &'static str {
        match self {
            Layout::Randomized => "randomized",
            Layout::Sectioned => "sectioned",
        }
    }
}

impl FromStr for Layout {
    type Err = LayoutParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "randomized" | "random" => Ok(Layout::Randomized),
            "sectioned" | "sections" => Ok(Layout::Sectioned),
            _ => Err(LayoutParseError(s.to_string())),
        }
    }
}

impl Display for Layout {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Layout::Randomized => write!(f, "Randomized"),
            Layout::Sectioned => write!(f, "Sectioned"),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize, JsonSchema)]
#[serde(rename_all = "snake_case")]
pub enum Level {
    Freshman,
    Sophomore,
    Junior,
    Senior,
    Graduate,
}

impl Level {
    pub const ALL: [Level; 5] = [
        Level::Freshman,
        Level::Sophomore,
        Level::Junior,
        Level::Senior,
        Level::Graduate,
    ];

    pub fn range(&self) -> RangeInclusive<u32> {
        match self {
            Level::Freshman => 1000..=1999,
            Level::Sophomore => 2000..=2999,
            Level::Junior => 3000..=3999,
            Level::Senior => 4000..=4999,
            Level::Graduate => 6000..=7999,
        }
    }

    /// Bucket a course number belongs to, if any. 5000-5999 is unassigned.
    pub fn of(number: u32) -> Option<Level> {
        Level::ALL.into_iter().find(|l| l.range().contains(&number))
    }

    /// Level of the `slot`-th course of a department in the randomized layout:
    /// two freshman, two sophomore, three junior, three senior, then graduate.
    pub fn for_slot(slot: usize) -> Level {
        match slot {
            0..=1 => Level::Freshman,
            2..=3 => Level::Sophomore,
            4..=6 => Level::Junior,
            7..=9 => Level::Senior,
            _ => Level::Graduate,
        }
    }
}

impl FromStr for Level {
    type Err = LevelParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "freshman" | "1" => Ok(Level::Freshman),
            "sophomore" | "2" => Ok(Level::Sophomore),
            "junior" | "3" => Ok(Level::Junior),
            "senior" | "4" => Ok(Level::Senior),
            "graduate" | "grad" => Ok(Level::Graduate),
            _ => Err(LevelParseError(s.to_string())),
        }
    }
}

impl Display for Level {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Level::Freshman => write!(f, "Freshman"),
            Level::Sophomore => write!(f, "Sophomore"),
            Level::Junior => write!(f, "Junior"),
            Level::Senior => write!(f, "Senior"),
            Level::Graduate => write!(f, "Graduate"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize, JsonSchema)]
pub struct Course {
    pub department: String,
    pub code: String,
    pub title: String,
    pub description: String,
    pub credit_hours: String,
    pub prerequisites: String,
}

impl Course {
    pub fn parsed_code(&self) -> Result<CourseCode, CodeParseError> {
        self.code.parse()
    }

    pub fn code_number(&self) -> Option<u32> {
        self.parsed_code().ok().map(|c| c.number)
    }

    pub fn level(&self) -> Option<Level> {
        self.code_number().and_then(Level::of)
    }

    pub fn prerequisite_code(&self) -> Option<CourseCode> {
        if self.prerequisites == NO_PREREQUISITES {
            return None;
        }
        let caps = RE_EMBEDDED_CODE.captures(&self.prerequisites)?;
        Some(CourseCode {
            prefix: caps[1].to_string(),
            number: caps[2].parse().ok()?,
        })
    }

    pub fn prerequisite_number(&self) -> Option<u32> {
        self.prerequisite_code().map(|c| c.number)
    }
}

impl Display for Course {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        writeln!(f, "{}: {}", self.code, self.title)?;
        writeln!(
            f,
            "   {} · {} credit hour(s)",
            self.department, self.credit_hours
        )?;
        writeln!(f, "   Prerequisites: {}", self.prerequisites)?;
        write!(f, "   {}", self.description)
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct CourseCode {
    pub prefix: String,
    pub number: u32,
}

impl FromStr for CourseCode {
    type Err = CodeParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let caps = RE_COURSE_CODE
            .captures(s)
            .ok_or_else(|| CodeParseError(s.to_string()))?;
        let number = caps[2]
            .parse()
            .map_err(|_| CodeParseError(s.to_string()))?;
        Ok(CourseCode {
            prefix: caps[1].to_string(),
            number,
        })
    }
}

impl CourseCode {
    pub fn is_valid_prefix(prefix: &str) -> bool {
        RE_PREFIX.is_match(prefix)
    }
}

impl Display for CourseCode {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} {}", self.prefix, self.number)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn course(code: &str, prerequisites: &str) -> Course {
        Course {
            department: "Computer Science".to_string(),
            code: code.to_string(),
            title: "Algorithms".to_string(),
            description: "Study of algorithms.".to_string(),
            credit_hours: "3".to_string(),
            prerequisites: prerequisites.to_string(),
        }
    }

    #[test]
    fn test_level_ranges_are_disjoint() {
        for (i, a) in Level::ALL.iter().enumerate() {
            for b in &Level::ALL[i + 1..] {
                assert!(a.range().end() < b.range().start(), "{a} overlaps {b}");
            }
        }
        assert_eq!(Level::of(1000), Some(Level::Freshman));
        assert_eq!(Level::of(4999), Some(Level::Senior));
        assert_eq!(Level::of(5500), None);
        assert_eq!(Level::of(7999), Some(Level::Graduate));
    }

    #[test]
    fn test_level_for_slot() {
        let levels: Vec<Level> = (0..12).map(Level::for_slot).collect();
        assert_eq!(
            levels,
            vec![
                Level::Freshman,
                Level::Freshman,
                Level::Sophomore,
                Level::Sophomore,
                Level::Junior,
                Level::Junior,
                Level::Junior,
                Level::Senior,
                Level::Senior,
                Level::Senior,
                Level::Graduate,
                Level::Graduate,
            ]
        );
    }

    #[test]
    fn test_parse_course_code() {
        let code: CourseCode = "COSC 3320".parse().expect("valid code");
        assert_eq!(code.prefix, "COSC");
        assert_eq!(code.number, 3320);
        assert_eq!(code.to_string(), "COSC 3320");

        assert!("COSC3320".parse::<CourseCode>().is_err());
        assert!("COSC 33".parse::<CourseCode>().is_err());
        assert!("".parse::<CourseCode>().is_err());
    }

    #[test]
    fn test_valid_prefixes_round_trip() {
        for prefix in ["COSC", "A&M", "CS2"] {
            assert!(CourseCode::is_valid_prefix(prefix));
            assert!(format!("{prefix} 1001").parse::<CourseCode>().is_ok());
        }
        for prefix in ["C S", "E-E", "1ABC", ""] {
            assert!(!CourseCode::is_valid_prefix(prefix));
            assert!(format!("{prefix} 1001").parse::<CourseCode>().is_err());
        }
    }

    #[test]
    fn test_prerequisite_extraction() {
        let c = course("COSC 3320", "COSC 2436 and junior standing");
        assert_eq!(c.code_number(), Some(3320));
        assert_eq!(c.level(), Some(Level::Junior));
        assert_eq!(c.prerequisite_number(), Some(2436));
        assert_eq!(c.prerequisite_code().unwrap().prefix, "COSC");

        let intro = course("COSC 1001", NO_PREREQUISITES);
        assert_eq!(intro.prerequisite_code(), None);
    }

    #[test]
    fn test_level_from_str() {
        assert_eq!("Junior".parse::<Level>().unwrap(), Level::Junior);
        assert_eq!("grad".parse::<Level>().unwrap(), Level::Graduate);
        assert!("postdoc".parse::<Level>().is_err());
    }

    #[test]
    fn test_layout_from_str() {
        assert_eq!("randomized".parse::<Layout>().unwrap(), Layout::Randomized);
        assert_eq!("sectioned".parse::<Layout>().unwrap(), Layout::Sectioned);
        let err = "nested".parse::<Layout>().unwrap_err();
        assert!(err.to_string().contains("nested"));
        assert_eq!(Layout::default(), Layout::Randomized);
    }

    #[test]
    fn test_course_json_field_order() {
        let json = serde_json::to_string(&course("COSC 1001", "None")).unwrap();
        let positions: Vec<usize> = COLUMNS
            .iter()
            .map(|c| json.find(&format!("\"{c}\"")).expect("field present"))
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }
}
