use std::ops::RangeInclusive;

use crate::catalog::{Catalog, Department};
use crate::dice::{Dice, choose};
use crate::types::{Course, Layout, Level, NO_PREREQUISITES};

pub const COURSE_COUNT: RangeInclusive<u32> = 8..=15;

pub const CREDIT_HOURS: [u32; 4] = [1, 2, 3, 4];
pub const CREDIT_WEIGHTS: [u32; 4] = [5, 10, 70, 15];

pub const SECTIONS_PER_LEVEL: usize = 3;

const SECTIONED_LEVELS: [(Level, &str, &str); 4] = [
    (
        Level::Freshman,
        "Introductory",
        "Introduction to fundamental concepts and principles",
    ),
    (
        Level::Sophomore,
        "Foundation",
        "Development of core concepts and methodologies",
    ),
    (
        Level::Junior,
        "Intermediate",
        "Advanced application of principles and theories",
    ),
    (
        Level::Senior,
        "Advanced",
        "Specialized topics and in-depth analysis",
    ),
];

const SECTIONED_COUNTER_START: u32 = 1000;

#[derive(Debug, Clone, Copy)]
pub struct Generator<'a> {
    catalog: &'a Catalog,
    layout: Layout,
}

impl<'a> Generator<'a> {
    pub fn new(catalog: &'a Catalog, layout: Layout) -> Self {
        Self { catalog, layout }
    }

    pub fn layout(&self) -> Layout {
        self.layout
    }

    pub fn generate<D: Dice + ?Sized>(&self, dice: &mut D) -> Vec<Course> {
        log::info!(
            "Generating {} course data ({} layout)...",
            self.catalog.name,
            self.layout.slug()
        );

        let mut courses = Vec::new();
        let mut counter = SECTIONED_COUNTER_START;

        for department in &self.catalog.departments {
            if department.prefixes.is_empty() {
                log::warn!("Skipping {}: no course prefixes", department.name);
                continue;
            }
            log::info!("Generating courses for {}...", department.name);

            let before = courses.len();
            match self.layout {
                Layout::Randomized => self.randomized(department, dice, &mut courses),
                Layout::Sectioned => self.sectioned(department, &mut counter, &mut courses),
            }
            for course in &courses[before..] {
                log::debug!("  {} {} [{}]", course.code, course.title, course.prerequisites);
            }
        }

        log::info!("Generated {} total courses", courses.len());
        courses
    }

    fn topics(&self, department: &Department) -> Vec<String> {
        let topics = self.catalog.topics_for(&department.name);
        if topics.is_empty() {
            vec![department.name.clone()]
        } else {
            topics.to_vec()
        }
    }

    fn randomized<D: Dice + ?Sized>(
        &self,
        department: &Department,
        dice: &mut D,
        out: &mut Vec<Course>,
    ) {
        let count = dice.between(*COURSE_COUNT.start(), *COURSE_COUNT.end());
        let topics = self.topics(department);

        for slot in 0..count as usize {
            let prefix = choose(dice, &department.prefixes)
                .cloned()
                .unwrap_or_default();
            let number = draw_number(Level::for_slot(slot), dice);
            let topic = choose(dice, &topics).cloned().unwrap_or_default();

            let title_prefix = choose(dice, title_prefixes(number)).copied().unwrap_or("");
            let title = format!("{title_prefix} {topic}").trim().to_string();

            let templates = description_templates(&topic.to_lowercase());
            let description = choose(dice, &templates).cloned().unwrap_or_default();

            let credit_hours = CREDIT_HOURS[dice.weighted(&CREDIT_WEIGHTS)].to_string();
            let prerequisites = prerequisites_for(&prefix, number, dice);

            out.push(Course {
                department: department.name.clone(),
                code: format!("{prefix} {number}"),
                title,
                description,
                credit_hours,
                prerequisites,
            });
        }
    }

    fn sectioned(&self, department: &Department, counter: &mut u32, out: &mut Vec<Course>) {
        let topics = self.topics(department);
        // Sectioned catalogs use one prefix per department.
        let prefix = &department.prefixes[0];

        for (level, level_name, level_desc) in SECTIONED_LEVELS {
            let leading = level.range().start() / 1000;
            for section in 0..SECTIONS_PER_LEVEL {
                *counter += 1;
                let suffix = format!("{:03}", *counter % 1000);

                let topic = &topics[section % topics.len()];
                let title = format!("{level_name} {topic} in {}", department.name);
                let description = format!(
                    "{level_desc} of {}. {title}. Students will learn theoretical foundations and practical applications in this field.",
                    department.name
                );

                out.push(Course {
                    department: department.name.clone(),
                    code: format!("{prefix} {leading}{suffix}"),
                    title,
                    description,
                    credit_hours: "3".to_string(),
                    prerequisites: sectioned_prerequisites(prefix, level, &suffix),
                });
            }
        }
    }
}

/// A course number inside `level`, never the bucket's round lower bound.
pub fn draw_number<D: Dice + ?Sized>(level: Level, dice: &mut D) -> u32 {
    let range = level.range();
    dice.between(range.start() + 1, *range.end())
}

fn title_prefixes(number: u32) -> &'static [&'static str] {
    match number {
        ..2000 => &["Introduction to", "Fundamentals of", "Principles of"],
        2000..3000 => &["Intermediate", "Applied", ""],
        3000..4000 => &["Advanced", ""],
        _ => &["Advanced", "Senior", "Special Topics in"],
    }
}

fn description_templates(topic: &str) -> [String; 5] {
    [
        format!(
            "Comprehensive study of {topic} with emphasis on theoretical foundations and practical applications."
        ),
        format!(
            "Examination of key concepts and methodologies in {topic}. Includes hands-on experience and case studies."
        ),
        format!(
            "In-depth analysis of {topic} principles. Students will develop critical thinking and problem-solving skills."
        ),
        format!("Advanced exploration of {topic} covering current research and industry practices."),
        format!(
            "Fundamental concepts and applications of {topic}. Designed for students pursuing careers in related fields."
        ),
    ]
}

pub fn prerequisites_for<D: Dice + ?Sized>(prefix: &str, number: u32, dice: &mut D) -> String {
    let (lower, qualifier) = match number {
        ..2000 => return NO_PREREQUISITES.to_string(),
        2000..3000 => (Level::Freshman, "or equivalent"),
        3000..4000 => (Level::Sophomore, "and junior standing"),
        _ => (Level::Junior, "and senior standing"),
    };
    let range = lower.range();
    let prereq = dice.between(*range.start(), *range.end());
    format!("{prefix} {prereq} {qualifier}")
}

fn sectioned_prerequisites(prefix: &str, level: Level, suffix: &str) -> String {
    let middle = suffix.get(1..3).unwrap_or("00");
    match level {
        Level::Freshman => NO_PREREQUISITES.to_string(),
        Level::Sophomore => format!("{prefix} 1{middle}0"),
        Level::Junior => format!("{prefix} 2{middle}0 or instructor consent"),
        _ => format!("{prefix} 3{middle}0 and department approval"),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::dice::{FirstPick, SeededDice};

    fn by_department(courses: &[Course]) -> Vec<Vec<&Course>> {
        let mut groups: Vec<Vec<&Course>> = Vec::new();
        for course in courses {
            match groups.last_mut() {
                Some(g) if g[0].department == course.department => g.push(course),
                _ => groups.push(vec![course]),
            }
        }
        groups
    }

    #[test]
    fn test_first_pick_computer_science() {
        let catalog = Catalog::houston();
        let courses = Generator::new(&catalog, Layout::Randomized).generate(&mut FirstPick);

        let first = courses
            .iter()
            .find(|c| c.department == "Computer Science")
            .expect("Computer Science courses");
        assert_eq!(first.code, "COSC 1001");
        assert_eq!(first.title, "Introduction to Programming");
        assert_eq!(first.prerequisites, "None");
        assert_eq!(first.credit_hours, "1");
        assert!(first.description.starts_with("Comprehensive study of programming"));

        // FirstPick rolls the minimum course count everywhere.
        assert_eq!(courses.len(), catalog.departments.len() * 8);
    }

    #[test]
    fn test_randomized_codes_within_slot_levels() {
        let catalog = Catalog::houston();
        for seed in 0..20 {
            let courses = Generator::new(&catalog, Layout::Randomized)
                .generate(&mut SeededDice::from_seed(seed));
            let groups = by_department(&courses);
            assert_eq!(groups.len(), catalog.departments.len());

            for group in groups {
                assert!(COURSE_COUNT.contains(&(group.len() as u32)));
                for (slot, course) in group.iter().enumerate() {
                    let number = course.code_number().expect("numeric code");
                    let level = Level::for_slot(slot);
                    assert!(
                        level.range().contains(&number),
                        "{} in slot {slot} is outside {level}",
                        course.code
                    );
                    assert!(["1", "2", "3", "4"].contains(&course.credit_hours.as_str()));
                }
            }
        }
    }

    #[test]
    fn test_prerequisites_precede_course() {
        for layout in [Layout::Randomized, Layout::Sectioned] {
            for catalog in [Catalog::houston(), Catalog::dallas()] {
                let courses = Generator::new(&catalog, layout)
                    .generate(&mut SeededDice::from_seed(99));
                for course in &courses {
                    let number = course.code_number().unwrap();
                    match course.prerequisite_number() {
                        Some(prereq) => assert!(
                            prereq < number,
                            "{} requires {}",
                            course.code,
                            course.prerequisites
                        ),
                        None => {
                            assert_eq!(course.prerequisites, NO_PREREQUISITES);
                            assert_eq!(course.level(), Some(Level::Freshman));
                        }
                    }
                }
            }
        }
    }

    #[test]
    fn test_same_seed_same_catalog() {
        let catalog = Catalog::houston();
        let generator = Generator::new(&catalog, Layout::Randomized);
        let a = generator.generate(&mut SeededDice::from_seed(2024));
        let b = generator.generate(&mut SeededDice::from_seed(2024));
        let c = generator.generate(&mut SeededDice::from_seed(2025));
        assert_eq!(a, b);
        assert_ne!(a, c);
    }

    #[test]
    fn test_sectioned_layout() {
        let catalog = Catalog::dallas();
        let courses = Generator::new(&catalog, Layout::Sectioned).generate(&mut FirstPick);
        assert_eq!(courses.len(), catalog.departments.len() * 12);

        let first = &courses[0];
        assert_eq!(first.code, "ACCT 1001");
        assert_eq!(first.title, "Introductory Financial in Accounting");
        assert_eq!(first.credit_hours, "3");
        assert_eq!(first.prerequisites, "None");
        assert!(first.description.starts_with(
            "Introduction to fundamental concepts and principles of Accounting. Introductory Financial in Accounting."
        ));

        let fourth = &courses[3];
        assert_eq!(fourth.code, "ACCT 2004");
        assert_eq!(fourth.prerequisites, "ACCT 1040");

        let last_acct = &courses[11];
        assert_eq!(last_acct.code, "ACCT 4012");
        assert_eq!(last_acct.prerequisites, "ACCT 3120 and department approval");

        for (slot, course) in courses.iter().enumerate() {
            let level = SECTIONED_LEVELS[(slot % 12) / SECTIONS_PER_LEVEL].0;
            assert!(level.range().contains(&course.code_number().unwrap()));
        }
    }

    #[test]
    fn test_sectioned_cycles_topics() {
        let catalog = Catalog::dallas();
        let courses = Generator::new(&catalog, Layout::Sectioned).generate(&mut FirstPick);
        let cs: Vec<&Course> = courses
            .iter()
            .filter(|c| c.department == "Computer Science")
            .collect();
        assert_eq!(cs[0].title, "Introductory Programming in Computer Science");
        assert_eq!(cs[1].title, "Introductory Data Structures in Computer Science");
        assert_eq!(cs[5].title, "Foundation Algorithms in Computer Science");
    }

    #[test]
    fn test_generator_skips_departments_without_prefixes() {
        let mut catalog = Catalog::houston();
        catalog.departments.truncate(2);
        catalog.departments[1].prefixes.clear();
        let courses = Generator::new(&catalog, Layout::Randomized).generate(&mut FirstPick);
        assert!(courses.iter().all(|c| c.department == "Biomedical Engineering"));
        assert_eq!(courses.len(), 8);
    }

    #[test]
    fn test_titles_are_trimmed() {
        let catalog = Catalog::houston();
        let courses =
            Generator::new(&catalog, Layout::Randomized).generate(&mut SeededDice::from_seed(5));
        assert!(courses.iter().all(|c| c.title == c.title.trim()));
        assert!(title_prefixes(2500).contains(&""));
        assert!(courses.iter().any(|c| c.title.starts_with("Introduction to")
            || c.title.starts_with("Fundamentals of")
            || c.title.starts_with("Principles of")));
    }
}
