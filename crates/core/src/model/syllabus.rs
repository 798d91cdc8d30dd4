use serde::{Deserialize, Serialize};

/// One leaf of the syllabus checklist; the only mutable bit is `completed`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusItem {
    pub id: String,
    pub title: String,
    pub completed: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusTopic {
    pub id: String,
    pub title: String,
    pub subtopics: Vec<SyllabusItem>,
}

/// A top-level section of the study plan.
///
/// Structurally a nested tree, behaviorally just a toggle-and-persist map:
/// the ids and titles come from the built-in plan, and only leaf completion
/// flags ever change.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SyllabusSection {
    pub id: String,
    pub title: String,
    pub description: String,
    pub topics: Vec<SyllabusTopic>,
}

impl SyllabusSection {
    /// Flips the completion flag of one leaf. Returns false when either id is
    /// unknown in this section.
    pub fn toggle(&mut self, topic_id: &str, item_id: &str) -> bool {
        let Some(topic) = self.topics.iter_mut().find(|t| t.id == topic_id) else {
            return false;
        };
        let Some(item) = topic.subtopics.iter_mut().find(|s| s.id == item_id) else {
            return false;
        };
        item.completed = !item.completed;
        true
    }

    /// Percentage of completed leaves, rounded to the nearest integer.
    #[must_use]
    pub fn progress_percent(&self) -> u8 {
        let mut total = 0_u32;
        let mut done = 0_u32;
        for topic in &self.topics {
            for item in &topic.subtopics {
                total += 1;
                if item.completed {
                    done += 1;
                }
            }
        }
        if total == 0 {
            return 0;
        }
        let percent = (f64::from(done) / f64::from(total) * 100.0).round();
        percent as u8
    }
}

fn item(id: &str, title: &str) -> SyllabusItem {
    SyllabusItem {
        id: id.to_owned(),
        title: title.to_owned(),
        completed: false,
    }
}

fn topic(id: &str, title: &str, subtopics: Vec<SyllabusItem>) -> SyllabusTopic {
    SyllabusTopic {
        id: id.to_owned(),
        title: title.to_owned(),
        subtopics,
    }
}

/// The built-in study plan every user starts from.
#[must_use]
pub fn default_plan() -> Vec<SyllabusSection> {
    vec![
        SyllabusSection {
            id: "written".to_owned(),
            title: "Written Examination".to_owned(),
            description: "Paper I & II - Objective and Subjective".to_owned(),
            topics: vec![
                topic(
                    "computer-fundamentals",
                    "Computer Fundamentals",
                    vec![
                        item("cf-1", "Introduction to Computers"),
                        item("cf-2", "Computer Hardware & Software"),
                        item("cf-3", "Number Systems"),
                        item("cf-4", "Operating Systems"),
                    ],
                ),
                topic(
                    "office-applications",
                    "Office Applications",
                    vec![
                        item("oa-1", "Word Processing"),
                        item("oa-2", "Spreadsheets"),
                        item("oa-3", "Presentations"),
                        item("oa-4", "Databases"),
                    ],
                ),
                topic(
                    "networking",
                    "Computer Networks",
                    vec![
                        item("cn-1", "Network Basics"),
                        item("cn-2", "Internet & Email"),
                        item("cn-3", "Network Security"),
                    ],
                ),
                topic(
                    "governance",
                    "Governance & General Knowledge",
                    vec![
                        item("gg-1", "Constitution"),
                        item("gg-2", "Civil Service Act"),
                        item("gg-3", "Good Governance Act"),
                        item("gg-4", "Current Affairs"),
                    ],
                ),
            ],
        },
        SyllabusSection {
            id: "practical".to_owned(),
            title: "Practical Examination".to_owned(),
            description: "Hands-on computer skills test".to_owned(),
            topics: vec![
                topic(
                    "typing-practical",
                    "Typing Test",
                    vec![
                        item("tp-1", "English Typing (25 WPM)"),
                        item("tp-2", "Local-language Typing (25 WPM)"),
                    ],
                ),
                topic(
                    "office-practical",
                    "Office Tasks",
                    vec![
                        item("op-1", "Document Formatting"),
                        item("op-2", "Spreadsheet Functions"),
                        item("op-3", "Presentation Creation"),
                    ],
                ),
            ],
        },
        SyllabusSection {
            id: "interview".to_owned(),
            title: "Interview Preparation".to_owned(),
            description: "Final interview round".to_owned(),
            topics: vec![topic(
                "interview-topics",
                "Interview Topics",
                vec![
                    item("it-1", "Self Introduction"),
                    item("it-2", "Technical Questions"),
                    item("it-3", "Current Affairs Discussion"),
                    item("it-4", "Work Ethics & Values"),
                ],
            )],
        },
    ]
}
