//! Assessments and student submissions.

use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AssessmentType {
    #[serde(rename = "Ulangan Harian")]
    UlanganHarian,
    #[serde(rename = "Ujian Tengah Semester")]
    MidSemester,
    #[serde(rename = "Ujian Akhir Semester")]
    FinalSemester,
}

/// One question; only multiple-choice questions are auto-scored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "type")]
pub enum Question {
    #[serde(rename = "Pilihan Ganda", rename_all = "camelCase")]
    MultipleChoice {
        id: String,
        question: String,
        options: Vec<String>,
        correct_answer_index: usize,
    },
    #[serde(rename = "Essay")]
    Essay { id: String, question: String },
}

impl Question {
    pub fn id(&self) -> &str {
        match self {
            Self::MultipleChoice { id, .. } | Self::Essay { id, .. } => id,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Assessment {
    pub id: String,
    pub title: String,
    #[serde(rename = "type")]
    pub kind: AssessmentType,
    pub questions: Vec<Question>,
    pub school_id: String,
}

/// Option index for multiple choice, free text for essays.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum AnswerValue {
    Choice(usize),
    Text(String),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentAnswer {
    pub question_id: String,
    pub answer: AnswerValue,
}

impl StudentAnswer {
    pub fn choice(question_id: impl Into<String>, index: usize) -> Self {
        Self {
            question_id: question_id.into(),
            answer: AnswerValue::Choice(index),
        }
    }

    pub fn text(question_id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            question_id: question_id.into(),
            answer: AnswerValue::Text(text.into()),
        }
    }
}

/// Submitted attempt with its auto-computed score (0..=100).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct StudentScore {
    pub student_name: String,
    pub assessment_id: String,
    pub score: u32,
    pub answers: Vec<StudentAnswer>,
    pub school_id: String,
}
