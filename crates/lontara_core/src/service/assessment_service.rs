//! Assessment submission and auto-scoring.
//!
//! # Responsibility
//! - Score submitted answers against multiple-choice keys.
//! - Keep submitted scores for teacher review.
//!
//! # Invariants
//! - Score is `round(correct / multiple_choice * 100)`; an assessment with no
//!   multiple-choice questions scores 100.
//! - Essays never affect the score.
//! - A later answer to the same question replaces an earlier one.

use crate::model::assessment::{AnswerValue, Assessment, Question, StudentAnswer, StudentScore};
use crate::model::user::{SessionUser, UserRole};
use log::info;
use std::collections::HashMap;
use std::error::Error;
use std::fmt::{Display, Formatter};

#[derive(Debug, Clone, PartialEq, Eq)]
pub enum AssessmentError {
    /// Only students submit assessments.
    Forbidden,
}

impl Display for AssessmentError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Forbidden => write!(f, "only students can submit assessments"),
        }
    }
}

impl Error for AssessmentError {}

/// Auto-score for `answers` on `assessment`, 0..=100.
pub fn score_answers(assessment: &Assessment, answers: &[StudentAnswer]) -> u32 {
    let latest: HashMap<&str, &AnswerValue> = answers
        .iter()
        .map(|answer| (answer.question_id.as_str(), &answer.answer))
        .collect();

    let mut total = 0u32;
    let mut correct = 0u32;
    for question in &assessment.questions {
        if let Question::MultipleChoice {
            id,
            correct_answer_index,
            ..
        } = question
        {
            total += 1;
            if matches!(latest.get(id.as_str()), Some(AnswerValue::Choice(choice)) if choice == correct_answer_index)
            {
                correct += 1;
            }
        }
    }

    if total == 0 {
        return 100;
    }
    // Half-up rounding of correct * 100 / total.
    (200 * correct + total) / (2 * total)
}

#[derive(Debug, Default)]
pub struct AssessmentService {
    scores: Vec<StudentScore>,
}

impl AssessmentService {
    pub fn new(scores: Vec<StudentScore>) -> Self {
        Self { scores }
    }

    pub fn scores(&self) -> &[StudentScore] {
        &self.scores
    }

    /// Scores for one assessment within a school, in submission order.
    pub fn scores_for(&self, assessment_id: &str, school_id: &str) -> Vec<&StudentScore> {
        self.scores
            .iter()
            .filter(|score| score.assessment_id == assessment_id && score.school_id == school_id)
            .collect()
    }

    /// Scores and records a student's attempt.
    pub fn submit(
        &mut self,
        student: &SessionUser,
        assessment: &Assessment,
        answers: Vec<StudentAnswer>,
    ) -> Result<&StudentScore, AssessmentError> {
        if student.role != UserRole::Siswa {
            return Err(AssessmentError::Forbidden);
        }

        let mut deduped: Vec<StudentAnswer> = Vec::with_capacity(answers.len());
        for answer in answers {
            match deduped
                .iter_mut()
                .find(|existing| existing.question_id == answer.question_id)
            {
                Some(existing) => existing.answer = answer.answer,
                None => deduped.push(answer),
            }
        }

        let score = score_answers(assessment, &deduped);
        info!(
            "event=assessment_submit module=assessment_service status=ok assessment_id={} answers={} score={score}",
            assessment.id,
            deduped.len()
        );
        self.scores.push(StudentScore {
            student_name: student.name.clone(),
            assessment_id: assessment.id.clone(),
            score,
            answers: deduped,
            school_id: student.school_id.clone(),
        });
        Ok(&self.scores[self.scores.len() - 1])
    }
}
