//! Exam entity and the summary shown alongside allotments.

use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use sqlx::FromRow;

use examhall_core::types::{ExamId, SubjectId};

/// A subject that exams are scheduled for.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Subject {
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Subject code, e.g. `CS301`.
    pub subject_code: String,
    /// Subject name.
    pub subject_name: String,
}

/// Half-day slot an exam is scheduled in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, sqlx::Type)]
#[sqlx(type_name = "exam_session")]
pub enum ExamSession {
    /// Before noon.
    Morning,
    /// After noon.
    Afternoon,
}

/// A scheduled sitting of one subject. Read-only to the allotment engine.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct Exam {
    /// Exam identifier.
    pub exam_id: ExamId,
    /// Subject being examined.
    pub subject_id: SubjectId,
    /// Calendar date of the sitting.
    pub exam_date: NaiveDate,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Optional session tag.
    pub session: Option<ExamSession>,
}

/// Exam joined with its subject.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, FromRow)]
#[serde(rename_all = "camelCase")]
pub struct ExamSummary {
    /// Exam identifier.
    pub exam_id: ExamId,
    /// Subject identifier.
    pub subject_id: SubjectId,
    /// Subject code, e.g. `CS301`.
    pub subject_code: String,
    /// Subject name.
    pub subject_name: String,
    /// Calendar date of the sitting.
    pub exam_date: NaiveDate,
    /// Start time.
    pub start_time: NaiveTime,
    /// End time.
    pub end_time: NaiveTime,
    /// Optional session tag.
    pub session: Option<ExamSession>,
}

impl ExamSummary {
    /// Join an exam with its subject.
    pub fn new(exam: &Exam, subject: &Subject) -> Self {
        Self {
            exam_id: exam.exam_id,
            subject_id: subject.subject_id,
            subject_code: subject.subject_code.clone(),
            subject_name: subject.subject_name.clone(),
            exam_date: exam.exam_date,
            start_time: exam.start_time,
            end_time: exam.end_time,
            session: exam.session,
        }
    }
}
