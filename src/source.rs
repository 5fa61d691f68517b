//! The contract between the core and the scraping/mobile-endpoint layer.
//!
//! One method per data domain. Implementations live outside this crate (per
//! page or per mobile endpoint) and return records exactly as the backend
//! shapes them: dates as locale strings, numbers embedded in text, `""` and
//! `"-"` standing in for blank fields. The [`normalize`](crate::normalize)
//! module turns these into the stable model.

use async_trait::async_trait;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

use crate::error::SourceError;
use crate::models::{DiaryContext, SchoolContext};

/// Message folders of the register's internal mailbox.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MessageFolder {
    Received,
    Sent,
    Deleted,
}

impl MessageFolder {
    /// Folder id as the backend numbers them.
    pub fn folder_id(self) -> i32 {
        match self {
            MessageFolder::Received => 1,
            MessageFolder::Sent => 2,
            MessageFolder::Deleted => 3,
        }
    }
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawSchoolInfo {
    pub school_name: String,
    #[serde(default)]
    pub diaries: Vec<String>,
    #[serde(default)]
    pub students: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawPupil {
    pub symbol: String,
    pub email: String,
    pub student_id: String,
    pub student_name: String,
    pub school_id: String,
    pub school_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawSemester {
    pub semester_id: i32,
    pub semester_number: i32,
    pub diary_id: String,
    pub diary_name: String,
    #[serde(default)]
    pub current: bool,
    pub school_year: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawGrade {
    pub subject: String,
    pub entry: String,
    pub color: String,
    pub symbol: String,
    pub description: String,
    /// e.g. "5,00"; comma decimal, sometimes blank or garbage.
    pub weight: String,
    pub date: String,
    pub teacher: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawGradeSummary {
    pub name: String,
    pub predicted: String,
    pub final_grade: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawGradeStatistics {
    pub subject: String,
    pub grade: String,
    pub amount: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawAttendance {
    pub number: i32,
    pub date: String,
    pub subject: String,
    /// Localized category label, e.g. "Obecność".
    pub name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawAttendanceSummary {
    pub month: String,
    pub presence: i32,
    pub absence: i32,
    pub absence_excused: i32,
    pub absence_for_school_reasons: i32,
    pub lateness: i32,
    pub lateness_excused: i32,
    pub exemption: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawExam {
    pub date: String,
    pub entry_date: String,
    pub subject: String,
    pub group: String,
    pub exam_type: String,
    pub description: String,
    pub teacher: String,
    pub teacher_symbol: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawHomework {
    pub date: String,
    pub entry_date: String,
    pub subject: String,
    pub content: String,
    pub teacher: String,
    pub teacher_symbol: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawNote {
    pub date: String,
    pub teacher: String,
    pub category: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawMessage {
    pub message_id: i32,
    pub folder_id: i32,
    pub sender: String,
    #[serde(default)]
    pub recipients: Vec<String>,
    pub subject: String,
    #[serde(default)]
    pub content: String,
    pub date: String,
    #[serde(default)]
    pub unread: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawTimetableSlot {
    pub number: i32,
    /// "HH:MM" within the slot's date.
    pub start: String,
    pub end: String,
    pub date: String,
    pub subject: String,
    pub group: String,
    pub room: String,
    pub teacher: String,
    pub info: String,
    #[serde(default)]
    pub canceled: bool,
    #[serde(default)]
    pub changes: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawRealizedLesson {
    pub date: String,
    pub number: i32,
    pub subject: String,
    pub topic: String,
    pub teacher: String,
    pub teacher_symbol: String,
    pub absence: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawTeacher {
    pub subject: String,
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawStudentInfo {
    pub full_name: String,
    pub first_name: String,
    pub second_name: String,
    pub surname: String,
    pub birth_date: String,
    pub birth_place: String,
    pub pesel: String,
    pub gender: String,
    pub polish_citizenship: String,
    pub family_name: String,
    pub parents_names: String,
    pub address: String,
    pub registered_address: String,
    pub correspondence_address: String,
    pub phone_number: String,
    pub cell_phone_number: String,
    pub email: String,
    #[serde(default)]
    pub family: Vec<RawFamilyMember>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawFamilyMember {
    pub full_name: String,
    pub kinship: String,
    pub address: String,
    pub phones: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawReportingUnit {
    pub unit_id: i32,
    pub short_name: String,
    pub sender_id: i32,
    pub sender_name: String,
    #[serde(default)]
    pub roles: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawRecipient {
    pub recipient_id: String,
    pub name: String,
    pub unit_id: i32,
    pub role: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawLuckyNumber {
    pub original_content: String,
    pub number: i32,
    pub school_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawDevice {
    pub device_id: i32,
    pub name: String,
    pub created_at: String,
}

/// Token/PIN pair minted by the backend for device pairing.
#[derive(Debug, Serialize, Deserialize, Clone, Default)]
pub struct RawToken {
    pub token: String,
    pub symbol: String,
    pub pin: String,
}

/// Typed access to the backend's scraped pages and mobile endpoint.
///
/// Every method may fail with [`SourceError::Transport`] (network/HTTP) or
/// [`SourceError::UnexpectedShape`] (response did not match the expected
/// structure). Implementations must not retry on their own; the caller
/// decides whether a failed call is safe to repeat.
#[async_trait]
pub trait RawDataSource: Send + Sync {
    async fn fetch_school_info(&self, school: &SchoolContext) -> Result<RawSchoolInfo, SourceError>;

    async fn fetch_pupils(&self) -> Result<Vec<RawPupil>, SourceError>;

    async fn fetch_semesters(&self, school: &SchoolContext) -> Result<Vec<RawSemester>, SourceError>;

    async fn fetch_attendance(
        &self,
        diary: &DiaryContext,
        week_start: NaiveDate,
    ) -> Result<Vec<RawAttendance>, SourceError>;

    async fn fetch_attendance_summary(
        &self,
        diary: &DiaryContext,
        subject_id: Option<i32>,
    ) -> Result<Vec<RawAttendanceSummary>, SourceError>;

    async fn fetch_exams(
        &self,
        diary: &DiaryContext,
        start: NaiveDate,
    ) -> Result<Vec<RawExam>, SourceError>;

    async fn fetch_homework(
        &self,
        diary: &DiaryContext,
        date: NaiveDate,
    ) -> Result<Vec<RawHomework>, SourceError>;

    async fn fetch_notes(&self, diary: &DiaryContext) -> Result<Vec<RawNote>, SourceError>;

    async fn fetch_grades(&self, diary: &DiaryContext) -> Result<Vec<RawGrade>, SourceError>;

    async fn fetch_grade_summary(
        &self,
        diary: &DiaryContext,
    ) -> Result<Vec<RawGradeSummary>, SourceError>;

    async fn fetch_grade_statistics(
        &self,
        diary: &DiaryContext,
        annual: bool,
    ) -> Result<Vec<RawGradeStatistics>, SourceError>;

    async fn fetch_teachers(&self, diary: &DiaryContext) -> Result<Vec<RawTeacher>, SourceError>;

    async fn fetch_student_info(&self, diary: &DiaryContext) -> Result<RawStudentInfo, SourceError>;

    async fn fetch_reporting_units(
        &self,
        school: &SchoolContext,
    ) -> Result<Vec<RawReportingUnit>, SourceError>;

    async fn fetch_recipients(
        &self,
        school: &SchoolContext,
        unit_id: i32,
        role: i32,
    ) -> Result<Vec<RawRecipient>, SourceError>;

    async fn fetch_messages(
        &self,
        school: &SchoolContext,
        folder: MessageFolder,
        start: Option<NaiveDate>,
    ) -> Result<Vec<RawMessage>, SourceError>;

    async fn fetch_message(
        &self,
        school: &SchoolContext,
        message_id: i32,
        folder_id: i32,
    ) -> Result<RawMessage, SourceError>;

    async fn fetch_timetable(
        &self,
        diary: &DiaryContext,
        week_start: NaiveDate,
    ) -> Result<Vec<RawTimetableSlot>, SourceError>;

    async fn fetch_realized(
        &self,
        diary: &DiaryContext,
        start: NaiveDate,
    ) -> Result<Vec<RawRealizedLesson>, SourceError>;

    /// Today's lucky numbers from the account homepage.
    async fn fetch_lucky_numbers(
        &self,
        school: &SchoolContext,
    ) -> Result<Vec<RawLuckyNumber>, SourceError>;

    async fn fetch_registered_devices(
        &self,
        school: &SchoolContext,
    ) -> Result<Vec<RawDevice>, SourceError>;

    /// Mint a token/PIN pair tied to the current identity.
    async fn request_token(&self, school: &SchoolContext) -> Result<RawToken, SourceError>;

    /// Consume a token/PIN pair to register a mobile device.
    async fn register_device(
        &self,
        school: &SchoolContext,
        token: &str,
        pin: &str,
        device_name: &str,
    ) -> Result<RawDevice, SourceError>;

    async fn unregister_device(
        &self,
        school: &SchoolContext,
        device_id: i32,
    ) -> Result<(), SourceError>;
}
