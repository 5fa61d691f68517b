use chrono::NaiveDateTime;
use serde::{Deserialize, Serialize};

/// Sentinel for a grade weight whose numeric value could not be parsed.
/// The textual `weight` field stays authoritative in that case.
pub const WEIGHT_UNPARSED: i32 = -1;

/// Account identity. Immutable once a session begins; replacing it
/// invalidates any resolved context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Identity {
    pub host: String,
    pub symbol: String,
    pub email: String,
    pub password: String,
}

/// A school/pupil selection within an identity. Family accounts carry
/// several pupils, each belonging to exactly one school per context.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SchoolContext {
    pub school_id: String,
    pub pupil_id: String,
}

/// A half-year grading period within a diary.
///
/// Diary ids recur across school years with different names, so a semester
/// is identified by `semester_id`, never by `diary_id` alone.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Semester {
    pub semester_id: i32,
    pub semester_number: u8,
    pub diary_id: String,
    pub diary_name: String,
    pub current: bool,
    pub school_year: i32,
}

/// The diary/semester pair nearly every data-fetch operation requires.
/// Carries the semester's school year because several backend requests
/// (exams among them) are keyed on it.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct DiaryContext {
    pub diary_id: String,
    pub semester_id: i32,
    pub school_year: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq)]
pub struct Grade {
    pub subject: String,
    pub entry: String,
    pub color: String,
    pub symbol: String,
    pub description: String,
    /// Weight as the register displays it, e.g. "5,00".
    pub weight: String,
    /// Parsed weight, or [`WEIGHT_UNPARSED`] when the text would not parse.
    pub weight_value: i32,
    pub date: NaiveDateTime,
    pub teacher: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GradeSummary {
    pub name: String,
    pub predicted: String,
    pub final_grade: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct GradeStatistics {
    pub subject: String,
    pub grade: String,
    pub amount: i32,
    /// True for the annual distribution, false for the partial one.
    pub annual: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Attendance {
    pub number: i32,
    pub date: NaiveDateTime,
    pub subject: String,
    /// Original register label, e.g. "Obecność" or "Spóźnienie".
    pub name: String,
    pub presence: bool,
    pub absence: bool,
    pub excused: bool,
    pub for_school_reasons: bool,
    pub lateness: bool,
    pub exemption: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct AttendanceSummary {
    /// Month label as the register renders it (roman numeral).
    pub month: String,
    pub presence: i32,
    pub absence: i32,
    pub absence_excused: i32,
    pub absence_for_school_reasons: i32,
    pub lateness: i32,
    pub lateness_excused: i32,
    pub exemption: i32,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Exam {
    pub date: NaiveDateTime,
    pub entry_date: NaiveDateTime,
    pub subject: String,
    pub group: String,
    pub exam_type: String,
    pub description: String,
    pub teacher: String,
    pub teacher_symbol: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Homework {
    pub date: NaiveDateTime,
    pub entry_date: NaiveDateTime,
    pub subject: String,
    pub content: String,
    pub teacher: String,
    pub teacher_symbol: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Note {
    pub date: NaiveDateTime,
    pub teacher: String,
    pub category: String,
    pub content: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Message {
    pub message_id: i32,
    pub folder_id: i32,
    pub sender: String,
    pub recipients: Vec<String>,
    pub subject: String,
    pub content: String,
    pub date: NaiveDateTime,
    pub unread: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct TimetableSlot {
    pub number: i32,
    pub start: NaiveDateTime,
    pub end: NaiveDateTime,
    pub date: NaiveDateTime,
    pub subject: String,
    pub group: String,
    pub room: String,
    pub teacher: String,
    pub info: String,
    pub canceled: bool,
    pub changes: bool,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct RealizedLesson {
    pub date: NaiveDateTime,
    pub number: i32,
    pub subject: String,
    pub topic: String,
    pub teacher: String,
    pub teacher_symbol: String,
    pub absence: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Teacher {
    pub subject: String,
    pub name: String,
    pub short_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StudentPersonal {
    pub full_name: String,
    pub first_name: String,
    pub second_name: String,
    pub surname: String,
    pub birth_date: NaiveDateTime,
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
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct FamilyMember {
    pub full_name: String,
    pub kinship: String,
    pub address: String,
    pub phones: String,
    pub email: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct StudentInfo {
    pub student: StudentPersonal,
    pub family: Vec<FamilyMember>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct SchoolInfo {
    pub school_name: String,
    pub diaries: Vec<String>,
    pub students: Vec<String>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Pupil {
    pub symbol: String,
    pub email: String,
    pub student_id: String,
    pub student_name: String,
    pub school_id: String,
    pub school_name: String,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct ReportingUnit {
    pub unit_id: i32,
    pub short_name: String,
    pub sender_id: i32,
    pub sender_name: String,
    pub roles: Vec<i32>,
}

#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Recipient {
    pub recipient_id: String,
    pub name: String,
    pub unit_id: i32,
    pub role: i32,
}

/// The "lucky number" a school draws for the day, shown on the account
/// homepage; one entry per school on the account.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct LuckyNumber {
    /// The homepage text the number was taken from.
    pub original_content: String,
    pub number: i32,
    pub school_name: String,
}

/// A mobile device registered on the account for push notifications.
#[derive(Debug, Serialize, Deserialize, Clone, PartialEq, Eq)]
pub struct Device {
    pub device_id: i32,
    pub name: String,
    pub created_at: NaiveDateTime,
}
