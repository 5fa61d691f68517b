//! Pure mappings from raw source records into the stable domain model.
//!
//! Every function here is total over the shapes the backend can legally
//! produce: sentinel text (`""`, `"-"`) becomes an empty string, numeric
//! values embedded in text degrade to a defined sentinel instead of failing
//! the record, and only an outright unrecognizable record (no parseable
//! date at all) is rejected, as [`SourceError::UnexpectedShape`].
//!
//! No I/O and no state; the façade feeds raw records in and hands the
//! results back to the caller.

use chrono::{NaiveDate, NaiveDateTime, NaiveTime};

use crate::error::SourceError;
use crate::models::*;
use crate::source::*;

/// Date formats the register is known to emit, tried in order.
/// Values without a time component normalize to midnight.
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d.%m.%Y %H:%M:%S",
    "%d.%m.%Y %H:%M",
];

const DATE_ONLY_FORMATS: &[&str] = &["%Y-%m-%d", "%d.%m.%Y"];

/// Parse one of the register's mixed date representations.
pub fn parse_date(raw: &str) -> Result<NaiveDateTime, SourceError> {
    let s = raw.trim();
    for fmt in DATE_FORMATS {
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, fmt) {
            return Ok(dt);
        }
    }
    for fmt in DATE_ONLY_FORMATS {
        if let Ok(d) = NaiveDate::parse_from_str(s, fmt) {
            return Ok(d.and_time(NaiveTime::MIN));
        }
    }
    Err(SourceError::UnexpectedShape(format!(
        "unrecognized date value: {raw:?}"
    )))
}

/// Parse a "HH:MM" clock value onto a given date.
fn parse_time_on(date: NaiveDateTime, raw: &str) -> Result<NaiveDateTime, SourceError> {
    let t = NaiveTime::parse_from_str(raw.trim(), "%H:%M")
        .or_else(|_| NaiveTime::parse_from_str(raw.trim(), "%H:%M:%S"))
        .map_err(|_| SourceError::UnexpectedShape(format!("unrecognized time value: {raw:?}")))?;
    Ok(date.date().and_time(t))
}

/// Normalize sentinel text: `""` and `"-"` both mean "present but blank"
/// and come out as the empty string, never an absent marker.
pub fn clean_text(raw: &str) -> String {
    let t = raw.trim();
    if t == "-" {
        String::new()
    } else {
        t.to_string()
    }
}

/// Parse a comma-decimal weight like "5,00". Failure yields
/// [`WEIGHT_UNPARSED`]; the textual field stays authoritative.
pub fn parse_weight(raw: &str) -> i32 {
    raw.trim()
        .replace(',', ".")
        .parse::<f64>()
        .map(|v| v.round() as i32)
        .unwrap_or(WEIGHT_UNPARSED)
}

pub fn school_info(raw: RawSchoolInfo) -> SchoolInfo {
    SchoolInfo {
        school_name: clean_text(&raw.school_name),
        diaries: raw.diaries.iter().map(|d| clean_text(d)).collect(),
        students: raw.students.iter().map(|s| clean_text(s)).collect(),
    }
}

pub fn pupils(raw: Vec<RawPupil>) -> Vec<Pupil> {
    raw.into_iter()
        .map(|p| Pupil {
            symbol: clean_text(&p.symbol),
            email: clean_text(&p.email),
            student_id: clean_text(&p.student_id),
            student_name: clean_text(&p.student_name),
            school_id: clean_text(&p.school_id),
            school_name: clean_text(&p.school_name),
        })
        .collect()
}

pub fn semester(raw: RawSemester) -> Result<Semester, SourceError> {
    let number = match raw.semester_number {
        1 | 2 => raw.semester_number as u8,
        other => {
            return Err(SourceError::UnexpectedShape(format!(
                "semester number out of range: {other}"
            )))
        }
    };
    Ok(Semester {
        semester_id: raw.semester_id,
        semester_number: number,
        diary_id: clean_text(&raw.diary_id),
        diary_name: clean_text(&raw.diary_name),
        current: raw.current,
        school_year: raw.school_year,
    })
}

pub fn semesters(raw: Vec<RawSemester>) -> Result<Vec<Semester>, SourceError> {
    raw.into_iter().map(semester).collect()
}

pub fn grade(raw: RawGrade) -> Result<Grade, SourceError> {
    Ok(Grade {
        subject: clean_text(&raw.subject),
        entry: clean_text(&raw.entry),
        color: clean_text(&raw.color),
        symbol: clean_text(&raw.symbol),
        description: clean_text(&raw.description),
        weight_value: parse_weight(&raw.weight),
        weight: clean_text(&raw.weight),
        date: parse_date(&raw.date)?,
        teacher: clean_text(&raw.teacher),
    })
}

/// Source order is preserved; the register already groups grades the way
/// callers expect.
pub fn grades(raw: Vec<RawGrade>) -> Result<Vec<Grade>, SourceError> {
    raw.into_iter().map(grade).collect()
}

pub fn grade_summary(raw: Vec<RawGradeSummary>) -> Vec<GradeSummary> {
    raw.into_iter()
        .map(|s| GradeSummary {
            name: clean_text(&s.name),
            predicted: clean_text(&s.predicted),
            final_grade: clean_text(&s.final_grade),
        })
        .collect()
}

pub fn grade_statistics(raw: Vec<RawGradeStatistics>, annual: bool) -> Vec<GradeStatistics> {
    raw.into_iter()
        .map(|s| GradeStatistics {
            subject: clean_text(&s.subject),
            grade: clean_text(&s.grade),
            amount: s.amount,
            annual,
        })
        .collect()
}

/// Category flags derived from the register's localized attendance label.
/// The label text itself is retained on the record.
fn attendance_flags(name: &str) -> (bool, bool, bool, bool, bool, bool) {
    let label = name.trim().to_lowercase();
    let presence = label.starts_with("obecn");
    let for_school_reasons = label.contains("przyczyn szkoln");
    let absence = label.starts_with("nieobecn") && !for_school_reasons;
    let lateness = label.starts_with("spóźnie");
    let excused = label.contains("usprawiedliwion") && !label.contains("nieusprawiedliwion");
    let exemption = label.starts_with("zwolnie") || label.starts_with("zwolnion");
    (presence, absence, excused, for_school_reasons, lateness, exemption)
}

pub fn attendance_record(raw: RawAttendance) -> Result<Attendance, SourceError> {
    let (presence, absence, excused, for_school_reasons, lateness, exemption) =
        attendance_flags(&raw.name);
    Ok(Attendance {
        number: raw.number,
        date: parse_date(&raw.date)?,
        subject: clean_text(&raw.subject),
        name: clean_text(&raw.name),
        presence,
        absence,
        excused,
        for_school_reasons,
        lateness,
        exemption,
    })
}

/// Attendance is chronological; ties keep source order (stable sort).
pub fn attendance(raw: Vec<RawAttendance>) -> Result<Vec<Attendance>, SourceError> {
    let mut records = raw
        .into_iter()
        .map(attendance_record)
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by_key(|r| r.date);
    Ok(records)
}

pub fn attendance_summary(raw: Vec<RawAttendanceSummary>) -> Vec<AttendanceSummary> {
    raw.into_iter()
        .map(|s| AttendanceSummary {
            month: clean_text(&s.month),
            presence: s.presence,
            absence: s.absence,
            absence_excused: s.absence_excused,
            absence_for_school_reasons: s.absence_for_school_reasons,
            lateness: s.lateness,
            lateness_excused: s.lateness_excused,
            exemption: s.exemption,
        })
        .collect()
}

pub fn exam(raw: RawExam) -> Result<Exam, SourceError> {
    Ok(Exam {
        date: parse_date(&raw.date)?,
        entry_date: parse_date(&raw.entry_date)?,
        subject: clean_text(&raw.subject),
        group: clean_text(&raw.group),
        exam_type: clean_text(&raw.exam_type),
        description: clean_text(&raw.description),
        teacher: clean_text(&raw.teacher),
        teacher_symbol: clean_text(&raw.teacher_symbol),
    })
}

pub fn exams(raw: Vec<RawExam>) -> Result<Vec<Exam>, SourceError> {
    raw.into_iter().map(exam).collect()
}

pub fn homework(raw: Vec<RawHomework>) -> Result<Vec<Homework>, SourceError> {
    raw.into_iter()
        .map(|h| {
            Ok(Homework {
                date: parse_date(&h.date)?,
                entry_date: parse_date(&h.entry_date)?,
                subject: clean_text(&h.subject),
                content: clean_text(&h.content),
                teacher: clean_text(&h.teacher),
                teacher_symbol: clean_text(&h.teacher_symbol),
            })
        })
        .collect()
}

pub fn notes(raw: Vec<RawNote>) -> Result<Vec<Note>, SourceError> {
    raw.into_iter()
        .map(|n| {
            Ok(Note {
                date: parse_date(&n.date)?,
                teacher: clean_text(&n.teacher),
                category: clean_text(&n.category),
                content: clean_text(&n.content),
            })
        })
        .collect()
}

pub fn message(raw: RawMessage) -> Result<Message, SourceError> {
    Ok(Message {
        message_id: raw.message_id,
        folder_id: raw.folder_id,
        sender: clean_text(&raw.sender),
        recipients: raw.recipients.iter().map(|r| clean_text(r)).collect(),
        subject: clean_text(&raw.subject),
        content: clean_text(&raw.content),
        date: parse_date(&raw.date)?,
        unread: raw.unread,
    })
}

/// Messages are chronological; ties keep source order.
pub fn messages(raw: Vec<RawMessage>) -> Result<Vec<Message>, SourceError> {
    let mut records = raw
        .into_iter()
        .map(message)
        .collect::<Result<Vec<_>, _>>()?;
    records.sort_by_key(|m| m.date);
    Ok(records)
}

pub fn timetable(raw: Vec<RawTimetableSlot>) -> Result<Vec<TimetableSlot>, SourceError> {
    raw.into_iter()
        .map(|s| {
            let date = parse_date(&s.date)?;
            Ok(TimetableSlot {
                number: s.number,
                start: parse_time_on(date, &s.start)?,
                end: parse_time_on(date, &s.end)?,
                date,
                subject: clean_text(&s.subject),
                group: clean_text(&s.group),
                room: clean_text(&s.room),
                teacher: clean_text(&s.teacher),
                info: clean_text(&s.info),
                canceled: s.canceled,
                changes: s.changes,
            })
        })
        .collect()
}

/// Realized lessons are chronological; ties keep source order.
pub fn realized(raw: Vec<RawRealizedLesson>) -> Result<Vec<RealizedLesson>, SourceError> {
    let mut records = raw
        .into_iter()
        .map(|l| {
            Ok(RealizedLesson {
                date: parse_date(&l.date)?,
                number: l.number,
                subject: clean_text(&l.subject),
                topic: clean_text(&l.topic),
                teacher: clean_text(&l.teacher),
                teacher_symbol: clean_text(&l.teacher_symbol),
                absence: clean_text(&l.absence),
            })
        })
        .collect::<Result<Vec<RealizedLesson>, SourceError>>()?;
    records.sort_by_key(|l| l.date);
    Ok(records)
}

pub fn teachers(raw: Vec<RawTeacher>) -> Vec<Teacher> {
    raw.into_iter()
        .map(|t| Teacher {
            subject: clean_text(&t.subject),
            name: clean_text(&t.name),
            short_name: clean_text(&t.short_name),
        })
        .collect()
}

pub fn student_info(raw: RawStudentInfo) -> Result<StudentInfo, SourceError> {
    Ok(StudentInfo {
        student: StudentPersonal {
            full_name: clean_text(&raw.full_name),
            first_name: clean_text(&raw.first_name),
            second_name: clean_text(&raw.second_name),
            surname: clean_text(&raw.surname),
            birth_date: parse_date(&raw.birth_date)?,
            birth_place: clean_text(&raw.birth_place),
            pesel: clean_text(&raw.pesel),
            gender: clean_text(&raw.gender),
            polish_citizenship: clean_text(&raw.polish_citizenship),
            family_name: clean_text(&raw.family_name),
            parents_names: clean_text(&raw.parents_names),
            address: clean_text(&raw.address),
            registered_address: clean_text(&raw.registered_address),
            correspondence_address: clean_text(&raw.correspondence_address),
            phone_number: clean_text(&raw.phone_number),
            cell_phone_number: clean_text(&raw.cell_phone_number),
            email: clean_text(&raw.email),
        },
        family: raw
            .family
            .into_iter()
            .map(|f| FamilyMember {
                full_name: clean_text(&f.full_name),
                kinship: clean_text(&f.kinship),
                address: clean_text(&f.address),
                phones: clean_text(&f.phones),
                email: clean_text(&f.email),
            })
            .collect(),
    })
}

pub fn reporting_units(raw: Vec<RawReportingUnit>) -> Vec<ReportingUnit> {
    raw.into_iter()
        .map(|u| ReportingUnit {
            unit_id: u.unit_id,
            short_name: clean_text(&u.short_name),
            sender_id: u.sender_id,
            sender_name: clean_text(&u.sender_name),
            roles: u.roles,
        })
        .collect()
}

pub fn recipients(raw: Vec<RawRecipient>) -> Vec<Recipient> {
    raw.into_iter()
        .map(|r| Recipient {
            recipient_id: clean_text(&r.recipient_id),
            name: clean_text(&r.name),
            unit_id: r.unit_id,
            role: r.role,
        })
        .collect()
}

pub fn lucky_numbers(raw: Vec<RawLuckyNumber>) -> Vec<LuckyNumber> {
    raw.into_iter()
        .map(|n| LuckyNumber {
            original_content: clean_text(&n.original_content),
            number: n.number,
            school_name: clean_text(&n.school_name),
        })
        .collect()
}

pub fn device(raw: RawDevice) -> Result<Device, SourceError> {
    Ok(Device {
        device_id: raw.device_id,
        name: clean_text(&raw.name),
        created_at: parse_date(&raw.created_at)?,
    })
}

pub fn devices(raw: Vec<RawDevice>) -> Result<Vec<Device>, SourceError> {
    raw.into_iter().map(device).collect()
}
