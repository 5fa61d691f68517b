//! Fixture-backed register source mirroring the public fakelog.cf test
//! instance. Counts network calls so tests can assert that caller-side
//! mistakes never reach the source.

use std::sync::atomic::{AtomicBool, AtomicUsize, Ordering};
use std::sync::Arc;

use async_trait::async_trait;
use chrono::NaiveDate;
use uonet_client::config::Config;
use uonet_client::error::SourceError;
use uonet_client::models::{DiaryContext, Identity, SchoolContext};
use uonet_client::source::*;
use uonet_client::RegisterClient;

pub const HOST: &str = "fakelog.cf";
pub const SYMBOL: &str = "Default";
pub const SCHOOL_ID: &str = "123456";
pub const PUPIL_ID: &str = "1";

/// Clones share the call counter, so a test can keep a handle after moving
/// the source into the client.
#[derive(Clone, Default)]
pub struct FakeRegisterSource {
    inner: Arc<Shared>,
}

#[derive(Default)]
struct Shared {
    calls: AtomicUsize,
    fail_transport: AtomicBool,
}

impl FakeRegisterSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn network_calls(&self) -> usize {
        self.inner.calls.load(Ordering::SeqCst)
    }

    pub fn set_fail_transport(&self, fail: bool) {
        self.inner.fail_transport.store(fail, Ordering::SeqCst);
    }

    fn hit(&self) -> Result<(), SourceError> {
        self.inner.calls.fetch_add(1, Ordering::SeqCst);
        if self.inner.fail_transport.load(Ordering::SeqCst) {
            return Err(SourceError::Transport("connection reset".to_string()));
        }
        Ok(())
    }
}

fn semester(id: i32, number: i32, diary: &str, name: &str, year: i32, current: bool) -> RawSemester {
    RawSemester {
        semester_id: id,
        semester_number: number,
        diary_id: diary.to_string(),
        diary_name: name.to_string(),
        current,
        school_year: year,
    }
}

#[async_trait]
impl RawDataSource for FakeRegisterSource {
    async fn fetch_school_info(&self, _school: &SchoolContext) -> Result<RawSchoolInfo, SourceError> {
        self.hit()?;
        Ok(RawSchoolInfo {
            school_name: "Publiczny dziennik Wulkanowego nr 1 w fakelog.cf".into(),
            diaries: vec!["III 2017".into()],
            students: vec!["Jan Kowalski".into()],
        })
    }

    async fn fetch_pupils(&self) -> Result<Vec<RawPupil>, SourceError> {
        self.hit()?;
        Ok(vec![RawPupil {
            symbol: SYMBOL.into(),
            email: "jan@fakelog.cf".into(),
            student_id: PUPIL_ID.into(),
            student_name: "Jan Kowalski".into(),
            school_id: SCHOOL_ID.into(),
            school_name: "Publiczny dziennik Wulkanowego nr 1 w fakelog.cf".into(),
        }])
    }

    async fn fetch_semesters(&self, _school: &SchoolContext) -> Result<Vec<RawSemester>, SourceError> {
        self.hit()?;
        // Deliberately unsorted; the resolver orders the list.
        Ok(vec![
            semester(1234567, 1, "303", "III 2017", 2017, false),
            semester(1111111, 1, "101", "1A 2015", 2015, false),
            semester(1111112, 2, "101", "1A 2015", 2015, false),
            semester(2222221, 1, "202", "II 2016", 2016, false),
            semester(2222222, 2, "202", "II 2016", 2016, false),
            semester(1234568, 2, "303", "III 2017", 2017, true),
        ])
    }

    async fn fetch_attendance(
        &self,
        _diary: &DiaryContext,
        week_start: NaiveDate,
    ) -> Result<Vec<RawAttendance>, SourceError> {
        self.hit()?;
        if week_start != NaiveDate::from_ymd_opt(2018, 10, 1).unwrap() {
            return Ok(Vec::new());
        }
        Ok(vec![
            RawAttendance {
                number: 1,
                date: "2018-10-01".into(),
                subject: "Zajęcia artystyczne".into(),
                name: "Obecność".into(),
            },
            RawAttendance {
                number: 2,
                date: "2018-10-01".into(),
                subject: "Historia".into(),
                name: "Nieobecność nieusprawiedliwiona".into(),
            },
            RawAttendance {
                number: 3,
                date: "2018-10-01".into(),
                subject: "Fizyka".into(),
                name: "Spóźnienie usprawiedliwione".into(),
            },
            RawAttendance {
                number: 1,
                date: "2018-10-02".into(),
                subject: "Matematyka".into(),
                name: "Zwolniony".into(),
            },
        ])
    }

    async fn fetch_attendance_summary(
        &self,
        _diary: &DiaryContext,
        _subject_id: Option<i32>,
    ) -> Result<Vec<RawAttendanceSummary>, SourceError> {
        self.hit()?;
        Ok(vec![RawAttendanceSummary {
            month: "IX".into(),
            presence: 32,
            absence: 1,
            absence_excused: 2,
            absence_for_school_reasons: 3,
            lateness: 4,
            lateness_excused: 5,
            exemption: 6,
        }])
    }

    async fn fetch_exams(
        &self,
        _diary: &DiaryContext,
        _start: NaiveDate,
    ) -> Result<Vec<RawExam>, SourceError> {
        self.hit()?;
        Ok(vec![RawExam {
            date: "2018-05-09".into(),
            entry_date: "2018-04-01".into(),
            subject: "Język angielski".into(),
            group: "J1".into(),
            exam_type: "Sprawdzian".into(),
            description: "słownictwo(kultura)".into(),
            teacher: "Anyż Zofia".into(),
            teacher_symbol: "AZ".into(),
        }])
    }

    async fn fetch_homework(
        &self,
        _diary: &DiaryContext,
        _date: NaiveDate,
    ) -> Result<Vec<RawHomework>, SourceError> {
        self.hit()?;
        Ok(vec![RawHomework {
            date: "2017-10-23".into(),
            entry_date: "2017-10-18".into(),
            subject: "Metodologia programowania".into(),
            content: "Wszystkie instrukcje warunkowe".into(),
            teacher: "Janusz Tracz".into(),
            teacher_symbol: "TJ".into(),
        }])
    }

    async fn fetch_notes(&self, _diary: &DiaryContext) -> Result<Vec<RawNote>, SourceError> {
        self.hit()?;
        Ok(vec![RawNote {
            date: "2018-03-26".into(),
            teacher: "Janusz Tracz".into(),
            category: "Udział w konkursie szkolnym +20 pkt".into(),
            content: "+ 20p za udział w Konkursie Języka Angielskiego".into(),
        }])
    }

    async fn fetch_grades(&self, diary: &DiaryContext) -> Result<Vec<RawGrade>, SourceError> {
        self.hit()?;
        if diary.semester_id != 1234567 {
            return Ok(Vec::new());
        }
        Ok(vec![
            RawGrade {
                subject: "Historia".into(),
                entry: "1".into(),
                color: "000000".into(),
                symbol: "Spr".into(),
                description: "spr.-rozbiory".into(),
                weight: "5,00".into(),
                date: "2018-01-29".into(),
                teacher: "Janusz Tracz".into(),
            },
            RawGrade {
                subject: "Fizyka".into(),
                entry: "4".into(),
                color: "F04C4C".into(),
                symbol: "Bież".into(),
                description: "-".into(),
                weight: "1,00".into(),
                date: "2018-02-02".into(),
                teacher: "Janusz Tracz".into(),
            },
        ])
    }

    async fn fetch_grade_summary(
        &self,
        _diary: &DiaryContext,
    ) -> Result<Vec<RawGradeSummary>, SourceError> {
        self.hit()?;
        Ok(vec![
            RawGradeSummary {
                name: "Historia".into(),
                predicted: "1".into(),
                final_grade: "1".into(),
            },
            RawGradeSummary {
                name: "Język niemiecki".into(),
                predicted: "".into(),
                final_grade: "-".into(),
            },
        ])
    }

    async fn fetch_grade_statistics(
        &self,
        _diary: &DiaryContext,
        annual: bool,
    ) -> Result<Vec<RawGradeStatistics>, SourceError> {
        self.hit()?;
        let subject = if annual { "Język angielski" } else { "Język polski" };
        Ok(vec![RawGradeStatistics {
            subject: subject.into(),
            grade: "5".into(),
            amount: 7,
        }])
    }

    async fn fetch_teachers(&self, _diary: &DiaryContext) -> Result<Vec<RawTeacher>, SourceError> {
        self.hit()?;
        Ok(vec![RawTeacher {
            subject: "Historia".into(),
            name: "Janusz Tracz".into(),
            short_name: "TJ".into(),
        }])
    }

    async fn fetch_student_info(&self, _diary: &DiaryContext) -> Result<RawStudentInfo, SourceError> {
        self.hit()?;
        Ok(RawStudentInfo {
            full_name: "Jan Marek Kowalski".into(),
            first_name: "Jan".into(),
            second_name: "Marek".into(),
            surname: "Kowalski".into(),
            birth_date: "1970-01-01".into(),
            birth_place: "Warszawa".into(),
            pesel: "12345678900".into(),
            gender: "Mężczyzna".into(),
            polish_citizenship: "1".into(),
            family_name: "Nowak".into(),
            parents_names: "Monika, Kamil".into(),
            address: "".into(),
            registered_address: "".into(),
            correspondence_address: "".into(),
            phone_number: "".into(),
            cell_phone_number: "-".into(),
            email: "jan@fakelog.cf".into(),
            family: vec![RawFamilyMember {
                full_name: "Monika Nowak".into(),
                kinship: "matka".into(),
                address: "-".into(),
                phones: "-".into(),
                email: "-".into(),
            }],
        })
    }

    async fn fetch_reporting_units(
        &self,
        _school: &SchoolContext,
    ) -> Result<Vec<RawReportingUnit>, SourceError> {
        self.hit()?;
        Ok(vec![RawReportingUnit {
            unit_id: 14,
            short_name: "011562".into(),
            sender_id: 94,
            sender_name: "Kowalski Jan".into(),
            roles: vec![2],
        }])
    }

    async fn fetch_recipients(
        &self,
        _school: &SchoolContext,
        unit_id: i32,
        role: i32,
    ) -> Result<Vec<RawRecipient>, SourceError> {
        self.hit()?;
        Ok(vec![RawRecipient {
            recipient_id: "18rPracownik".into(),
            name: "Tracz Janusz".into(),
            unit_id,
            role,
        }])
    }

    async fn fetch_messages(
        &self,
        _school: &SchoolContext,
        folder: MessageFolder,
        _start: Option<NaiveDate>,
    ) -> Result<Vec<RawMessage>, SourceError> {
        self.hit()?;
        let message = |id: i32, date: &str, subject: &str| RawMessage {
            message_id: id,
            folder_id: folder.folder_id(),
            sender: "Janusz Tracz".into(),
            recipients: vec!["Jan Kowalski".into()],
            subject: subject.into(),
            content: "Treść wiadomości".into(),
            date: date.into(),
            unread: false,
        };
        Ok(match folder {
            MessageFolder::Received => vec![
                message(35232, "2015-10-07 09:09:45", "Czy jest jakiś sprawdzian?"),
                message(35233, "2015-10-06 12:00:00", "Temat lekcji"),
            ],
            MessageFolder::Sent => vec![message(35300, "2015-10-08 10:00:00", "Zapytanie")],
            MessageFolder::Deleted => vec![message(35400, "2015-10-09 11:00:00", "Stara wiadomość")],
        })
    }

    async fn fetch_message(
        &self,
        _school: &SchoolContext,
        message_id: i32,
        folder_id: i32,
    ) -> Result<RawMessage, SourceError> {
        self.hit()?;
        Ok(RawMessage {
            message_id,
            folder_id,
            sender: "Janusz Tracz".into(),
            recipients: vec!["Jan Kowalski".into()],
            subject: "Stara wiadomość".into(),
            content: "Pełna treść wiadomości".into(),
            date: "2015-10-09 11:00:00".into(),
            unread: false,
        })
    }

    async fn fetch_timetable(
        &self,
        _diary: &DiaryContext,
        week_start: NaiveDate,
    ) -> Result<Vec<RawTimetableSlot>, SourceError> {
        self.hit()?;
        Ok(vec![RawTimetableSlot {
            number: 0,
            start: "07:10".into(),
            end: "07:55".into(),
            date: week_start.format("%Y-%m-%d").to_string(),
            subject: "Fizyka".into(),
            group: "zaw2".into(),
            room: "23".into(),
            teacher: "Karolina Kowalska".into(),
            info: "uczniowie zwolnieni do domu".into(),
            canceled: true,
            changes: false,
        }])
    }

    async fn fetch_realized(
        &self,
        _diary: &DiaryContext,
        start: NaiveDate,
    ) -> Result<Vec<RawRealizedLesson>, SourceError> {
        self.hit()?;
        Ok(vec![RawRealizedLesson {
            date: start.format("%Y-%m-%d").to_string(),
            number: 1,
            subject: "Historia i społeczeństwo".into(),
            topic: "Powstanie listopadowe".into(),
            teacher: "Histeryczna Jadwiga".into(),
            teacher_symbol: "Hi".into(),
            absence: "Nieobecność nieusprawiedliwiona".into(),
        }])
    }

    async fn fetch_lucky_numbers(
        &self,
        _school: &SchoolContext,
    ) -> Result<Vec<RawLuckyNumber>, SourceError> {
        self.hit()?;
        Ok(vec![RawLuckyNumber {
            original_content: "Szczęśliwy numer dnia: 18".into(),
            number: 18,
            school_name: "Publiczny dziennik Wulkanowego nr 1 w fakelog.cf".into(),
        }])
    }

    async fn fetch_registered_devices(
        &self,
        _school: &SchoolContext,
    ) -> Result<Vec<RawDevice>, SourceError> {
        self.hit()?;
        Ok(vec![
            RawDevice {
                device_id: 321,
                name: "Telefon Jana".into(),
                created_at: "2018-09-17 11:14:33".into(),
            },
            RawDevice {
                device_id: 1234,
                name: "Tablet".into(),
                created_at: "2018-09-18 08:00:00".into(),
            },
        ])
    }

    async fn request_token(&self, _school: &SchoolContext) -> Result<RawToken, SourceError> {
        self.hit()?;
        Ok(RawToken {
            token: "FK100000".into(),
            symbol: SYMBOL.into(),
            pin: "999999".into(),
        })
    }

    async fn register_device(
        &self,
        _school: &SchoolContext,
        token: &str,
        pin: &str,
        device_name: &str,
    ) -> Result<RawDevice, SourceError> {
        self.hit()?;
        if token != "FK100000" || pin != "999999" {
            return Err(SourceError::UnexpectedShape(
                "backend rejected the token/pin pair".to_string(),
            ));
        }
        Ok(RawDevice {
            device_id: 555,
            name: device_name.to_string(),
            created_at: "2018-09-20 09:30:00".into(),
        })
    }

    async fn unregister_device(
        &self,
        _school: &SchoolContext,
        _device_id: i32,
    ) -> Result<(), SourceError> {
        self.hit()?;
        Ok(())
    }
}

pub fn identity() -> Identity {
    Identity {
        host: HOST.to_string(),
        symbol: SYMBOL.to_string(),
        email: "jan@fakelog.cf".to_string(),
        password: "jan123".to_string(),
    }
}

/// A client with identity set and the fakelog school selected, plus a
/// handle onto the shared source for call-count assertions.
pub fn connected_client() -> (RegisterClient<FakeRegisterSource>, FakeRegisterSource) {
    connected_client_with(&Config::default())
}

/// Like [`connected_client`] but with an explicit config (pairing tests
/// shrink the validity window).
pub fn connected_client_with(
    config: &Config,
) -> (RegisterClient<FakeRegisterSource>, FakeRegisterSource) {
    let source = FakeRegisterSource::new();
    let mut client = RegisterClient::with_config(source.clone(), config);
    client.set_identity(identity());
    client.select_school(SCHOOL_ID, PUPIL_ID).unwrap();
    (client, source)
}
