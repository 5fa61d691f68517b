//! The single entry point callers talk to.
//!
//! One asynchronous operation per data domain. Each resolves the required
//! context locally, invokes the matching [`RawDataSource`] call with the
//! resolved identifiers and any caller-supplied filter, normalizes the raw
//! result and returns it. No implicit retry, no partial results: every
//! operation resolves to a normalized value or one distinctly-typed error.

use chrono::NaiveDate;

use crate::config::Config;
use crate::context::ContextResolver;
use crate::error::{ClientError, ContextError};
use crate::models::*;
use crate::normalize;
use crate::pairing::{DevicePairing, PairingState};
use crate::source::{MessageFolder, RawDataSource};

pub struct RegisterClient<S: RawDataSource> {
    source: S,
    resolver: ContextResolver,
    pairing: DevicePairing,
}

impl<S: RawDataSource> RegisterClient<S> {
    pub fn new(source: S) -> Self {
        Self::with_config(source, &Config::default())
    }

    pub fn with_config(source: S, config: &Config) -> Self {
        Self {
            source,
            resolver: ContextResolver::new(),
            pairing: DevicePairing::new(config.pairing_validity()),
        }
    }

    // --- context ---------------------------------------------------------

    /// Begin a session as the given identity; invalidates any resolved
    /// school, semester list or diary selection.
    pub fn set_identity(&mut self, identity: Identity) {
        self.resolver.set_identity(identity);
    }

    pub fn select_school(
        &mut self,
        school_id: impl Into<String>,
        pupil_id: impl Into<String>,
    ) -> Result<(), ContextError> {
        self.resolver.select_school(school_id, pupil_id)
    }

    /// The pupil's semesters, ordered by (school_year, semester_number).
    /// Fetched once and cached until the school selection changes.
    pub async fn list_semesters(&mut self) -> Result<Vec<Semester>, ClientError> {
        Ok(self.resolver.list_semesters(&self.source).await?.to_vec())
    }

    pub fn select_diary(&mut self, diary_id: &str, semester_id: i32) -> Result<(), ContextError> {
        self.resolver.select_diary(diary_id, semester_id)
    }

    /// Select the semester the register marks as current.
    pub fn select_current_diary(&mut self) -> Result<(), ContextError> {
        self.resolver.select_current_diary()
    }

    pub fn current_diary_context(&self) -> Result<DiaryContext, ContextError> {
        self.resolver.current_diary_context()
    }

    fn school_scope(&self) -> Result<SchoolContext, ContextError> {
        Ok(self.resolver.school()?.clone())
    }

    fn diary_scope(&self) -> Result<DiaryContext, ContextError> {
        self.resolver.current_diary_context()
    }

    // --- account-scoped fetches ------------------------------------------

    pub async fn school_info(&self) -> Result<SchoolInfo, ClientError> {
        let school = self.school_scope()?;
        let raw = self.source.fetch_school_info(&school).await?;
        Ok(normalize::school_info(raw))
    }

    pub async fn pupils(&self) -> Result<Vec<Pupil>, ClientError> {
        self.school_scope()?;
        let raw = self.source.fetch_pupils().await?;
        Ok(normalize::pupils(raw))
    }

    pub async fn reporting_units(&self) -> Result<Vec<ReportingUnit>, ClientError> {
        let school = self.school_scope()?;
        let raw = self.source.fetch_reporting_units(&school).await?;
        Ok(normalize::reporting_units(raw))
    }

    pub async fn recipients(&self, unit_id: i32, role: i32) -> Result<Vec<Recipient>, ClientError> {
        let school = self.school_scope()?;
        let raw = self.source.fetch_recipients(&school, unit_id, role).await?;
        Ok(normalize::recipients(raw))
    }

    /// Today's lucky numbers from the account homepage, one per school.
    pub async fn lucky_numbers(&self) -> Result<Vec<LuckyNumber>, ClientError> {
        let school = self.school_scope()?;
        let raw = self.source.fetch_lucky_numbers(&school).await?;
        Ok(normalize::lucky_numbers(raw))
    }

    /// Messages in one folder, oldest first, optionally from a start date.
    pub async fn messages(
        &self,
        folder: MessageFolder,
        start: Option<NaiveDate>,
    ) -> Result<Vec<Message>, ClientError> {
        let school = self.school_scope()?;
        let raw = self.source.fetch_messages(&school, folder, start).await?;
        Ok(normalize::messages(raw)?)
    }

    pub async fn message(&self, message_id: i32, folder_id: i32) -> Result<Message, ClientError> {
        let school = self.school_scope()?;
        let raw = self.source.fetch_message(&school, message_id, folder_id).await?;
        Ok(normalize::message(raw)?)
    }

    // --- diary-scoped fetches --------------------------------------------

    /// Attendance for the week starting at `week_start`, chronological.
    pub async fn attendance(&self, week_start: NaiveDate) -> Result<Vec<Attendance>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_attendance(&diary, week_start).await?;
        Ok(normalize::attendance(raw)?)
    }

    pub async fn attendance_summary(
        &self,
        subject_id: Option<i32>,
    ) -> Result<Vec<AttendanceSummary>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_attendance_summary(&diary, subject_id).await?;
        Ok(normalize::attendance_summary(raw))
    }

    pub async fn exams(&self, start: NaiveDate) -> Result<Vec<Exam>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_exams(&diary, start).await?;
        Ok(normalize::exams(raw)?)
    }

    pub async fn homework(&self, date: NaiveDate) -> Result<Vec<Homework>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_homework(&diary, date).await?;
        Ok(normalize::homework(raw)?)
    }

    pub async fn notes(&self) -> Result<Vec<Note>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_notes(&diary).await?;
        Ok(normalize::notes(raw)?)
    }

    /// Grades for the selected diary, in register order.
    pub async fn grades(&self) -> Result<Vec<Grade>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_grades(&diary).await?;
        Ok(normalize::grades(raw)?)
    }

    /// Grades for an explicit diary/semester pair (historical queries).
    /// The pair is validated against the resolved semester list first.
    pub async fn grades_for(
        &self,
        diary_id: &str,
        semester_id: i32,
    ) -> Result<Vec<Grade>, ClientError> {
        let diary = self.resolver.diary_context_for(diary_id, semester_id)?;
        let raw = self.source.fetch_grades(&diary).await?;
        Ok(normalize::grades(raw)?)
    }

    pub async fn grade_summary(&self) -> Result<Vec<GradeSummary>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_grade_summary(&diary).await?;
        Ok(normalize::grade_summary(raw))
    }

    pub async fn grade_statistics(
        &self,
        annual: bool,
    ) -> Result<Vec<GradeStatistics>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_grade_statistics(&diary, annual).await?;
        Ok(normalize::grade_statistics(raw, annual))
    }

    pub async fn teachers(&self) -> Result<Vec<Teacher>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_teachers(&diary).await?;
        Ok(normalize::teachers(raw))
    }

    pub async fn student_info(&self) -> Result<StudentInfo, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_student_info(&diary).await?;
        Ok(normalize::student_info(raw)?)
    }

    pub async fn timetable(&self, week_start: NaiveDate) -> Result<Vec<TimetableSlot>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_timetable(&diary, week_start).await?;
        Ok(normalize::timetable(raw)?)
    }

    pub async fn realized(&self, start: NaiveDate) -> Result<Vec<RealizedLesson>, ClientError> {
        let diary = self.diary_scope()?;
        let raw = self.source.fetch_realized(&diary, start).await?;
        Ok(normalize::realized(raw)?)
    }

    // --- devices & pairing -------------------------------------------------

    /// Mint a pairing token/PIN pair for registering a mobile device.
    pub async fn request_pairing(&mut self) -> Result<PairingState, ClientError> {
        let school = self.school_scope()?;
        self.pairing.request(&self.source, &school).await
    }

    /// Consume the issued pairing and register a device under `name`.
    pub async fn register_device(&mut self, name: &str) -> Result<Device, ClientError> {
        let school = self.school_scope()?;
        self.pairing.register(&self.source, &school, name).await
    }

    /// Devices registered on the account; independent of pairing state.
    pub async fn list_devices(&self) -> Result<Vec<Device>, ClientError> {
        let school = self.school_scope()?;
        let raw = self.source.fetch_registered_devices(&school).await?;
        Ok(normalize::devices(raw)?)
    }

    /// Remove a registered device; independent of pairing state.
    pub async fn unregister_device(&self, device_id: i32) -> Result<(), ClientError> {
        let school = self.school_scope()?;
        self.source.unregister_device(&school, device_id).await?;
        Ok(())
    }
}
