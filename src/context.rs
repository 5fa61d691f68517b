//! Identity and selection state for a register session.
//!
//! A caller sets an identity, picks a school/pupil, resolves the pupil's
//! semester list and selects a diary/semester pair before any diary-scoped
//! fetch is valid. All validation here is local; a caller-side mistake
//! never costs a network round-trip.
//!
//! Single-writer discipline: once resolved, the context is read-only for the
//! duration of a batch of calls. Mutating it while operations using the
//! prior context are in flight is a caller error; no locking is done here.

use crate::error::{ClientError, ContextError};
use crate::models::{DiaryContext, Identity, SchoolContext, Semester};
use crate::normalize;
use crate::source::RawDataSource;

#[derive(Debug, Default)]
pub struct ContextResolver {
    identity: Option<Identity>,
    school: Option<SchoolContext>,
    /// Result of the last semester resolution; selections validate against it.
    semesters: Option<Vec<Semester>>,
    diary: Option<DiaryContext>,
}

impl ContextResolver {
    pub fn new() -> Self {
        Self::default()
    }

    /// Begin a session as the given identity. Any previously resolved
    /// school, semester list or diary selection is invalidated.
    pub fn set_identity(&mut self, identity: Identity) {
        self.identity = Some(identity);
        self.school = None;
        self.semesters = None;
        self.diary = None;
    }

    /// Select a school/pupil pair within the current identity. Clears any
    /// cached semester list and diary selection from a previous pupil.
    pub fn select_school(
        &mut self,
        school_id: impl Into<String>,
        pupil_id: impl Into<String>,
    ) -> Result<(), ContextError> {
        if self.identity.is_none() {
            return Err(ContextError::Unresolved("identity"));
        }
        self.school = Some(SchoolContext {
            school_id: school_id.into(),
            pupil_id: pupil_id.into(),
        });
        self.semesters = None;
        self.diary = None;
        Ok(())
    }

    pub fn identity(&self) -> Result<&Identity, ContextError> {
        self.identity
            .as_ref()
            .ok_or(ContextError::Unresolved("identity"))
    }

    pub fn school(&self) -> Result<&SchoolContext, ContextError> {
        self.identity()?;
        self.school
            .as_ref()
            .ok_or(ContextError::Unresolved("school"))
    }

    /// Resolve the pupil's semesters, reusing the cached list when present.
    ///
    /// The result is ordered by (school_year, semester_number). Duplicate
    /// year/number pairs cannot legally occur; if the source yields one
    /// anyway, the entry marked current wins and the discard is logged as a
    /// data-quality event.
    pub async fn list_semesters<S>(&mut self, source: &S) -> Result<&[Semester], ClientError>
    where
        S: RawDataSource + ?Sized,
    {
        if self.semesters.is_none() {
            let school = self.school()?.clone();
            let raw = source.fetch_semesters(&school).await?;
            let resolved = dedup_semesters(normalize::semesters(raw)?);
            self.semesters = Some(resolved);
        }
        Ok(self.semesters.as_deref().unwrap_or_default())
    }

    /// Select a diary/semester pair out of the last resolved semester list.
    pub fn select_diary(
        &mut self,
        diary_id: &str,
        semester_id: i32,
    ) -> Result<(), ContextError> {
        let context = self.diary_context_for(diary_id, semester_id)?;
        self.diary = Some(context);
        Ok(())
    }

    /// Select the semester marked current, the register's default diary.
    pub fn select_current_diary(&mut self) -> Result<(), ContextError> {
        self.school()?;
        let semesters = self
            .semesters
            .as_deref()
            .ok_or(ContextError::Unresolved("semesters"))?;
        let current = semesters
            .iter()
            .find(|s| s.current)
            .ok_or(ContextError::Unresolved("current semester"))?;
        self.diary = Some(DiaryContext {
            diary_id: current.diary_id.clone(),
            semester_id: current.semester_id,
            school_year: current.school_year,
        });
        Ok(())
    }

    /// Validate a diary/semester pair against the last resolved semester
    /// list without changing the selection. Used for historical queries
    /// that override the current diary.
    pub fn diary_context_for(
        &self,
        diary_id: &str,
        semester_id: i32,
    ) -> Result<DiaryContext, ContextError> {
        self.school()?;
        let semesters = self
            .semesters
            .as_deref()
            .ok_or(ContextError::Unresolved("semesters"))?;
        let semester = semesters
            .iter()
            .find(|s| s.diary_id == diary_id && s.semester_id == semester_id)
            .ok_or_else(|| ContextError::UnknownDiary {
                diary_id: diary_id.to_string(),
                semester_id,
            })?;
        Ok(DiaryContext {
            diary_id: diary_id.to_string(),
            semester_id,
            school_year: semester.school_year,
        })
    }

    pub fn current_diary_context(&self) -> Result<DiaryContext, ContextError> {
        self.school()?;
        self.diary
            .clone()
            .ok_or(ContextError::Unresolved("diary"))
    }
}

/// Keep at most one semester per (school_year, semester_number) pair and
/// order the list. On duplicates the entry marked current wins.
fn dedup_semesters(mut semesters: Vec<Semester>) -> Vec<Semester> {
    semesters.sort_by_key(|s| (s.school_year, s.semester_number));
    let mut out: Vec<Semester> = Vec::with_capacity(semesters.len());
    for sem in semesters {
        match out.last_mut() {
            Some(prev)
                if prev.school_year == sem.school_year
                    && prev.semester_number == sem.semester_number =>
            {
                let discarded = if sem.current {
                    std::mem::replace(prev, sem)
                } else {
                    sem
                };
                log::warn!(
                    "discarding duplicate semester {} for year {}/{} (kept the current one)",
                    discarded.semester_id,
                    discarded.school_year,
                    discarded.semester_number
                );
            }
            _ => out.push(sem),
        }
    }
    out
}
