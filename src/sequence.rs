use std::collections::BTreeMap;

use ndarray::Axis;

use crate::data::{SubjectSequences, SurvivalData};
use crate::error::{DatasetError, Result};

/// regroup flat rows into one sequence per subject
///
/// subjects come out in ascending id order; rows within a subject keep the
/// order they had in `data`.
pub fn group_by_subject(subject_ids: &[i64], data: &SurvivalData) -> Result<SubjectSequences> {
    if subject_ids.len() != data.n_samples() {
        return Err(DatasetError::invalid_dimensions(format!(
            "{} subject ids for {} rows",
            subject_ids.len(),
            data.n_samples()
        )));
    }

    let mut rows_by_subject: BTreeMap<i64, Vec<usize>> = BTreeMap::new();
    for (row, &id) in subject_ids.iter().enumerate() {
        rows_by_subject.entry(id).or_default().push(row);
    }

    let n_subjects = rows_by_subject.len();
    let mut ids = Vec::with_capacity(n_subjects);
    let mut covariates = Vec::with_capacity(n_subjects);
    let mut times = Vec::with_capacity(n_subjects);
    let mut events = Vec::with_capacity(n_subjects);

    for (id, rows) in rows_by_subject {
        ids.push(id);
        covariates.push(data.covariates().select(Axis(0), &rows));
        times.push(data.times().select(Axis(0), &rows));
        events.push(data.events().select(Axis(0), &rows));
    }

    SubjectSequences::new(ids, covariates, times, events, data.feature_names().to_vec())
}
