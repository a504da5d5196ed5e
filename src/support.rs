//! SUPPORT: Study to Understand Prognoses and Preferences for Outcomes and
//! Risks of Treatments.
//!
//! Vanderbilt's cohort of seriously ill hospitalized adults (Knaus et al.,
//! 1995). One row per patient, no repeated measurements, so there is no
//! sequential form.
//!
//! The bundled `datasets/support2.csv` is a synthetic stand-in with the same
//! columns and category spellings as the public file, not the study data.
//! Point [`LoadOptions::with_data_dir`](crate::LoadOptions::with_data_dir) at
//! a directory holding the real `support2.csv` to load the study itself.

use ndarray::{concatenate, Axis};

use crate::config::DataSource;
use crate::data::{LoadedDataset, SurvivalData};
use crate::error::{DatasetError, Result};
use crate::preprocessing::{one_hot_encode, MeanImputer, StandardScaler};
use crate::resources::{read_resource, SUPPORT_RESOURCE};
use crate::table::RawTable;

pub const NUMERIC_COLUMNS: [&str; 18] = [
    "age", "num.co", "meanbp", "wblc", "hrt", "resp", "temp", "pafi", "alb", "bili", "crea",
    "sod", "ph", "glucose", "bun", "urine", "adlp", "adls",
];

pub const CATEGORICAL_COLUMNS: [&str; 6] = ["sex", "dzgroup", "dzclass", "income", "race", "ca"];

const DURATION: &str = "d.time";
const EVENT: &str = "death";

/// load SUPPORT from the configured source
pub fn load_support(source: &DataSource) -> Result<LoadedDataset> {
    let bytes = read_resource(SUPPORT_RESOURCE, source)?;
    load_support_from_bytes(&bytes)
}

/// run the SUPPORT pipeline over raw csv text
pub fn load_support_from_bytes(bytes: &[u8]) -> Result<LoadedDataset> {
    let table = RawTable::from_bytes(SUPPORT_RESOURCE, bytes)?;

    let numeric = NUMERIC_COLUMNS
        .iter()
        .map(|&name| table.numeric_column(name).map(|col| col.insert_axis(Axis(1))))
        .collect::<Result<Vec<_>>>()?;
    let numeric_views: Vec<_> = numeric.iter().map(|col| col.view()).collect();
    let x_num = concatenate(Axis(1), &numeric_views)
        .map_err(|err| DatasetError::invalid_dimensions(err.to_string()))?;

    let categorical = CATEGORICAL_COLUMNS
        .iter()
        .map(|&name| table.text_column(name).map(|values| (name, values)))
        .collect::<Result<Vec<_>>>()?;
    let (x_cat, cat_names) = one_hot_encode(&categorical)?;

    let x = concatenate(Axis(1), &[x_num.view(), x_cat.view()])
        .map_err(|err| DatasetError::invalid_dimensions(err.to_string()))?;
    let names: Vec<String> = NUMERIC_COLUMNS
        .iter()
        .map(|name| name.to_string())
        .chain(cat_names)
        .collect();

    let times = table.numeric_column(DURATION)?;
    let events = table.event_column(EVENT)?;

    // statistics cover every row, including the ones dropped below
    let mut imputer = MeanImputer::new();
    let x = imputer.fit_transform(&x)?;
    let names: Vec<String> = imputer
        .kept_columns()?
        .into_iter()
        .map(|j| names[j].clone())
        .collect();
    let x = StandardScaler::new().fit_transform(&x)?;

    let keep: Vec<usize> = times
        .iter()
        .enumerate()
        .filter_map(|(i, t)| (!t.is_nan()).then_some(i))
        .collect();
    if keep.len() < times.len() {
        log::debug!("dropping {} SUPPORT rows without {}", times.len() - keep.len(), DURATION);
    }

    let data = SurvivalData::new(
        x.select(Axis(0), &keep),
        times.select(Axis(0), &keep),
        events.select(Axis(0), &keep),
        names,
    )?;

    log::info!(
        "loaded SUPPORT: {} patients, {} features, {} events",
        data.n_samples(),
        data.n_features(),
        data.n_events()
    );
    Ok(LoadedDataset::Flat(data))
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    const HEADER: &str = "age,death,sex,d.time,dzgroup,dzclass,num.co,income,race,ca,meanbp,wblc,\
hrt,resp,temp,pafi,alb,bili,crea,sod,ph,glucose,bun,urine,adlp,adls";

    fn fixture() -> String {
        let rows = [
            "62.8,0,male,2029,Lung Cancer,Cancer,0,$11-$25k,other,metastatic,97,6.0,69,22,36.0,388,1.8,0.2,1.2,141,7.46,NA,NA,NA,7,7",
            "60.3,1,female,4,Cirrhosis,COPD/CHF/Cirrhosis,2,$11-$25k,white,no,43,17.1,112,34,34.6,98,NA,NA,5.5,132,7.25,NA,NA,NA,NA,1",
            "52.7,1,female,47,Cirrhosis,COPD/CHF/Cirrhosis,2,under $11k,white,no,70,8.5,88,28,37.4,231,NA,2.2,2.0,134,7.46,NA,NA,NA,1,0",
            "42.4,1,female,NA,Lung Cancer,Cancer,2,under $11k,white,metastatic,75,9.1,88,32,35.0,NA,NA,NA,0.8,139,NA,NA,NA,NA,0,0",
            "79.9,0,female,1025,ARF/MOSF w/Sepsis,ARF/MOSF,1,NA,white,no,59,13.5,112,20,37.9,173,NA,NA,0.8,143,7.51,NA,NA,NA,NA,2",
            "93.0,1,male,131,Coma,Coma,1,NA,white,no,110,10.4,101,44,38.4,266,NA,NA,0.7,140,7.66,NA,NA,NA,NA,1",
        ];
        format!("{HEADER}\n{}\n", rows.join("\n"))
    }

    fn load_fixture() -> SurvivalData {
        load_support_from_bytes(fixture().as_bytes())
            .unwrap()
            .into_flat()
            .unwrap()
    }

    #[test]
    fn test_rows_without_time_dropped() {
        let data = load_fixture();

        assert_eq!(data.n_samples(), 5);
        assert_eq!(data.times().to_vec(), vec![2029.0, 4.0, 47.0, 1025.0, 131.0]);
        assert_eq!(data.events().to_vec(), vec![0, 1, 1, 0, 1]);
    }

    #[test]
    fn test_all_missing_columns_dropped() {
        let data = load_fixture();
        let names = data.feature_names();

        // glucose, bun and urine have no observed value at all
        for gone in ["glucose", "bun", "urine"] {
            assert!(!names.iter().any(|n| n == gone));
        }
        assert_eq!(names[0], "age");
        assert!(names.iter().any(|n| n == "alb"));
        assert_eq!(data.n_features(), names.len());
    }

    #[test]
    fn test_numeric_block_before_categorical() {
        let data = load_fixture();
        let names = data.feature_names();

        let last_numeric = names.iter().position(|n| n == "adls").unwrap();
        let first_dummy = names.iter().position(|n| n == "sex_female").unwrap();
        assert_eq!(first_dummy, last_numeric + 1);
        assert_eq!(names.last().unwrap(), "ca_no");
        // race has a single level here
        assert!(names.iter().any(|n| n == "race_white"));
    }

    #[test]
    fn test_covariates_imputed() {
        let data = load_fixture();
        assert!(data.covariates().iter().all(|v| v.is_finite()));

        let alb = data.feature_names().iter().position(|n| n == "alb").unwrap();
        // a single observed albumin: every row imputed to it, then centred to 0
        for &v in data.covariates().column(alb) {
            assert_relative_eq!(v, 0.0, epsilon = 1e-12);
        }
    }

    #[test]
    fn test_missing_event_column() {
        let csv = fixture().replacen("death", "died", 1);
        let err = load_support_from_bytes(csv.as_bytes()).unwrap_err();
        assert_eq!(err, DatasetError::missing_column(SUPPORT_RESOURCE, "death"));
    }
}
