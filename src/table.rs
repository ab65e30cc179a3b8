use crate::{
    encode::EncodeIndex,
    error::{CdError, Result},
};
use hashbrown::HashSet;
use ndarray::{Array2, ArrayView1, Axis};

/// Outcomes of `k` treatments over the same `n` observations, stored as an `(n, k)` matrix.
///
/// Every constructor checks the shape of the input, so a table that exists is always
/// complete and aligned: at least two treatments, at least two observations, one finite
/// outcome per (observation, treatment) cell and unique treatment names.
#[derive(Debug, Clone)]
pub struct OutcomeTable {
    treatments: Vec<String>,
    observations: Vec<String>,
    outcomes: Array2<f64>,
}

impl OutcomeTable {
    /// Builds a table from an `(n, k)` matrix whose columns are treatments.
    ///
    /// Treatments are named `1..=k` unless names are provided.
    pub fn from_matrix(outcomes: Array2<f64>, treatments: Option<Vec<String>>) -> Result<Self> {
        let (n, k) = outcomes.dim();
        let treatments = match treatments {
            Some(names) if names.len() != k => {
                return Err(CdError::NameCount {
                    names: names.len(),
                    columns: k,
                })
            }
            Some(names) => names,
            None => positional_names(k),
        };
        Self::validated(treatments, positional_names(n), outcomes)
    }

    /// Builds a table from `(treatment, outcomes)` pairs whose outcomes are aligned by position.
    pub fn from_pairs<I, S>(pairs: I) -> Result<Self>
    where
        I: IntoIterator<Item = (S, Vec<f64>)>,
        S: Into<String>,
    {
        let (treatments, columns): (Vec<String>, Vec<Vec<f64>>) =
            pairs.into_iter().map(|(t, x)| (t.into(), x)).unzip();

        let n = columns.first().map(|x| x.len()).unwrap_or(0);
        for (treatment, column) in treatments.iter().zip(columns.iter()) {
            if column.len() != n {
                return Err(CdError::MisalignedTreatment {
                    treatment: treatment.clone(),
                    expected: n,
                    found: column.len(),
                });
            }
        }

        let outcomes = Array2::from_shape_fn((n, treatments.len()), |(i, t)| columns[t][i]);
        Self::validated(treatments, positional_names(n), outcomes)
    }

    /// Pivots long-form `(treatment, observation, outcome)` records into a table.
    ///
    /// Treatments and observations keep the order in which they first appear. Every
    /// treatment must have exactly one record per observation.
    pub fn from_triples<'a, I>(records: I) -> Result<Self>
    where
        I: IntoIterator<Item = (&'a str, &'a str, f64)>,
    {
        let records = records.into_iter().collect::<Vec<(&str, &str, f64)>>();
        let treatment_index = EncodeIndex::new(records.iter().map(|r| r.0));
        let observation_index = EncodeIndex::new(records.iter().map(|r| r.1));

        let shape = (observation_index.len(), treatment_index.len());
        let mut outcomes = Array2::from_elem(shape, f64::NAN);
        let mut filled = Array2::from_elem(shape, false);

        for ((&t, &i), record) in treatment_index
            .encoding()
            .iter()
            .zip(observation_index.encoding().iter())
            .zip(records.iter())
        {
            if filled[[i, t]] {
                return Err(CdError::DuplicateOutcome {
                    treatment: record.0.to_string(),
                    observation: record.1.to_string(),
                });
            }
            filled[[i, t]] = true;
            outcomes[[i, t]] = record.2;
        }

        if let Some(((i, t), _)) = filled.indexed_iter().find(|(_, is_filled)| !**is_filled) {
            return Err(CdError::MissingOutcome {
                treatment: treatment_index.labels()[t].to_string(),
                observation: observation_index.labels()[i].to_string(),
            });
        }

        Self::validated(
            to_owned_labels(treatment_index.labels()),
            to_owned_labels(observation_index.labels()),
            outcomes,
        )
    }

    fn validated(
        treatments: Vec<String>,
        observations: Vec<String>,
        outcomes: Array2<f64>,
    ) -> Result<Self> {
        let (n, k) = outcomes.dim();
        if k < 2 {
            return Err(CdError::TooFewTreatments(k));
        }
        if n < 2 {
            return Err(CdError::TooFewObservations(n));
        }

        {
            let mut seen = HashSet::with_capacity(k);
            for treatment in treatments.iter() {
                if !seen.insert(treatment.as_str()) {
                    return Err(CdError::DuplicateTreatment(treatment.clone()));
                }
            }
        }

        if let Some(((i, t), _)) = outcomes.indexed_iter().find(|(_, x)| !x.is_finite()) {
            return Err(CdError::NonFiniteOutcome {
                treatment: treatments[t].clone(),
                observation: observations[i].clone(),
            });
        }

        Ok(Self {
            treatments,
            observations,
            outcomes,
        })
    }

    pub fn treatments(&self) -> &[String] {
        &self.treatments
    }

    pub fn observations(&self) -> &[String] {
        &self.observations
    }

    /// The `(n, k)` outcome matrix
    pub fn outcomes(&self) -> &Array2<f64> {
        &self.outcomes
    }

    /// All outcomes of a single treatment
    pub fn column(&self, treatment: usize) -> ArrayView1<f64> {
        self.outcomes.index_axis(Axis(1), treatment)
    }

    pub fn n_treatments(&self) -> usize {
        self.outcomes.ncols()
    }

    pub fn n_observations(&self) -> usize {
        self.outcomes.nrows()
    }
}

fn positional_names(size: usize) -> Vec<String> {
    (1..=size).map(|x| x.to_string()).collect()
}

fn to_owned_labels(labels: &[&str]) -> Vec<String> {
    labels.iter().map(|x| x.to_string()).collect()
}

#[cfg(test)]
mod testing {
    use super::*;
    use ndarray::array;

    #[test]
    fn test_from_matrix() {
        let table = OutcomeTable::from_matrix(array![[1., 2.], [3., 4.], [5., 6.]], None).unwrap();
        assert_eq!(table.treatments(), &["1", "2"]);
        assert_eq!(table.observations(), &["1", "2", "3"]);
        assert_eq!(table.n_treatments(), 2);
        assert_eq!(table.n_observations(), 3);
        assert_eq!(table.column(1), array![2., 4., 6.]);
    }

    #[test]
    fn test_from_matrix_name_count() {
        let names = vec!["a".to_string()];
        let err = OutcomeTable::from_matrix(array![[1., 2.], [3., 4.]], Some(names)).unwrap_err();
        assert!(matches!(err, CdError::NameCount { names: 1, columns: 2 }));
    }

    #[test]
    fn test_from_pairs() {
        let table = OutcomeTable::from_pairs(vec![
            ("a", vec![1., 2., 3.]),
            ("b", vec![4., 5., 6.]),
        ])
        .unwrap();
        assert_eq!(table.treatments(), &["a", "b"]);
        assert_eq!(table.outcomes(), array![[1., 4.], [2., 5.], [3., 6.]]);
    }

    #[test]
    fn test_from_pairs_misaligned() {
        let err = OutcomeTable::from_pairs(vec![("a", vec![1., 2., 3.]), ("b", vec![4., 5.])])
            .unwrap_err();
        match err {
            CdError::MisalignedTreatment {
                treatment,
                expected,
                found,
            } => {
                assert_eq!(treatment, "b");
                assert_eq!(expected, 3);
                assert_eq!(found, 2);
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_pairs_duplicate_treatment() {
        let err = OutcomeTable::from_pairs(vec![("a", vec![1., 2.]), ("a", vec![4., 5.])])
            .unwrap_err();
        assert!(matches!(err, CdError::DuplicateTreatment(t) if t == "a"));
    }

    #[test]
    fn test_from_matrix_named() {
        let names = vec!["x".to_string(), "y".to_string()];
        let table = OutcomeTable::from_matrix(array![[1., 2.], [3., 4.]], Some(names)).unwrap();
        assert_eq!(table.treatments(), &["x", "y"]);

        let names = vec!["x".to_string(), "x".to_string()];
        let err = OutcomeTable::from_matrix(array![[1., 2.], [3., 4.]], Some(names)).unwrap_err();
        assert!(matches!(err, CdError::DuplicateTreatment(t) if t == "x"));
    }

    #[test]
    fn test_too_small() {
        let err = OutcomeTable::from_pairs(vec![("a", vec![1., 2.])]).unwrap_err();
        assert!(matches!(err, CdError::TooFewTreatments(1)));

        let err = OutcomeTable::from_pairs(vec![("a", vec![1.]), ("b", vec![2.])]).unwrap_err();
        assert!(matches!(err, CdError::TooFewObservations(1)));
    }

    #[test]
    fn test_non_finite() {
        let err = OutcomeTable::from_pairs(vec![("a", vec![1., f64::NAN]), ("b", vec![2., 3.])])
            .unwrap_err();
        match err {
            CdError::NonFiniteOutcome {
                treatment,
                observation,
            } => {
                assert_eq!(treatment, "a");
                assert_eq!(observation, "2");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_triples() {
        let records = vec![
            ("svm", "iris", 0.9),
            ("knn", "iris", 0.8),
            ("knn", "wine", 0.7),
            ("svm", "wine", 0.6),
        ];
        let table = OutcomeTable::from_triples(records).unwrap();
        assert_eq!(table.treatments(), &["svm", "knn"]);
        assert_eq!(table.observations(), &["iris", "wine"]);
        assert_eq!(table.outcomes(), array![[0.9, 0.8], [0.6, 0.7]]);
    }

    #[test]
    fn test_from_triples_missing() {
        let records = vec![
            ("svm", "iris", 0.9),
            ("knn", "iris", 0.8),
            ("svm", "wine", 0.6),
        ];
        let err = OutcomeTable::from_triples(records).unwrap_err();
        match err {
            CdError::MissingOutcome {
                treatment,
                observation,
            } => {
                assert_eq!(treatment, "knn");
                assert_eq!(observation, "wine");
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn test_from_triples_duplicate() {
        let records = vec![
            ("svm", "iris", 0.9),
            ("svm", "iris", 0.8),
            ("knn", "iris", 0.8),
        ];
        let err = OutcomeTable::from_triples(records).unwrap_err();
        assert!(matches!(err, CdError::DuplicateOutcome { .. }));
    }
}
