use itertools::Itertools;

pub trait Runs: Iterator + Sized {
    /// Splits into maximal runs of consecutive items whose keys compare
    /// equal, keeping the key of each run.
    fn runs_by<K, F>(self, key: F) -> Vec<(K, Vec<Self::Item>)>
    where
        F: FnMut(&Self::Item) -> K,
        K: PartialEq,
    {
        let chunks = self.chunk_by(key);
        let runs = chunks
            .into_iter()
            .map(|(k, run)| (k, run.collect_vec()))
            .collect_vec();
        runs
    }

    /// Like [`Runs::runs_by`], for key functions that can fail. The first
    /// error is returned as-is.
    fn try_runs_by<K, E, F>(self, mut key: F) -> Result<Vec<(K, Vec<Self::Item>)>, E>
    where
        F: FnMut(&Self::Item) -> Result<K, E>,
        K: PartialEq,
    {
        self.map(|item| key(&item).map(|k| (k, vec![item])))
            .process_results(|keyed| {
                keyed
                    .coalesce(|(k, mut run), (next_k, next)| {
                        if next_k == k {
                            run.extend(next);
                            Ok((k, run))
                        } else {
                            Err(((k, run), (next_k, next)))
                        }
                    })
                    .collect_vec()
            })
    }

    /// Runs of consecutive equal items.
    fn runs(self) -> Vec<Vec<Self::Item>>
    where
        Self::Item: Clone + PartialEq,
    {
        self.runs_by(<Self::Item as Clone>::clone)
            .into_iter()
            .map(|(_, run)| run)
            .collect_vec()
    }
}

impl<I: Iterator> Runs for I {}

/// Joins runs back into the sequence they were split from.
pub fn concat_runs<T, I>(runs: I) -> Vec<T>
where
    I: IntoIterator<Item = Vec<T>>,
{
    runs.into_iter().concat()
}

#[cfg(test)]
mod tests {
    use std::cell::Cell;

    use itertools::Itertools;

    use crate::iterable::{concat_runs, Runs};

    #[test]
    fn test_runs() {
        let runs = "AAAABBBCCDAABBB".chars().runs();
        let runs = runs.into_iter().map(String::from_iter).collect_vec();
        assert_eq!(runs, vec!["AAAA", "BBB", "CC", "D", "AA", "BBB"]);
    }

    #[test]
    fn test_runs_by_key() {
        let items = vec![0.1, 0.2, 0.3, 1.1, 1.2, 1.3, 2.5];
        let runs = items.into_iter().runs_by(|v: &f64| v.floor());
        assert_eq!(
            runs,
            vec![
                (0.0, vec![0.1, 0.2, 0.3]),
                (1.0, vec![1.1, 1.2, 1.3]),
                (2.0, vec![2.5]),
            ]
        );
    }

    #[test]
    fn test_runs_empty() {
        assert!(Vec::<u8>::new().into_iter().runs().is_empty());
        assert!(Vec::<u8>::new().into_iter().runs_by(|v| *v).is_empty());
    }

    #[test]
    fn test_key_called_once_per_item() {
        let calls = Cell::new(0);
        let runs = [1, 1, 2, 3, 3, 3].into_iter().runs_by(|v| {
            calls.set(calls.get() + 1);
            *v
        });
        assert_eq!(runs.len(), 3);
        assert_eq!(calls.get(), 6);
    }

    #[test]
    fn test_try_runs_by_stops_at_first_error() {
        let calls = Cell::new(0);
        let runs = ["1", "1", "x", "2", "y"].into_iter().try_runs_by(|s| {
            calls.set(calls.get() + 1);
            s.parse::<u8>().map_err(|_| s.to_string())
        });

        assert_eq!(runs, Err("x".to_string()));
        assert_eq!(calls.get(), 3);
    }

    #[test]
    fn test_try_runs_by_ok() {
        let runs = ["1", "1", "2", "1"]
            .into_iter()
            .try_runs_by(|s| s.parse::<u8>().map_err(|e| e.to_string()));
        assert_eq!(
            runs,
            Ok(vec![(1, vec!["1", "1"]), (2, vec!["2"]), (1, vec!["1"])])
        );
    }

    #[test]
    fn test_try_runs_by_empty() {
        let runs = Vec::<&str>::new()
            .into_iter()
            .try_runs_by(|s| s.parse::<u8>());
        assert_eq!(runs, Ok(vec![]));
    }

    #[test]
    fn test_concat_runs() {
        let items = vec![3, 3, 1, 4, 4, 4, 1, 5];
        let runs = items.clone().into_iter().runs();
        assert_eq!(concat_runs(runs), items);
        assert!(concat_runs(Vec::<Vec<u8>>::new()).is_empty());
    }
}
