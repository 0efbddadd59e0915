use derive_more::{Display, IsVariant};
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};
use utilities::{concat_runs, Runs};

/// Derives the value used to decide whether neighbouring elements share a run.
pub trait KeyFn<T> {
    type Key: PartialEq;

    fn key(&self, item: &T) -> Self::Key;
}

/// Groups elements by their own value.
#[derive(Debug, Default, Clone, Copy)]
pub struct Identity;

impl<T: Clone + PartialEq> KeyFn<T> for Identity {
    type Key = T;

    fn key(&self, item: &T) -> T {
        item.clone()
    }
}

impl<T, K, F> KeyFn<T> for F
where
    F: Fn(&T) -> K,
    K: PartialEq,
{
    type Key = K;

    fn key(&self, item: &T) -> K {
        self(item)
    }
}

/// Fallible counterpart of [`KeyFn`], used by [`GroupOptions::try_group`].
pub trait TryKeyFn<T> {
    type Key: PartialEq;
    type Error;

    fn try_key(&self, item: &T) -> Result<Self::Key, Self::Error>;
}

impl<T, K, E, F> TryKeyFn<T> for F
where
    F: Fn(&T) -> Result<K, E>,
    K: PartialEq,
{
    type Key = K;
    type Error = E;

    fn try_key(&self, item: &T) -> Result<K, E> {
        self(item)
    }
}

#[derive(Debug, Default, Clone, Copy, PartialEq, Eq, Display, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum Shape {
    #[default]
    #[display("runs")]
    Runs,
    #[display("pairs")]
    Pairs,
}

impl From<bool> for Shape {
    fn from(pairs: bool) -> Self {
        if pairs {
            Shape::Pairs
        } else {
            Shape::Runs
        }
    }
}

/// Result of a grouping, either bare runs or `(key, run)` pairs.
///
/// Serializes as nested JSON arrays: `[["A","A"],["B"]]` for runs and
/// `[["A",["A","A"]],["B",["B"]]]` for pairs.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, IsVariant)]
#[serde(untagged)]
pub enum Grouped<K, T> {
    Runs(Vec<Vec<T>>),
    Pairs(Vec<(K, Vec<T>)>),
}

impl<K, T> Grouped<K, T> {
    pub fn len(&self) -> usize {
        match self {
            Grouped::Runs(runs) => runs.len(),
            Grouped::Pairs(pairs) => pairs.len(),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub fn runs(&self) -> Vec<&[T]> {
        match self {
            Grouped::Runs(runs) => runs.iter().map(Vec::as_slice).collect(),
            Grouped::Pairs(pairs) => pairs.iter().map(|(_, run)| run.as_slice()).collect(),
        }
    }

    /// Keys of each run, in order. Only pairs carry them.
    pub fn keys(&self) -> Option<Vec<&K>> {
        match self {
            Grouped::Runs(_) => None,
            Grouped::Pairs(pairs) => Some(pairs.iter().map(|(key, _)| key).collect()),
        }
    }

    pub fn into_runs(self) -> Vec<Vec<T>> {
        match self {
            Grouped::Runs(runs) => runs,
            Grouped::Pairs(pairs) => pairs.into_iter().map(|(_, run)| run).collect(),
        }
    }

    pub fn flatten(self) -> Vec<T> {
        concat_runs(self.into_runs())
    }

    fn element_count(&self) -> usize {
        self.runs().iter().map(|run| run.len()).sum()
    }
}

/// Options for splitting a sequence into runs of consecutive elements that
/// share a key.
///
/// Only neighbours are compared: the keys `A, B, A` give three runs, not two.
///
/// ```
/// use grouper::GroupOptions;
///
/// let grouped = GroupOptions::new()
///     .with_key(|v: &f64| v.floor() as i64)
///     .with_pairs(true)
///     .group([0.1, 0.2, 1.1, 2.5]);
///
/// assert_eq!(grouped.keys(), Some(vec![&0, &1, &2]));
/// ```
#[derive(Debug, Default, Clone, Copy)]
pub struct GroupOptions<F = Identity> {
    key: F,
    shape: Shape,
}

impl GroupOptions {
    pub fn new() -> Self {
        Self::default()
    }
}

impl<F> GroupOptions<F> {
    pub fn with_key<G>(self, key: G) -> GroupOptions<G> {
        GroupOptions {
            key,
            shape: self.shape,
        }
    }

    pub fn with_pairs(self, pairs: bool) -> Self {
        self.with_shape(pairs.into())
    }

    pub fn with_shape(mut self, shape: Shape) -> Self {
        self.shape = shape;
        self
    }

    pub fn shape(&self) -> Shape {
        self.shape
    }

    pub fn group<T, I>(&self, input: I) -> Grouped<F::Key, T>
    where
        I: IntoIterator<Item = T>,
        F: KeyFn<T>,
    {
        let runs = input
            .into_iter()
            .runs_by(|item| self.key.key(item))
            .into_iter()
            .inspect(|(_, run)| trace!(len = run.len(), "closed run"));

        let grouped = match self.shape {
            Shape::Runs => Grouped::Runs(runs.map(|(_, run)| run).collect()),
            Shape::Pairs => Grouped::Pairs(runs.collect()),
        };

        debug!(
            elements = grouped.element_count(),
            groups = grouped.len(),
            shape = %self.shape,
            "grouped consecutive runs"
        );

        grouped
    }

    /// Same as [`GroupOptions::group`] with a fallible key function. The
    /// first error the key function returns is handed back unchanged.
    pub fn try_group<T, I>(&self, input: I) -> Result<Grouped<F::Key, T>, F::Error>
    where
        I: IntoIterator<Item = T>,
        F: TryKeyFn<T>,
    {
        let runs = input
            .into_iter()
            .try_runs_by(|item| self.key.try_key(item))?
            .into_iter()
            .inspect(|(_, run)| trace!(len = run.len(), "closed run"));

        let grouped = match self.shape {
            Shape::Runs => Grouped::Runs(runs.map(|(_, run)| run).collect()),
            Shape::Pairs => Grouped::Pairs(runs.collect()),
        };

        debug!(
            elements = grouped.element_count(),
            groups = grouped.len(),
            shape = %self.shape,
            "grouped consecutive runs"
        );

        Ok(grouped)
    }
}

/// Splits `input` into runs of consecutive equal elements.
pub fn group_by<T, I>(input: I) -> Vec<Vec<T>>
where
    I: IntoIterator<Item = T>,
    T: Clone + PartialEq,
{
    GroupOptions::new().group(input).into_runs()
}
