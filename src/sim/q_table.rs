use ahash::AHashMap;
use arrayvec::ArrayVec;

use super::{DiscreteState, MAX_ACTIONS};

/// One value per action, in action-code order
pub type ActionValues = ArrayVec<f32, MAX_ACTIONS>;

/// Action-value table keyed by [`DiscreteState`].
///
/// Rows are created on demand: [`QTable::values_mut`] inserts an all-zero row
/// the first time a state is touched, while [`QTable::values`] never inserts.
/// Rows are never removed.
#[derive(Clone, Debug)]
pub struct QTable {
    num_actions: usize,
    rows: AHashMap<DiscreteState, ActionValues>,
}

impl QTable {
    /// # Panics
    ///
    /// If `num_actions` is 0 or larger than [`MAX_ACTIONS`]
    #[must_use]
    pub fn new(num_actions: usize) -> Self {
        assert!(
            (1..=MAX_ACTIONS).contains(&num_actions),
            "num_actions must be in 1..={MAX_ACTIONS}, got {num_actions}"
        );

        Self {
            num_actions,
            rows: AHashMap::new(),
        }
    }

    #[inline]
    pub const fn num_actions(&self) -> usize {
        self.num_actions
    }

    /// Number of states seen so far
    #[inline]
    pub fn len(&self) -> usize {
        self.rows.len()
    }

    #[inline]
    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }

    /// Row for `state`, if it has ever been written
    #[inline]
    pub fn values(&self, state: &DiscreteState) -> Option<&[f32]> {
        self.rows.get(state).map(ArrayVec::as_slice)
    }

    /// Row for `state`, inserting an all-zero row first if it is unseen
    pub fn values_mut(&mut self, state: DiscreteState) -> &mut [f32] {
        let num_actions = self.num_actions;
        self.rows
            .entry(state)
            .or_insert_with(|| (0..num_actions).map(|_| 0.0).collect())
            .as_mut_slice()
    }

    /// Value of one action; unseen states read as 0
    #[must_use]
    pub fn get(&self, state: &DiscreteState, action: usize) -> f32 {
        self.values(state).map_or(0.0, |row| row[action])
    }

    /// Highest action value for `state`; unseen states read as 0
    #[must_use]
    pub fn max_value(&self, state: &DiscreteState) -> f32 {
        self.values(state).map_or(0.0, |row| {
            row.iter().copied().fold(f32::NEG_INFINITY, f32::max)
        })
    }

    /// Action with the highest value, lowest action code on ties
    ///
    /// Unseen states are all zero, so they pick action 0.
    #[must_use]
    pub fn best_action(&self, state: &DiscreteState) -> usize {
        let Some(row) = self.values(state) else {
            return 0;
        };

        let mut best = 0;
        for (action, &value) in row.iter().enumerate().skip(1) {
            if value > row[best] {
                best = action;
            }
        }

        best
    }

    pub fn iter(&self) -> impl Iterator<Item = (&DiscreteState, &[f32])> {
        self.rows.iter().map(|(state, row)| (state, row.as_slice()))
    }
}
