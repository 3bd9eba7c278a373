//! Tabular action-value estimates
//!
//! A single flat map keyed by `(Observation, Action)`. Missing entries read as
//! 0.0; the table only grows.

use rand::seq::SliceRandom;
use rand::Rng;
use std::collections::HashMap;

use super::observation::Observation;
use crate::game::Action;

#[derive(Debug, Clone, Default, PartialEq)]
pub struct QTable {
    values: HashMap<(Observation, Action), f64>,
}

impl QTable {
    pub fn new() -> Self {
        Self::default()
    }

    /// Estimated value of taking `action` in `obs`, 0.0 if never updated
    pub fn value(&self, obs: &Observation, action: Action) -> f64 {
        self.values.get(&(*obs, action)).copied().unwrap_or(0.0)
    }

    /// Values for every action, indexed by [`Action::index`]
    pub fn q_values(&self, obs: &Observation) -> [f64; 3] {
        Action::ALL.map(|a| self.value(obs, a))
    }

    pub fn max_value(&self, obs: &Observation) -> f64 {
        self.q_values(obs)
            .into_iter()
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Every action whose value equals the maximum
    pub fn best_actions(&self, obs: &Observation) -> Vec<Action> {
        let qs = self.q_values(obs);
        let max = qs.into_iter().fold(f64::NEG_INFINITY, f64::max);
        Action::ALL
            .into_iter()
            .filter(|a| qs[a.index()] == max)
            .collect()
    }

    /// Epsilon-greedy action selection
    ///
    /// With probability `exploration_rate` a uniformly random action is
    /// returned. Otherwise the greedy action is returned, with ties broken
    /// uniformly among all maximizing actions.
    pub fn select_action<R: Rng + ?Sized>(
        &self,
        obs: &Observation,
        exploration_rate: f64,
        rng: &mut R,
    ) -> Action {
        if rng.gen::<f64>() < exploration_rate {
            return Action::ALL[rng.gen_range(0..Action::ALL.len())];
        }

        self.best_actions(obs)
            .choose(rng)
            .copied()
            .unwrap_or(Action::Straight)
    }

    /// One-step Q-learning update; returns the new value
    ///
    /// `Q(s,a) <- Q(s,a) + alpha * (r + gamma * max_a' Q(s',a') - Q(s,a))`
    pub fn update(
        &mut self,
        obs: &Observation,
        action: Action,
        reward: f64,
        next_obs: &Observation,
        alpha: f64,
        gamma: f64,
    ) -> f64 {
        let future = self.max_value(next_obs);
        let entry = self.values.entry((*obs, action)).or_insert(0.0);
        *entry += alpha * (reward + gamma * future - *entry);
        *entry
    }

    pub fn insert(&mut self, obs: Observation, action: Action, value: f64) -> Option<f64> {
        self.values.insert((obs, action), value)
    }

    /// Number of stored (observation, action) pairs
    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Distinct observations seen so far
    pub fn observation_count(&self) -> usize {
        let mut seen: Vec<Observation> = self.values.keys().map(|(obs, _)| *obs).collect();
        seen.sort_unstable();
        seen.dedup();
        seen.len()
    }

    pub fn entries(&self) -> impl Iterator<Item = (&Observation, Action, f64)> + '_ {
        self.values.iter().map(|((obs, action), v)| (obs, *action, *v))
    }
}
