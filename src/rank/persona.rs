//! Persona profiles derived from a role and a job-to-be-done.

use std::collections::{BTreeMap, BTreeSet};

use super::tokenize::tokenize;

/// Weight tiers for persona keywords.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PersonaWeights {
    /// Weight of each keyword found in the role description
    pub role_weight: f64,
    /// Weight of each keyword found in the task description
    pub task_weight: f64,
}

impl PersonaWeights {
    /// Create the default weights.
    pub fn new() -> Self {
        Self::default()
    }

    /// Set the role weight.
    pub fn with_role_weight(mut self, weight: f64) -> Self {
        self.role_weight = weight;
        self
    }

    /// Set the task weight.
    pub fn with_task_weight(mut self, weight: f64) -> Self {
        self.task_weight = weight;
        self
    }
}

impl Default for PersonaWeights {
    fn default() -> Self {
        Self {
            role_weight: 1.0,
            task_weight: 1.5,
        }
    }
}

/// Keyword interests of one persona and task.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct PersonaProfile {
    /// Role description as supplied
    pub role: String,
    /// Task description as supplied
    pub task: String,
    keyword_weights: BTreeMap<String, f64>,
}

impl PersonaProfile {
    /// Weight of a keyword, if it belongs to the profile.
    pub fn weight(&self, keyword: &str) -> Option<f64> {
        self.keyword_weights.get(keyword).copied()
    }

    /// Keywords with their weights, in lexical order.
    pub fn keywords(&self) -> impl Iterator<Item = (&str, f64)> {
        self.keyword_weights.iter().map(|(k, w)| (k.as_str(), *w))
    }

    /// Number of keywords.
    pub fn len(&self) -> usize {
        self.keyword_weights.len()
    }

    /// Check if the profile has no keywords.
    pub fn is_empty(&self) -> bool {
        self.keyword_weights.is_empty()
    }
}

/// Derives a [`PersonaProfile`] from free-form role and task text.
#[derive(Debug, Clone, Default)]
pub struct PersonaWeighter {
    weights: PersonaWeights,
}

impl PersonaWeighter {
    /// Create a weighter with the given weight tiers.
    pub fn new(weights: PersonaWeights) -> Self {
        Self { weights }
    }

    /// Build the profile. Each distinct keyword receives the role weight if it
    /// occurs in the role and the task weight if it occurs in the task; a
    /// keyword in both receives the sum. Empty inputs give an empty profile.
    pub fn profile(&self, role: &str, task: &str) -> PersonaProfile {
        let mut keyword_weights: BTreeMap<String, f64> = BTreeMap::new();

        let tiers = [
            (role, self.weights.role_weight),
            (task, self.weights.task_weight),
        ];
        for (text, weight) in tiers {
            let distinct: BTreeSet<String> = tokenize(text).into_iter().collect();
            for keyword in distinct {
                *keyword_weights.entry(keyword).or_insert(0.0) += weight;
            }
        }

        if keyword_weights.is_empty() {
            log::debug!("Persona {:?} / task {:?} produced no keywords", role, task);
        }

        PersonaProfile {
            role: role.to_string(),
            task: task.to_string(),
            keyword_weights,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_and_task_tiers() {
        let profile = PersonaWeighter::default().profile(
            "Travel Planner",
            "Plan a trip of 4 days for a group of 10 college friends.",
        );

        assert_eq!(profile.weight("travel"), Some(1.0));
        assert_eq!(profile.weight("planner"), Some(1.0));
        assert_eq!(profile.weight("trip"), Some(1.5));
        assert_eq!(profile.weight("college"), Some(1.5));
        assert_eq!(profile.weight("for"), None);
    }

    #[test]
    fn test_shared_keyword_sums_tiers() {
        let profile = PersonaWeighter::default().profile("Food Contractor", "Prepare food menu");
        assert_eq!(profile.weight("food"), Some(2.5));
    }

    #[test]
    fn test_repeats_do_not_inflate_weight() {
        let profile = PersonaWeighter::default().profile("", "menu menu menu");
        assert_eq!(profile.weight("menu"), Some(1.5));
        assert_eq!(profile.len(), 1);
    }

    #[test]
    fn test_empty_inputs_give_empty_profile() {
        let profile = PersonaWeighter::default().profile("", "   ");
        assert!(profile.is_empty());
        assert_eq!(profile.role, "");

        let profile = PersonaWeighter::default().profile("a an", "of the");
        assert!(profile.is_empty());
    }

    #[test]
    fn test_custom_weights() {
        let weighter = PersonaWeighter::new(PersonaWeights::new().with_task_weight(3.0));
        let profile = weighter.profile("analyst", "forms");
        assert_eq!(profile.weight("analyst"), Some(1.0));
        assert_eq!(profile.weight("forms"), Some(3.0));
    }

    #[test]
    fn test_keywords_are_ordered() {
        let profile = PersonaWeighter::default().profile("zeta alpha", "");
        let keys: Vec<&str> = profile.keywords().map(|(k, _)| k).collect();
        assert_eq!(keys, vec!["alpha", "zeta"]);
    }
}
