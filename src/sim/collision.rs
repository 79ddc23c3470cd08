//! Contact classification
//!
//! The scene collaborator reports contacts as a pair of category tags. The
//! resolver turns that pair into a semantic outcome; applying the outcome to
//! the session is the session's job.

use serde::{Deserialize, Serialize};

use crate::config::FlightConfig;

/// What kind of object a physics-enabled entity represents
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Category {
    FlyingBody,
    Obstacle,
    Collectible,
    Boundary,
}

impl Category {
    const fn bit(self) -> u8 {
        match self {
            Category::FlyingBody => 1 << 0,
            Category::Obstacle => 1 << 1,
            Category::Collectible => 1 << 2,
            Category::Boundary => 1 << 3,
        }
    }
}

/// Unordered set of categories
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub struct CategorySet(u8);

impl CategorySet {
    pub const fn empty() -> Self {
        Self(0)
    }

    pub const fn with(self, category: Category) -> Self {
        Self(self.0 | category.bit())
    }

    /// Set containing both members of a contact pair
    pub const fn pair(a: Category, b: Category) -> Self {
        Self::empty().with(a).with(b)
    }

    pub const fn contains(self, category: Category) -> bool {
        self.0 & category.bit() != 0
    }

    pub const fn len(self) -> u32 {
        self.0.count_ones()
    }

    pub const fn is_empty(self) -> bool {
        self.0 == 0
    }
}

/// Result of resolving a contact
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case", tag = "kind")]
pub enum CollisionOutcome {
    ObstacleHit { penalty: u32 },
    CollectiblePickup { coins: u32, score: u32 },
    BoundaryContact,
    None,
}

/// Classifies contact pairs
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct CollisionResolver {
    pub obstacle_penalty: u32,
    pub collectible_coins: u32,
    pub collectible_score: u32,
}

impl Default for CollisionResolver {
    fn default() -> Self {
        Self::from_config(&FlightConfig::default())
    }
}

impl CollisionResolver {
    pub fn from_config(config: &FlightConfig) -> Self {
        Self {
            obstacle_penalty: config.obstacle_penalty,
            collectible_coins: config.collectible_coins,
            collectible_score: config.collectible_score,
        }
    }

    /// Classify a contact; `resolve(a, b) == resolve(b, a)`
    pub fn resolve(&self, a: Category, b: Category) -> CollisionOutcome {
        let pair = CategorySet::pair(a, b);
        // Exactly one flying body and one other category
        if pair.len() != 2 || !pair.contains(Category::FlyingBody) {
            return CollisionOutcome::None;
        }

        if pair.contains(Category::Obstacle) {
            CollisionOutcome::ObstacleHit {
                penalty: self.obstacle_penalty,
            }
        } else if pair.contains(Category::Collectible) {
            CollisionOutcome::CollectiblePickup {
                coins: self.collectible_coins,
                score: self.collectible_score,
            }
        } else if pair.contains(Category::Boundary) {
            CollisionOutcome::BoundaryContact
        } else {
            CollisionOutcome::None
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use proptest::prelude::*;

    const ALL: [Category; 4] = [
        Category::FlyingBody,
        Category::Obstacle,
        Category::Collectible,
        Category::Boundary,
    ];

    #[test]
    fn test_flying_body_pairs() {
        let resolver = CollisionResolver::default();
        assert_eq!(
            resolver.resolve(Category::FlyingBody, Category::Obstacle),
            CollisionOutcome::ObstacleHit { penalty: 50 }
        );
        assert_eq!(
            resolver.resolve(Category::Collectible, Category::FlyingBody),
            CollisionOutcome::CollectiblePickup { coins: 1, score: 10 }
        );
        assert_eq!(
            resolver.resolve(Category::FlyingBody, Category::Boundary),
            CollisionOutcome::BoundaryContact
        );
    }

    #[test]
    fn test_unrecognized_pairs_resolve_to_none() {
        let resolver = CollisionResolver::default();
        assert_eq!(
            resolver.resolve(Category::FlyingBody, Category::FlyingBody),
            CollisionOutcome::None
        );
        assert_eq!(
            resolver.resolve(Category::Obstacle, Category::Collectible),
            CollisionOutcome::None
        );
        assert_eq!(
            resolver.resolve(Category::Boundary, Category::Boundary),
            CollisionOutcome::None
        );
    }

    #[test]
    fn test_obstacle_order_independent() {
        let resolver = CollisionResolver::default();
        assert_eq!(
            resolver.resolve(Category::FlyingBody, Category::Obstacle),
            resolver.resolve(Category::Obstacle, Category::FlyingBody)
        );
    }

    #[test]
    fn test_category_set_membership() {
        let set = CategorySet::pair(Category::Obstacle, Category::FlyingBody);
        assert!(set.contains(Category::Obstacle));
        assert!(set.contains(Category::FlyingBody));
        assert!(!set.contains(Category::Boundary));
        assert_eq!(set.len(), 2);
        assert!(CategorySet::empty().is_empty());
    }

    proptest! {
        #[test]
        fn prop_resolution_is_symmetric(i in 0usize..4, j in 0usize..4) {
            let resolver = CollisionResolver::default();
            prop_assert_eq!(resolver.resolve(ALL[i], ALL[j]), resolver.resolve(ALL[j], ALL[i]));
        }
    }
}
