//! Matchup verdict
//!
//! Decides the outcome of one (entity, action) pair against another.

use std::fmt;

use serde::Serialize;

use crate::catalog::{Action, Entity};

/// One side of a matchup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct Contender {
    pub entity: Entity,
    pub action: Action,
}

/// Outcome of a matchup.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum Verdict {
    Winner {
        winner: String,
        action: String,
        loser: String,
    },
    Tie {
        first: String,
        second: String,
    },
}

impl Verdict {
    // == Decide ==
    /// Compares the two actions' power.
    ///
    /// Higher power wins. Equal powers tie. When exactly one side has no
    /// power value, the side that has one wins; when neither has one, it is
    /// a tie. Absent power is not the same as zero.
    pub fn decide(first: &Contender, second: &Contender) -> Self {
        match (first.action.power, second.action.power) {
            (Some(a), Some(b)) if a > b => Self::win(first, second),
            (Some(a), Some(b)) if a < b => Self::win(second, first),
            (Some(_), None) => Self::win(first, second),
            (None, Some(_)) => Self::win(second, first),
            _ => Self::Tie {
                first: first.entity.name.clone(),
                second: second.entity.name.clone(),
            },
        }
    }

    fn win(winner: &Contender, loser: &Contender) -> Self {
        Self::Winner {
            winner: winner.entity.name.clone(),
            action: winner.action.name.clone(),
            loser: loser.entity.name.clone(),
        }
    }

    pub fn is_tie(&self) -> bool {
        matches!(self, Self::Tie { .. })
    }
}

impl fmt::Display for Verdict {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Winner {
                winner,
                action,
                loser,
            } => write!(
                f,
                "{} lands a decisive blow with {} and defeats {}!",
                winner, action, loser
            ),
            Self::Tie { first, second } => write!(
                f,
                "It's a tie! {} and {} are evenly matched.",
                first, second
            ),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn contender(name: &str, action: &str, power: Option<u32>) -> Contender {
        Contender {
            entity: Entity {
                id: 1,
                name: name.to_string(),
                sprite_url: None,
                actions: Vec::new(),
            },
            action: Action::new(action, power),
        }
    }

    #[test]
    fn test_equal_power_is_tie() {
        let a = contender("bulbasaur", "vine-whip", Some(80));
        let b = contender("charmander", "ember", Some(80));

        let verdict = Verdict::decide(&a, &b);
        assert!(verdict.is_tie());
        assert_eq!(
            verdict.to_string(),
            "It's a tie! bulbasaur and charmander are evenly matched."
        );
    }

    #[test]
    fn test_only_first_has_power() {
        let a = contender("bulbasaur", "vine-whip", Some(80));
        let b = contender("charmander", "growl", None);

        assert_eq!(
            Verdict::decide(&a, &b),
            Verdict::Winner {
                winner: "bulbasaur".to_string(),
                action: "vine-whip".to_string(),
                loser: "charmander".to_string(),
            }
        );
    }

    #[test]
    fn test_only_second_has_power() {
        let a = contender("bulbasaur", "growl", None);
        let b = contender("charmander", "ember", Some(1));

        assert_eq!(
            Verdict::decide(&a, &b),
            Verdict::Winner {
                winner: "charmander".to_string(),
                action: "ember".to_string(),
                loser: "bulbasaur".to_string(),
            }
        );
    }

    #[test]
    fn test_no_power_on_either_side_is_tie() {
        let a = contender("bulbasaur", "growl", None);
        let b = contender("charmander", "leer", None);

        assert!(Verdict::decide(&a, &b).is_tie());
    }

    #[test]
    fn test_higher_power_wins_and_names_its_action() {
        let a = contender("bulbasaur", "vine-whip", Some(60));
        let b = contender("charmander", "flamethrower", Some(90));

        let verdict = Verdict::decide(&a, &b);
        assert_eq!(
            verdict.to_string(),
            "charmander lands a decisive blow with flamethrower and defeats bulbasaur!"
        );
    }

    #[test]
    fn test_zero_power_still_beats_absent_power() {
        let a = contender("bulbasaur", "tackle", Some(0));
        let b = contender("charmander", "growl", None);

        assert!(matches!(
            Verdict::decide(&a, &b),
            Verdict::Winner { ref winner, .. } if winner == "bulbasaur"
        ));
    }

    #[test]
    fn test_verdict_serializes_with_kind_tag() {
        let verdict = Verdict::Tie {
            first: "a".to_string(),
            second: "b".to_string(),
        };
        let json = serde_json::to_value(&verdict).unwrap();
        assert_eq!(json["kind"], "tie");
    }
}
