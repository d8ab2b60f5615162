//! Setup ballots: the one-time choices each player makes before turns begin.
//!
//! Every field is write-once. A repeated write is an error rather than an
//! overwrite, which is what lets the setup barrier ignore submission order.

use std::collections::HashMap;

use crate::domain::cards_types::{CardSide, ObjectiveCard, StarterCard};
use crate::domain::rules::OFFERED_OBJECTIVES;
use crate::domain::state::PlayerId;
use crate::errors::domain::{MatchError, SeatingKind, SetupKind};

/// One player's staging area during setup.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PlayerInitialConfig {
    starter_card: StarterCard,
    chosen_side: Option<CardSide>,
    offered_objectives: Option<[ObjectiveCard; OFFERED_OBJECTIVES]>,
    chosen_objective: Option<usize>,
}

impl PlayerInitialConfig {
    pub fn new(starter_card: StarterCard) -> Self {
        Self {
            starter_card,
            chosen_side: None,
            offered_objectives: None,
            chosen_objective: None,
        }
    }

    pub fn starter_card(&self) -> &StarterCard {
        &self.starter_card
    }

    pub fn chosen_side(&self) -> Option<CardSide> {
        self.chosen_side
    }

    pub fn offered_objectives(&self) -> Option<&[ObjectiveCard; OFFERED_OBJECTIVES]> {
        self.offered_objectives.as_ref()
    }

    pub fn chosen_objective(&self) -> Option<&ObjectiveCard> {
        let offered = self.offered_objectives.as_ref()?;
        offered.get(self.chosen_objective?)
    }

    pub fn choose_starter_side(&mut self, side: CardSide) -> Result<(), MatchError> {
        if self.chosen_side.is_some() {
            return Err(MatchError::setup(SetupKind::AlreadyChosen));
        }
        self.chosen_side = Some(side);
        Ok(())
    }

    /// Record which objectives were offered. Only the coordinator writes this.
    pub fn offer_objectives(
        &mut self,
        objectives: [ObjectiveCard; OFFERED_OBJECTIVES],
    ) -> Result<(), MatchError> {
        if self.offered_objectives.is_some() {
            return Err(MatchError::setup(SetupKind::AlreadyChosen));
        }
        self.offered_objectives = Some(objectives);
        Ok(())
    }

    /// Pick one of the two offered objectives by index (0 or 1).
    pub fn choose_objective(&mut self, index: usize) -> Result<&ObjectiveCard, MatchError> {
        if index >= OFFERED_OBJECTIVES {
            return Err(MatchError::invalid_parameter(format!(
                "objective index must be 0 or 1, got {index}"
            )));
        }
        let Some(offered) = self.offered_objectives.as_ref() else {
            return Err(MatchError::setup(SetupKind::NotPermittedYet));
        };
        if self.chosen_objective.is_some() {
            return Err(MatchError::setup(SetupKind::AlreadyChosen));
        }
        self.chosen_objective = Some(index);
        Ok(&offered[index])
    }
}

/// Which setup decision a barrier is waiting on.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SetupStep {
    StarterSide,
    Objective,
}

/// All players' ballots, keyed by identity.
#[derive(Debug, Clone, Default)]
pub struct SetupBallots {
    ballots: HashMap<PlayerId, PlayerInitialConfig>,
}

impl SetupBallots {
    pub fn new(starters: impl IntoIterator<Item = (PlayerId, StarterCard)>) -> Self {
        Self {
            ballots: starters
                .into_iter()
                .map(|(player, card)| (player, PlayerInitialConfig::new(card)))
                .collect(),
        }
    }

    pub fn get(&self, player: &PlayerId) -> Option<&PlayerInitialConfig> {
        self.ballots.get(player)
    }

    pub fn ballot_mut(&mut self, player: &PlayerId) -> Result<&mut PlayerInitialConfig, MatchError> {
        self.ballots
            .get_mut(player)
            .ok_or(MatchError::seating(SeatingKind::PlayerNotFound))
    }

    /// Barrier predicate: has every player decided the field for `step`?
    pub fn is_complete(&self, step: SetupStep) -> bool {
        self.ballots.values().all(|b| match step {
            SetupStep::StarterSide => b.chosen_side.is_some(),
            SetupStep::Objective => b.chosen_objective.is_some(),
        })
    }

    /// Number of players that have decided the field for `step`.
    pub fn decided(&self, step: SetupStep) -> usize {
        self.ballots
            .values()
            .filter(|b| match step {
                SetupStep::StarterSide => b.chosen_side.is_some(),
                SetupStep::Objective => b.chosen_objective.is_some(),
            })
            .count()
    }

    pub fn len(&self) -> usize {
        self.ballots.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ballots.is_empty()
    }
}
