// src/domain/pyramid.rs

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::domain::player::PlayerMatchStats;
use crate::domain::{MatchId, PlayerId};

/// Largest supported number of first-round matches in one pyramid (16 players).
pub const MAX_PYRAMID_LEAVES: usize = 8;

/// Which pair of final ranks a pyramid decides.
///
/// The variant index `i` decides ranks `2i + 1` and `2i + 2` at its root.
#[derive(Clone, Copy, Debug, Serialize, Deserialize, PartialEq, Eq, PartialOrd, Ord, Hash)]
pub enum PyramidType {
    Ranks1_2,
    Ranks3_4,
    Ranks5_6,
    Ranks7_8,
    Ranks9_10,
    Ranks11_12,
    Ranks13_14,
    Ranks15_16,
}

impl PyramidType {
    pub const ALL: [PyramidType; 8] = [
        PyramidType::Ranks1_2,
        PyramidType::Ranks3_4,
        PyramidType::Ranks5_6,
        PyramidType::Ranks7_8,
        PyramidType::Ranks9_10,
        PyramidType::Ranks11_12,
        PyramidType::Ranks13_14,
        PyramidType::Ranks15_16,
    ];

    pub fn index(self) -> usize {
        match self {
            PyramidType::Ranks1_2 => 0,
            PyramidType::Ranks3_4 => 1,
            PyramidType::Ranks5_6 => 2,
            PyramidType::Ranks7_8 => 3,
            PyramidType::Ranks9_10 => 4,
            PyramidType::Ranks11_12 => 5,
            PyramidType::Ranks13_14 => 6,
            PyramidType::Ranks15_16 => 7,
        }
    }

    pub fn from_index(index: usize) -> Option<PyramidType> {
        Self::ALL.get(index).copied()
    }

    /// Rank of the winner of the root match.
    pub fn best_rank(self) -> u32 {
        self.index() as u32 * 2 + 1
    }

    /// Rank of the loser of the root match.
    pub fn worst_final_rank(self) -> u32 {
        self.best_rank() + 1
    }

    /// Type of the pyramid built from the losers of `level` once that level
    /// is complete. Level 0 losers are ranked directly, so there is none.
    ///
    /// Losers of level `L` compete for the `2^(L-1)` rank pairs right after
    /// the ones still decided inside this pyramid.
    pub fn spawned_from(self, level: u32) -> Option<PyramidType> {
        if level == 0 {
            return None;
        }
        let offset = 1usize.checked_shl(level - 1)?;
        PyramidType::from_index(self.index() + offset)
    }
}

#[derive(Debug, Error, Clone, PartialEq, Eq)]
pub enum BracketError {
    #[error("pyramid needs 1, 2, 4 or 8 first-round matches, got {0}")]
    InvalidPairCount(usize),

    #[error("pyramid {0:?} would decide ranks beyond the supported range")]
    TypeOutOfRange(usize),
}

/// One decider match. Inner nodes stay empty until both child matches finish.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Node {
    pub match_id: MatchId,
    /// 0 = the match deciding the pyramid's rank pair; grows towards the leaves.
    pub level: u32,
    pub player_one: Option<PlayerMatchStats>,
    pub player_two: Option<PlayerMatchStats>,
    pub is_finished: bool,
    /// Left child of its parent. The left child's winner plays as player one.
    pub is_left: bool,
}

impl Node {
    fn placeholder(match_id: MatchId, level: u32, is_left: bool) -> Self {
        Self {
            match_id,
            level,
            player_one: None,
            player_two: None,
            is_finished: false,
            is_left,
        }
    }

    /// Both combatants are known.
    pub fn is_ready(&self) -> bool {
        self.player_one.is_some() && self.player_two.is_some()
    }

    pub fn involves(&self, a: PlayerId, b: PlayerId) -> bool {
        match (&self.player_one, &self.player_two) {
            (Some(one), Some(two)) => {
                (one.player_id == a && two.player_id == b)
                    || (one.player_id == b && two.player_id == a)
            }
            _ => false,
        }
    }

    fn sides(&self) -> Option<(&PlayerMatchStats, &PlayerMatchStats)> {
        if !self.is_finished {
            return None;
        }
        let one = self.player_one.as_ref()?;
        let two = self.player_two.as_ref()?;
        let (a, b) = (one.sets_won?, two.sets_won?);
        if a > b {
            Some((one, two))
        } else if b > a {
            Some((two, one))
        } else {
            None
        }
    }

    pub fn winner(&self) -> Option<&PlayerMatchStats> {
        self.sides().map(|(winner, _)| winner)
    }

    pub fn loser(&self) -> Option<&PlayerMatchStats> {
        self.sides().map(|(_, loser)| loser)
    }

    /// Records the sets of a ready match and marks it finished.
    pub fn set_result(&mut self, sets_one: u8, sets_two: u8) {
        if let Some(one) = self.player_one.as_mut() {
            one.sets_won = Some(sets_one);
        }
        if let Some(two) = self.player_two.as_mut() {
            two.sets_won = Some(sets_two);
        }
        self.is_finished = self.is_ready();
    }
}

/// Single-elimination sub-bracket deciding one band of final ranks.
///
/// Stored as a heap: `nodes[0]` is the root, children of `i` live at
/// `2i + 1` (left) and `2i + 2` (right). Nodes never point at their parent;
/// the parent is found again from the root when needed.
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq, Eq)]
pub struct Pyramid {
    pub pyramid_type: PyramidType,
    pub nodes: Vec<Node>,
}

impl Pyramid {
    /// Builds a complete tree whose leaves are `pairs` in seed order.
    ///
    /// `next_id` hands out match ids; it is called once per node, root first.
    pub fn build(
        pyramid_type: PyramidType,
        pairs: Vec<(PlayerMatchStats, PlayerMatchStats)>,
        mut next_id: impl FnMut() -> MatchId,
    ) -> Result<Self, BracketError> {
        let leaves = pairs.len();
        if leaves == 0 || leaves > MAX_PYRAMID_LEAVES || !leaves.is_power_of_two() {
            return Err(BracketError::InvalidPairCount(leaves));
        }

        // Every rank decided below the root must still fit into 1..=16.
        let last_index = pyramid_type.index() + leaves - 1;
        if PyramidType::from_index(last_index).is_none() {
            return Err(BracketError::TypeOutOfRange(last_index));
        }

        let total = leaves * 2 - 1;
        let first_leaf = leaves - 1;
        let mut nodes = Vec::with_capacity(total);

        for index in 0..total {
            let level = level_of_index(index);
            let is_left = index % 2 == 1;
            nodes.push(Node::placeholder(next_id(), level, is_left));
        }

        for (offset, (one, two)) in pairs.into_iter().enumerate() {
            let node = &mut nodes[first_leaf + offset];
            node.player_one = Some(PlayerMatchStats { sets_won: None, ..one });
            node.player_two = Some(PlayerMatchStats { sets_won: None, ..two });
        }

        Ok(Self {
            pyramid_type,
            nodes,
        })
    }

    /// `None` only for an empty pyramid, which `build` never produces.
    pub fn root(&self) -> Option<&Node> {
        self.nodes.first()
    }

    /// Level of the first-round matches.
    pub fn depth(&self) -> u32 {
        self.nodes.last().map(|n| n.level).unwrap_or(0)
    }

    pub fn leaf_level(&self) -> u32 {
        self.depth()
    }

    /// Heap positions of the first-round matches, in seed order.
    pub fn leaf_positions(&self) -> Vec<usize> {
        self.positions_on_level(self.leaf_level())
    }

    pub fn node(&self, index: usize) -> Option<&Node> {
        self.nodes.get(index)
    }

    pub fn node_mut(&mut self, index: usize) -> Option<&mut Node> {
        self.nodes.get_mut(index)
    }

    /// Depth-first (pre-order) search from the root.
    fn search(&self, index: usize, predicate: &mut impl FnMut(usize, &Node) -> bool) -> Option<usize> {
        let node = self.nodes.get(index)?;
        if predicate(index, node) {
            return Some(index);
        }
        self.search(left_child(index), predicate)
            .or_else(|| self.search(right_child(index), predicate))
    }

    fn collect(&self, index: usize, predicate: &impl Fn(&Node) -> bool, out: &mut Vec<usize>) {
        let Some(node) = self.nodes.get(index) else {
            return;
        };
        if predicate(node) {
            out.push(index);
        }
        self.collect(left_child(index), predicate, out);
        self.collect(right_child(index), predicate, out);
    }

    pub fn position_of(&self, match_id: MatchId) -> Option<usize> {
        self.search(0, &mut |_, n| n.match_id == match_id)
    }

    pub fn contains_match(&self, match_id: MatchId) -> bool {
        self.position_of(match_id).is_some()
    }

    pub fn find_match_by_id(&self, match_id: MatchId) -> Option<&Node> {
        self.position_of(match_id).and_then(|i| self.nodes.get(i))
    }

    pub fn find_match_by_id_mut(&mut self, match_id: MatchId) -> Option<&mut Node> {
        let index = self.position_of(match_id)?;
        self.nodes.get_mut(index)
    }

    /// Match between the two players, in either order.
    pub fn find_match_by_players(&self, a: PlayerId, b: PlayerId) -> Option<&Node> {
        self.search(0, &mut |_, n| n.involves(a, b))
            .and_then(|i| self.nodes.get(i))
    }

    /// Heap positions of every node on `level`, left to right.
    pub fn positions_on_level(&self, level: u32) -> Vec<usize> {
        let mut out = Vec::new();
        self.collect(0, &|n| n.level == level, &mut out);
        out
    }

    pub fn find_matches_on_level(&self, level: u32) -> Vec<&Node> {
        self.positions_on_level(level)
            .into_iter()
            .filter_map(|i| self.nodes.get(i))
            .collect()
    }

    /// Position of the node holding `match_id` in one of its child slots.
    pub fn parent_position_of(&self, match_id: MatchId) -> Option<usize> {
        self.search(0, &mut |index, _| {
            [left_child(index), right_child(index)]
                .iter()
                .any(|&child| self.nodes.get(child).map(|n| n.match_id) == Some(match_id))
        })
    }

    pub fn parent_of(&self, match_id: MatchId) -> Option<&Node> {
        self.parent_position_of(match_id).and_then(|i| self.nodes.get(i))
    }

    pub fn sibling_position_of(&self, match_id: MatchId) -> Option<usize> {
        let parent = self.parent_position_of(match_id)?;
        let (left, right) = (left_child(parent), right_child(parent));
        if self.nodes.get(left)?.match_id == match_id {
            Some(right)
        } else {
            Some(left)
        }
    }

    pub fn sibling_of(&self, match_id: MatchId) -> Option<&Node> {
        self.sibling_position_of(match_id).and_then(|i| self.nodes.get(i))
    }

    pub fn is_level_finished(&self, level: u32) -> bool {
        let on_level = self.find_matches_on_level(level);
        !on_level.is_empty() && on_level.iter().all(|n| n.is_finished)
    }

    /// Every match of the pyramid has been played.
    pub fn is_complete(&self) -> bool {
        self.nodes.iter().all(|n| n.is_finished)
    }
}

pub(crate) fn left_child(index: usize) -> usize {
    index * 2 + 1
}

pub(crate) fn right_child(index: usize) -> usize {
    index * 2 + 2
}

fn level_of_index(index: usize) -> u32 {
    (index + 1).ilog2()
}
