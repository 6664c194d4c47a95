//! Group stage ranking: victories first, then the barrage tie-breaks.

use tracing::debug;

use crate::domain::{GroupMatch, PlayerId};
use crate::engine::errors::EngineError;
use crate::engine::RandomSource;

/// Tie-break pass applied to a run of players.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Tier {
    /// Matches won inside the group.
    Victories,
    /// Set difference over the matches played among the tied players.
    Barrage,
    /// Set difference over every match of the group.
    CompleteBarrage,
}

impl Tier {
    fn next(self) -> Option<Tier> {
        match self {
            Tier::Victories => Some(Tier::Barrage),
            Tier::Barrage => Some(Tier::CompleteBarrage),
            Tier::CompleteBarrage => None,
        }
    }
}

/// Orders the players of one finished group.
///
/// `players` is the group in seed order; it breaks no ties but keeps the
/// sort stable. Returns `(player, group_rank)` from rank 1 downwards. A
/// perfect tie that survives every pass is settled by `rng`.
pub fn resolve_group_ranks<R: RandomSource>(
    players: &[PlayerId],
    matches: &[GroupMatch],
    rng: &mut R,
) -> Result<Vec<(PlayerId, u32)>, EngineError> {
    let remaining = matches.iter().filter(|m| !m.is_finished()).count();
    if remaining > 0 {
        return Err(EngineError::UnfinishedGroupMatches { remaining });
    }

    let mut resolver = Resolver {
        matches,
        ranks: Vec::with_capacity(players.len()),
        next_rank: 1,
    };
    resolver.resolve(Tier::Victories, players, rng)?;
    Ok(resolver.ranks)
}

struct Resolver<'a> {
    matches: &'a [GroupMatch],
    ranks: Vec<(PlayerId, u32)>,
    next_rank: u32,
}

impl<'a> Resolver<'a> {
    fn assign(&mut self, player_id: PlayerId) {
        self.ranks.push((player_id, self.next_rank));
        self.next_rank += 1;
    }

    fn factor(&self, tier: Tier, player_id: PlayerId, run: &[PlayerId]) -> i32 {
        match tier {
            Tier::Victories => self
                .matches
                .iter()
                .filter(|m| m.winner_id() == Some(player_id))
                .count() as i32,
            Tier::Barrage => self
                .matches
                .iter()
                .filter(|m| m.is_between_all_of(run))
                .map(|m| m.set_difference_for(player_id))
                .sum(),
            Tier::CompleteBarrage => self
                .matches
                .iter()
                .map(|m| m.set_difference_for(player_id))
                .sum(),
        }
    }

    fn resolve<R: RandomSource>(
        &mut self,
        tier: Tier,
        players: &[PlayerId],
        rng: &mut R,
    ) -> Result<(), EngineError> {
        let mut scored: Vec<(PlayerId, i32)> = players
            .iter()
            .map(|&p| (p, self.factor(tier, p, players)))
            .collect();
        // Stable: equal factors keep the incoming order.
        scored.sort_by(|a, b| b.1.cmp(&a.1));

        let mut i = 0;
        while i < scored.len() {
            let (current, factor) = scored[i];

            let Some(&(next, next_factor)) = scored.get(i + 1) else {
                self.assign(current);
                break;
            };

            if factor > next_factor {
                self.assign(current);
                i += 1;
                continue;
            }

            let isolated = scored.get(i + 2).map_or(true, |&(_, after)| next_factor > after);
            if isolated {
                self.resolve_direct(current, next)?;
                i += 2;
                continue;
            }

            let end = scored[i..]
                .iter()
                .position(|&(_, f)| f != factor)
                .map_or(scored.len(), |offset| i + offset);
            let run: Vec<PlayerId> = scored[i..end].iter().map(|&(p, _)| p).collect();

            match tier.next() {
                Some(next_tier) => {
                    debug!(?tier, players = ?run, "tie moves to the next pass");
                    self.resolve(next_tier, &run, rng)?;
                }
                None => {
                    debug!(players = ?run, "perfect tie, drawing lots");
                    let mut drawn = run;
                    rng.shuffle(&mut drawn);
                    for player_id in drawn {
                        self.assign(player_id);
                    }
                }
            }
            i = end;
        }

        Ok(())
    }

    /// Two tied players: the winner of their match ranks first.
    fn resolve_direct(&mut self, a: PlayerId, b: PlayerId) -> Result<(), EngineError> {
        let direct = self
            .matches
            .iter()
            .find(|m| m.is_direct_match(a, b))
            .ok_or(EngineError::DirectMatchNotFound { a, b })?;

        if direct.winner_id() == Some(b) {
            self.assign(b);
            self.assign(a);
        } else {
            self.assign(a);
            self.assign(b);
        }
        Ok(())
    }
}
