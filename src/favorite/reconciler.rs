use std::collections::HashSet;

use crate::catalog::{Game, GameId};

/// Game ids the current user has marked as favorite
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct FavoriteSet {
    ids: HashSet<GameId>,
}

impl FavoriteSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_games(games: &[Game]) -> Self {
        games.iter().map(|g| g.id).collect()
    }

    pub fn contains(&self, game_id: GameId) -> bool {
        self.ids.contains(&game_id)
    }

    /// Sets membership, returning the previous value
    pub fn set(&mut self, game_id: GameId, favorite: bool) -> bool {
        if favorite {
            !self.ids.insert(game_id)
        } else {
            self.ids.remove(&game_id)
        }
    }

    pub fn len(&self) -> usize {
        self.ids.len()
    }

    pub fn is_empty(&self) -> bool {
        self.ids.is_empty()
    }
}

impl FromIterator<GameId> for FavoriteSet {
    fn from_iter<I: IntoIterator<Item = GameId>>(iter: I) -> Self {
        Self {
            ids: iter.into_iter().collect(),
        }
    }
}

/// Annotates each game's `is_favorite` from the favorite set.
///
/// Flags already on `games` are overwritten, never merged.
pub fn project(games: &[Game], favorites: &FavoriteSet) -> Vec<Game> {
    games
        .iter()
        .map(|game| Game {
            is_favorite: favorites.contains(game.id),
            ..game.clone()
        })
        .collect()
}
