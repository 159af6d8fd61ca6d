use box_engine::{Entity, GameEvent};

/// Game event kinds sent to the page.
pub mod events {
    pub const LOST: f32 = 1.0;
    pub const WON: f32 = 2.0;
}

/// Where a session stands. `Lost` and `Won` are terminal.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum GameState {
    #[default]
    Running,
    /// An enemy reached the player.
    Lost,
    /// The player crossed the finish line.
    Won,
}

impl GameState {
    pub fn is_terminal(self) -> bool {
        self != GameState::Running
    }

    /// Event announcing this state to the page, carrying the player's position.
    pub fn event(self, player: &Entity) -> Option<GameEvent> {
        let kind = match self {
            GameState::Running => return None,
            GameState::Lost => events::LOST,
            GameState::Won => events::WON,
        };
        Some(GameEvent::new(kind, player.pos.x, player.pos.y, player.pos.z))
    }
}

/// Player/enemy contact test.
///
/// Each axis allows a full box width (or height) of separation, not the
/// sum of half extents.
pub fn touches(player: &Entity, enemy: &Entity) -> bool {
    let (p, e) = (player.pos, enemy.pos);
    let z_hit = e.z <= p.z + player.width() && e.z >= p.z - player.width();
    let y_hit = p.y >= e.y - enemy.height() && p.y <= e.y + enemy.height();
    let x_hit = p.x >= e.x - enemy.width() && p.x <= e.x + enemy.width();
    z_hit && y_hit && x_hit
}

/// Whether the player has run far enough down the track (toward -z).
pub fn reached_finish(player: &Entity, track_depth: f32, margin: f32) -> bool {
    player.pos.z <= -track_depth / 2.0 + margin
}
