use box_engine::core::physics;
use box_engine::{
    EngineContext, EngineError, Entity, EntityId, Game, GameConfig, InputQueue, Role,
};

use crate::controller::{InputController, Motion};
use crate::outcome::{reached_finish, touches, GameState};
use crate::settings::RunnerSettings;
use crate::spawner::{lateral_offset, Spawner};

#[derive(Debug, Clone, Copy)]
struct Actors {
    player: EntityId,
    ground: EntityId,
}

/// Dodge the red cubes rolling down the track, or reach its far end.
pub struct CubeRunner {
    settings: RunnerSettings,
    controller: InputController,
    spawner: Spawner,
    state: GameState,
    actors: Option<Actors>,
}

impl CubeRunner {
    pub fn new() -> Self {
        Self::with_settings(RunnerSettings::default())
    }

    pub fn with_settings(settings: RunnerSettings) -> Self {
        let controller = controller_for(&settings);
        let spawner = Spawner::new(settings.spawn.interval, settings.spawn.offset_target);
        Self {
            settings,
            controller,
            spawner,
            state: GameState::Running,
            actors: None,
        }
    }

    pub fn state(&self) -> GameState {
        self.state
    }

    pub fn settings(&self) -> &RunnerSettings {
        &self.settings
    }

    pub fn player_id(&self) -> Option<EntityId> {
        self.actors.map(|a| a.player)
    }

    pub fn ground_id(&self) -> Option<EntityId> {
        self.actors.map(|a| a.ground)
    }

    /// One frame, in order: input, player, spawner, enemies, finish line,
    /// movement for the next frame, despawn.
    fn frame(&mut self, ctx: &mut EngineContext, input: &InputQueue) -> Result<(), EngineError> {
        let Some(actors) = self.actors else {
            return Ok(());
        };

        let player = ctx.entity_mut(actors.player)?;
        for event in input.iter() {
            self.controller.handle(event, player);
        }

        let ground = *ctx.entity(actors.ground)?;
        ctx.step(actors.player, &ground)?;

        let template = self.settings.spawned_enemy_desc();
        self.spawner.tick(ctx, &template, ground.width())?;

        let player = *ctx.entity(actors.player)?;
        let config = ctx.physics;
        let mut hit = None;
        for enemy in ctx.scene.with_role_mut(Role::Enemy) {
            physics::step(enemy, &ground, &config);
            if hit.is_none() && touches(&player, enemy) {
                hit = Some(enemy.id);
            }
        }
        if let Some(enemy) = hit {
            log::info!("enemy {} reached the player", enemy);
            self.finish(ctx, GameState::Lost, &player);
        }

        if reached_finish(&player, ground.depth(), self.settings.finish_margin) {
            self.finish(ctx, GameState::Won, &player);
        }

        self.controller.resolve(ctx.entity_mut(actors.player)?);

        if let Some(margin) = self.settings.despawn_margin {
            let limit = player.pos.z + margin;
            let removed = ctx.scene.retain(|e| e.role != Role::Enemy || e.pos.z <= limit);
            if removed > 0 {
                log::debug!("despawned {} enemies behind the player", removed);
            }
        }

        Ok(())
    }

    /// Enter a terminal state. The first terminal state sticks.
    fn finish(&mut self, ctx: &mut EngineContext, state: GameState, player: &Entity) {
        if self.state.is_terminal() {
            return;
        }
        self.state = state;
        match state {
            GameState::Lost => log::info!("game over after {} frames", self.spawner.frame()),
            GameState::Won => log::info!("you win! finish line crossed at z={:.2}", player.pos.z),
            GameState::Running => {}
        }
        if let Some(event) = state.event(player) {
            ctx.emit_event(event);
        }
    }
}

impl Default for CubeRunner {
    fn default() -> Self {
        Self::new()
    }
}

fn controller_for(settings: &RunnerSettings) -> InputController {
    let controls = &settings.controls;
    InputController::new(
        controls.bindings.clone(),
        Motion {
            move_speed: controls.move_speed,
            jump_impulse: controls.jump_impulse,
            jump_ceiling: controls.jump_ceiling,
        },
    )
}

impl Game for CubeRunner {
    fn config(&self) -> GameConfig {
        GameConfig {
            physics: self.settings.physics,
            ..GameConfig::default()
        }
    }

    fn init(&mut self, ctx: &mut EngineContext) -> Result<(), EngineError> {
        self.state = GameState::Running;
        self.controller = controller_for(&self.settings);
        self.spawner = Spawner::new(self.settings.spawn.interval, self.settings.spawn.offset_target);
        self.actors = None;

        let player = ctx.spawn(&self.settings.player_desc())?;
        let ground = ctx.spawn(&self.settings.ground_desc())?;
        let mut seed_enemy = self.settings.seed_enemy_desc();
        if self.settings.seed_enemy_offset {
            seed_enemy.position.x = lateral_offset(ctx, self.settings.track.width);
        }
        ctx.spawn(&seed_enemy)?;
        self.actors = Some(Actors { player, ground });

        log::info!(
            "track {}x{}, spawning every {} frames",
            self.settings.track.width,
            self.settings.track.depth,
            self.settings.spawn.interval
        );
        Ok(())
    }

    fn update(&mut self, ctx: &mut EngineContext, input: &InputQueue) {
        if self.state.is_terminal() {
            return;
        }
        if let Err(err) = self.frame(ctx, input) {
            log::error!("frame aborted: {}", err);
        }
    }

    fn is_running(&self) -> bool {
        !self.state.is_terminal()
    }

    fn load_settings(&mut self, json: &str) -> Result<(), EngineError> {
        self.settings = RunnerSettings::from_json(json)?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use box_engine::{keys, GameEvent, InputEvent};
    use glam::Vec3;
    use crate::outcome::events::{LOST, WON};

    fn start(settings: RunnerSettings, seed: u64) -> (CubeRunner, EngineContext) {
        let mut game = CubeRunner::with_settings(settings);
        let mut ctx = EngineContext::with_physics(seed, game.config().physics);
        game.init(&mut ctx).unwrap();
        (game, ctx)
    }

    /// Default settings with the seed enemy kept on the player's line.
    fn centred() -> RunnerSettings {
        RunnerSettings {
            seed_enemy_offset: false,
            ..RunnerSettings::default()
        }
    }

    /// Run `frames` frames with no input, collecting emitted events.
    fn run(game: &mut CubeRunner, ctx: &mut EngineContext, frames: usize) -> Vec<GameEvent> {
        let input = InputQueue::new();
        let mut events = Vec::new();
        for _ in 0..frames {
            game.update(ctx, &input);
            events.append(&mut ctx.events);
        }
        events
    }

    fn press(game: &mut CubeRunner, ctx: &mut EngineContext, key_code: u32) {
        let mut input = InputQueue::new();
        input.push(InputEvent::KeyDown { key_code });
        game.update(ctx, &input);
    }

    fn player(game: &CubeRunner, ctx: &EngineContext) -> Entity {
        *ctx.entity(game.player_id().unwrap()).unwrap()
    }

    #[test]
    fn init_builds_player_ground_and_one_enemy() {
        let (game, ctx) = start(RunnerSettings::default(), 1);
        assert_eq!(ctx.scene.len(), 3);
        assert_eq!(ctx.scene.count_role(Role::Enemy), 1);
        let ground = ctx.entity(game.ground_id().unwrap()).unwrap();
        assert_eq!(ground.top(), -1.75);
        assert!(game.is_running());
    }

    #[test]
    fn seed_enemy_starts_at_a_random_lane() {
        let mut lanes = Vec::new();
        for seed in 1..=50 {
            let (mut game, mut ctx) = start(RunnerSettings::default(), seed);
            run(&mut game, &mut ctx, 10);
            let first = ctx.scene.with_role(Role::Enemy).next().unwrap();
            assert_eq!(first.pos.x, first.pos.x.trunc());
            assert!(first.pos.x.abs() <= 7.0);
            if !lanes.contains(&first.pos.x) {
                lanes.push(first.pos.x);
            }
        }
        assert!(lanes.len() > 1, "seed enemy always at x={:?}", lanes);
    }

    #[test]
    fn seed_enemy_keeps_configured_x_when_offset_is_off() {
        let mut settings = centred();
        settings.seed_enemy.position.x = 3.0;
        let (mut game, mut ctx) = start(settings, 5);
        run(&mut game, &mut ctx, 10);
        let first = ctx.scene.with_role(Role::Enemy).next().unwrap();
        assert_eq!(first.pos.x, 3.0);
    }

    #[test]
    fn enemy_spawned_this_frame_is_stepped_this_frame() {
        let (mut game, mut ctx) = start(RunnerSettings::default(), 3);
        run(&mut game, &mut ctx, 19);
        assert_eq!(ctx.scene.count_role(Role::Enemy), 1);

        run(&mut game, &mut ctx, 1);
        let newest = ctx.scene.with_role(Role::Enemy).last().unwrap();
        assert_relative_eq!(newest.vel.z, 0.0203, epsilon = 1e-6);
        assert_relative_eq!(newest.pos.z, -20.0 + 0.0203, epsilon = 1e-5);
        assert_relative_eq!(newest.pos.y, -0.012, epsilon = 1e-6);
    }

    #[test]
    fn roster_follows_spawn_cadence() {
        let (mut game, mut ctx) = start(RunnerSettings::default(), 3);
        for f in 1..=200usize {
            run(&mut game, &mut ctx, 1);
            assert_eq!(ctx.scene.count_role(Role::Enemy), 1 + f / 20);
        }
        assert_eq!(game.state(), GameState::Running);
    }

    #[test]
    fn ground_never_moves() {
        let (mut game, mut ctx) = start(RunnerSettings::default(), 3);
        let before = *ctx.entity(game.ground_id().unwrap()).unwrap();
        run(&mut game, &mut ctx, 150);
        assert_eq!(*ctx.entity(game.ground_id().unwrap()).unwrap(), before);
    }

    #[test]
    fn player_settles_on_the_track() {
        let (mut game, mut ctx) = start(RunnerSettings::default(), 3);
        run(&mut game, &mut ctx, 120);
        let p = player(&game, &ctx);
        let ground = ctx.entity(game.ground_id().unwrap()).unwrap();
        assert!(p.bottom() >= ground.top() - 1e-5);
        assert!(p.bottom() - ground.top() < 0.01);
        assert!(p.vel.y >= 0.0);
    }

    #[test]
    fn drifting_enemy_ends_the_game_exactly_once() {
        let (mut game, mut ctx) = start(centred(), 42);
        let events = run(&mut game, &mut ctx, 400);

        assert_eq!(game.state(), GameState::Lost);
        assert!(!game.is_running());
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, LOST);

        let roster = ctx.scene.count_role(Role::Enemy);
        let later = run(&mut game, &mut ctx, 100);
        assert!(later.is_empty());
        assert_eq!(game.state(), GameState::Lost);
        assert_eq!(ctx.scene.count_role(Role::Enemy), roster);
    }

    #[test]
    fn jump_from_rest_then_no_air_jump() {
        let (mut game, mut ctx) = start(RunnerSettings::default(), 7);
        run(&mut game, &mut ctx, 120);
        let rest = player(&game, &ctx);

        press(&mut game, &mut ctx, keys::SPACE);
        let p = player(&game, &ctx);
        // Impulse, then one frame of gravity
        assert_relative_eq!(p.vel.y, 0.07 - 0.002, epsilon = 1e-6);
        assert!(p.pos.y > rest.pos.y);

        // Rise until the player starts coming down
        let mut guard = 0;
        while player(&game, &ctx).vel.y >= 0.0 {
            run(&mut game, &mut ctx, 1);
            guard += 1;
            assert!(guard < 100, "player never started descending");
        }
        let falling = player(&game, &ctx);
        press(&mut game, &mut ctx, keys::SPACE);
        let after = player(&game, &ctx);
        assert_relative_eq!(after.vel.y, falling.vel.y - 0.002, epsilon = 1e-6);
    }

    #[test]
    fn holding_forward_moves_down_the_track() {
        let (mut game, mut ctx) = start(RunnerSettings::default(), 7);
        press(&mut game, &mut ctx, keys::W);
        run(&mut game, &mut ctx, 10);
        let p = player(&game, &ctx);
        assert_eq!(p.vel.z, -0.04);
        assert_relative_eq!(p.pos.z, -0.4, epsilon = 1e-4);
    }

    #[test]
    fn reaching_the_far_end_wins() {
        let mut settings = centred();
        settings.track.depth = 20.0;
        settings.seed_enemy.position = Vec3::new(6.0, 0.0, -8.0);
        settings.seed_enemy.velocity = Vec3::ZERO;
        settings.spawn.interval = 1_000_000;
        let (mut game, mut ctx) = start(settings, 7);

        press(&mut game, &mut ctx, keys::W);
        let events = run(&mut game, &mut ctx, 400);

        assert_eq!(game.state(), GameState::Won);
        assert_eq!(events.len(), 1);
        assert_eq!(events[0].kind, WON);
        assert!(events[0].c <= -6.0);
    }

    #[test]
    fn despawn_policy_drops_passed_enemies() {
        let mut settings = RunnerSettings::default();
        settings.track.width = 3.0;
        settings.player.position = Vec3::new(5.0, 0.0, 0.0);
        settings.despawn_margin = Some(2.0);
        let (mut game, mut ctx) = start(settings, 9);

        run(&mut game, &mut ctx, 600);

        assert_eq!(game.state(), GameState::Running);
        let enemies: Vec<&Entity> = ctx.scene.with_role(Role::Enemy).collect();
        assert!(enemies.len() < 1 + 600 / 20);
        assert!(enemies.iter().all(|e| e.pos.z <= 2.0));
    }

    #[test]
    fn settings_apply_on_next_init() {
        let mut game = CubeRunner::new();
        game.load_settings(r#"{ "spawn": { "interval": 5 } }"#).unwrap();
        let mut ctx = EngineContext::new(1);
        game.init(&mut ctx).unwrap();
        run(&mut game, &mut ctx, 10);
        assert_eq!(ctx.scene.count_role(Role::Enemy), 3);
    }

    #[test]
    fn rejected_settings_keep_the_old_ones() {
        let mut game = CubeRunner::new();
        assert!(game.load_settings(r#"{ "track": { "width": -1.0 } }"#).is_err());
        assert_eq!(game.settings(), &RunnerSettings::default());
    }

    #[test]
    fn reinit_starts_a_fresh_session() {
        let (mut game, mut ctx) = start(centred(), 42);
        run(&mut game, &mut ctx, 400);
        assert_eq!(game.state(), GameState::Lost);

        let mut fresh = EngineContext::new(43);
        game.init(&mut fresh).unwrap();
        assert_eq!(game.state(), GameState::Running);
        assert_eq!(fresh.scene.count_role(Role::Enemy), 1);
    }

    #[test]
    fn update_before_init_is_harmless() {
        let mut game = CubeRunner::new();
        let mut ctx = EngineContext::new(1);
        run(&mut game, &mut ctx, 5);
        assert!(ctx.scene.is_empty());
    }
}
