use box_engine::bridge::protocol::HEADER_FLOATS;
use box_engine::{
    build_render_buffer, EngineContext, FixedTimestep, Game, GameConfig, InputEvent, InputQueue,
    ProtocolLayout, RenderBuffer,
};

/// Generic game runner that wires up the engine loop.
///
/// Each concrete game creates a `thread_local!` GameRunner and exports free
/// functions via `#[wasm_bindgen]` (see `export_game!`), because wasm-bindgen
/// cannot export generic structs directly.
pub struct GameRunner<G: Game> {
    game: G,
    ctx: EngineContext,
    input: InputQueue,
    render_buffer: RenderBuffer,
    timestep: FixedTimestep,
    config: GameConfig,
    layout: ProtocolLayout,
    header: [f32; HEADER_FLOATS],
    seed: u64,
    /// Game updates actually run this session.
    frame: u64,
    initialized: bool,
    /// Set once the render buffer has overflowed, so the warning is logged once.
    overflow_reported: bool,
}

impl<G: Game> GameRunner<G> {
    pub fn new(game: G, seed: u64) -> Self {
        let config = game.config();
        let timestep = FixedTimestep::new(config.fixed_dt);
        let layout = ProtocolLayout::from_config(&config);
        let render_buffer = RenderBuffer::with_capacity(config.max_instances);

        Self {
            game,
            ctx: EngineContext::with_physics(seed, config.physics),
            input: InputQueue::new(),
            render_buffer,
            timestep,
            layout,
            config,
            header: [0.0; HEADER_FLOATS],
            seed,
            frame: 0,
            initialized: false,
            overflow_reported: false,
        }
    }

    /// Initialize the game into a fresh context. Safe to call again to restart.
    pub fn init(&mut self) {
        self.config = self.game.config();
        self.layout = ProtocolLayout::from_config(&self.config);
        self.timestep = FixedTimestep::new(self.config.fixed_dt);
        self.ctx = EngineContext::with_physics(self.seed, self.config.physics);
        self.input.drain();
        self.frame = 0;
        self.overflow_reported = false;

        match self.game.init(&mut self.ctx) {
            Ok(()) => self.initialized = true,
            Err(err) => {
                log::error!("game init failed: {}", err);
                self.initialized = false;
            }
        }
        self.publish();
    }

    /// Start a new session with the next seed so the spawn sequence differs.
    pub fn restart(&mut self) {
        self.seed = self.seed.wrapping_add(1);
        self.init();
    }

    /// Apply game settings. A running session is restarted so they take effect.
    pub fn load_settings(&mut self, json: &str) {
        match self.game.load_settings(json) {
            Ok(()) => {
                log::info!("settings loaded");
                if self.initialized {
                    self.init();
                }
            }
            Err(err) => log::warn!("settings rejected, keeping previous: {}", err),
        }
    }

    /// Push an input event into the queue.
    pub fn push_input(&mut self, event: InputEvent) {
        self.input.push(event);
    }

    /// Run one browser tick: step whole fixed frames, then publish the render buffer.
    pub fn tick(&mut self, dt: f32) {
        if !self.initialized {
            return;
        }

        self.ctx.clear_frame_data();

        if self.game.is_running() {
            let steps = self.timestep.accumulate(dt);
            for _ in 0..steps {
                if !self.game.is_running() {
                    break;
                }
                self.game.update(&mut self.ctx, &self.input);
                self.frame += 1;
                // Key events belong to the first frame after they arrived
                self.input.drain();
            }
        } else {
            self.input.drain();
        }

        self.publish();
    }

    fn publish(&mut self) {
        let dropped = build_render_buffer(
            self.ctx.scene.iter(),
            &mut self.render_buffer,
            self.config.max_instances,
        );
        if dropped > 0 && !self.overflow_reported {
            log::warn!(
                "render buffer full ({} boxes), {} not drawn",
                self.config.max_instances,
                dropped
            );
            self.overflow_reported = true;
        }

        self.header = self.layout.header(
            self.frame,
            self.render_buffer.instances.len(),
            self.ctx.events.len(),
            self.is_running(),
        );
    }

    pub fn is_running(&self) -> bool {
        self.initialized && self.game.is_running()
    }

    pub fn game(&self) -> &G {
        &self.game
    }

    pub fn context(&self) -> &EngineContext {
        &self.ctx
    }

    pub fn render_buffer(&self) -> &RenderBuffer {
        &self.render_buffer
    }

    // ---- Pointer accessors for reads from JS memory views ----

    pub fn header_ptr(&self) -> *const f32 {
        self.header.as_ptr()
    }

    pub fn instances_ptr(&self) -> *const f32 {
        self.render_buffer.instances_ptr()
    }

    pub fn instance_count(&self) -> u32 {
        self.render_buffer.instance_count()
    }

    pub fn game_events_ptr(&self) -> *const f32 {
        self.ctx.events.as_ptr() as *const f32
    }

    pub fn game_events_len(&self) -> u32 {
        self.ctx.events.len().min(self.layout.max_events) as u32
    }

    pub fn frame(&self) -> u32 {
        self.frame as u32
    }

    // ---- Capacity accessors ----

    pub fn max_instances(&self) -> u32 {
        self.layout.max_instances as u32
    }

    pub fn max_events(&self) -> u32 {
        self.layout.max_events as u32
    }

    pub fn buffer_total_floats(&self) -> u32 {
        self.layout.buffer_total_floats as u32
    }
}
