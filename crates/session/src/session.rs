use glam::Vec2;
use tileworld_author::{EditCommand, EditError, Editor, Inventory};
use tileworld_common::BlockId;
use tileworld_input::{Action, InputState};
use tileworld_kernel::{ColumnWindow, World, WorldError, settle_around};
use tileworld_physics::{Actor, MotionError, Resolver};

use crate::config::SessionConfig;

/// Errors from driving a session.
#[derive(Debug, thiserror::Error)]
pub enum SessionError {
    #[error(transparent)]
    World(#[from] WorldError),
    #[error(transparent)]
    Motion(#[from] MotionError),
    #[error(transparent)]
    Edit(#[from] EditError),
    #[error("cell ({column}, {row}) is occupied by the actor")]
    Obstructed { column: i32, row: i32 },
    #[error("invalid session config: {0}")]
    InvalidConfig(String),
}

/// A running world with its actor and editor.
#[derive(Debug)]
pub struct Session {
    config: SessionConfig,
    world: World,
    actor: Actor,
    resolver: Resolver,
    editor: Editor,
    tick: u64,
    accumulator: f32,
}

impl Session {
    /// Build the world and spawn the actor on the spawn column's surface.
    pub fn new(config: SessionConfig) -> Result<Self, SessionError> {
        config.validate()?;
        let mut world = World::new(config.world.clone())?;
        let resolver = Resolver::new(config.physics.clone())?;
        let actor = Actor::spawn(&mut world, config.spawn_column);
        let editor = Editor::new(Inventory::new(config.hotbar.clone(), config.creative));
        tracing::info!(
            seed = world.seed(),
            column = config.spawn_column,
            "session started"
        );
        Ok(Self {
            config,
            world,
            actor,
            resolver,
            editor,
            tick: 0,
            accumulator: 0.0,
        })
    }

    /// One fixed step: move the actor, then settle loose blocks around it.
    ///
    /// Loose blocks never fall into the actor; they come to rest on top of it.
    pub fn tick(&mut self, input: InputState) -> Result<(), SessionError> {
        self.actor = self
            .resolver
            .step(&self.actor, &mut self.world, self.config.dt(), input)?;
        let actor = self.actor;
        let radius = self.config.settle_radius;
        let occupied = |c, r| actor.occupies(c, r);
        let moved = settle_around(&mut self.world, actor.column(), radius, occupied);
        self.tick += 1;
        if moved > 0 {
            tracing::trace!(tick = self.tick, moved, "settled");
        }
        Ok(())
    }

    /// Feed `elapsed` wall-clock seconds into the fixed-step accumulator and
    /// run the ticks that fit. Returns the number of ticks run.
    ///
    /// Backlog beyond `max_ticks_per_advance` is dropped.
    pub fn advance(&mut self, elapsed: f32, input: InputState) -> Result<u32, SessionError> {
        if !elapsed.is_finite() || elapsed < 0.0 {
            return Err(MotionError::InvalidTimeStep(elapsed).into());
        }
        let dt = self.config.dt();
        self.accumulator += elapsed;

        let mut ran = 0;
        while self.accumulator >= dt && ran < self.config.max_ticks_per_advance {
            self.tick(input)?;
            self.accumulator -= dt;
            ran += 1;
        }
        if self.accumulator >= dt {
            tracing::debug!(backlog = self.accumulator, "dropping simulation backlog");
            self.accumulator %= dt;
        }
        Ok(ran)
    }

    /// Apply a discrete edit or selection.
    pub fn apply(&mut self, action: Action) -> Result<(), SessionError> {
        match action {
            Action::Break { column, row } => {
                self.editor.break_block(&mut self.world, column, row)?;
            }
            Action::Place { column, row } => {
                self.ensure_clear(column, row)?;
                self.editor.place_block(&mut self.world, column, row)?;
            }
            Action::SelectSlot(slot) => {
                self.editor.select(slot)?;
            }
            Action::Undo => {
                if let Some(cmd) = self.editor.next_undo() {
                    self.ensure_unobstructed(&cmd)?;
                }
                self.editor.undo(&mut self.world)?;
            }
            Action::Redo => {
                if let Some(cmd) = self.editor.next_redo() {
                    self.ensure_unobstructed(&cmd)?;
                }
                self.editor.redo(&mut self.world)?;
            }
            Action::Noop => {}
        }
        Ok(())
    }

    /// Put the actor back on the surface of `column`, at rest.
    pub fn respawn(&mut self, column: i32) {
        self.actor = Actor::spawn(&mut self.world, column);
    }

    /// Materialize and expose the columns around the actor.
    pub fn visible_columns(&mut self) -> ColumnWindow<'_> {
        self.world
            .visible_columns(self.actor.column(), self.config.view_radius)
    }

    pub fn summary(&self) -> SessionSummary {
        SessionSummary {
            tick: self.tick,
            seed: self.world.seed(),
            materialized: self.world.column_count(),
            generated: self.world.generated_count(),
            actor: self.actor.position,
            grounded: self.actor.grounded,
            selected: self.editor.inventory().selected_block(),
        }
    }

    pub fn config(&self) -> &SessionConfig {
        &self.config
    }

    pub fn world(&self) -> &World {
        &self.world
    }

    pub fn world_mut(&mut self) -> &mut World {
        &mut self.world
    }

    pub fn actor(&self) -> &Actor {
        &self.actor
    }

    pub fn editor(&self) -> &Editor {
        &self.editor
    }

    pub fn tick_count(&self) -> u64 {
        self.tick
    }

    fn ensure_clear(&self, column: i32, row: i32) -> Result<(), SessionError> {
        if self.actor.occupies(column, row) {
            return Err(SessionError::Obstructed { column, row });
        }
        Ok(())
    }

    fn ensure_unobstructed(&self, cmd: &EditCommand) -> Result<(), SessionError> {
        if cmd.fills() {
            let (column, row) = cmd.cell();
            self.ensure_clear(column, row)?;
        }
        Ok(())
    }
}

/// Snapshot of session state for status lines and logs.
#[derive(Debug, Clone, PartialEq)]
pub struct SessionSummary {
    pub tick: u64,
    pub seed: u64,
    pub materialized: usize,
    pub generated: usize,
    pub actor: Vec2,
    pub grounded: bool,
    pub selected: BlockId,
}

impl std::fmt::Display for SessionSummary {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        let SessionSummary {
            tick,
            seed,
            materialized,
            generated,
            actor,
            grounded,
            selected,
        } = self;
        write!(f, "tick={tick} seed={seed} columns={materialized}")?;
        write!(f, " generated={generated}")?;
        write!(f, " actor=({:.2}, {:.2})", actor.x, actor.y)?;
        write!(f, " grounded={grounded} selected={selected}")
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tileworld_kernel::StructureConfig;

    fn quiet_config(seed: u64) -> SessionConfig {
        let mut config = SessionConfig::with_seed(seed);
        config.world.structures = StructureConfig::none();
        config.world.terrain.sand_chance = 0.0;
        config
    }

    fn session(seed: u64) -> Session {
        Session::new(quiet_config(seed)).unwrap()
    }

    #[test]
    fn actor_spawns_on_the_surface_and_stays() {
        let mut s = session(42);
        let h = s.world().surface_height(0) as f32;
        assert_eq!(s.actor().position, Vec2::new(0.0, h));

        for _ in 0..60 {
            s.tick(InputState::idle()).unwrap();
        }
        assert_eq!(s.actor().position, Vec2::new(0.0, h));
        assert!(s.actor().grounded);
        assert_eq!(s.tick_count(), 60);
    }

    #[test]
    fn advance_runs_whole_ticks() {
        let mut s = session(1);
        let dt = s.config().dt();
        assert_eq!(s.advance(dt * 2.5, InputState::idle()).unwrap(), 2);
        assert_eq!(s.advance(dt * 0.6, InputState::idle()).unwrap(), 1);
        assert_eq!(s.advance(0.0, InputState::idle()).unwrap(), 0);
        assert_eq!(s.tick_count(), 3);
    }

    #[test]
    fn advance_is_capped_and_drops_backlog() {
        let mut s = session(1);
        let dt = s.config().dt();
        assert_eq!(s.advance(dt * 100.5, InputState::idle()).unwrap(), 5);
        assert_eq!(s.advance(0.0, InputState::idle()).unwrap(), 0);
        assert_eq!(s.tick_count(), 5);
    }

    #[test]
    fn advance_rejects_negative_time() {
        let mut s = session(1);
        assert!(matches!(
            s.advance(-1.0, InputState::idle()),
            Err(SessionError::Motion(MotionError::InvalidTimeStep(_)))
        ));
    }

    #[test]
    fn sand_settles_during_ticks() {
        let mut s = session(5);
        let column = 3;
        let h = s.world_mut().get_column(column).height();
        s.world_mut().set_block(column, h + 4, BlockId::SAND);

        for _ in 0..4 {
            s.tick(InputState::idle()).unwrap();
        }
        assert_eq!(s.world_mut().get_block(column, h), BlockId::SAND);
        assert!(s.world_mut().get_block(column, h + 4).is_air());
    }

    #[test]
    fn sand_lands_on_the_actor_instead_of_burying_it() {
        let mut s = session(42);
        let column = s.actor().column();
        let row = s.actor().row();
        s.world_mut().set_block(column, row + 3, BlockId::SAND);

        for _ in 0..10 {
            s.tick(InputState::idle()).unwrap();
        }
        assert_eq!(s.world_mut().get_block(column, row + 1), BlockId::SAND);
        assert!(s.world_mut().get_block(column, row).is_air());
        assert_eq!(s.actor().row(), row);
        assert!(s.actor().grounded);
    }

    #[test]
    fn cannot_place_into_the_actor() {
        let mut s = session(42);
        let column = s.actor().column();
        let row = s.actor().row();
        let err = s.apply(Action::Place { column, row }).unwrap_err();
        assert!(matches!(err, SessionError::Obstructed { .. }));
        assert!(s.world_mut().get_block(column, row).is_air());
    }

    #[test]
    fn redo_into_the_actor_is_refused() {
        let mut s = session(42);
        let column = 4;
        let h = s.world_mut().surface_height(column);

        s.apply(Action::Place { column, row: h }).unwrap();
        s.apply(Action::Undo).unwrap();
        s.respawn(column);
        assert!(s.actor().occupies(column, h));

        let err = s.apply(Action::Redo).unwrap_err();
        assert!(matches!(err, SessionError::Obstructed { .. }));
        assert!(s.editor().can_redo());
    }

    #[test]
    fn break_place_undo_through_actions() {
        let mut s = session(42);
        let column = 6;
        let top = s.world_mut().surface_height(column) - 1;

        s.apply(Action::SelectSlot(1)).unwrap();
        s.apply(Action::Break { column, row: top }).unwrap();
        assert!(s.world_mut().get_block(column, top).is_air());

        s.apply(Action::Place { column, row: top }).unwrap();
        assert_eq!(s.world_mut().get_block(column, top), BlockId::STONE);

        s.apply(Action::Undo).unwrap();
        s.apply(Action::Undo).unwrap();
        assert_eq!(s.world_mut().get_block(column, top), BlockId::GRASS);
        s.apply(Action::Noop).unwrap();
    }

    #[test]
    fn edit_errors_propagate() {
        let mut s = session(42);
        assert!(matches!(
            s.apply(Action::SelectSlot(9)),
            Err(SessionError::Edit(EditError::InvalidSlot { .. }))
        ));
        let row = 500;
        let high = Action::Break { column: 0, row };
        assert!(matches!(
            s.apply(high),
            Err(SessionError::Edit(EditError::NothingToBreak { .. }))
        ));
    }

    #[test]
    fn visible_window_follows_the_actor() {
        let mut s = session(3);
        let radius = s.config().view_radius as i32;
        let window = s.visible_columns();
        assert_eq!(window.first(), -radius);
        assert_eq!(window.last(), radius);
        assert_eq!(window.iter().count(), window.len());
    }

    #[test]
    fn summary_reports_state() {
        let mut s = session(42);
        s.tick(InputState::idle()).unwrap();
        let summary = s.summary();
        assert_eq!(summary.tick, 1);
        assert_eq!(summary.seed, 42);
        assert!(summary.materialized >= 1);
        assert_eq!(summary.selected, BlockId::GRASS);
        let line = summary.to_string();
        assert!(line.contains("seed=42"));
        assert!(line.contains("selected=grass"));
    }

    #[test]
    fn invalid_config_is_rejected() {
        let mut config = quiet_config(1);
        config.tick_rate = -5.0;
        assert!(Session::new(config).is_err());
    }
}
