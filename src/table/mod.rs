//! The card table sequencer.
//!
//! `CardTable` owns two piles and drives cards from the source to the
//! destination one at a time, each move running as a two-phase animation
//! through an [`AnimationEngine`]. While playing, the completion of one
//! move immediately starts the next; the table pauses, cycles speed and
//! resets on command, and reports everything observable through
//! [`TableListeners`].
//!
//! ## State machine
//!
//! ```text
//! Idle --reset--> Clearing --tick--> Ready
//!                                      |
//!                     toggle_play / completions cycle moves
//!                                      |
//!                   source empty while playing -> finished
//!                   (playing=false, speed=1, AllCardsMoved)
//! ```
//!
//! ## Cooperative model
//!
//! The table advances only inside `tick`; commands between ticks mutate
//! state synchronously but never block. At most one move animation is in
//! flight per table - the single-flight guard in `start_move` is the
//! only concurrency control the design needs.

pub mod events;

use log::{debug, error};

use crate::anim::{AnimationEngine, AnimationId, TransitionSpec};
use crate::core::card::CardToken;
use crate::core::config::{ConfigError, TableConfig};
use crate::pile::Pile;

pub use events::TableListeners;

/// Lifecycle phase of the table.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum TableState {
    /// Constructed, piles never populated.
    Idle,
    /// Reset issued; piles are empty until the next tick repopulates
    /// the source.
    Clearing,
    /// Populated and accepting commands.
    Ready,
}

/// The single in-flight move.
#[derive(Clone, Copy, Debug)]
struct ActiveMove {
    id: AnimationId,
    card: CardToken,
}

/// Sequencer that animates a deck from a source pile to a destination
/// pile, one card at a time.
///
/// ## Usage
///
/// ```
/// use card_table::anim::TickEngine;
/// use card_table::core::{CardId, CardToken, SpriteHandle, TableConfig};
/// use card_table::table::CardTable;
///
/// let cards: Vec<_> = (0..3)
///     .map(|i| CardToken::new(CardId::new(i), SpriteHandle::new(i)))
///     .collect();
///
/// let mut table = CardTable::new(TableConfig::new(cards), TickEngine::new()).unwrap();
/// table.reset();
/// table.tick(0.0); // populate
/// table.toggle_play();
///
/// while table.is_playing() {
///     table.tick(1.0 / 60.0);
/// }
/// assert_eq!(table.dest_count(), 3);
/// ```
#[derive(Debug)]
pub struct CardTable<E: AnimationEngine> {
    config: TableConfig,
    source: Pile,
    dest: Pile,
    playing: bool,
    speed: u8,
    active: Option<ActiveMove>,
    state: TableState,
    listeners: TableListeners,
    engine: E,
}

impl<E: AnimationEngine> CardTable<E> {
    /// Create a table from a validated configuration.
    ///
    /// Fails with [`ConfigError`] on an empty card list, non-positive
    /// duration or scale, or a zero speed range; a failed table never
    /// enters any playing state.
    pub fn new(config: TableConfig, mut engine: E) -> Result<Self, ConfigError> {
        config.validate()?;

        let capacity = config.capacity();
        let source = Pile::new(config.source_base, config.offset_curve.clone(), capacity);
        let dest = Pile::new(config.dest_base, config.offset_curve.clone(), capacity);
        engine.set_time_scale(1.0);

        Ok(Self {
            config,
            source,
            dest,
            playing: false,
            speed: 1,
            active: None,
            state: TableState::Idle,
            listeners: TableListeners::new(),
            engine,
        })
    }

    /// Whether there are cards left to move.
    #[must_use]
    pub fn can_play(&self) -> bool {
        !self.source.is_empty()
    }

    /// Whether auto-play is enabled.
    #[must_use]
    pub fn is_playing(&self) -> bool {
        self.playing
    }

    /// Current speed level in `1..=max_speed`.
    #[must_use]
    pub fn speed_level(&self) -> u8 {
        self.speed
    }

    /// Current lifecycle phase.
    #[must_use]
    pub fn state(&self) -> TableState {
        self.state
    }

    /// Cards in the source pile.
    #[must_use]
    pub fn source_count(&self) -> usize {
        self.source.len()
    }

    /// Cards in the destination pile.
    #[must_use]
    pub fn dest_count(&self) -> usize {
        self.dest.len()
    }

    /// Total cards the table sequences.
    #[must_use]
    pub fn total_cards(&self) -> usize {
        self.config.capacity()
    }

    /// Whether a move animation is currently in flight.
    #[must_use]
    pub fn has_active_move(&self) -> bool {
        self.active.is_some()
    }

    /// Fraction of the deck that has arrived at the destination.
    #[must_use]
    pub fn progress(&self) -> f32 {
        self.dest.len() as f32 / self.config.capacity() as f32
    }

    /// The configuration this table was built with.
    #[must_use]
    pub fn config(&self) -> &TableConfig {
        &self.config
    }

    /// The source pile (read-only; mutation goes through commands).
    #[must_use]
    pub fn source(&self) -> &Pile {
        &self.source
    }

    /// The destination pile.
    #[must_use]
    pub fn dest(&self) -> &Pile {
        &self.dest
    }

    /// The animation engine, for sampling in-flight transforms.
    #[must_use]
    pub fn engine(&self) -> &E {
        &self.engine
    }

    /// Listener registry for subscribing to table events.
    pub fn listeners_mut(&mut self) -> &mut TableListeners {
        &mut self.listeners
    }

    /// Reset the table: cancel any in-flight move (its card is discarded
    /// along with everything else), clear both piles, and return speed
    /// and playing to their initial values.
    ///
    /// The source is repopulated on the next `tick`, giving the
    /// presentation layer one tick between teardown and fresh visuals.
    /// Safe to call mid-animation and idempotent.
    pub fn reset(&mut self) {
        self.cancel_active();
        self.set_speed(1);
        self.set_playing(false);

        self.source.clear();
        self.dest.clear();
        self.state = TableState::Clearing;
        debug!("table reset; awaiting populate tick");
    }

    /// Toggle auto-play. A defined no-op (no event) while the source is
    /// empty. When play turns on with no move in flight, the first move
    /// starts immediately.
    pub fn toggle_play(&mut self) {
        if !self.can_play() {
            debug!("toggle_play ignored: source is empty");
            return;
        }

        let playing = !self.playing;
        self.set_playing(playing);
        if playing && self.active.is_none() {
            self.start_move();
        }
    }

    /// Cycle the speed level `1 -> 2 -> ... -> max_speed -> 1`.
    ///
    /// Applies to moves started after the change; an in-flight move
    /// keeps the rate it started with.
    pub fn toggle_speed(&mut self) {
        let next = if self.speed >= self.config.max_speed {
            1
        } else {
            self.speed + 1
        };
        self.set_speed(next);
    }

    /// Cancel any in-flight move and return speed and playing to their
    /// initial values, leaving pile contents untouched. Used when
    /// leaving the view without discarding progress.
    pub fn cleanup_and_exit(&mut self) {
        self.cancel_active();
        self.set_speed(1);
        self.set_playing(false);
        debug!("table cleaned up for exit");
    }

    /// Advance the table by `dt` seconds of real time.
    ///
    /// Performs a pending populate, advances the animation engine,
    /// handles move completion (pushing the card and either continuing
    /// or finishing the pass), and while playing keeps a move in flight.
    pub fn tick(&mut self, dt: f32) {
        if self.state == TableState::Clearing {
            self.source.populate(&self.config.cards);
            self.state = TableState::Ready;
            let (source, dest) = (self.source.len(), self.dest.len());
            self.listeners.emit_count_changed(source, dest);
            debug!("source populated with {source} cards");
        }

        let completed = self.engine.advance(dt);
        if let Some(active) = self.active.take() {
            if completed.contains(&active.id) {
                self.finish_move(active.card);
            } else {
                self.active = Some(active);
            }
        }

        // Keeps a move in flight while playing, covering both the first
        // tick after an externally induced stall and normal operation.
        if self.playing && self.active.is_none() && self.state == TableState::Ready {
            self.start_move();
        }
    }

    /// Start one move if none is active and the source has cards.
    ///
    /// Single-flight guard: a request while a move is in flight is a
    /// defined no-op.
    fn start_move(&mut self) {
        if self.active.is_some() {
            return;
        }
        if !self.can_play() {
            return;
        }

        let from = self.source.top_position();
        let card = match self.source.pop() {
            Ok(card) => card,
            Err(err) => {
                // can_play was checked above, so this cannot happen
                // unless internal state is corrupt. Halt auto-play
                // rather than continuing on a broken invariant.
                error!("invariant violation popping source pile: {err}");
                if self.playing {
                    self.set_playing(false);
                }
                return;
            }
        };

        let target = self.dest.incoming_placement();
        let id = self.engine.schedule(TransitionSpec {
            sprite: card.sprite,
            from,
            midpoint: self.config.midpoint,
            to: target.position,
            phase_duration: self.config.move_duration,
            move_ease: self.config.move_ease,
            scale_curve: self.config.scale_curve.clone(),
            peak_scale: self.config.midpoint_scale,
            // In flight the card renders above both piles
            draw_order: self.config.capacity() as u32,
        });
        self.active = Some(ActiveMove { id, card });

        let (source, dest) = (self.source.len(), self.dest.len());
        self.listeners.emit_count_changed(source, dest);
        debug!("move started for {} ({source} left)", card.id);
    }

    /// Complete the active move: push the card onto the destination and
    /// continue the loop or finish the pass.
    fn finish_move(&mut self, card: CardToken) {
        self.dest.push(card);
        let (source, dest) = (self.source.len(), self.dest.len());
        self.listeners.emit_count_changed(source, dest);
        debug!("move finished for {} ({dest} arrived)", card.id);

        if !self.playing {
            return;
        }

        if self.can_play() {
            // Tail continuation: next move starts from the completion
            // handler, no idle tick in between.
            self.start_move();
        } else {
            self.set_speed(1);
            self.set_playing(false);
            self.listeners.emit_all_cards_moved();
            debug!("all cards moved");
        }
    }

    fn cancel_active(&mut self) {
        if let Some(active) = self.active.take() {
            self.engine.cancel(active.id);
            debug!("cancelled in-flight move for {}", active.card.id);
        }
    }

    fn set_playing(&mut self, playing: bool) {
        self.playing = playing;
        self.listeners.emit_playing_changed(playing);
    }

    fn set_speed(&mut self, level: u8) {
        self.speed = level;
        self.engine.set_time_scale(f32::from(level));
        self.listeners.emit_speed_changed(level);
    }
}
