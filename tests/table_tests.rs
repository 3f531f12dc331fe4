//! Sequencer integration tests.
//!
//! These drive a full `CardTable` + `TickEngine` pair through the
//! observable contract: event emission, ordering, pause/speed/reset
//! semantics, and the completion signal.

use std::cell::RefCell;
use std::rc::Rc;

use card_table::anim::TickEngine;
use card_table::core::{CardId, CardToken, Ease, SpriteHandle, TableConfig, Vec2};
use card_table::table::{CardTable, TableState};

fn deck(n: u32) -> Vec<CardToken> {
    (0..n)
        .map(|i| CardToken::new(CardId::new(i), SpriteHandle::new(100 + i)))
        .collect()
}

fn new_table(cards: Vec<CardToken>) -> CardTable<TickEngine> {
    let config = TableConfig::new(cards)
        .with_move_duration(0.5)
        .with_midpoint(Vec2::ZERO, 1.2);
    CardTable::new(config, TickEngine::new()).expect("valid config")
}

/// Reset and consume the populate tick.
fn ready(cards: Vec<CardToken>) -> CardTable<TickEngine> {
    let mut table = new_table(cards);
    table.reset();
    table.tick(0.0);
    table
}

// =============================================================================
// Scenario A: full pass
// =============================================================================

/// Three cards play to completion: arrival order matches the configured
/// list, `PlayingChanged(false)` fires once, `AllCardsMoved` fires
/// exactly once.
#[test]
fn test_full_pass_order_and_events() {
    let cards = deck(3);
    let mut table = ready(cards.clone());

    let playing_events = Rc::new(RefCell::new(Vec::new()));
    let completions = Rc::new(RefCell::new(0u32));
    {
        let sink = Rc::clone(&playing_events);
        table
            .listeners_mut()
            .on_playing_changed(move |playing| sink.borrow_mut().push(playing));
        let sink = Rc::clone(&completions);
        table
            .listeners_mut()
            .on_all_cards_moved(move || *sink.borrow_mut() += 1);
    }

    table.toggle_play();
    for _ in 0..20 {
        table.tick(0.5);
    }

    assert_eq!(table.dest_count(), 3);
    assert_eq!(table.source_count(), 0);
    assert_eq!(table.dest().top(), Some(cards[2]));
    assert!(!table.is_playing());

    assert_eq!(*playing_events.borrow(), vec![true, false]);
    assert_eq!(*completions.borrow(), 1);

    // Extra ticks after the pass fire nothing further
    table.tick(1.0);
    assert_eq!(*completions.borrow(), 1);
    assert_eq!(*playing_events.borrow(), vec![true, false]);
}

/// Cards arrive at the destination in configured list order.
#[test]
fn test_arrival_order_matches_list() {
    let cards = deck(4);
    let mut table = ready(cards.clone());

    let arrivals = Rc::new(RefCell::new(Vec::new()));
    {
        let sink = Rc::clone(&arrivals);
        table
            .listeners_mut()
            .on_count_changed(move |source, dest| sink.borrow_mut().push((source, dest)));
    }

    table.toggle_play();
    for _ in 0..20 {
        table.tick(0.5);
    }

    // Destination bottom-to-top equals list order
    let layout: Vec<_> = table.dest().layout().map(|(card, _)| card).collect();
    assert_eq!(layout, cards);

    // Count events end in the fully moved state
    assert_eq!(arrivals.borrow().last(), Some(&(0, 4)));
}

// =============================================================================
// Scenario B: pause mid-move
// =============================================================================

/// Pausing before the first completion lets the in-flight move land but
/// stops continuation.
#[test]
fn test_pause_mid_move() {
    let mut table = ready(deck(3));

    table.toggle_play();
    table.tick(0.25);
    table.toggle_play(); // pause; move still in flight

    assert!(!table.is_playing());
    assert!(table.has_active_move());

    for _ in 0..10 {
        table.tick(0.5);
    }

    assert_eq!(table.dest_count(), 1);
    assert_eq!(table.source_count(), 2);
    assert!(!table.has_active_move());
}

/// Resuming after a pause picks up where the pass left off.
#[test]
fn test_resume_after_pause() {
    let mut table = ready(deck(3));

    table.toggle_play();
    table.tick(1.0); // first card lands, second starts
    table.toggle_play(); // pause
    table.tick(1.0); // second lands, no third

    assert_eq!(table.dest_count(), 2);

    table.toggle_play();
    for _ in 0..10 {
        table.tick(0.5);
    }
    assert_eq!(table.dest_count(), 3);
}

// =============================================================================
// Scenario C: speed changes
// =============================================================================

/// A speed change mid-move doesn't alter the in-flight duration; the
/// next move runs at the new rate.
#[test]
fn test_speed_change_spares_in_flight_move() {
    let mut table = ready(deck(2));

    table.toggle_play();
    table.toggle_speed(); // level 2, after the first move started

    // At the original rate the move needs a full second
    table.tick(0.5);
    assert_eq!(table.dest_count(), 0);
    table.tick(0.5);
    assert_eq!(table.dest_count(), 1);

    // The second move runs at double rate: half a second of real time
    table.tick(0.25);
    assert_eq!(table.dest_count(), 1);
    table.tick(0.25);
    assert_eq!(table.dest_count(), 2);
}

/// Speed level cycles through the configured range and wraps.
#[test]
fn test_speed_cycle_events() {
    let mut table = ready(deck(2));

    let levels = Rc::new(RefCell::new(Vec::new()));
    {
        let sink = Rc::clone(&levels);
        table
            .listeners_mut()
            .on_speed_changed(move |level| sink.borrow_mut().push(level));
    }

    for _ in 0..4 {
        table.toggle_speed();
    }

    assert_eq!(*levels.borrow(), vec![2, 3, 4, 1]);
    assert_eq!(table.speed_level(), 1);
}

/// A custom max speed bounds the cycle.
#[test]
fn test_custom_max_speed() {
    let config = TableConfig::new(deck(2)).with_max_speed(2);
    let mut table = CardTable::new(config, TickEngine::new()).expect("valid config");

    table.toggle_speed();
    assert_eq!(table.speed_level(), 2);
    table.toggle_speed();
    assert_eq!(table.speed_level(), 1);
}

// =============================================================================
// Scenario D: reset mid-move
// =============================================================================

/// Resetting with a move in flight cancels it; after the populate tick
/// the counts are fully restored and no stale animation remains.
#[test]
fn test_reset_mid_move() {
    let mut table = ready(deck(3));

    table.toggle_play();
    table.tick(0.25);
    assert!(table.has_active_move());

    table.reset();
    assert_eq!(table.state(), TableState::Clearing);
    assert!(!table.has_active_move());
    assert_eq!(table.engine().in_flight(), 0);

    table.tick(0.0);
    assert_eq!(table.source_count(), 3);
    assert_eq!(table.dest_count(), 0);
    assert!(!table.is_playing());
    assert_eq!(table.speed_level(), 1);

    // The cancelled move never completes: ticking moves nothing
    table.tick(5.0);
    assert_eq!(table.dest_count(), 0);
}

/// The populate tick announces the fresh counts.
#[test]
fn test_reset_emits_fresh_counts() {
    let mut table = new_table(deck(3));

    let counts = Rc::new(RefCell::new(Vec::new()));
    {
        let sink = Rc::clone(&counts);
        table
            .listeners_mut()
            .on_count_changed(move |source, dest| sink.borrow_mut().push((source, dest)));
    }

    table.reset();
    assert!(counts.borrow().is_empty());

    table.tick(0.0);
    assert_eq!(*counts.borrow(), vec![(3, 0)]);
}

// =============================================================================
// Rendering output
// =============================================================================

/// The engine exposes a sample for the in-flight card that the
/// presentation layer can apply, and drops it once the move lands.
#[test]
fn test_in_flight_sample() {
    let cards = deck(2);
    let mut table = ready(cards.clone());

    table.toggle_play();
    table.tick(0.25);

    assert_eq!(table.engine().in_flight(), 1);

    // The first listed card is the one in flight, drawn above both piles
    let mid_move_ease = Ease::InOutQuart.apply(0.5);
    let expected = table
        .config()
        .source_base
        .lerp(table.config().midpoint, mid_move_ease);
    let sample = table
        .engine()
        .sample(card_table::anim::AnimationId(0))
        .expect("move in flight");
    assert_eq!(sample.sprite, cards[0].sprite);
    assert_eq!(sample.draw_order, 2);
    assert!((sample.position.x - expected.x).abs() < 1e-5);

    table.tick(1.0);
    assert!(table.engine().sample(card_table::anim::AnimationId(0)).is_none());
}

/// Destination layout places arrived cards at increasing offsets.
#[test]
fn test_destination_layout_offsets() {
    let mut table = ready(deck(3));
    table.toggle_play();
    for _ in 0..10 {
        table.tick(0.5);
    }

    let placements: Vec<_> = table.dest().layout().map(|(_, p)| p).collect();
    assert_eq!(placements.len(), 3);
    assert!(placements[0].position.y < placements[1].position.y);
    assert!(placements[1].position.y < placements[2].position.y);
    assert_eq!(placements[2].draw_order, 2);
}

// =============================================================================
// Independence
// =============================================================================

/// Two tables share nothing; driving one leaves the other untouched.
#[test]
fn test_tables_are_independent() {
    let mut a = ready(deck(2));
    let mut b = ready(deck(2));

    a.toggle_play();
    for _ in 0..10 {
        a.tick(0.5);
    }

    assert_eq!(a.dest_count(), 2);
    assert_eq!(b.dest_count(), 0);
    assert!(b.can_play());

    b.toggle_speed();
    assert_eq!(b.speed_level(), 2);
    assert_eq!(a.speed_level(), 1);
}
