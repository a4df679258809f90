use std::sync::Arc;
use std::thread;

use minvio_input::{keycodes::*, InputLatch, KeyStates, BUTTON_SLOTS, KEY_SLOTS};
use pretty_assertions::assert_eq;
use proptest::prelude::*;

/// A raw event as delivered by the windowing layer.
#[derive(Debug, Clone)]
enum Raw {
    Down(usize),
    Up(usize),
    Move(i32, i32),
    Press(u16),
    Release(u16),
}

fn apply(latch: &InputLatch, event: &Raw) {
    match *event {
        Raw::Down(k) => latch.key_down(k),
        Raw::Up(k) => latch.key_up(k),
        Raw::Move(x, y) => latch.mouse_moved(x, y),
        Raw::Press(b) => {
            latch.button_pressed(b);
        }
        Raw::Release(b) => {
            latch.button_released(b);
        }
    }
}

/// Events touching only key codes below 500 and button ids up to 6.
fn raw_event() -> impl Strategy<Value = Raw> {
    prop_oneof![
        (0usize..500).prop_map(Raw::Down),
        (0usize..500).prop_map(Raw::Up),
        (-50i32..500, -50i32..500).prop_map(|(x, y)| Raw::Move(x, y)),
        (0u16..7).prop_map(Raw::Press),
        (0u16..7).prop_map(Raw::Release),
    ]
}

#[test]
fn test_just_pressed_then_held() {
    let latch = InputLatch::new();
    latch.key_down(5);

    let (now, before) = (latch.current_keys(), latch.previous_keys());
    assert!(now[5] && !before[5], "key 5 should read as just pressed");

    latch.tick();
    latch.key_down(5);
    assert_eq!((latch.current_keys()[5], latch.previous_keys()[5]), (true, true));
}

#[test]
fn test_just_released() {
    let latch = InputLatch::new();
    latch.key_down(KEY_LEFT);
    latch.tick();
    latch.key_up(KEY_LEFT);

    assert!(!latch.current_keys()[KEY_LEFT]);
    assert!(latch.previous_keys()[KEY_LEFT]);
}

#[test]
fn test_events_from_another_thread() {
    let latch = Arc::new(InputLatch::new());
    let producer = {
        let latch = Arc::clone(&latch);
        thread::spawn(move || {
            latch.key_down(ascii('w'));
            latch.mouse_moved(12, 34);
            latch.button_pressed(3);
        })
    };
    producer.join().unwrap();

    assert!(latch.is_key_down(ascii('W')));
    assert_eq!(latch.mouse_position(), (12, 34));
    assert!(latch.mouse_button(3));
    assert!(!latch.was_key_down(ascii('W')));
}

#[test]
fn test_fresh_latch_is_released() {
    let latch = InputLatch::new();
    assert_eq!(latch.current_keys(), KeyStates::new());
    assert_eq!(latch.previous_keys(), KeyStates::new());
    assert_eq!(latch.mouse_position(), (0, 0));
    assert!((0..BUTTON_SLOTS).all(|slot| !latch.mouse_button(slot)));
}

proptest! {
    #[test]
    fn prop_tick_twice_is_noop(events in prop::collection::vec(raw_event(), 0..64)) {
        let latch = InputLatch::new();
        for e in &events {
            apply(&latch, e);
        }
        latch.tick();
        let once = latch.previous_keys();
        latch.tick();
        prop_assert_eq!(latch.previous_keys(), once.clone());
        prop_assert_eq!(latch.current_keys(), once);
    }

    #[test]
    fn prop_untouched_keys_stay_released(
        events in prop::collection::vec(raw_event(), 0..64),
        ticks in prop::collection::vec(any::<bool>(), 64),
    ) {
        let latch = InputLatch::new();
        for (e, tick) in events.iter().zip(ticks) {
            apply(&latch, e);
            if tick {
                latch.tick();
            }
        }
        let (now, before) = (latch.current_keys(), latch.previous_keys());
        for k in 500..KEY_SLOTS {
            prop_assert!(!now[k] && !before[k]);
        }
    }

    #[test]
    fn prop_button_slot_zero_never_set(ids in prop::collection::vec(any::<u16>(), 0..32)) {
        let latch = InputLatch::new();
        for id in ids {
            latch.button_pressed(id);
        }
        prop_assert!(!latch.mouse_button(0));
    }

    #[test]
    fn prop_previous_matches_current_after_tick(events in prop::collection::vec(raw_event(), 0..64)) {
        let latch = InputLatch::new();
        for e in &events {
            apply(&latch, e);
        }
        latch.tick();
        prop_assert_eq!(latch.previous_keys(), latch.current_keys());
    }
}
