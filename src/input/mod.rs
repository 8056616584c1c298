use std::time::Instant;

use egui::{Context, Event, Key, Modifiers, PointerButton, Pos2};

use crate::config::Config;
use crate::geometry::Point;

mod repeat;
pub use repeat::{KeyRepeat, RepeatedKey};

/// Normalized input consumed by the session, one batch per frame
#[derive(Debug, Clone, PartialEq)]
pub enum InputEvent {
    /// Pointer position in canvas pixels
    PointerMoved(Point),
    /// Primary button went down
    PointerPressed,
    /// Primary button went up
    PointerReleased,
    /// A key press, original or synthesized by key repeat
    Key { key: Key, modifiers: Modifiers },
    /// Characters produced by the keyboard
    Text(String),
    /// Modifiers currently held
    Modifiers(Modifiers),
    /// The window asked to close
    Quit,
}

impl InputEvent {
    pub fn key(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::NONE,
        }
    }

    pub fn shift(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::SHIFT,
        }
    }

    pub fn ctrl(key: Key) -> Self {
        Self::Key {
            key,
            modifiers: Modifiers::CTRL,
        }
    }

    pub fn text(text: &str) -> Self {
        Self::Text(text.to_string())
    }
}

/// Handles converting raw egui input into our `InputEvent`s
pub struct InputHandler {
    repeat: KeyRepeat,
    /// Set after a host-side key repeat so its text echo is dropped too
    skip_text: bool,
}

impl InputHandler {
    pub fn new(config: &Config) -> Self {
        Self {
            repeat: KeyRepeat::new(config.key_repeat_delay(), config.key_repeat_interval()),
            skip_text: false,
        }
    }

    /// Drains this frame's egui input. `to_canvas` maps screen positions to
    /// canvas pixels.
    pub fn process_input(
        &mut self,
        ctx: &Context,
        to_canvas: impl Fn(Pos2) -> Point,
        now: Instant,
    ) -> Vec<InputEvent> {
        let mut events = Vec::new();

        ctx.input(|input| {
            if input.viewport().close_requested() {
                events.push(InputEvent::Quit);
            }
            events.push(InputEvent::Modifiers(input.modifiers));

            for event in &input.events {
                self.translate(event, &to_canvas, now, &mut events);
            }
            // the frame ends wherever the pointer ended up, even after a click
            if let Some(pos) = input.pointer.latest_pos() {
                events.push(InputEvent::PointerMoved(to_canvas(pos)));
            }
        });

        if let Some(repeated) = self.repeat.poll(now) {
            events.push(InputEvent::Key {
                key: repeated.key,
                modifiers: repeated.modifiers,
            });
            if let Some(text) = repeated.text {
                events.push(InputEvent::Text(text));
            }
        }

        events
    }

    fn translate(
        &mut self,
        event: &Event,
        to_canvas: &impl Fn(Pos2) -> Point,
        now: Instant,
        events: &mut Vec<InputEvent>,
    ) {
        match event {
            Event::Key {
                key,
                pressed: true,
                repeat: false,
                modifiers,
                ..
            } => {
                self.skip_text = false;
                self.repeat.press(*key, *modifiers, now);
                events.push(InputEvent::Key {
                    key: *key,
                    modifiers: *modifiers,
                });
            }
            Event::Key {
                pressed: true,
                repeat: true,
                ..
            } => {
                // we synthesize our own repeats on the configured timing
                self.skip_text = true;
            }
            Event::Key {
                key, pressed: false, ..
            } => {
                self.repeat.release(*key);
            }
            Event::Text(text) => {
                if !self.skip_text {
                    self.repeat.attach_text(text);
                    events.push(InputEvent::Text(text.clone()));
                }
            }
            Event::PointerButton {
                pos,
                button: PointerButton::Primary,
                pressed,
                ..
            } => {
                events.push(InputEvent::PointerMoved(to_canvas(*pos)));
                events.push(if *pressed {
                    InputEvent::PointerPressed
                } else {
                    InputEvent::PointerReleased
                });
            }
            Event::WindowFocused(false) => {
                self.repeat.release_all();
            }
            _ => {}
        }
    }
}

#[cfg(test)]
mod tests {
    use std::time::Duration;

    use egui::{RawInput, ViewportEvent, ViewportId};

    use super::*;

    fn handler() -> InputHandler {
        InputHandler::new(&Config::default())
    }

    fn key(key: Key, pressed: bool, repeat: bool) -> Event {
        Event::Key {
            key,
            physical_key: None,
            pressed,
            repeat,
            modifiers: Modifiers::NONE,
        }
    }

    fn button(x: f32, y: f32, pressed: bool) -> Event {
        Event::PointerButton {
            pos: Pos2::new(x, y),
            button: PointerButton::Primary,
            pressed,
            modifiers: Modifiers::NONE,
        }
    }

    /// Runs one egui pass with `raw` and returns what the handler made of it.
    fn drain(ctx: &Context, handler: &mut InputHandler, raw: RawInput, now: Instant) -> Vec<InputEvent> {
        let mut out = Vec::new();
        let _ = ctx.run(raw, |ctx| {
            out = handler.process_input(ctx, |pos: Pos2| Point::from(pos), now);
        });
        out
    }

    fn frame(ctx: &Context, handler: &mut InputHandler, events: Vec<Event>, now: Instant) -> Vec<InputEvent> {
        let raw = RawInput {
            events,
            ..Default::default()
        };
        drain(ctx, handler, raw, now)
    }

    fn keys_and_text(events: &[InputEvent]) -> Vec<InputEvent> {
        events
            .iter()
            .filter(|event| matches!(event, InputEvent::Key { .. } | InputEvent::Text(_)))
            .cloned()
            .collect()
    }

    #[test]
    fn test_close_request_becomes_quit() {
        let ctx = Context::default();
        let mut raw = RawInput::default();
        raw.viewports
            .entry(ViewportId::ROOT)
            .or_default()
            .events
            .push(ViewportEvent::Close);

        let events = drain(&ctx, &mut handler(), raw, Instant::now());
        assert_eq!(events.first(), Some(&InputEvent::Quit));
    }

    #[test]
    fn test_host_repeats_are_dropped_with_their_text() {
        let ctx = Context::default();
        let mut input = handler();
        let now = Instant::now();

        let first = frame(&ctx, &mut input, vec![key(Key::A, true, false), Event::Text("a".into())], now);
        assert_eq!(keys_and_text(&first), vec![InputEvent::key(Key::A), InputEvent::text("a")]);

        let repeated = frame(&ctx, &mut input, vec![key(Key::A, true, true), Event::Text("a".into())], now);
        assert!(keys_and_text(&repeated).is_empty());

        // a fresh press types again
        let next = frame(&ctx, &mut input, vec![key(Key::B, true, false), Event::Text("b".into())], now);
        assert_eq!(keys_and_text(&next), vec![InputEvent::key(Key::B), InputEvent::text("b")]);
    }

    #[test]
    fn test_held_key_repeats_with_its_text() {
        let ctx = Context::default();
        let mut input = handler();
        let start = Instant::now();

        frame(&ctx, &mut input, vec![key(Key::A, true, false), Event::Text("a".into())], start);
        let early = frame(&ctx, &mut input, Vec::new(), start + Duration::from_millis(150));
        assert!(keys_and_text(&early).is_empty());

        let due = frame(&ctx, &mut input, Vec::new(), start + Duration::from_millis(200));
        assert_eq!(keys_and_text(&due), vec![InputEvent::key(Key::A), InputEvent::text("a")]);

        frame(&ctx, &mut input, vec![key(Key::A, false, false)], start + Duration::from_millis(250));
        let released = frame(&ctx, &mut input, Vec::new(), start + Duration::from_millis(400));
        assert!(keys_and_text(&released).is_empty());
    }

    #[test]
    fn test_focus_loss_releases_held_key() {
        let ctx = Context::default();
        let mut input = handler();
        let start = Instant::now();

        frame(&ctx, &mut input, vec![key(Key::Backspace, true, false)], start);
        frame(&ctx, &mut input, vec![Event::WindowFocused(false)], start);
        let later = frame(&ctx, &mut input, Vec::new(), start + Duration::from_millis(500));
        assert!(keys_and_text(&later).is_empty());
    }

    #[test]
    fn test_button_moves_pointer_before_press_and_release() {
        let ctx = Context::default();
        let mut input = handler();
        let now = Instant::now();

        let pressed = frame(&ctx, &mut input, vec![button(20.0, 30.0, true)], now);
        let at = pressed
            .iter()
            .position(|event| *event == InputEvent::PointerPressed)
            .unwrap();
        assert_eq!(pressed[at - 1], InputEvent::PointerMoved(Point::new(20, 30)));

        let released = frame(&ctx, &mut input, vec![button(24.0, 31.0, false)], now);
        let at = released
            .iter()
            .position(|event| *event == InputEvent::PointerReleased)
            .unwrap();
        assert_eq!(released[at - 1], InputEvent::PointerMoved(Point::new(24, 31)));
    }

    #[test]
    fn test_frame_ends_at_latest_pointer_position() {
        let ctx = Context::default();
        let mut input = handler();
        let events = frame(
            &ctx,
            &mut input,
            vec![button(20.0, 30.0, true), Event::PointerMoved(Pos2::new(40.0, 50.0))],
            Instant::now(),
        );

        let last_move = events.iter().rev().find_map(|event| match event {
            InputEvent::PointerMoved(pos) => Some(*pos),
            _ => None,
        });
        assert_eq!(last_move, Some(Point::new(40, 50)));
        assert!(events.contains(&InputEvent::PointerPressed));
    }
}
