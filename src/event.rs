use crossterm::event::{self, Event, KeyEvent, KeyEventKind};

pub enum AppEvent {
    Key(KeyEvent),
    Resize(u16, u16),
}

/// Blocking source of terminal events. Each call waits for the next key
/// press or resize; releases, repeats, mouse and focus events are skipped.
pub struct EventHandler;

impl EventHandler {
    pub fn new() -> Self {
        Self
    }

    pub fn next(&self) -> anyhow::Result<AppEvent> {
        loop {
            match event::read()? {
                Event::Key(key) if key.kind == KeyEventKind::Press => {
                    log::trace!("Key event: {:?} with modifiers {:?}", key.code, key.modifiers);
                    return Ok(AppEvent::Key(key));
                }
                Event::Resize(w, h) => return Ok(AppEvent::Resize(w, h)),
                _ => {}
            }
        }
    }
}

impl Default for EventHandler {
    fn default() -> Self {
        Self::new()
    }
}
