//! Table event notifications.
//!
//! The driving UI observes the table through a small fixed set of typed
//! notifications. Listeners are plain boxed callbacks registered per
//! event kind and invoked synchronously on the single logical thread -
//! there is no channel or queue, matching the cooperative tick model.

/// Listener registry for table events.
///
/// ## Events
///
/// - `playing_changed(bool)`: auto-play was enabled or disabled
/// - `speed_changed(u8)`: the speed level cycled
/// - `count_changed(source, dest)`: a pile count changed
/// - `all_cards_moved()`: a full pass finished while auto-playing
#[derive(Default)]
pub struct TableListeners {
    playing_changed: Vec<Box<dyn FnMut(bool)>>,
    speed_changed: Vec<Box<dyn FnMut(u8)>>,
    count_changed: Vec<Box<dyn FnMut(usize, usize)>>,
    all_cards_moved: Vec<Box<dyn FnMut()>>,
}

impl TableListeners {
    /// Create an empty registry.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Subscribe to play/pause changes.
    pub fn on_playing_changed(&mut self, listener: impl FnMut(bool) + 'static) {
        self.playing_changed.push(Box::new(listener));
    }

    /// Subscribe to speed level changes.
    pub fn on_speed_changed(&mut self, listener: impl FnMut(u8) + 'static) {
        self.speed_changed.push(Box::new(listener));
    }

    /// Subscribe to pile count changes. Arguments are the source and
    /// destination counts after the change.
    pub fn on_count_changed(&mut self, listener: impl FnMut(usize, usize) + 'static) {
        self.count_changed.push(Box::new(listener));
    }

    /// Subscribe to full-pass completion.
    pub fn on_all_cards_moved(&mut self, listener: impl FnMut() + 'static) {
        self.all_cards_moved.push(Box::new(listener));
    }

    /// Drop every registered listener.
    pub fn clear(&mut self) {
        self.playing_changed.clear();
        self.speed_changed.clear();
        self.count_changed.clear();
        self.all_cards_moved.clear();
    }

    /// Total number of registered listeners.
    #[must_use]
    pub fn len(&self) -> usize {
        self.playing_changed.len()
            + self.speed_changed.len()
            + self.count_changed.len()
            + self.all_cards_moved.len()
    }

    /// Whether no listeners are registered.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    pub(crate) fn emit_playing_changed(&mut self, playing: bool) {
        for listener in &mut self.playing_changed {
            listener(playing);
        }
    }

    pub(crate) fn emit_speed_changed(&mut self, level: u8) {
        for listener in &mut self.speed_changed {
            listener(level);
        }
    }

    pub(crate) fn emit_count_changed(&mut self, source: usize, dest: usize) {
        for listener in &mut self.count_changed {
            listener(source, dest);
        }
    }

    pub(crate) fn emit_all_cards_moved(&mut self) {
        for listener in &mut self.all_cards_moved {
            listener();
        }
    }
}

impl std::fmt::Debug for TableListeners {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TableListeners")
            .field("playing_changed", &self.playing_changed.len())
            .field("speed_changed", &self.speed_changed.len())
            .field("count_changed", &self.count_changed.len())
            .field("all_cards_moved", &self.all_cards_moved.len())
            .finish()
    }
}
