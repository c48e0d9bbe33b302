// Foreground tracking loop.
//
// The overlay must cover every window except the one the user is working in,
// without being topmost (that would dim the focused window too). Each tick we
// raise the current foreground window to the top of the Z-order and slot the
// overlay directly behind it. The shell process is exempt so the taskbar and
// start menu never end up dimmed.

use crate::platform::{WindowId, WindowService, ZOrder};

/// Tick cadence of the tracking loop. Fixed by design.
pub const TICK_INTERVAL_MS: u32 = 250;

/// What a single tick did, mainly for tests.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TickOutcome {
    /// Nothing qualified for a reorder this tick.
    Skipped,
    /// Foreground window raised, overlay placed behind it.
    Reordered,
}

/// Re-stacks the overlay behind whichever window has focus.
pub struct ForegroundTracker {
    overlay: WindowId,
}

impl ForegroundTracker {
    pub fn new(overlay: WindowId) -> Self {
        Self { overlay }
    }

    /// Runs one tick of the loop. Every skip condition is silent: a window
    /// that disappears between the foreground query and the process lookup
    /// just means no Z-order change until the next tick.
    pub fn tick<S: WindowService>(&self, svc: &S, overlay_visible: bool) -> TickOutcome {
        if !overlay_visible {
            return TickOutcome::Skipped;
        }

        let foreground = match svc.foreground_window() {
            Some(w) if w != self.overlay => w,
            _ => return TickOutcome::Skipped,
        };

        let process = match svc.owning_process_name(foreground) {
            Some(name) => name,
            None => return TickOutcome::Skipped,
        };
        if is_shell_process(&process) {
            return TickOutcome::Skipped;
        }

        svc.set_window_position(foreground, ZOrder::Top);
        svc.set_window_position(self.overlay, ZOrder::Behind(foreground));
        TickOutcome::Reordered
    }
}

/// True for the desktop shell (taskbar, start menu, desktop icons).
fn is_shell_process(name: &str) -> bool {
    let lower = name.to_ascii_lowercase();
    let base = lower.strip_suffix(".exe").unwrap_or(&lower);
    base == "explorer"
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::cell::RefCell;
    use std::collections::HashMap;

    const OVERLAY: WindowId = WindowId(100);
    const APP: WindowId = WindowId(200);

    /// Scripted service that records every Z-order placement.
    struct MockService {
        foreground: Option<WindowId>,
        process_names: HashMap<isize, String>,
        placements: RefCell<Vec<(WindowId, ZOrder)>>,
    }

    impl MockService {
        fn new(foreground: Option<WindowId>) -> Self {
            Self {
                foreground,
                process_names: HashMap::new(),
                placements: RefCell::new(Vec::new()),
            }
        }

        fn with_process(mut self, window: WindowId, name: &str) -> Self {
            self.process_names.insert(window.0, name.to_string());
            self
        }
    }

    impl WindowService for MockService {
        fn foreground_window(&self) -> Option<WindowId> {
            self.foreground
        }

        fn set_window_position(&self, window: WindowId, order: ZOrder) -> bool {
            self.placements.borrow_mut().push((window, order));
            true
        }

        fn extended_style(&self, _window: WindowId) -> isize {
            0
        }

        fn set_extended_style(&self, _window: WindowId, _style: isize) {}

        fn owning_process_name(&self, window: WindowId) -> Option<String> {
            self.process_names.get(&window.0).cloned()
        }
    }

    #[test]
    fn hidden_overlay_leaves_z_order_alone() {
        let svc = MockService::new(Some(APP)).with_process(APP, "notepad.exe");
        let outcome = ForegroundTracker::new(OVERLAY).tick(&svc, false);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(svc.placements.borrow().is_empty());
    }

    #[test]
    fn no_foreground_window_leaves_z_order_alone() {
        let svc = MockService::new(None);
        let outcome = ForegroundTracker::new(OVERLAY).tick(&svc, true);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(svc.placements.borrow().is_empty());
    }

    #[test]
    fn overlay_as_foreground_is_not_reordered() {
        let svc = MockService::new(Some(OVERLAY)).with_process(OVERLAY, "aura.exe");
        let outcome = ForegroundTracker::new(OVERLAY).tick(&svc, true);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(svc.placements.borrow().is_empty());
    }

    #[test]
    fn shell_window_is_never_covered() {
        let svc = MockService::new(Some(APP)).with_process(APP, "explorer.exe");
        let outcome = ForegroundTracker::new(OVERLAY).tick(&svc, true);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(svc.placements.borrow().is_empty());
    }

    #[test]
    fn vanished_process_skips_the_tick() {
        // Window still reported as foreground but its process is gone
        let svc = MockService::new(Some(APP));
        let outcome = ForegroundTracker::new(OVERLAY).tick(&svc, true);
        assert_eq!(outcome, TickOutcome::Skipped);
        assert!(svc.placements.borrow().is_empty());
    }

    #[test]
    fn application_window_gets_overlay_behind_it() {
        let svc = MockService::new(Some(APP)).with_process(APP, "notepad.exe");
        let outcome = ForegroundTracker::new(OVERLAY).tick(&svc, true);
        assert_eq!(outcome, TickOutcome::Reordered);
        assert_eq!(
            *svc.placements.borrow(),
            vec![(APP, ZOrder::Top), (OVERLAY, ZOrder::Behind(APP))]
        );
    }

    #[test]
    fn shell_name_matching_ignores_case_and_suffix() {
        assert!(is_shell_process("explorer.exe"));
        assert!(is_shell_process("EXPLORER.EXE"));
        assert!(is_shell_process("explorer"));
        assert!(!is_shell_process("internet_explorer.exe"));
        assert!(!is_shell_process("explorer_helper.exe"));
    }
}
