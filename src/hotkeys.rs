// Global hotkeys via RegisterHotKey, delivered as WM_HOTKEY to the control
// panel window.

use windows::Win32::Foundation::HWND;
use windows::Win32::UI::Input::KeyboardAndMouse::{
    RegisterHotKey, UnregisterHotKey, HOT_KEY_MODIFIERS, MOD_ALT, MOD_CONTROL, MOD_NOREPEAT,
    VIRTUAL_KEY, VK_DOWN, VK_END, VK_UP,
};

/// Hotkey IDs (must be unique within the application)
pub const HOTKEY_TOGGLE: i32 = 1;
pub const HOTKEY_INCREASE: i32 = 2;
pub const HOTKEY_DECREASE: i32 = 3;

/// All bindings share the Ctrl+Alt prefix
const BINDINGS: [(i32, VIRTUAL_KEY); 3] = [
    (HOTKEY_TOGGLE, VK_END),
    (HOTKEY_INCREASE, VK_UP),
    (HOTKEY_DECREASE, VK_DOWN),
];

/// Register all global hotkeys. Returns true if all succeed.
pub fn register_all(hwnd: HWND) -> bool {
    let mods = HOT_KEY_MODIFIERS(MOD_CONTROL.0 | MOD_ALT.0 | MOD_NOREPEAT.0);
    let mut ok = true;

    for (id, key) in BINDINGS {
        let registered = unsafe { RegisterHotKey(Some(hwnd), id, mods, key.0 as u32) };
        if registered.is_err() {
            tracing::warn!(id, "hotkey registration failed");
            ok = false;
        }
    }
    ok
}

/// Unregister all global hotkeys
pub fn unregister_all(hwnd: HWND) {
    for (id, _) in BINDINGS {
        unsafe {
            let _ = UnregisterHotKey(Some(hwnd), id);
        }
    }
}
