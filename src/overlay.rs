// Dimming overlay: one layered, click-through window covering the whole
// virtual screen.
//
// The window is deliberately NOT topmost. A topmost overlay would dim the
// focused window as well; instead the tracking loop keeps the overlay
// directly behind the foreground window in the Z-order, so only everything
// underneath it is dimmed. The loop runs as a WM_TIMER on this window's own
// thread, so all window manipulation stays on the UI thread.
//
// Opacity is whole-window alpha via SetLayeredWindowAttributes; the tint is
// just the window background, repainted when a channel changes.

use std::sync::Mutex;
use windows::core::PCWSTR;
use windows::Win32::Foundation::{COLORREF, HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::{
    CreateSolidBrush, DeleteObject, FillRect, InvalidateRect, HDC, HGDIOBJ,
};
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::WindowsAndMessaging::{
    CreateWindowExW, DefWindowProcW, DestroyWindow, GetClientRect, GetSystemMetrics, KillTimer,
    RegisterClassW, SetLayeredWindowAttributes, SetTimer, ShowWindow, CS_HREDRAW, CS_VREDRAW,
    LWA_ALPHA, SM_CXVIRTUALSCREEN, SM_CYVIRTUALSCREEN, SM_XVIRTUALSCREEN, SM_YVIRTUALSCREEN,
    SW_HIDE, SW_SHOWNOACTIVATE, WM_DESTROY, WM_ERASEBKGND, WM_TIMER, WNDCLASSW, WS_DISABLED,
    WS_EX_LAYERED, WS_EX_NOACTIVATE, WS_EX_TOOLWINDOW, WS_EX_TRANSPARENT, WS_POPUP,
};

use crate::config::AppConfig;
use crate::platform::{Win32WindowService, WindowId, WindowService};
use crate::tracking::{ForegroundTracker, TICK_INTERVAL_MS};

// Thread-safe HWND wrapper
struct HwndWrapper(isize);
unsafe impl Send for HwndWrapper {}
unsafe impl Sync for HwndWrapper {}

static OVERLAY_WINDOW: Mutex<Option<HwndWrapper>> = Mutex::new(None);
static DIM: Mutex<DimState> = Mutex::new(DimState::initial());
static CLASS_REGISTERED: Mutex<bool> = Mutex::new(false);

const CLASS_NAME: &str = "AuraOverlay\0";
const TICK_TIMER_ID: usize = 1;

/// One of the three tint channels.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Channel {
    Red,
    Green,
    Blue,
}

/// Live dim parameters. Hiding the overlay leaves opacity and tint untouched
/// so showing it again restores the previous appearance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DimState {
    opacity: f32,
    red: u8,
    green: u8,
    blue: u8,
    visible: bool,
}

impl DimState {
    const fn initial() -> Self {
        Self {
            opacity: 0.5,
            red: 0,
            green: 0,
            blue: 0,
            visible: false,
        }
    }

    fn from_config(cfg: &AppConfig) -> Self {
        let mut state = Self::initial();
        state.set_opacity(cfg.opacity);
        state.red = cfg.color_r;
        state.green = cfg.color_g;
        state.blue = cfg.color_b;
        state
    }

    pub fn set_opacity(&mut self, value: f32) {
        self.opacity = value.clamp(0.0, 1.0);
    }

    pub fn opacity(&self) -> f32 {
        self.opacity
    }

    /// Layered-window alpha byte for the current opacity.
    pub fn alpha(&self) -> u8 {
        (self.opacity * 255.0).round() as u8
    }

    pub fn set_channel(&mut self, channel: Channel, value: u8) {
        match channel {
            Channel::Red => self.red = value,
            Channel::Green => self.green = value,
            Channel::Blue => self.blue = value,
        }
    }

    pub fn channels(&self) -> (u8, u8, u8) {
        (self.red, self.green, self.blue)
    }

    /// GDI COLORREF (0x00BBGGRR) for the tint.
    pub fn colorref(&self) -> u32 {
        self.red as u32 | (self.green as u32) << 8 | (self.blue as u32) << 16
    }
}

unsafe extern "system" fn window_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_TIMER => {
            if wparam.0 == TICK_TIMER_ID {
                let visible = DIM.lock().unwrap().visible;
                let tracker = ForegroundTracker::new(WindowId::from_hwnd(hwnd));
                let _ = tracker.tick(&Win32WindowService, visible);
            }
            LRESULT(0)
        }

        WM_ERASEBKGND => {
            let hdc = HDC(wparam.0 as *mut std::ffi::c_void);
            let mut client = RECT::default();
            let _ = GetClientRect(hwnd, &mut client);

            let color = DIM.lock().unwrap().colorref();
            let brush = CreateSolidBrush(COLORREF(color));
            FillRect(hdc, &client, brush);
            let _ = DeleteObject(HGDIOBJ::from(brush));
            LRESULT(1)
        }

        WM_DESTROY => {
            let _ = KillTimer(Some(hwnd), TICK_TIMER_ID);
            LRESULT(0)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}

fn register_class() -> bool {
    let mut registered = CLASS_REGISTERED.lock().unwrap();
    if *registered {
        return true;
    }

    unsafe {
        let hinstance = GetModuleHandleW(PCWSTR::null()).unwrap_or_default();
        let class_name: Vec<u16> = CLASS_NAME.encode_utf16().collect();

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(window_proc),
            hInstance: hinstance.into(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            ..Default::default()
        };

        if RegisterClassW(&wc) != 0 {
            *registered = true;
            true
        } else {
            false
        }
    }
}

/// Create the overlay window sized to the virtual screen, apply the
/// click-through style, and start the tracking timer. The window starts
/// hidden; call `show_overlay` to display it.
pub fn create_overlay<S: WindowService>(svc: &S, cfg: &AppConfig) -> Option<WindowId> {
    if !register_class() {
        tracing::warn!("overlay window class registration failed");
        return None;
    }

    *DIM.lock().unwrap() = DimState::from_config(cfg);

    unsafe {
        let x = GetSystemMetrics(SM_XVIRTUALSCREEN);
        let y = GetSystemMetrics(SM_YVIRTUALSCREEN);
        let width = GetSystemMetrics(SM_CXVIRTUALSCREEN);
        let height = GetSystemMetrics(SM_CYVIRTUALSCREEN);

        let hinstance = GetModuleHandleW(PCWSTR::null()).unwrap_or_default();
        let class_name: Vec<u16> = CLASS_NAME.encode_utf16().collect();

        let hwnd = CreateWindowExW(
            WS_EX_LAYERED | WS_EX_TOOLWINDOW | WS_EX_NOACTIVATE,
            PCWSTR(class_name.as_ptr()),
            PCWSTR::null(),
            WS_POPUP | WS_DISABLED,
            x,
            y,
            width,
            height,
            None,
            None,
            Some(hinstance.into()),
            None,
        )
        .ok()?;

        let id = WindowId::from_hwnd(hwnd);

        // OR click-through into whatever extended style the window came up with
        let style = svc.extended_style(id);
        svc.set_extended_style(id, style | WS_EX_TRANSPARENT.0 as isize);

        let alpha = DIM.lock().unwrap().alpha();
        let _ = SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha, LWA_ALPHA);

        SetTimer(Some(hwnd), TICK_TIMER_ID, TICK_INTERVAL_MS, None);

        *OVERLAY_WINDOW.lock().unwrap() = Some(HwndWrapper(id.0));
        tracing::info!(x, y, width, height, "overlay created");
        Some(id)
    }
}

fn with_overlay(f: impl FnOnce(HWND)) {
    let guard = OVERLAY_WINDOW.lock().unwrap();
    if let Some(wrapper) = guard.as_ref() {
        f(WindowId(wrapper.0).hwnd());
    }
}

pub fn show_overlay() {
    DIM.lock().unwrap().visible = true;
    with_overlay(|hwnd| unsafe {
        let _ = ShowWindow(hwnd, SW_SHOWNOACTIVATE);
        let _ = InvalidateRect(Some(hwnd), None, true);
    });
}

pub fn hide_overlay() {
    DIM.lock().unwrap().visible = false;
    with_overlay(|hwnd| unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    });
}

/// Update overlay alpha. Value is clamped to [0, 1].
pub fn set_opacity(opacity: f32) {
    let alpha = {
        let mut dim = DIM.lock().unwrap();
        dim.set_opacity(opacity);
        dim.alpha()
    };
    with_overlay(|hwnd| unsafe {
        let _ = SetLayeredWindowAttributes(hwnd, COLORREF(0), alpha, LWA_ALPHA);
    });
}

/// Update a single tint channel and repaint. The other channels keep their
/// values.
pub fn set_channel(channel: Channel, value: u8) {
    DIM.lock().unwrap().set_channel(channel, value);
    with_overlay(|hwnd| unsafe {
        let _ = InvalidateRect(Some(hwnd), None, true);
    });
}

/// Destroy the overlay window at process exit.
pub fn destroy_overlay() {
    let taken = OVERLAY_WINDOW.lock().unwrap().take();
    if let Some(wrapper) = taken {
        unsafe {
            let hwnd = WindowId(wrapper.0).hwnd();
            let _ = ShowWindow(hwnd, SW_HIDE);
            let _ = DestroyWindow(hwnd);
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn opacity_is_clamped_to_unit_range() {
        let mut dim = DimState::initial();
        dim.set_opacity(1.7);
        assert_eq!(dim.opacity(), 1.0);
        dim.set_opacity(-0.2);
        assert_eq!(dim.opacity(), 0.0);
        dim.set_opacity(0.42);
        assert_eq!(dim.opacity(), 0.42);
    }

    #[test]
    fn alpha_scales_with_opacity() {
        let mut dim = DimState::initial();
        dim.set_opacity(0.0);
        assert_eq!(dim.alpha(), 0);
        dim.set_opacity(1.0);
        assert_eq!(dim.alpha(), 255);
        dim.set_opacity(0.5);
        assert_eq!(dim.alpha(), 128);
    }

    #[test]
    fn channel_updates_leave_other_channels_alone() {
        let mut dim = DimState::initial();
        dim.set_channel(Channel::Red, 10);
        dim.set_channel(Channel::Green, 20);
        dim.set_channel(Channel::Blue, 30);

        dim.set_channel(Channel::Green, 99);
        assert_eq!(dim.channels(), (10, 99, 30));

        dim.set_channel(Channel::Red, 1);
        assert_eq!(dim.channels(), (1, 99, 30));

        dim.set_channel(Channel::Blue, 255);
        assert_eq!(dim.channels(), (1, 99, 255));
    }

    #[test]
    fn hiding_preserves_opacity_and_tint() {
        let mut dim = DimState::initial();
        dim.set_opacity(0.66);
        dim.set_channel(Channel::Blue, 80);
        dim.visible = true;

        dim.visible = false;
        dim.visible = true;
        assert_eq!(dim.opacity(), 0.66);
        assert_eq!(dim.channels(), (0, 0, 80));
    }

    #[test]
    fn colorref_is_bgr_packed() {
        let mut dim = DimState::initial();
        dim.set_channel(Channel::Red, 0x11);
        dim.set_channel(Channel::Green, 0x22);
        dim.set_channel(Channel::Blue, 0x33);
        assert_eq!(dim.colorref(), 0x0033_2211);
    }

    #[test]
    fn config_values_seed_the_dim_state() {
        let cfg = AppConfig {
            opacity: 2.0, // out of range on disk, clamped on load
            color_r: 5,
            color_g: 6,
            color_b: 7,
            is_visible: true,
            launch_on_login: false,
        };
        let dim = DimState::from_config(&cfg);
        assert_eq!(dim.opacity(), 1.0);
        assert_eq!(dim.channels(), (5, 6, 7));
        assert!(!dim.visible);
    }
}
