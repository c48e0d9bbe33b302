pub mod controls;
pub mod painting;
pub mod theme;

use controls::*;
use theme::*;

use crate::config::{self, AppConfig};
use crate::overlay::{self, Channel};
use crate::{autostart, tray};

use std::sync::{Arc, Mutex};
use windows::core::{w, PCWSTR};
use windows::Win32::Foundation::{HWND, LPARAM, LRESULT, RECT, WPARAM};
use windows::Win32::Graphics::Gdi::*;
use windows::Win32::System::LibraryLoader::GetModuleHandleW;
use windows::Win32::UI::Input::KeyboardAndMouse::{ReleaseCapture, SetCapture};
use windows::Win32::UI::WindowsAndMessaging::*;

const CLASS_NAME: &str = "AuraControlPanel\0";
const WM_TRAY_CALLBACK: u32 = tray::WM_TRAY_ICON;
const TOAST_TIMER_ID: usize = 100;

const CHANNELS: [Channel; 3] = [Channel::Red, Channel::Green, Channel::Blue];

/// Shared state pointer stored while the window lives
struct WndState {
    ui: UiState,
    config: Arc<Mutex<AppConfig>>,
}

// Global pointer to WndState (set during window creation, used in WndProc)
static mut WND_STATE: *mut WndState = std::ptr::null_mut();

fn wide(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

/// Create and return the control panel window (initially hidden)
pub fn create_window(config: Arc<Mutex<AppConfig>>) -> HWND {
    let class_name = wide(CLASS_NAME);

    unsafe {
        let hinstance = GetModuleHandleW(PCWSTR::null()).unwrap_or_default();
        let icon_id = PCWSTR(1 as *const u16);
        let hicon = LoadIconW(Some(hinstance.into()), icon_id)
            .ok()
            .or_else(|| LoadIconW(None, IDI_APPLICATION).ok())
            .unwrap_or_default();

        let wc = WNDCLASSW {
            style: CS_HREDRAW | CS_VREDRAW,
            lpfnWndProc: Some(wnd_proc),
            hInstance: hinstance.into(),
            lpszClassName: PCWSTR(class_name.as_ptr()),
            hbrBackground: CreateSolidBrush(CLR_BACKGROUND),
            hCursor: LoadCursorW(None, IDC_ARROW).unwrap_or_default(),
            hIcon: hicon,
            ..Default::default()
        };

        RegisterClassW(&wc);

        // Calculate window size to get desired client area
        let mut wr = RECT {
            left: 0,
            top: 0,
            right: WINDOW_WIDTH,
            bottom: WINDOW_HEIGHT,
        };
        let style = WS_OVERLAPPED | WS_CAPTION | WS_SYSMENU | WS_MINIMIZEBOX;
        let _ = AdjustWindowRectEx(&mut wr, style, false, WINDOW_EX_STYLE::default());

        let title = wide("Aura");

        let hwnd = CreateWindowExW(
            WINDOW_EX_STYLE::default(),
            PCWSTR(class_name.as_ptr()),
            PCWSTR(title.as_ptr()),
            style,
            CW_USEDEFAULT,
            CW_USEDEFAULT,
            wr.right - wr.left,
            wr.bottom - wr.top,
            None,
            None,
            Some(hinstance.into()),
            None,
        )
        .unwrap();

        let mut ui = UiState::new();
        {
            let cfg = config.lock().unwrap();
            ui.opacity_slider.value = (cfg.opacity * 100.0).round() as i32;
            ui.visible_toggle.checked = cfg.is_visible;
            ui.channel_sliders[0].value = cfg.color_r as i32;
            ui.channel_sliders[1].value = cfg.color_g as i32;
            ui.channel_sliders[2].value = cfg.color_b as i32;
        }
        // The registry is the source of truth for the autostart toggle
        ui.autostart_toggle.checked = autostart::is_enabled();

        WND_STATE = Box::into_raw(Box::new(WndState { ui, config }));

        hwnd
    }
}

/// Show and focus the control panel
pub fn show_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_SHOW);
        let _ = SetForegroundWindow(hwnd);
    }
}

/// Hide the control panel
pub fn hide_window(hwnd: HWND) {
    unsafe {
        let _ = ShowWindow(hwnd, SW_HIDE);
    }
}

/// Trigger a repaint
pub fn invalidate(hwnd: HWND) {
    unsafe {
        let _ = InvalidateRect(Some(hwnd), None, true);
    }
}

/// Update UI state from config (called after hotkeys change things)
pub fn sync_from_config(hwnd: HWND) {
    unsafe {
        if WND_STATE.is_null() {
            return;
        }
        let state = &mut *WND_STATE;
        let cfg = state.config.lock().unwrap();
        state.ui.opacity_slider.value = (cfg.opacity * 100.0).round() as i32;
        state.ui.visible_toggle.checked = cfg.is_visible;
        drop(cfg);
        invalidate(hwnd);
    }
}

/// Show a toast message
pub fn show_toast(hwnd: HWND, message: &str) {
    unsafe {
        if WND_STATE.is_null() {
            return;
        }
        let state = &mut *WND_STATE;
        state.ui.toast_message = message.to_string();
        state.ui.toast_visible = true;
        invalidate(hwnd);

        // Auto-hide after 2 seconds
        SetTimer(Some(hwnd), TOAST_TIMER_ID, 2000, None);
    }
}

/// Push the value of whichever slider is being dragged to the overlay
fn apply_dragging_slider(ui: &UiState) {
    if ui.opacity_slider.dragging {
        overlay::set_opacity(ui.opacity_slider.value as f32 / 100.0);
        return;
    }
    for (i, slider) in ui.channel_sliders.iter().enumerate() {
        if slider.dragging {
            overlay::set_channel(CHANNELS[i], slider.value as u8);
        }
    }
}

/// Window procedure
unsafe extern "system" fn wnd_proc(
    hwnd: HWND,
    msg: u32,
    wparam: WPARAM,
    lparam: LPARAM,
) -> LRESULT {
    match msg {
        WM_PAINT => {
            let mut ps = PAINTSTRUCT::default();
            let hdc = BeginPaint(hwnd, &mut ps);

            // Double-buffer to avoid flicker
            let mut client = RECT::default();
            let _ = GetClientRect(hwnd, &mut client);

            let mem_dc = CreateCompatibleDC(Some(hdc));
            let mem_bmp = CreateCompatibleBitmap(hdc, client.right, client.bottom);
            let old_bmp = SelectObject(mem_dc, HGDIOBJ::from(mem_bmp));

            if !WND_STATE.is_null() {
                let state = &mut *WND_STATE;
                painting::paint(mem_dc, &client, &mut state.ui);
            }

            let _ = BitBlt(
                hdc,
                0,
                0,
                client.right,
                client.bottom,
                Some(mem_dc),
                0,
                0,
                SRCCOPY,
            );

            SelectObject(mem_dc, old_bmp);
            let _ = DeleteObject(HGDIOBJ::from(mem_bmp));
            let _ = DeleteDC(mem_dc);
            let _ = EndPaint(hwnd, &ps);
            LRESULT(0)
        }

        WM_LBUTTONDOWN => {
            if WND_STATE.is_null() {
                return DefWindowProcW(hwnd, msg, wparam, lparam);
            }
            let state = &mut *WND_STATE;
            let x = (lparam.0 & 0xFFFF) as i16 as i32;
            let y = ((lparam.0 >> 16) & 0xFFFF) as i16 as i32;

            // Tab clicks
            for i in 0..3 {
                if point_in_rect(x, y, &state.ui.tab_rects[i]) {
                    state.ui.active_tab = match i {
                        0 => Tab::Dimmer,
                        1 => Tab::Tint,
                        _ => Tab::Settings,
                    };
                    invalidate(hwnd);
                    return LRESULT(0);
                }
            }

            // Opacity slider drag
            if state.ui.active_tab == Tab::Dimmer
                && point_in_rect(x, y, &state.ui.opacity_slider.thumb_rect)
            {
                state.ui.opacity_slider.dragging = true;
                SetCapture(hwnd);
                state.ui.opacity_slider.value = state.ui.opacity_slider.value_from_x(x);
                apply_dragging_slider(&state.ui);
                invalidate(hwnd);
                return LRESULT(0);
            }

            // Channel slider drags
            if state.ui.active_tab == Tab::Tint {
                for i in 0..3 {
                    if point_in_rect(x, y, &state.ui.channel_sliders[i].thumb_rect) {
                        state.ui.channel_sliders[i].dragging = true;
                        SetCapture(hwnd);
                        let val = state.ui.channel_sliders[i].value_from_x(x);
                        state.ui.channel_sliders[i].value = val;
                        apply_dragging_slider(&state.ui);
                        invalidate(hwnd);
                        return LRESULT(0);
                    }
                }
            }

            // Overlay on/off toggle
            if state.ui.active_tab == Tab::Dimmer
                && point_in_rect(x, y, &state.ui.visible_toggle.rect)
            {
                state.ui.visible_toggle.checked = !state.ui.visible_toggle.checked;
                let visible = state.ui.visible_toggle.checked;
                {
                    let mut cfg = state.config.lock().unwrap();
                    cfg.is_visible = visible;
                    config::save_config(&cfg);
                }
                if visible {
                    overlay::show_overlay();
                } else {
                    overlay::hide_overlay();
                }
                show_toast(
                    hwnd,
                    if visible {
                        "Overlay enabled"
                    } else {
                        "Overlay disabled"
                    },
                );
                invalidate(hwnd);
                return LRESULT(0);
            }

            // Autostart toggle
            if state.ui.active_tab == Tab::Settings
                && point_in_rect(x, y, &state.ui.autostart_toggle.rect)
            {
                let enable = !state.ui.autostart_toggle.checked;
                let ok = if enable {
                    autostart::enable()
                } else {
                    autostart::disable()
                };
                if ok {
                    state.ui.autostart_toggle.checked = enable;
                    let mut cfg = state.config.lock().unwrap();
                    cfg.launch_on_login = enable;
                    config::save_config(&cfg);
                    drop(cfg);
                    show_toast(hwnd, "Autostart setting saved");
                } else {
                    // One message box, no retry; the toggle stays as it was
                    MessageBoxW(
                        Some(hwnd),
                        w!("Could not update the startup registration."),
                        w!("Aura"),
                        MB_OK | MB_ICONERROR,
                    );
                }
                invalidate(hwnd);
                return LRESULT(0);
            }

            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_MOUSEMOVE => {
            if !WND_STATE.is_null() {
                let state = &mut *WND_STATE;
                let x = (lparam.0 & 0xFFFF) as i16 as i32;

                if let Some(slider) = state.ui.dragging_slider() {
                    slider.value = slider.value_from_x(x);
                    apply_dragging_slider(&state.ui);
                    invalidate(hwnd);
                }
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_LBUTTONUP => {
            if !WND_STATE.is_null() {
                let state = &mut *WND_STATE;

                if state.ui.opacity_slider.dragging {
                    state.ui.opacity_slider.dragging = false;
                    let _ = ReleaseCapture();

                    let val = state.ui.opacity_slider.value;
                    {
                        let mut cfg = state.config.lock().unwrap();
                        cfg.opacity = val as f32 / 100.0;
                        config::save_config(&cfg);
                        // Dragging the slider while hidden turns the overlay on
                        if !cfg.is_visible && val > 0 {
                            cfg.is_visible = true;
                            state.ui.visible_toggle.checked = true;
                            config::save_config(&cfg);
                            overlay::show_overlay();
                        }
                    }
                    show_toast(hwnd, "Opacity updated");
                    invalidate(hwnd);
                } else if let Some(i) = (0..3).find(|&i| state.ui.channel_sliders[i].dragging) {
                    state.ui.channel_sliders[i].dragging = false;
                    let _ = ReleaseCapture();

                    let val = state.ui.channel_sliders[i].value as u8;
                    {
                        let mut cfg = state.config.lock().unwrap();
                        match CHANNELS[i] {
                            Channel::Red => cfg.color_r = val,
                            Channel::Green => cfg.color_g = val,
                            Channel::Blue => cfg.color_b = val,
                        }
                        config::save_config(&cfg);
                    }
                    show_toast(hwnd, "Tint updated");
                    invalidate(hwnd);
                }
            }
            DefWindowProcW(hwnd, msg, wparam, lparam)
        }

        WM_COMMAND => {
            let cmd = (wparam.0 & 0xFFFF) as u32;
            match cmd {
                tray::IDM_CONTROL_PANEL => {
                    show_window(hwnd);
                }
                tray::IDM_QUIT => {
                    tray::remove_tray_icon(hwnd);
                    PostQuitMessage(0);
                }
                _ => {}
            }
            LRESULT(0)
        }

        WM_TRAY_CALLBACK => {
            let event = (lparam.0 & 0xFFFF) as u32;
            match event {
                WM_LBUTTONUP => {
                    show_window(hwnd);
                }
                WM_RBUTTONUP => {
                    tray::show_context_menu(hwnd);
                }
                _ => {}
            }
            LRESULT(0)
        }

        WM_HOTKEY => {
            if !WND_STATE.is_null() {
                let state = &mut *WND_STATE;
                match wparam.0 as i32 {
                    crate::hotkeys::HOTKEY_TOGGLE => {
                        crate::do_toggle_overlay(&state.config);
                        sync_from_config(hwnd);
                    }
                    crate::hotkeys::HOTKEY_INCREASE => {
                        crate::do_adjust_opacity(&state.config, 0.05);
                        sync_from_config(hwnd);
                    }
                    crate::hotkeys::HOTKEY_DECREASE => {
                        crate::do_adjust_opacity(&state.config, -0.05);
                        sync_from_config(hwnd);
                    }
                    _ => {}
                }
            }
            LRESULT(0)
        }

        WM_TIMER => {
            if wparam.0 == TOAST_TIMER_ID && !WND_STATE.is_null() {
                let state = &mut *WND_STATE;
                state.ui.toast_visible = false;
                state.ui.toast_message.clear();
                let _ = KillTimer(Some(hwnd), TOAST_TIMER_ID);
                invalidate(hwnd);
            }
            LRESULT(0)
        }

        WM_CLOSE => {
            // Hide to tray instead of quitting
            hide_window(hwnd);
            LRESULT(0)
        }

        WM_DESTROY => {
            if !WND_STATE.is_null() {
                let _ = Box::from_raw(WND_STATE);
                WND_STATE = std::ptr::null_mut();
            }
            PostQuitMessage(0);
            LRESULT(0)
        }

        WM_ERASEBKGND => {
            // Handled in WM_PAINT with double buffering
            LRESULT(1)
        }

        _ => DefWindowProcW(hwnd, msg, wparam, lparam),
    }
}
