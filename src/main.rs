// Prevents console window in release builds
#![cfg_attr(not(debug_assertions), windows_subsystem = "windows")]

mod autostart;
mod config;
mod hotkeys;
mod overlay;
mod platform;
mod tracking;
mod tray;
mod ui;

use config::AppConfig;
use platform::Win32WindowService;
use std::sync::{Arc, Mutex};
use windows::core::PCWSTR;
use windows::Win32::System::Threading::{CreateMutexW, OpenMutexW, SYNCHRONIZATION_ACCESS_RIGHTS};
use windows::Win32::UI::WindowsAndMessaging::{
    DispatchMessageW, GetMessageW, TranslateMessage, MSG,
};

const SINGLE_INSTANCE_MUTEX: &str = "AuraOverlayMutex\0";

fn main() {
    // Single-instance check
    if is_already_running() {
        return;
    }

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| tracing_subscriber::EnvFilter::new("aura=info")),
        )
        .init();

    // Load config
    let cfg = config::load_config();
    tracing::info!(
        opacity = cfg.opacity,
        visible = cfg.is_visible,
        "starting with saved settings"
    );
    let config = Arc::new(Mutex::new(cfg));

    // Overlay first so the tracking timer is running before anything shows
    let overlay_id = {
        let cfg = config.lock().unwrap();
        overlay::create_overlay(&Win32WindowService, &cfg)
    };
    if overlay_id.is_none() {
        tracing::error!("could not create the overlay window, exiting");
        return;
    }

    // Create the control panel window
    let hwnd = ui::create_window(config.clone());

    // Setup system tray
    tray::add_tray_icon(hwnd);

    // Register global hotkeys
    hotkeys::register_all(hwnd);

    // Show overlay if it was visible last time
    if config.lock().unwrap().is_visible {
        overlay::show_overlay();
    }

    // Show and focus the control panel on startup
    ui::show_window(hwnd);

    // Win32 message loop
    unsafe {
        let mut msg = MSG::default();
        while GetMessageW(&mut msg, None, 0, 0).as_bool() {
            let _ = TranslateMessage(&msg);
            DispatchMessageW(&msg);
        }
    }

    // Cleanup; settings are saved eagerly on change, this catches the rest
    config::save_config(&config.lock().unwrap());
    hotkeys::unregister_all(hwnd);
    tray::remove_tray_icon(hwnd);
    overlay::destroy_overlay();
    tracing::info!("shut down");
}

/// Check if another instance is already running
fn is_already_running() -> bool {
    let name: Vec<u16> = SINGLE_INSTANCE_MUTEX.encode_utf16().collect();

    unsafe {
        // Try to open existing mutex
        let existing = OpenMutexW(
            SYNCHRONIZATION_ACCESS_RIGHTS(0x001F0001), // MUTEX_ALL_ACCESS
            false,
            PCWSTR(name.as_ptr()),
        );
        if existing.is_ok() {
            // Another instance exists
            return true;
        }

        // Create the mutex (this instance owns it)
        let _ = CreateMutexW(None, true, PCWSTR(name.as_ptr()));
        false
    }
}

/// Toggle the overlay on/off (called from hotkey handler)
pub fn do_toggle_overlay(config: &Arc<Mutex<AppConfig>>) {
    let mut cfg = config.lock().unwrap();
    cfg.is_visible = !cfg.is_visible;
    config::save_config(&cfg);

    if cfg.is_visible {
        overlay::show_overlay();
    } else {
        overlay::hide_overlay();
    }
}

/// Adjust opacity by delta (called from hotkey handler)
pub fn do_adjust_opacity(config: &Arc<Mutex<AppConfig>>, delta: f32) {
    let mut cfg = config.lock().unwrap();

    cfg.opacity = (cfg.opacity + delta).clamp(0.0, 1.0);

    // Nudging opacity while hidden brings the overlay back
    if !cfg.is_visible {
        cfg.is_visible = true;
        overlay::show_overlay();
    }
    config::save_config(&cfg);

    overlay::set_opacity(cfg.opacity);
}
