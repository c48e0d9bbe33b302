// Run-at-startup via HKCU\Software\Microsoft\Windows\CurrentVersion\Run

use windows::core::PCWSTR;
use windows::Win32::System::Registry::{
    RegCloseKey, RegDeleteValueW, RegOpenKeyExW, RegQueryValueExW, RegSetValueExW, HKEY,
    HKEY_CURRENT_USER, KEY_READ, KEY_WRITE, REG_SAM_FLAGS, REG_SZ,
};

const RUN_KEY: &str = "Software\\Microsoft\\Windows\\CurrentVersion\\Run";
const VALUE_NAME: &str = "Aura";

fn wide_string(s: &str) -> Vec<u16> {
    s.encode_utf16().chain(std::iter::once(0)).collect()
}

fn open_run_key(access: REG_SAM_FLAGS) -> Option<HKEY> {
    let key_path = wide_string(RUN_KEY);
    let mut hkey = HKEY::default();
    let result = unsafe {
        RegOpenKeyExW(
            HKEY_CURRENT_USER,
            PCWSTR(key_path.as_ptr()),
            Some(0),
            access,
            &mut hkey,
        )
    };
    if result.is_ok() {
        Some(hkey)
    } else {
        tracing::warn!(?result, "failed to open Run key");
        None
    }
}

/// Register the current executable for launch at login.
pub fn enable() -> bool {
    let Some(hkey) = open_run_key(KEY_WRITE) else {
        return false;
    };

    let exe_path = std::env::current_exe().unwrap_or_default();
    let command = format!("\"{}\"", exe_path.display());
    let value_name = wide_string(VALUE_NAME);
    let data = wide_string(&command);
    let data_bytes =
        unsafe { std::slice::from_raw_parts(data.as_ptr() as *const u8, data.len() * 2) };

    unsafe {
        let result = RegSetValueExW(
            hkey,
            PCWSTR(value_name.as_ptr()),
            Some(0),
            REG_SZ,
            Some(data_bytes),
        );
        let _ = RegCloseKey(hkey);
        result.is_ok()
    }
}

/// Remove the startup registration.
pub fn disable() -> bool {
    let Some(hkey) = open_run_key(KEY_WRITE) else {
        return false;
    };

    let value_name = wide_string(VALUE_NAME);
    unsafe {
        let result = RegDeleteValueW(hkey, PCWSTR(value_name.as_ptr()));
        let _ = RegCloseKey(hkey);
        result.is_ok()
    }
}

/// Whether the startup registration currently exists.
pub fn is_enabled() -> bool {
    let Some(hkey) = open_run_key(KEY_READ) else {
        return false;
    };

    let value_name = wide_string(VALUE_NAME);
    unsafe {
        let result = RegQueryValueExW(hkey, PCWSTR(value_name.as_ptr()), None, None, None, None);
        let _ = RegCloseKey(hkey);
        result.is_ok()
    }
}
