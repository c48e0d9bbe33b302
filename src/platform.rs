// Thin abstraction over the Win32 windowing calls used by the tracking loop
// and overlay setup. Everything above this module works with WindowId and the
// WindowService trait, so the Z-order logic can be tested without a desktop.

use windows::Win32::Foundation::{CloseHandle, HANDLE, HWND};
use windows::Win32::System::ProcessStatus::GetModuleBaseNameW;
use windows::Win32::System::Threading::{
    OpenProcess, PROCESS_QUERY_LIMITED_INFORMATION, PROCESS_VM_READ,
};
use windows::Win32::UI::WindowsAndMessaging::{
    GetForegroundWindow, GetWindowLongPtrW, GetWindowThreadProcessId, SetWindowLongPtrW,
    SetWindowPos, GWL_EXSTYLE, HWND_TOP, SWP_NOACTIVATE, SWP_NOMOVE, SWP_NOSIZE,
};

/// Opaque window handle, safe to copy across threads.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct WindowId(pub isize);

impl WindowId {
    pub fn hwnd(self) -> HWND {
        HWND(self.0 as *mut std::ffi::c_void)
    }

    pub fn from_hwnd(hwnd: HWND) -> Self {
        Self(hwnd.0 as isize)
    }
}

/// Target position in the Z-order for `set_window_position`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ZOrder {
    /// Top of the non-topmost band.
    Top,
    /// Directly below the given window.
    Behind(WindowId),
}

/// The windowing operations the rest of the application needs.
///
/// Implementations must not move or resize windows when repositioning them in
/// the Z-order, and must report failures as `false`/`None` rather than panic.
pub trait WindowService {
    /// Handle of the window that currently has input focus, if any.
    fn foreground_window(&self) -> Option<WindowId>;

    /// Reposition a window in the Z-order, keeping its location and size.
    fn set_window_position(&self, window: WindowId, order: ZOrder) -> bool;

    /// Current extended style bits of a window.
    fn extended_style(&self, window: WindowId) -> isize;

    /// Replace the extended style bits of a window.
    fn set_extended_style(&self, window: WindowId, style: isize);

    /// Executable name of the process owning a window, e.g. `explorer.exe`.
    /// `None` if the window is gone or the process cannot be opened.
    fn owning_process_name(&self, window: WindowId) -> Option<String>;
}

/// Production implementation backed by user32/psapi.
pub struct Win32WindowService;

impl WindowService for Win32WindowService {
    fn foreground_window(&self) -> Option<WindowId> {
        let hwnd = unsafe { GetForegroundWindow() };
        if hwnd.0.is_null() {
            None
        } else {
            Some(WindowId::from_hwnd(hwnd))
        }
    }

    fn set_window_position(&self, window: WindowId, order: ZOrder) -> bool {
        let insert_after = match order {
            ZOrder::Top => HWND_TOP,
            ZOrder::Behind(other) => other.hwnd(),
        };
        unsafe {
            SetWindowPos(
                window.hwnd(),
                Some(insert_after),
                0,
                0,
                0,
                0,
                SWP_NOMOVE | SWP_NOSIZE | SWP_NOACTIVATE,
            )
            .is_ok()
        }
    }

    fn extended_style(&self, window: WindowId) -> isize {
        unsafe { GetWindowLongPtrW(window.hwnd(), GWL_EXSTYLE) }
    }

    fn set_extended_style(&self, window: WindowId, style: isize) {
        unsafe {
            SetWindowLongPtrW(window.hwnd(), GWL_EXSTYLE, style);
        }
    }

    fn owning_process_name(&self, window: WindowId) -> Option<String> {
        let mut pid: u32 = 0;
        unsafe {
            GetWindowThreadProcessId(window.hwnd(), Some(&mut pid));
        }
        if pid == 0 {
            return None;
        }
        process_name(pid)
    }
}

/// RAII wrapper so the process handle is closed on every exit path.
struct ProcessHandle(HANDLE);

impl ProcessHandle {
    fn open(pid: u32) -> Option<Self> {
        let handle = unsafe {
            OpenProcess(
                PROCESS_QUERY_LIMITED_INFORMATION | PROCESS_VM_READ,
                false,
                pid,
            )
        };
        match handle {
            Ok(h) if !h.is_invalid() => Some(Self(h)),
            _ => None,
        }
    }
}

impl Drop for ProcessHandle {
    fn drop(&mut self) {
        unsafe {
            let _ = CloseHandle(self.0);
        }
    }
}

fn process_name(pid: u32) -> Option<String> {
    let handle = ProcessHandle::open(pid)?;

    // MAX_PATH is plenty for a module base name
    let mut buffer = [0u16; 260];
    let len = unsafe { GetModuleBaseNameW(handle.0, None, &mut buffer) };
    if len == 0 {
        return None;
    }
    Some(String::from_utf16_lossy(&buffer[..len as usize]))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn window_id_round_trips_through_hwnd() {
        let id = WindowId(0x4242);
        assert_eq!(WindowId::from_hwnd(id.hwnd()), id);
    }

    #[test]
    fn process_name_of_invalid_pid_is_none() {
        // PID 0 is the idle process and cannot be opened
        assert!(process_name(0).is_none());
    }
}
