use windows::Win32::Foundation::COLORREF;

// ── Warm dark palette ────────────────────────────────────────────────────────

/// Background: #16120F
pub const CLR_BACKGROUND: COLORREF = COLORREF(0x000F1216);

/// Foreground / primary text: #F5F0EA
pub const CLR_FOREGROUND: COLORREF = COLORREF(0x00EAF0F5);

/// Cards / tab bar / control tracks: #2C251E
pub const CLR_SECONDARY: COLORREF = COLORREF(0x001E252C);

/// Muted text (descriptions, labels): #A89B8C
pub const CLR_MUTED_FG: COLORREF = COLORREF(0x008C9BA8);

/// Brand amber: #F59E0B
pub const CLR_BRAND: COLORREF = COLORREF(0x000B9EF5);

/// Card borders (same as secondary)
pub const CLR_BORDER: COLORREF = COLORREF(0x001E252C);

/// Toggle track when off (same as secondary)
pub const CLR_INPUT: COLORREF = COLORREF(0x001E252C);

// ── Dimensions ───────────────────────────────────────────────────────────────

/// Main window client area dimensions
pub const WINDOW_WIDTH: i32 = 380;
pub const WINDOW_HEIGHT: i32 = 540;

/// Padding inside the window
pub const PADDING: i32 = 20;

/// Content width (WINDOW_WIDTH - 2 * PADDING)
pub const CONTENT_WIDTH: i32 = WINDOW_WIDTH - 2 * PADDING;

/// Card border radius
pub const CARD_RADIUS: i32 = 8;

/// Tab bar height
pub const TAB_HEIGHT: i32 = 34;

/// Gap between sections
pub const GAP: i32 = 12;

// ── Font sizes (logical units, negative for character height) ────────────────

pub const FONT_SIZE_TITLE: i32 = -18;
pub const FONT_SIZE_SMALL: i32 = -12;
pub const FONT_SIZE_XS: i32 = -11;
pub const FONT_SIZE_XXS: i32 = -10;

/// Font family names
pub const FONT_NAME: &str = "Segoe UI";
pub const FONT_MONO_NAME: &str = "Consolas";
