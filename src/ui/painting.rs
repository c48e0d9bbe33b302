// GDI owner-draw rendering for the control panel

use super::controls::*;
use super::theme::*;
use windows::Win32::Foundation::{COLORREF, RECT};
use windows::Win32::Graphics::Gdi::*;

/// Per-channel slider accents: red #EF4444, green #22C55E, blue #3B82F6
const CHANNEL_ACCENTS: [COLORREF; 3] = [
    COLORREF(0x004444EF),
    COLORREF(0x005EC522),
    COLORREF(0x00F6823B),
];
const CHANNEL_LABELS: [&str; 3] = ["Red", "Green", "Blue"];

const SHORTCUT_ROWS: [(&str, &str); 3] = [
    ("Toggle overlay", "Ctrl+Alt+End"),
    ("Increase opacity", "Ctrl+Alt+Up"),
    ("Decrease opacity", "Ctrl+Alt+Down"),
];

// ── Helpers ──────────────────────────────────────────────────────────────────

fn create_font(size: i32, weight: i32, family: &str) -> HFONT {
    let face: Vec<u16> = family.encode_utf16().chain(std::iter::once(0)).collect();
    unsafe {
        let mut lf = LOGFONTW {
            lfHeight: size,
            lfWeight: weight,
            lfQuality: CLEARTYPE_QUALITY,
            lfCharSet: DEFAULT_CHARSET,
            ..Default::default()
        };
        let len = face.len().min(32);
        lf.lfFaceName[..len].copy_from_slice(&face[..len]);
        CreateFontIndirectW(&lf)
    }
}

fn fill_rect_color(hdc: HDC, r: &RECT, color: COLORREF) {
    unsafe {
        let brush = CreateSolidBrush(color);
        FillRect(hdc, r, brush);
        let _ = DeleteObject(HGDIOBJ::from(brush));
    }
}

fn draw_rounded_rect(hdc: HDC, r: &RECT, radius: i32, fill: COLORREF, border: COLORREF) {
    unsafe {
        let fill_brush = CreateSolidBrush(fill);
        let border_pen = CreatePen(PS_SOLID, 1, border);
        let old_brush = SelectObject(hdc, HGDIOBJ::from(fill_brush));
        let old_pen = SelectObject(hdc, HGDIOBJ::from(border_pen));
        let _ = RoundRect(hdc, r.left, r.top, r.right, r.bottom, radius, radius);
        SelectObject(hdc, old_pen);
        SelectObject(hdc, old_brush);
        let _ = DeleteObject(HGDIOBJ::from(fill_brush));
        let _ = DeleteObject(HGDIOBJ::from(border_pen));
    }
}

fn draw_text_simple(hdc: HDC, text: &str, x: i32, y: i32, color: COLORREF, font: HFONT) {
    unsafe {
        let old_font = SelectObject(hdc, HGDIOBJ::from(font));
        SetTextColor(hdc, color);
        SetBkMode(hdc, TRANSPARENT);
        let wide: Vec<u16> = text.encode_utf16().collect();
        let _ = TextOutW(hdc, x, y, &wide);
        SelectObject(hdc, old_font);
    }
}

fn measure_text(hdc: HDC, text: &str, font: HFONT) -> (i32, i32) {
    unsafe {
        let old_font = SelectObject(hdc, HGDIOBJ::from(font));
        let wide: Vec<u16> = text.encode_utf16().collect();
        let mut size = windows::Win32::Foundation::SIZE::default();
        let _ = GetTextExtentPoint32W(hdc, &wide, &mut size);
        SelectObject(hdc, old_font);
        (size.cx, size.cy)
    }
}

fn draw_text_right(hdc: HDC, text: &str, right_x: i32, y: i32, color: COLORREF, font: HFONT) {
    let (w, _) = measure_text(hdc, text, font);
    draw_text_simple(hdc, text, right_x - w, y, color, font);
}

fn draw_circle(hdc: HDC, cx: i32, cy: i32, r: i32, color: COLORREF) {
    unsafe {
        let brush = CreateSolidBrush(color);
        let pen = CreatePen(PS_SOLID, 0, color);
        let old_brush = SelectObject(hdc, HGDIOBJ::from(brush));
        let old_pen = SelectObject(hdc, HGDIOBJ::from(pen));
        let _ = Ellipse(hdc, cx - r, cy - r, cx + r, cy + r);
        SelectObject(hdc, old_pen);
        SelectObject(hdc, old_brush);
        let _ = DeleteObject(HGDIOBJ::from(brush));
        let _ = DeleteObject(HGDIOBJ::from(pen));
    }
}

fn draw_ring(hdc: HDC, cx: i32, cy: i32, r: i32, width: i32, color: COLORREF) {
    unsafe {
        let pen = CreatePen(PS_SOLID, width, color);
        let null_brush = GetStockObject(NULL_BRUSH);
        let old_pen = SelectObject(hdc, HGDIOBJ::from(pen));
        let old_brush = SelectObject(hdc, null_brush);
        let _ = Ellipse(hdc, cx - r, cy - r, cx + r, cy + r);
        SelectObject(hdc, old_brush);
        SelectObject(hdc, old_pen);
        let _ = DeleteObject(HGDIOBJ::from(pen));
    }
}

// ── Main paint function ─────────────────────────────────────────────────────

pub fn paint(hdc: HDC, client: &RECT, state: &mut UiState) {
    fill_rect_color(hdc, client, CLR_BACKGROUND);

    let fonts = Fonts::create();
    let mut y = PADDING;

    y = draw_header(hdc, y, &fonts);
    y += GAP;

    y = draw_tab_bar(hdc, y, state, &fonts);
    y += GAP;

    match state.active_tab {
        Tab::Dimmer => draw_dimmer_tab(hdc, y, state, &fonts),
        Tab::Tint => draw_tint_tab(hdc, y, state, &fonts),
        Tab::Settings => draw_settings_tab(hdc, y, state, &fonts),
    }

    if state.toast_visible {
        draw_toast(hdc, client, state, &fonts);
    }

    fonts.destroy();
}

// ── Font cache ──────────────────────────────────────────────────────────────

struct Fonts {
    title: HFONT,
    small: HFONT,
    small_bold: HFONT,
    xs: HFONT,
    xxs: HFONT,
    mono: HFONT,
}

impl Fonts {
    fn create() -> Self {
        Self {
            title: create_font(FONT_SIZE_TITLE, 600, FONT_NAME),
            small: create_font(FONT_SIZE_SMALL, 400, FONT_NAME),
            small_bold: create_font(FONT_SIZE_SMALL, 500, FONT_NAME),
            xs: create_font(FONT_SIZE_XS, 400, FONT_NAME),
            xxs: create_font(FONT_SIZE_XXS, 400, FONT_NAME),
            mono: create_font(FONT_SIZE_XXS, 500, FONT_MONO_NAME),
        }
    }

    fn destroy(&self) {
        unsafe {
            let _ = DeleteObject(HGDIOBJ::from(self.title));
            let _ = DeleteObject(HGDIOBJ::from(self.small));
            let _ = DeleteObject(HGDIOBJ::from(self.small_bold));
            let _ = DeleteObject(HGDIOBJ::from(self.xs));
            let _ = DeleteObject(HGDIOBJ::from(self.xxs));
            let _ = DeleteObject(HGDIOBJ::from(self.mono));
        }
    }
}

// ── Section renderers ───────────────────────────────────────────────────────

fn draw_header(hdc: HDC, y: i32, fonts: &Fonts) -> i32 {
    let x = PADDING;
    let right = PADDING + CONTENT_WIDTH;

    // Halo mark: two concentric rings around a filled core
    let icon_size = 36;
    let icon_cx = x + icon_size / 2;
    let icon_cy = y + icon_size / 2;
    draw_ring(hdc, icon_cx, icon_cy, icon_size / 2 - 1, 2, CLR_BRAND);
    draw_ring(hdc, icon_cx, icon_cy, icon_size / 2 - 7, 1, CLR_MUTED_FG);
    draw_circle(hdc, icon_cx, icon_cy, 4, CLR_BRAND);

    let text_x = x + icon_size + 12;
    draw_text_simple(hdc, "Aura", text_x, y, CLR_FOREGROUND, fonts.title);
    draw_text_simple(hdc, "Focus dimmer", text_x, y + 20, CLR_MUTED_FG, fonts.xs);

    let version = concat!("v", env!("CARGO_PKG_VERSION"));
    draw_text_right(hdc, version, right, y + 4, CLR_MUTED_FG, fonts.xxs);

    let header_bottom = y + icon_size + 8;

    unsafe {
        let pen = CreatePen(PS_SOLID, 1, CLR_BORDER);
        let old_pen = SelectObject(hdc, HGDIOBJ::from(pen));
        let _ = MoveToEx(hdc, PADDING, header_bottom, None);
        let _ = LineTo(hdc, right, header_bottom);
        SelectObject(hdc, old_pen);
        let _ = DeleteObject(HGDIOBJ::from(pen));
    }

    header_bottom + 8
}

fn draw_tab_bar(hdc: HDC, y: i32, state: &mut UiState, fonts: &Fonts) -> i32 {
    let x = PADDING;
    let tab_names = ["Dimmer", "Tint", "Settings"];
    let bar_rect = RECT {
        left: x,
        top: y,
        right: x + CONTENT_WIDTH,
        bottom: y + TAB_HEIGHT + 8,
    };

    draw_rounded_rect(hdc, &bar_rect, CARD_RADIUS, CLR_SECONDARY, CLR_SECONDARY);
    state.tab_bar_rect = bar_rect;

    let tab_width = CONTENT_WIDTH / 3;
    let tab_pad = 4;

    for (i, name) in tab_names.iter().enumerate() {
        let tx = x + tab_pad + (i as i32) * tab_width;
        let tab_rect = RECT {
            left: tx,
            top: y + tab_pad,
            right: tx + tab_width - tab_pad,
            bottom: y + TAB_HEIGHT + tab_pad,
        };

        let is_active = state.active_tab as usize == i;
        if is_active {
            draw_rounded_rect(
                hdc,
                &tab_rect,
                CARD_RADIUS - 2,
                CLR_BACKGROUND,
                CLR_BACKGROUND,
            );
        }

        let text_color = if is_active {
            CLR_FOREGROUND
        } else {
            CLR_MUTED_FG
        };
        let (tw, th) = measure_text(hdc, name, fonts.small_bold);
        let text_x = tab_rect.left + (tab_rect.right - tab_rect.left - tw) / 2;
        let text_y = tab_rect.top + (tab_rect.bottom - tab_rect.top - th) / 2;
        draw_text_simple(hdc, name, text_x, text_y, text_color, fonts.small_bold);

        state.tab_rects[i] = tab_rect;
    }

    bar_rect.bottom
}

/// Draws a slider track, fill, and thumb, and updates the hit rects on the
/// state. Returns the y just below the track.
fn draw_slider(hdc: HDC, slider: &mut SliderState, left: i32, right: i32, y: i32, accent: COLORREF) -> i32 {
    let track_h = 8;
    let thumb_r = 8;

    slider.rect = RECT {
        left,
        top: y,
        right,
        bottom: y + track_h,
    };
    draw_rounded_rect(hdc, &slider.rect, 4, CLR_SECONDARY, CLR_SECONDARY);

    let fill_w =
        ((slider.value as f32 / slider.max as f32) * (right - left) as f32) as i32;
    if fill_w > 0 {
        let fill_rect = RECT {
            left,
            top: y,
            right: left + fill_w,
            bottom: y + track_h,
        };
        draw_rounded_rect(hdc, &fill_rect, 4, accent, accent);
    }

    draw_circle(hdc, slider.thumb_x(), y + track_h / 2, thumb_r, CLR_FOREGROUND);

    slider.thumb_rect = RECT {
        left: left - thumb_r,
        top: y - thumb_r - 4,
        right: right + thumb_r,
        bottom: y + track_h + thumb_r + 4,
    };

    y + track_h
}

fn draw_dimmer_tab(hdc: HDC, y: i32, state: &mut UiState, fonts: &Fonts) {
    let x = PADDING;
    let inner_x = x + 16;
    let inner_right = x + CONTENT_WIDTH - 16;

    // Card 1: overlay on/off
    let card1 = RECT {
        left: x,
        top: y,
        right: x + CONTENT_WIDTH,
        bottom: y + 56,
    };
    draw_rounded_rect(hdc, &card1, CARD_RADIUS, CLR_BACKGROUND, CLR_BORDER);

    draw_text_simple(hdc, "Overlay", inner_x, y + 10, CLR_FOREGROUND, fonts.small_bold);
    draw_text_simple(
        hdc,
        "Dim everything behind the active window",
        inner_x,
        y + 28,
        CLR_MUTED_FG,
        fonts.xs,
    );
    state.visible_toggle.rect =
        draw_toggle(hdc, inner_right - 44, y + 16, state.visible_toggle.checked);

    // Card 2: opacity
    let card2_top = card1.bottom + GAP;
    let card2 = RECT {
        left: x,
        top: card2_top,
        right: x + CONTENT_WIDTH,
        bottom: card2_top + 100,
    };
    draw_rounded_rect(hdc, &card2, CARD_RADIUS, CLR_BACKGROUND, CLR_BORDER);

    draw_text_simple(
        hdc,
        "Opacity",
        inner_x,
        card2_top + 14,
        CLR_FOREGROUND,
        fonts.small_bold,
    );

    // Percent badge
    let badge_text = format!("{}%", state.opacity_slider.value);
    let (bw, bh) = measure_text(hdc, &badge_text, fonts.xs);
    let badge_w = bw + 20;
    let badge_h = bh + 4;
    let badge_x = inner_right - badge_w;
    let badge_y = card2_top + 12;
    let badge_rect = RECT {
        left: badge_x,
        top: badge_y,
        right: badge_x + badge_w,
        bottom: badge_y + badge_h,
    };
    draw_rounded_rect(hdc, &badge_rect, badge_h / 2, CLR_BRAND, CLR_BRAND);
    draw_text_simple(
        hdc,
        &badge_text,
        badge_x + (badge_w - bw) / 2,
        badge_y + (badge_h - bh) / 2,
        CLR_BACKGROUND,
        fonts.xs,
    );

    let slider_y = card2_top + 48;
    let track_bottom = draw_slider(
        hdc,
        &mut state.opacity_slider,
        inner_x,
        inner_right,
        slider_y,
        CLR_BRAND,
    );

    draw_text_simple(hdc, "0%", inner_x, track_bottom + 6, CLR_MUTED_FG, fonts.xxs);
    draw_text_right(
        hdc,
        "100%",
        inner_right,
        track_bottom + 6,
        CLR_MUTED_FG,
        fonts.xxs,
    );
}

fn draw_tint_tab(hdc: HDC, y: i32, state: &mut UiState, fonts: &Fonts) {
    let x = PADDING;
    let inner_x = x + 16;
    let inner_right = x + CONTENT_WIDTH - 16;

    let card = RECT {
        left: x,
        top: y,
        right: x + CONTENT_WIDTH,
        bottom: y + 248,
    };
    draw_rounded_rect(hdc, &card, CARD_RADIUS, CLR_BACKGROUND, CLR_BORDER);

    draw_text_simple(hdc, "Tint color", inner_x, y + 14, CLR_FOREGROUND, fonts.small_bold);
    draw_text_simple(
        hdc,
        "Color of the dimming layer",
        inner_x,
        y + 32,
        CLR_MUTED_FG,
        fonts.xs,
    );

    let mut row_y = y + 60;
    for i in 0..3 {
        draw_text_simple(
            hdc,
            CHANNEL_LABELS[i],
            inner_x,
            row_y,
            CLR_FOREGROUND,
            fonts.xs,
        );
        let value_text = state.channel_sliders[i].value.to_string();
        draw_text_right(hdc, &value_text, inner_right, row_y, CLR_MUTED_FG, fonts.mono);

        draw_slider(
            hdc,
            &mut state.channel_sliders[i],
            inner_x,
            inner_right,
            row_y + 18,
            CHANNEL_ACCENTS[i],
        );
        row_y += 48;
    }

    // Swatch previewing the mixed tint
    let swatch_color = COLORREF(
        state.channel_sliders[0].value as u32
            | (state.channel_sliders[1].value as u32) << 8
            | (state.channel_sliders[2].value as u32) << 16,
    );
    let swatch = RECT {
        left: inner_x,
        top: row_y,
        right: inner_right,
        bottom: row_y + 28,
    };
    draw_rounded_rect(hdc, &swatch, CARD_RADIUS - 2, swatch_color, CLR_MUTED_FG);
}

fn draw_settings_tab(hdc: HDC, y: i32, state: &mut UiState, fonts: &Fonts) {
    let x = PADDING;
    let inner_x = x + 16;
    let inner_right = x + CONTENT_WIDTH - 16;

    // Card 1: general
    let card1 = RECT {
        left: x,
        top: y,
        right: x + CONTENT_WIDTH,
        bottom: y + 80,
    };
    draw_rounded_rect(hdc, &card1, CARD_RADIUS, CLR_BACKGROUND, CLR_BORDER);

    draw_text_simple(hdc, "General", inner_x, y + 12, CLR_FOREGROUND, fonts.small_bold);
    draw_text_simple(
        hdc,
        "Start with Windows",
        inner_x,
        y + 36,
        CLR_FOREGROUND,
        fonts.small_bold,
    );
    draw_text_simple(
        hdc,
        "Launch Aura when you sign in",
        inner_x,
        y + 52,
        CLR_MUTED_FG,
        fonts.xs,
    );
    state.autostart_toggle.rect =
        draw_toggle(hdc, inner_right - 44, y + 40, state.autostart_toggle.checked);

    // Card 2: shortcuts
    let card2_top = card1.bottom + GAP;
    let card2 = RECT {
        left: x,
        top: card2_top,
        right: x + CONTENT_WIDTH,
        bottom: card2_top + 150,
    };
    draw_rounded_rect(hdc, &card2, CARD_RADIUS, CLR_BACKGROUND, CLR_BORDER);

    draw_text_simple(
        hdc,
        "Keyboard shortcuts",
        inner_x,
        card2_top + 14,
        CLR_FOREGROUND,
        fonts.small_bold,
    );

    for (i, (label, key)) in SHORTCUT_ROWS.iter().enumerate() {
        let row_y = card2_top + 44 + (i as i32) * 34;
        draw_text_simple(hdc, label, inner_x, row_y + 2, CLR_MUTED_FG, fonts.small);

        let (kw, kh) = measure_text(hdc, key, fonts.mono);
        let kbd_w = kw + 16;
        let kbd_h = kh + 8;
        let kbd_x = inner_right - kbd_w;
        let kbd_rect = RECT {
            left: kbd_x,
            top: row_y,
            right: kbd_x + kbd_w,
            bottom: row_y + kbd_h,
        };
        draw_rounded_rect(hdc, &kbd_rect, CARD_RADIUS - 2, CLR_SECONDARY, CLR_BORDER);
        draw_text_simple(
            hdc,
            key,
            kbd_x + (kbd_w - kw) / 2,
            row_y + (kbd_h - kh) / 2,
            CLR_MUTED_FG,
            fonts.mono,
        );
    }
}

fn draw_toggle(hdc: HDC, x: i32, y: i32, checked: bool) -> RECT {
    let w = 44;
    let h = 24;
    let rect = RECT {
        left: x,
        top: y,
        right: x + w,
        bottom: y + h,
    };

    let track_color = if checked { CLR_BRAND } else { CLR_INPUT };
    draw_rounded_rect(hdc, &rect, h / 2, track_color, track_color);

    let thumb_r = 10;
    let thumb_x = if checked {
        x + w - 2 - thumb_r
    } else {
        x + 2 + thumb_r
    };
    draw_circle(hdc, thumb_x, y + h / 2, thumb_r, CLR_FOREGROUND);

    rect
}

fn draw_toast(hdc: HDC, client: &RECT, state: &UiState, fonts: &Fonts) {
    let msg = &state.toast_message;
    if msg.is_empty() {
        return;
    }

    let (tw, th) = measure_text(hdc, msg, fonts.small_bold);
    let toast_w = tw + 48;
    let toast_h = th + 24;
    let toast_x = (client.right - toast_w) / 2;
    let toast_y = client.bottom - toast_h - 24;

    let toast_rect = RECT {
        left: toast_x,
        top: toast_y,
        right: toast_x + toast_w,
        bottom: toast_y + toast_h,
    };
    draw_rounded_rect(hdc, &toast_rect, CARD_RADIUS, CLR_FOREGROUND, CLR_FOREGROUND);
    draw_text_simple(
        hdc,
        msg,
        toast_x + (toast_w - tw) / 2,
        toast_y + (toast_h - th) / 2,
        CLR_BACKGROUND,
        fonts.small_bold,
    );
}
