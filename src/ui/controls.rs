// UI control state tracking and hit-testing

use windows::Win32::Foundation::RECT;

/// Which tab is active
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Tab {
    Dimmer = 0,
    Tint = 1,
    Settings = 2,
}

/// State for a toggle switch control
#[derive(Debug, Clone)]
pub struct ToggleState {
    pub checked: bool,
    pub rect: RECT,
}

impl ToggleState {
    pub fn new(checked: bool) -> Self {
        Self {
            checked,
            rect: RECT::default(),
        }
    }
}

/// State for a horizontal slider with an inclusive 0..=max range
#[derive(Debug, Clone)]
pub struct SliderState {
    pub value: i32,
    pub max: i32,
    pub dragging: bool,
    pub rect: RECT,       // full track rect
    pub thumb_rect: RECT, // thumb hit area
}

impl SliderState {
    pub fn new(value: i32, max: i32) -> Self {
        Self {
            value: value.clamp(0, max),
            max,
            dragging: false,
            rect: RECT::default(),
            thumb_rect: RECT::default(),
        }
    }

    /// Get x position of the slider thumb based on current value
    pub fn thumb_x(&self) -> i32 {
        let track_width = self.rect.right - self.rect.left;
        self.rect.left + (self.value as f32 / self.max as f32 * track_width as f32) as i32
    }

    /// Calculate value from an x position within the slider track
    pub fn value_from_x(&self, x: i32) -> i32 {
        let track_width = self.rect.right - self.rect.left;
        if track_width <= 0 {
            return self.value;
        }
        let rel_x = (x - self.rect.left).clamp(0, track_width);
        ((rel_x as f32 / track_width as f32) * self.max as f32).round() as i32
    }
}

/// Complete UI state
pub struct UiState {
    pub active_tab: Tab,
    pub tab_rects: [RECT; 3],
    pub tab_bar_rect: RECT,

    // Dimmer tab
    pub visible_toggle: ToggleState,
    pub opacity_slider: SliderState, // percent, 0..=100

    // Tint tab, one slider per channel in R/G/B order
    pub channel_sliders: [SliderState; 3],

    // Settings tab
    pub autostart_toggle: ToggleState,

    // Toast
    pub toast_message: String,
    pub toast_visible: bool,
}

impl UiState {
    pub fn new() -> Self {
        Self {
            active_tab: Tab::Dimmer,
            tab_rects: [RECT::default(); 3],
            tab_bar_rect: RECT::default(),

            visible_toggle: ToggleState::new(true),
            opacity_slider: SliderState::new(50, 100),

            channel_sliders: [
                SliderState::new(0, 255),
                SliderState::new(0, 255),
                SliderState::new(0, 255),
            ],

            autostart_toggle: ToggleState::new(false),

            toast_message: String::new(),
            toast_visible: false,
        }
    }

    /// The slider currently being dragged, if any
    pub fn dragging_slider(&mut self) -> Option<&mut SliderState> {
        if self.opacity_slider.dragging {
            return Some(&mut self.opacity_slider);
        }
        self.channel_sliders.iter_mut().find(|s| s.dragging)
    }
}

/// Check if a point is inside a rect
pub fn point_in_rect(x: i32, y: i32, r: &RECT) -> bool {
    x >= r.left && x < r.right && y >= r.top && y < r.bottom
}

#[cfg(test)]
mod tests {
    use super::*;

    fn slider_with_track(max: i32, left: i32, right: i32) -> SliderState {
        let mut s = SliderState::new(0, max);
        s.rect = RECT {
            left,
            top: 0,
            right,
            bottom: 8,
        };
        s
    }

    #[test]
    fn new_slider_clamps_initial_value() {
        assert_eq!(SliderState::new(300, 255).value, 255);
        assert_eq!(SliderState::new(-5, 100).value, 0);
    }

    #[test]
    fn value_from_x_spans_the_range() {
        let s = slider_with_track(100, 10, 110);
        assert_eq!(s.value_from_x(10), 0);
        assert_eq!(s.value_from_x(60), 50);
        assert_eq!(s.value_from_x(110), 100);
        // Outside the track clamps to the ends
        assert_eq!(s.value_from_x(-40), 0);
        assert_eq!(s.value_from_x(500), 100);
    }

    #[test]
    fn value_from_x_handles_channel_range() {
        let s = slider_with_track(255, 0, 255);
        assert_eq!(s.value_from_x(0), 0);
        assert_eq!(s.value_from_x(255), 255);
        assert_eq!(s.value_from_x(128), 128);
    }

    #[test]
    fn degenerate_track_keeps_current_value() {
        let mut s = slider_with_track(100, 50, 50);
        s.value = 42;
        assert_eq!(s.value_from_x(10), 42);
    }

    #[test]
    fn point_in_rect_excludes_right_and_bottom_edges() {
        let r = RECT {
            left: 0,
            top: 0,
            right: 10,
            bottom: 10,
        };
        assert!(point_in_rect(0, 0, &r));
        assert!(point_in_rect(9, 9, &r));
        assert!(!point_in_rect(10, 9, &r));
        assert!(!point_in_rect(9, 10, &r));
    }

    #[test]
    fn dragging_slider_finds_the_active_one() {
        let mut ui = UiState::new();
        assert!(ui.dragging_slider().is_none());

        ui.channel_sliders[2].dragging = true;
        ui.dragging_slider().unwrap().value = 77;
        assert_eq!(ui.channel_sliders[2].value, 77);
    }
}
