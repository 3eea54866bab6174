use bon::Builder;

/// Color representation for dial elements
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Color {
    pub r: u8,
    pub g: u8,
    pub b: u8,
}

impl Color {
    pub const fn new(r: u8, g: u8, b: u8) -> Self {
        Self { r, g, b }
    }

    pub const fn as_tuple(self) -> (u8, u8, u8) {
        (self.r, self.g, self.b)
    }

    /// Linear interpolation between two colors, `t` in [0, 1].
    pub fn lerp(start: Self, end: Self, t: f64) -> Self {
        let mix = |a: u8, b: u8| (f64::from(a) + (f64::from(b) - f64::from(a)) * t).round() as u8;
        Self::new(
            mix(start.r, end.r),
            mix(start.g, end.g),
            mix(start.b, end.b),
        )
    }
}

/// Slider configuration - colors and geometry are fixed once the widget is built
#[derive(Debug, Clone, Builder)]
pub struct SliderConfig {
    #[builder(default = "ringdial".to_string())]
    pub title: String,

    // Window configuration; the window bounds double as the widget bounds
    #[builder(default = 300)]
    pub window_width: usize,
    #[builder(default = 300)]
    pub window_height: usize,
    #[builder(default = 60.0)]
    pub max_framerate: f64,

    // Track geometry
    #[builder(default = 60.0)]
    pub safe_padding: f64,
    #[builder(default = 40.0)]
    pub line_width: f64,
    #[builder(default = 72.0)]
    pub ring_width: f64,

    // Gradient endpoints: top color first, bottom color second
    #[builder(default = Color::new(0x00, 0x00, 0xff))]
    pub start_color: Color,
    #[builder(default = Color::new(0x80, 0x00, 0x80))]
    pub end_color: Color,

    #[builder(default = Color::new(0x20, 0x20, 0x20))]
    pub background_color: Color,
    #[builder(default = Color::new(0x00, 0x00, 0x00))]
    pub ring_color: Color,

    // Handle appearance
    #[builder(default = 0.7)]
    pub handle_alpha: f32,
    #[builder(default = 3.0)]
    pub handle_shadow_blur: f64,

    // Readout configuration; without font data the text readout is skipped
    #[builder(default = 40.0)]
    pub readout_font_size: f32,
    pub font_data: Option<Vec<u8>>,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn lerp_endpoints() {
        let a = Color::new(0, 0, 255);
        let b = Color::new(128, 0, 128);
        assert_eq!(Color::lerp(a, b, 0.0), a);
        assert_eq!(Color::lerp(a, b, 1.0), b);
    }

    #[test]
    fn lerp_midpoint_rounds() {
        let a = Color::new(0, 10, 255);
        let b = Color::new(128, 10, 128);
        let mid = Color::lerp(a, b, 0.5);
        assert_eq!(mid, Color::new(64, 10, 192));
    }

    #[test]
    fn builder_defaults_match_widget_constants() {
        let config = SliderConfig::builder().build();
        assert_eq!(config.window_width, 300);
        assert_eq!(config.window_height, 300);
        assert_eq!(config.safe_padding, 60.0);
        assert_eq!(config.line_width, 40.0);
        assert_eq!(config.ring_width, 72.0);
        assert!(config.font_data.is_none());
    }
}
