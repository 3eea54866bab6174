// ============================================================================
// CRATE CONFIGURATION & IMPORTS
// ============================================================================

// External crate imports
use pixels::{Pixels, SurfaceTexture};
use rusttype::{Font, Scale};
use thiserror::Error;

// Standard library imports
use std::sync::mpsc::Receiver;
use std::sync::Arc;
use std::time::{Duration, Instant};

// Window management imports
use winit::dpi::LogicalSize;
use winit::event::{ElementState, Event, MouseButton, WindowEvent};
use winit::event_loop::{ControlFlow, EventLoop};
use winit::window::WindowBuilder;

mod config;

pub use config::{Color, SliderConfig};

/// Angle the widget starts at; a full sweep.
const INITIAL_ANGLE: u16 = 360;
/// Upper bound of the stored angle; 0 and 360 meet at the wrap point.
const MAX_ANGLE: u16 = 360;
/// The mask blur radius is `angle / SWEEP_BLUR_DIVISOR`, integer division.
const SWEEP_BLUR_DIVISOR: u16 = 15;

const HANDLE_SHADOW_ALPHA: f32 = 0.35;
const READOUT_TEXT_ALPHA: f32 = 0.8;

// ============================================================================
// ERRORS
// ============================================================================

/// Failures surfaced by the embedded window runner.
#[derive(Debug, Error)]
pub enum SliderError {
    #[error("failed to create window: {0}")]
    Window(#[from] winit::error::OsError),
    #[error("event loop failure: {0}")]
    EventLoop(#[from] winit::error::EventLoopError),
    #[error("pixel surface failure: {0}")]
    Surface(#[from] pixels::Error),
}

// ============================================================================
// GEOMETRY
// ============================================================================

/// A position in the widget's local pixel coordinate space, y pointing down.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Point {
    pub x: f64,
    pub y: f64,
}

impl Point {
    pub const fn new(x: f64, y: f64) -> Self {
        Self { x, y }
    }
}

/// Circle center and track radius, derived once from the widget bounds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CircleGeometry {
    pub cx: f64,
    pub cy: f64,
    pub radius: f64,
}

impl CircleGeometry {
    /// Center is half the bounds; the radius leaves `safe_padding` pixels of
    /// clearance to the nearest edge.
    pub fn from_bounds(width: usize, height: usize, safe_padding: f64) -> Self {
        Self {
            cx: width as f64 / 2.0,
            cy: height as f64 / 2.0,
            radius: width.min(height) as f64 / 2.0 - safe_padding,
        }
    }

    pub fn center(&self) -> Point {
        Point::new(self.cx, self.cy)
    }

    /// Point on the circumference for a widget-convention angle. The negation
    /// inside the trig calls converts the clockwise sweep back into the
    /// standard counter-clockwise-from-east orientation for plotting.
    pub fn handle_center(&self, angle: u16) -> Point {
        let theta = (-f64::from(angle)).to_radians();
        Point::new(
            (self.radius * theta.cos()).round() + self.cx,
            (self.radius * theta.sin()).round() + self.cy,
        )
    }
}

// ============================================================================
// ANGLE RESOLUTION
// ============================================================================

/// Direction in degrees from north (straight up) to `pointer`, clockwise,
/// normalized to [0, 360). Returns `None` when the pointer coincides with the
/// center and the direction is undefined.
///
/// The vector is scaled by its squared magnitude squared before `atan2`. That
/// is not a unit normalization; `atan2` only needs the component ratio, so
/// the direction is unchanged for any non-degenerate vector. Kept as observed
/// behavior.
pub fn angle_from_north(center: Point, pointer: Point) -> Option<f64> {
    let mut vx = pointer.x - center.x;
    let mut vy = pointer.y - center.y;
    if vx == 0.0 && vy == 0.0 {
        return None;
    }
    let square = vx * vx + vy * vy;
    let vmag = square * square;
    vx /= vmag;
    vy /= vmag;
    // North-referenced, clockwise with y pointing down.
    let radians = vx.atan2(-vy);
    let degrees = radians.to_degrees();
    Some(if degrees < 0.0 {
        degrees + 360.0
    } else {
        degrees
    })
}

/// Widget-convention angle for a pointer position: the sweep runs counter to
/// the raw direction, so a direction of 10 degrees stores 350 and vice versa.
/// Result is in [0, 360); the wrap point 360 comes out as 0.
pub fn sweep_angle(center: Point, pointer: Point) -> Option<u16> {
    angle_from_north(center, pointer).map(|direction| ((360.0 - direction.floor()) as u16) % 360)
}

// ============================================================================
// HOST INTERFACE
// ============================================================================

/// Capabilities the host supplies to the widget. Both default to no-ops so a
/// host only implements what it consumes.
pub trait SliderHost {
    /// Fired synchronously on every successful angle update.
    fn on_value_changed(&mut self, _angle: u16) {}
    /// The widget has changed and wants a fresh frame.
    fn request_redraw(&mut self) {}
}

/// Command enum for driving the slider from another thread
#[derive(Debug, Clone)]
pub enum SliderCommand {
    SetAngle(u16),
}

// ============================================================================
// PUBLIC API - MAIN INTERFACE
// ============================================================================

/// Draggable circular dial. The stored angle is the only mutable state;
/// geometry, colors, and the readout font are fixed at construction.
pub struct CircularSlider {
    config: SliderConfig,
    geometry: CircleGeometry,
    font: Option<Font<'static>>,
    angle: u16,
    readout: String,
    dragging: bool,
}

impl CircularSlider {
    pub fn new(config: SliderConfig) -> Self {
        let geometry = CircleGeometry::from_bounds(
            config.window_width,
            config.window_height,
            config.safe_padding,
        );
        let font = config.font_data.as_ref().and_then(|data| {
            let font = Font::try_from_vec(data.clone());
            if font.is_none() {
                log::warn!("readout font data could not be parsed; text readout disabled");
            }
            font
        });
        Self {
            config,
            geometry,
            font,
            angle: INITIAL_ANGLE,
            readout: INITIAL_ANGLE.to_string(),
            dragging: false,
        }
    }

    pub fn angle(&self) -> u16 {
        self.angle
    }

    pub fn geometry(&self) -> CircleGeometry {
        self.geometry
    }

    pub fn readout_text(&self) -> &str {
        &self.readout
    }

    /// Pointer-down lifecycle hook; arms the drag.
    pub fn begin_drag(&mut self, _pointer: Point) {
        self.dragging = true;
    }

    /// Pointer-up lifecycle hook; disarms the drag.
    pub fn end_drag(&mut self, _pointer: Point) {
        self.dragging = false;
    }

    /// Resolve a pointer position into an angle update. Ignored outside an
    /// active drag. A pointer exactly on the center has no direction and
    /// leaves the current angle untouched.
    pub fn drag_to(&mut self, pointer: Point, host: &mut dyn SliderHost) {
        if !self.dragging {
            return;
        }
        match sweep_angle(self.geometry.center(), pointer) {
            Some(angle) => self.set_angle(angle, host),
            None => log::trace!("pointer on center; keeping angle {}", self.angle),
        }
    }

    /// Explicit setter contract: clamp into [0, 360], store, refresh the
    /// readout, notify the host, request a redraw. Always in that order.
    pub fn set_angle(&mut self, angle: u16, host: &mut dyn SliderHost) {
        self.angle = angle.min(MAX_ANGLE);
        self.readout = self.angle.to_string();
        host.on_value_changed(self.angle);
        host.request_redraw();
    }

    /// Render one frame, back to front: background, ring, masked gradient
    /// arc, handle, readout. When the sweep mask cannot be produced the
    /// gradient and handle stages are skipped and the ring alone stands.
    pub fn draw(&self, canvas: &mut Canvas) {
        canvas.clear(self.config.background_color.as_tuple());
        render_ring(
            canvas,
            self.geometry,
            self.config.ring_width,
            self.config.ring_color,
        );
        match SweepMask::render(
            canvas.width,
            canvas.height,
            self.geometry,
            self.angle,
            self.config.line_width,
        ) {
            Some(mask) => {
                fill_gradient_through_mask(
                    canvas,
                    &mask,
                    self.config.start_color,
                    self.config.end_color,
                );
                render_handle(
                    canvas,
                    self.geometry,
                    self.angle,
                    self.config.line_width,
                    self.config.handle_shadow_blur,
                    self.config.handle_alpha,
                );
            }
            None => log::warn!(
                "sweep mask unavailable for {}x{} bounds; drawing background ring only",
                canvas.width,
                canvas.height
            ),
        }
        if let Some(ref font) = self.font {
            render_readout(
                canvas,
                font,
                &self.readout,
                self.config.readout_font_size,
                self.geometry,
            );
        }
    }
}

// ============================================================================
// CORE DATA TYPES
// ============================================================================

pub struct Canvas<'a> {
    frame: &'a mut [u8],
    width: usize,
    height: usize,
}

impl<'a> Canvas<'a> {
    pub fn new(frame: &'a mut [u8], width: usize, height: usize) -> Self {
        Self {
            frame,
            width,
            height,
        }
    }

    fn clear(&mut self, color: (u8, u8, u8)) {
        for chunk in self.frame.chunks_exact_mut(4) {
            chunk.copy_from_slice(&[color.0, color.1, color.2, 0xff]);
        }
    }
}

// ============================================================================
// RENDER PIPELINE STAGES
// ============================================================================

/// Full 360-degree stroke centered on the track radius.
fn render_ring(canvas: &mut Canvas, geometry: CircleGeometry, stroke_width: f64, color: Color) {
    let half = stroke_width / 2.0;
    for y in 0..canvas.height as i32 {
        for x in 0..canvas.width as i32 {
            let dx = x as f64 - geometry.cx;
            let dy = y as f64 - geometry.cy;
            let dist = (dx * dx + dy * dy).sqrt();
            let aa = (half + 0.5 - (dist - geometry.radius).abs()).clamp(0.0, 1.0);
            if aa > 0.01 {
                set_pixel(
                    canvas.frame,
                    canvas.width,
                    x as usize,
                    y as usize,
                    color.r,
                    color.g,
                    color.b,
                    aa as f32,
                );
            }
        }
    }
}

/// Off-screen coverage buffer for the swept arc. Opaque pixels decide where
/// the gradient shows through; the blur gives the sweep its glow.
pub struct SweepMask {
    width: usize,
    height: usize,
    data: Vec<u8>,
}

impl SweepMask {
    /// Blur radius in pixels for a given angle. Integer division, so the
    /// radius steps up every 15 degrees and is 0 for angles below 15.
    pub fn blur_radius(angle: u16) -> u16 {
        angle / SWEEP_BLUR_DIVISOR
    }

    /// Stroke the arc from sweep 0 up to `angle` into a fresh buffer, then
    /// blur it and lay the crisp stroke back on top, shadow-style. Angle 0 is
    /// the wrap point and renders like a full sweep. Returns `None` when the
    /// bounds are empty or the radius is not positive; the caller degrades to
    /// a background-only frame.
    pub fn render(
        width: usize,
        height: usize,
        geometry: CircleGeometry,
        angle: u16,
        stroke_width: f64,
    ) -> Option<Self> {
        if width == 0 || height == 0 || geometry.radius <= 0.0 {
            return None;
        }
        let span = if angle == 0 { MAX_ANGLE } else { angle.min(MAX_ANGLE) };
        let half = stroke_width / 2.0;
        let mut data = vec![0u8; width * height];
        for y in 0..height {
            for x in 0..width {
                let dx = x as f64 - geometry.cx;
                let dy = y as f64 - geometry.cy;
                let dist = (dx * dx + dy * dy).sqrt();
                let radial = half + 0.5 - (dist - geometry.radius).abs();
                if radial <= 0.0 {
                    continue;
                }
                let mut phi = dy.atan2(dx).to_degrees();
                if phi < 0.0 {
                    phi += 360.0;
                }
                // The pixel's own widget-convention angle; inside the sweep
                // when it does not exceed the stored angle.
                let sweep = (360.0 - phi) % 360.0;
                if sweep <= f64::from(span) {
                    data[y * width + x] = (radial.min(1.0) * 255.0) as u8;
                }
            }
        }
        let blur = usize::from(Self::blur_radius(angle));
        if blur > 0 {
            let mut halo = data.clone();
            // Two box passes stand in for a Gaussian.
            box_blur(&mut halo, width, height, blur);
            box_blur(&mut halo, width, height, blur);
            for (soft, &crisp) in halo.iter_mut().zip(&data) {
                *soft = (*soft).max(crisp);
            }
            data = halo;
        }
        Some(Self {
            width,
            height,
            data,
        })
    }

    /// Coverage at a pixel, 0 outside the buffer.
    pub fn coverage(&self, x: usize, y: usize) -> u8 {
        if x < self.width && y < self.height {
            self.data[y * self.width + x]
        } else {
            0
        }
    }
}

/// Separable box blur over a single-channel buffer, zero outside the edges.
fn box_blur(data: &mut [u8], width: usize, height: usize, radius: usize) {
    if radius == 0 || data.is_empty() {
        return;
    }
    let window = (2 * radius + 1) as u32;
    let mut scratch = vec![0u8; data.len()];
    for y in 0..height {
        let row = y * width;
        let mut sum: u32 = 0;
        for x in 0..width.min(radius + 1) {
            sum += u32::from(data[row + x]);
        }
        for x in 0..width {
            scratch[row + x] = (sum / window) as u8;
            let add = x + radius + 1;
            if add < width {
                sum += u32::from(data[row + add]);
            }
            if x >= radius {
                sum -= u32::from(data[row + x - radius]);
            }
        }
    }
    for x in 0..width {
        let mut sum: u32 = 0;
        for y in 0..height.min(radius + 1) {
            sum += u32::from(scratch[y * width + x]);
        }
        for y in 0..height {
            data[y * width + x] = (sum / window) as u8;
            let add = y + radius + 1;
            if add < height {
                sum += u32::from(scratch[add * width + x]);
            }
            if y >= radius {
                sum -= u32::from(scratch[(y - radius) * width + x]);
            }
        }
    }
}

/// Vertical linear gradient across the full bounds, drawn through the mask's
/// coverage as per-pixel alpha. The clip is what turns one rectangular
/// gradient into a gradient-colored arc.
fn fill_gradient_through_mask(canvas: &mut Canvas, mask: &SweepMask, start: Color, end: Color) {
    if canvas.height == 0 {
        return;
    }
    for y in 0..canvas.height {
        let t = if canvas.height > 1 {
            y as f64 / (canvas.height - 1) as f64
        } else {
            0.0
        };
        let color = Color::lerp(start, end, t);
        for x in 0..canvas.width {
            let coverage = mask.coverage(x, y);
            if coverage > 0 {
                set_pixel(
                    canvas.frame,
                    canvas.width,
                    x,
                    y,
                    color.r,
                    color.g,
                    color.b,
                    f32::from(coverage) / 255.0,
                );
            }
        }
    }
}

/// Semi-transparent white disc with a soft shadow, sitting on the
/// circumference at the current angle. Drawn after the gradient so the mask
/// clip never affects it.
fn render_handle(
    canvas: &mut Canvas,
    geometry: CircleGeometry,
    angle: u16,
    line_width: f64,
    shadow_blur: f64,
    alpha: f32,
) {
    let center = geometry.handle_center(angle);
    let radius = line_width / 2.0;
    draw_disc(
        canvas,
        center,
        radius,
        (0x00, 0x00, 0x00),
        HANDLE_SHADOW_ALPHA,
        shadow_blur.max(1.0),
    );
    draw_disc(canvas, center, radius, (0xff, 0xff, 0xff), alpha, 1.0);
}

/// Angle string centered in the dial.
fn render_readout(
    canvas: &mut Canvas,
    font: &Font,
    text: &str,
    font_size: f32,
    geometry: CircleGeometry,
) {
    let scale = Scale::uniform(font_size);
    draw_text(
        canvas,
        geometry.cx as i32,
        geometry.cy as i32,
        text,
        font,
        scale,
        (0xff, 0xff, 0xff),
        READOUT_TEXT_ALPHA,
    );
}

// ============================================================================
// WINDOW RUNNER
// ============================================================================

/// Host wiring for the embedded runner; collects redraw requests so the event
/// loop can forward them to the window.
#[derive(Default)]
struct WindowHost {
    redraw: bool,
}

impl SliderHost for WindowHost {
    fn on_value_changed(&mut self, angle: u16) {
        log::debug!("angle changed to {angle}");
    }

    fn request_redraw(&mut self) {
        self.redraw = true;
    }
}

impl CircularSlider {
    /// Open a window and run interactively: left mouse button drags the
    /// handle around the track. Blocks until the window closes.
    pub fn show(&mut self) -> Result<(), SliderError> {
        self.run_window(None)
    }

    /// Like [`show`](Self::show), additionally draining `SliderCommand`s from
    /// another thread once per frame at the configured max framerate.
    pub fn show_with_commands(
        &mut self,
        receiver: Receiver<SliderCommand>,
    ) -> Result<(), SliderError> {
        self.run_window(Some(receiver))
    }

    fn run_window(&mut self, receiver: Option<Receiver<SliderCommand>>) -> Result<(), SliderError> {
        let title = self.config.title.clone();
        let width = self.config.window_width;
        let height = self.config.window_height;
        let frame_duration = Duration::from_secs_f64(1.0 / self.config.max_framerate);
        // Command mode polls at the frame rate; interactive mode sleeps until
        // input arrives.
        let paced = receiver.is_some();

        let event_loop = EventLoop::new()?;
        let window = WindowBuilder::new()
            .with_title(&title)
            .with_inner_size(LogicalSize::new(width as f64, height as f64))
            .with_resizable(false)
            .build(&event_loop)?;
        let window = Arc::new(window);
        let window_clone = window.clone();

        let size = window.inner_size();
        let surface_texture = SurfaceTexture::new(size.width, size.height, &window);
        let mut pixels = Pixels::new(width as u32, height as u32, surface_texture)?;

        let mut host = WindowHost::default();
        let mut cursor = Point::new(0.0, 0.0);
        let mut last_frame = Instant::now();

        event_loop.run(move |event, window_target| {
            window_target.set_control_flow(if paced {
                ControlFlow::Poll
            } else {
                ControlFlow::Wait
            });
            match event {
                Event::Resumed => window_clone.request_redraw(),
                Event::WindowEvent { event, .. } => match event {
                    WindowEvent::CloseRequested => {
                        window_target.exit();
                    }
                    WindowEvent::Resized(new_size) => {
                        let _ = pixels.resize_surface(new_size.width, new_size.height);
                    }
                    WindowEvent::CursorMoved { position, .. } => {
                        let pos = pixels
                            .window_pos_to_pixel((position.x as f32, position.y as f32))
                            .unwrap_or_else(|outside| pixels.clamp_pixel_pos(outside));
                        cursor = Point::new(pos.0 as f64, pos.1 as f64);
                        self.drag_to(cursor, &mut host);
                    }
                    WindowEvent::MouseInput {
                        state: ElementState::Pressed,
                        button: MouseButton::Left,
                        ..
                    } => self.begin_drag(cursor),
                    WindowEvent::MouseInput {
                        state: ElementState::Released,
                        button: MouseButton::Left,
                        ..
                    } => self.end_drag(cursor),
                    WindowEvent::RedrawRequested => {
                        if let Some(ref receiver) = receiver {
                            while let Ok(command) = receiver.try_recv() {
                                match command {
                                    SliderCommand::SetAngle(value) => {
                                        self.set_angle(value, &mut host)
                                    }
                                }
                            }
                        }
                        host.redraw = false;
                        let frame = pixels.frame_mut();
                        let mut canvas = Canvas::new(frame, width, height);
                        self.draw(&mut canvas);
                        let _ = pixels.render();
                    }
                    _ => {}
                },
                Event::AboutToWait => {
                    if paced {
                        if last_frame.elapsed() >= frame_duration {
                            window_clone.request_redraw();
                            last_frame = Instant::now();
                        }
                    } else if host.redraw {
                        window_clone.request_redraw();
                    }
                }
                _ => {}
            }
        })?;

        Ok(())
    }
}

// ============================================================================
// DRAWING PRIMITIVES
// ============================================================================

fn set_pixel(frame: &mut [u8], width: usize, x: usize, y: usize, r: u8, g: u8, b: u8, alpha: f32) {
    if x < width && y < frame.len() / (width * 4) {
        let idx = (y * width + x) * 4;
        let src = [r as f32, g as f32, b as f32, 255.0 * alpha];
        let dst = [
            frame[idx] as f32,
            frame[idx + 1] as f32,
            frame[idx + 2] as f32,
            frame[idx + 3] as f32,
        ];
        let a = src[3] / 255.0;
        let out = [
            (src[0] * a + dst[0] * (1.0 - a)).round() as u8,
            (src[1] * a + dst[1] * (1.0 - a)).round() as u8,
            (src[2] * a + dst[2] * (1.0 - a)).round() as u8,
            0xff,
        ];
        frame[idx..idx + 4].copy_from_slice(&out);
    }
}

fn draw_disc(
    canvas: &mut Canvas,
    center: Point,
    radius: f64,
    color: (u8, u8, u8),
    alpha: f32,
    edge: f64,
) {
    let reach = radius + edge;
    let min_x = (center.x - reach).floor() as i32;
    let max_x = (center.x + reach).ceil() as i32;
    let min_y = (center.y - reach).floor() as i32;
    let max_y = (center.y + reach).ceil() as i32;
    for y in min_y..=max_y {
        for x in min_x..=max_x {
            if x < 0 || y < 0 {
                continue;
            }
            let dx = x as f64 - center.x;
            let dy = y as f64 - center.y;
            let dist = (dx * dx + dy * dy).sqrt();
            let coverage = ((reach - dist) / edge).clamp(0.0, 1.0);
            if coverage > 0.01 {
                set_pixel(
                    canvas.frame,
                    canvas.width,
                    x as usize,
                    y as usize,
                    color.0,
                    color.1,
                    color.2,
                    coverage as f32 * alpha,
                );
            }
        }
    }
}

fn draw_text(
    canvas: &mut Canvas,
    x: i32,
    y: i32,
    text: &str,
    font: &Font,
    scale: Scale,
    color: (u8, u8, u8),
    alpha: f32,
) {
    use rusttype::{point, PositionedGlyph};
    let v_metrics = font.v_metrics(scale);
    let glyphs: Vec<PositionedGlyph> = font
        .layout(text, scale, point(0.0, v_metrics.ascent))
        .collect();
    let (min_x, max_x, min_y, max_y) = glyphs.iter().filter_map(|g| g.pixel_bounding_box()).fold(
        (i32::MAX, i32::MIN, i32::MAX, i32::MIN),
        |(min_x, max_x, min_y, max_y), bb| {
            (
                min_x.min(bb.min.x),
                max_x.max(bb.max.x),
                min_y.min(bb.min.y),
                max_y.max(bb.max.y),
            )
        },
    );
    let width_px = if min_x < max_x { max_x - min_x } else { 0 };
    let height_px = if min_y < max_y { max_y - min_y } else { 0 };
    let offset_x = x - width_px / 2;
    let offset_y = y - height_px / 2;
    for glyph in glyphs {
        if let Some(bb) = glyph.pixel_bounding_box() {
            glyph.draw(|gx, gy, v| {
                let px = offset_x + gx as i32 + bb.min.x - min_x;
                let py = offset_y + gy as i32 + bb.min.y - min_y;
                if px >= 0 && px < canvas.width as i32 && py >= 0 && py < canvas.height as i32 {
                    set_pixel(
                        canvas.frame,
                        canvas.width,
                        px as usize,
                        py as usize,
                        color.0,
                        color.1,
                        color.2,
                        v * alpha,
                    );
                }
            });
        }
    }
}

// ============================================================================
// TESTS
// ============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Default)]
    struct RecordingHost {
        changes: Vec<u16>,
        redraws: usize,
    }

    impl SliderHost for RecordingHost {
        fn on_value_changed(&mut self, angle: u16) {
            self.changes.push(angle);
        }

        fn request_redraw(&mut self) {
            self.redraws += 1;
        }
    }

    fn test_slider() -> CircularSlider {
        CircularSlider::new(SliderConfig::builder().build())
    }

    fn render_frame(slider: &CircularSlider) -> Vec<u8> {
        let (width, height) = (slider.config.window_width, slider.config.window_height);
        let mut frame = vec![0u8; width * height * 4];
        let mut canvas = Canvas::new(&mut frame, width, height);
        slider.draw(&mut canvas);
        frame
    }

    /// Pointer at `degrees` clockwise from north, `radius` pixels out.
    fn pointer_at(center: Point, degrees: f64, radius: f64) -> Point {
        let rad = degrees.to_radians();
        Point::new(center.x + radius * rad.sin(), center.y - radius * rad.cos())
    }

    #[test]
    fn initial_state_is_full_sweep() {
        let slider = test_slider();
        assert_eq!(slider.angle(), 360);
        assert_eq!(slider.readout_text(), "360");
    }

    #[test]
    fn resolver_direction_always_normalized() {
        let center = Point::new(150.0, 150.0);
        for step in 0..52 {
            let degrees = f64::from(step) * 7.0;
            for radius in [0.75, 12.0, 240.0] {
                let pointer = pointer_at(center, degrees, radius);
                let direction = angle_from_north(center, pointer).unwrap();
                assert!(
                    (0.0..360.0).contains(&direction),
                    "direction {direction} out of range for {degrees} deg at {radius} px"
                );
                let angle = sweep_angle(center, pointer).unwrap();
                assert!(angle < 360);
            }
        }
    }

    #[test]
    fn resolver_rejects_zero_vector() {
        let center = Point::new(150.0, 150.0);
        assert!(angle_from_north(center, center).is_none());
        assert!(sweep_angle(center, center).is_none());
    }

    #[test]
    fn resolver_compass_convention() {
        let center = Point::new(150.0, 150.0);
        let above = Point::new(150.0, 50.0);
        let right = Point::new(250.0, 150.0);
        let below = Point::new(150.0, 250.0);
        let left = Point::new(50.0, 150.0);
        assert_eq!(sweep_angle(center, above), Some(0));
        assert_eq!(sweep_angle(center, right), Some(270));
        assert_eq!(sweep_angle(center, below), Some(180));
        assert_eq!(sweep_angle(center, left), Some(90));
    }

    #[test]
    fn resolver_inverts_direction() {
        let center = Point::new(150.0, 150.0);
        let pointer = pointer_at(center, 10.5, 100.0);
        let direction = angle_from_north(center, pointer).unwrap();
        assert!((direction - 10.5).abs() < 1e-9);
        assert_eq!(sweep_angle(center, pointer), Some(350));
    }

    #[test]
    fn resolver_direction_is_scale_invariant() {
        let center = Point::new(0.0, 0.0);
        let near = angle_from_north(center, Point::new(3.0, -7.0)).unwrap();
        let far = angle_from_north(center, Point::new(3000.0, -7000.0)).unwrap();
        assert!((near - far).abs() < 1e-9);
    }

    #[test]
    fn drag_is_gated_by_begin_and_end() {
        let mut slider = test_slider();
        let mut host = RecordingHost::default();
        let above = Point::new(150.0, 50.0);

        slider.drag_to(above, &mut host);
        assert_eq!(slider.angle(), 360);
        assert!(host.changes.is_empty());

        slider.begin_drag(above);
        slider.drag_to(above, &mut host);
        assert_eq!(slider.angle(), 0);

        slider.end_drag(above);
        slider.drag_to(Point::new(250.0, 150.0), &mut host);
        assert_eq!(slider.angle(), 0);
        assert_eq!(host.changes, vec![0]);
    }

    #[test]
    fn drag_ignores_degenerate_pointer() {
        let mut slider = test_slider();
        let mut host = RecordingHost::default();
        let center = Point::new(150.0, 150.0);

        slider.begin_drag(center);
        slider.drag_to(center, &mut host);
        assert_eq!(slider.angle(), 360);
        assert_eq!(slider.readout_text(), "360");
        assert!(host.changes.is_empty());
        assert_eq!(host.redraws, 0);
    }

    #[test]
    fn drag_updates_state_and_notifies() {
        let mut slider = test_slider();
        let mut host = RecordingHost::default();

        slider.begin_drag(Point::new(150.0, 50.0));
        slider.drag_to(Point::new(150.0, 50.0), &mut host);
        assert_eq!(slider.angle(), 0);
        assert_eq!(slider.readout_text(), "0");
        assert_eq!(host.changes, vec![0]);
        assert_eq!(host.redraws, 1);

        slider.drag_to(Point::new(50.0, 150.0), &mut host);
        assert_eq!(slider.angle(), 90);
        assert_eq!(host.changes, vec![0, 90]);
        assert_eq!(host.redraws, 2);
    }

    #[test]
    fn set_angle_clamps_and_notifies_in_order() {
        let mut slider = test_slider();
        let mut host = RecordingHost::default();

        slider.set_angle(270, &mut host);
        assert_eq!(slider.angle(), 270);
        assert_eq!(slider.readout_text(), "270");
        assert_eq!(host.changes, vec![270]);
        assert_eq!(host.redraws, 1);

        slider.set_angle(400, &mut host);
        assert_eq!(slider.angle(), 360);
        assert_eq!(host.changes, vec![270, 360]);
    }

    #[test]
    fn handle_sits_on_circumference() {
        let geometry = CircleGeometry::from_bounds(300, 300, 60.0);
        assert_eq!(geometry.radius, 90.0);
        assert_eq!(geometry.handle_center(0), Point::new(240.0, 150.0));
        assert_eq!(geometry.handle_center(90), Point::new(150.0, 60.0));
        assert_eq!(geometry.handle_center(180), Point::new(60.0, 150.0));
        assert_eq!(geometry.handle_center(270), Point::new(150.0, 240.0));
        assert_eq!(geometry.handle_center(360), Point::new(240.0, 150.0));
    }

    #[test]
    fn blur_radius_scales_with_angle() {
        assert_eq!(SweepMask::blur_radius(0), 0);
        assert_eq!(SweepMask::blur_radius(14), 0);
        assert_eq!(SweepMask::blur_radius(29), 1);
        assert_eq!(SweepMask::blur_radius(360), 24);
        for angle in 0..360 {
            assert!(SweepMask::blur_radius(angle) <= SweepMask::blur_radius(angle + 1));
        }
    }

    #[test]
    fn mask_requires_real_bounds() {
        let geometry = CircleGeometry::from_bounds(200, 200, 60.0);
        assert!(SweepMask::render(0, 0, geometry, 90, 40.0).is_none());
        assert!(SweepMask::render(0, 200, geometry, 90, 40.0).is_none());
        let degenerate = CircleGeometry::from_bounds(100, 100, 60.0);
        assert!(degenerate.radius <= 0.0);
        assert!(SweepMask::render(100, 100, degenerate, 90, 40.0).is_none());
    }

    #[test]
    fn mask_covers_only_the_sweep() {
        let geometry = CircleGeometry::from_bounds(200, 200, 60.0);
        let mask = SweepMask::render(200, 200, geometry, 90, 40.0).unwrap();
        // On the track at sweep 45, well inside the arc.
        assert_eq!(mask.coverage(128, 72), 255);
        // Sweep 225 is far beyond both the arc and the blur's reach.
        assert_eq!(mask.coverage(72, 128), 0);
    }

    #[test]
    fn mask_blur_softens_leading_edge() {
        let geometry = CircleGeometry::from_bounds(200, 200, 60.0);
        let mask = SweepMask::render(200, 200, geometry, 180, 40.0).unwrap();
        let core = mask.coverage(128, 72);
        // Just past the leading edge: inside the blur halo, outside the arc.
        let edge = mask.coverage(61, 107);
        assert_eq!(core, 255);
        assert!(edge > 0, "halo missing past the leading edge");
        assert!(edge < core, "halo should be fainter than the arc core");
    }

    #[test]
    fn mask_is_full_at_wrap_boundaries() {
        let geometry = CircleGeometry::from_bounds(200, 200, 60.0);
        let wrapped = SweepMask::render(200, 200, geometry, 0, 40.0).unwrap();
        let full = SweepMask::render(200, 200, geometry, 360, 40.0).unwrap();
        for (x, y) in [(140, 100), (100, 60), (60, 100), (100, 140)] {
            assert_eq!(wrapped.coverage(x, y), 255, "wrap miss at ({x}, {y})");
            assert_eq!(full.coverage(x, y), 255, "full miss at ({x}, {y})");
        }
    }

    #[test]
    fn gradient_fills_masked_pixels_vertically() {
        let slider = test_slider();
        let frame = render_frame(&slider);
        // Top of the track, fully covered by the mask at a full sweep.
        let (x, y) = (150usize, 60usize);
        let idx = (y * 300 + x) * 4;
        let t = y as f64 / 299.0;
        let expected = Color::lerp(
            Color::new(0x00, 0x00, 0xff),
            Color::new(0x80, 0x00, 0x80),
            t,
        );
        for (channel, want) in frame[idx..idx + 3]
            .iter()
            .zip([expected.r, expected.g, expected.b])
        {
            let got = i16::from(*channel);
            assert!(
                (got - i16::from(want)).abs() <= 1,
                "channel {got} too far from {want}"
            );
        }
        assert_eq!(frame[idx + 3], 0xff);
    }

    #[test]
    fn render_is_idempotent() {
        let mut slider = test_slider();
        assert_eq!(render_frame(&slider), render_frame(&slider));

        let mut host = RecordingHost::default();
        slider.set_angle(123, &mut host);
        assert_eq!(render_frame(&slider), render_frame(&slider));
    }

    #[test]
    fn render_survives_boundary_angles() {
        let mut slider = test_slider();
        let mut host = RecordingHost::default();
        for angle in [0, 360] {
            slider.set_angle(angle, &mut host);
            let frame = render_frame(&slider);
            assert_eq!(frame.len(), 300 * 300 * 4);
        }
    }

    #[test]
    fn render_degrades_on_empty_bounds() {
        let slider = CircularSlider::new(
            SliderConfig::builder()
                .window_width(0)
                .window_height(0)
                .build(),
        );
        assert!(render_frame(&slider).is_empty());
    }

    #[test]
    fn render_degrades_when_radius_collapses() {
        // Padding eats the whole radius; the ring-only frame still renders.
        let slider = CircularSlider::new(
            SliderConfig::builder()
                .window_width(100)
                .window_height(100)
                .build(),
        );
        assert!(slider.geometry().radius <= 0.0);
        let frame = render_frame(&slider);
        assert_eq!(frame.len(), 100 * 100 * 4);
    }
}
