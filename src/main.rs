use ringdial::{CircularSlider, Color, SliderCommand, SliderConfig};

use rand::Rng;
use std::env;
use std::error::Error;
use std::ops::Range;
use std::sync::mpsc;
use std::thread;
use std::time::Duration;

fn main() -> Result<(), Box<dyn Error>> {
    env_logger::init();

    let mut title = None;
    let mut size = None;
    let mut start_color = None;
    let mut end_color = None;
    let mut font_path = None;
    let mut demo = false;

    let mut args = env::args().skip(1);
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--title" => title = args.next(),
            "--size" => size = args.next().and_then(|v| v.parse::<usize>().ok()),
            "--start-color" => start_color = args.next().as_deref().and_then(parse_color),
            "--end-color" => end_color = args.next().as_deref().and_then(parse_color),
            "--font" => font_path = args.next(),
            "--demo" => demo = true,
            _ => {}
        }
    }

    let font_data = match font_path {
        Some(path) => Some(std::fs::read(path)?),
        None => {
            log::info!("no --font given; the readout text will not be drawn");
            None
        }
    };

    let config = SliderConfig::builder()
        .maybe_title(title)
        .maybe_window_width(size)
        .maybe_window_height(size)
        .maybe_start_color(start_color)
        .maybe_end_color(end_color)
        .maybe_font_data(font_data)
        .build();

    let mut slider = CircularSlider::new(config);

    if demo {
        // Feed the dial from a thread instead of the mouse: lerp the angle
        // towards a target that occasionally jumps somewhere new.
        let (sender, receiver) = mpsc::channel();
        thread::spawn(move || {
            let mut rng = rand::rng();
            let mut angle = 360.0_f64;
            let mut target: f64 = rng.random_range(0.0..=360.0);
            loop {
                if rng.random_range(0.0..1.0) < 0.02 {
                    target = rng.random_range(0.0..=360.0);
                }
                angle += (target - angle) * 0.1;
                if sender
                    .send(SliderCommand::SetAngle(angle.round() as u16))
                    .is_err()
                {
                    break;
                }
                thread::sleep(Duration::from_millis(33));
            }
        });
        slider.show_with_commands(receiver)?;
    } else {
        slider.show()?;
    }

    Ok(())
}

/// Parse an `RRGGBB` hex color, with or without a leading `#`.
fn parse_color(hex: &str) -> Option<Color> {
    let hex = hex.trim_start_matches('#');
    if hex.len() != 6 || !hex.is_ascii() {
        return None;
    }
    let channel = |range: Range<usize>| u8::from_str_radix(&hex[range], 16).ok();
    Some(Color::new(channel(0..2)?, channel(2..4)?, channel(4..6)?))
}
