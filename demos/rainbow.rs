// This example renders a moving rainbow, followed by a few running dots,
// on an LED strip attached to a Raspberry Pi.
//
// The strip settings are read from the `WS2811_*` environment variables,
// the pixel count from the first argument (default 60).
//
//     sudo WS2811_STRIP_TYPE=ws2812 RUST_LOG=debug ./rainbow 144

use std::time::{Duration, Instant};

use palette::Srgb;
use ws281x_strip::{driver::NativeDriver, Color, StripBuilder};

mod common;
use common::effects;

const RUN_TIME: Duration = Duration::from_secs(20);
const FRAME_TIME: Duration = Duration::from_millis(10);

fn main() -> Result<(), Box<dyn std::error::Error>> {
    env_logger::Builder::from_env(env_logger::Env::default().default_filter_or("info")).init();

    let count = match std::env::args().nth(1) {
        Some(arg) => arg.parse()?,
        None => 60,
    };

    log::info!("Initializing strip with {} pixels ...", count);
    let mut strip = StripBuilder::from_env(count)?.build(NativeDriver::new())?;
    log::debug!("Strip initialized.");

    let has_white = strip.strip_type().has_white();
    let mut pixels = vec![Srgb::new(0u8, 0, 0); strip.pixel_count()];
    let start = Instant::now();

    while start.elapsed() < RUN_TIME {
        let t = start.elapsed().as_millis() as u32;

        if start.elapsed() < RUN_TIME / 2 {
            effects::rainbow(t, &mut pixels);
        } else {
            effects::running_dots(t / 20, &mut pixels);
        }

        strip.set_colors(.., pixels.iter().map(|&p| to_color(p, has_white)))?;
        strip.show()?;

        std::thread::sleep(FRAME_TIME);
    }

    log::info!("Clearing strip.");
    strip.set_colors(.., vec![Srgb::new(0u8, 0, 0); strip.pixel_count()])?;
    strip.show()?;

    Ok(())
}

// Moves the common part of red, green and blue to the white LED, if there is one.
fn to_color(pixel: Srgb<u8>, has_white: bool) -> Color {
    let (r, g, b) = pixel.into_components();
    if !has_white {
        return Color::new(r, g, b);
    }

    let w = r.min(g).min(b);
    Color::rgbw(r - w, g - w, b - w, w)
}
