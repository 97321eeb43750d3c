use proptest::prelude::*;
use ws281x_strip::{driver::FakeDriver, Color, PixelRange, Strip};

proptest! {
    #[test]
    fn packed_layout(red in any::<u8>(), green in any::<u8>(), blue in any::<u8>(), white in any::<u8>()) {
        let expected = (u32::from(white) << 24)
            | (u32::from(red) << 16)
            | (u32::from(green) << 8)
            | u32::from(blue);

        let color = Color::rgbw(red, green, blue, white);
        prop_assert_eq!(color.to_u32(), expected);
        prop_assert_eq!(
            (color.red(), color.green(), color.blue(), color.white()),
            (red, green, blue, white)
        );
    }

    #[test]
    fn set_then_get(
        count in 1usize..64,
        index in any::<prop::sample::Index>(),
        raw in any::<u32>(),
    ) {
        let mut strip = Strip::new(FakeDriver::new(), count, 18).unwrap();
        let index = index.index(count);

        strip.set_color(index, raw).unwrap();
        prop_assert_eq!(strip.get_color(index).unwrap(), Color::from(raw));
    }

    #[test]
    fn resolved_range_is_ascending_and_in_bounds(
        len in 0usize..50,
        start in 0usize..60,
        end in 0usize..60,
        step in 1usize..8,
    ) {
        let indices: Vec<usize> = PixelRange::new(start..end).step_by(step).indices(len).collect();

        prop_assert!(indices.iter().all(|&i| i >= start && i < end && i < len));
        prop_assert!(indices.windows(2).all(|w| w[1] - w[0] == step));
        if let Some(&first) = indices.first() {
            prop_assert_eq!(first, start);
        }
    }

    #[test]
    fn range_write_matches_resolved_positions(
        count in 1usize..40,
        start in 0usize..40,
        step in 1usize..5,
    ) {
        let mut strip = Strip::new(FakeDriver::new(), count, 18).unwrap();
        let range = PixelRange::new(start..).step_by(step);
        let positions: Vec<usize> = range.indices(count).collect();

        let colors: Vec<Color> = (0..positions.len())
            .map(|i| Color::from(i as u32 + 1))
            .collect();
        strip.set_colors(range, colors.iter()).unwrap();

        let pixels = strip.pixels().unwrap();
        for (i, pixel) in pixels.iter().enumerate() {
            match positions.iter().position(|&p| p == i) {
                Some(n) => prop_assert_eq!(*pixel, colors[n]),
                None => prop_assert_eq!(*pixel, Color::BLACK),
            }
        }
        prop_assert_eq!(strip.get_colors(range).unwrap(), colors);
    }
}
