mod tests {
    use myrtio_vfx_engine::color::{BLACK, Rgb, blend_colors, rgb_from_u32, scale_color};

    const RED: Rgb = Rgb { r: 255, g: 0, b: 0 };
    const BLUE: Rgb = Rgb { r: 0, g: 0, b: 255 };
    const WHITE: Rgb = Rgb {
        r: 255,
        g: 255,
        b: 255,
    };

    #[test]
    fn test_rgb_from_u32() {
        assert_eq!(
            rgb_from_u32(0xFF_93_29),
            Rgb {
                r: 255,
                g: 147,
                b: 41
            }
        );
        assert_eq!(rgb_from_u32(0), BLACK);
    }

    #[test]
    fn test_blend_colors() {
        assert_eq!(blend_colors(RED, BLUE, 0), RED);
        assert_eq!(blend_colors(RED, BLUE, 255), BLUE);
        assert_eq!(
            blend_colors(BLACK, WHITE, 128),
            Rgb {
                r: 128,
                g: 128,
                b: 128
            }
        );
    }

    #[test]
    fn test_scale_color() {
        assert_eq!(scale_color(WHITE, 255), WHITE);
        assert_eq!(scale_color(WHITE, 0), BLACK);
        assert_eq!(
            scale_color(Rgb { r: 200, g: 100, b: 0 }, 77),
            Rgb { r: 60, g: 30, b: 0 }
        );
    }
}
