mod tests {
    use myrtio_vfx_engine::math8::{
        approach8, blend8, lerp8, level8, scale_ceiling, scale8, unit8, unscale_ceiling,
    };

    #[test]
    fn test_scale8() {
        assert_eq!(scale8(255, 128), 128);
        assert_eq!(scale8(0, 128), 0);
        assert_eq!(scale8(128, 128), 64);
        assert_eq!(scale8(128, 255), 128);
        assert_eq!(scale8(128, 0), 0);
    }

    #[test]
    fn test_blend8() {
        assert_eq!(blend8(255, 128, 128), 191);
        assert_eq!(blend8(0, 128, 255), 128);
        assert_eq!(blend8(255, 0, 128), 127);
        assert_eq!(blend8(255, 128, 0), 255);
    }

    #[test]
    fn test_scale_ceiling_is_exact_at_both_ends() {
        assert_eq!(scale_ceiling(255, 200), 200);
        assert_eq!(scale_ceiling(200, 255), 200);
        assert_eq!(scale_ceiling(100, 0), 0);
        assert_eq!(scale_ceiling(128, 128), 64);
    }

    #[test]
    fn test_unscale_ceiling() {
        assert_eq!(unscale_ceiling(200, 200), 255);
        assert_eq!(unscale_ceiling(200, 255), 200);
        assert_eq!(unscale_ceiling(64, 128), 127);
        assert_eq!(unscale_ceiling(250, 100), 255);
        assert_eq!(unscale_ceiling(10, 0), 0);
    }

    #[test]
    fn test_lerp8() {
        assert_eq!(lerp8(80, 255, 0, 1500), 80);
        assert_eq!(lerp8(80, 255, 750, 1500), 167);
        assert_eq!(lerp8(255, 0, 500, 1000), 128);
        assert_eq!(lerp8(80, 255, 1500, 1500), 255);
        assert_eq!(lerp8(80, 255, 9000, 1500), 255);
        assert_eq!(lerp8(10, 20, 0, 0), 20);
    }

    #[test]
    fn test_approach8() {
        assert_eq!(approach8(80, 255, 8), 88);
        assert_eq!(approach8(250, 255, 8), 255);
        assert_eq!(approach8(100, 80, 8), 92);
        assert_eq!(approach8(85, 80, 8), 80);
        assert_eq!(approach8(42, 42, 8), 42);
    }

    #[test]
    fn test_float_levels() {
        assert_eq!(unit8(0.5), 128);
        assert_eq!(unit8(2.0), 255);
        assert_eq!(level8(300.0), 255);
        assert_eq!(level8(-5.0), 0);
        assert_eq!(level8(39.6), 40);
    }
}
