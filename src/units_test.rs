use super::*;

const EPSILON: f64 = 1e-9;

fn approx_eq(a: f64, b: f64) -> bool {
    (a - b).abs() < EPSILON
}

#[test]
fn default_ratio_is_96_dpi() {
    assert!(approx_eq(mm_to_px(25.4, DEFAULT_MM_TO_PX), 96.0));
}

#[test]
fn mm_to_px_scales_linearly() {
    assert!(approx_eq(mm_to_px(10.0, 2.0), 20.0));
    assert!(approx_eq(mm_to_px(0.0, 5.0), 0.0));
    assert!(approx_eq(mm_to_px(-4.0, 3.0), -12.0));
}

#[test]
fn px_to_mm_inverts_mm_to_px() {
    for mm in [0.0, 1.5, 210.0, 297.0, -33.3] {
        let px = mm_to_px(mm, DEFAULT_MM_TO_PX);
        assert!(approx_eq(px_to_mm(px, DEFAULT_MM_TO_PX), mm));
    }
}

#[test]
fn px_to_mm_zero_scale_is_zero() {
    assert!(approx_eq(px_to_mm(100.0, 0.0), 0.0));
    assert!(approx_eq(px_to_mm(100.0, -1.0), 0.0));
}
