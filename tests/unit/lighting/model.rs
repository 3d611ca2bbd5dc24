use super::*;

fn approx(a: f64, b: f64) {
    assert!((a - b).abs() < 1e-12, "{a} != {b}");
}

#[test]
fn disabled_or_not_hovering_yields_none() {
    assert!(compute_lighting(PointerState::centered(true), false).is_none());
    assert!(compute_lighting(PointerState::centered(false), true).is_none());
}

#[test]
fn centered_pointer() {
    let l = compute_lighting(PointerState::centered(true), true).unwrap();
    approx(l.light_intensity, 1.0);
    approx(l.shadow_x, 0.0);
    approx(l.shadow_y, 0.0);
    approx(l.ambient_occlusion, 0.5);
    approx(l.light_distance, 0.0);
    approx(l.shadow_blur, 5.0);
    approx(l.color_temperature, 0.5);
    approx(l.light_x, 50.0);
    approx(l.directional_bias, 0.0);
}

#[test]
fn bottom_right_corner() {
    let l = compute_lighting(PointerState::new(1.0, 1.0, true), true).unwrap();
    approx(l.light_distance, 1.0);
    approx(l.light_intensity, 0.4);
    approx(l.shadow_x, -30.0);
    approx(l.shadow_y, -30.0);
    approx(l.ambient_occlusion, 0.2);
    approx(l.shadow_blur, 20.0);
    approx(l.shadow_opacity, 0.32);
    approx(l.reflection_angle, 45.0);
    approx(l.reflection_intensity, 0.28);
    approx(l.reflection_spread, 60.0);
    approx(l.color_temperature, 0.8);
    approx(l.atmospheric_scatter, 0.24);
    approx(l.directional_bias, 2.0);
}

#[test]
fn left_edge_is_cooler_and_shadow_points_right() {
    let l = compute_lighting(PointerState::new(0.0, 0.5, true), true).unwrap();
    approx(l.color_temperature, 0.2);
    approx(l.shadow_x, 30.0);
    approx(l.reflection_angle, 180.0);
}

#[test]
fn intensity_never_drops_below_floor() {
    for &(x, y) in &[(0.0, 0.0), (1.0, 0.0), (-4.0, 9.0)] {
        let l = compute_lighting(PointerState::new(x, y, true), true).unwrap();
        assert!(l.light_intensity >= 0.2);
        assert!(l.ambient_occlusion >= 0.1);
        assert!(l.light_distance <= 1.0);
    }
}

#[test]
fn identical_input_is_bit_identical() {
    let p = PointerState::new(0.137, 0.862, true);
    let a = compute_lighting(p, true).unwrap();
    let b = compute_lighting(p, true).unwrap();
    let bits = |l: &LightingDescriptor| {
        [
            l.light_x,
            l.light_y,
            l.light_intensity,
            l.light_distance,
            l.shadow_x,
            l.shadow_y,
            l.shadow_blur,
            l.shadow_opacity,
            l.reflection_angle,
            l.reflection_intensity,
            l.reflection_spread,
            l.ambient_occlusion,
            l.color_temperature,
            l.atmospheric_scatter,
            l.directional_bias,
        ]
        .map(f64::to_bits)
    };
    assert_eq!(bits(&a), bits(&b));
}

#[test]
fn from_client_maps_into_bounds() {
    let bounds = Rect::new(100.0, 50.0, 300.0, 450.0);
    let p = PointerState::from_client(Point::new(150.0, 450.0), bounds, true).unwrap();
    approx(p.x, 0.25);
    approx(p.y, 1.0);

    let outside = PointerState::from_client(Point::new(-10.0, 0.0), bounds, true).unwrap();
    assert_eq!((outside.x, outside.y), (0.0, 0.0));

    assert!(PointerState::from_client(Point::ZERO, Rect::ZERO, true).is_none());
    assert!(PointerState::new(f64::NAN, 0.5, true).sanitized().is_none());
}
