use super::*;
use crate::registry::schema::{EffectCategory, ParameterSpec};
use crate::values::{ParamMap, ParamValue};
use serde_json::json;

fn schema() -> EffectSchema {
    EffectSchema {
        id: "t".to_owned(),
        name: "T".to_owned(),
        description: String::new(),
        category: EffectCategory::Other,
        parameters: vec![
            ParameterSpec::intensity(),
            ParameterSpec::slider("speed", "Speed", 0.0, 200.0, 1.0, 100.0),
            ParameterSpec::color("tint", "Tint", "#102030"),
            ParameterSpec::select("tone", "Tone", &["warm", "cool"], "warm"),
            ParameterSpec::toggle("animated", "Animated", true),
        ],
        template: LayerTemplate::default(),
    }
}

#[test]
fn scalar_reads_parameter_linearly() {
    let s = schema();
    let mut m = ParamMap::new();
    m.insert("speed".into(), ParamValue::Number(50.0));
    let r = s.reader(Some(&m));
    assert_eq!(Scalar::Const(3.0).eval(&r), 3.0);
    assert_eq!(Scalar::param("speed", 0.5, 1.0).eval(&r), 26.0);
}

#[test]
fn color_sources_resolve() {
    let s = schema();
    let r = s.reader(None);
    assert_eq!(ColorSource::hex("#ff0000").resolve(&r), Rgba8::rgb(255, 0, 0));
    assert_eq!(ColorSource::param("tint").resolve(&r), Rgba8::rgb(16, 32, 48));

    let choice = ColorSource::choice("tone", &[("warm", "#ff8800"), ("cool", "#0088ff")], "#000000");
    assert_eq!(choice.resolve(&r), Rgba8::rgb(255, 136, 0));

    let mut m = ParamMap::new();
    m.insert("tone".into(), ParamValue::Text("cool".into()));
    assert_eq!(choice.resolve(&s.reader(Some(&m))), Rgba8::rgb(0, 136, 255));
}

#[test]
fn bad_stored_color_falls_back_to_default() {
    let s = schema();
    let mut m = ParamMap::new();
    m.insert("tint".into(), ParamValue::Text("not-a-color".into()));
    assert_eq!(
        ColorSource::param("tint").resolve(&s.reader(Some(&m))),
        Rgba8::rgb(16, 32, 48)
    );
}

#[test]
fn spectrum_spans_requested_hues() {
    let s = schema();
    let ramp = RampTemplate::Spectrum {
        hue_start: Scalar::Const(0.0),
        hue_span: Scalar::Const(240.0),
        steps: 3,
        saturation: 1.0,
        lightness: 0.5,
        alpha: Scalar::Const(1.0),
    };
    let stops = ramp.resolve(&s.reader(None));
    assert_eq!(stops.len(), 3);
    assert_eq!(stops[0].color, Rgba8::rgb(255, 0, 0));
    assert_eq!(stops[1].color, Rgba8::rgb(0, 255, 0));
    assert_eq!(stops[2].color, Rgba8::rgb(0, 0, 255));
    assert_eq!(stops[2].offset, 1.0);
}

#[test]
fn animation_duration_follows_speed_and_toggle() {
    let s = schema();
    let anim = AnimationTemplate {
        name: "spin".to_owned(),
        period_s: 6.0,
        speed: Some(Scalar::param("speed", 1.0, 0.0)),
        enabled_by: Some("animated".to_owned()),
    };

    let mut m = ParamMap::new();
    m.insert("speed".into(), ParamValue::Number(200.0));
    let a = anim.resolve(&s.reader(Some(&m)), 0.5).unwrap();
    assert_eq!(a.duration_s, 3.0);
    assert_eq!(a.delay_s, 0.5);

    m.insert("animated".into(), ParamValue::Bool(false));
    assert!(anim.resolve(&s.reader(Some(&m)), 0.0).is_none());
}

#[test]
fn paint_templates_parse_from_json() {
    let t: PaintTemplate = serde_json::from_value(json!({
        "type": "radial",
        "radius": { "param": "speed", "scale": 0.01 },
        "ramp": { "stops": [
            { "offset": 0.0, "color": "#ffffff" },
            { "offset": 1.0, "color": { "param": "tint" }, "alpha": 0.0 }
        ]}
    }))
    .unwrap();

    let s = schema();
    match t.resolve(&s.reader(None), Placement::default()) {
        Paint::Radial {
            center,
            radius,
            stops,
        } => {
            assert_eq!(center, Point::new(0.5, 0.5));
            assert_eq!(radius, 1.0);
            assert_eq!(stops[0].color, Rgba8::WHITE);
            assert_eq!(stops[1].color, Rgba8::rgba(16, 32, 48, 0));
        }
        other => panic!("unexpected paint {other:?}"),
    }
}

#[test]
fn placement_moves_radial_and_rotates_linear() {
    let s = schema();
    let r = s.reader(None);
    let at = Placement {
        center: Some(Point::new(0.1, 0.9)),
        scale: 0.5,
        angle_offset_deg: 300.0,
    };
    let radial = PaintTemplate::Radial {
        center: Point::new(0.5, 0.5),
        radius: Scalar::Const(0.2),
        ramp: RampTemplate::Stops(Vec::new()),
    };
    let Paint::Radial { center, radius, .. } = radial.resolve(&r, at) else {
        panic!("expected radial");
    };
    assert_eq!(center, Point::new(0.1, 0.9));
    assert_eq!(radius, 0.1);

    let linear = PaintTemplate::Linear {
        angle: Scalar::Const(90.0),
        ramp: RampTemplate::Stops(Vec::new()),
    };
    let Paint::Linear { angle_deg, .. } = linear.resolve(&r, at) else {
        panic!("expected linear");
    };
    assert_eq!(angle_deg, 30.0);
}

#[test]
fn normalize_deg_wraps_negative() {
    assert_eq!(normalize_deg(-90.0), 270.0);
    assert_eq!(normalize_deg(720.0), 0.0);
}
