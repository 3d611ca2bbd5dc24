use crate::foundation::core::Point;
use crate::registry::schema::{EffectCategory, EffectSchema, ParameterSpec};
use crate::registry::template::{
    AnimationTemplate, Arrangement, ColorSource, DecorationTemplate, FilterTemplate,
    LayerTemplate, PaintTemplate, RampTemplate, Scalar, StopTemplate, WashTemplate,
};
use crate::style::BlendMode;

const CLEAR: &str = "#ffffff00";

pub(crate) fn builtin_effects() -> Vec<EffectSchema> {
    vec![
        gold(),
        chrome(),
        brushed_metal(),
        holographic(),
        crystal(),
        prizm(),
        interference(),
        waves(),
        vintage(),
        foil_spray(),
    ]
}

fn effect(
    id: &str,
    name: &str,
    description: &str,
    category: EffectCategory,
    extra: Vec<ParameterSpec>,
    template: LayerTemplate,
) -> EffectSchema {
    let mut parameters = vec![ParameterSpec::intensity()];
    parameters.extend(extra);
    EffectSchema {
        id: id.to_owned(),
        name: name.to_owned(),
        description: description.to_owned(),
        category,
        parameters,
        template,
    }
}

fn stop(offset: f64, color: ColorSource, alpha: impl Into<Scalar>) -> StopTemplate {
    StopTemplate::new(offset, color, alpha)
}

fn hex(s: &str) -> ColorSource {
    ColorSource::hex(s)
}

/// Transparent -> color -> transparent streak.
fn streak(color: ColorSource, peak_alpha: impl Into<Scalar>) -> RampTemplate {
    RampTemplate::Stops(vec![
        stop(0.0, hex(CLEAR), 0.0),
        stop(0.5, color, peak_alpha),
        stop(1.0, hex(CLEAR), 0.0),
    ])
}

/// Solid-centered dot fading to nothing; used for scattered points.
fn dot(color: ColorSource, alpha: f64) -> PaintTemplate {
    PaintTemplate::Radial {
        center: Point::new(0.5, 0.5),
        radius: Scalar::Const(1.0),
        ramp: RampTemplate::Stops(vec![
            stop(0.0, color.clone(), alpha),
            stop(1.0, color, 0.0),
        ]),
    }
}

fn gold() -> EffectSchema {
    const TONES: [&str; 4] = ["rich", "rose", "white", "antique"];
    let base = ColorSource::choice(
        "goldTone",
        &[
            ("rich", "#b8860b"),
            ("rose", "#b76e79"),
            ("white", "#d8d8c8"),
            ("antique", "#8b6914"),
        ],
        "#b8860b",
    );
    let highlight = ColorSource::choice(
        "goldTone",
        &[
            ("rich", "#ffd700"),
            ("rose", "#f4c2c2"),
            ("white", "#f5f5e8"),
            ("antique", "#cfb53b"),
        ],
        "#ffd700",
    );

    effect(
        "gold",
        "Gold Foil",
        "Warm metallic foil with a travelling shimmer.",
        EffectCategory::Metallic,
        vec![
            ParameterSpec::select("goldTone", "Tone", &TONES, "rich"),
            ParameterSpec::slider("shimmer", "Shimmer", 0.0, 100.0, 1.0, 50.0),
            ParameterSpec::slider("reflectivity", "Reflectivity", 0.0, 100.0, 1.0, 70.0),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(135.0),
                    ramp: RampTemplate::Stops(vec![
                        stop(0.0, base.clone(), 1.0),
                        stop(0.5, highlight.clone(), Scalar::param("reflectivity", 0.006, 0.4)),
                        stop(1.0, base, 1.0),
                    ]),
                },
                blend: BlendMode::Overlay,
                opacity: Scalar::Const(0.8),
                filter: Vec::new(),
                animation: None,
            }),
            decorations: vec![DecorationTemplate {
                name: "shimmer".to_owned(),
                count: Scalar::Const(2.0),
                arrangement: Arrangement::Bands {
                    spread: Scalar::Const(0.6),
                },
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(110.0),
                    ramp: streak(hex("#ffffff"), Scalar::param("shimmer", 0.006, 0.0)),
                },
                blend: BlendMode::Screen,
                opacity: Scalar::Const(1.0),
                enabled_by: None,
                animation: Some(AnimationTemplate {
                    name: "gold-shimmer".to_owned(),
                    period_s: 4.0,
                    speed: Some(Scalar::param("shimmer", 2.0, 0.0)),
                    enabled_by: None,
                }),
            }],
            lighting_tint: Some(highlight),
        },
    )
}

fn chrome() -> EffectSchema {
    effect(
        "chrome",
        "Chrome Mirror",
        "Hard-edged mirror finish with a specular hotspot.",
        EffectCategory::Metallic,
        vec![
            ParameterSpec::slider("sharpness", "Sharpness", 0.0, 100.0, 1.0, 70.0),
            ParameterSpec::slider("highlightSize", "Highlight Size", 10.0, 100.0, 1.0, 40.0),
            ParameterSpec::color("tint", "Tint", "#c0c0c0"),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(180.0),
                    ramp: RampTemplate::Stops(vec![
                        stop(0.0, hex("#ffffff"), 1.0),
                        stop(0.3, ColorSource::param("tint"), 1.0),
                        stop(0.5, hex("#4a4a4a"), 1.0),
                        stop(0.7, ColorSource::param("tint"), 1.0),
                        stop(1.0, hex("#ffffff"), 1.0),
                    ]),
                },
                blend: BlendMode::HardLight,
                opacity: Scalar::Const(0.75),
                filter: vec![FilterTemplate::Contrast(Scalar::param(
                    "sharpness",
                    0.01,
                    1.0,
                ))],
                animation: None,
            }),
            decorations: vec![DecorationTemplate {
                name: "hotspot".to_owned(),
                count: Scalar::Const(1.0),
                arrangement: Arrangement::Bands {
                    spread: Scalar::Const(0.0),
                },
                paint: PaintTemplate::Radial {
                    center: Point::new(0.3, 0.25),
                    radius: Scalar::param("highlightSize", 0.006, 0.0),
                    ramp: RampTemplate::Stops(vec![
                        stop(0.0, hex("#ffffff"), 0.9),
                        stop(1.0, hex(CLEAR), 0.0),
                    ]),
                },
                blend: BlendMode::Screen,
                opacity: Scalar::Const(0.7),
                enabled_by: None,
                animation: None,
            }],
            lighting_tint: Some(ColorSource::param("tint")),
        },
    )
}

fn brushed_metal() -> EffectSchema {
    effect(
        "brushed_metal",
        "Brushed Metal",
        "Directional satin grain over a cool metal base.",
        EffectCategory::Metallic,
        vec![
            ParameterSpec::slider("direction", "Direction", 0.0, 360.0, 1.0, 90.0),
            ParameterSpec::slider("grainDensity", "Grain Density", 1.0, 20.0, 1.0, 8.0),
            ParameterSpec::color("metalTint", "Metal Tint", "#a8a9ad"),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Linear {
                    angle: Scalar::param("direction", 1.0, 0.0),
                    ramp: RampTemplate::Stops(vec![
                        stop(0.0, ColorSource::param("metalTint"), 0.9),
                        stop(0.5, hex("#ffffff"), 0.5),
                        stop(1.0, ColorSource::param("metalTint"), 0.9),
                    ]),
                },
                blend: BlendMode::Overlay,
                opacity: Scalar::Const(0.7),
                filter: Vec::new(),
                animation: None,
            }),
            decorations: vec![DecorationTemplate {
                name: "grain".to_owned(),
                count: Scalar::param("grainDensity", 1.0, 0.0),
                arrangement: Arrangement::Bands {
                    spread: Scalar::Const(1.0),
                },
                paint: PaintTemplate::Linear {
                    angle: Scalar::param("direction", 1.0, 0.0),
                    ramp: streak(hex("#ffffff"), 0.15),
                },
                blend: BlendMode::SoftLight,
                opacity: Scalar::Const(0.5),
                enabled_by: None,
                animation: None,
            }],
            lighting_tint: Some(ColorSource::param("metalTint")),
        },
    )
}

fn holographic() -> EffectSchema {
    effect(
        "holographic",
        "Holographic",
        "Rainbow diffraction foil that drifts across the card.",
        EffectCategory::Prismatic,
        vec![
            ParameterSpec::slider("shiftSpeed", "Shift Speed", 0.0, 200.0, 1.0, 100.0),
            ParameterSpec::slider("rainbowSpread", "Rainbow Spread", 60.0, 360.0, 1.0, 180.0),
            ParameterSpec::slider("prismaticDepth", "Prismatic Depth", 0.0, 100.0, 1.0, 50.0),
            ParameterSpec::toggle("animated", "Animated", true),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(115.0),
                    ramp: RampTemplate::Spectrum {
                        hue_start: Scalar::Const(0.0),
                        hue_span: Scalar::param("rainbowSpread", 1.0, 0.0),
                        steps: 7,
                        saturation: 0.9,
                        lightness: 0.6,
                        alpha: Scalar::param("prismaticDepth", 0.006, 0.3),
                    },
                },
                blend: BlendMode::ColorDodge,
                opacity: Scalar::Const(0.7),
                filter: Vec::new(),
                animation: Some(AnimationTemplate {
                    name: "holo-shift".to_owned(),
                    period_s: 6.0,
                    speed: Some(Scalar::param("shiftSpeed", 1.0, 0.0)),
                    enabled_by: Some("animated".to_owned()),
                }),
            }),
            decorations: vec![DecorationTemplate {
                name: "sheen".to_owned(),
                count: Scalar::Const(3.0),
                arrangement: Arrangement::Bands {
                    spread: Scalar::Const(0.8),
                },
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(65.0),
                    ramp: streak(hex("#ffffff"), 0.35),
                },
                blend: BlendMode::Overlay,
                opacity: Scalar::param("prismaticDepth", 0.008, 0.2),
                enabled_by: None,
                animation: Some(AnimationTemplate {
                    name: "holo-sheen".to_owned(),
                    period_s: 3.0,
                    speed: Some(Scalar::param("shiftSpeed", 1.0, 0.0)),
                    enabled_by: Some("animated".to_owned()),
                }),
            }],
            lighting_tint: Some(hex("#c8a2ff")),
        },
    )
}

fn crystal() -> EffectSchema {
    effect(
        "crystal",
        "Crystal",
        "Faceted clear-coat with dispersion and scattered glitter.",
        EffectCategory::Prismatic,
        vec![
            ParameterSpec::slider("facetCount", "Facets", 3.0, 20.0, 1.0, 8.0),
            ParameterSpec::slider("dispersion", "Dispersion", 0.0, 100.0, 1.0, 60.0),
            ParameterSpec::slider("clarity", "Clarity", 0.0, 100.0, 1.0, 70.0),
            ParameterSpec::toggle("sparkle", "Sparkle", true),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Radial {
                    center: Point::new(0.5, 0.5),
                    radius: Scalar::Const(0.75),
                    ramp: RampTemplate::Stops(vec![
                        stop(0.0, hex("#ffffff"), Scalar::param("clarity", 0.006, 0.2)),
                        stop(0.6, hex("#b9f2ff"), 0.4),
                        stop(1.0, hex("#7fd4ff"), 0.2),
                    ]),
                },
                blend: BlendMode::Screen,
                opacity: Scalar::Const(0.6),
                filter: Vec::new(),
                animation: None,
            }),
            decorations: vec![
                DecorationTemplate {
                    name: "facet".to_owned(),
                    count: Scalar::param("facetCount", 1.0, 0.0),
                    arrangement: Arrangement::Radial,
                    paint: PaintTemplate::Conic {
                        center: Point::new(0.5, 0.5),
                        from: Scalar::Const(0.0),
                        ramp: RampTemplate::Spectrum {
                            hue_start: Scalar::Const(180.0),
                            hue_span: Scalar::param("dispersion", 1.8, 0.0),
                            steps: 4,
                            saturation: 0.6,
                            lightness: 0.8,
                            alpha: Scalar::Const(0.35),
                        },
                    },
                    blend: BlendMode::Overlay,
                    opacity: Scalar::Const(0.25),
                    enabled_by: None,
                    animation: None,
                },
                DecorationTemplate {
                    name: "glitter".to_owned(),
                    count: Scalar::param("facetCount", 3.0, 0.0),
                    arrangement: Arrangement::Scatter {
                        size: Scalar::Const(0.02),
                    },
                    paint: dot(hex("#ffffff"), 1.0),
                    blend: BlendMode::Screen,
                    opacity: Scalar::Const(0.9),
                    enabled_by: Some("sparkle".to_owned()),
                    animation: Some(AnimationTemplate {
                        name: "sparkle-twinkle".to_owned(),
                        period_s: 1.5,
                        speed: None,
                        enabled_by: None,
                    }),
                },
            ],
            lighting_tint: Some(hex("#b9f2ff")),
        },
    )
}

fn prizm() -> EffectSchema {
    effect(
        "prizm",
        "Prizm",
        "Full-spectrum refractor with radial shards.",
        EffectCategory::Prismatic,
        vec![
            ParameterSpec::slider("complexity", "Complexity", 1.0, 10.0, 1.0, 5.0),
            ParameterSpec::slider("colorSeparation", "Color Separation", 0.0, 100.0, 1.0, 60.0),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Conic {
                    center: Point::new(0.5, 0.5),
                    from: Scalar::Const(0.0),
                    ramp: RampTemplate::Spectrum {
                        hue_start: Scalar::Const(0.0),
                        hue_span: Scalar::Const(360.0),
                        steps: 8,
                        saturation: 1.0,
                        lightness: 0.55,
                        alpha: Scalar::Const(0.5),
                    },
                },
                blend: BlendMode::Color,
                opacity: Scalar::Const(0.5),
                filter: Vec::new(),
                animation: None,
            }),
            decorations: vec![DecorationTemplate {
                name: "shard".to_owned(),
                count: Scalar::param("complexity", 2.0, 0.0),
                arrangement: Arrangement::Radial,
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(0.0),
                    ramp: streak(hex("#ffffff"), Scalar::param("colorSeparation", 0.004, 0.0)),
                },
                blend: BlendMode::SoftLight,
                opacity: Scalar::Const(0.6),
                enabled_by: None,
                animation: None,
            }],
            lighting_tint: None,
        },
    )
}

fn interference() -> EffectSchema {
    effect(
        "interference",
        "Interference",
        "Thin-film color bands like oil on water.",
        EffectCategory::Prismatic,
        vec![
            ParameterSpec::slider("frequency", "Frequency", 1.0, 20.0, 1.0, 8.0),
            ParameterSpec::slider("thickness", "Film Thickness", 0.0, 100.0, 1.0, 50.0),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(45.0),
                    ramp: RampTemplate::Spectrum {
                        hue_start: Scalar::param("thickness", 3.6, 0.0),
                        hue_span: Scalar::param("frequency", 45.0, 0.0),
                        steps: 12,
                        saturation: 0.7,
                        lightness: 0.6,
                        alpha: Scalar::Const(0.5),
                    },
                },
                blend: BlendMode::Overlay,
                opacity: Scalar::Const(0.6),
                filter: Vec::new(),
                animation: None,
            }),
            decorations: Vec::new(),
            lighting_tint: None,
        },
    )
}

fn waves() -> EffectSchema {
    effect(
        "waves",
        "Waves",
        "Layered flowing color bands.",
        EffectCategory::Surface,
        vec![
            ParameterSpec::slider("complexity", "Complexity", 1.0, 8.0, 1.0, 4.0),
            ParameterSpec::slider("amplitude", "Amplitude", 0.0, 100.0, 1.0, 40.0),
            ParameterSpec::slider("flowSpeed", "Flow Speed", 0.0, 200.0, 1.0, 100.0),
            ParameterSpec::color("waveColor", "Wave Color", "#4fc3f7"),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(0.0),
                    ramp: streak(ColorSource::param("waveColor"), 0.35),
                },
                blend: BlendMode::SoftLight,
                opacity: Scalar::Const(0.5),
                filter: Vec::new(),
                animation: None,
            }),
            decorations: vec![DecorationTemplate {
                name: "wave".to_owned(),
                count: Scalar::param("complexity", 1.0, 0.0),
                arrangement: Arrangement::Bands {
                    spread: Scalar::param("amplitude", 0.01, 0.0),
                },
                paint: PaintTemplate::Linear {
                    angle: Scalar::Const(170.0),
                    ramp: streak(ColorSource::param("waveColor"), 0.5),
                },
                blend: BlendMode::Overlay,
                opacity: Scalar::Const(0.45),
                enabled_by: None,
                animation: Some(AnimationTemplate {
                    name: "wave-drift".to_owned(),
                    period_s: 8.0,
                    speed: Some(Scalar::param("flowSpeed", 1.0, 0.0)),
                    enabled_by: None,
                }),
            }],
            lighting_tint: None,
        },
    )
}

fn vintage() -> EffectSchema {
    const ERAS: [&str; 3] = ["1950s", "1970s", "1990s"];
    effect(
        "vintage",
        "Vintage",
        "Aged print look: sepia wash, faded contrast, and paper grain.",
        EffectCategory::Vintage,
        vec![
            ParameterSpec::slider("sepia", "Sepia", 0.0, 100.0, 1.0, 60.0),
            ParameterSpec::slider("grain", "Grain", 0.0, 100.0, 1.0, 30.0),
            ParameterSpec::slider("fade", "Fade", 0.0, 100.0, 1.0, 20.0),
            ParameterSpec::select("era", "Era", &ERAS, "1970s"),
        ],
        LayerTemplate {
            wash: Some(WashTemplate {
                paint: PaintTemplate::Solid {
                    color: ColorSource::choice(
                        "era",
                        &[
                            ("1950s", "#704214"),
                            ("1970s", "#c4a35a"),
                            ("1990s", "#8fa3a6"),
                        ],
                        "#c4a35a",
                    ),
                    alpha: Scalar::param("fade", 0.006, 0.2),
                },
                blend: BlendMode::Multiply,
                opacity: Scalar::Const(0.8),
                filter: vec![
                    FilterTemplate::Sepia(Scalar::param("sepia", 0.01, 0.0)),
                    FilterTemplate::Contrast(Scalar::param("fade", -0.004, 1.0)),
                ],
                animation: None,
            }),
            decorations: vec![DecorationTemplate {
                name: "grain".to_owned(),
                count: Scalar::param("grain", 0.4, 0.0),
                arrangement: Arrangement::Scatter {
                    size: Scalar::Const(0.01),
                },
                paint: dot(hex("#3b2a1a"), 0.6),
                blend: BlendMode::Multiply,
                opacity: Scalar::Const(0.5),
                enabled_by: None,
                animation: None,
            }],
            lighting_tint: None,
        },
    )
}

fn foil_spray() -> EffectSchema {
    effect(
        "foil_spray",
        "Foil Spray",
        "Scattered metallic flecks without a base wash.",
        EffectCategory::Other,
        vec![
            ParameterSpec::slider("density", "Density", 0.0, 100.0, 1.0, 50.0),
            ParameterSpec::color("foilColor", "Foil Color", "#ffd700"),
        ],
        LayerTemplate {
            wash: None,
            decorations: vec![DecorationTemplate {
                name: "fleck".to_owned(),
                count: Scalar::param("density", 0.5, 4.0),
                arrangement: Arrangement::Scatter {
                    size: Scalar::Const(0.015),
                },
                paint: dot(ColorSource::param("foilColor"), 1.0),
                blend: BlendMode::Screen,
                opacity: Scalar::Const(0.85),
                enabled_by: None,
                animation: None,
            }],
            lighting_tint: Some(ColorSource::param("foilColor")),
        },
    )
}
