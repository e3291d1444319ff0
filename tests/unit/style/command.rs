use super::*;
use serde_json::json;

#[test]
fn shadow_offset_is_structured_not_dotted() {
    let mut s = StyleSet::default();
    s.apply(StyleCommand::SetShadowOffsetX(14.0)).unwrap();
    s.apply(StyleCommand::SetShadowOffsetY(-6.0)).unwrap();
    assert_eq!(s.transform.shadow.offset_x, 14.0);
    assert_eq!(s.transform.shadow.offset_y, -6.0);
}

#[test]
fn percent_fields_are_clamped() {
    let mut s = StyleSet::default();
    s.apply(StyleCommand::SetOverlayOpacity(180.0)).unwrap();
    s.apply(StyleCommand::SetNoiseIntensity(-5.0)).unwrap();
    s.apply(StyleCommand::SetPerspective(250.0)).unwrap();
    assert_eq!(s.background.overlay_opacity, 100.0);
    assert_eq!(s.background.noise_intensity, 0.0);
    assert_eq!(s.transform.perspective, 100.0);
}

#[test]
fn position_may_bleed_outside_canvas() {
    let mut s = StyleSet::default();
    s.apply(StyleCommand::SetPositionX(130.0)).unwrap();
    assert_eq!(s.transform.x, 130.0);
    assert!(s.apply(StyleCommand::SetPositionY(f64::NAN)).is_err());
}

#[test]
fn gradient_keeps_two_stops() {
    let mut s = StyleSet::default();
    assert!(s.apply(StyleCommand::RemoveGradientStop(0)).is_err());
    s.apply(StyleCommand::AddGradientStop(GradientStop::new(Rgb::WHITE, 50.0)))
        .unwrap();
    s.apply(StyleCommand::RemoveGradientStop(0)).unwrap();
    assert_eq!(s.background.gradient.stops.len(), 2);
    assert!(s.apply(StyleCommand::RemoveGradientStop(9)).is_err());
}

#[test]
fn text_commands_address_layers() {
    let mut s = StyleSet::default();
    s.apply(StyleCommand::AddLanguage("de".to_owned())).unwrap();
    s.apply(StyleCommand::SetText {
        layer: TextLayerId::Subheadline,
        language: "de".to_owned(),
        text: "Hallo".to_owned(),
    })
    .unwrap();
    s.apply(StyleCommand::SetActiveLanguage("de".to_owned()))
        .unwrap();
    assert_eq!(s.text.subheadline.layer.resolved_text(), "Hallo");
    assert!(
        s.apply(StyleCommand::SetActiveLanguage("it".to_owned()))
            .is_err()
    );
}

#[test]
fn commands_serialize_as_tagged_values() {
    let cmd = StyleCommand::SetShadowOffsetX(3.0);
    assert_eq!(
        serde_json::to_value(&cmd).unwrap(),
        json!({"op": "setShadowOffsetX", "value": 3.0})
    );
    let back: StyleCommand =
        serde_json::from_value(json!({"op": "setNoise", "value": true})).unwrap();
    assert_eq!(back, StyleCommand::SetNoise(true));
}
