use super::*;
use serde_json::json;

#[test]
fn parses_hex_forms() {
    assert_eq!(Rgb::parse_hex("#667eea").unwrap(), Rgb::new(0x66, 0x7e, 0xea));
    assert_eq!(Rgb::parse_hex("764BA2").unwrap(), Rgb::new(0x76, 0x4b, 0xa2));
    assert_eq!(Rgb::parse_hex("#fff").unwrap(), Rgb::WHITE);
    assert_eq!(Rgb::parse_hex("#00000080").unwrap(), Rgb::BLACK);
}

#[test]
fn rejects_malformed_hex() {
    assert!(Rgb::parse_hex("#12345").is_err());
    assert!(Rgb::parse_hex("#gg0000").is_err());
    assert!(Rgb::parse_hex("#ééé").is_err());
}

#[test]
fn serde_uses_lowercase_hex_strings() {
    let c = Rgb::new(0x1A, 0x1A, 0x2E);
    assert_eq!(serde_json::to_value(c).unwrap(), json!("#1a1a2e"));
    let back: Rgb = serde_json::from_value(json!("#1A1A2E")).unwrap();
    assert_eq!(back, c);
    assert!(serde_json::from_value::<Rgb>(json!("nope")).is_err());
}
