use super::*;
use serde_json::json;

#[test]
fn language_text_keeps_insertion_order_through_serde() {
    let mut t = LanguageText::default();
    t.set("fr", "Bonjour");
    t.set("de", "Hallo");
    t.set("en", "Hello");
    let v = serde_json::to_value(&t).unwrap();
    assert_eq!(v, json!({"en": "Hello", "fr": "Bonjour", "de": "Hallo"}));

    let s = r#"{"ja":"こんにちは","en":"Hello","es":"Hola"}"#;
    let back: LanguageText = serde_json::from_str(s).unwrap();
    assert_eq!(back.languages().collect::<Vec<_>>(), vec!["ja", "en", "es"]);
}

#[test]
fn default_language_is_never_removed() {
    let mut layer = TextLayer::default();
    layer.add_language("fr");
    assert!(!layer.remove_language(DEFAULT_LANGUAGE));
    assert!(layer.text_by_language.contains(DEFAULT_LANGUAGE));
    assert!(layer.remove_language("fr"));
    assert!(!layer.remove_language("fr"));
}

#[test]
fn removing_active_language_resets_to_default() {
    let mut block = TextBlock::default();
    block.add_language("de");
    block.add_language("fr");
    block.set_active_language("fr").unwrap();
    assert!(block.remove_language("fr"));
    assert_eq!(block.headline.layer.active_language, DEFAULT_LANGUAGE);
    assert_eq!(block.subheadline.layer.active_language, DEFAULT_LANGUAGE);

    block.set_active_language("de").unwrap();
    block.remove_language("en");
    assert_eq!(block.headline.layer.active_language, "de");
}

#[test]
fn remove_any_language_leaves_active_language_present() {
    for victim in ["en", "fr", "de", "xx"] {
        for active in ["en", "fr", "de"] {
            let mut layer = TextLayer::default();
            layer.add_language("fr");
            layer.add_language("de");
            layer.set_active_language(active).unwrap();
            layer.remove_language(victim);
            assert!(layer.text_by_language.contains(DEFAULT_LANGUAGE));
            assert!(layer.text_by_language.contains(&layer.active_language));
        }
    }
}

#[test]
fn active_language_must_be_a_key() {
    let mut layer = TextLayer::default();
    assert!(layer.set_active_language("pt").is_err());
    assert_eq!(layer.active_language, DEFAULT_LANGUAGE);
}

#[test]
fn resolved_text_defaults_to_empty() {
    let mut layer = TextLayer::default();
    layer.set_text("en", "Track Every Expense");
    assert_eq!(layer.resolved_text(), "Track Every Expense");
    layer.active_language = "zz".to_owned();
    assert_eq!(layer.resolved_text(), "");
    layer.ensure_invariants();
    assert_eq!(layer.active_language, DEFAULT_LANGUAGE);
}

#[test]
fn copy_style_keeps_own_content() {
    let mut src = TextBlock::default();
    src.headline.layer.set_text("en", "Source");
    src.headline.layer.size_px = 140.0;
    src.headline.position = TextPosition::Bottom;
    src.subheadline.opacity = 40.0;

    let mut dst = TextBlock::default();
    dst.headline.layer.set_text("en", "Mine");
    dst.copy_style_from(&src);
    assert_eq!(dst.headline.layer.resolved_text(), "Mine");
    assert_eq!(dst.headline.layer.size_px, 140.0);
    assert_eq!(dst.headline.position, TextPosition::Bottom);
    assert_eq!(dst.subheadline.opacity, 40.0);
}

#[test]
fn headline_json_is_flat_camel_case() {
    let v = serde_json::to_value(Headline::default()).unwrap();
    assert!(v.get("textByLanguage").is_some());
    assert!(v.get("lineHeightPercent").is_some());
    assert_eq!(v["position"], json!("top"));
}

#[test]
fn block_invariants_share_language_keys() {
    let mut b = TextBlock::default();
    b.headline.layer.set_text("de", "Hallo");
    b.subheadline.layer.set_text("fr", "Salut");
    b.ensure_invariants();
    for layer in [&b.headline.layer, &b.subheadline.layer] {
        for lang in ["en", "de", "fr"] {
            assert!(layer.text_by_language.contains(lang), "{lang}");
        }
    }
    assert_eq!(b.subheadline.layer.text_by_language.get("fr"), Some("Salut"));
}
