use super::*;

fn key(family: &str, weight: u16, italic: bool) -> FaceKey {
    FaceKey {
        family: family.to_owned(),
        weight,
        italic,
    }
}

#[test]
fn parse_font_stem_maps_weights_and_italics() {
    assert_eq!(parse_font_stem("Inter-Bold"), key("Inter", 700, false));
    assert_eq!(parse_font_stem("Inter-BoldItalic"), key("Inter", 700, true));
    assert_eq!(parse_font_stem("Inter-Italic"), key("Inter", 400, true));
    assert_eq!(parse_font_stem("Inter-SemiBold"), key("Inter", 600, false));
    assert_eq!(parse_font_stem("Inter"), key("Inter", 400, false));
    assert_eq!(parse_font_stem("Open-Sans"), key("Open-Sans", 400, false));
}

#[test]
fn pick_face_prefers_nearest_weight() {
    let faces = [key("Inter", 400, false), key("Inter", 700, false), key("Roboto", 600, false)];
    let refs = faces.iter().collect::<Vec<_>>();
    assert_eq!(pick_face(&refs, "Inter", 600, false), Some(1));
    assert_eq!(pick_face(&refs, "Inter", 300, false), Some(0));
    assert_eq!(pick_face(&refs, "inter", 400, false), Some(0));
    assert_eq!(pick_face(&refs, "Lato", 400, false), None);
}

#[test]
fn pick_face_prefers_matching_style() {
    let faces = [key("Inter", 400, true), key("Inter", 700, false)];
    let refs = faces.iter().collect::<Vec<_>>();
    assert_eq!(pick_face(&refs, "Inter", 700, true), Some(0));
    assert_eq!(pick_face(&refs, "Inter", 400, false), Some(1));
}

#[test]
fn family_names_ignore_spacing_and_case() {
    let faces = [key("OpenSans", 400, false)];
    let refs = faces.iter().collect::<Vec<_>>();
    assert_eq!(pick_face(&refs, "Open Sans", 400, false), Some(0));
}

#[test]
fn empty_book_resolves_nothing() {
    let book = FontBook::new();
    assert!(book.is_empty());
    assert!(book.resolve("Inter", 400, false).is_none());
}

#[test]
fn register_rejects_garbage_bytes() {
    let mut book = FontBook::new();
    assert!(book.register_face("Inter", 400, false, vec![0, 1, 2, 3]).is_err());
    assert!(book.is_empty());
}

fn fixture_dir() -> std::path::PathBuf {
    std::path::Path::new(env!("CARGO_MANIFEST_DIR")).join("tests/data/fonts")
}

#[test]
fn dir_loader_registers_fixture_fonts() {
    let mut book = FontBook::new();
    let n = DirFontLoader::new(fixture_dir()).load_all(&mut book).unwrap();
    assert!(n >= 1);
    assert_eq!(n, book.len());
    assert!(book.has_weight("DejaVuSans", 400));
    assert!(book.has_family("dejavu sans"));
}

#[test]
fn unknown_family_resolves_to_fallback() {
    let mut book = FontBook::new();
    DirFontLoader::new(fixture_dir()).load_all(&mut book).unwrap();
    book.set_fallback("DejaVuSans");
    let k = book.resolve("Inter", 700, false).unwrap();
    assert_eq!(k.family, "DejaVuSans");

    // A fallback that is not loaded still resolves to a registered face.
    book.set_fallback("Missing");
    assert!(book.resolve("Inter", 400, false).is_some());
}

#[test]
fn ensure_loaded_reports_missing_weights() {
    let mut book = FontBook::new();
    let mut loader = DirFontLoader::new(fixture_dir());
    assert!(loader.ensure_loaded(&mut book, "DejaVuSans", &[400]).unwrap());
    assert!(!loader.ensure_loaded(&mut book, "DejaVuSans", &[700]).unwrap());
    assert_eq!(book.len(), 1);
}
