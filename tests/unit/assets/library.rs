use super::*;

#[test]
fn normalize_path_slash_normalization() {
    assert_eq!(normalize_rel_path("a/b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("a\\b.png").unwrap(), "a/b.png");
    assert_eq!(normalize_rel_path("./a//b.png").unwrap(), "a/b.png");
    assert!(normalize_rel_path("../x.png").is_err());
    assert!(normalize_rel_path("/abs.png").is_err());
    assert!(normalize_rel_path("./").is_err());
}

#[test]
fn image_ref_serializes_as_plain_string() {
    let r = ImageRef::new("shots\\home.png").unwrap();
    assert_eq!(
        serde_json::to_value(&r).unwrap(),
        serde_json::json!("shots/home.png")
    );
}

#[test]
fn library_generation_tracks_changes() {
    let mut lib = ImageLibrary::new();
    let r = ImageRef::new("a.png").unwrap();
    assert_eq!(lib.generation(), 0);
    lib.insert(r.clone(), RasterImage::solid(2, 2, [1, 2, 3]).unwrap());
    assert_eq!(lib.generation(), 1);
    assert_eq!(lib.get(&r).unwrap().aspect(), 1.0);
    lib.remove(&r);
    assert_eq!(lib.generation(), 2);
    assert!(lib.get(&r).is_none());
}

#[test]
fn load_without_root_is_an_error() {
    let mut lib = ImageLibrary::new();
    let r = ImageRef::new("missing.png").unwrap();
    assert!(lib.load(&r).is_err());
}

#[test]
fn raster_rejects_empty_dimensions() {
    assert!(RasterImage::solid(0, 4, [0, 0, 0]).is_err());
}
