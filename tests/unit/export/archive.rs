use super::*;

#[test]
fn entries_keep_insertion_order() {
    let mut a = ExportArchive::new();
    assert!(a.is_empty());
    a.add("b.png", b"two").unwrap();
    a.add("a.png", b"one").unwrap();
    assert_eq!(a.names(), ["b.png".to_owned(), "a.png".to_owned()]);
    let bytes = a.finish().unwrap();

    let mut zip = zip::ZipArchive::new(Cursor::new(bytes)).unwrap();
    assert_eq!(zip.len(), 2);
    assert_eq!(zip.by_index(0).unwrap().name(), "b.png");
    let mut body = Vec::new();
    std::io::Read::read_to_end(&mut zip.by_index(1).unwrap(), &mut body).unwrap();
    assert_eq!(body, b"one");
}

#[test]
fn duplicate_or_empty_names_are_rejected() {
    let mut a = ExportArchive::new();
    a.add("x.png", b"").unwrap();
    assert!(a.add("x.png", b"").is_err());
    assert!(a.add("", b"").is_err());
    assert_eq!(a.len(), 1);
}
