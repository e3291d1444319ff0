use super::*;
use crate::style::background::BackgroundKind;
use crate::style::text::TextLayerId;

fn project_with(n: usize) -> Project {
    let mut p = Project::new();
    for i in 0..n {
        p.add_image(format!("shot {i}"), None);
    }
    p
}

#[test]
fn new_images_copy_default_by_value() {
    let mut p = Project::new();
    p.default_style.background.kind = BackgroundKind::Solid;
    p.add_image("a", None);
    p.default_style.background.kind = BackgroundKind::Image;
    assert_eq!(p.images[0].style.background.kind, BackgroundKind::Solid);

    p.apply(0, StyleCommand::SetScale(40.0)).unwrap();
    assert_eq!(p.default_style.transform.scale, 70.0);
}

#[test]
fn set_current_as_default_copies_selected_style() {
    let mut p = project_with(2);
    p.select(0).unwrap();
    p.apply(0, StyleCommand::SetRotation(7.0)).unwrap();
    p.set_current_as_default().unwrap();
    assert_eq!(p.default_style.transform.rotation, 7.0);
    p.add_image("c", None);
    assert_eq!(p.images[2].style.transform.rotation, 7.0);
}

#[test]
fn transfer_style_keeps_target_text() {
    let mut p = project_with(2);
    p.apply(
        0,
        StyleCommand::SetText {
            layer: TextLayerId::Headline,
            language: "en".to_owned(),
            text: "First".to_owned(),
        },
    )
    .unwrap();
    p.apply(
        1,
        StyleCommand::SetText {
            layer: TextLayerId::Headline,
            language: "en".to_owned(),
            text: "Second".to_owned(),
        },
    )
    .unwrap();
    p.apply(0, StyleCommand::SetCornerRadius(60.0)).unwrap();
    p.transfer_style(0, 1).unwrap();
    assert_eq!(p.images[1].style.transform.corner_radius, 60.0);
    assert_eq!(p.images[1].style.text.headline.layer.resolved_text(), "Second");
    assert!(p.transfer_style(0, 5).is_err());
}

#[test]
fn remove_image_keeps_selection_in_range() {
    let mut p = project_with(3);
    assert_eq!(p.selected, 2);
    let last = p.images[2].id.clone();
    p.remove_image(&last).unwrap();
    assert_eq!(p.selected, 1);
    let first = p.images[0].id.clone();
    p.remove_image(&first).unwrap();
    assert_eq!(p.selected, 0);
    assert_eq!(p.images.len(), 1);
}

#[test]
fn ids_are_unique_after_removal() {
    let mut p = project_with(2);
    let a = p.images[0].id.clone();
    p.remove_image(&a);
    let c = p.add_image("c", None);
    assert_ne!(c, p.images[0].id);
}

#[test]
fn project_languages_apply_everywhere() {
    let mut p = project_with(2);
    p.add_language("fr");
    assert_eq!(p.languages(), vec!["en".to_owned(), "fr".to_owned()]);
    assert!(p.images.iter().all(|img| {
        img.style
            .text
            .subheadline
            .layer
            .text_by_language
            .contains("fr")
    }));
    assert!(!p.remove_language("en"));
    assert!(p.remove_language("fr"));
    assert_eq!(p.languages(), vec!["en".to_owned()]);
}
