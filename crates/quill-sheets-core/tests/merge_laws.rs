use proptest::prelude::*;
use quill_sheets_core::{cascade, Alignment, BorderStyle, CellStyle, Color};

fn color() -> impl Strategy<Value = Color> {
    (any::<u8>(), any::<u8>(), any::<u8>()).prop_map(|(r, g, b)| Color::rgb(r, g, b))
}

fn alignment() -> impl Strategy<Value = Alignment> {
    prop_oneof![
        Just(Alignment::Left),
        Just(Alignment::Center),
        Just(Alignment::Right)
    ]
}

fn border() -> impl Strategy<Value = BorderStyle> {
    prop_oneof![
        Just(BorderStyle::None),
        Just(BorderStyle::Thin),
        Just(BorderStyle::Medium),
        Just(BorderStyle::Thick)
    ]
}

fn style() -> impl Strategy<Value = CellStyle> {
    (
        proptest::option::of(color()),
        proptest::option::of(color()),
        any::<bool>(),
        any::<bool>(),
        proptest::option::of(alignment()),
        proptest::option::of(border()),
        proptest::option::of("[0#.,%]{1,8}"),
    )
        .prop_map(
            |(background, font_color, bold, italic, alignment, border, number_format)| CellStyle {
                background,
                font_color,
                bold,
                italic,
                alignment,
                border,
                number_format,
            },
        )
}

proptest! {
    #[test]
    fn merge_with_empty_is_identity(s in style()) {
        prop_assert_eq!(s.merge(&CellStyle::default()), s.clone());
        prop_assert_eq!(CellStyle::default().merge(&s), s);
    }

    #[test]
    fn set_attributes_override(base in style(), over in style()) {
        let merged = base.merge(&over);
        if over.background.is_some() {
            prop_assert_eq!(merged.background, over.background);
        } else {
            prop_assert_eq!(merged.background, base.background);
        }
        if over.number_format.is_some() {
            prop_assert_eq!(&merged.number_format, &over.number_format);
        }
        prop_assert_eq!(merged.alignment, over.alignment.or(base.alignment));
        prop_assert_eq!(merged.border, over.border.or(base.border));
    }

    #[test]
    fn flags_never_unset(base in style(), over in style()) {
        let merged = base.merge(&over);
        prop_assert_eq!(merged.bold, base.bold || over.bold);
        prop_assert_eq!(merged.italic, base.italic || over.italic);
    }

    #[test]
    fn merge_is_associative(a in style(), b in style(), c in style()) {
        prop_assert_eq!(a.merge(&b).merge(&c), a.merge(&b.merge(&c)));
    }

    #[test]
    fn cascade_folds_left_to_right(layers in proptest::collection::vec(style(), 0..6)) {
        let folded = layers
            .iter()
            .fold(CellStyle::default(), |acc, layer| acc.merge(layer));
        prop_assert_eq!(cascade(&layers), folded);
    }
}

#[test]
fn later_layer_wins() {
    let theme = CellStyle::new().background(Color::GRAY);
    let sheet = CellStyle::new().background(Color::WHITE);
    assert_eq!(cascade([&theme, &sheet]).background, Some(Color::WHITE));
    assert_eq!(cascade([&sheet, &theme]).background, Some(Color::GRAY));
}
