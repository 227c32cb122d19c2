use super::*;
use crate::assets::source::MemorySource;

fn solid(width: u32, rgba: [u8; 4]) -> image::RgbaImage {
    image::RgbaImage::from_pixel(width, 2, image::Rgba(rgba))
}

fn paths() -> AssetPaths {
    AssetPaths {
        backgrounds: PathBuf::from("bg"),
        glyphs_normal: PathBuf::from("normal"),
        glyphs_small: PathBuf::from("small"),
        glyphs_positional: None,
    }
}

#[test]
fn variants_are_ordered_by_numeric_suffix_with_base_first() {
    let p = paths();
    let mut src = MemorySource::new();
    src.add_folder(&p.backgrounds);
    src.add_folder(&p.glyphs_small);
    // Listing order is lexicographic: A.png, A10.png, A2.png.
    src.insert_png(&p.glyphs_normal, "A10.png", &solid(10, [10, 0, 0, 255]))
        .unwrap();
    src.insert_png(&p.glyphs_normal, "A2.png", &solid(2, [2, 0, 0, 255]))
        .unwrap();
    src.insert_png(&p.glyphs_normal, "A.png", &solid(1, [1, 0, 0, 255]))
        .unwrap();

    let (store, warnings) = AssetStore::load(&p, &src, &NamingRules::default());
    assert!(warnings.is_empty());

    let variants = store.variants_for(BaseSymbol::Char('A'), SizeClass::Normal);
    let order: Vec<u32> = variants.iter().map(|v| v.variant).collect();
    assert_eq!(order, vec![0, 2, 10]);
    let widths: Vec<u32> = variants.iter().map(|v| v.image.width).collect();
    assert_eq!(widths, vec![1, 2, 10]);
    assert!(
        store
            .variants_for(BaseSymbol::Char('A'), SizeClass::Small)
            .is_empty()
    );
}

#[test]
fn unreadable_assets_are_skipped_with_warnings() {
    let p = paths();
    let mut src = MemorySource::new();
    src.insert_png(&p.backgrounds, "Background.png", &solid(4, [0, 0, 0, 255]))
        .unwrap();
    src.insert(&p.backgrounds, "Background_B.png", b"garbage".to_vec());
    src.insert_png(&p.glyphs_normal, "B.png", &solid(1, [0, 0, 0, 255]))
        .unwrap();
    // Small folder is missing entirely.

    let (store, warnings) = AssetStore::load(&p, &src, &NamingRules::default());
    assert_eq!(store.total_loaded(), 2);
    assert_eq!(store.background_count(), 1);
    assert!(store.background_for(BackgroundKey::Symbol('B')).is_none());

    assert_eq!(warnings.len(), 2);
    assert!(
        warnings
            .iter()
            .all(|w| matches!(w, Diagnostic::AssetMissing { .. }))
    );
    assert!(warnings.iter().any(|w| w.to_string().contains("Background_B.png")));
    assert!(warnings.iter().any(|w| w.to_string().contains("folder 'small'")));
}

#[test]
fn unrecognized_names_are_ignored_silently() {
    let p = paths();
    let mut src = MemorySource::new();
    src.insert(&p.backgrounds, "README.txt", b"hello".to_vec());
    src.insert(&p.backgrounds, "Thumbnail.png", b"not decoded".to_vec());
    src.add_folder(&p.glyphs_normal);
    src.add_folder(&p.glyphs_small);

    let (store, warnings) = AssetStore::load(&p, &src, &NamingRules::default());
    assert!(warnings.is_empty());
    assert_eq!(store.total_loaded(), 0);
}

#[test]
fn background_fallback_chain() {
    let p = paths();
    let mut src = MemorySource::new();
    src.insert_png(&p.backgrounds, "Background.png", &solid(3, [0, 0, 0, 255]))
        .unwrap();
    src.insert_png(&p.backgrounds, "Background_J.png", &solid(5, [0, 0, 0, 255]))
        .unwrap();
    src.add_folder(&p.glyphs_normal);
    src.add_folder(&p.glyphs_small);

    let (store, _) = AssetStore::load(&p, &src, &NamingRules::default());
    let (key, img) = store
        .background_or_fallback(BackgroundKey::Symbol('J'))
        .unwrap();
    assert_eq!(key, BackgroundKey::Symbol('J'));
    assert_eq!(img.width, 5);

    let (key, _) = store.background_or_fallback(BackgroundKey::Hyphen).unwrap();
    assert_eq!(key, BackgroundKey::Default);

    assert!(AssetStore::default()
        .background_or_fallback(BackgroundKey::Default)
        .is_none());
}

#[test]
fn default_background_is_preferred_over_fallback() {
    let p = paths();
    let mut src = MemorySource::new();
    src.insert_png(&p.backgrounds, "Background.png", &solid(3, [0, 0, 0, 255]))
        .unwrap();
    src.insert_png(
        &p.backgrounds,
        "Background_fallback.png",
        &solid(4, [0, 0, 0, 255]),
    )
    .unwrap();
    src.add_folder(&p.glyphs_normal);
    src.add_folder(&p.glyphs_small);

    let (store, _) = AssetStore::load(&p, &src, &NamingRules::default());
    let (key, img) = store
        .background_or_fallback(BackgroundKey::Symbol('Q'))
        .unwrap();
    assert_eq!(key, BackgroundKey::Default);
    assert_eq!(img.width, 3);
}

#[test]
fn fallback_background_is_the_last_resort() {
    let p = paths();
    let mut src = MemorySource::new();
    src.insert_png(
        &p.backgrounds,
        "Background_fallback.png",
        &solid(4, [0, 0, 0, 255]),
    )
    .unwrap();
    src.add_folder(&p.glyphs_normal);
    src.add_folder(&p.glyphs_small);

    let (store, _) = AssetStore::load(&p, &src, &NamingRules::default());
    let (key, img) = store.background_or_fallback(BackgroundKey::Hyphen).unwrap();
    assert_eq!(key, BackgroundKey::Fallback);
    assert_eq!(img.width, 4);
    let (key, _) = store.background_or_fallback(BackgroundKey::Default).unwrap();
    assert_eq!(key, BackgroundKey::Fallback);
}

#[test]
fn shared_glyph_folder_is_scanned_once() {
    let shared = AssetPaths {
        backgrounds: PathBuf::from("bg"),
        glyphs_normal: PathBuf::from("letters"),
        glyphs_small: PathBuf::from("letters"),
        glyphs_positional: None,
    };
    let mut src = MemorySource::new();
    src.add_folder(&shared.backgrounds);
    src.insert_png("letters", "C.png", &solid(1, [0, 0, 0, 255]))
        .unwrap();
    src.insert_png("letters", "C_small.png", &solid(1, [0, 0, 0, 255]))
        .unwrap();

    let (store, warnings) = AssetStore::load(&shared, &src, &NamingRules::default());
    assert!(warnings.is_empty());
    assert_eq!(store.total_loaded(), 2);
    assert_eq!(
        store
            .variants_for(BaseSymbol::Char('C'), SizeClass::Normal)
            .len(),
        1
    );
    assert_eq!(
        store
            .variants_for(BaseSymbol::Char('C'), SizeClass::Small)
            .len(),
        1
    );
}
