//! Snapshot tests for shelfmark-core using insta
//!
//! These capture the exact bytes of the catalog-import export so any change
//! to column order, quoting or name formatting shows up as a diff.

use shelfmark_core::export;
use shelfmark_core::CanonicalBook;

/// The sample shelf: a plain record, an already inverted author, multiple
/// authors, embedded quotes, and a record with nothing but a title.
fn sample_books() -> Vec<CanonicalBook> {
    vec![
        CanonicalBook {
            title: "Principles".to_string(),
            author: "Ray Dalio".to_string(),
            publish_date: "2017-09-19".to_string(),
            isbn: "9781501124020".to_string(),
            publisher: "Simon and Schuster".to_string(),
            number_of_pages: "592".to_string(),
        },
        CanonicalBook {
            title: "The Organized Mind".to_string(),
            author: "Levitin, Daniel J.".to_string(),
            publish_date: "2014".to_string(),
            isbn: "0525954186".to_string(),
            publisher: "Penguin".to_string(),
            number_of_pages: "512".to_string(),
        },
        CanonicalBook {
            title: "Good Omens".to_string(),
            author: "Terry Pratchett, Neil Gaiman".to_string(),
            publish_date: "1990".to_string(),
            isbn: "N/A".to_string(),
            publisher: "Workman".to_string(),
            number_of_pages: "288".to_string(),
        },
        CanonicalBook {
            title: r#"The "Hungry" Ghosts"#.to_string(),
            author: "Gabor Mate".to_string(),
            publish_date: "2008".to_string(),
            isbn: "9780676977417".to_string(),
            publisher: "Knopf Canada".to_string(),
            number_of_pages: "480".to_string(),
        },
        CanonicalBook {
            title: "Untitled Draft".to_string(),
            isbn: "N/A".to_string(),
            ..Default::default()
        },
    ]
}

#[test]
fn snapshot_library_thing_export() {
    let csv = export::export(&sample_books()).unwrap();
    insta::assert_snapshot!("library_thing_export", csv);
}
