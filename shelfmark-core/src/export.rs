//! Catalog-import export
//!
//! Renders canonical books as the LibraryThing import CSV: a fixed 11-column
//! header followed by one fully quoted row per book.

use crate::error::ExportError;
use crate::types::CanonicalBook;
use csv::{QuoteStyle, Terminator, WriterBuilder};
use std::fs::File;
use std::io::{BufWriter, Write};
use std::path::Path;

/// Conventional file name of the export artifact
pub const EXPORT_FILE_NAME: &str = "library_thing_import.csv";

/// Header line, written verbatim
pub const HEADER: &str = "TITLE,AUTHOR (last, first),DATE,ISBN,PUBLICATION INFO,TAGS,RATING,REVIEW,DATE READ,PAGE COUNT,CALL NUMBER";

/// Number of columns in every row
pub const COLUMN_COUNT: usize = 11;

/// Trait for writing a set of books in a catalog-import format
pub trait Exporter: Send + Sync {
    /// Write all books to a writer
    fn export(&self, books: &[CanonicalBook], writer: &mut dyn Write) -> Result<(), ExportError>;

    /// Format name
    fn format_name(&self) -> &str;

    /// Default file name for the artifact
    fn file_name(&self) -> &str;

    /// MIME type for this format
    fn mime_type(&self) -> &str;
}

/// LibraryThing CSV exporter
#[derive(Debug, Clone, Copy, Default)]
pub struct LibraryThingCsv;

impl LibraryThingCsv {
    pub fn new() -> Self {
        Self
    }
}

impl Exporter for LibraryThingCsv {
    fn export(&self, books: &[CanonicalBook], writer: &mut dyn Write) -> Result<(), ExportError> {
        write_csv(books, writer)
    }

    fn format_name(&self) -> &str {
        "LibraryThing CSV"
    }

    fn file_name(&self) -> &str {
        EXPORT_FILE_NAME
    }

    fn mime_type(&self) -> &str {
        "text/csv"
    }
}

/// Reorder an author string into `"<last>, <rest>"`.
///
/// Splits on `", "` when present, otherwise on single spaces, then moves the
/// final token to the front. This is a heuristic: `"Levitin, Daniel J."`
/// becomes `"Daniel J., Levitin"` and multi-part surnames come out wrong.
pub fn format_author(author: &str) -> String {
    let mut parts: Vec<&str> = author.split(", ").collect();
    if parts.len() == 1 {
        parts = author.split(' ').collect();
    }

    match parts.split_last() {
        Some((last, rest)) => format!("{}, {}", last, rest.join(" ")),
        None => String::new(),
    }
}

/// `"<publisher> (<date>), <pages> pages"`, composed even when fields are empty
pub fn publication_info(book: &CanonicalBook) -> String {
    format!(
        "{} ({}), {} pages",
        book.publisher, book.publish_date, book.number_of_pages
    )
}

/// The 11 fields of a book's row, in header order
pub fn row(book: &CanonicalBook) -> [String; COLUMN_COUNT] {
    [
        book.title.clone(),
        format_author(&book.author),
        book.publish_date.clone(),
        book.isbn.clone(),
        publication_info(book),
        String::new(), // TAGS
        "0".to_string(), // RATING
        String::new(), // REVIEW
        String::new(), // DATE READ
        book.number_of_pages.clone(),
        String::new(), // CALL NUMBER
    ]
}

/// Write the header and one row per book.
/// Every field is quoted; embedded quotes are doubled.
pub fn write_csv<W: Write>(books: &[CanonicalBook], mut writer: W) -> Result<(), ExportError> {
    writer.write_all(HEADER.as_bytes())?;
    writer.write_all(b"\n")?;

    let mut wtr = WriterBuilder::new()
        .quote_style(QuoteStyle::Always)
        .terminator(Terminator::Any(b'\n'))
        .from_writer(writer);

    for book in books {
        wtr.write_record(row(book))?;
    }
    wtr.flush()?;

    Ok(())
}

/// Render the export as a string
pub fn export(books: &[CanonicalBook]) -> Result<String, ExportError> {
    let mut buf = Vec::new();
    write_csv(books, &mut buf)?;
    String::from_utf8(buf)
        .map_err(|e| ExportError::Io(std::io::Error::new(std::io::ErrorKind::InvalidData, e)))
}

/// Write the export to a file, replacing any existing one
pub fn export_to_file(books: &[CanonicalBook], path: &Path) -> Result<(), ExportError> {
    let file = File::create(path)?;
    let mut writer = BufWriter::new(file);
    write_csv(books, &mut writer)?;
    writer.flush()?;
    tracing::info!("Wrote {} books to {:?}", books.len(), path);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    fn principles() -> CanonicalBook {
        CanonicalBook {
            title: "Principles".to_string(),
            author: "Ray Dalio".to_string(),
            publish_date: "2017-09-19".to_string(),
            isbn: "9781501124020".to_string(),
            publisher: "Simon and Schuster".to_string(),
            number_of_pages: "592".to_string(),
        }
    }

    #[test]
    fn test_format_author_space_separated() {
        assert_eq!(format_author("Gabor Mate"), "Mate, Gabor");
        assert_eq!(format_author("Daniel J. Levitin"), "Levitin, Daniel J.");
    }

    #[test]
    fn test_format_author_comma_form() {
        assert_eq!(format_author("Levitin, Daniel J."), "Daniel J., Levitin");
        assert_eq!(
            format_author("Terry Pratchett, Neil Gaiman"),
            "Neil Gaiman, Terry Pratchett"
        );
    }

    #[test]
    fn test_format_author_degenerate() {
        assert_eq!(format_author(""), ", ");
        assert_eq!(format_author("Plato"), "Plato, ");
        // Multi-part surnames are a known limitation
        assert_eq!(format_author("Ursula K. Le Guin"), "Guin, Ursula K. Le");
    }

    #[test]
    fn test_publication_info_empty_fields() {
        assert_eq!(publication_info(&CanonicalBook::default()), " (),  pages");
        assert_eq!(
            publication_info(&principles()),
            "Simon and Schuster (2017-09-19), 592 pages"
        );
    }

    #[test]
    fn test_export_single_book() {
        let csv = export(&[principles()]).unwrap();
        let lines: Vec<&str> = csv.lines().collect();

        assert_eq!(lines.len(), 2);
        assert_eq!(lines[0], HEADER);
        assert_eq!(
            lines[1],
            r#""Principles","Dalio, Ray","2017-09-19","9781501124020","Simon and Schuster (2017-09-19), 592 pages","","0","","","592","""#
        );

        let fields: Vec<&str> = lines[1]
            .strip_prefix('"')
            .and_then(|row| row.strip_suffix('"'))
            .unwrap()
            .split("\",\"")
            .collect();
        assert_eq!(fields.len(), COLUMN_COUNT);
        assert_eq!(fields[6], "0");
    }

    #[test]
    fn test_export_no_books_is_header_only() {
        assert_eq!(export(&[]).unwrap(), format!("{}\n", HEADER));
    }

    #[test]
    fn test_embedded_quotes_are_doubled() {
        let mut book = principles();
        book.title = r#"The "Real" Principles"#.to_string();
        let csv = export(&[book]).unwrap();
        assert!(csv.contains(r#""The ""Real"" Principles""#));

        let mut reader = csv::ReaderBuilder::new()
            .has_headers(false)
            .from_reader(csv.lines().nth(1).unwrap().as_bytes());
        let record = reader.records().next().unwrap().unwrap();
        assert_eq!(record.len(), COLUMN_COUNT);
        assert_eq!(&record[0], r#"The "Real" Principles"#);
    }

    #[test]
    fn test_exporter_trait() {
        let exporter = LibraryThingCsv::new();
        let mut out = Vec::new();
        exporter.export(&[principles()], &mut out).unwrap();
        assert_eq!(String::from_utf8(out).unwrap(), export(&[principles()]).unwrap());
        assert_eq!(exporter.file_name(), "library_thing_import.csv");
        assert_eq!(exporter.mime_type(), "text/csv");
    }

    #[test]
    fn test_export_to_file() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join(EXPORT_FILE_NAME);
        export_to_file(&[principles()], &path).unwrap();
        let written = std::fs::read_to_string(&path).unwrap();
        assert!(written.starts_with("TITLE,AUTHOR (last, first),DATE"));
        assert_eq!(written.lines().count(), 2);
    }
}
