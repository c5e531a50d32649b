//! Synthetic PDF fixtures shared by the integration tests.

#![allow(dead_code)]

use std::fs;
use std::path::Path;

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Document, Object, Stream};

/// One line of text: (font resource, size, x, y, text).
///
/// `F1` is Helvetica-Bold, `F2` is Helvetica.
pub type Line<'a> = (&'a str, i64, i64, i64, &'a str);

/// Build a Letter-sized PDF with one content stream per page.
pub fn build_pdf(pages: &[Vec<Line<'_>>]) -> Vec<u8> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let bold_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica-Bold",
        "Encoding" => "WinAnsiEncoding",
    });
    let regular_id = doc.add_object(dictionary! {
        "Type" => "Font",
        "Subtype" => "Type1",
        "BaseFont" => "Helvetica",
        "Encoding" => "WinAnsiEncoding",
    });
    let resources_id = doc.add_object(dictionary! {
        "Font" => dictionary! {
            "F1" => bold_id,
            "F2" => regular_id,
        },
    });

    let mut kids = Vec::new();
    for lines in pages {
        let mut operations = Vec::new();
        for (font, size, x, y, text) in lines {
            operations.push(Operation::new("BT", vec![]));
            operations.push(Operation::new(
                "Tf",
                vec![Object::Name(font.as_bytes().to_vec()), Object::Integer(*size)],
            ));
            operations.push(Operation::new(
                "Td",
                vec![Object::Integer(*x), Object::Integer(*y)],
            ));
            operations.push(Operation::new("Tj", vec![Object::string_literal(*text)]));
            operations.push(Operation::new("ET", vec![]));
        }

        let content = Content { operations };
        let content_id = doc.add_object(Stream::new(dictionary! {}, content.encode().unwrap()));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
            "Resources" => resources_id,
            "MediaBox" => vec![0.into(), 0.into(), 612.into(), 792.into()],
        });
        kids.push(Object::Reference(page_id));
    }

    let count = kids.len() as i64;
    doc.objects.insert(
        pages_id,
        Object::Dictionary(dictionary! {
            "Type" => "Pages",
            "Kids" => kids,
            "Count" => count,
        }),
    );
    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);

    let mut buf = Vec::new();
    doc.save_to(&mut buf).unwrap();
    buf
}

/// A two-page travel guide: a 24pt title line, bold 18pt H1 headings and a
/// regular 14pt H2.
pub fn travel_guide() -> Vec<u8> {
    build_pdf(&[
        vec![
            ("F1", 24, 72, 720, "South of France Guide"),
            ("F1", 18, 72, 680, "Coastal Adventures"),
            ("F2", 10, 72, 660, "Beaches and boat trips along the coast."),
            ("F2", 14, 72, 630, "Nightlife"),
            ("F2", 10, 72, 610, "Bars and clubs for a group of friends."),
        ],
        vec![
            ("F1", 18, 72, 720, "Cuisine"),
            ("F2", 10, 72, 700, "Seafood and local cuisine for every trip."),
        ],
    ])
}

/// A PDF with `count` pages of body text.
pub fn long_document(count: usize) -> Vec<u8> {
    let pages: Vec<Vec<Line<'_>>> = (0..count)
        .map(|_| vec![("F2", 10, 72, 720, "Filler page text.")])
        .collect();
    build_pdf(&pages)
}

/// Write bytes to a file, creating parent directories.
pub fn write_file(path: &Path, data: &[u8]) {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).unwrap();
    }
    fs::write(path, data).unwrap();
}
