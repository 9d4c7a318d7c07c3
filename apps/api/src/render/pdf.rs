//! PDF writer: laid-out pages → a standalone PDF 1.5 document via `lopdf`.
//!
//! Fonts are the base-14 Helvetica faces (not embedded) with WinAnsiEncoding, so
//! text strings are written as single-byte WinAnsi.

use lopdf::content::{Content, Operation};
use lopdf::{dictionary, Dictionary, Document, Object, Stream};
use thiserror::Error;

use crate::render::font_metrics::Face;
use crate::render::layout::{DrawOp, Page};
use crate::render::style::{PAGE_HEIGHT, PAGE_WIDTH};

#[derive(Debug, Error)]
pub enum RenderError {
    #[error("PDF encoding failed: {0}")]
    Encode(String),

    #[error("PDF file I/O failed: {0}")]
    Io(#[from] std::io::Error),
}

/// Serializes the pages into PDF bytes.
pub fn write_pdf(pages: &[Page]) -> Result<Vec<u8>, RenderError> {
    let mut doc = Document::with_version("1.5");
    let pages_id = doc.new_object_id();

    let mut fonts = Dictionary::new();
    for face in Face::ALL {
        let font_id = doc.add_object(dictionary! {
            "Type" => "Font",
            "Subtype" => "Type1",
            "BaseFont" => face.base_font(),
            "Encoding" => "WinAnsiEncoding",
        });
        fonts.set(face.resource_name(), font_id);
    }
    let resources_id = doc.add_object(dictionary! {
        "Font" => fonts,
    });

    let mut kids: Vec<Object> = Vec::with_capacity(pages.len());
    for page in pages {
        let content = Content {
            operations: page_operations(page),
        };
        let encoded = content
            .encode()
            .map_err(|e| RenderError::Encode(e.to_string()))?;
        let content_id = doc.add_object(Stream::new(dictionary! {}, encoded));
        let page_id = doc.add_object(dictionary! {
            "Type" => "Page",
            "Parent" => pages_id,
            "Contents" => content_id,
        });
        kids.push(page_id.into());
    }

    let page_count = kids.len() as i64;
    let pages_dict = dictionary! {
        "Type" => "Pages",
        "Kids" => kids,
        "Count" => page_count,
        "Resources" => resources_id,
        "MediaBox" => vec![0.into(), 0.into(), PAGE_WIDTH.into(), PAGE_HEIGHT.into()],
    };
    doc.objects.insert(pages_id, Object::Dictionary(pages_dict));

    let catalog_id = doc.add_object(dictionary! {
        "Type" => "Catalog",
        "Pages" => pages_id,
    });
    doc.trailer.set("Root", catalog_id);
    doc.compress();

    let mut buf = Vec::new();
    doc.save_to(&mut buf)
        .map_err(|e| RenderError::Encode(e.to_string()))?;
    Ok(buf)
}

fn page_operations(page: &Page) -> Vec<Operation> {
    let mut ops = Vec::new();
    for op in &page.ops {
        match op {
            DrawOp::Text {
                x,
                y,
                face,
                size,
                color,
                text,
            } => {
                let [r, g, b] = color.components();
                ops.push(Operation::new("BT", vec![]));
                ops.push(Operation::new(
                    "Tf",
                    vec![face.resource_name().into(), (*size).into()],
                ));
                ops.push(Operation::new("rg", vec![r.into(), g.into(), b.into()]));
                ops.push(Operation::new("Td", vec![(*x).into(), (*y).into()]));
                ops.push(Operation::new(
                    "Tj",
                    vec![Object::string_literal(encode_win_ansi(text))],
                ));
                ops.push(Operation::new("ET", vec![]));
            }
            DrawOp::Rule {
                x1,
                x2,
                y,
                thickness,
                color,
            } => {
                let [r, g, b] = color.components();
                ops.push(Operation::new("RG", vec![r.into(), g.into(), b.into()]));
                ops.push(Operation::new("w", vec![(*thickness).into()]));
                ops.push(Operation::new("m", vec![(*x1).into(), (*y).into()]));
                ops.push(Operation::new("l", vec![(*x2).into(), (*y).into()]));
                ops.push(Operation::new("S", vec![]));
            }
        }
    }
    ops
}

/// Encodes text as WinAnsi (CP-1252). Unmappable characters become `?`.
pub fn encode_win_ansi(text: &str) -> Vec<u8> {
    text.chars()
        .map(|c| match c {
            ' '..='~' => c as u8,
            '€' => 0x80,
            '…' => 0x85,
            '‘' => 0x91,
            '’' => 0x92,
            '“' => 0x93,
            '”' => 0x94,
            '•' => 0x95,
            '–' => 0x96,
            '—' => 0x97,
            '™' => 0x99,
            '\u{a0}'..='\u{ff}' => c as u8,
            _ => b'?',
        })
        .collect()
}
