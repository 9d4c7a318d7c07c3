//! Flow layout: `ParsedResume` → positioned draw operations, page by page.
//!
//! # Flow model
//! A cursor moves down the frame. Each paragraph is wrapped to the frame width
//! (minus its indent) and emitted line by line; a line that would cross the bottom
//! margin starts a new page. Vertical gaps are dropped at the top of a page.
//! There are no keep-together rules.

use crate::render::font_metrics::{get_metrics, wrap_spans, Face, Span};
use crate::render::style::{
    Rgb, TextStyle, BODY, BULLET, BULLET_GLYPH, CONTACT, DIVIDER_COLOR, DIVIDER_GAP,
    DIVIDER_THICKNESS, FRAME_WIDTH, JOB_HEADER, MARGIN_BOTTOM, MARGIN_LEFT, MARGIN_TOP, NAME,
    NOTE, PAGE_HEIGHT, PAGE_WIDTH, MARGIN_RIGHT, SECTION_GAP, SECTION_HEADER,
};
use crate::resume::{ParsedResume, SectionBody, SectionKey};

const CONTACT_SEPARATOR: &str = "  |  ";

// ────────────────────────────────────────────────────────────────────────────
// Output types
// ────────────────────────────────────────────────────────────────────────────

/// A positioned drawing instruction in PDF user space (origin bottom-left).
#[derive(Debug, Clone, PartialEq)]
pub enum DrawOp {
    Text {
        x: f32,
        /// Baseline.
        y: f32,
        face: Face,
        size: f32,
        color: Rgb,
        text: String,
    },
    Rule {
        x1: f32,
        x2: f32,
        y: f32,
        thickness: f32,
        color: Rgb,
    },
}

#[derive(Debug, Clone, Default, PartialEq)]
pub struct Page {
    pub ops: Vec<DrawOp>,
}

// ────────────────────────────────────────────────────────────────────────────
// Public entry point
// ────────────────────────────────────────────────────────────────────────────

/// Lays out the resume: name, contact line, divider, then every non-empty
/// section in canonical order. Always returns at least one page.
pub fn layout_resume(resume: &ParsedResume) -> Vec<Page> {
    let mut flow = Flow::new();

    if let Some(name) = &resume.name {
        flow.paragraph(&[Span::new(NAME.face, name.as_str())], &NAME, None);
    }
    if !resume.contacts().is_empty() {
        flow.contact_line(&contact_line(resume.contacts()));
    }
    flow.rule();
    flow.gap(DIVIDER_GAP);

    for (key, body) in resume.non_empty_sections() {
        flow.paragraph(
            &[Span::new(SECTION_HEADER.face, key.display_title())],
            &SECTION_HEADER,
            None,
        );
        layout_section(&mut flow, key, body);
        flow.gap(SECTION_GAP);
    }

    flow.finish()
}

fn layout_section(flow: &mut Flow, key: SectionKey, body: &SectionBody) {
    match key {
        SectionKey::Summary => {
            flow.plain_all(&body.paragraphs, &BODY);
            flow.bullets(&body.bullets);
        }
        SectionKey::Experience => {
            for entry in &body.entries {
                flow.plain(&entry.header, &JOB_HEADER);
                flow.bullets(&entry.bullets);
            }
            flow.bullets(&body.bullets);
            flow.plain_all(&body.paragraphs, &BODY);
        }
        SectionKey::Skills => {
            for line in &body.lines {
                flow.paragraph(&skill_spans(line), &BODY, None);
            }
            flow.bullets(&body.bullets);
            flow.plain_all(&body.paragraphs, &BODY);
        }
        SectionKey::Education | SectionKey::Certifications | SectionKey::Projects => {
            flow.plain_all(&body.lines, &BODY);
            flow.bullets(&body.bullets);
            flow.plain_all(&body.paragraphs, &BODY);
        }
        SectionKey::Note => {
            flow.plain_all(&body.paragraphs, &NOTE);
            flow.bullets(&body.bullets);
        }
    }
}

/// Contacts with internal whitespace collapsed, joined by `  |  `.
fn contact_line(contacts: &[String]) -> String {
    contacts
        .iter()
        .map(|c| c.split_whitespace().collect::<Vec<_>>().join(" "))
        .collect::<Vec<_>>()
        .join(CONTACT_SEPARATOR)
}

/// `Category: items` → bold `Category:` followed by regular items.
/// Lines without a colon are a single regular span.
fn skill_spans(line: &str) -> Vec<Span> {
    match line.split_once(':') {
        Some((category, items)) => vec![
            Span::new(Face::Bold, format!("{}:", category.trim())),
            Span::new(Face::Regular, items.trim()),
        ],
        None => vec![Span::new(Face::Regular, line)],
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Flow cursor
// ────────────────────────────────────────────────────────────────────────────

const FRAME_TOP: f32 = PAGE_HEIGHT - MARGIN_TOP;
const RULE_HEIGHT: f32 = 2.0;

struct Flow {
    finished: Vec<Page>,
    current: Page,
    /// Top of the next line box.
    y: f32,
    at_top: bool,
}

impl Flow {
    fn new() -> Self {
        Self {
            finished: Vec::new(),
            current: Page::default(),
            y: FRAME_TOP,
            at_top: true,
        }
    }

    fn finish(mut self) -> Vec<Page> {
        self.finished.push(self.current);
        self.finished
    }

    fn new_page(&mut self) {
        self.finished.push(std::mem::take(&mut self.current));
        self.y = FRAME_TOP;
        self.at_top = true;
    }

    /// Breaks the page if `height` does not fit above the bottom margin.
    fn ensure(&mut self, height: f32) {
        if !self.at_top && self.y - height < MARGIN_BOTTOM {
            self.new_page();
        }
    }

    fn gap(&mut self, height: f32) {
        if !self.at_top {
            self.y -= height;
        }
    }

    fn rule(&mut self) {
        self.ensure(RULE_HEIGHT);
        let y = self.y - RULE_HEIGHT / 2.0;
        self.current.ops.push(DrawOp::Rule {
            x1: MARGIN_LEFT,
            x2: PAGE_WIDTH - MARGIN_RIGHT,
            y,
            thickness: DIVIDER_THICKNESS,
            color: DIVIDER_COLOR,
        });
        self.y -= RULE_HEIGHT;
        self.at_top = false;
    }

    fn plain(&mut self, text: &str, style: &TextStyle) {
        self.paragraph(&[Span::new(style.face, text)], style, None);
    }

    fn plain_all(&mut self, texts: &[String], style: &TextStyle) {
        for text in texts {
            self.plain(text, style);
        }
    }

    fn bullets(&mut self, items: &[String]) {
        for item in items {
            self.paragraph(&[Span::new(BULLET.face, item.as_str())], &BULLET, Some(BULLET_GLYPH));
        }
    }

    /// Draws the contact line as-is when it fits the frame, keeping the padded
    /// separators; a longer line is wrapped like any paragraph.
    fn contact_line(&mut self, line: &str) {
        let style = &CONTACT;
        let width = get_metrics(style.face).measure_str(line, style.size);
        if width > FRAME_WIDTH - style.left_indent {
            self.paragraph(&[Span::new(style.face, line)], style, None);
            return;
        }

        self.gap(style.space_before);
        self.ensure(style.leading);
        let baseline = self.y - style.size;
        self.push_text(MARGIN_LEFT + style.left_indent, baseline, style.face, style, line);
        self.y -= style.leading + style.space_after;
        self.at_top = false;
    }

    /// Wraps and emits one paragraph. `glyph` is drawn at the style's bullet indent
    /// on the first line; the text hangs at `left_indent`.
    fn paragraph(&mut self, spans: &[Span], style: &TextStyle, glyph: Option<&str>) {
        let lines = wrap_spans(spans, style.size, FRAME_WIDTH - style.left_indent);
        if lines.is_empty() {
            return;
        }

        self.gap(style.space_before);
        for (i, line) in lines.into_iter().enumerate() {
            self.ensure(style.leading);
            let baseline = self.y - style.size;

            if let (0, Some(glyph)) = (i, glyph) {
                self.push_text(MARGIN_LEFT + style.bullet_indent, baseline, style.face, style, glyph);
            }

            let mut x = MARGIN_LEFT + style.left_indent;
            for span in line {
                let width = get_metrics(span.face).measure_str(&span.text, style.size);
                self.push_text(x, baseline, span.face, style, &span.text);
                x += width;
            }

            self.y -= style.leading;
            self.at_top = false;
        }
        self.y -= style.space_after;
    }

    fn push_text(&mut self, x: f32, y: f32, face: Face, style: &TextStyle, text: &str) {
        self.current.ops.push(DrawOp::Text {
            x,
            y,
            face,
            size: style.size,
            color: style.color,
            text: text.to_string(),
        });
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
