//! Static font-metric tables for the three standard Helvetica faces.
//!
//! Widths come from the Adobe Helvetica AFM files, in 1/1000 em. The tables cover
//! ASCII 0x20..=0x7E (95 printable characters), index = (char as usize) - 32.
//! The handful of non-ASCII glyphs the renderer emits (bullet, dashes) have explicit
//! widths; everything else falls back to `average_char_width`.

// ────────────────────────────────────────────────────────────────────────────
// Font faces
// ────────────────────────────────────────────────────────────────────────────

/// The three base-14 faces used by the resume layout.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Face {
    Regular,
    Bold,
    Oblique,
}

impl Face {
    pub const ALL: [Face; 3] = [Face::Regular, Face::Bold, Face::Oblique];

    /// Name of the font in the page resource dictionary.
    pub fn resource_name(self) -> &'static str {
        match self {
            Face::Regular => "F1",
            Face::Bold => "F2",
            Face::Oblique => "F3",
        }
    }

    /// PostScript base font name.
    pub fn base_font(self) -> &'static str {
        match self {
            Face::Regular => "Helvetica",
            Face::Bold => "Helvetica-Bold",
            Face::Oblique => "Helvetica-Oblique",
        }
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Font metric table
// ────────────────────────────────────────────────────────────────────────────

/// Width array slot layout:
/// ```text
/// [0]=sp  [1]=!   [2]="   [3]=#   [4]=$   [5]=%   [6]=&   [7]='
/// [8]=(   [9]=)   [10]=*  [11]=+  [12]=,  [13]=-  [14]=.  [15]=/
/// [16..25]=0-9
/// [26]=:  [27]=;  [28]=<  [29]==  [30]=>  [31]=?  [32]=@
/// [33..58]=A-Z
/// [59]=[  [60]=\  [61]=]  [62]=^  [63]=_  [64]=`
/// [65..90]=a-z
/// [91]={  [92]=|  [93]=}  [94]=~
/// ```
pub struct FontMetricTable {
    widths: [u16; 95],
    /// Fallback width (1/1000 em) for characters without an entry.
    pub average_char_width: u16,
}

impl FontMetricTable {
    /// Width of one character in 1/1000 em.
    pub fn char_width(&self, c: char) -> u16 {
        let code = c as usize;
        if (32..=126).contains(&code) {
            return self.widths[code - 32];
        }
        match c {
            '•' => 350,
            '—' => 1000,
            '–' => 556,
            '\u{a0}' => self.widths[0],
            _ => self.average_char_width,
        }
    }

    /// Rendered width of `s` in points at `size_pt`.
    pub fn measure_str(&self, s: &str, size_pt: f32) -> f32 {
        let units: u32 = s.chars().map(|c| u32::from(self.char_width(c))).sum();
        units as f32 * size_pt / 1000.0
    }

    pub fn space_width(&self, size_pt: f32) -> f32 {
        f32::from(self.widths[0]) * size_pt / 1000.0
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Static width tables
// ────────────────────────────────────────────────────────────────────────────

#[rustfmt::skip]
const HELVETICA_WIDTHS: [u16; 95] = [
    // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
    278, 278, 355, 556, 556, 889, 667, 191, 333, 333, 389, 584, 278, 333, 278, 278,
    // 0   1    2    3    4    5    6    7    8    9
    556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
    // :   ;    <    =    >    ?    @
    278, 278, 584, 584, 584, 556, 1015,
    // A   B    C    D    E    F    G    H    I    J    K    L    M
    667, 667, 722, 722, 667, 611, 778, 722, 278, 500, 667, 556, 833,
    // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
    722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
    // [   \    ]    ^    _    `
    278, 278, 278, 469, 556, 333,
    // a   b    c    d    e    f    g    h    i    j    k    l    m
    556, 556, 500, 556, 556, 278, 556, 556, 222, 222, 500, 222, 833,
    // n   o    p    q    r    s    t    u    v    w    x    y    z
    556, 556, 556, 556, 333, 500, 278, 556, 500, 722, 500, 500, 500,
    // {   |    }    ~
    334, 260, 334, 584,
];

static HELVETICA: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    average_char_width: 550,
};

static HELVETICA_BOLD: FontMetricTable = FontMetricTable {
    #[rustfmt::skip]
    widths: [
        // sp  !    "    #    $    %    &    '    (    )    *    +    ,    -    .    /
        278, 333, 474, 556, 556, 889, 722, 238, 333, 333, 389, 584, 278, 333, 278, 278,
        // 0   1    2    3    4    5    6    7    8    9
        556, 556, 556, 556, 556, 556, 556, 556, 556, 556,
        // :   ;    <    =    >    ?    @
        333, 333, 584, 584, 584, 611, 975,
        // A   B    C    D    E    F    G    H    I    J    K    L    M
        722, 722, 722, 722, 667, 611, 778, 722, 278, 556, 722, 611, 833,
        // N   O    P    Q    R    S    T    U    V    W    X    Y    Z
        722, 778, 667, 778, 722, 667, 611, 722, 667, 944, 667, 667, 611,
        // [   \    ]    ^    _    `
        333, 278, 333, 584, 556, 333,
        // a   b    c    d    e    f    g    h    i    j    k    l    m
        556, 611, 556, 611, 556, 333, 611, 611, 278, 278, 556, 278, 889,
        // n   o    p    q    r    s    t    u    v    w    x    y    z
        611, 611, 611, 611, 389, 556, 333, 611, 556, 778, 556, 556, 500,
        // {   |    }    ~
        389, 280, 389, 584,
    ],
    average_char_width: 600,
};

/// Helvetica-Oblique is a slanted Helvetica with identical advance widths.
static HELVETICA_OBLIQUE: FontMetricTable = FontMetricTable {
    widths: HELVETICA_WIDTHS,
    average_char_width: 550,
};

pub fn get_metrics(face: Face) -> &'static FontMetricTable {
    match face {
        Face::Regular => &HELVETICA,
        Face::Bold => &HELVETICA_BOLD,
        Face::Oblique => &HELVETICA_OBLIQUE,
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Word wrap
// ────────────────────────────────────────────────────────────────────────────

/// A run of text in a single face.
#[derive(Debug, Clone, PartialEq)]
pub struct Span {
    pub face: Face,
    pub text: String,
}

impl Span {
    pub fn new(face: Face, text: impl Into<String>) -> Self {
        Self {
            face,
            text: text.into(),
        }
    }
}

/// Greedy word-wrap of mixed-face text into lines no wider than `max_width` points.
///
/// Whitespace is collapsed. A single word wider than the line is placed on its own
/// line and allowed to overflow. Consecutive words in the same face are merged back
/// into one span per line.
pub fn wrap_spans(spans: &[Span], size_pt: f32, max_width: f32) -> Vec<Vec<Span>> {
    let mut lines: Vec<Vec<Span>> = Vec::new();
    let mut current: Vec<Span> = Vec::new();
    let mut current_width = 0.0_f32;

    for span in spans {
        let metrics = get_metrics(span.face);
        for word in span.text.split_whitespace() {
            let word_w = metrics.measure_str(word, size_pt);
            let first_on_line = current.is_empty();
            let space_w = if first_on_line {
                0.0
            } else {
                metrics.space_width(size_pt)
            };

            if !first_on_line && current_width + space_w + word_w > max_width {
                lines.push(std::mem::take(&mut current));
                current_width = word_w;
                push_word(&mut current, span.face, word, false);
            } else {
                current_width += space_w + word_w;
                push_word(&mut current, span.face, word, !first_on_line);
            }
        }
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

/// Plain single-face convenience wrapper over `wrap_spans`.
#[cfg(test)]
fn wrap_text(text: &str, face: Face, size_pt: f32, max_width: f32) -> Vec<String> {
    wrap_spans(&[Span::new(face, text)], size_pt, max_width)
        .into_iter()
        .map(|line| line.into_iter().map(|s| s.text).collect())
        .collect()
}

fn push_word(line: &mut Vec<Span>, face: Face, word: &str, leading_space: bool) {
    let sep = if leading_space { " " } else { "" };
    match line.last_mut() {
        Some(last) if last.face == face => {
            last.text.push_str(sep);
            last.text.push_str(word);
        }
        _ => line.push(Span::new(face, format!("{sep}{word}"))),
    }
}

// ────────────────────────────────────────────────────────────────────────────
// Tests
// ────────────────────────────────────────────────────────────────────────────
