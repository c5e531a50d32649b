//! Span sources.
//!
//! A [`SpanSource`] yields, per page, the text spans in reading order along
//! with the page geometry. [`PdfSpanSource`] walks PDF content streams through
//! a [`PdfBackend`]; [`MemorySpanSource`] serves pre-extracted pages.

use std::collections::{BTreeMap, HashMap};
use std::path::Path;

use crate::error::{Error, Result};
use crate::model::{BBox, PageContext, PageSpans, TextSpan};

use super::backend::{ContentOp, LopdfBackend, PageId, PdfBackend, PdfValue};
use super::options::{ErrorMode, ExtractOptions};

/// Kerning adjustment (1/1000 text space units) treated as a word break.
const TJ_SPACE_THRESHOLD: f32 = 200.0;

/// Average glyph width as a fraction of the font size.
const AVG_CHAR_WIDTH: f32 = 0.5;

/// Producer of page spans for one document.
pub trait SpanSource {
    /// Number of pages in the document.
    fn page_count(&self) -> u32;

    /// Spans of the page at a zero-based index.
    fn page_spans(&self, page_index: u32) -> Result<PageSpans>;
}

/// Read every page of a source, honoring the page limit and error mode.
pub fn read_pages<S: SpanSource + ?Sized>(
    source: &S,
    options: &ExtractOptions,
) -> Result<Vec<PageSpans>> {
    let count = source.page_count();
    if !options.allows_pages(count) {
        return Err(Error::TooManyPages {
            pages: count,
            limit: options.max_pages,
        });
    }

    let mut pages = Vec::with_capacity(count as usize);
    for index in 0..count {
        match source.page_spans(index) {
            Ok(page) => pages.push(page),
            Err(e) if options.error_mode == ErrorMode::Lenient => {
                log::warn!("Failed to extract spans from page {}: {}", index + 1, e);
                pages.push(PageSpans::new(PageContext::letter(index)));
            }
            Err(e) => return Err(e),
        }
    }
    Ok(pages)
}

/// A span source over pages already held in memory.
#[derive(Debug, Clone, Default)]
pub struct MemorySpanSource {
    pages: Vec<PageSpans>,
}

impl MemorySpanSource {
    /// Create a source from pages in order.
    pub fn new(pages: Vec<PageSpans>) -> Self {
        Self { pages }
    }

    /// Borrow the pages.
    pub fn pages(&self) -> &[PageSpans] {
        &self.pages
    }
}

impl SpanSource for MemorySpanSource {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_spans(&self, page_index: u32) -> Result<PageSpans> {
        self.pages
            .get(page_index as usize)
            .cloned()
            .ok_or(Error::PageOutOfRange(page_index + 1, self.page_count()))
    }
}

/// A span source reading PDF content streams.
pub struct PdfSpanSource<B: PdfBackend = LopdfBackend> {
    backend: B,
    pages: BTreeMap<u32, PageId>,
}

impl PdfSpanSource<LopdfBackend> {
    /// Open a PDF file.
    pub fn open<P: AsRef<Path>>(path: P) -> Result<Self> {
        Ok(Self::from_backend(LopdfBackend::load_file(path)?))
    }

    /// Open a PDF held in memory.
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        Ok(Self::from_backend(LopdfBackend::load_bytes(data)?))
    }
}

impl<B: PdfBackend> PdfSpanSource<B> {
    /// Wrap an already loaded backend.
    pub fn from_backend(backend: B) -> Self {
        let pages = backend.pages();
        Self { backend, pages }
    }
}

impl<B: PdfBackend> SpanSource for PdfSpanSource<B> {
    fn page_count(&self) -> u32 {
        self.pages.len() as u32
    }

    fn page_spans(&self, page_index: u32) -> Result<PageSpans> {
        let page_num = page_index + 1;
        let page_id = *self
            .pages
            .get(&page_num)
            .ok_or(Error::PageOutOfRange(page_num, self.page_count()))?;

        let (width, height) = self.backend.page_size(page_id)?;
        let context = PageContext::new(page_index, width, height);
        let fonts = self.backend.page_fonts(page_id).unwrap_or_default();
        let content = self.backend.page_content(page_id)?;
        let ops = self.backend.decode_content(&content)?;

        let walker = ContentWalker {
            backend: &self.backend,
            page_id,
            fonts: &fonts,
            context,
        };
        let spans = walker.walk(&ops);
        log::debug!("Page {}: {} spans", page_num, spans.len());

        Ok(PageSpans { context, spans })
    }
}

/// Text matrix state while walking a content stream.
#[derive(Debug, Clone, Copy)]
struct TextMatrix {
    a: f32,
    b: f32,
    c: f32,
    d: f32,
    e: f32,
    f: f32,
    line_e: f32,
    line_f: f32,
    leading: f32,
}

impl Default for TextMatrix {
    fn default() -> Self {
        Self {
            a: 1.0,
            b: 0.0,
            c: 0.0,
            d: 1.0,
            e: 0.0,
            f: 0.0,
            line_e: 0.0,
            line_f: 0.0,
            leading: 12.0,
        }
    }
}

impl TextMatrix {
    fn begin(&mut self) {
        let leading = self.leading;
        *self = Self {
            leading,
            ..Self::default()
        };
    }

    fn set(&mut self, a: f32, b: f32, c: f32, d: f32, e: f32, f: f32) {
        self.a = a;
        self.b = b;
        self.c = c;
        self.d = d;
        self.e = e;
        self.f = f;
        self.line_e = e;
        self.line_f = f;
    }

    /// Move to the start of a new line offset from the current line start.
    fn translate(&mut self, tx: f32, ty: f32) {
        self.line_e += tx * self.a + ty * self.c;
        self.line_f += tx * self.b + ty * self.d;
        self.e = self.line_e;
        self.f = self.line_f;
    }

    fn next_line(&mut self) {
        self.translate(0.0, -self.leading);
    }

    /// Advance along the current line after showing text.
    fn advance(&mut self, tx: f32) {
        self.e += tx * self.a;
        self.f += tx * self.b;
    }

    fn position(&self) -> (f32, f32) {
        (self.e, self.f)
    }

    fn scale(&self) -> f32 {
        (self.a * self.a + self.c * self.c).sqrt()
    }
}

struct ContentWalker<'a, B: PdfBackend> {
    backend: &'a B,
    page_id: PageId,
    fonts: &'a HashMap<Vec<u8>, String>,
    context: PageContext,
}

impl<B: PdfBackend> ContentWalker<'_, B> {
    fn walk(&self, ops: &[ContentOp]) -> Vec<TextSpan> {
        let mut acc = SpanAccumulator::default();
        let mut matrix = TextMatrix::default();
        let mut font_key: Vec<u8> = Vec::new();
        let mut font_name = String::new();
        let mut font_size: f32 = 12.0;
        let mut in_text = false;

        for op in ops {
            match op.operator.as_str() {
                "BT" => {
                    in_text = true;
                    matrix.begin();
                }
                "ET" => in_text = false,
                "Tf" => {
                    if let Some(PdfValue::Name(name)) = op.operands.first() {
                        font_key = name.clone();
                        font_name = self
                            .fonts
                            .get(name)
                            .cloned()
                            .unwrap_or_else(|| String::from_utf8_lossy(name).to_string());
                    }
                    font_size = op.number(1, 12.0);
                }
                "TL" => matrix.leading = op.number(0, matrix.leading),
                "Td" => matrix.translate(op.number(0, 0.0), op.number(1, 0.0)),
                "TD" => {
                    let ty = op.number(1, 0.0);
                    matrix.leading = -ty;
                    matrix.translate(op.number(0, 0.0), ty);
                }
                "Tm" => matrix.set(
                    op.number(0, 1.0),
                    op.number(1, 0.0),
                    op.number(2, 0.0),
                    op.number(3, 1.0),
                    op.number(4, 0.0),
                    op.number(5, 0.0),
                ),
                "T*" => matrix.next_line(),
                "Tj" | "TJ" | "'" | "\"" => {
                    if op.operator == "'" || op.operator == "\"" {
                        matrix.next_line();
                    }
                    if !in_text {
                        continue;
                    }
                    let text = self.show_text(op, &font_key);
                    let chars = text.chars().count() as f32;
                    if !text.trim().is_empty() {
                        let (x, y) = matrix.position();
                        let size = font_size * matrix.scale();
                        let width = chars * size * AVG_CHAR_WIDTH;
                        acc.push(TextSpan::new(
                            text,
                            size,
                            font_name.clone(),
                            self.bbox(x, y, width, size),
                            self.context.page_index,
                        ));
                    }
                    matrix.advance(chars * font_size * AVG_CHAR_WIDTH);
                }
                _ => {}
            }
        }

        acc.finish()
    }

    /// Decode the string operand(s) of a text-showing operator.
    fn show_text(&self, op: &ContentOp, font_key: &[u8]) -> String {
        let decode = |bytes: &[u8]| self.backend.decode_text(self.page_id, font_key, bytes);

        match op.operator.as_str() {
            "TJ" => {
                let Some(PdfValue::Array(items)) = op.operands.first() else {
                    return String::new();
                };
                let mut combined = String::new();
                for item in items {
                    match item {
                        PdfValue::Str(bytes) => combined.push_str(&decode(bytes)),
                        other => {
                            // Large negative adjustments advance far enough to read as a space.
                            let adjustment = -other.as_number().unwrap_or(0.0);
                            if adjustment > TJ_SPACE_THRESHOLD && needs_space_after(&combined) {
                                combined.push(' ');
                            }
                        }
                    }
                }
                combined
            }
            "\"" => match op.operands.get(2) {
                Some(PdfValue::Str(bytes)) => decode(bytes),
                _ => String::new(),
            },
            _ => match op.operands.first() {
                Some(PdfValue::Str(bytes)) => decode(bytes),
                _ => String::new(),
            },
        }
    }

    /// Build a top-down bounding box from a baseline origin.
    fn bbox(&self, x: f32, baseline: f32, width: f32, size: f32) -> BBox {
        let top = baseline + size * 0.8;
        let bottom = baseline - size * 0.2;
        BBox::new(
            x,
            self.context.height - top,
            x + width,
            self.context.height - bottom,
        )
    }
}

/// Merges consecutive runs sharing font and baseline into one span.
#[derive(Default)]
struct SpanAccumulator {
    spans: Vec<TextSpan>,
}

impl SpanAccumulator {
    fn push(&mut self, span: TextSpan) {
        if let Some(prev) = self.spans.last_mut() {
            if continues_run(prev, &span) {
                let gap = span.bbox.x0 - prev.bbox.x1;
                let space_threshold = span.font_size * AVG_CHAR_WIDTH * 0.2;
                if gap > space_threshold
                    && needs_space_after(&prev.text)
                    && !span.text.starts_with([' ', '\u{00A0}'])
                {
                    let starts_spaceless = span
                        .text
                        .chars()
                        .next()
                        .is_some_and(is_spaceless_script_char);
                    let ends_spaceless = prev
                        .text
                        .chars()
                        .last()
                        .is_some_and(is_spaceless_script_char);
                    if !(starts_spaceless && ends_spaceless) {
                        prev.text.push(' ');
                    }
                }
                prev.text.push_str(&span.text);
                prev.bbox.x1 = prev.bbox.x1.max(span.bbox.x1);
                return;
            }
        }
        self.spans.push(span);
    }

    fn finish(self) -> Vec<TextSpan> {
        self.spans
    }
}

fn continues_run(prev: &TextSpan, next: &TextSpan) -> bool {
    prev.font_name == next.font_name
        && (prev.font_size - next.font_size).abs() < 0.1
        && (prev.bbox.y1 - next.bbox.y1).abs() < 0.5
        && next.bbox.x0 >= prev.bbox.x0
        && next.bbox.x0 - prev.bbox.x1 < next.font_size
}

fn needs_space_after(text: &str) -> bool {
    match text.chars().last() {
        None => false,
        Some(c) => !c.is_whitespace() && c != '\u{00A0}' && !is_spaceless_script_char(c),
    }
}

/// Check if character is from a script that doesn't use word spaces.
/// Chinese and Japanese don't use spaces between words, but Korean does.
fn is_spaceless_script_char(c: char) -> bool {
    let code = c as u32;

    // CJK Unified Ideographs and extensions
    (0x4E00..=0x9FFF).contains(&code)
    || (0x3400..=0x4DBF).contains(&code)
    || (0x20000..=0x2EBEF).contains(&code)
    // Hiragana, Katakana
    || (0x3040..=0x30FF).contains(&code)
    // CJK Symbols and Punctuation
    || (0x3000..=0x303F).contains(&code)
}
