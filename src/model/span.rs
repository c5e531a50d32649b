//! Span-level types produced by a span source.

use serde::{Deserialize, Serialize};

/// Axis-aligned bounding box in page space (top-down y, points).
#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize, Deserialize)]
pub struct BBox {
    /// Left edge
    pub x0: f32,
    /// Top edge
    pub y0: f32,
    /// Right edge
    pub x1: f32,
    /// Bottom edge
    pub y1: f32,
}

impl BBox {
    /// Create a bounding box from its edges.
    pub fn new(x0: f32, y0: f32, x1: f32, y1: f32) -> Self {
        Self { x0, y0, x1, y1 }
    }

    /// Horizontal center.
    pub fn center_x(&self) -> f32 {
        (self.x0 + self.x1) / 2.0
    }

    /// Width of the box.
    pub fn width(&self) -> f32 {
        self.x1 - self.x0
    }
}

/// A run of text sharing one font, with its position on the page.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextSpan {
    /// The text content, untrimmed
    pub text: String,
    /// Font size in points
    pub font_size: f32,
    /// Base font name (e.g., "Helvetica-Bold")
    pub font_name: String,
    /// Whether the font appears to be bold
    pub is_bold: bool,
    /// Bounding box
    pub bbox: BBox,
    /// Zero-based page index
    pub page_index: u32,
}

impl TextSpan {
    /// Create a span, deriving boldness from the font name.
    pub fn new(
        text: impl Into<String>,
        font_size: f32,
        font_name: impl Into<String>,
        bbox: BBox,
        page_index: u32,
    ) -> Self {
        let font_name = font_name.into();
        let is_bold = is_bold_font(&font_name);
        Self {
            text: text.into(),
            font_size,
            font_name,
            is_bold,
            bbox,
            page_index,
        }
    }

    /// Override the bold flag.
    pub fn with_bold(mut self, bold: bool) -> Self {
        self.is_bold = bold;
        self
    }

    /// Trimmed text.
    pub fn trimmed(&self) -> &str {
        self.text.trim()
    }

    /// Whether the span carries any visible text.
    pub fn is_blank(&self) -> bool {
        self.text.trim().is_empty()
    }
}

/// Check whether a font name denotes a bold face.
pub fn is_bold_font(font_name: &str) -> bool {
    font_name.to_lowercase().contains("bold")
}

/// Per-page geometry needed while classifying spans.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct PageContext {
    /// Zero-based page index
    pub page_index: u32,
    /// Page width in points
    pub width: f32,
    /// Page height in points
    pub height: f32,
}

impl PageContext {
    /// Create a page context.
    pub fn new(page_index: u32, width: f32, height: f32) -> Self {
        Self {
            page_index,
            width,
            height,
        }
    }

    /// US Letter page (8.5 x 11 inches).
    pub fn letter(page_index: u32) -> Self {
        Self::new(page_index, 612.0, 792.0)
    }

    /// One-based page number.
    pub fn page_number(&self) -> u32 {
        self.page_index + 1
    }

    /// Horizontal center of the page.
    pub fn center_x(&self) -> f32 {
        self.width / 2.0
    }
}

/// Spans of one page in reading order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PageSpans {
    /// Page geometry
    pub context: PageContext,
    /// Spans in document order
    pub spans: Vec<TextSpan>,
}

impl PageSpans {
    /// Create an empty page.
    pub fn new(context: PageContext) -> Self {
        Self {
            context,
            spans: Vec::new(),
        }
    }

    /// Append a span.
    pub fn push(&mut self, span: TextSpan) {
        self.spans.push(span);
    }

    /// Whether the page has no visible text.
    pub fn is_empty(&self) -> bool {
        self.spans.iter().all(TextSpan::is_blank)
    }
}
