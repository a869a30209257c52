//! Text measurement for labels.
//!
//! Glyph widths are estimated from the font size; there is no font backend.
//! The estimate is stable, which is what layout needs: the same text and
//! style always measure the same.

/// Font and spacing used to measure and wrap text.
#[derive(Debug, Clone, Copy, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct TextStyle {
    /// Font size in points
    pub font_size: f64,
    /// Font weight (100-900, normal=400, bold=700)
    pub font_weight: u16,
    /// Line height as a multiplier (e.g., 1.5 = 150%)
    pub line_height: f64,
    /// Extra space after every glyph
    pub letter_spacing: f64,
}

impl Default for TextStyle {
    fn default() -> Self {
        Self {
            font_size: 16.0,
            font_weight: 400,
            line_height: 1.2,
            letter_spacing: 0.0,
        }
    }
}

impl TextStyle {
    pub fn with_font_size(mut self, font_size: f64) -> Self {
        self.font_size = font_size;
        self
    }

    pub fn with_weight(mut self, weight: u16) -> Self {
        self.font_weight = weight;
        self
    }

    pub fn with_line_height(mut self, line_height: f64) -> Self {
        self.line_height = line_height;
        self
    }

    pub fn with_letter_spacing(mut self, letter_spacing: f64) -> Self {
        self.letter_spacing = letter_spacing;
        self
    }

    /// Height of a single line.
    pub fn line_height_points(&self) -> f64 {
        self.font_size * self.line_height
    }

    fn glyph_width(&self) -> f64 {
        // Proportional fonts average a bit over half the font size; bold runs wider.
        let base = self.font_size * 0.55;
        let weighted = if self.font_weight >= 600 { base * 1.05 } else { base };
        weighted + self.letter_spacing
    }
}

/// Horizontal alignment of lines within a label.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum TextAlignment {
    #[default]
    Left,
    Center,
    Right,
}

/// Measured text bounds.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct TextMetrics {
    pub width: f64,
    pub height: f64,
    pub lines: usize,
}

/// One wrapped line, positioned within the wrapping width.
#[derive(Debug, Clone, PartialEq)]
pub struct TextLine {
    pub text: String,
    pub x: f64,
    pub y: f64,
    pub width: f64,
}

/// Measure `text`, wrapping at `max_width` and keeping at most `max_lines`
/// lines (0 = unlimited). Empty text measures as zero.
pub fn measure_text(
    text: &str,
    style: &TextStyle,
    max_width: Option<f64>,
    max_lines: usize,
) -> TextMetrics {
    let lines = wrap(text, style, max_width, max_lines);
    if lines.is_empty() {
        return TextMetrics::default();
    }

    TextMetrics {
        width: lines.iter().map(|(_, w)| *w).fold(0.0_f64, f64::max),
        height: lines.len() as f64 * style.line_height_points(),
        lines: lines.len(),
    }
}

/// Wrap and position lines for a box `width` wide.
pub fn layout_lines(
    text: &str,
    style: &TextStyle,
    width: f64,
    max_lines: usize,
    alignment: TextAlignment,
) -> Vec<TextLine> {
    let line_height = style.line_height_points();

    wrap(text, style, Some(width), max_lines)
        .into_iter()
        .enumerate()
        .map(|(i, (text, line_width))| {
            let slack = (width - line_width).max(0.0);
            let x = match alignment {
                TextAlignment::Left => 0.0,
                TextAlignment::Center => slack / 2.0,
                TextAlignment::Right => slack,
            };
            TextLine {
                text,
                x,
                y: i as f64 * line_height,
                width: line_width,
            }
        })
        .collect()
}

/// Greedy word wrap. Explicit newlines always break; a word wider than
/// `max_width` gets a line of its own.
fn wrap(text: &str, style: &TextStyle, max_width: Option<f64>, max_lines: usize) -> Vec<(String, f64)> {
    let glyph = style.glyph_width();
    let max_w = max_width.filter(|w| w.is_finite() && *w > 0.0).unwrap_or(f64::MAX);

    let mut lines: Vec<(String, f64)> = Vec::new();
    'paragraphs: for paragraph in text.lines() {
        let mut current = String::new();
        let mut current_width = 0.0;

        for word in paragraph.split_whitespace() {
            let word_width = word.chars().count() as f64 * glyph;

            if current.is_empty() {
                current.push_str(word);
                current_width = word_width;
            } else if current_width + glyph + word_width <= max_w {
                current.push(' ');
                current.push_str(word);
                current_width += glyph + word_width;
            } else {
                lines.push((std::mem::take(&mut current), current_width));
                if max_lines > 0 && lines.len() == max_lines {
                    break 'paragraphs;
                }
                current.push_str(word);
                current_width = word_width;
            }
        }

        if !current.is_empty() {
            lines.push((current, current_width));
            if max_lines > 0 && lines.len() == max_lines {
                break;
            }
        }
    }
    lines
}
