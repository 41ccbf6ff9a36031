//! OCR input model.
//!
//! The OCR engine itself runs outside this crate. Its output arrives either
//! as plain text (one recognized line per line) or as PaddleOCR JSON, and is
//! reduced to the ordered line sequence the extractors consume.

use std::path::Path;

use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::{InputError, LicrError, Result};

/// A detected text box with its coordinates and content.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct TextBox {
    /// Bounding box coordinates (x1, y1, x2, y2, x3, y3, x4, y4) for quadrilateral.
    pub bbox: [f32; 8],

    /// Recognized text content.
    pub text: String,

    /// Recognition confidence score (0.0 - 1.0).
    pub recognition_score: f32,
}

impl TextBox {
    /// A box with no geometry, for line-only input.
    pub fn from_text(text: impl Into<String>) -> Self {
        Self {
            bbox: [0.0; 8],
            text: text.into(),
            recognition_score: 1.0,
        }
    }

    /// Get the axis-aligned bounding rectangle.
    pub fn rect(&self) -> (f32, f32, f32, f32) {
        let xs = [self.bbox[0], self.bbox[2], self.bbox[4], self.bbox[6]];
        let ys = [self.bbox[1], self.bbox[3], self.bbox[5], self.bbox[7]];

        let min_x = xs.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_x = xs.iter().cloned().fold(f32::NEG_INFINITY, f32::max);
        let min_y = ys.iter().cloned().fold(f32::INFINITY, f32::min);
        let max_y = ys.iter().cloned().fold(f32::NEG_INFINITY, f32::max);

        (min_x, min_y, max_x, max_y)
    }
}

/// Result of OCR processing on one document image.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct OcrResult {
    /// Recognized text boxes in OCR order.
    pub boxes: Vec<TextBox>,

    /// Full text (boxes joined with newlines).
    pub text: String,
}

impl OcrResult {
    /// Build from an already isolated line sequence.
    pub fn from_lines<I, S>(lines: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self::from_boxes(lines.into_iter().map(TextBox::from_text).collect())
    }

    fn from_boxes(boxes: Vec<TextBox>) -> Self {
        let mut result = Self {
            boxes,
            text: String::new(),
        };
        result.rebuild_text();
        result
    }

    /// Parse plain text, one OCR line per non-blank line.
    pub fn from_plain_text(text: &str) -> Result<Self> {
        let lines: Vec<&str> = text.lines().filter(|l| !l.trim().is_empty()).collect();
        if lines.is_empty() {
            return Err(InputError::Empty.into());
        }
        Ok(Self::from_lines(lines))
    }

    /// Parse PaddleOCR output.
    ///
    /// Accepts the engine's page list (`[[entry, ...], ...]`, first page
    /// used), a single page (`[entry, ...]`) where each entry is
    /// `[quad, [text, score]]`, or a bare list of strings.
    pub fn from_paddle_json(json: &str) -> Result<Self> {
        let value: Value = serde_json::from_str(json)
            .map_err(|e| InputError::Malformed(e.to_string()))?;

        let top = value
            .as_array()
            .ok_or_else(|| malformed("expected a JSON array"))?;

        let boxes = if top.iter().all(Value::is_string) {
            top.iter()
                .filter_map(Value::as_str)
                .map(TextBox::from_text)
                .collect()
        } else if top.first().is_some_and(is_entry) {
            parse_page(top)?
        } else {
            match top.first() {
                Some(Value::Array(page)) => parse_page(page)?,
                Some(Value::Null) | None => Vec::new(),
                Some(_) => return Err(malformed("unrecognized OCR result layout").into()),
            }
        };

        let result = Self::from_boxes(boxes);
        if result.boxes.is_empty() {
            return Err(InputError::Empty.into());
        }

        debug!("Loaded {} OCR boxes from JSON", result.boxes.len());
        Ok(result)
    }

    /// Load OCR output from a `.json` or `.txt` file.
    pub fn from_path(path: &Path) -> Result<Self> {
        let extension = path
            .extension()
            .and_then(|e| e.to_str())
            .unwrap_or("")
            .to_lowercase();

        let content = std::fs::read_to_string(path)?;
        match extension.as_str() {
            "json" => Self::from_paddle_json(&content),
            "txt" | "text" => Self::from_plain_text(&content),
            _ => Err(InputError::UnsupportedFormat(extension).into()),
        }
    }

    /// The OCR line sequence handed to the extractors.
    pub fn lines(&self) -> Vec<String> {
        self.boxes.iter().map(|b| b.text.clone()).collect()
    }

    /// Drop boxes recognized with a score below `min_score`.
    pub fn filter_by_score(&mut self, min_score: f32) {
        let before = self.boxes.len();
        self.boxes.retain(|b| b.recognition_score >= min_score);
        if self.boxes.len() != before {
            debug!(
                "Dropped {} OCR boxes below score {:.2}",
                before - self.boxes.len(),
                min_score
            );
            self.rebuild_text();
        }
    }

    /// Sort boxes by reading order (top-to-bottom, left-to-right).
    pub fn sort_by_reading_order(&mut self) {
        self.boxes.sort_by(|a, b| {
            let (_, ay, _, _) = a.rect();
            let (_, by, _, _) = b.rect();

            // Group by approximate vertical position (within 20 pixels)
            let row_a = (ay / 20.0) as i32;
            let row_b = (by / 20.0) as i32;

            if row_a != row_b {
                row_a.cmp(&row_b)
            } else {
                let (ax, _, _, _) = a.rect();
                let (bx, _, _, _) = b.rect();
                ax.partial_cmp(&bx).unwrap_or(std::cmp::Ordering::Equal)
            }
        });

        self.rebuild_text();
    }

    fn rebuild_text(&mut self) {
        self.text = self
            .boxes
            .iter()
            .map(|b| b.text.as_str())
            .collect::<Vec<_>>()
            .join("\n");
    }
}

fn malformed(msg: &str) -> InputError {
    InputError::Malformed(msg.to_string())
}

/// `[quad, [text, score]]`
fn is_entry(value: &Value) -> bool {
    value
        .as_array()
        .and_then(|entry| entry.last())
        .and_then(Value::as_array)
        .and_then(|recognition| recognition.first())
        .is_some_and(Value::is_string)
}

fn parse_page(page: &[Value]) -> Result<Vec<TextBox>> {
    page.iter()
        .enumerate()
        .map(|(i, entry)| {
            parse_entry(entry)
                .ok_or_else(|| LicrError::from(malformed(&format!("bad entry at index {}", i))))
        })
        .collect()
}

fn parse_entry(entry: &Value) -> Option<TextBox> {
    let entry = entry.as_array()?;
    let recognition = entry.last()?.as_array()?;
    let text = recognition.first()?.as_str()?.to_string();
    let recognition_score = recognition.get(1).and_then(Value::as_f64).unwrap_or(1.0) as f32;

    let mut bbox = [0.0f32; 8];
    if entry.len() >= 2 {
        let points = entry[0].as_array()?;
        for (i, point) in points.iter().take(4).enumerate() {
            let point = point.as_array()?;
            bbox[i * 2] = point.first()?.as_f64()? as f32;
            bbox[i * 2 + 1] = point.get(1)?.as_f64()? as f32;
        }
    }

    Some(TextBox {
        bbox,
        text,
        recognition_score,
    })
}
