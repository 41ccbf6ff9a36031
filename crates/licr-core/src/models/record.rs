//! Licence record produced by the extraction pipeline.

use serde::{Deserialize, Serialize};

/// Structured fields recovered from one licence document.
///
/// Every key is always present when serialized. String fields use an empty
/// string when nothing was found; date roles, issuing state and postcode are
/// `None` (serialized as `null`) so callers can tell "not found" apart from
/// "found but blank".
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct LicenceRecord {
    /// Holder name, at most two tokens (surname + given name).
    pub name: String,

    /// Licence expiry date as printed (`DD-MM-YYYY`).
    pub expiry_date: Option<String>,

    /// Date of birth as printed (`DD-MM-YYYY`).
    pub dob: Option<String>,

    /// Issue date as printed. Separators follow the document (`-` or `/`).
    pub issue_date: Option<String>,

    /// `Male`, `Female` or empty.
    pub gender: String,

    /// Address lines joined with newlines.
    pub address: String,

    /// Licence or card number.
    pub id: String,

    /// Height with marker and quotes stripped.
    pub height: String,

    /// Eye colour with marker stripped.
    pub eyes_color: String,

    /// First recognized licence class keyword.
    pub license_type: String,

    /// Issuing region code, e.g. `VIC`.
    pub issuing_state: Option<String>,

    /// Four-digit postcode.
    pub post_code: Option<String>,

    /// OCR line sequence echoed back unmodified.
    pub extracted_text: Vec<String>,
}

impl LicenceRecord {
    /// Serialized key names, in output order.
    pub const FIELD_NAMES: [&'static str; 13] = [
        "name",
        "expiry_date",
        "dob",
        "issue_date",
        "gender",
        "address",
        "id",
        "height",
        "eyes_color",
        "license_type",
        "issuing_state",
        "post_code",
        "extracted_text",
    ];

    /// Create an empty record carrying the given OCR lines.
    pub fn new(extracted_text: Vec<String>) -> Self {
        Self {
            extracted_text,
            ..Self::default()
        }
    }

    /// Names of extracted fields that came back empty or absent.
    ///
    /// `extracted_text` is input, not an extracted field, and is never listed.
    pub fn missing_fields(&self) -> Vec<&'static str> {
        let strings = [
            ("name", self.name.is_empty()),
            ("expiry_date", self.expiry_date.is_none()),
            ("dob", self.dob.is_none()),
            ("issue_date", self.issue_date.is_none()),
            ("gender", self.gender.is_empty()),
            ("address", self.address.is_empty()),
            ("id", self.id.is_empty()),
            ("height", self.height.is_empty()),
            ("eyes_color", self.eyes_color.is_empty()),
            ("license_type", self.license_type.is_empty()),
            ("issuing_state", self.issuing_state.is_none()),
            ("post_code", self.post_code.is_none()),
        ];

        strings
            .into_iter()
            .filter(|(_, missing)| *missing)
            .map(|(name, _)| name)
            .collect()
    }

    /// Field values as display strings, in [`Self::FIELD_NAMES`] order.
    ///
    /// Absent values render as empty strings and the OCR lines are joined
    /// with ` | `. Used for flat output formats such as CSV.
    pub fn to_row(&self) -> Vec<String> {
        let opt = |v: &Option<String>| v.clone().unwrap_or_default();

        vec![
            self.name.clone(),
            opt(&self.expiry_date),
            opt(&self.dob),
            opt(&self.issue_date),
            self.gender.clone(),
            self.address.replace('\n', "; "),
            self.id.clone(),
            self.height.clone(),
            self.eyes_color.clone(),
            self.license_type.clone(),
            opt(&self.issuing_state),
            opt(&self.post_code),
            self.extracted_text.join(" | "),
        ]
    }
}
