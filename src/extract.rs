//! Labeled field extraction from document text.
//!
//! A [`FieldSet`] maps labels to regular expressions. Extraction takes the
//! first capture group of the first match for each label; labels that do not
//! match get [`NOT_FOUND`]. Nothing here ever fails because a field is absent.

use std::fmt;
use std::fs;
use std::path::Path;

use indexmap::IndexMap;
use log::debug;
use regex::Regex;
use serde::{Deserialize, Serialize};

use crate::constants::NOT_FOUND;
use crate::error::{Error, Result};

fn default_separator() -> String {
    " ".to_string()
}

/// How one labeled value is found in the text.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(untagged)]
pub enum FieldPattern {
    /// A single regex; the value is its first capture group
    Single(String),
    /// Several regexes whose captures are joined, skipping the ones that miss
    Composite {
        parts: Vec<String>,
        #[serde(default = "default_separator")]
        separator: String,
    },
}

/// Ordered set of labeled patterns.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(transparent)]
pub struct FieldSet {
    fields: IndexMap<String, FieldPattern>,
}

impl FieldSet {
    /// Fields of the SAT "Constancia de Situación Fiscal".
    pub fn cif() -> Self {
        let mut fields = IndexMap::new();
        let mut single = |label: &str, pattern: &str| {
            fields.insert(label.to_string(), FieldPattern::Single(pattern.to_string()));
        };
        single("RFC", r"RFC:\s*([\w\d]+)");
        single("CURP", r"CURP:\s*([\w\d]+)");
        fields.insert(
            "Nombre Completo".to_string(),
            FieldPattern::Composite {
                parts: vec![
                    r"Nombre \(s\):\s*(.+)".to_string(),
                    r"Primer Apellido:\s*(.+)".to_string(),
                    r"Segundo Apellido:\s*(.+)".to_string(),
                ],
                separator: default_separator(),
            },
        );
        let address = [
            ("Código Postal", r"Código Postal:\s*(\d+)"),
            ("Calle", r"Nombre de Vialidad:\s*(.+)"),
            ("Número Exterior", r"Número Exterior:\s*(\d+)"),
            ("Colonia", r"Nombre de la Colonia:\s*(.+)"),
            ("Municipio", r"Nombre del Municipio o Demarcación Territorial:\s*(.+)"),
            ("Estado", r"Nombre de la Entidad Federativa:\s*(.+)"),
        ];
        for (label, pattern) in address {
            fields.insert(label.to_string(), FieldPattern::Single(pattern.to_string()));
        }
        Self { fields }
    }

    /// Parses a pattern set from JSON, falling back to YAML.
    ///
    /// ```yaml
    /// RFC: 'RFC:\s*([\w\d]+)'
    /// Nombre Completo:
    ///   parts: ['Nombre \(s\):\s*(.+)', 'Primer Apellido:\s*(.+)']
    /// ```
    pub fn parse(content: &str) -> Result<Self> {
        let set: FieldSet = match serde_json::from_str(content) {
            Ok(set) => set,
            Err(_) => serde_yaml::from_str(content)
                .map_err(|e| Error::ConfigError(format!("Invalid pattern file: {e}")))?,
        };
        if set.fields.is_empty() {
            return Err(Error::ConfigError("Pattern file defines no fields".to_string()));
        }
        Ok(set)
    }

    /// Loads a pattern set from a JSON or YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        debug!("Loading patterns from {}", path.display());
        let content = fs::read_to_string(path).map_err(Error::IoError)?;
        Self::parse(&content)
    }

    pub fn labels(&self) -> impl Iterator<Item = &str> {
        self.fields.keys().map(String::as_str)
    }

    /// Compiles every pattern.
    ///
    /// # Errors
    /// * `Error::ConfigError` naming the label whose regex is invalid
    pub fn compile(&self) -> Result<CompiledFieldSet> {
        let compile = |label: &str, pattern: &str| {
            Regex::new(pattern)
                .map_err(|e| Error::ConfigError(format!("Invalid pattern for '{label}': {e}")))
        };

        let mut fields = Vec::with_capacity(self.fields.len());
        for (label, pattern) in &self.fields {
            let field = match pattern {
                FieldPattern::Single(pattern) => CompiledField::Single(compile(label, pattern)?),
                FieldPattern::Composite { parts, separator } => CompiledField::Composite {
                    parts: parts
                        .iter()
                        .map(|part| compile(label, part))
                        .collect::<Result<Vec<_>>>()?,
                    separator: separator.clone(),
                },
            };
            fields.push((label.clone(), field));
        }
        Ok(CompiledFieldSet { fields })
    }
}

impl Default for FieldSet {
    fn default() -> Self {
        FieldSet::cif()
    }
}

#[derive(Debug, Clone)]
enum CompiledField {
    Single(Regex),
    Composite { parts: Vec<Regex>, separator: String },
}

/// A [`FieldSet`] with its regexes compiled, ready to run against text.
#[derive(Debug, Clone)]
pub struct CompiledFieldSet {
    fields: Vec<(String, CompiledField)>,
}

/// First capture group of the first match, or the whole match when the
/// pattern has no group. Surrounding whitespace is trimmed.
fn first_capture(re: &Regex, text: &str) -> Option<String> {
    let captures = re.captures(text)?;
    let found = captures.get(1).or_else(|| captures.get(0))?;
    Some(found.as_str().trim().to_string())
}

/// Extracted values keyed by label, in pattern-set order.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Extraction {
    values: IndexMap<String, String>,
}

impl Extraction {
    pub fn get(&self, label: &str) -> Option<&str> {
        self.values.get(label).map(String::as_str)
    }

    pub fn iter(&self) -> impl Iterator<Item = (&str, &str)> {
        self.values.iter().map(|(k, v)| (k.as_str(), v.as_str()))
    }

    pub fn len(&self) -> usize {
        self.values.len()
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Labels whose value is the not-found sentinel.
    pub fn missing(&self) -> impl Iterator<Item = &str> {
        self.iter().filter(|(_, v)| *v == NOT_FOUND).map(|(k, _)| k)
    }
}

impl fmt::Display for Extraction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for (label, value) in &self.values {
            writeln!(f, "{label}: {value}")?;
        }
        Ok(())
    }
}

/// Applies every labeled pattern to `text`.
pub fn extract_fields(text: &str, fields: &CompiledFieldSet) -> Extraction {
    let mut values = IndexMap::with_capacity(fields.fields.len());

    for (label, field) in &fields.fields {
        let value = match field {
            CompiledField::Single(re) => first_capture(re, text),
            CompiledField::Composite { parts, separator } => {
                let found: Vec<String> = parts
                    .iter()
                    .filter_map(|re| first_capture(re, text))
                    .filter(|v| !v.is_empty())
                    .collect();
                if found.is_empty() {
                    None
                } else {
                    Some(found.join(separator))
                }
            }
        };
        if value.is_none() {
            debug!("No match for '{label}'");
        }
        values.insert(label.clone(), value.unwrap_or_else(|| NOT_FOUND.to_string()));
    }

    Extraction { values }
}

/// Reads the text of a document: PDFs through `pdf-extract`, anything else
/// as UTF-8 text.
pub fn read_document<P: AsRef<Path>>(path: P) -> Result<String> {
    let path = path.as_ref();
    let is_pdf = path
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("pdf"));

    if is_pdf {
        debug!("Extracting PDF text from {}", path.display());
        if !path.is_file() {
            return Err(Error::IoError(std::io::Error::new(
                std::io::ErrorKind::NotFound,
                format!("{} not found", path.display()),
            )));
        }
        pdf_extract::extract_text(path).map_err(|e| pdf_error(e.to_string()))
    } else {
        debug!("Reading text from {}", path.display());
        fs::read_to_string(path).map_err(Error::IoError)
    }
}

/// `pdf-extract` already labels its messages; [`Error::PdfError`] adds the label itself.
fn pdf_error(message: String) -> Error {
    let message = message.strip_prefix("PDF error: ").unwrap_or(&message);
    Error::PdfError(message.trim_end_matches('.').to_string())
}
