/// Parses settings documents with structure like
/// " title1 key1: value1, value2 key2: value2 title2 key3: value3" (titles, then key: value-list
/// pairs) and turns them into [`CalcSettings`].
///
/// Recognised sections and keys:
/// ```text
/// logging     loglevel: info  log_to_file: false
/// plot        backend: plotters  output: plot.png  width: 800  height: 600
///             stepping: accumulate  unbind_on_failure: false  max_samples: 10000
///             csv: samples.csv
/// evaluation  max_depth: 1000  initial_capacity: 100
/// ```
/// Lines starting with `//`, `#`, `%` or `;` are comments.
use crate::Utils::logger::level_from_str;
use crate::Utils::plots::{PlotBackend, ScatterPlotRenderer, make_renderer};
use crate::datastructures::assoc_store::DEFAULT_CAPACITY;
use crate::symbolic::bindings::Bindings;
use crate::symbolic::evaluator::DEFAULT_MAX_DEPTH;
use crate::symbolic::plot_driver::{PlotDriver, SweepStepping};
use log::LevelFilter;
use nom::{
    IResult, Parser,
    bytes::complete::{take_while, take_while1},
    character::complete::{char, multispace0, multispace1, satisfy, space0},
    combinator::{map, recognize},
    multi::{many0, many1, separated_list1},
    sequence::preceded,
};
use std::collections::HashMap;
use std::fmt;
use std::fs;
use std::path::{Path, PathBuf};
use std::str::FromStr;

type SectionMap = HashMap<String, Vec<Value>>;
type DocumentMap = HashMap<String, SectionMap>;

/// a single scalar in a value list
#[derive(Debug, Clone, PartialEq)]
pub enum Value {
    String(String),
    Float(f64),
    Integer(i64),
    Boolean(bool),
}

impl Value {
    pub fn as_integer(&self) -> Option<i64> {
        if let Value::Integer(i) = self {
            Some(*i)
        } else {
            None
        }
    }

    pub fn as_boolean(&self) -> Option<bool> {
        if let Value::Boolean(b) = self {
            Some(*b)
        } else {
            None
        }
    }

    pub fn to_string_value(&self) -> String {
        match self {
            Value::String(s) => s.clone(),
            Value::Float(f) => f.to_string(),
            Value::Integer(i) => i.to_string(),
            Value::Boolean(b) => b.to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum ConfigError {
    /// the document does not follow the title/key: value layout
    Parse(String),
    UnknownSection(String),
    UnknownKey { section: String, key: String },
    InvalidValue { key: String, value: String },
    Io(String),
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            ConfigError::Parse(msg) => write!(f, "Parsing error: {}", msg),
            ConfigError::UnknownSection(section) => write!(f, "Unknown section '{}'", section),
            ConfigError::UnknownKey { section, key } => {
                write!(f, "Unknown key '{}' in section '{}'", key, section)
            }
            ConfigError::InvalidValue { key, value } => {
                write!(f, "Invalid value '{}' for key '{}'", value, key)
            }
            ConfigError::Io(msg) => write!(f, "Cannot read settings: {}", msg),
        }
    }
}

impl std::error::Error for ConfigError {}

/// title or key: letters, digits and underscores, not starting with a digit
fn word(input: &str) -> IResult<&str, String> {
    let head = satisfy(|c: char| c.is_ascii_alphabetic() || c == '_');
    let tail = take_while(|c: char| c.is_ascii_alphanumeric() || c == '_');
    map(recognize((head, tail)), String::from).parse(input)
}

fn classify(token: &str) -> Value {
    if let Ok(i) = token.parse::<i64>() {
        return Value::Integer(i);
    }
    if let Ok(f) = token.parse::<f64>() {
        return Value::Float(f);
    }
    match token {
        "true" => Value::Boolean(true),
        "false" => Value::Boolean(false),
        _ => Value::String(token.to_string()),
    }
}

/// one token up to whitespace, `,` or `;`
fn scalar(input: &str) -> IResult<&str, Value> {
    let token = take_while1(|c: char| !c.is_whitespace() && c != ',' && c != ';');
    map(token, classify).parse(input)
}

/// `key: v1, v2` and the whitespace after it
fn entry(input: &str) -> IResult<&str, (String, Vec<Value>)> {
    let colon = (space0, char(':'), space0);
    let comma = (space0, char(','), space0);
    let (input, (key, _, values, _)) =
        (word, colon, separated_list1(comma, scalar), multispace0).parse(input)?;
    Ok((input, (key, values)))
}

/// a title followed by at least one entry
fn section(input: &str) -> IResult<&str, (String, Vec<(String, Vec<Value>)>)> {
    let (input, (title, _, entries)) = (word, multispace1, many1(entry)).parse(input)?;
    Ok((input, (title, entries)))
}

fn is_comment(line: &str) -> bool {
    ["//", "#", "%", ";"]
        .iter()
        .any(|prefix| line.starts_with(*prefix))
}

fn strip_comments(input: &str) -> String {
    input
        .lines()
        .map(str::trim)
        .filter(|line| !line.is_empty() && !is_comment(line))
        .collect::<Vec<&str>>()
        .join("\n")
}

/// parses the whole document; sections with the same title are merged
pub fn parse_document(input: &str) -> Result<DocumentMap, ConfigError> {
    let text = strip_comments(input);
    let (remaining, sections) = preceded(multispace0, many0(section))
        .parse(text.as_str())
        .map_err(|e| ConfigError::Parse(format!("{:?}", e)))?;
    if !remaining.is_empty() {
        return Err(ConfigError::Parse(format!(
            "cannot parse settings starting at '{}'",
            remaining
        )));
    }
    let mut document = DocumentMap::new();
    for (title, entries) in sections {
        document.entry(title).or_default().extend(entries);
    }
    Ok(document)
}

/// Everything the calculator can be configured with
#[derive(Clone, Debug, PartialEq)]
pub struct CalcSettings {
    pub loglevel: LevelFilter,
    pub log_to_file: bool,
    pub backend: PlotBackend,
    pub output: PathBuf,
    pub width: u32,
    pub height: u32,
    pub stepping: SweepStepping,
    pub unbind_on_failure: bool,
    /// sweep sample cap, unbounded when `None`
    pub max_samples: Option<usize>,
    /// where to export plot samples, if anywhere
    pub csv: Option<PathBuf>,
    pub max_depth: usize,
    pub initial_capacity: usize,
}

impl Default for CalcSettings {
    fn default() -> Self {
        CalcSettings {
            loglevel: LevelFilter::Info,
            log_to_file: false,
            backend: PlotBackend::Plotters,
            output: PathBuf::from("plot.png"),
            width: 800,
            height: 600,
            stepping: SweepStepping::Accumulate,
            unbind_on_failure: false,
            max_samples: None,
            csv: None,
            max_depth: DEFAULT_MAX_DEPTH,
            initial_capacity: DEFAULT_CAPACITY,
        }
    }
}

fn invalid(key: &str, value: &Value) -> ConfigError {
    ConfigError::InvalidValue {
        key: key.to_string(),
        value: value.to_string_value(),
    }
}

fn as_bool(key: &str, value: &Value) -> Result<bool, ConfigError> {
    value.as_boolean().ok_or_else(|| invalid(key, value))
}

fn as_count<T: TryFrom<i64>>(key: &str, value: &Value) -> Result<T, ConfigError> {
    value
        .as_integer()
        .and_then(|i| T::try_from(i).ok())
        .ok_or_else(|| invalid(key, value))
}

impl CalcSettings {
    /// defaults overridden by whatever the document sets
    pub fn from_document(input: &str) -> Result<CalcSettings, ConfigError> {
        let document = parse_document(input)?;
        let mut settings = CalcSettings::default();
        for (section, entries) in document.iter() {
            for (key, values) in entries.iter() {
                settings.apply(section, key, values)?;
            }
        }
        Ok(settings)
    }

    pub fn from_file(path: &Path) -> Result<CalcSettings, ConfigError> {
        let content = fs::read_to_string(path).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_document(&content)
    }

    fn apply(&mut self, section: &str, key: &str, values: &[Value]) -> Result<(), ConfigError> {
        let value = match values {
            [value] => value,
            _ => {
                return Err(ConfigError::InvalidValue {
                    key: key.to_string(),
                    value: values
                        .iter()
                        .map(Value::to_string_value)
                        .collect::<Vec<_>>()
                        .join(", "),
                });
            }
        };
        let text = value.to_string_value();
        match (section, key) {
            ("logging", "loglevel") => self.loglevel = level_from_str(&text)?,
            ("logging", "log_to_file") => self.log_to_file = as_bool(key, value)?,
            ("plot", "backend") => {
                self.backend = PlotBackend::from_str(&text).map_err(|_| invalid(key, value))?
            }
            ("plot", "output") => self.output = PathBuf::from(text),
            ("plot", "width") => self.width = as_count(key, value)?,
            ("plot", "height") => self.height = as_count(key, value)?,
            ("plot", "stepping") => {
                self.stepping = SweepStepping::from_str(&text).map_err(|_| invalid(key, value))?
            }
            ("plot", "unbind_on_failure") => self.unbind_on_failure = as_bool(key, value)?,
            ("plot", "max_samples") => self.max_samples = Some(as_count(key, value)?),
            ("plot", "csv") => self.csv = Some(PathBuf::from(text)),
            ("evaluation", "max_depth") => self.max_depth = as_count(key, value)?,
            ("evaluation", "initial_capacity") => self.initial_capacity = as_count(key, value)?,
            ("logging" | "plot" | "evaluation", _) => {
                return Err(ConfigError::UnknownKey {
                    section: section.to_string(),
                    key: key.to_string(),
                });
            }
            _ => return Err(ConfigError::UnknownSection(section.to_string())),
        }
        Ok(())
    }

    pub fn plot_driver(&self) -> PlotDriver {
        PlotDriver::new()
            .with_stepping(self.stepping)
            .with_unbind_on_failure(self.unbind_on_failure)
            .with_max_depth(self.max_depth)
            .with_max_samples(self.max_samples)
    }

    pub fn bindings(&self) -> Bindings {
        Bindings::with_capacity(self.initial_capacity)
    }

    pub fn renderer(&self) -> Box<dyn ScatterPlotRenderer> {
        make_renderer(self.backend, self.output.clone(), self.width, self.height)
    }
}
