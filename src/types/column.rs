use serde::de::{self, Deserializer, Visitor};
use serde::{Deserialize, Serialize, Serializer};
use std::fmt;

/// Kind of data a column holds; selects the sort comparator and cell formatting.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum DataType {
    Number,
    #[default]
    String,
    Date,
    /// Trailing layout padding column; carries no data.
    Spacer,
}

impl<'de> Deserialize<'de> for DataType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> std::result::Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        match raw.to_ascii_lowercase().as_str() {
            "number" => Ok(Self::Number),
            "string" => Ok(Self::String),
            "date" => Ok(Self::Date),
            "spacer" => Ok(Self::Spacer),
            _ => Err(de::Error::unknown_variant(
                &raw,
                &["number", "string", "date", "spacer"],
            )),
        }
    }
}

/// Direction of the active sort.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum SortDirection {
    #[default]
    Ascending,
    Descending,
}

impl SortDirection {
    /// The opposite direction.
    pub fn flipped(self) -> Self {
        match self {
            Self::Ascending => Self::Descending,
            Self::Descending => Self::Ascending,
        }
    }

    /// Page-request encoding: `1` is ascending, anything else descending.
    pub fn from_wire(value: i32) -> Self {
        if value == 1 {
            Self::Ascending
        } else {
            Self::Descending
        }
    }

    pub fn to_wire(self) -> i32 {
        match self {
            Self::Ascending => 1,
            Self::Descending => 2,
        }
    }

    /// CSS class / menu key for this direction.
    pub fn as_str(self) -> &'static str {
        match self {
            Self::Ascending => "ascending",
            Self::Descending => "descending",
        }
    }
}

/// One column of the grid.
///
/// Field names follow the column-model JSON accepted from the embedding page
/// and returned by the page endpoint.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ColumnDescriptor {
    pub label: String,
    pub data_type: DataType,
    pub data_field: Option<String>,
    /// Width in pixels, excluding cell border/padding.
    pub width: f32,
    pub hideable: bool,
    pub hidden: bool,
    pub sortable: bool,
    /// Pre-sorted direction. Accepts `false`, `0`, `1`, `2`,
    /// `"ascending"` and `"descending"` on input.
    #[serde(
        serialize_with = "serialize_sorted",
        deserialize_with = "deserialize_sorted"
    )]
    pub sorted: Option<SortDirection>,
    pub freezable: bool,
    pub frozen: bool,
    pub resizable: bool,
    pub movable: bool,
}

/// Default width for descriptors that omit one.
pub const DEFAULT_COLUMN_WIDTH: f32 = 100.0;

impl Default for ColumnDescriptor {
    fn default() -> Self {
        Self {
            label: String::new(),
            data_type: DataType::String,
            data_field: None,
            width: DEFAULT_COLUMN_WIDTH,
            hideable: false,
            hidden: false,
            sortable: false,
            sorted: None,
            freezable: false,
            frozen: false,
            resizable: false,
            movable: false,
        }
    }
}

impl ColumnDescriptor {
    /// A fully interactive column of the given type.
    pub fn new(label: impl Into<String>, data_type: DataType, width: f32) -> Self {
        Self {
            label: label.into(),
            data_type,
            width,
            hideable: true,
            sortable: true,
            freezable: true,
            resizable: true,
            movable: true,
            ..Self::default()
        }
    }

    /// The non-interactive trailing spacer column.
    pub fn spacer(width: f32) -> Self {
        Self {
            label: String::new(),
            data_type: DataType::Spacer,
            width,
            ..Self::default()
        }
    }

    pub fn is_spacer(&self) -> bool {
        self.data_type == DataType::Spacer
    }

    pub fn with_field(mut self, field: impl Into<String>) -> Self {
        self.data_field = Some(field.into());
        self
    }

    pub fn with_sorted(mut self, direction: SortDirection) -> Self {
        self.sorted = Some(direction);
        self
    }

    pub fn with_frozen(mut self, frozen: bool) -> Self {
        self.frozen = frozen;
        self
    }

    pub fn with_hidden(mut self, hidden: bool) -> Self {
        self.hidden = hidden;
        self
    }
}

fn serialize_sorted<S>(value: &Option<SortDirection>, serializer: S) -> Result<S::Ok, S::Error>
where
    S: Serializer,
{
    match value {
        Some(direction) => serializer.serialize_str(direction.as_str()),
        None => serializer.serialize_bool(false),
    }
}

fn deserialize_sorted<'de, D>(deserializer: D) -> Result<Option<SortDirection>, D::Error>
where
    D: Deserializer<'de>,
{
    struct SortedVisitor;

    impl<'de> Visitor<'de> for SortedVisitor {
        type Value = Option<SortDirection>;

        fn expecting(&self, f: &mut fmt::Formatter) -> fmt::Result {
            f.write_str("false, 0, 1, 2, \"ascending\" or \"descending\"")
        }

        fn visit_bool<E: de::Error>(self, v: bool) -> Result<Self::Value, E> {
            Ok(v.then_some(SortDirection::Ascending))
        }

        fn visit_i64<E: de::Error>(self, v: i64) -> Result<Self::Value, E> {
            Ok(match v {
                0 => None,
                2 => Some(SortDirection::Descending),
                _ => Some(SortDirection::Ascending),
            })
        }

        fn visit_u64<E: de::Error>(self, v: u64) -> Result<Self::Value, E> {
            Ok(match v {
                0 => None,
                2 => Some(SortDirection::Descending),
                _ => Some(SortDirection::Ascending),
            })
        }

        fn visit_f64<E: de::Error>(self, v: f64) -> Result<Self::Value, E> {
            Ok(if v.abs() < f64::EPSILON {
                None
            } else if (v - 2.0).abs() < f64::EPSILON {
                Some(SortDirection::Descending)
            } else {
                Some(SortDirection::Ascending)
            })
        }

        fn visit_str<E: de::Error>(self, v: &str) -> Result<Self::Value, E> {
            match v.to_ascii_lowercase().as_str() {
                "" | "false" | "0" | "none" => Ok(None),
                "ascending" | "asc" | "1" => Ok(Some(SortDirection::Ascending)),
                "descending" | "desc" | "2" => Ok(Some(SortDirection::Descending)),
                other => Err(E::invalid_value(de::Unexpected::Str(other), &self)),
            }
        }

        fn visit_unit<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_none<E: de::Error>(self) -> Result<Self::Value, E> {
            Ok(None)
        }

        fn visit_some<D2: Deserializer<'de>>(self, d: D2) -> Result<Self::Value, D2::Error> {
            d.deserialize_any(self)
        }
    }

    deserializer.deserialize_any(SortedVisitor)
}
