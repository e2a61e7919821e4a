//! Range filter: `BETWEEN`, `>=` or `<=` depending on which bounds are set
//!
//! Date and datetime bounds describe whole days: the lower bound is moved to
//! 00:00:00 and the upper bound to 23:59:59, so `min = max = 2024-01-01`
//! selects everything that happened on that day.

use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, Duration, NaiveDate, NaiveDateTime, NaiveTime, TimeZone, Utc};
use serde::{Deserialize, Deserializer};

use super::StatementFilter;
use crate::error::ModelResult;
use crate::model::ModelDescriptor;
use crate::query::Statement;
use crate::resolver::resolve;
use crate::session::value::DatabaseValue;

/// Literal accepted in place of a bound to leave that side open
pub const UNBOUNDED: &str = "none";

const SECONDS_PER_DAY: i64 = 86_400;

/// One side of a range
#[derive(Debug, Clone, PartialEq, Default)]
pub enum RangeBound {
    #[default]
    Unbounded,
    Date(NaiveDate),
    DateTime(DateTime<Utc>),
    NaiveDateTime(NaiveDateTime),
    /// Any other comparable value, used as is
    Value(DatabaseValue),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
enum Edge {
    Start,
    End,
}

fn start_of_day(date: NaiveDate) -> NaiveDateTime {
    date.and_time(NaiveTime::default())
}

fn end_of_day(date: NaiveDate) -> NaiveDateTime {
    start_of_day(date) + Duration::seconds(SECONDS_PER_DAY - 1)
}

impl RangeBound {
    /// Open side: no bound, or a null value
    pub fn is_unbounded(&self) -> bool {
        match self {
            RangeBound::Unbounded => true,
            RangeBound::Value(value) => value.is_null(),
            _ => false,
        }
    }

    fn day_edge(date: NaiveDate, edge: Edge) -> NaiveDateTime {
        match edge {
            Edge::Start => start_of_day(date),
            Edge::End => end_of_day(date),
        }
    }

    /// Comparison value for this bound, `None` when open
    fn normalized(&self, edge: Edge) -> Option<DatabaseValue> {
        match self {
            RangeBound::Unbounded => None,
            RangeBound::Date(date) => Some(Self::day_edge(*date, edge).into()),
            RangeBound::NaiveDateTime(dt) => Some(Self::day_edge(dt.date(), edge).into()),
            RangeBound::DateTime(dt) => {
                let naive = Self::day_edge(dt.date_naive(), edge);
                Some(Utc.from_utc_datetime(&naive).into())
            }
            RangeBound::Value(value) if value.is_null() => None,
            RangeBound::Value(value) => Some(value.clone()),
        }
    }
}

impl From<NaiveDate> for RangeBound {
    fn from(date: NaiveDate) -> Self {
        RangeBound::Date(date)
    }
}

impl From<DateTime<Utc>> for RangeBound {
    fn from(dt: DateTime<Utc>) -> Self {
        RangeBound::DateTime(dt)
    }
}

impl From<NaiveDateTime> for RangeBound {
    fn from(dt: NaiveDateTime) -> Self {
        RangeBound::NaiveDateTime(dt)
    }
}

impl From<i32> for RangeBound {
    fn from(value: i32) -> Self {
        RangeBound::Value(value.into())
    }
}

impl From<i64> for RangeBound {
    fn from(value: i64) -> Self {
        RangeBound::Value(value.into())
    }
}

impl From<f64> for RangeBound {
    fn from(value: f64) -> Self {
        RangeBound::Value(value.into())
    }
}

impl<T: Into<RangeBound>> From<Option<T>> for RangeBound {
    fn from(value: Option<T>) -> Self {
        value.map(Into::into).unwrap_or_default()
    }
}

/// Error for text that is neither `"none"` nor a date or datetime
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseRangeBoundError(String);

impl fmt::Display for ParseRangeBoundError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "invalid range bound '{}': expected \"{}\", a date or a datetime",
            self.0, UNBOUNDED
        )
    }
}

impl std::error::Error for ParseRangeBoundError {}

impl FromStr for RangeBound {
    type Err = ParseRangeBoundError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let s = s.trim();
        if s.eq_ignore_ascii_case(UNBOUNDED) {
            return Ok(RangeBound::Unbounded);
        }
        if let Ok(dt) = DateTime::parse_from_rfc3339(s) {
            return Ok(RangeBound::DateTime(dt.with_timezone(&Utc)));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%dT%H:%M:%S%.f") {
            return Ok(RangeBound::NaiveDateTime(dt));
        }
        if let Ok(dt) = NaiveDateTime::parse_from_str(s, "%Y-%m-%d %H:%M:%S%.f") {
            return Ok(RangeBound::NaiveDateTime(dt));
        }
        NaiveDate::parse_from_str(s, "%Y-%m-%d")
            .map(RangeBound::Date)
            .map_err(|_| ParseRangeBoundError(s.to_string()))
    }
}

impl<'de> Deserialize<'de> for RangeBound {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Int(i64),
            Float(f64),
            Text(String),
            Null(()),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Int(i) => Ok(RangeBound::from(i)),
            Raw::Float(f) => Ok(RangeBound::from(f)),
            Raw::Text(text) => text.parse().map_err(serde::de::Error::custom),
            Raw::Null(()) => Ok(RangeBound::Unbounded),
        }
    }
}

/// Lower and upper bound of a range, both open by default
#[derive(Debug, Clone, PartialEq, Default, Deserialize)]
#[serde(default)]
pub struct DatesType {
    pub min: RangeBound,
    pub max: RangeBound,
}

impl DatesType {
    pub fn new(min: impl Into<RangeBound>, max: impl Into<RangeBound>) -> Self {
        Self {
            min: min.into(),
            max: max.into(),
        }
    }

    /// Normalized `(min, max)` comparison values
    pub fn bounds(&self) -> (Option<DatabaseValue>, Option<DatabaseValue>) {
        (self.min.normalized(Edge::Start), self.max.normalized(Edge::End))
    }
}

/// Range filter over a date, datetime or numeric field
#[derive(Debug, Clone, PartialEq)]
pub struct DatesTypeFilter {
    pub field_name: String,
    pub value: Option<DatesType>,
}

impl DatesTypeFilter {
    pub fn new(field_name: impl Into<String>, value: Option<DatesType>) -> Self {
        Self {
            field_name: field_name.into(),
            value,
        }
    }

    /// Range with both sides given
    pub fn between(
        field_name: impl Into<String>,
        min: impl Into<RangeBound>,
        max: impl Into<RangeBound>,
    ) -> Self {
        Self::new(field_name, Some(DatesType::new(min, max)))
    }
}

impl StatementFilter for DatesTypeFilter {
    fn append_to_statement(
        &self,
        statement: Statement,
        models: &[ModelDescriptor],
    ) -> ModelResult<Statement> {
        let Some(value) = &self.value else {
            return Ok(statement);
        };

        let field = resolve(models, &self.field_name)?;

        let statement = match value.bounds() {
            (Some(min), Some(max)) => statement.filter(field.between(min, max)),
            (Some(min), None) => statement.filter(field.ge(min)),
            (None, Some(max)) => statement.filter(field.le(max)),
            (None, None) => statement,
        };
        Ok(statement)
    }
}
