use std::fmt;
use std::str::FromStr;

use chrono::{DateTime, TimeZone, Utc};
use uuid::Uuid;

use super::CodeError;

/// The wraps a code can be scoped to.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Wrap {
    SnowySunrise,
    MistyMorning,
    HarvestMoon,
    NewMoon,
    AmberPebbles,
    AmethystPebbles,
    JadePebbles,
    OnyxPebbles,
}

impl Wrap {
    pub const ALL: [Wrap; 8] = [
        Wrap::SnowySunrise,
        Wrap::MistyMorning,
        Wrap::HarvestMoon,
        Wrap::NewMoon,
        Wrap::AmberPebbles,
        Wrap::AmethystPebbles,
        Wrap::JadePebbles,
        Wrap::OnyxPebbles,
    ];

    pub fn name(&self) -> &'static str {
        match self {
            Wrap::SnowySunrise => "Snowy Sunrise",
            Wrap::MistyMorning => "Misty Morning",
            Wrap::HarvestMoon => "Harvest Moon",
            Wrap::NewMoon => "New Moon",
            Wrap::AmberPebbles => "Amber Pebbles",
            Wrap::AmethystPebbles => "Amethyst Pebbles",
            Wrap::JadePebbles => "Jade Pebbles",
            Wrap::OnyxPebbles => "Onyx Pebbles",
        }
    }
}

impl fmt::Display for Wrap {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

impl FromStr for Wrap {
    type Err = CodeError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Wrap::ALL
            .into_iter()
            .find(|w| w.name().eq_ignore_ascii_case(s.trim()))
            .ok_or_else(|| CodeError::UnknownWrap(s.to_string()))
    }
}

/// Column order of the codes tab.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[repr(u8)]
pub enum Column {
    Code = 0,
    CreatedAt,
    CreatedDate,
    Name,
    Scope,
    Percentage,
    UsedAt,
    UsedDate,
}

impl Column {
    pub const COUNT: usize = 8;

    /// A1-notation letter of this column.
    pub fn letter(self) -> char {
        (b'A' + self as u8) as char
    }

    /// Sheet formula rendering the unix timestamp in `source` as a date in
    /// the current row.
    pub fn date_formula(source: Column) -> String {
        format!(
            "=(INDIRECT(CONCATENATE(\"{}\",ROW()))/86400)+DATE(1970,1,1)",
            source.letter()
        )
    }
}

/// One issued discount code.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct CodeRecord {
    pub code: String,
    pub created_at: i64,
    pub name: String,
    /// Empty scope means the code covers every wrap.
    pub scope: Vec<Wrap>,
    pub percentage: u32,
    pub used_at: Option<i64>,
}

impl CodeRecord {
    /// Issue a fresh record: an 8-character lowercase code and a creation
    /// timestamp of now.
    pub fn new(name: &str, scope: Vec<Wrap>, percentage: u32) -> Self {
        Self {
            code: fresh_code(),
            created_at: Utc::now().timestamp(),
            name: name.to_string(),
            scope,
            percentage,
            used_at: None,
        }
    }

    pub fn created_on(&self) -> DateTime<Utc> {
        Utc.timestamp_opt(self.created_at, 0)
            .single()
            .unwrap_or_default()
    }

    pub fn used_on(&self) -> Option<DateTime<Utc>> {
        self.used_at
            .and_then(|t| Utc.timestamp_opt(t, 0).single())
    }

    /// Serialize into the spreadsheet column order, date-formula columns
    /// included.
    pub fn to_row(&self) -> Vec<String> {
        let mut row = vec![String::new(); Column::COUNT];
        row[Column::Code as usize] = self.code.clone();
        row[Column::CreatedAt as usize] = self.created_at.to_string();
        row[Column::CreatedDate as usize] = Column::date_formula(Column::CreatedAt);
        row[Column::Name as usize] = self.name.clone();
        row[Column::Scope as usize] = self
            .scope
            .iter()
            .map(Wrap::name)
            .collect::<Vec<_>>()
            .join(",");
        row[Column::Percentage as usize] = self.percentage.to_string();
        if let Some(used_at) = self.used_at {
            row[Column::UsedAt as usize] = used_at.to_string();
            row[Column::UsedDate as usize] = Column::date_formula(Column::UsedAt);
        }
        row
    }

    /// Parse a spreadsheet row; short rows are padded (older rows lack the
    /// used columns).
    pub fn from_row(row: &[String]) -> Result<Self, CodeError> {
        let cell = |column: Column| row.get(column as usize).map(String::as_str).unwrap_or("");

        let code = cell(Column::Code).trim().to_lowercase();
        if code.is_empty() {
            return Err(CodeError::MalformedRow("empty code cell".to_string()));
        }

        let created_at = cell(Column::CreatedAt).trim().parse::<i64>().map_err(|_| {
            CodeError::MalformedRow(format!("bad creation timestamp for code {code}"))
        })?;

        let scope_cell = cell(Column::Scope).trim();
        let scope = if scope_cell.is_empty() {
            Vec::new()
        } else {
            scope_cell
                .split(',')
                .map(Wrap::from_str)
                .collect::<Result<Vec<_>, _>>()?
        };

        let percentage_cell = cell(Column::Percentage).trim();
        let percentage = if percentage_cell.is_empty() {
            0
        } else {
            percentage_cell.parse::<u32>().map_err(|_| {
                CodeError::MalformedRow(format!("bad discount percentage for code {code}"))
            })?
        };

        let used_cell = cell(Column::UsedAt).trim();
        let used_at = if used_cell.is_empty() {
            None
        } else {
            Some(used_cell.parse::<i64>().map_err(|_| {
                CodeError::MalformedRow(format!("bad use timestamp for code {code}"))
            })?)
        };

        Ok(Self {
            code,
            created_at,
            name: cell(Column::Name).to_string(),
            scope,
            percentage,
            used_at,
        })
    }
}

fn fresh_code() -> String {
    Uuid::new_v4().to_string()[..8].to_lowercase()
}

/// The note sent along with a newly issued code.
pub fn message_template(record: &CodeRecord) -> String {
    let first_name = record.name.split_whitespace().next().unwrap_or("there");
    let valid_for = if record.scope.is_empty() {
        "all wraps".to_string()
    } else {
        record
            .scope
            .iter()
            .map(Wrap::name)
            .collect::<Vec<_>>()
            .join(", ")
    };
    format!(
        "Hi {first_name},\n\n\
         Thank you for the very useful feedback you gave me in the recent expedition! \
         Here is the discount code I promised, which you can use if and when the wrap(s) \
         and associated accessories come up for sale.\n\n\
         Code: {}\n\
         Valid for: {}\n\
         Discount: {}%\n\n\
         Note that this discount code is personal and only valid once.\n",
        record.code, valid_for, record.percentage
    )
}
