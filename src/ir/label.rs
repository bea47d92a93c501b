//! Ordering directives embedded in label text.
//!
//! A label may carry point-ordering instructions as `_`-separated suffixes:
//!
//! - `car` exports as-is,
//! - `car_2` canonicalizes the corners and starts the cycle at index 2,
//! - `car_2_1` does the same and then reverses the winding.
//!
//! The display name is everything before the first `_`.

use std::fmt;

use crate::error::LabelFileError;

const SEPARATOR: char = '_';

/// How the corners of a quadrilateral should be ordered on export.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct OrderDirective {
    /// Offset into the canonical cycle: positive rotates left, negative
    /// rotates right. Magnitudes of 4 or more leave it unrotated.
    pub start: i64,
    /// Reverse the winding after the first point.
    pub reverse: bool,
}

/// A label split into its display name and optional ordering directive.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct LabelDirective {
    pub name: String,
    pub order: Option<OrderDirective>,
}

impl LabelDirective {
    /// Parses a raw label.
    ///
    /// # Errors
    /// Returns [`LabelFileError::LabelParse`] when the start index or the
    /// reverse flag is not an integer.
    pub fn parse(label: &str) -> Result<Self, LabelFileError> {
        let Some((name, suffix)) = label.split_once(SEPARATOR) else {
            return Ok(Self {
                name: label.to_string(),
                order: None,
            });
        };

        let mut segments = suffix.split(SEPARATOR);
        let start_raw = segments.next().unwrap_or_default();
        let start = start_raw
            .parse::<i64>()
            .map_err(|_| LabelFileError::LabelParse {
                label: label.to_string(),
                message: format!("start index '{start_raw}' is not an integer"),
            })?;

        let reverse = match segments.next() {
            None => false,
            Some(flag_raw) => {
                let flag = flag_raw
                    .parse::<i64>()
                    .map_err(|_| LabelFileError::LabelParse {
                        label: label.to_string(),
                        message: format!("reverse flag '{flag_raw}' is not an integer"),
                    })?;
                flag == 1
            }
        };

        Ok(Self {
            name: name.to_string(),
            order: Some(OrderDirective { start, reverse }),
        })
    }
}

impl fmt::Display for LabelDirective {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self.order {
            None => write!(f, "{}", self.name),
            Some(OrderDirective { start, reverse }) => {
                write!(f, "{}_{}_{}", self.name, start, u8::from(reverse))
            }
        }
    }
}
