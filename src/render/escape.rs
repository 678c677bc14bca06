//! Escape markers protecting literal newlines and `\$` from the pipeline.
//!
//! Newlines would break single-line pattern matches and `\$` would be taken
//! for a math delimiter, so both are swapped for marker characters before any
//! stage runs and swapped back afterwards. Markers are private-use code points
//! picked per call from those absent in every text that can enter the working
//! string, so they cannot collide with author content.

use crate::error::{RenderError, Result};
use std::collections::HashSet;
use std::ops::RangeInclusive;

const PRIVATE_USE: RangeInclusive<u32> = 0xE000..=0xF8FF;

/// Line break emitted for an escaped newline.
pub const LINE_BREAK: &str = "<br />";

/// A literal character protected during rendering.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Escape {
    Newline,
    Dollar,
}

/// The marker characters chosen for one render call.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EscapeMarkers {
    newline: char,
    dollar: char,
}

impl EscapeMarkers {
    /// Pick two markers that occur in none of `texts`.
    pub fn choose<'a, I>(texts: I) -> Result<Self>
    where
        I: IntoIterator<Item = &'a str>,
    {
        let used: HashSet<char> = texts
            .into_iter()
            .flat_map(|text| text.chars().filter(|c| PRIVATE_USE.contains(&u32::from(*c))))
            .collect();

        let mut free = PRIVATE_USE
            .filter_map(char::from_u32)
            .filter(|c| !used.contains(c));

        match (free.next(), free.next()) {
            (Some(newline), Some(dollar)) => Ok(Self { newline, dollar }),
            _ => Err(RenderError::MarkersExhausted.into()),
        }
    }

    pub fn marker(&self, escape: Escape) -> char {
        match escape {
            Escape::Newline => self.newline,
            Escape::Dollar => self.dollar,
        }
    }

    /// The marker as it sits in the working string, padded by one space each side.
    fn token(&self, escape: Escape) -> String {
        format!(" {} ", self.marker(escape))
    }

    /// Replace every newline and every `\$` with its padded marker.
    pub fn encode(&self, input: &str) -> String {
        input
            .replace('\n', &self.token(Escape::Newline))
            .replace("\\$", &self.token(Escape::Dollar))
    }

    /// Turn markers back into output: newlines become ` <br /> `, escaped dollars `$`.
    ///
    /// A marker that lost its padding in some stage is still decoded, so none
    /// survive into the result.
    pub fn decode(&self, text: &str) -> String {
        let mut out = text
            .replace(&self.token(Escape::Newline), &format!(" {} ", LINE_BREAK))
            .replace(&self.token(Escape::Dollar), "$");

        if out.contains(self.newline) {
            out = out.replace(self.newline, LINE_BREAK);
        }
        if out.contains(self.dollar) {
            out = out.replace(self.dollar, "$");
        }
        out
    }

    /// Collapse markers to a single space. Math mode keeps neither line breaks
    /// nor literal dollar signs.
    pub fn strip_for_math(&self, math: &str) -> String {
        let mut out = math.to_string();
        for escape in [Escape::Newline, Escape::Dollar] {
            out = out.replace(&self.token(escape), " ");
            let marker = self.marker(escape);
            if out.contains(marker) {
                out = out.replace(marker, " ");
            }
        }
        out
    }
}
