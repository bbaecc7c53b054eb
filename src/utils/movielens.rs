//! Parsers for MovieLens-100k style data files.
//!
//! | File     | Delimiter | Columns used                                      |
//! |----------|-----------|---------------------------------------------------|
//! | `u.user` | `\|`      | user id, age, (gender), (occupation), zip code    |
//! | `u.item` | `\|`      | movie id, title, release date, (video), IMDb URL  |
//! | `u.data` | tab       | user id, movie id, rating, (timestamp)            |
//!
//! Blank lines are skipped. Release dates look like `01-Jan-1995`; titles carry
//! a trailing ` (1995)` year which is stripped.

use std::sync::LazyLock;

use chrono::NaiveDate;
use regex::Regex;

static TITLE_YEAR_SUFFIX: LazyLock<Regex> =
    LazyLock::new(|| Regex::new(r"\s*\(\d{4}\)\s*$").unwrap());

const RELEASE_DATE_FORMAT: &str = "%d-%b-%Y";

/// A malformed line in a data file.
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
#[error("line {line}: {reason}")]
pub struct ParseError {
    pub line: usize,
    pub reason: String,
}

impl ParseError {
    fn new(line: usize, reason: impl Into<String>) -> Self {
        Self {
            line,
            reason: reason.into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedUser {
    pub id: i64,
    pub age: Option<i32>,
    pub zipcode: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SeedMovie {
    pub id: i64,
    pub title: String,
    pub released_at: Option<NaiveDate>,
    pub imdb_url: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct SeedRating {
    pub user_id: i64,
    pub movie_id: i64,
    pub score: i32,
}

fn non_empty(field: &str) -> Option<String> {
    let trimmed = field.trim();
    (!trimmed.is_empty()).then(|| trimmed.to_string())
}

fn parse_id(field: Option<&str>, line: usize, name: &str) -> Result<i64, ParseError> {
    let raw = field.ok_or_else(|| ParseError::new(line, format!("missing {name}")))?;
    raw.trim()
        .parse()
        .map_err(|_| ParseError::new(line, format!("invalid {name}: {raw:?}")))
}

/// Numbered, non-blank lines of a file.
fn data_lines(content: &str) -> impl Iterator<Item = (usize, &str)> {
    content
        .lines()
        .enumerate()
        .map(|(i, line)| (i + 1, line))
        .filter(|(_, line)| !line.trim().is_empty())
}

/// Removes the trailing release year from a title.
pub fn strip_title_year(title: &str) -> String {
    TITLE_YEAR_SUFFIX.replace(title.trim(), "").into_owned()
}

/// Parses a `01-Jan-1995` date; empty or malformed values are `None`.
pub fn parse_release_date(field: &str) -> Option<NaiveDate> {
    NaiveDate::parse_from_str(field.trim(), RELEASE_DATE_FORMAT).ok()
}

/// Parses `u.user`.
pub fn parse_users(content: &str) -> Result<Vec<SeedUser>, ParseError> {
    data_lines(content)
        .map(|(line, text)| {
            let fields: Vec<&str> = text.split('|').collect();
            let id = parse_id(fields.first().copied(), line, "user id")?;
            let age = fields.get(1).and_then(|f| f.trim().parse().ok());
            let zipcode = fields.get(4).and_then(|f| non_empty(f));

            Ok(SeedUser { id, age, zipcode })
        })
        .collect()
}

/// Parses `u.item`. Input must already be valid UTF-8; the upstream file is
/// Latin-1 and should be converted first.
pub fn parse_movies(content: &str) -> Result<Vec<SeedMovie>, ParseError> {
    data_lines(content)
        .map(|(line, text)| {
            let fields: Vec<&str> = text.split('|').collect();
            let id = parse_id(fields.first().copied(), line, "movie id")?;
            let title = fields
                .get(1)
                .map(|t| strip_title_year(t))
                .filter(|t| !t.is_empty())
                .ok_or_else(|| ParseError::new(line, "missing title"))?;

            Ok(SeedMovie {
                id,
                title,
                released_at: fields.get(2).and_then(|f| parse_release_date(f)),
                imdb_url: fields.get(4).and_then(|f| non_empty(f)),
            })
        })
        .collect()
}

/// Parses `u.data`. Scores outside `1..=5` are rejected.
pub fn parse_ratings(content: &str) -> Result<Vec<SeedRating>, ParseError> {
    data_lines(content)
        .map(|(line, text)| {
            let mut fields = text.split('\t');
            let user_id = parse_id(fields.next(), line, "user id")?;
            let movie_id = parse_id(fields.next(), line, "movie id")?;
            let score = parse_id(fields.next(), line, "rating")?;

            if !(1..=5).contains(&score) {
                return Err(ParseError::new(line, format!("rating out of range: {score}")));
            }

            Ok(SeedRating {
                user_id,
                movie_id,
                score: score as i32,
            })
        })
        .collect()
}
