use std::cmp::Ordering;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Deserializer, Serialize};

/// A book record as stored and as exchanged over HTTP.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, sqlx::FromRow)]
pub struct Book {
    pub id: i64,
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
}

/// Create payload. The store assigns the id, so any `id` in the body is ignored.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NewBook {
    pub title: String,
    pub author: String,
    pub year: i32,
    pub genre: String,
}

impl NewBook {
    pub fn with_id(self, id: i64) -> Book {
        Book { id, title: self.title, author: self.author, year: self.year, genre: self.genre }
    }
}

impl From<Book> for NewBook {
    fn from(book: Book) -> Self {
        Self { title: book.title, author: book.author, year: book.year, genre: book.genre }
    }
}

/// Search criteria. Both criteria are ANDed; no criteria matches everything.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct BookFilter {
    /// Case-sensitive substring of `author`.
    #[serde(default)]
    pub author: Option<String>,
    /// An empty `year=` is the same as leaving it out.
    #[serde(default, deserialize_with = "empty_as_none")]
    pub year: Option<i32>,
}

/// Query values arrive as text: blank means absent, anything else must parse.
fn empty_as_none<'de, D, T>(deserializer: D) -> Result<Option<T>, D::Error>
where
    D: Deserializer<'de>,
    T: FromStr,
    T::Err: fmt::Display,
{
    let raw = Option::<String>::deserialize(deserializer)?;
    match raw.as_deref().map(str::trim) {
        None | Some("") => Ok(None),
        Some(value) => value.parse().map(Some).map_err(serde::de::Error::custom),
    }
}

impl BookFilter {
    /// Treats an empty author string as "no author criterion".
    pub fn normalized(self) -> Self {
        Self { author: self.author.filter(|a| !a.is_empty()), year: self.year }
    }

    pub fn matches(&self, book: &Book) -> bool {
        if let Some(author) = self.author.as_deref() {
            if !book.author.contains(author) {
                return false;
            }
        }
        if let Some(year) = self.year {
            if book.year != year {
                return false;
            }
        }
        true
    }
}

/// Columns a listing may be ordered by.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortField {
    Id,
    Title,
    Author,
    Year,
    Genre,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct InvalidSortField(pub String);

impl fmt::Display for InvalidSortField {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "Invalid sort field")
    }
}

impl std::error::Error for InvalidSortField {}

impl FromStr for SortField {
    type Err = InvalidSortField;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "id" => Ok(SortField::Id),
            "title" => Ok(SortField::Title),
            "author" => Ok(SortField::Author),
            "year" => Ok(SortField::Year),
            "genre" => Ok(SortField::Genre),
            _ => Err(InvalidSortField(s.to_string())),
        }
    }
}

impl SortField {
    /// Column name; safe to splice into SQL since the set is closed.
    pub fn column(self) -> &'static str {
        match self {
            SortField::Id => "id",
            SortField::Title => "title",
            SortField::Author => "author",
            SortField::Year => "year",
            SortField::Genre => "genre",
        }
    }

    /// Ascending comparison on this field, ties broken by id.
    pub fn compare(self, a: &Book, b: &Book) -> Ordering {
        let primary = match self {
            SortField::Id => a.id.cmp(&b.id),
            SortField::Title => a.title.cmp(&b.title),
            SortField::Author => a.author.cmp(&b.author),
            SortField::Year => a.year.cmp(&b.year),
            SortField::Genre => a.genre.cmp(&b.genre),
        };
        primary.then_with(|| a.id.cmp(&b.id))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum SortOrder {
    #[default]
    Asc,
    Desc,
}

impl SortOrder {
    /// Only the exact string `desc` selects descending order.
    pub fn from_param(raw: Option<&str>) -> Self {
        match raw {
            Some("desc") => SortOrder::Desc,
            _ => SortOrder::Asc,
        }
    }

    pub fn as_sql(self) -> &'static str {
        match self {
            SortOrder::Asc => "ASC",
            SortOrder::Desc => "DESC",
        }
    }
}

#[derive(Debug, Clone, Default, Deserialize)]
pub struct SortQuery {
    #[serde(default)]
    pub field: Option<String>,
    #[serde(default)]
    pub order: Option<String>,
}
