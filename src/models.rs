use serde::{Deserialize, Serialize};
use std::fmt;
use uuid::Uuid;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Genre {
    Action,
    Adventure,
    Comedy,
    Drama,
    Fantasy,
    Horror,
    Thriller,
    #[serde(rename = "Sci-Fi")]
    SciFi,
    Crime,
    Animation,
    Biography,
}

impl Genre {
    pub const ALL: [Genre; 11] = [
        Genre::Action,
        Genre::Adventure,
        Genre::Comedy,
        Genre::Drama,
        Genre::Fantasy,
        Genre::Horror,
        Genre::Thriller,
        Genre::SciFi,
        Genre::Crime,
        Genre::Animation,
        Genre::Biography,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Genre::Action => "Action",
            Genre::Adventure => "Adventure",
            Genre::Comedy => "Comedy",
            Genre::Drama => "Drama",
            Genre::Fantasy => "Fantasy",
            Genre::Horror => "Horror",
            Genre::Thriller => "Thriller",
            Genre::SciFi => "Sci-Fi",
            Genre::Crime => "Crime",
            Genre::Animation => "Animation",
            Genre::Biography => "Biography",
        }
    }

    /// Names accepted in payloads, in declaration order.
    pub fn names() -> Vec<&'static str> {
        Self::ALL.iter().map(Genre::as_str).collect()
    }

    /// Case-insensitive comparison used by the `?genre=` filter.
    pub fn matches(&self, query: &str) -> bool {
        self.as_str().eq_ignore_ascii_case(query)
    }
}

impl fmt::Display for Genre {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Movie {
    pub id: String,
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// A create payload that already passed full validation.
#[derive(Debug, Clone, PartialEq, Deserialize)]
pub struct NewMovie {
    pub title: String,
    pub year: i32,
    pub director: String,
    pub duration: u32,
    pub rate: f64,
    pub poster: String,
    pub genre: Vec<Genre>,
}

/// Fields present in a validated partial update.
#[derive(Debug, Clone, Default, PartialEq, Deserialize)]
pub struct MoviePatch {
    pub title: Option<String>,
    pub year: Option<i32>,
    pub director: Option<String>,
    pub duration: Option<u32>,
    pub rate: Option<f64>,
    pub poster: Option<String>,
    pub genre: Option<Vec<Genre>>,
}

impl Movie {
    /// Builds a stored record from a validated payload with a fresh random id.
    pub fn new(data: NewMovie) -> Self {
        Self {
            id: Uuid::new_v4().to_string(),
            title: data.title,
            year: data.year,
            director: data.director,
            duration: data.duration,
            rate: data.rate,
            poster: data.poster,
            genre: data.genre,
        }
    }

    pub fn has_genre(&self, query: &str) -> bool {
        self.genre.iter().any(|g| g.matches(query))
    }

    /// Overwrites the fields present in `patch`. `id` is never touched.
    pub fn apply(&mut self, patch: MoviePatch) {
        if let Some(title) = patch.title {
            self.title = title;
        }
        if let Some(year) = patch.year {
            self.year = year;
        }
        if let Some(director) = patch.director {
            self.director = director;
        }
        if let Some(duration) = patch.duration {
            self.duration = duration;
        }
        if let Some(rate) = patch.rate {
            self.rate = rate;
        }
        if let Some(poster) = patch.poster {
            self.poster = poster;
        }
        if let Some(genre) = patch.genre {
            self.genre = genre;
        }
    }
}
