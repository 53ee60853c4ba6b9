use crate::errors::StoreError;
use crate::models::{Movie, MoviePatch};
use crate::validation::{self, Schema};
use serde_json::Value;
use std::collections::HashSet;

const SEED: &str = include_str!("../data/movies.json");

/// In-memory movie collection. Iteration order is insertion order.
#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    movies: Vec<Movie>,
}

impl MovieStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn from_movies(movies: Vec<Movie>) -> Self {
        Self { movies }
    }

    /// Loads the dataset bundled with the binary.
    pub fn seeded(schema: &Schema) -> Result<Self, StoreError> {
        Self::from_json(SEED, schema)
    }

    /// Parses a JSON array of movies. Every record must carry an id and
    /// pass full validation.
    pub fn from_json(json: &str, schema: &Schema) -> Result<Self, StoreError> {
        let records: Vec<Value> = serde_json::from_str(json)?;
        let mut seen = HashSet::new();
        let mut movies = Vec::with_capacity(records.len());

        for (index, record) in records.iter().enumerate() {
            let id = record
                .get("id")
                .and_then(Value::as_str)
                .filter(|id| !id.is_empty())
                .ok_or(StoreError::MissingId { index })?;

            if !seen.insert(id.to_string()) {
                return Err(StoreError::DuplicateId(id.to_string()));
            }

            let data = validation::validate_movie(schema, record)
                .map_err(|violations| StoreError::InvalidRecord { index, violations })?;

            let mut movie = Movie::new(data);
            movie.id = id.to_string();
            movies.push(movie);
        }

        Ok(Self { movies })
    }

    pub fn all(&self) -> &[Movie] {
        &self.movies
    }

    /// Movies with at least one genre equal to `genre`, ignoring case.
    pub fn by_genre(&self, genre: &str) -> Vec<Movie> {
        self.movies
            .iter()
            .filter(|m| m.has_genre(genre))
            .cloned()
            .collect()
    }

    pub fn find(&self, id: &str) -> Option<&Movie> {
        self.movies.iter().find(|m| m.id == id)
    }

    pub fn insert(&mut self, movie: Movie) {
        self.movies.push(movie);
    }

    /// Removes the first movie with `id`, returning it.
    pub fn remove(&mut self, id: &str) -> Option<Movie> {
        let index = self.position(id)?;
        Some(self.movies.remove(index))
    }

    /// Merges `patch` into the movie with `id` and returns the merged record.
    pub fn update(&mut self, id: &str, patch: MoviePatch) -> Option<&Movie> {
        let index = self.position(id)?;
        let movie = &mut self.movies[index];
        movie.apply(patch);
        Some(movie)
    }

    pub fn len(&self) -> usize {
        self.movies.len()
    }

    pub fn is_empty(&self) -> bool {
        self.movies.is_empty()
    }

    fn position(&self, id: &str) -> Option<usize> {
        self.movies.iter().position(|m| m.id == id)
    }
}
