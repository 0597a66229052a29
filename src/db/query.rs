use std::cmp::Ordering;

use regex::{Regex, RegexBuilder};
use serde_json::Value;

use super::model::*;

/// Compiled form of a [`FieldFilter`]. Only string fields can match; the
/// pattern applies case-insensitively, unanchored.
pub struct CompiledFilter {
    field: String,
    pattern: Regex,
}

impl CompiledFilter {
    pub fn compile(filter: &FieldFilter) -> DbResult<Self> {
        let pattern = RegexBuilder::new(&filter.value)
            .case_insensitive(true)
            .build()?;
        Ok(Self {
            field: filter.field.clone(),
            pattern,
        })
    }

    pub fn matches(&self, movie: &Document) -> bool {
        match movie.get(&self.field) {
            Some(Value::String(s)) => self.pattern.is_match(s),
            _ => false,
        }
    }
}

/// Apply a find query to an already materialized collection.
pub fn apply_query(mut movies: Vec<Document>, query: &FindQuery) -> DbResult<Vec<Document>> {
    if let Some(filter) = &query.filter {
        let compiled = CompiledFilter::compile(filter)?;
        movies.retain(|movie| compiled.matches(movie));
    }

    if let Some(sort) = &query.sort {
        sort_movies(&mut movies, sort);
    }

    Ok(movies)
}

/// Stable sort by one field. Missing and null values order first, then
/// booleans, numbers and strings; anything else compares by its JSON text.
/// Ties keep the store's natural order.
pub fn sort_movies(movies: &mut [Document], sort: &SortSpec) {
    movies.sort_by(|a, b| {
        let ordering = compare_values(a.get(&sort.field), b.get(&sort.field));
        if sort.direction < 0 {
            ordering.reverse()
        } else {
            ordering
        }
    });
}

fn compare_values(a: Option<&Value>, b: Option<&Value>) -> Ordering {
    let (a, b) = match (a, b) {
        (None, None) => return Ordering::Equal,
        (None, Some(_)) => return Ordering::Less,
        (Some(_), None) => return Ordering::Greater,
        (Some(a), Some(b)) => (a, b),
    };

    let (rank_a, rank_b) = (type_rank(a), type_rank(b));
    if rank_a != rank_b {
        return rank_a.cmp(&rank_b);
    }

    match (a, b) {
        (Value::Bool(a), Value::Bool(b)) => a.cmp(b),
        (Value::Number(a), Value::Number(b)) => a
            .as_f64()
            .partial_cmp(&b.as_f64())
            .unwrap_or(Ordering::Equal),
        (Value::String(a), Value::String(b)) => a.cmp(b),
        _ => a.to_string().cmp(&b.to_string()),
    }
}

fn type_rank(value: &Value) -> u8 {
    match value {
        Value::Null => 0,
        Value::Bool(_) => 1,
        Value::Number(_) => 2,
        Value::String(_) => 3,
        Value::Array(_) => 4,
        Value::Object(_) => 5,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    fn doc(value: serde_json::Value) -> Document {
        match value {
            serde_json::Value::Object(map) => map,
            _ => panic!("expected a JSON object"),
        }
    }

    #[test]
    fn test_filter_matches_substring_case_insensitive() {
        let filter = CompiledFilter::compile(&FieldFilter {
            field: "title".to_string(),
            value: "blade".to_string(),
        })
        .unwrap();

        assert!(filter.matches(&doc(json!({"title": "Blade Runner"}))));
        assert!(filter.matches(&doc(json!({"title": "SLING BLADE"}))));
        assert!(!filter.matches(&doc(json!({"title": "Alien"}))));
    }

    #[test]
    fn test_filter_skips_missing_and_non_string_fields() {
        let filter = CompiledFilter::compile(&FieldFilter {
            field: "year".to_string(),
            value: "19".to_string(),
        })
        .unwrap();

        assert!(!filter.matches(&doc(json!({"year": 1982}))));
        assert!(!filter.matches(&doc(json!({"title": "Blade Runner"}))));
        assert!(!filter.matches(&doc(json!({"year": null}))));
    }

    #[test]
    fn test_filter_rejects_invalid_pattern() {
        let result = CompiledFilter::compile(&FieldFilter {
            field: "title".to_string(),
            value: "(unclosed".to_string(),
        });

        assert!(matches!(result, Err(DbError::Pattern(_))));
    }

    #[test]
    fn test_sort_ascending_and_descending() {
        let movies = vec![
            doc(json!({"title": "Stalker", "year": 1979})),
            doc(json!({"title": "Blade Runner", "year": 1982})),
            doc(json!({"title": "Alien", "year": 1979})),
        ];

        let mut asc = movies.clone();
        sort_movies(
            &mut asc,
            &SortSpec {
                field: "title".to_string(),
                direction: 1,
            },
        );
        let titles: Vec<&str> = asc.iter().map(|m| m["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Alien", "Blade Runner", "Stalker"]);

        let mut desc = movies.clone();
        sort_movies(
            &mut desc,
            &SortSpec {
                field: "title".to_string(),
                direction: -1,
            },
        );
        let titles: Vec<&str> = desc.iter().map(|m| m["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Stalker", "Blade Runner", "Alien"]);
    }

    #[test]
    fn test_sort_is_stable_and_orders_missing_first() {
        let mut movies = vec![
            doc(json!({"title": "Stalker", "year": 1979})),
            doc(json!({"title": "Blade Runner", "year": 1982})),
            doc(json!({"title": "No Year"})),
            doc(json!({"title": "Alien", "year": 1979})),
        ];

        sort_movies(
            &mut movies,
            &SortSpec {
                field: "year".to_string(),
                direction: 1,
            },
        );

        let titles: Vec<&str> = movies.iter().map(|m| m["title"].as_str().unwrap()).collect();
        // Missing field first, then 1979 entries in insertion order, then 1982.
        assert_eq!(titles, vec!["No Year", "Stalker", "Alien", "Blade Runner"]);
    }

    #[test]
    fn test_apply_query_filters_then_sorts() {
        let movies = vec![
            doc(json!({"title": "Blade Runner 2049", "year": 2017})),
            doc(json!({"title": "Alien", "year": 1979})),
            doc(json!({"title": "Blade Runner", "year": 1982})),
        ];

        let query = FindQuery {
            filter: Some(FieldFilter {
                field: "title".to_string(),
                value: "blade".to_string(),
            }),
            sort: Some(SortSpec {
                field: "year".to_string(),
                direction: -1,
            }),
        };

        let result = apply_query(movies, &query).unwrap();
        let titles: Vec<&str> = result.iter().map(|m| m["title"].as_str().unwrap()).collect();
        assert_eq!(titles, vec!["Blade Runner 2049", "Blade Runner"]);
    }
}
