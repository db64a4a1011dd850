//! Fuzz target for query string parsing
//!
//! # Strategy
//!
//! - Raw queries: completely arbitrary bytes as the query string
//! - Number lists: arbitrary tokens joined with commas
//!
//! # Invariants
//!
//! - Parsing completes and NEVER panics
//! - One value per comma-separated token
//! - Integers that fit in i64 parse back unchanged

#![no_main]

use arbitrary::Arbitrary;
use libfuzzer_sys::fuzz_target;
use sleepsort_server::{
    SortRequest,
    request::{coerce_int, parse_numbers},
};

#[derive(Debug, Arbitrary)]
enum QueryInput {
    RawQuery(String),
    Tokens(Vec<String>),
    Integers(Vec<i64>),
}

fuzz_target!(|input: QueryInput| {
    match input {
        QueryInput::RawQuery(query) => {
            let _ = SortRequest::from_query(Some(&query));
        }

        QueryInput::Tokens(tokens) => {
            let raw = tokens.join(",");
            let numbers = parse_numbers(&raw);
            assert_eq!(numbers.len(), raw.split(',').count());

            for token in &tokens {
                let _ = coerce_int(token);
            }
        }

        QueryInput::Integers(values) => {
            if values.is_empty() {
                return;
            }
            let raw = values.iter().map(ToString::to_string).collect::<Vec<_>>().join(",");
            assert_eq!(parse_numbers(&raw), values);
        }
    }
});
