#![allow(missing_docs)]

pub(crate) mod http;

pub(crate) use http::{get_header, parse_json};
