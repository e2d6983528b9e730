//! The category resource: storage, service, and HTTP endpoints.

mod create;
mod db;
mod delete;
mod domain;
mod edit;
mod extract;
mod get;
mod mapper;
mod service;

pub use create::create_category_endpoint;
pub use db::{CategoryRepository, SQLiteCategoryRepository, create_category_table};
pub use delete::delete_category_endpoint;
pub use domain::{CategoryDto, CategoryEntity, CategoryId};
pub use edit::update_category_endpoint;
pub use extract::{CategoryIdPath, SearchParams, ValidCategory, parse_category_id};
pub use get::{get_category_endpoint, list_categories_endpoint, search_categories_endpoint};
pub use service::{
    CategoryService, create_category, delete_category_by_id, get_category_by_id,
    get_category_by_name, list_categories, update_category_by_id,
};
