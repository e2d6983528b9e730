//! Conversions between the stored category and the category sent to clients.
//!
//! Both shapes carry the same fields, so converting one way and back is lossless.

use crate::category::{CategoryDto, CategoryEntity};

impl From<CategoryEntity> for CategoryDto {
    fn from(entity: CategoryEntity) -> Self {
        Self {
            category_id: entity.id,
            category_name: entity.name,
        }
    }
}

impl From<CategoryDto> for CategoryEntity {
    fn from(dto: CategoryDto) -> Self {
        Self {
            id: dto.category_id,
            name: dto.category_name,
        }
    }
}
