//! DTOs for carousels_sea adapter.

#[derive(Debug, Clone)]
pub struct CarouselCreate {
    pub institute_id: i32,
    pub title: String,
    pub is_active: bool,
}

#[derive(Debug, Clone, Default)]
pub struct CarouselUpdate {
    pub title: Option<String>,
    pub is_active: Option<bool>,
}

#[derive(Debug, Clone)]
pub struct CarouselPhotoCreate {
    pub carousel_id: i32,
    pub photo_id: i32,
    pub display_text: Option<String>,
    pub display_order: i32,
}

#[derive(Debug, Clone)]
pub struct CarouselPhotoUpdate {
    pub display_text: Option<String>,
    pub display_order: i32,
}
