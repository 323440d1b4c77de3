//! DTOs for notices_sea adapter.

use time::Date;

#[derive(Debug, Clone)]
pub struct NoticeCreate {
    pub institute_id: i32,
    pub title: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub publish_date: Option<Date>,
}

/// Full replacement of the editable columns.
#[derive(Debug, Clone)]
pub struct NoticeUpdate {
    pub title: String,
    pub description: Option<String>,
    pub is_published: bool,
    pub publish_date: Option<Date>,
}
