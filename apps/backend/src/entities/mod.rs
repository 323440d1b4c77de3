pub mod carousel_photos;
pub mod carousels;
pub mod institutes;
pub mod notices;
pub mod photos;
pub mod users;

pub use carousel_photos::Entity as CarouselPhotos;
pub use carousel_photos::Model as CarouselPhoto;
pub use carousels::Entity as Carousels;
pub use carousels::Model as Carousel;
pub use institutes::Entity as Institutes;
pub use institutes::Model as Institute;
pub use notices::Entity as Notices;
pub use notices::Model as Notice;
pub use photos::Entity as Photos;
pub use photos::Model as Photo;
pub use users::Entity as Users;
pub use users::Model as User;
