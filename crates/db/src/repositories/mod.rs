//! Repository layer.
//!
//! Each repository is a zero-sized struct providing async CRUD methods
//! that accept `&PgPool` as the first argument.

pub mod ad_repo;
pub mod condominium_repo;
pub mod notice_repo;
pub mod tv_repo;
pub mod user_repo;

pub use ad_repo::AdRepo;
pub use condominium_repo::CondominiumRepo;
pub use notice_repo::NoticeRepo;
pub use tv_repo::TvRepo;
pub use user_repo::UserRepo;
