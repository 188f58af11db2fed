mod draft_card;
mod layout;
mod nav_bar;
mod notice_banner;
mod stat_card;

pub use draft_card::{DraftCard, EditDialog};
pub use layout::{Protected, PublicOnly, Shell};
pub use nav_bar::NavBar;
pub use notice_banner::NoticeBanner;
pub use stat_card::StatCard;
