mod post;
mod seo;
mod user;

pub use post::*;
pub use seo::*;
pub use user::*;
