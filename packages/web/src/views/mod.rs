mod auth;
pub use auth::{Login, Signup};

mod landing;
pub use landing::Landing;

mod dashboard;
pub use dashboard::Dashboard;
