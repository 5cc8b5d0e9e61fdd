mod landing;
pub use landing::LandingView;

mod login;
pub use login::LoginView;

mod signup;
pub use signup::SignupView;

mod dashboard;
pub use dashboard::{use_panels, DashboardView, Panels};

mod overview;
pub use overview::OverviewPanel;

mod ticket;
pub use ticket::TicketPanel;

mod announcements;
pub use announcements::AnnouncementsPanel;

mod lost_found;
pub use lost_found::LostFoundPanel;

mod emergency;
pub use emergency::EmergencyPanel;
