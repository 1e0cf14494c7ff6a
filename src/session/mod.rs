mod dashboard_session;

pub use dashboard_session::{DashboardSession, Overview, Period, RECENT_LIMIT};
