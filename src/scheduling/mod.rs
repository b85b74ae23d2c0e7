pub mod confirmer;
pub mod requester;
pub mod session;

pub use confirmer::{dismiss_alert, scheduled_timestamp};
pub use requester::{RecommendationSource, RemoteRecommendationClient};
pub use session::PendingSchedules;
