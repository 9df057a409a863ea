//! Session state store, wizard controller, and view-region model for the
//! simdash dashboard. Everything here is synchronous and owned by the
//! dashboard loop; async producers only reach it through feed events.

pub mod notify;
pub mod state;
pub mod view;
pub mod wizard;

pub use notify::{Banner, NotificationCenter};
pub use state::{AgentRegistry, Session};
pub use view::{ConversationPanel, PanelEntry, ReportView, StatsStrip, ViewState};
pub use wizard::{NavButtons, ViewRegion, WizardStep};
