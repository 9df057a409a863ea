pub mod bus;
pub mod catalog;
pub mod error;
pub mod event;
pub mod traits;
pub mod types;

pub use bus::DashBus;
pub use catalog::{experiment_info, experiment_name, template_id_for, AgentSeed, ExperimentInfo};
pub use error::DashError;
pub use event::{FeedEvent, FeedFrame};
pub use traits::{ExperimentGateway, TemplateStore};
pub use types::{
    AgentProfile, ChatMessage, CriticalMoment, DayConversations, Exchange, ExperimentRecord,
    ExperimentStatus, Faction, HealthSnapshot, Notification, NotifyLevel, Recommendation, Report,
    Takeaway, TakeawayKind, Template, TemplateData,
};
