pub mod escalation;
pub mod event;
pub mod message;
pub mod router;
pub mod slots;
pub mod triage;
